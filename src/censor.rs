use crate::hebrew::{hebrew_letters_only, is_all_digits};
use regex::Regex;
use std::sync::LazyLock;

pub const BLOCK: char = '█';

static LATIN_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-ZÀ-ÖØ-öø-ÿ]+").expect("valid latin pattern"));

static BLOCK_THEN_HEBREW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"█[א-ת]+").expect("valid adjacency pattern"));

static HEBREW_THEN_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[א-ת]+█").expect("valid adjacency pattern"));

fn mask(len: usize) -> String {
    (0..len).map(|_| BLOCK).collect()
}

/// builds the word list the censor hides: the letters-only form of every
/// title word, plus the word itself unless it is all digits or a bare dash
pub fn forbidden_words(title_words: &[String]) -> Vec<String> {
    let mut words: Vec<String> = title_words
        .iter()
        .map(|w| hebrew_letters_only(w))
        .collect();
    words.extend(
        title_words
            .iter()
            .filter(|w| !is_all_digits(w))
            .filter(|w| w.as_str() != "-")
            .cloned(),
    );
    words
}

/// masks every giveaway in the extract with block characters, keeping the
/// character count unchanged: forbidden words first, then latin runs, then
/// hebrew runs touching a block on either side (inflected forms of the title)
pub fn censor_extract(extract: &str, forbidden: &[String]) -> String {
    let mut censored = extract.to_string();

    for word in forbidden {
        if word.is_empty() {
            continue;
        }
        let pattern = Regex::new(&format!("(?i){}", regex::escape(word)))
            .expect("escaped word is a valid pattern");
        censored = pattern
            .replace_all(&censored, |caps: &regex::Captures| {
                mask(caps[0].chars().count())
            })
            .into_owned();
    }

    censored = LATIN_RUN
        .replace_all(&censored, |caps: &regex::Captures| {
            mask(caps[0].chars().count())
        })
        .into_owned();

    for re in [&BLOCK_THEN_HEBREW, &HEBREW_THEN_BLOCK] {
        censored = re
            .replace_all(&censored, |caps: &regex::Captures| {
                mask(caps[0].chars().count())
            })
            .into_owned();
    }

    censored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_forbidden_word_masked_everywhere() {
        let censored = censor_extract("דוד המלך גר בעיר דוד", &words(&["דוד"]));
        assert_eq!(censored, "███ המלך גר בעיר ███");
    }

    #[test]
    fn test_latin_run_masked() {
        let censored = censor_extract("המונח Wiki הוא מושג", &[]);
        assert_eq!(censored, "המונח ████ הוא מושג");
    }

    #[test]
    fn test_accented_latin_masked() {
        let censored = censor_extract("בית café קטן", &[]);
        assert_eq!(censored, "בית ████ קטן");
    }

    #[test]
    fn test_latin_case_insensitive_forbidden() {
        let censored = censor_extract("david וגם DAVID", &words(&["David"]));
        assert_eq!(censored, "█████ וגם █████");
    }

    #[test]
    fn test_prefixed_form_absorbed() {
        // "בירושלים" is 8 chars: "ירושלים" behind one prefix letter; the
        // whole run goes, one block per character
        let censored = censor_extract("בירושלים", &words(&["ירושלים"]));
        assert_eq!(censored, "█".repeat(8));
    }

    #[test]
    fn test_suffixed_form_absorbed() {
        let censored = censor_extract("גושדן", &words(&["גוש"]));
        assert_eq!(censored, "█████");
    }

    #[test]
    fn test_length_preserved() {
        let text = "העיר תל אביב שוכנת לחוף הים, near the sea";
        let censored = censor_extract(text, &words(&["תל", "אביב"]));
        assert_eq!(censored.chars().count(), text.chars().count());
    }

    #[test]
    fn test_clean_text_unchanged() {
        let text = "משפט עברי נקי לגמרי";
        assert_eq!(censor_extract(text, &words(&["ציון"])), text);
    }

    #[test]
    fn test_empty_forbidden_word_skipped() {
        let censored = censor_extract("טקסט כלשהו", &words(&[""]));
        assert_eq!(censored, "טקסט כלשהו");
    }

    #[test]
    fn test_forbidden_words_letters_only_and_originals() {
        let list = forbidden_words(&words(&["תל-אביב"]));
        assert_eq!(list, words(&["תלאביב", "תל-אביב"]));
    }

    #[test]
    fn test_forbidden_words_drops_digits_and_dash() {
        let list = forbidden_words(&words(&["מלחמת", "8491", "-"]));
        assert_eq!(list, words(&["מלחמת", "", "", "מלחמת"]));
    }

    #[test]
    fn test_regex_metachars_in_title_escaped() {
        let censored = censor_extract("סרט א.ב זכה", &words(&["א.ב"]));
        assert_eq!(censored, "סרט ███ זכה");
    }

    #[test]
    fn test_repeated_censoring_is_identical() {
        let text = "ירושלים וגם Wiki בירושלים";
        let list = words(&["ירושלים"]);

        let first = censor_extract(text, &list);
        let second = censor_extract(text, &list);

        assert_eq!(first, second);
        assert_eq!(first, "███████ וגם ████ ████████");
    }
}
