use regex::Regex;
use std::sync::LazyLock;

/// hebrew base letters only, no points and no punctuation
pub fn is_hebrew_letter(c: char) -> bool {
    ('\u{05D0}'..='\u{05EA}').contains(&c)
}

fn is_niqqud(c: char) -> bool {
    // U+05BE is the maqaf, punctuation rather than a vowel point, and stays
    ('\u{0591}'..='\u{05BD}').contains(&c) || ('\u{05BF}'..='\u{05C7}').contains(&c)
}

pub fn strip_niqqud(text: &str) -> String {
    text.chars().filter(|c| !is_niqqud(*c)).collect()
}

pub fn hebrew_letters_only(word: &str) -> String {
    word.chars().filter(|c| is_hebrew_letter(*c)).collect()
}

static INNERMOST_PARENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^()]*)\)").expect("valid parentheses pattern"));

/// removes parenthesized groups, innermost first, until none are left;
/// unmatched parens are left alone
pub fn strip_parentheses(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = INNERMOST_PARENS.replace_all(&current, "").into_owned();
        if next == current {
            return next;
        }
        current = next;
    }
}

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("valid digit pattern"));

/// hebrew text is right-to-left but digit runs read left-to-right, so a
/// character-by-character rendering needs each run stored reversed
pub fn reverse_digit_runs(text: &str) -> String {
    DIGIT_RUN
        .replace_all(text, |caps: &regex::Captures| {
            caps[0].chars().rev().collect::<String>()
        })
        .into_owned()
}

pub fn is_all_digits(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_digit())
}

const QWERTY_KEYS: &str = "ertyuiopasdfghjkl;zxcvbnm,.";
const HEBREW_KEYS: &str = "קראטוןםפשדגכעיחלךףזסבהנמצתץ";

/// maps a key typed on a latin QWERTY layout to the letter at the same
/// position on the hebrew layout; anything unmapped passes through
pub fn qwerty_to_hebrew(c: char) -> char {
    let lower = c.to_ascii_lowercase();
    QWERTY_KEYS
        .chars()
        .zip(HEBREW_KEYS.chars())
        .find(|(key, _)| *key == lower)
        .map(|(_, heb)| heb)
        .unwrap_or(c)
}

/// cleans up artifacts the wikipedia extract endpoint leaves behind
pub fn tidy_extract(text: &str) -> String {
    text.replace(" ,", ",").replace(" .", ".").replace('־', "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_hebrew_letter() {
        assert!(is_hebrew_letter('א'));
        assert!(is_hebrew_letter('ת'));
        assert!(is_hebrew_letter('ץ'));
        assert!(!is_hebrew_letter('a'));
        assert!(!is_hebrew_letter('5'));
        assert!(!is_hebrew_letter('־'));
        assert!(!is_hebrew_letter('\u{05B0}'));
        assert!(!is_hebrew_letter(' '));
    }

    #[test]
    fn test_strip_niqqud_removes_points() {
        assert_eq!(strip_niqqud("בְּרֵאשִׁית"), "בראשית");
        assert_eq!(strip_niqqud("שָׁלוֹם"), "שלום");
    }

    #[test]
    fn test_strip_niqqud_keeps_maqaf() {
        assert_eq!(strip_niqqud("בת־ים"), "בת־ים");
    }

    #[test]
    fn test_strip_niqqud_plain_text_unchanged() {
        assert_eq!(strip_niqqud("ירושלים"), "ירושלים");
    }

    #[test]
    fn test_strip_parentheses_single_group() {
        assert_eq!(strip_parentheses("דוד (מלך)"), "דוד ");
    }

    #[test]
    fn test_strip_parentheses_nested() {
        assert_eq!(strip_parentheses("a (b (c) d) e"), "a  e");
    }

    #[test]
    fn test_strip_parentheses_multiple_groups() {
        assert_eq!(strip_parentheses("x (1) y (2) z"), "x  y  z");
    }

    #[test]
    fn test_strip_parentheses_unmatched_left_alone() {
        assert_eq!(strip_parentheses("a (b"), "a (b");
        assert_eq!(strip_parentheses("a ) b ("), "a ) b (");
    }

    #[test]
    fn test_strip_parentheses_idempotent() {
        let once = strip_parentheses("עיר (גדולה (מאוד)) בישראל");
        assert_eq!(strip_parentheses(&once), once);
    }

    #[test]
    fn test_reverse_digit_runs() {
        assert_eq!(reverse_digit_runs("מלחמת 1948"), "מלחמת 8491");
        assert_eq!(reverse_digit_runs("12 ואז 345"), "21 ואז 543");
        assert_eq!(reverse_digit_runs("ללא ספרות"), "ללא ספרות");
    }

    #[test]
    fn test_is_all_digits() {
        assert!(is_all_digits("1948"));
        assert!(is_all_digits("7"));
        assert!(!is_all_digits(""));
        assert!(!is_all_digits("19א"));
        assert!(!is_all_digits("x12"));
    }

    #[test]
    fn test_qwerty_to_hebrew_letters() {
        assert_eq!(qwerty_to_hebrew('a'), 'ש');
        assert_eq!(qwerty_to_hebrew('e'), 'ק');
        assert_eq!(qwerty_to_hebrew('.'), 'ץ');
        assert_eq!(qwerty_to_hebrew(';'), 'ף');
    }

    #[test]
    fn test_qwerty_to_hebrew_uppercase() {
        assert_eq!(qwerty_to_hebrew('A'), 'ש');
        assert_eq!(qwerty_to_hebrew('M'), 'צ');
    }

    #[test]
    fn test_qwerty_to_hebrew_passthrough() {
        assert_eq!(qwerty_to_hebrew('ש'), 'ש');
        assert_eq!(qwerty_to_hebrew('q'), 'q');
        assert_eq!(qwerty_to_hebrew('1'), '1');
    }

    #[test]
    fn test_tidy_extract() {
        assert_eq!(tidy_extract("שלום , עולם ."), "שלום, עולם.");
        assert_eq!(tidy_extract("בת־ים"), "בת-ים");
    }

    #[test]
    fn test_hebrew_letters_only() {
        assert_eq!(hebrew_letters_only("תל-אביב"), "תלאביב");
        assert_eq!(hebrew_letters_only("1948"), "");
        assert_eq!(hebrew_letters_only("ה'תשפ\"ד"), "התשפד");
    }
}
