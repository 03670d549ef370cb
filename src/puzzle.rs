use crate::articles::Article;
use crate::censor::{censor_extract, forbidden_words, BLOCK};
use crate::hebrew::{
    is_all_digits, is_hebrew_letter, reverse_digit_runs, strip_niqqud, strip_parentheses,
    tidy_extract,
};
use std::fmt;

/// one slot of the title grid; const cells are shown as-is and never typed
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolutionCell {
    pub ch: char,
    pub is_const: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RejectReason {
    ExtractTooShort,
    SkippedSnippet,
    LatinTitle,
    DigitsOnlyTitle,
    EmptySolution,
    NothingCensored,
    WordTooLong,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            RejectReason::ExtractTooShort => "extract too short",
            RejectReason::SkippedSnippet => "extract contains a skipped snippet",
            RejectReason::LatinTitle => "title contains latin letters",
            RejectReason::DigitsOnlyTitle => "title is all digits",
            RejectReason::EmptySolution => "title has no guessable letters",
            RejectReason::NothingCensored => "censoring left the extract untouched",
            RejectReason::WordTooLong => "title word does not fit the grid",
        };
        write!(f, "{}", msg)
    }
}

#[derive(Clone, Debug)]
pub struct AdmissionRules {
    pub min_extract_len: usize,
    pub skipped_snippets: Vec<String>,
    pub max_word_len: Option<usize>,
}

impl Default for AdmissionRules {
    fn default() -> Self {
        Self {
            min_extract_len: 150,
            // a long run of spaces is what broken math markup collapses to
            skipped_snippets: vec!["       ".to_string()],
            max_word_len: None,
        }
    }
}

/// a playable question: the processed title grid plus the censored extract
#[derive(Clone, Debug)]
pub struct Puzzle {
    pub original_title: String,
    pub display_title: String,
    pub display_words: Vec<String>,
    pub extract: String,
    pub censored_extract: String,
    pub cells: Vec<SolutionCell>,
    pub answer: String,
    pub source_index: usize,
    pub pageid: u64,
    pub views: Option<u64>,
    pub rank: Option<u32>,
}

impl Puzzle {
    pub fn build(
        article: &Article,
        source_index: usize,
        rules: &AdmissionRules,
    ) -> Result<Puzzle, RejectReason> {
        if article.extract.chars().count() < rules.min_extract_len {
            return Err(RejectReason::ExtractTooShort);
        }
        if rules
            .skipped_snippets
            .iter()
            .any(|s| article.extract.contains(s))
        {
            return Err(RejectReason::SkippedSnippet);
        }
        if article.title.chars().any(|c| c.is_ascii_alphabetic()) {
            return Err(RejectReason::LatinTitle);
        }
        if is_all_digits(&article.title) {
            return Err(RejectReason::DigitsOnlyTitle);
        }

        let stripped_title = strip_niqqud(&strip_parentheses(&article.title));
        let display_words: Vec<String> = stripped_title
            .split_whitespace()
            .map(reverse_digit_runs)
            .collect();
        let display_title = display_words.join(" ");

        let cells: Vec<SolutionCell> = display_words
            .iter()
            .flat_map(|word| word.chars())
            .map(|ch| SolutionCell {
                ch,
                is_const: !is_hebrew_letter(ch),
            })
            .collect();

        let answer: String = cells
            .iter()
            .filter(|cell| !cell.is_const)
            .map(|cell| cell.ch)
            .collect();
        if answer.is_empty() {
            return Err(RejectReason::EmptySolution);
        }

        let extract = tidy_extract(&strip_niqqud(&strip_parentheses(&article.extract)));
        let forbidden = forbidden_words(&display_words);
        let censored_extract = censor_extract(&extract, &forbidden);
        if !censored_extract.contains(BLOCK) {
            return Err(RejectReason::NothingCensored);
        }

        if let Some(max) = rules.max_word_len {
            if display_words.iter().any(|w| w.chars().count() > max) {
                return Err(RejectReason::WordTooLong);
            }
        }

        Ok(Puzzle {
            original_title: article.title.clone(),
            display_title,
            display_words,
            extract,
            censored_extract,
            cells,
            answer,
            source_index,
            pageid: article.pageid,
            views: article.views,
            rank: article.rank,
        })
    }

    pub fn wiki_url(&self) -> String {
        format!("https://he.wikipedia.org/?curid={}", self.pageid)
    }
}
