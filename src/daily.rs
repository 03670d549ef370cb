use crate::pool::IndexPicker;
use chrono::{Datelike, NaiveDate};
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const DAILY_SLOTS: usize = 10;

/// two questions from each popularity band make up a day's run, easiest
/// (most viewed) first
const RANK_BANDS: [(usize, usize); 5] = [(0, 10), (10, 20), (20, 50), (50, 100), (100, 200)];

fn band_for_slot(slot: usize) -> (usize, usize) {
    RANK_BANDS[(slot / 2).min(RANK_BANDS.len() - 1)]
}

fn daily_seed(date: NaiveDate, slot: usize) -> u64 {
    (date.num_days_from_ce() as u64)
        .wrapping_mul(DAILY_SLOTS as u64)
        .wrapping_add(slot as u64)
}

/// picks the question for one slot of a day's run; the same date and slot
/// always land on the same spot in the pool
pub struct DailyPicker {
    date: NaiveDate,
    slot: usize,
}

impl DailyPicker {
    pub fn new(date: NaiveDate, slot: usize) -> Self {
        Self { date, slot }
    }
}

impl IndexPicker for DailyPicker {
    fn pick(&mut self, pool_len: usize) -> Option<usize> {
        if pool_len == 0 {
            return None;
        }
        let (band_start, band_end) = band_for_slot(self.slot);
        let (lo, hi) = if band_start >= pool_len {
            // band starts past the end of a small pool: use all of it
            (0, pool_len)
        } else {
            (band_start, band_end.min(pool_len))
        };

        let mut rng = StdRng::seed_from_u64(daily_seed(self.date, self.slot));
        Some(rng.gen_range(lo..hi))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SlotOutcome {
    Solved,
    Revealed,
}

/// the outcomes of one calendar day's run, in slot order
#[derive(Clone, Debug)]
pub struct DailyRun {
    pub date: NaiveDate,
    pub outcomes: Vec<SlotOutcome>,
}

impl DailyRun {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            outcomes: vec![],
        }
    }

    pub fn slot(&self) -> usize {
        self.outcomes.len()
    }

    pub fn record(&mut self, outcome: SlotOutcome) {
        if !self.is_complete() {
            self.outcomes.push(outcome);
        }
    }

    pub fn is_complete(&self) -> bool {
        self.outcomes.len() >= DAILY_SLOTS
    }

    pub fn solved(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| **o == SlotOutcome::Solved)
            .count()
    }

    pub fn revealed(&self) -> usize {
        self.outcomes.len() - self.solved()
    }

    pub fn points(&self) -> i64 {
        3 * self.solved() as i64 - self.revealed() as i64
    }

    pub fn share_text(&self) -> String {
        let grid = self
            .outcomes
            .iter()
            .map(|o| match o {
                SlotOutcome::Solved => '🟩',
                SlotOutcome::Revealed => '🟥',
            })
            .chunks(5)
            .into_iter()
            .map(|chunk| chunk.collect::<String>())
            .join(" ");

        format!(
            "מה הערך? {}\n{}\n{}/{} · {} נקודות",
            self.date.format("%Y-%m-%d"),
            grid,
            self.solved(),
            DAILY_SLOTS,
            self.points()
        )
    }
}

pub fn tweet_url(run: &DailyRun) -> String {
    format!(
        "https://twitter.com/intent/tweet?text={}",
        percent_encode(&run.share_text())
    )
}

fn percent_encode(text: &str) -> String {
    let mut out = String::new();
    for byte in text.as_bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(*byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
