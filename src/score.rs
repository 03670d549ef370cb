use chrono::Local;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

pub const BEST_SCORE_VERSION: u32 = 1;

/// running tallies for the current sitting
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Scoreboard {
    pub asked: u32,
    pub correct: u32,
    pub incorrect: u32,
}

impl Scoreboard {
    pub fn record_asked(&mut self) {
        self.asked += 1;
    }

    pub fn record_correct(&mut self) {
        self.correct += 1;
    }

    pub fn record_incorrect(&mut self) {
        self.incorrect += 1;
    }

    pub fn points(&self) -> i64 {
        3 * self.correct as i64 - self.incorrect as i64
    }
}

/// the persisted personal record; field names are stable, versioned JSON
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BestScore {
    pub version: u32,
    pub best_num_questions_asked: u32,
    pub best_num_questions_correct: u32,
    pub best_num_questions_incorrect: u32,
}

impl Default for BestScore {
    fn default() -> Self {
        Self {
            version: BEST_SCORE_VERSION,
            best_num_questions_asked: 0,
            best_num_questions_correct: 0,
            best_num_questions_incorrect: 0,
        }
    }
}

impl BestScore {
    pub fn points(&self) -> i64 {
        3 * self.best_num_questions_correct as i64 - self.best_num_questions_incorrect as i64
    }

    /// a sitting beats the record on points; fewer questions asked breaks ties
    pub fn improved_by(&self, board: &Scoreboard) -> bool {
        board.points() > self.points()
            || (board.points() == self.points() && board.asked < self.best_num_questions_asked)
    }

    pub fn from_board(board: &Scoreboard) -> Self {
        Self {
            version: BEST_SCORE_VERSION,
            best_num_questions_asked: board.asked,
            best_num_questions_correct: board.correct,
            best_num_questions_incorrect: board.incorrect,
        }
    }
}

pub trait ScoreStore {
    fn load(&self) -> BestScore;
    fn save(&self, best: &BestScore) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "erekh") {
            pd.config_dir().join("best_score.json")
        } else {
            PathBuf::from("erekh_best_score.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileScoreStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&self) -> BestScore {
        if let Ok(bytes) = fs::read(&self.path) {
            if let Ok(best) = serde_json::from_slice::<BestScore>(&bytes) {
                if best.version == BEST_SCORE_VERSION {
                    return best;
                }
            }
        }
        BestScore::default()
    }

    fn save(&self, best: &BestScore) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(best).unwrap_or_default();
        fs::write(&self.path, data)
    }
}

/// one line of the answer log kept in the state directory
#[derive(Debug, Clone, Serialize)]
pub struct HistoryRow {
    pub timestamp: String,
    pub mode: String,
    pub title: String,
    pub outcome: String,
    pub points: i64,
}

impl HistoryRow {
    pub fn new(mode: &str, title: &str, outcome: &str, points: i64) -> Self {
        Self {
            timestamp: Local::now().to_rfc3339(),
            mode: mode.to_string(),
            title: title.to_string(),
            outcome: outcome.to_string(),
            points,
        }
    }
}

pub fn append_history(path: &Path, row: &HistoryRow) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let write_header = !path.exists();
    let file = fs::OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(write_header)
        .from_writer(file);
    writer.serialize(row)?;
    writer.flush()?;
    Ok(())
}
