use std::path::PathBuf;

use chrono::NaiveDate;
use log::{debug, warn};

use crate::articles::Article;
use crate::cursor::{first_editable, move_backwards, move_forward};
use crate::daily::{DailyPicker, DailyRun, SlotOutcome};
use crate::hebrew::{is_hebrew_letter, qwerty_to_hebrew};
use crate::pool::{ArticlePool, RandomPicker};
use crate::puzzle::{AdmissionRules, Puzzle};
use crate::runtime::TICK_RATE_MS;
use crate::score::{append_history, BestScore, HistoryRow, Scoreboard, ScoreStore};

pub const FLASH_TICKS: u8 = (1000 / TICK_RATE_MS) as u8;

/// keys the game reacts to, after the frontend has mapped raw input;
/// the grid runs right-to-left, so Left advances and Right goes back
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameKey {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Left,
    Right,
    Escape,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GamePhase {
    Active,
    Solved,
    Revealed,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameEvent {
    Solved,
    Revealed,
    AdvanceRequested,
}

/// one question being played: the grid contents, the cursor and the phase
#[derive(Debug)]
pub struct Game {
    pub puzzle: Puzzle,
    pub guess: Vec<Option<char>>,
    pub cursor: usize,
    pub phase: GamePhase,
    pub flash_ticks: u8,
}

impl Game {
    pub fn new(puzzle: Puzzle) -> Self {
        let cursor = first_editable(&puzzle.cells).unwrap_or(0);
        let guess = vec![None; puzzle.cells.len()];
        Self {
            puzzle,
            guess,
            cursor,
            phase: GamePhase::Active,
            flash_ticks: 0,
        }
    }

    pub fn handle_key(&mut self, key: GameKey) -> Option<GameEvent> {
        if self.phase != GamePhase::Active {
            return match key {
                GameKey::Enter | GameKey::Escape => Some(GameEvent::AdvanceRequested),
                _ => None,
            };
        }

        match key {
            GameKey::Char(c) => {
                let hebrew = qwerty_to_hebrew(c);
                if is_hebrew_letter(hebrew) {
                    self.guess[self.cursor] = Some(hebrew);
                    self.cursor = move_forward(&self.puzzle.cells, self.cursor);
                }
                None
            }
            GameKey::Enter => self.check(),
            GameKey::Escape => Some(self.reveal()),
            GameKey::Backspace => {
                self.guess[self.cursor] = None;
                self.cursor = move_backwards(&self.puzzle.cells, self.cursor);
                None
            }
            GameKey::Delete => {
                self.guess[self.cursor] = None;
                None
            }
            GameKey::Left => {
                self.cursor = move_forward(&self.puzzle.cells, self.cursor);
                None
            }
            GameKey::Right => {
                self.cursor = move_backwards(&self.puzzle.cells, self.cursor);
                None
            }
        }
    }

    /// jump the cursor to a clicked cell; anything out of range is ignored
    pub fn click_cell(&mut self, idx: usize) {
        if self.phase == GamePhase::Active && idx < self.puzzle.cells.len() {
            self.cursor = idx;
        }
    }

    pub fn on_tick(&mut self) {
        if self.flash_ticks > 0 {
            self.flash_ticks -= 1;
        }
    }

    pub fn is_flashing(&self) -> bool {
        self.flash_ticks > 0
    }

    pub fn is_over(&self) -> bool {
        self.phase != GamePhase::Active
    }

    /// the typed letters in grid order, const cells skipped; a partial fill
    /// joins shorter than the answer, so it can never compare equal
    pub fn joined_guess(&self) -> String {
        self.puzzle
            .cells
            .iter()
            .zip(&self.guess)
            .filter(|(cell, _)| !cell.is_const)
            .filter_map(|(_, g)| *g)
            .collect()
    }

    /// the char a cell should show right now, if any
    pub fn displayed(&self, idx: usize) -> Option<char> {
        let cell = self.puzzle.cells.get(idx)?;
        if cell.is_const {
            Some(cell.ch)
        } else {
            self.guess.get(idx).copied().flatten()
        }
    }

    fn check(&mut self) -> Option<GameEvent> {
        if self.joined_guess() == self.puzzle.answer {
            self.phase = GamePhase::Solved;
            self.flash_ticks = 0;
            Some(GameEvent::Solved)
        } else {
            self.flash_ticks = FLASH_TICKS;
            None
        }
    }

    /// gives the answer away: fills the grid and ends the question
    pub fn reveal(&mut self) -> GameEvent {
        for (i, cell) in self.puzzle.cells.iter().enumerate() {
            if !cell.is_const {
                self.guess[i] = Some(cell.ch);
            }
        }
        self.phase = GamePhase::Revealed;
        self.flash_ticks = 0;
        GameEvent::Revealed
    }
}

/// selection scheme a session runs under, with its per-mode state
pub enum SessionKind {
    Free,
    Daily(DailyRun),
}

/// cross-question state: the shrinking pool, the running score and the
/// persistence hooks; owns the game currently on screen, if any
pub struct Session {
    pool: ArticlePool,
    rules: AdmissionRules,
    kind: SessionKind,
    game: Option<Game>,
    pub scoreboard: Scoreboard,
    pub best: BestScore,
    store: Box<dyn ScoreStore>,
    history_path: Option<PathBuf>,
    exhausted: bool,
}

impl Session {
    pub fn free(
        articles: Vec<Article>,
        rules: AdmissionRules,
        store: Box<dyn ScoreStore>,
        history_path: Option<PathBuf>,
    ) -> Self {
        Self::start(SessionKind::Free, articles, rules, store, history_path)
    }

    pub fn daily(
        articles: Vec<Article>,
        rules: AdmissionRules,
        date: NaiveDate,
        store: Box<dyn ScoreStore>,
        history_path: Option<PathBuf>,
    ) -> Self {
        let kind = SessionKind::Daily(DailyRun::new(date));
        Self::start(kind, articles, rules, store, history_path)
    }

    fn start(
        kind: SessionKind,
        articles: Vec<Article>,
        rules: AdmissionRules,
        store: Box<dyn ScoreStore>,
        history_path: Option<PathBuf>,
    ) -> Self {
        let best = store.load();
        let mut session = Self {
            pool: ArticlePool::new(articles),
            rules,
            kind,
            game: None,
            scoreboard: Scoreboard::default(),
            best,
            store,
            history_path,
            exhausted: false,
        };
        session.draw_next();
        session
    }

    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    pub fn mode_name(&self) -> &'static str {
        match self.kind {
            SessionKind::Free => "free",
            SessionKind::Daily(_) => "daily",
        }
    }

    pub fn daily_run(&self) -> Option<&DailyRun> {
        match &self.kind {
            SessionKind::Daily(run) => Some(run),
            SessionKind::Free => None,
        }
    }

    /// all ten daily slots played and the last one advanced past
    pub fn daily_complete(&self) -> bool {
        self.game.is_none() && self.daily_run().map_or(false, |run| run.is_complete())
    }

    /// no admissible question left in the pool
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn handle_key(&mut self, key: GameKey) {
        let event = match self.game.as_mut() {
            Some(game) => game.handle_key(key),
            None => return,
        };

        match event {
            Some(GameEvent::Solved) => self.round_over(SlotOutcome::Solved),
            Some(GameEvent::Revealed) => self.round_over(SlotOutcome::Revealed),
            Some(GameEvent::AdvanceRequested) => self.advance(),
            None => {}
        }
    }

    pub fn click_cell(&mut self, idx: usize) {
        if let Some(game) = self.game.as_mut() {
            game.click_cell(idx);
        }
    }

    pub fn on_tick(&mut self) {
        if let Some(game) = self.game.as_mut() {
            game.on_tick();
        }
    }

    /// the wikipedia page of the current question; asking for it mid-question
    /// gives the answer away
    pub fn article_url(&mut self) -> Option<String> {
        let game = self.game.as_mut()?;
        let url = game.puzzle.wiki_url();
        if game.phase == GamePhase::Active {
            game.reveal();
            self.round_over(SlotOutcome::Revealed);
        }
        Some(url)
    }

    fn round_over(&mut self, outcome: SlotOutcome) {
        match outcome {
            SlotOutcome::Solved => self.scoreboard.record_correct(),
            SlotOutcome::Revealed => self.scoreboard.record_incorrect(),
        }
        if let SessionKind::Daily(run) = &mut self.kind {
            run.record(outcome);
        }
        if self.best.improved_by(&self.scoreboard) {
            self.best = BestScore::from_board(&self.scoreboard);
            if let Err(err) = self.store.save(&self.best) {
                warn!("could not save best score: {}", err);
            }
        }
        self.log_history(outcome);
    }

    fn log_history(&self, outcome: SlotOutcome) {
        let (path, game) = match (&self.history_path, &self.game) {
            (Some(path), Some(game)) => (path, game),
            _ => return,
        };
        let outcome_name = match outcome {
            SlotOutcome::Solved => "solved",
            SlotOutcome::Revealed => "revealed",
        };
        let row = HistoryRow::new(
            self.mode_name(),
            &game.puzzle.display_title,
            outcome_name,
            self.scoreboard.points(),
        );
        if let Err(err) = append_history(path, &row) {
            debug!("could not append history row: {}", err);
        }
    }

    fn advance(&mut self) {
        if let Some(game) = self.game.take() {
            self.pool.remove(game.puzzle.source_index);
        }
        if self.daily_run().map_or(false, |run| run.is_complete()) {
            return;
        }
        self.draw_next();
    }

    fn draw_next(&mut self) {
        let puzzle = match &self.kind {
            SessionKind::Free => self.pool.draw(&mut RandomPicker, &self.rules),
            SessionKind::Daily(run) => self
                .pool
                .draw(&mut DailyPicker::new(run.date, run.slot()), &self.rules),
        };

        match puzzle {
            Some(puzzle) => {
                self.scoreboard.record_asked();
                self.game = Some(Game::new(puzzle));
            }
            None => {
                self.exhausted = true;
                self.game = None;
            }
        }
    }
}
