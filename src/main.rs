pub mod app_dirs;
pub mod articles;
pub mod censor;
pub mod cursor;
pub mod daily;
pub mod game;
pub mod hebrew;
pub mod pool;
pub mod puzzle;
pub mod runtime;
pub mod score;
pub mod ui;

use crate::{
    articles::Article,
    daily::tweet_url,
    game::{GameKey, Session},
    puzzle::AdmissionRules,
    runtime::{CrosstermEventSource, FixedTicker, Runner, TermEvent, TICK_RATE_MS},
    score::FileScoreStore,
};
use chrono::Local;
use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyModifiers, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};
use webbrowser::Browser;

/// the daily challenge only serves questions with a longer opening
const DAILY_MIN_EXTRACT_LEN: usize = 200;

/// below this width long title words cannot fit on the grid row
const NARROW_WIDTH: u16 = 60;
const NARROW_MAX_WORD_LEN: usize = 8;

/// guess the hebrew wikipedia article from its censored opening, in your terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A guessing game over the most viewed Hebrew Wikipedia articles: the opening of an article is shown with every occurrence of its title blanked out, and you type the missing letters into the title grid. QWERTY keys are transliterated to the Hebrew layout."
)]
pub struct Cli {
    /// game mode: an endless random run, or ten seeded questions per calendar day
    #[clap(short = 'm', long, value_enum, default_value_t = GameMode::Free)]
    mode: GameMode,

    /// read the question set from a json file instead of the bundled one
    #[clap(short = 'a', long)]
    articles: Option<PathBuf>,

    /// minimum extract length for a question to be playable
    #[clap(long)]
    min_extract_len: Option<usize>,

    /// skip questions whose longest title word exceeds this many letters
    #[clap(long)]
    max_word_len: Option<usize>,
}

#[derive(Debug, Copy, Clone, PartialEq, ValueEnum, strum_macros::Display)]
pub enum GameMode {
    Free,
    Daily,
}

impl Cli {
    fn admission_rules(&self, term_width: u16) -> AdmissionRules {
        let mut rules = AdmissionRules::default();

        if let Some(min) = self.min_extract_len {
            rules.min_extract_len = min;
        } else if self.mode == GameMode::Daily {
            rules.min_extract_len = DAILY_MIN_EXTRACT_LEN;
        }

        rules.max_word_len = self.max_word_len.or(if term_width < NARROW_WIDTH {
            Some(NARROW_MAX_WORD_LEN)
        } else {
            None
        });

        rules
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    Playing,
    DailySummary,
    Exhausted,
}

pub struct App {
    pub session: Session,
    pub state: AppState,
    /// screen position of every grid cell, refreshed on each draw
    pub cell_rects: Vec<Rect>,
}

impl App {
    pub fn new(cli: Cli, articles: Vec<Article>, term_width: u16) -> Self {
        let rules = cli.admission_rules(term_width);
        let store = Box::new(FileScoreStore::new());
        let history_path = app_dirs::AppDirs::history_path();

        let session = match cli.mode {
            GameMode::Free => Session::free(articles, rules, store, history_path),
            GameMode::Daily => Session::daily(
                articles,
                rules,
                Local::now().date_naive(),
                store,
                history_path,
            ),
        };

        let mut app = Self {
            session,
            state: AppState::Playing,
            cell_rects: Vec::new(),
        };
        app.sync_state();
        app
    }

    /// derive the screen from the session after anything that can end a question
    fn sync_state(&mut self) {
        self.state = if self.session.daily_complete() {
            AppState::DailySummary
        } else if self.session.is_exhausted() {
            AppState::Exhausted
        } else {
            AppState::Playing
        };
    }

    fn open_article(&mut self) {
        if self.state != AppState::Playing {
            return;
        }
        if let Some(url) = self.session.article_url() {
            if Browser::is_available() {
                webbrowser::open(&url).unwrap_or_default();
            }
        }
    }

    fn click_at(&mut self, column: u16, row: u16) {
        if self.state != AppState::Playing {
            return;
        }
        if let Some(idx) = ui::grid::hit_cell(&self.cell_rects, column, row) {
            self.session.click_cell(idx);
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let articles = match &cli.articles {
        Some(path) => articles::load_from_path(path).unwrap_or_else(|err| {
            let mut cmd = Cli::command();
            cmd.error(
                ErrorKind::Io,
                format!("cannot load articles from {}: {}", path.display(), err),
            )
            .exit()
        }),
        None => articles::bundled(),
    };

    let (term_width, _) = crossterm::terminal::size()?;

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(cli, articles, term_width);
    let res = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen,
    )?;
    terminal.show_cursor()?;

    res
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );

    terminal.draw(|f| ui(app, f))?;

    loop {
        match runner.step() {
            TermEvent::Key(key) => {
                if handle_key(app, key) {
                    break;
                }
                terminal.draw(|f| ui(app, f))?;
            }
            TermEvent::Mouse(mouse) => {
                if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                    app.click_at(mouse.column, mouse.row);
                    terminal.draw(|f| ui(app, f))?;
                }
            }
            TermEvent::Resize => {
                terminal.draw(|f| ui(app, f))?;
            }
            TermEvent::Tick => {
                // only the miss flash animates; skip idle redraws
                let before = app.session.game().map_or(false, |g| g.is_flashing());
                app.session.on_tick();
                let after = app.session.game().map_or(false, |g| g.is_flashing());
                if before || after {
                    terminal.draw(|f| ui(app, f))?;
                }
            }
        }
    }

    Ok(())
}

fn ui(app: &mut App, f: &mut Frame) {
    match app.state {
        AppState::Playing => ui::render_playing(app, f),
        AppState::DailySummary => ui::render_daily_summary(app, f),
        AppState::Exhausted => ui::render_exhausted(f),
    }
}

/// returns true when the app should quit
fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        // control chords never reach the grid
        match key.code {
            KeyCode::Char('c') => return true,
            KeyCode::Char('o') => app.open_article(),
            _ => {}
        }
        return false;
    }

    match app.state {
        AppState::Playing => {
            if let Some(game_key) = game_key_for(key.code) {
                app.session.handle_key(game_key);
                app.sync_state();
            }
        }
        AppState::DailySummary => match key.code {
            KeyCode::Char('t') => {
                if let Some(run) = app.session.daily_run() {
                    if Browser::is_available() {
                        webbrowser::open(&tweet_url(run)).unwrap_or_default();
                    }
                }
            }
            KeyCode::Esc | KeyCode::Char('q') => return true,
            _ => {}
        },
        AppState::Exhausted => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                return true;
            }
        }
    }

    false
}

fn game_key_for(code: KeyCode) -> Option<GameKey> {
    match code {
        KeyCode::Char(c) => Some(GameKey::Char(c)),
        KeyCode::Enter => Some(GameKey::Enter),
        KeyCode::Backspace => Some(GameKey::Backspace),
        KeyCode::Delete => Some(GameKey::Delete),
        KeyCode::Left => Some(GameKey::Left),
        KeyCode::Right => Some(GameKey::Right),
        KeyCode::Esc => Some(GameKey::Escape),
        _ => None,
    }
}
