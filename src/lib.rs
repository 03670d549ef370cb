// Library surface for the headless integration tests.
// Bin-only types (App, Cli, the ui modules) stay in main.rs.
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
