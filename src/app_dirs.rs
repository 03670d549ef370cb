use directories::ProjectDirs;
use std::path::PathBuf;

/// resolves where the game keeps its on-disk state
pub struct AppDirs;

impl AppDirs {
    fn state_file(name: &str) -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("erekh");
            Some(state_dir.join(name))
        } else {
            ProjectDirs::from("", "", "erekh")
                .map(|proj_dirs| proj_dirs.data_local_dir().join(name))
        }
    }

    /// append-only log of every answered question
    pub fn history_path() -> Option<PathBuf> {
        Self::state_file("history.csv")
    }
}
