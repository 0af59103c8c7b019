//! Flat-file score and variant storage for the leaderboard server.
//!
//! Each mode keeps its own JSON list, plus one map of username to chosen
//! skin. Files that are missing or unreadable are re-initialized empty, so a
//! first run (or a mangled file) never prevents the server from starting.

use crate::leaderboard::{self, LeaderboardEntry};
use crate::settings::GameMode;
use directories::ProjectDirs;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

const CLASSIC_FILE: &str = "leaderboard.json";
const SPEED_RUN_FILE: &str = "sr-leaderboard.json";
const VARIANTS_FILE: &str = "variants.json";

/// File-backed store with the in-memory working copy.
pub struct ScoreStore {
    data_dir: PathBuf,
    classic: Vec<LeaderboardEntry>,
    speed_run: Vec<LeaderboardEntry>,
    variants: HashMap<String, u32>,
}

impl ScoreStore {
    /// Opens the store under the platform data directory.
    pub fn open() -> io::Result<Self> {
        let project_dirs = ProjectDirs::from("", "", "quakks").ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "Could not determine data directory")
        })?;
        Self::open_at(project_dirs.data_dir().to_path_buf())
    }

    /// Opens the store under an explicit directory (tests, containers).
    pub fn open_at(data_dir: PathBuf) -> io::Result<Self> {
        fs::create_dir_all(&data_dir)?;
        let mut store = Self {
            data_dir,
            classic: Vec::new(),
            speed_run: Vec::new(),
            variants: HashMap::new(),
        };
        store.classic = store.load_list(CLASSIC_FILE)?;
        store.speed_run = store.load_list(SPEED_RUN_FILE)?;
        store.variants = store.load_variants()?;
        Ok(store)
    }

    /// Reads a leaderboard file; missing or corrupt content resets it to an
    /// empty list on disk.
    fn load_list(&self, file: &str) -> io::Result<Vec<LeaderboardEntry>> {
        let path = self.data_dir.join(file);
        match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => Ok(entries),
                Err(_) => {
                    eprintln!("Initializing {}", file);
                    fs::write(&path, "[]")?;
                    Ok(Vec::new())
                }
            },
            Err(_) => {
                eprintln!("Initializing {}", file);
                fs::write(&path, "[]")?;
                Ok(Vec::new())
            }
        }
    }

    fn load_variants(&self) -> io::Result<HashMap<String, u32>> {
        let path = self.data_dir.join(VARIANTS_FILE);
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(serde_json::from_str(&raw).unwrap_or_default()),
            Err(_) => Ok(HashMap::new()),
        }
    }

    fn entries(&self, mode: GameMode) -> &Vec<LeaderboardEntry> {
        match mode {
            GameMode::Classic => &self.classic,
            GameMode::SpeedRun => &self.speed_run,
        }
    }

    fn entries_mut(&mut self, mode: GameMode) -> &mut Vec<LeaderboardEntry> {
        match mode {
            GameMode::Classic => &mut self.classic,
            GameMode::SpeedRun => &mut self.speed_run,
        }
    }

    fn list_file(mode: GameMode) -> &'static str {
        match mode {
            GameMode::Classic => CLASSIC_FILE,
            GameMode::SpeedRun => SPEED_RUN_FILE,
        }
    }

    /// Upserts the best score for a username and persists the list.
    pub fn submit(&mut self, mode: GameMode, username: &str, score: u32) -> io::Result<()> {
        leaderboard::record_score(self.entries_mut(mode), username, score);
        self.save_list(mode)
    }

    /// The top `n` entries, highest score first.
    pub fn top(&self, mode: GameMode, n: usize) -> Vec<LeaderboardEntry> {
        leaderboard::top(self.entries(mode), n)
    }

    pub fn variant(&self, username: &str) -> Option<u32> {
        self.variants.get(username).copied()
    }

    pub fn set_variant(&mut self, username: &str, variant: u32) -> io::Result<()> {
        self.variants.insert(username.to_string(), variant);
        let json = serde_json::to_string_pretty(&self.variants)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(self.data_dir.join(VARIANTS_FILE), json)
    }

    fn save_list(&self, mode: GameMode) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self.entries(mode))
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(self.data_dir.join(Self::list_file(mode)), json)
    }
}
