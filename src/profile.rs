//! Local player profile (identity + chosen skin), persisted as JSON.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;

/// Client-side persisted state: who the player is and which skin they last
/// chose. Survives across sessions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    /// Chat handle, without the leading '@'.
    pub handle: Option<String>,
    /// Display name used when no handle exists.
    pub display_name: Option<String>,
    /// Numeric chat identity, part of the fallback username.
    #[serde(default)]
    pub player_id: i64,
    /// Last chosen cosmetic variant.
    pub variant: Option<u32>,
    /// Unix timestamp of the last save.
    #[serde(default)]
    pub saved_at: i64,
}

impl Profile {
    /// Display username: prefer the handle, else compose name and id.
    pub fn username(&self) -> String {
        display_username(
            self.handle.as_deref(),
            self.display_name.as_deref(),
            self.player_id,
        )
    }
}

/// Builds the submission username exactly as the chat mini-app does:
/// `@handle` when a handle exists, otherwise `{name|"user"}_{id}`.
pub fn display_username(handle: Option<&str>, display_name: Option<&str>, id: i64) -> String {
    match handle {
        Some(h) if !h.is_empty() => format!("@{}", h),
        _ => format!("{}_{}", display_name.unwrap_or("user"), id),
    }
}

/// The profile save file path (~/.quakks/profile.json).
pub fn profile_path() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    Ok(home_dir.join(".quakks").join("profile.json"))
}

/// Load the profile from disk, or return default if missing or unreadable.
pub fn load_profile() -> Profile {
    let path = match profile_path() {
        Ok(p) => p,
        Err(_) => return Profile::default(),
    };

    match fs::read_to_string(&path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_default(),
        Err(_) => Profile::default(),
    }
}

/// Save the profile to disk, stamping the save time.
pub fn save_profile(profile: &mut Profile) -> io::Result<()> {
    let path = profile_path()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    profile.saved_at = Utc::now().timestamp();
    let json = serde_json::to_string_pretty(profile)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    fs::write(path, json)?;
    Ok(())
}
