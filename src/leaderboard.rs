//! Leaderboard entries and the ordering rules shared by client and server.

use serde::{Deserialize, Serialize};

/// One row of a mode's leaderboard. At most one entry per username; the store
/// keeps the best score seen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub username: String,
    pub score: u32,
}

/// Upserts a score, keeping the max per username, then re-sorts descending.
///
/// The sort is stable, so equal scores keep their original order across any
/// number of submissions.
pub fn record_score(entries: &mut Vec<LeaderboardEntry>, username: &str, score: u32) {
    match entries.iter_mut().find(|e| e.username == username) {
        Some(existing) => {
            if score > existing.score {
                existing.score = score;
            }
        }
        None => entries.push(LeaderboardEntry {
            username: username.to_string(),
            score,
        }),
    }
    entries.sort_by(|a, b| b.score.cmp(&a.score));
}

/// The first `n` entries of an already-ordered list.
pub fn top(entries: &[LeaderboardEntry], n: usize) -> Vec<LeaderboardEntry> {
    entries.iter().take(n).cloned().collect()
}
