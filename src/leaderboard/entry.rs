use serde::{Deserialize, Serialize};

/// Number of scores the board keeps
pub const DEFAULT_LIMIT: usize = 10;

/// Longest player name accepted, in characters
pub const MAX_NAME_LEN: usize = 24;

/// One row of the leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u32,
}

impl HighScoreEntry {
    pub fn new(name: impl Into<String>, score: u32) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// Whether `candidate` earns a place on a board holding `cached_top`
///
/// A board with free slots takes any score. A full board only takes a score
/// strictly above its lowest entry.
pub fn is_qualifying(candidate: u32, cached_top: &[HighScoreEntry], limit: usize) -> bool {
    if cached_top.len() < limit {
        return true;
    }

    cached_top
        .iter()
        .map(|entry| entry.score)
        .min()
        .is_some_and(|lowest| candidate > lowest)
}

/// Trim a player name and cap its length; `None` if nothing is left
pub fn sanitize_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    Some(trimmed.chars().take(MAX_NAME_LEN).collect::<String>().trim_end().to_string())
}

/// Sort descending by score and keep the top `limit`
///
/// The sort is stable so equal scores keep the order the store returned.
pub fn rank(mut entries: Vec<HighScoreEntry>, limit: usize) -> Vec<HighScoreEntry> {
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries.truncate(limit);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(scores: &[u32]) -> Vec<HighScoreEntry> {
        scores
            .iter()
            .enumerate()
            .map(|(i, &score)| HighScoreEntry::new(format!("p{i}"), score))
            .collect()
    }

    #[test]
    fn test_board_with_room_always_qualifies() {
        let cached = board(&[90, 80, 70, 60, 50, 40, 30, 20, 10]);
        assert!(is_qualifying(0, &cached, DEFAULT_LIMIT));
        assert!(is_qualifying(1000, &cached, DEFAULT_LIMIT));
        assert!(is_qualifying(0, &[], DEFAULT_LIMIT));
    }

    #[test]
    fn test_full_board_needs_strictly_higher_score() {
        let cached = board(&[50, 45, 40, 30, 25, 20, 15, 10, 8, 5]);
        assert!(is_qualifying(6, &cached, DEFAULT_LIMIT));
        assert!(!is_qualifying(5, &cached, DEFAULT_LIMIT));
        assert!(!is_qualifying(0, &cached, DEFAULT_LIMIT));
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("  ada  "), Some("ada".to_string()));
        assert_eq!(sanitize_name("   "), None);
        assert_eq!(sanitize_name(""), None);

        let long = "x".repeat(40);
        assert_eq!(sanitize_name(&long).unwrap().chars().count(), MAX_NAME_LEN);
    }

    #[test]
    fn test_rank_orders_and_truncates() {
        let ranked = rank(board(&[3, 9, 1, 9, 5]), 3);
        let scores: Vec<u32> = ranked.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![9, 9, 5]);
        // Ties keep their original order
        assert_eq!(ranked[0].name, "p1");
        assert_eq!(ranked[1].name, "p3");
    }
}
