//! Print the leaderboard and exit

use anyhow::Result;

use crate::leaderboard::{HighScoreEntry, LeaderboardClient};

pub struct ScoresMode {
    leaderboard: LeaderboardClient,
    source: String,
}

impl ScoresMode {
    pub fn new(leaderboard: LeaderboardClient, source: impl Into<String>) -> Self {
        Self {
            leaderboard,
            source: source.into(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let scores = self.leaderboard.fetch_top_scores().await;
        println!("{}", format_table(scores, &self.source));
        Ok(())
    }
}

/// Ranked table of `scores`, headed by where they came from
pub fn format_table(scores: &[HighScoreEntry], source: &str) -> String {
    let mut out = format!("High Scores ({source})\n{}\n", "=".repeat(32));

    if scores.is_empty() {
        out.push_str("No high scores yet!");
        return out;
    }

    let lines: Vec<String> = scores
        .iter()
        .enumerate()
        .map(|(index, entry)| format!("{:>2}. {:<24} {:>4}", index + 1, entry.name, entry.score))
        .collect();
    out.push_str(&lines.join("\n"));
    out
}
