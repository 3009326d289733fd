//! Score store backed by a hosted REST table
//!
//! The service speaks the PostgREST dialect: rows are read with
//! `GET /rest/v1/<table>?select=name,score&order=score.desc&limit=N` and
//! inserted with a `POST` of a one-element JSON array. The API key goes in
//! both the `apikey` and `Authorization` headers.

use std::time::Duration;

use log::debug;
use ureq::{Agent, AgentBuilder, Request};

use super::config::LeaderboardConfig;
use super::entry::HighScoreEntry;
use super::error::LeaderboardError;
use super::store::ScoreStore;

pub struct RestStore {
    table_url: String,
    api_key: Option<String>,
    agent: Agent,
}

impl RestStore {
    pub fn new(base_url: &str, table: &str, api_key: Option<String>, timeout: Duration) -> Self {
        let table_url = format!("{}/rest/v1/{}", base_url.trim_end_matches('/'), table);
        let agent = AgentBuilder::new().timeout(timeout).build();

        Self {
            table_url,
            api_key,
            agent,
        }
    }

    pub fn from_config(config: &LeaderboardConfig) -> Self {
        Self::new(
            config.url.as_deref().unwrap_or_default(),
            &config.table,
            config.api_key.clone(),
            Duration::from_millis(config.timeout_ms),
        )
    }

    pub fn table_url(&self) -> &str {
        &self.table_url
    }

    fn authorize(&self, request: Request) -> Request {
        match &self.api_key {
            Some(key) => request
                .set("apikey", key)
                .set("Authorization", &format!("Bearer {key}")),
            None => request,
        }
    }
}

impl ScoreStore for RestStore {
    fn fetch_top(&self, limit: usize) -> Result<Vec<HighScoreEntry>, LeaderboardError> {
        debug!("GET {} limit={}", self.table_url, limit);

        let request = self
            .agent
            .get(&self.table_url)
            .query("select", "name,score")
            .query("order", "score.desc")
            .query("limit", &limit.to_string());

        let response = self.authorize(request).call()?;
        response
            .into_json::<Vec<HighScoreEntry>>()
            .map_err(|err| LeaderboardError::Decode(err.to_string()))
    }

    fn insert(&self, entry: &HighScoreEntry) -> Result<(), LeaderboardError> {
        debug!("POST {} score={}", self.table_url, entry.score);

        let request = self
            .agent
            .post(&self.table_url)
            .set("Prefer", "return=minimal");

        self.authorize(request).send_json([entry])?;
        Ok(())
    }
}
