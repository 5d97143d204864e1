//! Warcraft Logs v1 API client.
//!
//! Thin wrapper over the two endpoints the bot needs: ranked parses per
//! character and zone, and the character profile used as a class
//! fallback.

use serde::Deserialize;

use crate::config::Wcl as WclConfig;

const API_BASE: &str = "https://fresh.warcraftlogs.com/v1";

pub struct WclClient {
    config: WclConfig,
    http: reqwest::Client,
}

/// Metric the parses endpoint ranks by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Dps,
    Hps,
}

impl Metric {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dps => "dps",
            Self::Hps => "hps",
        }
    }
}

/// One ranked kill as returned by the parses endpoint. Fields we don't
/// use are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ParseEntry {
    #[serde(rename = "encounterID")]
    pub encounter_id: u32,
    #[serde(rename = "encounterName", default)]
    pub encounter_name: Option<String>,
    #[serde(rename = "characterName", default)]
    pub character_name: Option<String>,
    pub percentile: f64,
    #[serde(default)]
    pub class: Option<String>,
}

/// Character profile. Only the class matters here.
#[derive(Debug, Deserialize)]
pub struct CharacterDetails {
    #[serde(default)]
    pub class: Option<String>,
}

impl WclClient {
    pub fn new(config: WclConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Ranked parses for one character in one zone.
    pub async fn zone_parses(
        &self,
        character: &str,
        zone_id: u32,
        metric: Metric,
    ) -> anyhow::Result<Vec<ParseEntry>> {
        let url = format!(
            "{}/parses/character/{}/{}/{}",
            API_BASE, character, self.config.server, self.config.region
        );
        let response = self
            .http
            .get(&url)
            .query(&[
                ("zone", zone_id.to_string()),
                ("metric", metric.as_str().to_string()),
                ("includeCombatantInfo", "false".to_string()),
                ("api_key", self.config.api_key.clone()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("WCL parses request for zone {} failed: {} - {}", zone_id, status, body);
        }

        Ok(response.json().await?)
    }

    /// Character profile lookup, used when no parse carried a class.
    pub async fn character_details(&self, character: &str) -> anyhow::Result<CharacterDetails> {
        let url = format!(
            "{}/character/{}/{}/{}",
            API_BASE, character, self.config.server, self.config.region
        );
        let response = self
            .http
            .get(&url)
            .query(&[("api_key", self.config.api_key.clone())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("WCL character request failed: {} - {}", status, body);
        }

        Ok(response.json().await?)
    }
}
