//! `config.toml` structures.

use poise::serenity_prelude::{ChannelId, RoleId};
use serde::Deserialize;

use crate::classes::RoleCategory;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub discord: Discord,
    pub wcl: Wcl,
    pub thresholds: Thresholds,
}

#[derive(Debug, Deserialize)]
pub struct Discord {
    pub token: String,
    /// Receives verification audit embeds and error reports.
    pub audit_channel: ChannelId,
    /// Where people are sent for manual screenshot verification.
    pub alternative_verification_channel: ChannelId,
    /// Approved absences are announced here.
    pub absence_channel: ChannelId,
    /// Pending absence requests with their approve/deny buttons.
    pub pending_absence_channel: ChannelId,
    pub verified_role: RoleId,
    pub officer_role: RoleId,
    pub member_role: RoleId,
}

/// Warcraft Logs credentials and the realm every lookup is scoped to.
#[derive(Debug, Clone, Deserialize)]
pub struct Wcl {
    pub api_key: String,
    pub server: String,
    pub region: String,
}

/// Minimum acceptable average percentile per role category.
#[derive(Debug, Deserialize)]
pub struct Thresholds {
    pub dps: f64,
    pub healer: f64,
    pub tank: f64,
}

impl Thresholds {
    pub fn for_role(&self, role: RoleCategory) -> f64 {
        match role {
            RoleCategory::Dps => self.dps,
            RoleCategory::Healer => self.healer,
            RoleCategory::Tank => self.tank,
        }
    }
}
