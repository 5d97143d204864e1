//! Verification decision logic.
//!
//! Pure of Discord side effects: both `/verify` and `/debug` run the
//! same pipeline here, only `/verify` grants a role with the result.

use thiserror::Error;

use crate::classes::{self, RoleCategory};
use crate::config::Thresholds;
use crate::wcl::{Aggregation, Metric, WclClient};

#[derive(Debug, Error)]
pub enum VerifyError {
    /// Free-text role input we don't recognize.
    #[error("unrecognized role input {0:?}")]
    InvalidRole(String),
    /// The detected class cannot raid as the requested role.
    #[error("{class} cannot be verified as {role}")]
    RoleMismatch { class: String, role: RoleCategory },
    /// Every zone came back empty without a hard failure.
    #[error("no parse data available")]
    LogsUnavailable,
    /// Every zone query failed outright. Carries the last zone error.
    #[error("no logs found")]
    NoLogsFound(anyhow::Error),
}

/// Outcome of a completed verification run.
#[derive(Debug)]
pub struct Verification {
    pub role: RoleCategory,
    pub threshold: f64,
    pub passed: bool,
    pub aggregation: Aggregation,
}

pub fn parse_role(input: &str) -> Result<RoleCategory, VerifyError> {
    RoleCategory::parse(input).ok_or_else(|| VerifyError::InvalidRole(input.to_string()))
}

/// Metric used when querying parses. Tanks are ranked on damage output;
/// the API has no tank-specific percentile.
pub fn metric_for(role: RoleCategory) -> Metric {
    match role {
        RoleCategory::Healer => Metric::Hps,
        RoleCategory::Dps | RoleCategory::Tank => Metric::Dps,
    }
}

/// An average of zero never passes, even against a zero threshold:
/// absence of data is not a pass.
pub fn meets_threshold(average: f64, threshold: f64) -> bool {
    average > 0.0 && average >= threshold
}

/// Aggregates the character's parses, checks the class/role pairing and
/// compares the average against the configured threshold.
pub async fn run(
    client: &WclClient,
    character: &str,
    role: RoleCategory,
    thresholds: &Thresholds,
) -> Result<Verification, VerifyError> {
    let aggregation = client
        .aggregate(character, metric_for(role))
        .await
        .map_err(VerifyError::NoLogsFound)?;

    if aggregation.encounter_count == 0 {
        return Err(VerifyError::LogsUnavailable);
    }

    if let Some(class) = aggregation.class.as_deref() {
        if !classes::class_allows(class, role) {
            return Err(VerifyError::RoleMismatch {
                class: class.to_string(),
                role,
            });
        }
    }

    let threshold = thresholds.for_role(role);
    let passed = meets_threshold(aggregation.average_percentile, threshold);
    Ok(Verification {
        role,
        threshold,
        passed,
        aggregation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_average_never_passes() {
        assert!(!meets_threshold(0.0, 0.0));
        assert!(!meets_threshold(0.0, 50.0));
    }

    #[test]
    fn threshold_comparison_is_inclusive() {
        assert!(meets_threshold(72.0, 70.0));
        assert!(meets_threshold(70.0, 70.0));
        assert!(!meets_threshold(69.9, 70.0));
        assert!(meets_threshold(0.1, 0.0));
    }

    #[test]
    fn tank_is_ranked_on_damage() {
        assert_eq!(metric_for(RoleCategory::Tank), Metric::Dps);
        assert_eq!(metric_for(RoleCategory::Dps), Metric::Dps);
        assert_eq!(metric_for(RoleCategory::Healer), Metric::Hps);
    }

    #[test]
    fn unrecognized_role_input_is_rejected() {
        assert!(matches!(parse_role("melee"), Err(VerifyError::InvalidRole(_))));
        assert!(parse_role("Tank").is_ok());
    }
}
