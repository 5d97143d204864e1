//! Static class and role tables.
//!
//! One canonical table maps each class to the role categories it can
//! legitimately raid as; display colours, emoji and quality tiers are
//! layered on top as presentation helpers.

use lazy_static::lazy_static;
use std::collections::HashMap;
use std::fmt;

/// Broad role category a raider can be verified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleCategory {
    Dps,
    Healer,
    Tank,
}

impl RoleCategory {
    /// Normalizes free-text role input. Case-insensitive, accepts the
    /// synonyms people actually type into the command.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "dps" | "dd" | "damage dealer" | "damagedealer" | "damage dealer/dps" => Some(Self::Dps),
            "hps" | "healer" | "healing" | "heal" | "healer/hps" => Some(Self::Healer),
            "tank" => Some(Self::Tank),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Dps => "DPS",
            Self::Healer => "Healer",
            Self::Tank => "Tank",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Self::Dps => "⚔️",
            Self::Healer => "💚",
            Self::Tank => "🛡️",
        }
    }
}

impl fmt::Display for RoleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

lazy_static! {
    /// Class -> role categories that class can raid as. A class missing
    /// from this table has no valid roles and fails every mismatch check.
    static ref CLASS_ROLES: HashMap<&'static str, Vec<RoleCategory>> = {
        use RoleCategory::*;

        let mut m = HashMap::new();
        m.insert("Warrior", vec![Tank, Dps]);
        m.insert("Paladin", vec![Tank, Healer, Dps]);
        m.insert("Hunter", vec![Dps]);
        m.insert("Rogue", vec![Dps]);
        m.insert("Priest", vec![Healer, Dps]);
        m.insert("Shaman", vec![Healer, Dps]);
        m.insert("Mage", vec![Dps]);
        m.insert("Warlock", vec![Dps]);
        m.insert("Druid", vec![Tank, Healer, Dps]);
        m
    };
}

/// Valid role categories for a class, in table order.
pub fn valid_roles(class: &str) -> Option<&'static [RoleCategory]> {
    CLASS_ROLES.get(class).map(|roles| roles.as_slice())
}

/// Whether the class can be verified as the given role. Unknown classes
/// are never allowed.
pub fn class_allows(class: &str, role: RoleCategory) -> bool {
    valid_roles(class).is_some_and(|roles| roles.contains(&role))
}

/// Human-readable list of a class's valid roles, e.g. "🛡️ Tank, ⚔️ DPS".
pub fn valid_roles_label(class: &str) -> String {
    match valid_roles(class) {
        Some(roles) => roles
            .iter()
            .map(|role| format!("{} {}", role.emoji(), role.label()))
            .collect::<Vec<_>>()
            .join(", "),
        None => "Unknown".to_string(),
    }
}

/// Class display colour, armory palette. Grey when the class is unknown.
pub fn class_colour(class: Option<&str>) -> u32 {
    match class {
        Some("Warrior") => 0xC79C6E,
        Some("Paladin") => 0xF58CBA,
        Some("Hunter") => 0xABD473,
        Some("Rogue") => 0xFFF569,
        Some("Priest") => 0xFFFFFF,
        Some("Shaman") => 0x0070DE,
        Some("Mage") => 0x40C7EB,
        Some("Warlock") => 0x8787ED,
        Some("Druid") => 0xFF7D0A,
        _ => 0x808080,
    }
}

/// Qualitative tier for an average percentile, same bands the logs site
/// uses for parse colours.
pub fn parse_quality(percentile: f64) -> &'static str {
    if percentile >= 95.0 {
        "🟠 Legendary"
    } else if percentile >= 75.0 {
        "🟣 Epic"
    } else if percentile >= 50.0 {
        "🔵 Rare"
    } else if percentile >= 25.0 {
        "🟢 Uncommon"
    } else {
        "⚪ Common"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parsing_is_case_insensitive_and_synonym_complete() {
        for input in ["DD", "Damage Dealer", "dps", "damagedealer", "Damage Dealer/DPS"] {
            assert_eq!(RoleCategory::parse(input), Some(RoleCategory::Dps), "{input:?}");
        }
        for input in ["HPS", "healer", "Healing", "heal", "Healer/hps"] {
            assert_eq!(RoleCategory::parse(input), Some(RoleCategory::Healer), "{input:?}");
        }
        assert_eq!(RoleCategory::parse(" Tank "), Some(RoleCategory::Tank));
        assert_eq!(RoleCategory::parse("melee"), None);
        assert_eq!(RoleCategory::parse(""), None);
    }

    #[test]
    fn hunter_cannot_heal() {
        assert!(!class_allows("Hunter", RoleCategory::Healer));
        assert!(class_allows("Hunter", RoleCategory::Dps));
        assert!(class_allows("Paladin", RoleCategory::Healer));
        assert!(class_allows("Druid", RoleCategory::Tank));
    }

    #[test]
    fn unknown_class_has_no_valid_roles() {
        assert!(valid_roles("Death Knight").is_none());
        assert!(!class_allows("Death Knight", RoleCategory::Dps));
        assert_eq!(valid_roles_label("Death Knight"), "Unknown");
    }

    #[test]
    fn quality_bands() {
        assert_eq!(parse_quality(100.0), "🟠 Legendary");
        assert_eq!(parse_quality(95.0), "🟠 Legendary");
        assert_eq!(parse_quality(94.9), "🟣 Epic");
        assert_eq!(parse_quality(75.0), "🟣 Epic");
        assert_eq!(parse_quality(50.0), "🔵 Rare");
        assert_eq!(parse_quality(25.0), "🟢 Uncommon");
        assert_eq!(parse_quality(0.0), "⚪ Common");
    }
}
