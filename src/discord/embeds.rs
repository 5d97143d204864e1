//! Embed construction for every bot reply.

use poise::serenity_prelude::{
    self as serenity, CreateEmbed, CreateEmbedFooter, Mentionable, Timestamp,
};

use crate::absence::AbsenceRequest;
use crate::classes::{self, RoleCategory};
use crate::verify::Verification;

const RED: u32 = 0xFF0000;
const ORANGE: u32 = 0xFFA500;
const SALMON: u32 = 0xFF6B6B;
const YELLOW: u32 = 0xFFCC00;
const BLUE: u32 = 0x3498DB;
const GREEN: u32 = 0x00CC00;

pub fn invalid_role() -> CreateEmbed {
    CreateEmbed::new()
        .colour(RED)
        .title("❌ Invalid Role Specified")
        .description("Please use one of the valid role options:")
        .field("⚔️ DPS Classes", "`dps` or `dd`", true)
        .field("💚 Healing Classes", "`hps` or `healer`", true)
        .field("🛡️ Tanks", "`tank`", true)
        .footer(CreateEmbedFooter::new("Use /verify again with a valid role"))
        .timestamp(Timestamp::now())
}

pub fn role_mismatch(class: &str, role: RoleCategory) -> CreateEmbed {
    CreateEmbed::new()
        .colour(RED)
        .title("❌ Invalid Role for Class")
        .description(format!(
            "**{}s** cannot be verified as **{}**",
            class,
            role.label().to_uppercase()
        ))
        .field("Your Class", class, true)
        .field("Selected Role", role.label().to_uppercase(), true)
        .field("Valid Roles", classes::valid_roles_label(class), false)
        .footer(CreateEmbedFooter::new("Please select a valid role for your class"))
        .timestamp(Timestamp::now())
}

pub fn logs_unavailable(alternative: serenity::ChannelId) -> CreateEmbed {
    CreateEmbed::new()
        .colour(ORANGE)
        .title("⚠️ Warcraft Logs Unavailable")
        .description("It appears that Warcraft Logs is not available at the moment.")
        .field(
            "Alternative Verification",
            format!(
                "Please post a screenshot of your character in {} for manual verification.",
                alternative.mention()
            ),
            false,
        )
        .timestamp(Timestamp::now())
}

pub fn no_logs(character: &str, alternative: serenity::ChannelId) -> CreateEmbed {
    CreateEmbed::new()
        .colour(SALMON)
        .title("📋 No Logs Found")
        .description(format!("No logs found for character **\"{}\"**", character))
        .field(
            "Alternative Options",
            format!(
                "• Post a screenshot in {}\n• Contact an officer for assistance",
                alternative.mention()
            ),
            false,
        )
        .field(
            "Common Issues",
            "• Character name spelling\n• No recent raid logs",
            false,
        )
        .timestamp(Timestamp::now())
}

pub fn verified_audit(user: &str, character: &str, verification: &Verification) -> CreateEmbed {
    let class = verification.aggregation.class.as_deref();
    CreateEmbed::new()
        .colour(classes::class_colour(class))
        .title("✅ New Member Verified")
        .field("Discord User", user, true)
        .field("Character Name", character, true)
        .field("Class", class.unwrap_or("Unknown"), true)
        .field(
            "Role",
            format!(
                "{} {}",
                verification.role.emoji(),
                verification.role.label().to_uppercase()
            ),
            true,
        )
        .field(
            "Average Parse",
            format!("{:.1}%", verification.aggregation.average_percentile),
            true,
        )
        .field(
            "Parse Quality",
            classes::parse_quality(verification.aggregation.average_percentile),
            true,
        )
        .timestamp(Timestamp::now())
}

pub fn debug_report(character: &str, verification: &Verification) -> CreateEmbed {
    let aggregation = &verification.aggregation;

    let zones_checked = aggregation
        .zone_counts
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ");

    let mut zone_breakdown = String::new();
    for (name, count) in &aggregation.zone_counts {
        zone_breakdown.push_str(&format!("**{}**: {} logs\n", name, count));
    }

    let mut parse_details = String::new();
    for entry in &aggregation.encounters {
        parse_details.push_str(&format!(
            "{}: {:.1}%\n",
            entry.encounter_name.as_deref().unwrap_or("Unknown encounter"),
            entry.percentile
        ));
    }

    let verdict = if verification.passed {
        format!("PASS (≥{}%)", verification.threshold)
    } else {
        format!("FAIL (<{}%)", verification.threshold)
    };

    let mut embed = CreateEmbed::new()
        .colour(classes::class_colour(aggregation.class.as_deref()))
        .title(format!("Debug Info: {}", character))
        .description("Detailed verification data for officer review")
        .field("Character Name", character, true)
        .field("Class", aggregation.class.as_deref().unwrap_or("Unknown"), true)
        .field(
            "Role Checked",
            format!(
                "{} {}",
                verification.role.emoji(),
                verification.role.label().to_uppercase()
            ),
            true,
        )
        .field("Zones Checked", zones_checked, false)
        .field(
            "Zone Breakdown",
            if zone_breakdown.is_empty() {
                "No data".to_string()
            } else {
                zone_breakdown
            },
            false,
        )
        .field("Total Encounters", aggregation.encounter_count.to_string(), true)
        .field(
            "Average Parse",
            format!("{:.1}%", aggregation.average_percentile),
            true,
        )
        .field(
            "Parse Quality",
            classes::parse_quality(aggregation.average_percentile),
            true,
        );

    if !parse_details.is_empty() {
        embed = embed.field("Individual Parses", clamp_field(parse_details, 1024), false);
    }

    embed
        .field("Verification Status", verdict, false)
        .timestamp(Timestamp::now())
}

pub fn absence_pending(request: &AbsenceRequest) -> CreateEmbed {
    CreateEmbed::new()
        .colour(YELLOW)
        .title("📋 Absence Request")
        .description("A new absence request requires approval.")
        .field("👤 User", request.username.as_str(), false)
        .field("🎮 Character", request.character_name.as_str(), false)
        .field(
            "📅 Period",
            format!("**From:** {}\n**To:** {}", request.start_date, request.end_date),
            false,
        )
        .field("📝 Reason", request.reason.as_str(), false)
        .footer(CreateEmbedFooter::new(format!("Request ID: {}", request.id)))
        .timestamp(Timestamp::now())
}

pub fn absence_confirm(request: &AbsenceRequest) -> CreateEmbed {
    CreateEmbed::new()
        .colour(BLUE)
        .title("📋 Absence Request Submitted")
        .description("Your request has been submitted and is pending officer approval.")
        .field("🎮 Character", request.character_name.as_str(), false)
        .field(
            "📅 Period",
            format!("**From:** {}\n**To:** {}", request.start_date, request.end_date),
            false,
        )
        .field("📝 Reason", request.reason.as_str(), false)
        .footer(CreateEmbedFooter::new(
            "You will be notified when your request is reviewed",
        ))
        .timestamp(Timestamp::now())
}

pub fn absence_approved(request: &AbsenceRequest, approver: &str) -> CreateEmbed {
    CreateEmbed::new()
        .colour(GREEN)
        .title("✅ Absence Approved")
        .field("👤 User", request.username.as_str(), false)
        .field("🎮 Character", request.character_name.as_str(), false)
        .field(
            "📅 Period",
            format!("**From:** {}\n**To:** {}", request.start_date, request.end_date),
            false,
        )
        .field("📝 Reason", request.reason.as_str(), false)
        .field("✅ Approved By", approver, false)
        .timestamp(Timestamp::now())
}

pub fn error_report(
    error: &anyhow::Error,
    command: &str,
    user: &str,
    details: Option<&str>,
) -> CreateEmbed {
    let chain = clamp_field(format!("{:?}", error), 1000);
    let mut embed = CreateEmbed::new()
        .colour(RED)
        .title("⚠️ Error Occurred")
        .description(format!("```{}```", chain))
        .field("Command", command, true)
        .field("User", user, true);
    if let Some(details) = details {
        embed = embed.field("Details", details, false);
    }
    embed.timestamp(Timestamp::now())
}

/// Embed field values cap at 1024 characters; cut on a char boundary.
fn clamp_field(mut value: String, max: usize) -> String {
    if value.len() > max {
        let mut end = max.saturating_sub(3);
        while !value.is_char_boundary(end) {
            end -= 1;
        }
        value.truncate(end);
        value.push_str("...");
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_respects_char_boundaries() {
        let long = "é".repeat(600);
        let clamped = clamp_field(long, 1024);
        assert!(clamped.len() <= 1024);
        assert!(clamped.ends_with("..."));

        let short = clamp_field("fine".to_string(), 1024);
        assert_eq!(short, "fine");
    }
}
