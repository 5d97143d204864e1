//! Slash commands.

use poise::serenity_prelude::{self as serenity, Mentionable};

use crate::absence::NewAbsence;
use crate::discord::{embeds, Context, Error};
use crate::verify::{self, VerifyError};
use crate::wcl::RAID_ZONES;

/// Verify your character's parses and receive the raider role.
#[poise::command(slash_command)]
pub async fn verify(
    ctx: Context<'_>,
    #[description = "Character you want to verify"] name: String,
    #[description = "Role you want to have checked (dps, healer or tank)"] role: String,
) -> Result<(), Error> {
    ctx.defer().await?;

    let config = &ctx.data().config;
    let http = &ctx.serenity_context().http;

    let category = match verify::parse_role(&role) {
        Ok(category) => category,
        Err(_) => {
            ctx.send(poise::CreateReply::default().embed(embeds::invalid_role()))
                .await?;
            return Ok(());
        }
    };

    tracing::info!(character = %name, role = %category, user = %ctx.author().tag(), "verification requested");

    let verification = match verify::run(&ctx.data().wcl, &name, category, &config.thresholds).await
    {
        Ok(verification) => verification,
        Err(VerifyError::RoleMismatch { class, role }) => {
            ctx.send(poise::CreateReply::default().embed(embeds::role_mismatch(&class, role)))
                .await?;
            return Ok(());
        }
        Err(VerifyError::LogsUnavailable) => {
            ctx.send(poise::CreateReply::default().embed(embeds::logs_unavailable(
                config.discord.alternative_verification_channel,
            )))
            .await?;
            return Ok(());
        }
        Err(VerifyError::NoLogsFound(source)) => {
            tracing::error!(character = %name, "aggregation failed: {:#}", source);
            let report = embeds::error_report(&source, "/verify", &ctx.author().tag(), Some(&name));
            let _ = config
                .discord
                .audit_channel
                .send_message(http, serenity::CreateMessage::new().embed(report))
                .await;
            ctx.send(poise::CreateReply::default().embed(embeds::no_logs(
                &name,
                config.discord.alternative_verification_channel,
            )))
            .await?;
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if !verification.passed {
        tracing::info!(
            character = %name,
            average = verification.aggregation.average_percentile,
            threshold = verification.threshold,
            "verification below threshold"
        );
        ctx.say("Your performance does not meet our requirements. If you believe this is a mistake, you can contact an administrator.")
            .await?;
        return Ok(());
    }

    let guild_id = ctx
        .guild_id()
        .ok_or_else(|| anyhow::anyhow!("/verify used outside a guild"))?;
    http.add_member_role(
        guild_id,
        ctx.author().id,
        config.discord.verified_role,
        Some("parse verification passed"),
    )
    .await?;

    tracing::info!(
        user = %ctx.author().tag(),
        character = %name,
        average = verification.aggregation.average_percentile,
        "member verified"
    );

    let audit = embeds::verified_audit(&ctx.author().tag(), &name, &verification);
    config
        .discord
        .audit_channel
        .send_message(http, serenity::CreateMessage::new().embed(audit))
        .await?;

    ctx.say("Successfully verified, enjoy your stay").await?;
    Ok(())
}

/// Report a period of absence from raids.
#[poise::command(slash_command)]
pub async fn absence(
    ctx: Context<'_>,
    #[description = "Start date of absence (e.g. \"Apr 25\")"] start: String,
    #[description = "End date of absence (e.g. \"Apr 30\")"] end: String,
    #[description = "Your character name used in raids"] character: String,
    #[description = "Reason for absence"] reason: Option<String>,
) -> Result<(), Error> {
    ctx.defer().await?;

    let config = &ctx.data().config;
    let http = &ctx.serenity_context().http;

    if !member_has_role(&ctx, config.discord.member_role).await {
        ctx.say("Only guild members can use this command.").await?;
        return Ok(());
    }

    let request = ctx
        .data()
        .absences
        .submit(NewAbsence {
            user_id: ctx.author().id,
            username: ctx.author().tag(),
            character_name: character,
            start_date: start,
            end_date: end,
            reason,
        })
        .await;

    tracing::info!(user = %request.username, id = %request.id, "absence request submitted");

    let buttons = serenity::CreateActionRow::Buttons(vec![
        serenity::CreateButton::new(format!("approve_absence_{}", request.id))
            .label("Approve")
            .style(serenity::ButtonStyle::Success),
        serenity::CreateButton::new(format!("deny_absence_{}", request.id))
            .label("Deny")
            .style(serenity::ButtonStyle::Danger),
    ]);

    config
        .discord
        .pending_absence_channel
        .send_message(
            http,
            serenity::CreateMessage::new()
                .content(format!(
                    "{} New absence request requires approval:",
                    config.discord.officer_role.mention()
                ))
                .embed(embeds::absence_pending(&request))
                .components(vec![buttons]),
        )
        .await?;

    ctx.send(poise::CreateReply::default().embed(embeds::absence_confirm(&request)))
        .await?;
    Ok(())
}

/// Check a character's parses without assigning any role.
#[poise::command(slash_command)]
pub async fn debug(
    ctx: Context<'_>,
    #[description = "Character name to check"] name: String,
    #[description = "Role to check (dps, healer, tank)"] role: String,
) -> Result<(), Error> {
    ctx.defer_ephemeral().await?;

    let config = &ctx.data().config;

    if !member_has_role(&ctx, config.discord.officer_role).await {
        ctx.say("This command is restricted to officers only.").await?;
        return Ok(());
    }

    let category = match verify::parse_role(&role) {
        Ok(category) => category,
        Err(_) => {
            ctx.say("Invalid role specified. Use: dps, healer, or tank").await?;
            return Ok(());
        }
    };

    tracing::info!(character = %name, role = %category, officer = %ctx.author().tag(), "debug check requested");

    match verify::run(&ctx.data().wcl, &name, category, &config.thresholds).await {
        Ok(verification) => {
            ctx.send(poise::CreateReply::default().embed(embeds::debug_report(&name, &verification)))
                .await?;
        }
        Err(VerifyError::RoleMismatch { class, role }) => {
            ctx.send(poise::CreateReply::default().embed(embeds::role_mismatch(&class, role)))
                .await?;
        }
        Err(VerifyError::LogsUnavailable) | Err(VerifyError::NoLogsFound(_)) => {
            let zones = RAID_ZONES
                .iter()
                .map(|zone| zone.name)
                .collect::<Vec<_>>()
                .join(", ");
            ctx.say(format!(
                "No logs found for character **{}**.\n\nZones checked: {}",
                name, zones
            ))
            .await?;
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

async fn member_has_role(ctx: &Context<'_>, role: serenity::RoleId) -> bool {
    match ctx.author_member().await {
        Some(member) => member.roles.contains(&role),
        None => false,
    }
}
