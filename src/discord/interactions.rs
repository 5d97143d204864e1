//! Approve/deny button handling for absence requests.

use poise::serenity_prelude::{self as serenity, ComponentInteraction};

use crate::discord::{embeds, Data, Error};

const APPROVE_PREFIX: &str = "approve_absence_";
const DENY_PREFIX: &str = "deny_absence_";

pub async fn handle_component(
    ctx: &serenity::Context,
    interaction: &ComponentInteraction,
    data: &Data,
) -> Result<(), Error> {
    let custom_id = interaction.data.custom_id.as_str();
    if let Some(id) = custom_id.strip_prefix(APPROVE_PREFIX) {
        resolve(ctx, interaction, data, id, Resolution::Approve).await
    } else if let Some(id) = custom_id.strip_prefix(DENY_PREFIX) {
        resolve(ctx, interaction, data, id, Resolution::Deny).await
    } else {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resolution {
    Approve,
    Deny,
}

impl Resolution {
    fn verb(self) -> &'static str {
        match self {
            Self::Approve => "approved",
            Self::Deny => "denied",
        }
    }
}

async fn resolve(
    ctx: &serenity::Context,
    interaction: &ComponentInteraction,
    data: &Data,
    id: &str,
    resolution: Resolution,
) -> Result<(), Error> {
    let config = &data.config;

    let is_officer = interaction
        .member
        .as_ref()
        .is_some_and(|member| member.roles.contains(&config.discord.officer_role));
    if !is_officer {
        ephemeral_reply(
            ctx,
            interaction,
            &format!(
                "You do not have permission to {} absence requests.",
                match resolution {
                    Resolution::Approve => "approve",
                    Resolution::Deny => "deny",
                }
            ),
        )
        .await?;
        return Ok(());
    }

    let request = match resolution {
        Resolution::Approve => data.absences.approve(id).await,
        Resolution::Deny => data.absences.deny(id).await,
    };
    let Some(request) = request else {
        ephemeral_reply(
            ctx,
            interaction,
            "Absence request not found. It may have been already processed.",
        )
        .await?;
        return Ok(());
    };

    let officer = interaction.user.tag();
    tracing::info!(
        user = %request.username,
        id = %request.id,
        officer = %officer,
        "absence request {}",
        resolution.verb()
    );

    if resolution == Resolution::Approve {
        config
            .discord
            .absence_channel
            .send_message(
                &ctx.http,
                serenity::CreateMessage::new().embed(embeds::absence_approved(&request, &officer)),
            )
            .await?;
    }

    // Replace the prompt so the buttons cannot be pressed twice.
    interaction
        .create_response(
            &ctx.http,
            serenity::CreateInteractionResponse::UpdateMessage(
                serenity::CreateInteractionResponseMessage::new()
                    .content(format!(
                        "Absence request for **{}** has been {} by {}.",
                        request.username,
                        resolution.verb(),
                        officer
                    ))
                    .embeds(vec![])
                    .components(vec![]),
            ),
        )
        .await?;

    // Best-effort DM; members with closed DMs are only logged.
    let dm_text = format!(
        "Your absence request from {} to {} has been {}.",
        request.start_date,
        request.end_date,
        resolution.verb()
    );
    match request.user_id.create_dm_channel(&ctx.http).await {
        Ok(dm) => {
            if let Err(e) = dm.id.say(&ctx.http, dm_text).await {
                tracing::warn!(user = %request.username, "could not DM member: {}", e);
            }
        }
        Err(e) => tracing::warn!(user = %request.username, "could not open DM: {}", e),
    }

    config
        .discord
        .audit_channel
        .send_message(
            &ctx.http,
            serenity::CreateMessage::new().content(format!(
                "Absence request for **{}** ({} to {}) was {} by {}",
                request.username,
                request.start_date,
                request.end_date,
                resolution.verb(),
                officer
            )),
        )
        .await?;

    Ok(())
}

async fn ephemeral_reply(
    ctx: &serenity::Context,
    interaction: &ComponentInteraction,
    content: &str,
) -> Result<(), Error> {
    interaction
        .create_response(
            &ctx.http,
            serenity::CreateInteractionResponse::Message(
                serenity::CreateInteractionResponseMessage::new()
                    .content(content)
                    .ephemeral(true),
            ),
        )
        .await?;
    Ok(())
}
