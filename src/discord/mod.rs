//! Discord frontend: framework setup, shared state, event dispatch.

mod commands;
mod embeds;
mod interactions;

use std::sync::Arc;

use anyhow::Context as _;
use poise::serenity_prelude as serenity;

use crate::absence::AbsenceStore;
use crate::config::Config;
use crate::wcl::WclClient;

pub type Error = anyhow::Error;
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// State shared by every command and component handler.
pub struct Data {
    pub config: Arc<Config>,
    pub wcl: WclClient,
    pub absences: AbsenceStore,
}

/// Builds the framework, registers the slash commands and runs the
/// gateway connection until it stops.
pub async fn start(config: Arc<Config>) -> anyhow::Result<()> {
    let intents = serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::DIRECT_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    let setup_config = Arc::clone(&config);
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![commands::verify(), commands::absence(), commands::debug()],
            on_error: |error| Box::pin(on_error(error)),
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                tracing::info!(user = %ready.user.name, "bot is ready and commands registered");
                Ok(Data {
                    wcl: WclClient::new(setup_config.wcl.clone()),
                    absences: AbsenceStore::new(),
                    config: setup_config,
                })
            })
        })
        .build();

    let mut client = serenity::ClientBuilder::new(&config.discord.token, intents)
        .framework(framework)
        .await
        .context("could not build discord client")?;

    client.start().await.context("discord client stopped")?;
    Ok(())
}

async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    if let serenity::FullEvent::InteractionCreate {
        interaction: serenity::Interaction::Component(component),
    } = event
    {
        if let Err(e) = interactions::handle_component(ctx, component, data).await {
            tracing::error!(custom_id = %component.data.custom_id, "component handler failed: {:#}", e);
            let report = embeds::error_report(
                &e,
                "absence button",
                &component.user.tag(),
                Some(&component.data.custom_id),
            );
            let _ = data
                .config
                .discord
                .audit_channel
                .send_message(&ctx.http, serenity::CreateMessage::new().embed(report))
                .await;
            let _ = component
                .create_followup(
                    &ctx.http,
                    serenity::CreateInteractionResponseFollowup::new()
                        .content("An error occurred while processing this absence request.")
                        .ephemeral(true),
                )
                .await;
        }
    }
    Ok(())
}

/// Last line of defence: the requester must never be left without a
/// reply, and the failure goes to the audit channel with full detail.
async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            let command = format!("/{}", ctx.command().qualified_name);
            tracing::error!(command = %command, user = %ctx.author().tag(), "command failed: {:#}", error);

            let report = embeds::error_report(&error, &command, &ctx.author().tag(), None);
            let _ = ctx
                .data()
                .config
                .discord
                .audit_channel
                .send_message(
                    &ctx.serenity_context().http,
                    serenity::CreateMessage::new().embed(report),
                )
                .await;
            let _ = ctx
                .say("An unexpected error occurred. Please contact an administrator.")
                .await;
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                tracing::error!("error while handling error: {}", e);
            }
        }
    }
}
