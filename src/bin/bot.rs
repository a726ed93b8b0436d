use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use dotenvy::dotenv;
use log::{error, info, warn};
use serenity::builder::CreateComponents;
use serenity::http::{Http, HttpBuilder};
use serenity::model::application::component::ButtonStyle;
use serenity::model::application::interaction::{Interaction, InteractionResponseType};
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::model::id::{ChannelId, MessageId, UserId};
use serenity::prelude::*;
use std::sync::Arc;

use remembot::{
    ActionEvent, ChatApi, Config, Database, EventRouter, InboundMessage, MessageRef, PromptStore,
    ReminderScheduler, Widget,
};

/// Discord caps select menus at 25 options; longer option lists are split
/// across several selects whose ids get a `:n` suffix.
const SELECT_OPTION_LIMIT: usize = 25;

/// Discord caps action rows at 5 buttons.
const BUTTONS_PER_ROW: usize = 5;

/// `ChatApi` backed by the Discord HTTP API.
///
/// Message references pack the channel id into `msb` and the message id
/// into `lsb`. Discord does not expose a preferred-language profile to
/// bots, so the adapter remembers the locale reported with each
/// interaction instead.
struct DiscordApi {
    http: Arc<Http>,
    locales: DashMap<u64, String>,
}

impl DiscordApi {
    fn new(http: Arc<Http>) -> Self {
        DiscordApi {
            http,
            locales: DashMap::new(),
        }
    }

    fn note_locale(&self, user_id: u64, locale: &str) {
        self.locales.insert(user_id, locale.to_string());
    }
}

#[async_trait]
impl ChatApi for DiscordApi {
    async fn send_text(
        &self,
        user_id: u64,
        text: &str,
        widgets: &[Widget],
        reply_to: Option<MessageRef>,
    ) -> Result<MessageRef> {
        let channel = match reply_to {
            Some(r) => ChannelId(r.msb),
            None => UserId(user_id).create_dm_channel(&self.http).await?.id,
        };

        let message = channel
            .send_message(&self.http, |m| {
                m.content(text);
                if let Some(r) = reply_to {
                    m.reference_message((ChannelId(r.msb), MessageId(r.lsb)));
                }
                if !widgets.is_empty() {
                    m.components(|c| {
                        apply_widgets(c, widgets);
                        c
                    });
                }
                m
            })
            .await?;

        Ok(MessageRef::new(message.channel_id.0, message.id.0))
    }

    async fn edit_text(&self, message: MessageRef, text: &str) -> Result<()> {
        ChannelId(message.msb)
            .edit_message(&self.http, MessageId(message.lsb), |m| {
                // dropping the widgets makes the terminal text final
                m.content(text).components(|c| c)
            })
            .await?;
        Ok(())
    }

    async fn preferred_languages(&self, user_id: u64) -> Result<Vec<String>> {
        Ok(self
            .locales
            .get(&user_id)
            .map(|locale| vec![locale.clone()])
            .unwrap_or_default())
    }
}

/// Render platform-neutral widgets into Discord component rows.
fn apply_widgets(components: &mut CreateComponents, widgets: &[Widget]) {
    let mut buttons: Vec<(&str, &str)> = Vec::new();

    for widget in widgets {
        match widget {
            Widget::Button { id, label } => buttons.push((id, label)),
            Widget::Select { id, label, options } => {
                flush_buttons(components, &mut buttons);
                let chunked = options.len() > SELECT_OPTION_LIMIT;
                for (n, chunk) in options.chunks(SELECT_OPTION_LIMIT).enumerate() {
                    let custom_id = if n == 0 { id.clone() } else { format!("{id}:{n}") };
                    let placeholder = if chunked {
                        // disambiguate the split selects by their range
                        format!(
                            "{label} {}-{}",
                            chunk.first().map(|o| o.label.as_str()).unwrap_or_default(),
                            chunk.last().map(|o| o.label.as_str()).unwrap_or_default()
                        )
                    } else {
                        label.clone()
                    };
                    components.create_action_row(|row| {
                        row.create_select_menu(|menu| {
                            menu.custom_id(&custom_id)
                                .placeholder(&placeholder)
                                .options(|opts| {
                                    for option in chunk {
                                        opts.create_option(|o| {
                                            o.label(&option.label).value(&option.value)
                                        });
                                    }
                                    opts
                                })
                        })
                    });
                }
            }
        }
    }
    flush_buttons(components, &mut buttons);
}

fn flush_buttons(components: &mut CreateComponents, buttons: &mut Vec<(&str, &str)>) {
    for chunk in buttons.chunks(BUTTONS_PER_ROW) {
        components.create_action_row(|row| {
            for (id, label) in chunk {
                row.create_button(|b| b.custom_id(id).label(label).style(ButtonStyle::Secondary));
            }
            row
        });
    }
    buttons.clear();
}

/// Strip the `:n` suffix a split select carries back to its base widget id.
fn base_widget_id(custom_id: &str) -> &str {
    custom_id.split(':').next().unwrap_or(custom_id)
}

struct Handler {
    router: Arc<EventRouter>,
    api: Arc<DiscordApi>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, _ctx: Context, msg: Message) {
        // private text messages only
        if msg.author.bot || msg.guild_id.is_some() {
            return;
        }

        let inbound = InboundMessage {
            user_id: msg.author.id.0,
            message: MessageRef::new(msg.channel_id.0, msg.id.0),
            text: msg.content.clone(),
        };
        if let Err(e) = self.router.on_message(&inbound).await {
            error!("Error handling message from user {}: {e}", inbound.user_id);
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::MessageComponent(component) = interaction else {
            return;
        };

        self.api
            .note_locale(component.user.id.0, &component.locale);

        // Acknowledge without touching the message; the router edits it
        // through the HTTP API afterwards.
        if let Err(e) = component
            .create_interaction_response(&ctx.http, |response| {
                response.kind(InteractionResponseType::DeferredUpdateMessage)
            })
            .await
        {
            warn!("Failed to acknowledge interaction: {e}");
        }

        let event = ActionEvent {
            user_id: component.user.id.0,
            prompt: MessageRef::new(component.channel_id.0, component.message.id.0),
            widget_id: base_widget_id(&component.data.custom_id).to_string(),
            value: component.data.values.first().cloned(),
        };
        if let Err(e) = self.router.on_action(&event).await {
            error!("Error handling action '{}': {e}", event.widget_id);
        }
    }

    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("🎉 {} is connected and ready!", ready.user.name);
        info!("🤖 Bot ID: {}", ready.user.id);
        info!("🌐 Gateway version: {}", ready.version);
        info!("💬 Send me a private message and I'll offer to remind you of it");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting remembot...");

    let database = Database::new(&config.database_path).await?;
    let prompts = PromptStore::new();

    let http: Arc<Http> = match config.api_proxy.as_deref() {
        Some(proxy) => {
            info!("Routing API calls through endpoint override: {proxy}");
            Arc::new(HttpBuilder::new(&config.discord_token).proxy(proxy)?.build())
        }
        None => Arc::new(Http::new(&config.discord_token)),
    };
    let api = Arc::new(DiscordApi::new(http));

    let router = Arc::new(EventRouter::new(
        api.clone() as Arc<dyn ChatApi>,
        prompts.clone(),
        database.clone(),
    ));

    // Start the reminder scheduler
    let scheduler = ReminderScheduler::new(
        database.clone(),
        api.clone() as Arc<dyn ChatApi>,
        prompts.clone(),
    );
    tokio::spawn(async move {
        scheduler.run().await;
    });

    let handler = Handler {
        router,
        api: api.clone(),
    };

    let intents = GatewayIntents::DIRECT_MESSAGES | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await
        .map_err(|e| {
            error!("Failed to create Discord client: {e}");
            anyhow::anyhow!("Client creation failed: {}", e)
        })?;

    info!("Bot configured successfully. Connecting to Discord gateway...");

    if let Err(why) = client.start().await {
        error!("Gateway connection failed: {why:?}");
        return Err(anyhow::anyhow!(
            "Failed to establish gateway connection: {}",
            why
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use remembot::SelectOption;

    #[test]
    fn test_base_widget_id_strips_chunk_suffix() {
        assert_eq!(base_widget_id("pick_minute:2"), "pick_minute");
        assert_eq!(base_widget_id("pick_hour"), "pick_hour");
        assert_eq!(base_widget_id("delay_30m"), "delay_30m");
    }

    #[test]
    fn test_widget_rendering_stays_within_discord_limits() {
        // six buttons and a 60-option select: 2 button rows + 1 + 3 select rows
        let widgets = vec![
            remembot::features::prompts::delay_buttons(remembot::Lang::En),
            vec![Widget::Select {
                id: "pick_minute".to_string(),
                label: "Minutes".to_string(),
                options: (0..60)
                    .map(|n| SelectOption {
                        label: n.to_string(),
                        value: n.to_string(),
                    })
                    .collect(),
            }],
        ]
        .concat();

        let mut components = CreateComponents::default();
        apply_widgets(&mut components, &widgets);
        assert_eq!(components.0.len(), 5);
    }
}
