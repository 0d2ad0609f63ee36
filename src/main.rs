//! BowlBot Telegram Bot
//!
//! Main application entry point

use std::net::SocketAddr;
use std::sync::Arc;
use anyhow::Context;
use teloxide::{prelude::*, types::Update};
use teloxide::dispatching::UpdateHandler;
use teloxide::update_listeners::webhooks;
use teloxide::utils::command::BotCommands;
use tracing::{debug, info, warn};

use bowlbot::{
    config::Settings,
    database::{create_pool, run_migrations, DatabaseService, MemoryStore, PoolConfig, Store},
    handlers::{handle_incoming, BotContext, Command},
    middleware::HandlerTimer,
    models::IncomingMessage,
    services::{ServiceFactory, TelegramMessenger},
    state::ConversationManager,
    utils::logging::{self, log_handler_error},
};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("Failed to load configuration")?;
    settings.validate()?;

    // Initialize logging; the guard flushes the log file on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", bowlbot::info());

    let store: Arc<dyn Store> = if settings.database.is_memory() {
        warn!("Using the in-memory store, nothing will survive a restart");
        Arc::new(MemoryStore::new())
    } else {
        info!("Connecting to database...");
        let pool = create_pool(&PoolConfig::from(&settings.database)).await?;
        run_migrations(&pool).await?;

        let database = DatabaseService::new(pool);
        match database.get_system_stats().await {
            Ok(stats) => info!(stats = %stats, "Database ready"),
            Err(e) => warn!(error = %e, "Failed to collect database statistics"),
        }
        Arc::new(database)
    };

    // Initialize bot
    let bot = Bot::new(&settings.bot.token);
    let me = bot.get_me().await.context("Failed to fetch bot identity")?;
    let bot_username = me.user.username.clone().unwrap_or_default();
    info!(username = %bot_username, "Authenticated with Telegram");

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!(error = %e, "Failed to register bot commands");
    }

    // Dialog state lives only in memory
    let mut conversations = ConversationManager::new(
        settings.conversation.ttl(),
        settings.conversation.sweep_interval(),
    );
    conversations.start_sweeping();

    let services = ServiceFactory::new(Arc::clone(&store), &settings);
    let purge_task = services.event_service.spawn_purge_task(settings.events.purge_interval());

    let context = Arc::new(BotContext {
        store,
        messenger: Arc::new(TelegramMessenger::new(bot.clone())),
        services,
        conversations: conversations.tracker(),
        bot_username,
    });

    let mut dispatcher = Dispatcher::builder(bot.clone(), create_handler())
        .dependencies(dptree::deps![context])
        .default_handler(|upd| async move {
            debug!(update = ?upd.id, "Unhandled update");
        })
        .enable_ctrlc_handler()
        .build();

    info!("BowlBot is ready!");

    match &settings.bot.webhook_url {
        Some(webhook_url) => {
            let address: SocketAddr = settings
                .bot
                .listen_addr
                .parse()
                .context("Invalid listen address")?;
            let url = url::Url::parse(webhook_url).context("Invalid webhook URL")?;
            info!(%address, %url, "Starting bot with webhook...");

            let listener = webhooks::axum(bot, webhooks::Options::new(address, url))
                .await
                .context("Failed to set up webhook")?;
            dispatcher
                .dispatch_with_listener(
                    listener,
                    LoggingErrorHandler::with_custom_text("An error from the update listener"),
                )
                .await;
        }
        None => {
            info!("Starting bot with polling mode...");
            dispatcher.dispatch().await;
        }
    }

    purge_task.abort();
    conversations.stop_sweeping();
    info!("BowlBot has been shut down.");

    Ok(())
}

/// Create the main update handler; edits are handled like new messages
fn create_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    dptree::entry()
        .branch(Update::filter_message().endpoint(handle_message))
        .branch(Update::filter_edited_message().endpoint(handle_message))
}

async fn handle_message(msg: Message, context: Arc<BotContext>) -> HandlerResult {
    let Some(incoming) = IncomingMessage::from_telegram(&msg) else {
        return Ok(());
    };

    let chat_id = incoming.chat_id;
    let timer = HandlerTimer::start(&incoming);
    let result = handle_incoming(&context, incoming).await;
    timer.finish(result.is_ok());

    if let Err(e) = result {
        log_handler_error(&e, chat_id, "message");
    }

    Ok(())
}
