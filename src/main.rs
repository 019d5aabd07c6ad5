use std::collections::HashMap;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use messagesphere::application::auth::AuthService;
use messagesphere::application::errors::ClientError;
use messagesphere::application::services::ChatService;
use messagesphere::application::transport::ChatSocket;
use messagesphere::domain::entities::{Contact, User};
use messagesphere::domain::traits::{CurrentActor, Notifier, TokioScheduler};
use messagesphere::infrastructure::adapters::console;
use messagesphere::infrastructure::adapters::ConsoleNotifier;
use messagesphere::infrastructure::config::Config;
use messagesphere::infrastructure::data;
use messagesphere::infrastructure::storage::JsonStore;

#[derive(Parser)]
#[command(name = "messagesphere")]
#[command(about = "A demo messaging client with a simulated real-time transport", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Demo account email (overrides config)
    #[arg(short, long)]
    email: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat session
    Run,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run => {
            run_client(cli.config, cli.email);
        }
        Commands::Version => {
            println!("messagesphere v{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::InitConfig => {
            init_config();
        }
    }
}

fn run_client(config_path: String, email_override: Option<String>) {
    // Load config
    let config = if std::path::Path::new(&config_path).exists() {
        Config::load(&config_path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config: {}, using defaults", e);
            Config::load_env()
        })
    } else {
        Config::load_env()
    };

    tracing::info!("Starting {}", config.app.name);

    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async {
        if let Err(e) = run_session(config, email_override).await {
            tracing::error!("Session failed: {}", e);
        }
    });
}

async fn run_session(config: Config, email_override: Option<String>) -> Result<(), ClientError> {
    let store = Arc::new(JsonStore::new(&config.storage.directory));
    store.init().await?;

    let notifier: Arc<dyn Notifier> = Arc::new(ConsoleNotifier);
    let auth = Arc::new(AuthService::new(
        store.clone(),
        notifier.clone(),
        Arc::new(TokioScheduler),
    ));

    // Restore a previous session or sign in with the demo account
    let email = email_override.unwrap_or_else(|| config.app.default_email.clone());
    let user = match auth.restore().await {
        Ok(Some(user)) => user,
        _ => auth.login(&email, "demo").await?,
    };
    tracing::info!("Signed in as {} <{}>", user.name, user.email);

    let socket = Arc::new(
        ChatSocket::new(auth.clone() as Arc<dyn CurrentActor>, notifier.clone())
            .with_timing(config.transport.timing()),
    );

    let roster = data::mock_contacts();
    let service = Arc::new(ChatService::new(
        socket.clone(),
        store.clone(),
        roster.clone(),
        Arc::new(data::initial_conversation),
    ));

    register_console_listeners(&socket, &service, &roster, &user);

    socket.connect().await;
    let _drift = socket.spawn_presence_drift(
        roster
            .iter()
            .filter(|c| !c.is_ai)
            .map(|c| c.id.clone())
            .collect(),
    );

    chat_loop(&service, &roster, &user).await;

    socket.disconnect();
    Ok(())
}

/// Print transport events as they fan out, and persist inbound deliveries
fn register_console_listeners(
    socket: &Arc<ChatSocket>,
    service: &Arc<ChatService>,
    roster: &[Contact],
    user: &User,
) {
    let names: HashMap<String, String> = roster
        .iter()
        .map(|c| (c.id.clone(), c.name.clone()))
        .collect();

    socket.on_message({
        let names = names.clone();
        let service = service.clone();
        let user_id = user.id.clone();
        move |message| {
            if message.receiver_id != user_id {
                return;
            }
            let sender = names
                .get(&message.sender_id)
                .cloned()
                .unwrap_or_else(|| message.sender_id.clone());
            println!("[{}] {}", sender, message.content);

            let service = service.clone();
            let user_id = user_id.clone();
            let message = message.clone();
            tokio::spawn(async move {
                if let Err(e) = service.record_inbound(&user_id, &message).await {
                    tracing::warn!("Failed to persist inbound message: {}", e);
                }
            });
        }
    });

    socket.on_typing({
        let names = names.clone();
        move |contact_id, is_typing| {
            if is_typing {
                let name = names
                    .get(contact_id)
                    .cloned()
                    .unwrap_or_else(|| contact_id.to_string());
                println!("{} is typing...", name);
            }
        }
    });

    socket.on_presence(move |contact_id, online| {
        let name = names
            .get(contact_id)
            .cloned()
            .unwrap_or_else(|| contact_id.to_string());
        println!("{} is now {}", name, if online { "online" } else { "offline" });
    });
}

async fn chat_loop(service: &Arc<ChatService>, roster: &[Contact], user: &User) {
    let mut current: Option<Contact> = roster.iter().find(|c| c.is_ai).cloned();

    println!("Commands: /contacts, /open <id>, /quit. Anything else sends a message.");
    if let Some(contact) = &current {
        println!("Chatting with {}", contact.name);
    }

    loop {
        let Some(line) = console::read_line("> ") else {
            break;
        };

        match line.as_str() {
            "" => continue,
            "/quit" => break,
            "/contacts" => {
                for contact in roster {
                    let marker = if contact.online { "*" } else { " " };
                    println!("{} {:<3} {:<16} {}", marker, contact.id, contact.name, contact.last_seen);
                }
            }
            _ if line.starts_with("/open ") => {
                let id = line.trim_start_matches("/open ").trim();
                match service.contact(id) {
                    Some(contact) => {
                        current = Some(contact.clone());
                        println!("Chatting with {}", contact.name);
                        match service.conversation(&user.id, id).await {
                            Ok(history) => {
                                for msg in &history {
                                    let who = if msg.sender_id == user.id { "you" } else { id };
                                    println!("  [{}] {}", who, msg.content);
                                }
                            }
                            Err(e) => tracing::warn!("Failed to load history: {}", e),
                        }
                        if let Err(e) = service.mark_conversation_read(&user.id, id).await {
                            tracing::warn!("Failed to mark conversation read: {}", e);
                        }
                    }
                    None => println!("No such contact: {}", id),
                }
            }
            _ if line.starts_with('/') => {
                println!("Unknown command: {}", line);
            }
            _ => {
                let Some(contact) = &current else {
                    println!("Open a contact first with /open <id>");
                    continue;
                };
                if let Err(e) = service.send_text(&user.id, &contact.id, &line).await {
                    tracing::warn!("Failed to persist message: {}", e);
                }
            }
        }
    }
}

fn init_config() {
    let config = Config::default();
    match config.save("config.yaml") {
        Ok(()) => println!("Wrote config.yaml"),
        Err(e) => tracing::error!("Failed to write config: {}", e),
    }
}
