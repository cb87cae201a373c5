//! # bark
//!
//! Command-line front end for `bark-client`: one subcommand per client
//! operation.

#![deny(unsafe_code)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use bark_client::BarkClient;
use bark_core::{EncryptionAlgorithm, Message, MessageBuilder, MessageLevel, MessageSound};
use bark_settings::ClientSettings;
use clap::{Args, Parser, Subcommand};

/// Bark push-notification client.
#[derive(Parser, Debug)]
#[command(name = "bark", about = "Send notifications through a Bark server")]
struct Cli {
    /// Server address (overrides settings and `BARK_SERVER_ADDRESS`).
    #[arg(long, global = true)]
    server: Option<String>,

    /// Settings file (defaults to `~/.bark/settings.json`).
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check server health.
    Health,
    /// Print server information as JSON.
    Info,
    /// Check that the server is running.
    Ping,
    /// Push a plaintext notification.
    Push {
        /// Target device key.
        #[arg(long)]
        device_key: Option<String>,

        #[command(flatten)]
        message: MessageArgs,
    },
    /// Push an encrypted notification.
    PushEncrypted {
        /// Target device key.
        #[arg(long)]
        device_key: String,

        /// Cipher, e.g. `aes-128-cbc`.
        #[arg(long, default_value = "aes-128-cbc")]
        algorithm: EncryptionAlgorithm,

        /// Encryption key, exactly the algorithm's key size.
        #[arg(long)]
        key: String,

        /// Initialization vector, exactly 16 bytes.
        #[arg(long)]
        iv: String,

        #[command(flatten)]
        message: MessageArgs,
    },
}

/// Notification content shared by both push commands.
#[derive(Args, Debug, Default)]
struct MessageArgs {
    /// Notification title.
    #[arg(long)]
    title: Option<String>,

    /// Notification body.
    #[arg(long)]
    body: Option<String>,

    /// Badge number.
    #[arg(long)]
    badge: Option<i64>,

    /// Notification category.
    #[arg(long)]
    category: Option<String>,

    /// Text copied when the notification is copied.
    #[arg(long)]
    copy: Option<String>,

    /// Group the notification is filed under.
    #[arg(long)]
    group: Option<String>,

    /// Icon URL.
    #[arg(long)]
    icon: Option<String>,

    /// URL opened when the notification is tapped.
    #[arg(long)]
    url: Option<String>,

    /// Interruption level: active, timeSensitive, passive or critical.
    #[arg(long)]
    level: Option<MessageLevel>,

    /// Notification sound, e.g. `birdsong`.
    #[arg(long)]
    sound: Option<MessageSound>,

    /// Save the notification in the app's history.
    #[arg(long)]
    archive: bool,
}

impl MessageArgs {
    fn into_message(self, device_key: Option<String>) -> Result<Message> {
        let mut builder = MessageBuilder::new();
        if let Some(device_key) = device_key {
            builder = builder.device_key(device_key);
        }
        if let Some(title) = self.title {
            builder = builder.title(title);
        }
        if let Some(body) = self.body {
            builder = builder.body(body);
        }
        if let Some(badge) = self.badge {
            builder = builder.badge(badge);
        }
        if let Some(category) = self.category {
            builder = builder.category(category);
        }
        if let Some(copy) = self.copy {
            builder = builder.copy(copy);
        }
        if let Some(group) = self.group {
            builder = builder.group(group);
        }
        if let Some(icon) = self.icon {
            builder = builder.icon(icon)?;
        }
        if let Some(url) = self.url {
            builder = builder.url(url)?;
        }
        if let Some(level) = self.level {
            builder = builder.level(level);
        }
        if let Some(sound) = self.sound {
            builder = builder.sound(sound);
        }
        if self.archive {
            builder = builder.archive();
        }
        Ok(builder.build())
    }
}

fn resolve_settings(args: &Cli) -> Result<ClientSettings> {
    let path = args
        .settings
        .clone()
        .unwrap_or_else(bark_settings::settings_path);
    let mut settings = bark_settings::load_settings_from_path(&path)
        .with_context(|| format!("Failed to load settings from {}", path.display()))?;
    if let Some(ref server) = args.server {
        settings.server_address.clone_from(server);
    }
    Ok(settings)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    bark_core::logging::init_subscriber(&args.log_level);

    let settings = resolve_settings(&args)?;
    let client = BarkClient::from_settings(&settings)?;
    tracing::debug!(server = %client.server_address(), "client ready");

    match args.command {
        Command::Health => {
            client.health().await?;
            println!("ok");
        }
        Command::Info => {
            let info = client.info().await?;
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        Command::Ping => {
            client.ping().await?;
            println!("pong");
        }
        Command::Push {
            device_key,
            message,
        } => {
            let message = message.into_message(device_key)?;
            client.push(&message).await?;
            println!("sent");
        }
        Command::PushEncrypted {
            device_key,
            algorithm,
            key,
            iv,
            message,
        } => {
            let message = message.into_message(None)?;
            client
                .push_encrypted(&device_key, &message, algorithm, &key, &iv)
                .await?;
            println!("sent");
        }
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
