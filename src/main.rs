//! Roost - Mastodon feeds in the terminal, reconciled as you boost
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use roost::api::mastodon::MastodonClient;
use roost::{
    Config, FeedController, FeedHandle, FeedItem, FeedKind, FeedPayload, Snapshot, Status,
    StatusId, spawn_feed,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (RUST_LOG=debug for verbose output)
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Parse CLI arguments
    match parse_args()? {
        Command::Feed { kind, pages, limit } => feed_cli(kind, pages, limit).await,
        Command::Boost { id } => mutate_cli(Mutation::Boost, id).await,
        Command::Unboost { id } => mutate_cli(Mutation::Unboost, id).await,
        Command::Delete { id } => mutate_cli(Mutation::Delete, id).await,
        Command::Config => show_config(),
        Command::Help => {
            print_help();
            Ok(())
        }
        Command::Version => {
            print_version();
            Ok(())
        }
    }
}

/// CLI commands
enum Command {
    Feed {
        kind: Option<FeedKind>,
        pages: usize,
        limit: Option<usize>,
    },
    Boost {
        id: StatusId,
    },
    Unboost {
        id: StatusId,
    },
    Delete {
        id: StatusId,
    },
    Config,
    Help,
    Version,
}

/// Status mutations that come back as feed updates
#[derive(Clone, Copy)]
enum Mutation {
    Boost,
    Unboost,
    Delete,
}

fn parse_args() -> Result<Command> {
    let args: Vec<String> = std::env::args().collect();

    let Some(first) = args.get(1) else {
        return Ok(Command::Feed {
            kind: None,
            pages: 1,
            limit: None,
        });
    };

    let status_id = || -> Result<StatusId> {
        args.get(2)
            .map(|id| StatusId::from(id.as_str()))
            .ok_or_else(|| anyhow::anyhow!("Missing status id"))
    };

    match first.as_str() {
        "-h" | "--help" | "help" => Ok(Command::Help),
        "-v" | "--version" | "version" => Ok(Command::Version),
        "config" => Ok(Command::Config),

        "boost" => Ok(Command::Boost { id: status_id()? }),
        "unboost" => Ok(Command::Unboost { id: status_id()? }),
        "delete" | "rm" => Ok(Command::Delete { id: status_id()? }),

        other => {
            // Either a feed name or straight to the options
            let (kind, rest) = if other.starts_with('-') {
                (None, &args[1..])
            } else {
                let kind = FeedKind::from_str(other).ok_or_else(|| {
                    anyhow::anyhow!("Unknown command: {other}\nRun 'roost --help' for usage")
                })?;
                (Some(kind), &args[2..])
            };

            let flag = |long: &str, short: &str| -> Option<usize> {
                rest.iter()
                    .position(|a| a == long || a == short)
                    .and_then(|i| rest.get(i + 1))
                    .and_then(|s| s.parse().ok())
            };

            Ok(Command::Feed {
                kind,
                pages: flag("--pages", "-p").unwrap_or(1).max(1),
                limit: flag("--limit", "-l"),
            })
        }
    }
}

fn print_help() {
    let config_path = Config::default_path()
        .map_or_else(|_| "Unknown".to_string(), |p| p.display().to_string());

    println!(
        r#"🐘 Roost - Mastodon feeds, reconciled

USAGE:
    roost                              Show the default feed
    roost [COMMAND]

COMMANDS:
    home | notifications | mentions [OPTIONS]
                                       Show a feed
      Options:
        -p, --pages <n>                Pages to load (default: 1)
        -l, --limit <n>                Entries per page (default: from config)
      Examples:
        roost home --pages 3
        roost mentions -l 10

    boost <id>                         Boost a status, then show the reconciled home feed
    unboost <id>                       Undo a boost, then show the reconciled home feed
    delete <id>                        Delete one of your statuses
    config                             Show configuration

OPTIONS:
    -h, --help                         Show this help message
    -v, --version                      Show version information

ENVIRONMENT:
    {}                     Instance (overrides config)
    {}                 Access token (overrides config)
    RUST_LOG                           Log filter (default: warn)

CONFIG:
    {}
"#,
        roost::config::INSTANCE_ENV,
        roost::config::TOKEN_ENV,
        config_path
    );
}

fn print_version() {
    println!("roost {}", roost::VERSION);
}

fn show_config() -> Result<()> {
    let config = Config::load()?;
    let path = Config::default_path()?;

    println!("Config file: {}", path.display());
    println!(
        "  instance:        {}",
        if config.instance.is_empty() {
            "(not set)"
        } else {
            config.instance.as_str()
        }
    );
    println!(
        "  access_token:    {}",
        if config.access_token.is_some() {
            "(set)"
        } else {
            "(not set)"
        }
    );
    println!("  page_limit:      {}", config.page_limit);
    println!("  snapshot_buffer: {}", config.snapshot_buffer);
    println!("  default_feed:    {}", config.default_feed);

    Ok(())
}

/// Connect to the configured instance and start a background feed
fn connect(config: &Config, limit: Option<usize>) -> Result<(MastodonClient, FeedHandle)> {
    let (instance, token) = config.credentials()?;
    let client = MastodonClient::new(instance, token);

    let controller = FeedController::with_options(
        client.clone(),
        limit.unwrap_or(config.page_limit),
        config.snapshot_buffer,
    );
    Ok((client, spawn_feed(controller)))
}

async fn feed_cli(kind: Option<FeedKind>, pages: usize, limit: Option<usize>) -> Result<()> {
    let config = Config::load()?;
    let kind = kind.unwrap_or(config.default_feed);
    let (_, feed) = connect(&config, limit)?;

    let mut snapshot = feed.load_initial(kind).await?;
    for _ in 1..pages {
        let before = snapshot.len();
        snapshot = feed.load_next(kind).await?;
        if snapshot.len() == before {
            break;
        }
    }

    print_snapshot(kind, &snapshot);
    feed.shutdown().await;
    Ok(())
}

async fn mutate_cli(mutation: Mutation, id: StatusId) -> Result<()> {
    let config = Config::load()?;
    let (client, feed) = connect(&config, None)?;

    feed.load_initial(FeedKind::Home).await?;

    let snapshot = match mutation {
        Mutation::Boost => {
            let boosted = client.reblog(&id).await?;
            println!("🔁 Boosted {}", id);
            feed.update(Status::from_entity(boosted)).await?
        }
        Mutation::Unboost => {
            let original = client.unreblog(&id).await?;
            println!("↩ Unboosted {}", id);
            feed.update(Status::from_entity(original)).await?
        }
        Mutation::Delete => {
            let deleted = client.delete_status(&id).await?;
            println!("🗑 Deleted {}", id);
            feed.delete(Status::from_entity(deleted)).await?
        }
    };

    print_snapshot(FeedKind::Home, &snapshot);
    feed.shutdown().await;
    Ok(())
}

fn print_snapshot(kind: FeedKind, snapshot: &Snapshot) {
    println!("\n{} {} ({} items)", kind.emoji(), kind.name(), snapshot.len());
    println!("{}", "─".repeat(60));

    if snapshot.is_empty() {
        println!("\nNothing here yet.");
        return;
    }

    for item in snapshot.items.iter() {
        print_item(item);
    }
}

fn print_item(item: &FeedItem) {
    match &item.payload {
        FeedPayload::Status(status) => print_status(status),
        FeedPayload::Notification(notification) => {
            println!("\n{} · {}", notification.summary(), item.id);
            if let Some(status) = &notification.status {
                println!("  {}", status.preview(120));
            }
        }
    }
}

fn print_status(status: &Status) {
    let shown = status.content_status();

    println!();
    if status.is_reblog() {
        println!("🔁 {} boosted", status.entity.account.name());
    }
    println!(
        "@{} · {} · {}",
        shown.entity.account.handle(),
        shown.relative_time(),
        shown.id
    );

    if status.hides_content() {
        println!("⚠ CW: {}", shown.entity.spoiler_text);
    } else {
        println!("{}", shown.entity.plain_text());
    }

    let marker = |on: Option<bool>, yes: &'static str| if on.unwrap_or(false) { yes } else { "" };
    println!(
        "♥ {}{}  🔁 {}{}  💬 {}",
        shown.entity.favourites_count,
        marker(shown.entity.favourited, "*"),
        shown.entity.reblogs_count,
        marker(shown.entity.reblogged, "*"),
        shown.entity.replies_count
    );
}
