use anyhow::{bail, Context, Result};
use bmail_core::time::{frozen_time, Clock, FixedClock, SystemClock};
use bmail_core::transform::parse_timestamp;
use bmail_core::threads::{find_thread, is_thread_starred};
use bmail_core::view::{default_expanded, highlight, recipient_display_name};
use bmail_core::{
    BatchOutcome, EmailBackend, HttpBackend, InMemoryBackend, LoadSource, MailSession, Thread,
};
use clap::{Parser, Subcommand};
use config::{Config, File};
use serde::Deserialize;
use shared_types::{AccountOwner, Folder, FolderSelector, MailSettings};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "bmail", about = "Read and organize a BMail mailbox")]
struct Cli {
    /// Base URL of a running bmail-api. Without it the built-in demo mailbox is used.
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List threads in a folder
    List {
        #[arg(long, default_value = "inbox")]
        folder: FolderSelector,

        /// Only threads mentioning this text
        #[arg(long)]
        search: Option<String>,
    },
    /// Open a thread and print its emails (marks them read)
    Show {
        thread_id: String,

        #[arg(long, default_value = "inbox")]
        folder: FolderSelector,
    },
    /// Star or unstar a single email
    Star {
        email_id: String,

        #[arg(long)]
        off: bool,
    },
    /// Toggle the star of a whole thread
    StarThread { thread_id: String },
    /// Move every email of a thread to trash
    Trash { thread_id: String },
    /// Report a thread as spam
    Spam { thread_id: String },
    /// Move a thread back to the inbox
    Inbox { thread_id: String },
    /// Mark an email read or unread
    Read {
        email_id: String,

        #[arg(long)]
        unread: bool,
    },
    /// Folder list with counts
    Folders,
}

/// Subset of `~/.config/bmail/api.toml` the client cares about
#[derive(Debug, Deserialize, Clone, Default)]
struct CliConfig {
    account: Option<AccountOwner>,
    demo: Option<DemoConfig>,
}

#[derive(Debug, Deserialize, Clone, Default)]
struct DemoConfig {
    frozen_at: Option<String>,
}

impl CliConfig {
    /// Without a `[demo]` section the clock is frozen like the demo server.
    /// A `[demo]` section without `frozen_at` follows the system clock.
    fn clock(&self) -> Result<Arc<dyn Clock>> {
        match &self.demo {
            None => Ok(Arc::new(FixedClock(frozen_time()))),
            Some(DemoConfig {
                frozen_at: Some(value),
            }) => {
                let instant = parse_timestamp(value)
                    .with_context(|| format!("Invalid demo.frozen_at {:?}", value))?;
                Ok(Arc::new(FixedClock(instant)))
            }
            Some(DemoConfig { frozen_at: None }) => Ok(Arc::new(SystemClock)),
        }
    }

    fn owner(&self) -> AccountOwner {
        self.account.clone().unwrap_or_default()
    }
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config() -> Result<CliConfig> {
    let config_path = get_config_path();
    if !config_path.exists() {
        tracing::debug!("No config at {:?}, using defaults", config_path);
        return Ok(CliConfig::default());
    }

    let builder = Config::builder()
        .add_source(File::from(config_path.clone()))
        .build()
        .with_context(|| format!("Failed to read config at {:?}", config_path))?;

    Ok(builder.try_deserialize()?)
}

fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("bmail").join("api.toml")
    } else {
        PathBuf::from("api.toml")
    }
}

async fn open_session(api_url: Option<&str>, config: &CliConfig) -> Result<MailSession> {
    let clock = config.clock()?;
    let mut owner = config.owner();

    let (backend, settings): (Arc<dyn EmailBackend>, MailSettings) = match api_url {
        Some(url) => {
            let backend = HttpBackend::new(url).context("Failed to build HTTP client")?;
            let settings = match backend.fetch_user().await {
                Ok(user) => {
                    owner.name = user.name;
                    owner.address = user.email;
                    user.settings
                }
                Err(e) => {
                    tracing::warn!("Failed to fetch user from {}: {}", url, e);
                    MailSettings::default()
                }
            };
            let backend: Arc<dyn EmailBackend> = Arc::new(backend);
            (backend, settings)
        }
        None => {
            let settings = MailSettings::default();
            let backend: Arc<dyn EmailBackend> =
                Arc::new(InMemoryBackend::seeded(clock.as_ref(), settings.clone()));
            (backend, settings)
        }
    };

    let mut session = MailSession::new(backend, owner, settings, clock);
    if session.load().await == LoadSource::Seed && api_url.is_some() {
        eprintln!("Server unreachable, showing the demo mailbox");
    }
    Ok(session)
}

/// Bracket every occurrence of the search term
fn mark_matches(text: &str, term: &str) -> String {
    highlight(text, term)
        .into_iter()
        .map(|segment| {
            if segment.matched {
                format!("[{}]", segment.text)
            } else {
                segment.text
            }
        })
        .collect()
}

fn thread_line(session: &MailSession, thread: &Thread) -> String {
    let unread = if thread.has_unread { "*" } else { " " };
    let star = if thread.is_starred { "★" } else { "☆" };
    let mut participants = session.participants_label(thread);
    if thread.message_count > 1 {
        participants = format!("{} ({})", participants, thread.message_count);
    }
    format!(
        "{}{} {:<4} {:<32} {} - {}  {}",
        unread,
        star,
        thread.id,
        participants,
        mark_matches(&thread.subject, session.search()),
        mark_matches(&thread.snippet, session.search()),
        session.list_time(thread)
    )
}

fn print_thread(session: &MailSession, thread: &Thread) {
    println!("{}", thread.subject);
    let expanded = default_expanded(thread);

    for email in &thread.emails {
        let to: Vec<String> = email
            .to
            .iter()
            .map(|to| recipient_display_name(to, session.owner()))
            .collect();
        println!();
        println!(
            "[{}] {} <{}>  {}",
            email.id,
            email.from.name,
            email.from.address,
            session.email_date(email)
        );
        println!("to {}", to.join(", "));
        if expanded.contains(&email.id) {
            println!();
            println!("{}", email.body);
        } else {
            println!("{}", email.snippet);
        }
    }
}

fn report(outcome: BatchOutcome, action: &str) -> Result<()> {
    if outcome.is_empty() {
        bail!("No matching emails");
    }
    for email in &outcome.updated {
        println!("{} {}", action, email.id);
    }
    if !outcome.is_complete() {
        let failed: Vec<String> = outcome
            .failed
            .iter()
            .map(|(id, e)| format!("{}: {}", id, e))
            .collect();
        bail!(
            "{} of {} emails failed: {}",
            failed.len(),
            failed.len() + outcome.updated.len(),
            failed.join("; ")
        );
    }
    Ok(())
}

async fn move_thread(session: &mut MailSession, thread_id: &str, folder: Folder) -> Result<()> {
    if find_thread(session.emails(), thread_id).is_none() {
        bail!("Thread {} not found", thread_id);
    }
    let outcome = session.move_thread(thread_id, folder).await;
    report(outcome, &format!("Moved to {}", folder))
}

/// What toggling the thread's star will do, decided before the write
fn thread_star_action(session: &MailSession, thread_id: &str) -> &'static str {
    if is_thread_starred(session.emails(), thread_id) {
        "Unstarred"
    } else {
        "Starred"
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = load_config()?;
    let mut session = open_session(cli.api_url.as_deref(), &config).await?;

    match cli.command {
        Command::List { folder, search } => {
            session.set_folder(folder);
            if let Some(search) = search {
                session.set_search(&search);
            }
            let threads = session.visible_threads();
            if threads.is_empty() {
                println!("No conversations in {}", folder.display_name());
            }
            for thread in &threads {
                println!("{}", thread_line(&session, thread));
            }
        }
        Command::Show { thread_id, folder } => {
            session.set_folder(folder);
            let outcome = session.open_thread(&thread_id).await;
            for (id, e) in &outcome.failed {
                eprintln!("Failed to mark {} read: {}", id, e);
            }
            let thread = session
                .current_thread()
                .with_context(|| format!("Thread {} not found", thread_id))?;
            print_thread(&session, &thread);
        }
        Command::Star { email_id, off } => match session.toggle_star(&email_id, !off).await? {
            Some(email) => println!(
                "{} {}",
                if email.is_starred { "Starred" } else { "Unstarred" },
                email.id
            ),
            None => bail!("Email {} not found", email_id),
        },
        Command::StarThread { thread_id } => {
            let action = thread_star_action(&session, &thread_id);
            let outcome = session.toggle_thread_star(&thread_id).await;
            report(outcome, action)?;
        }
        Command::Trash { thread_id } => move_thread(&mut session, &thread_id, Folder::Trash).await?,
        Command::Spam { thread_id } => move_thread(&mut session, &thread_id, Folder::Spam).await?,
        Command::Inbox { thread_id } => move_thread(&mut session, &thread_id, Folder::Inbox).await?,
        Command::Read { email_id, unread } => match session.mark_read(&email_id, !unread).await? {
            Some(email) => println!(
                "Marked {} {}",
                email.id,
                if email.is_read { "read" } else { "unread" }
            ),
            None => bail!("Email {} not found", email_id),
        },
        Command::Folders => {
            for info in session.folder_infos() {
                match info.count {
                    Some(count) => println!("{:<10} {}", info.name, count),
                    None => println!("{}", info.name),
                }
            }
        }
    }

    Ok(())
}
