use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use prepbot::{ChatBot, ChatRequest, Config, Database, JsonFileStore, QuestionStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "prepbot")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Dataset file (overrides the configured path)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Render question links as HTML anchors
    #[arg(long, global = true)]
    html: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a single message and print the reply
    Send {
        /// Message text, e.g. `company amazon`
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
        /// Print the reply as a JSON response document
        #[arg(long)]
        json: bool,
    },
    /// Create an empty dataset file
    Init {
        /// Overwrite an existing dataset
        #[arg(long)]
        force: bool,
    },
    /// Show where configuration and data are stored
    Path,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "prepbot=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(data) = cli.data {
        config.data_file = Some(data);
    }
    if cli.html {
        config.html_links = true;
    }
    let data_path = config.data_path()?;

    match cli.command {
        Some(Commands::Send { message, json }) => {
            let bot = ChatBot::with_options(JsonFileStore::new(&data_path), config.bot_options());
            let request = ChatRequest { message: message.join(" ") };
            let response = bot.answer(&request);
            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                println!("{}", response.reply);
            }
        }
        Some(Commands::Init { force }) => {
            if data_path.exists() && !force {
                bail!("{:?} already exists, pass --force to overwrite it", data_path);
            }
            let store = JsonFileStore::new(&data_path);
            store
                .save(&Database::default())
                .with_context(|| format!("Failed to create dataset at {:?}", store.path()))?;
            println!("Created {}", store.path().display());
        }
        Some(Commands::Path) => {
            println!("config: {}", Config::config_path()?.display());
            println!("data:   {}", data_path.display());
        }
        None => {
            let bot = ChatBot::with_options(JsonFileStore::new(&data_path), config.bot_options());
            chat_loop(&bot)?;
        }
    }

    Ok(())
}

/// Interactive session on stdin/stdout
fn chat_loop<S: QuestionStore>(bot: &ChatBot<S>) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    writeln!(stdout, "Hi! I'm your Placement Prep Bot 🤖\nType help to see commands.")?;

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("exit") {
            break;
        }

        writeln!(stdout, "{}\n", bot.respond(&line).text)?;
    }

    Ok(())
}
