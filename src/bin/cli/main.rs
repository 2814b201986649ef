mod app;
mod commands;
mod render;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use recall_lib::flashcards::CardType;

#[derive(Parser)]
#[command(name = "recall-cli", about = "Study cards from a markdown vault", version)]
struct Cli {
    /// Config file (default: <config dir>/recall/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Vault folder, overrides the config
    #[arg(long, global = true)]
    vault: Option<PathBuf>,

    /// Progress file, overrides the config
    #[arg(long, global = true)]
    progress: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// List cards extracted from the vault
    Cards {
        /// Only cards of this type (definition, qa, cloze)
        #[arg(long = "type")]
        card_type: Option<CardType>,
        /// Case-insensitive text to look for in front or back
        #[arg(long)]
        query: Option<String>,
    },

    /// List cards due for review
    Due,

    /// Grade a card: 1 again, 2 hard, 3 good, 4 easy
    Review {
        /// Card id (unique prefix accepted)
        card: String,
        /// Grade from 1 to 4
        #[arg(allow_negative_numbers = true)]
        grade: i32,
    },

    /// Show the interval each grade would give a card
    Preview {
        /// Card id (unique prefix accepted)
        card: String,
    },

    /// Show review statistics
    Stats,

    /// List notes linking to a title
    Backlinks {
        /// Note title, matched by slug
        title: String,
    },

    /// List links between notes
    Graph,

    /// List wiki-links in a note
    Links {
        /// Note title (case-insensitive prefix match)
        note: String,
    },

    /// Turn the first occurrence of a term in a note into a wiki-link
    Link {
        /// Note title (case-insensitive prefix match)
        note: String,
        /// Term to link
        term: String,
    },

    /// Export cards as CSV
    Export {
        /// Only cards of this type (definition, qa, cloze)
        #[arg(long = "type")]
        card_type: Option<CardType>,
        /// Case-insensitive text to look for in front or back
        #[arg(long)]
        query: Option<String>,
        /// Output file (default: stdout)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();
    let app = app::App::new(
        cli.config.as_deref(),
        cli.vault.clone(),
        cli.progress.clone(),
    )?;

    match cli.command {
        Command::Cards { card_type, query } => {
            commands::cards::run(&app, card_type, query, &cli.format, use_color)?;
        }
        Command::Due => {
            commands::due::run(&app, &cli.format, use_color).await?;
        }
        Command::Review { card, grade } => {
            commands::review::run(&app, &card, grade, &cli.format, use_color).await?;
        }
        Command::Preview { card } => {
            commands::preview::run(&app, &card, &cli.format).await?;
        }
        Command::Stats => {
            commands::stats::run(&app, &cli.format).await?;
        }
        Command::Backlinks { title } => {
            commands::backlinks::run(&app, &title, &cli.format)?;
        }
        Command::Graph => {
            commands::graph::run(&app, &cli.format)?;
        }
        Command::Links { note } => {
            commands::links::run(&app, &note, &cli.format)?;
        }
        Command::Link { note, term } => {
            commands::link::run(&app, &note, &term)?;
        }
        Command::Export { card_type, query, out } => {
            commands::export::run(&app, card_type, query, out.as_deref())?;
        }
    }

    Ok(())
}
