mod commands;
mod i18n;
mod render;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use commands::Context;
use commands::calendar::CalendarArgs;

#[derive(Parser)]
#[command(name = "mela")]
#[command(about = "Browse artisan events, the month calendar and your reminders")]
struct Cli {
    /// Act as this user instead of the configured one
    #[arg(short, long, global = true)]
    user: Option<String>,

    /// Treat this date as today (YYYY-MM-DD)
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    /// Display language (e.g. "English", "Hindi")
    #[arg(long, global = true)]
    lang: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every visible event with its status
    Events,
    /// Events starting within the reminder window, and recently ended ones
    Upcoming {
        /// Look this many days ahead instead of the configured window
        #[arg(short, long)]
        days: Option<i64>,
    },
    /// Show a month grid
    Calendar {
        /// Month to show (YYYY-MM); defaults to the current month
        #[arg(short, long)]
        month: Option<String>,

        #[arg(long, conflicts_with = "next")]
        prev: bool,

        #[arg(long)]
        next: bool,

        /// Print the grid as an HTML table
        #[arg(long)]
        html: bool,
    },
    /// Set a reminder for an upcoming event
    Remind { event_id: String },
    /// Cancel a reminder
    Unremind { event_id: String },
    /// Show reminders for events starting soon
    Notices {
        #[arg(short, long)]
        days: Option<i64>,
    },
    /// Show or change your preferred crafts
    Crafts {
        /// Replace the selection with these crafts
        #[arg(long, num_args = 1..)]
        set: Vec<String>,

        /// Clear the selection and show all events
        #[arg(long, conflicts_with = "set")]
        clear: bool,
    },
    /// Set how many days ahead reminders look (1-90)
    Window { days: i64 },
    /// Show config paths and session settings
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mela_core=warn,mela=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut ctx = Context::load(cli.user, cli.today, cli.lang)?;

    match cli.command {
        Commands::Events => commands::events::run(&ctx),
        Commands::Upcoming { days } => commands::upcoming::run(&mut ctx, days),
        Commands::Calendar { month, prev, next, html } => {
            commands::calendar::run(&mut ctx, CalendarArgs { month, prev, next, html })
        }
        Commands::Remind { event_id } => commands::remind::set(&mut ctx, &event_id),
        Commands::Unremind { event_id } => commands::remind::cancel(&mut ctx, &event_id),
        Commands::Notices { days } => commands::notices::run(&mut ctx, days),
        Commands::Crafts { set, clear } => commands::crafts::run(&mut ctx, set, clear),
        Commands::Window { days } => commands::window::run(&mut ctx, days),
        Commands::Config => commands::config::run(&ctx),
    }
}
