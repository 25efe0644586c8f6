//! Command-line dice roller and combat round driver for Würfelwerk.

mod commands;
mod output;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "wk",
    about = "Würfelwerk: d20 checks, item use and combat rounds",
    version,
    propagate_version = true
)]
struct Cli {
    /// Engine config file (JSON). Defaults, then WK_* variables, apply otherwise
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Seed for reproducible rolls
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Roll a formula such as "1d20 +3" or "2d20kh +5"
    Roll {
        /// Dice formula
        formula: String,

        /// Critical range, e.g. "18-20"
        #[arg(long, default_value = "20")]
        crit: String,
    },

    /// Recompute derived sheet data and show the roster
    Sheet {
        /// Roster file (JSON)
        #[arg(short, long, default_value = "roster.json")]
        roster: PathBuf,

        /// Write the recomputed roster back to the file
        #[arg(long)]
        save: bool,
    },

    /// Roll an ability or aptitude check for an actor
    Check {
        /// Actor name (case-insensitive)
        actor: String,

        /// Ability or aptitude key (e.g. mind, melee)
        target: String,

        /// Situational bonus or malus
        #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
        bonus: i32,

        /// Print the card as JSON
        #[arg(long)]
        json: bool,

        /// Roster file (JSON)
        #[arg(short, long, default_value = "roster.json")]
        roster: PathBuf,
    },

    /// Use an item: validate costs, roll, and apply the effects
    Use {
        /// Actor name (case-insensitive)
        actor: String,

        /// Item name (case-insensitive)
        item: String,

        /// Situational bonus or malus on the roll
        #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
        bonus: i32,

        /// Bonus or malus on the effect value
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        value_bonus: i32,

        /// Spend one unit of the item
        #[arg(long)]
        consume: bool,

        /// Pay the item's action cost
        #[arg(long)]
        actions: bool,

        /// Current combat round; omit when no session is tracking rounds
        #[arg(long)]
        round: Option<u32>,

        /// Print the card as JSON
        #[arg(long)]
        json: bool,

        /// Persist the resulting updates to the roster file
        #[arg(long)]
        save: bool,

        /// Roster file (JSON)
        #[arg(short, long, default_value = "roster.json")]
        roster: PathBuf,
    },

    /// Spend one action on movement during a combat round
    Move {
        /// Actor name (case-insensitive)
        actor: String,

        /// Current combat round
        #[arg(long)]
        round: Option<u32>,

        /// Persist the update to the roster file
        #[arg(long)]
        save: bool,

        /// Roster file (JSON)
        #[arg(short, long, default_value = "roster.json")]
        roster: PathBuf,
    },

    /// Apply damage (negative) or healing (positive) to an actor
    Hp {
        /// Actor name (case-insensitive)
        actor: String,

        /// Hit point change
        #[arg(allow_hyphen_values = true)]
        amount: i32,

        /// Persist the update to the roster file
        #[arg(long)]
        save: bool,

        /// Roster file (JSON)
        #[arg(short, long, default_value = "roster.json")]
        roster: PathBuf,
    },

    /// Advance the combat round (or end the session) and apply its effects
    Rounds {
        /// Round before the change
        #[arg(long, default_value = "0", conflicts_with = "end")]
        from: u32,

        /// Round after the change
        #[arg(long, required_unless_present = "end")]
        to: Option<u32>,

        /// End the session instead of changing round
        #[arg(long)]
        end: bool,

        /// Track the round without applying effects
        #[arg(long)]
        observer: bool,

        /// Persist the resulting updates to the roster file
        #[arg(long)]
        save: bool,

        /// Roster file (JSON)
        #[arg(short, long, default_value = "roster.json")]
        roster: PathBuf,
    },

    /// Roll initiative for every actor and show the turn order
    Initiative {
        /// Roster file (JSON)
        #[arg(short, long, default_value = "roster.json")]
        roster: PathBuf,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = match commands::Context::new(cli.config.as_deref(), cli.seed) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Roll { formula, crit } => commands::roll::run(&ctx, &formula, &crit),
        Commands::Sheet { roster, save } => commands::sheet::run(&ctx, &roster, save),
        Commands::Check {
            actor,
            target,
            bonus,
            json,
            roster,
        } => commands::check::run(&ctx, &roster, &actor, &target, bonus, json).await,
        Commands::Use {
            actor,
            item,
            bonus,
            value_bonus,
            consume,
            actions,
            round,
            json,
            save,
            roster,
        } => {
            let args = commands::use_item::UseArgs {
                actor,
                item,
                bonus,
                value_bonus,
                consume,
                actions,
                round,
                json,
                save,
            };
            commands::use_item::run(&ctx, &roster, args).await
        }
        Commands::Move {
            actor,
            round,
            save,
            roster,
        } => commands::use_item::movement(&ctx, &roster, &actor, round, save).await,
        Commands::Hp {
            actor,
            amount,
            save,
            roster,
        } => commands::health::run(&ctx, &roster, &actor, amount, save).await,
        Commands::Rounds {
            from,
            to,
            end,
            observer,
            save,
            roster,
        } => {
            let signal = commands::rounds::signal(from, to, end);
            commands::rounds::run(&ctx, &roster, signal, observer, save).await
        }
        Commands::Initiative { roster } => commands::initiative::run(&ctx, &roster),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
