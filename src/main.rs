// src/main.rs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flashcard_trainer::config::{Config, StoreBackend};
use flashcard_trainer::deck::load_deck;
use flashcard_trainer::{Item, ResponseType, Scheduler};
use log::{error, info};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "flashcard-trainer", about = "Flashcard drills with priority scheduling", version)]
struct Cli {
    /// Where historical stats are kept
    #[arg(long, global = true, env = "FLASHCARD_STORE")]
    store: Option<PathBuf>,

    /// Storage backend for historical stats
    #[arg(long, global = true, env = "FLASHCARD_BACKEND", value_enum, default_value = "json")]
    backend: StoreBackend,

    /// Fixed seed for the session clock
    #[arg(long, global = true)]
    seed: Option<i64>,

    /// Only save at the end of a quiz instead of after every answer
    #[arg(long, global = true)]
    no_autosave: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run an interactive quiz over a deck
    Quiz {
        /// JSON deck file
        #[arg(long)]
        deck: PathBuf,
        /// Number of cards to ask
        #[arg(long, default_value_t = 20)]
        rounds: usize,
    },

    /// Print the cards in the order they would be shown
    Next {
        #[arg(long)]
        deck: PathBuf,
        #[arg(short = 'n', long, default_value_t = 10)]
        count: usize,
    },

    /// Show lifetime stats for every card in a deck
    Stats {
        #[arg(long)]
        deck: PathBuf,
    },

    /// Zero all counters, keeping importance weights
    Reset,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            backend: self.backend,
            store_path: self.store.clone(),
            seed: self.seed,
            autosave: !self.no_autosave,
        }
    }
}

fn open_scheduler(config: &Config) -> Result<Scheduler> {
    let store = config
        .open_store()
        .with_context(|| format!("failed to open store {:?}", config.resolved_store_path()))?;
    let mut scheduler = match config.seed {
        Some(seed) => Scheduler::with_seed(store, seed),
        None => Scheduler::open(store),
    };
    scheduler.set_autosave(config.autosave);
    Ok(scheduler)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.config();
    info!("Starting flashcard trainer (backend {:?})...", config.backend);

    let mut scheduler = open_scheduler(&config)?;

    match cli.command {
        Command::Quiz { deck, rounds } => {
            let deck = load_deck(&deck).with_context(|| format!("failed to read deck {:?}", deck))?;
            run_quiz(&mut scheduler, &deck, rounds)?;
        }
        Command::Next { deck, count } => {
            let deck = load_deck(&deck).with_context(|| format!("failed to read deck {:?}", deck))?;
            for (rank, item) in scheduler.sort_by_priority(deck).iter().take(count).enumerate() {
                let score = scheduler
                    .session_stats(item)
                    .map_or(0.0, |s| s.priority_score);
                println!("{:>3}. {} -> {}  (priority {:.1})", rank + 1, item.front, item.back, score);
            }
        }
        Command::Stats { deck } => {
            let deck = load_deck(&deck).with_context(|| format!("failed to read deck {:?}", deck))?;
            for item in deck.iter().flatten() {
                println!("{} -> {}", item.front, item.back);
                println!("  {}", scheduler.get_stats_display(item).replace('\n', "\n  "));
            }
        }
        Command::Reset => {
            scheduler.reset_stats().context("failed to reset stats")?;
            println!("All stats reset. Importance weights kept.");
        }
    }

    Ok(())
}

fn run_quiz(scheduler: &mut Scheduler, deck: &[Option<Item>], rounds: usize) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    for round in 1..=rounds {
        let ordered = scheduler.sort_by_priority(deck.to_vec());
        let Some(item) = ordered.into_iter().next() else {
            println!("Deck is empty.");
            break;
        };

        println!("\n[{}/{}] {}", round, rounds, item.front);
        if prompt(&mut lines, "  (press enter to reveal) ")?.is_none() {
            break;
        }
        println!("  {}", item.back);

        let response = loop {
            let Some(answer) = prompt(&mut lines, "  [c]orrect / [s]orta / [i]ncorrect / [q]uit: ")? else {
                break None;
            };
            if answer.trim().eq_ignore_ascii_case("q") {
                break None;
            }
            match answer.parse::<ResponseType>() {
                Ok(response) => break Some(response),
                Err(e) => println!("  {}", e),
            }
        };
        let Some(response) = response else {
            break;
        };

        // A failed autosave is already logged; memory keeps the answer.
        if let Err(e) = scheduler.update_stats(&item, response) {
            error!("Answer recorded but not saved: {}", e);
        }
        println!("  {}", scheduler.get_stats_display(&item).replace('\n', "\n  "));
    }

    scheduler.save_stats().context("failed to save stats")?;
    Ok(())
}

fn prompt<B: BufRead>(lines: &mut io::Lines<B>, text: &str) -> Result<Option<String>> {
    print!("{}", text);
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(Some(line?)),
        None => Ok(None),
    }
}
