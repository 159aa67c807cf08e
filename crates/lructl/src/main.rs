//! lructl - command-line driver for the lrucache LRU cache

mod command;
mod handler;

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use lrucache::LruCache;
use tracing::{info, warn};

use crate::command::Command;
use crate::handler::{CommandHandler, Reply};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Cache capacity (number of entries)
    #[arg(short, long, default_value_t = 3)]
    capacity: usize,

    /// Run the reference walkthrough and exit
    #[arg(long)]
    demo: bool,

    /// Print `show` output as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    info!("Starting lructl v{}", env!("CARGO_PKG_VERSION"));
    info!("Cache capacity: {}", args.capacity);

    if args.demo {
        return run_demo(args.capacity);
    }

    let cache = LruCache::new(args.capacity).context("failed to create cache")?;
    run_repl(CommandHandler::new(cache), args.json)
}

/// Walk through eviction and promotion on a small integer cache.
fn run_demo(capacity: usize) -> Result<()> {
    let mut cache = LruCache::new(capacity).context("failed to create cache")?;

    println!("=== LRU Cache Demo ===\n");

    cache.put(1, 100);
    cache.put(2, 200);
    cache.put(3, 300);
    println!("After adding 1,2,3: {}", cache);

    println!("Get key=1: {}", show(cache.get(&1)));
    println!("After get(1): {}", cache);

    cache.put(4, 400);
    println!("After adding 4: {}", cache);

    println!("Get key=2 (evicted): {}", show(cache.get(&2)));

    cache.put(1, 111);
    println!("After updating 1: {}", cache);

    Ok(())
}

fn show(value: Option<&i32>) -> String {
    value.map_or_else(|| "miss".to_string(), i32::to_string)
}

fn run_repl(mut handler: CommandHandler, json: bool) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;

        let cmd = match Command::parse(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(e) => {
                warn!("Parse error: {}", e);
                writeln!(stdout, "{}", e)?;
                continue;
            }
        };

        let reply = handler.handle(cmd);
        writeln!(stdout, "{}", reply.render(json)?)?;
        stdout.flush()?;

        if reply == Reply::Quit {
            break;
        }
    }

    info!("Exiting with {} cached entries", handler.cache().len());
    Ok(())
}
