use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::exit;

use clap::{Parser, Subcommand};
use log::{error, info};

use inventory::{InventoryError, InventoryTracker, ItemRecord, Result, Session};

const DEMO_THRESHOLD: u64 = 10;

#[derive(Parser)]
#[command(name = "inventory", version, about = "An in-memory inventory tracker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the apple and banana walkthrough
    Demo,
    /// Run a script of JSON requests, printing one JSON response per line
    Run {
        /// Script file; reads stdin when omitted
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,
    },
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        error!("{}", e);
        exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Demo => demo(),
        Commands::Run { input } => {
            let mut session = Session::new();
            let stdout = io::stdout().lock();
            match input {
                Some(path) => {
                    info!("Running script {}", path.display());
                    let file = File::open(&path).map_err(|e| {
                        InventoryError::StringError(format!(
                            "Cannot open {}: {}",
                            path.display(),
                            e
                        ))
                    })?;
                    session.run(BufReader::new(file), stdout)?;
                }
                None => {
                    session.run(io::stdin().lock(), stdout)?;
                }
            }
            Ok(())
        }
    }
}

fn demo() -> Result<()> {
    let mut inv = InventoryTracker::new();

    inv.add_item("apple", 50, 0.75);
    inv.add_item("banana", 30, 1.25);
    inv.add_item("apple", 10, 0.80);
    for (name, record) in sorted(&inv) {
        println!("{}: {}", name, record);
    }

    println!("total: {:.2}", inv.total());
    print_most_expensive(&inv);

    println!("remove banana 25: {}", inv.remove_item("banana", 25));
    print_low_stock(&inv);

    println!("remove banana 10: {}", inv.remove_item("banana", 10));
    print_low_stock(&inv);

    println!("remove apple 60: {}", inv.remove_item("apple", 60));
    println!("total: {:.2}", inv.total());
    print_most_expensive(&inv);

    Ok(())
}

fn sorted(inv: &InventoryTracker) -> Vec<(&str, &ItemRecord)> {
    let mut items: Vec<_> = inv.iter().collect();
    items.sort_unstable_by_key(|&(name, _)| name);
    items
}

fn print_most_expensive(inv: &InventoryTracker) {
    match inv.most_expensive() {
        Some(name) => println!("most expensive: {}", name),
        None => println!("most expensive: none"),
    }
}

fn print_low_stock(inv: &InventoryTracker) {
    let names = inv.low_stock(DEMO_THRESHOLD);
    if names.is_empty() {
        println!("low stock (<= {}): none", DEMO_THRESHOLD);
    } else {
        println!("low stock (<= {}): {}", DEMO_THRESHOLD, names.join(", "));
    }
}
