// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::Result;
use std::env;
use tracing::info;

use animal_list::logging::{self, Fallback};
use animal_list::{AnimalRepository, Config};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let config = Config::from_env();

    if args.len() > 1 && args[1] == "list" {
        // Print mode
        logging::init(&config, Fallback::Stderr)?;
        run_list()?;
    } else {
        // UI mode (default)
        logging::init(&config, Fallback::Silent)?;
        run_ui_mode()?;
    }

    Ok(())
}

fn run_list() -> Result<()> {
    let repository = AnimalRepository::with_seed_animals();
    info!(count = repository.len(), "printing seed animals");

    let json = serde_json::to_string_pretty(repository.items())?;
    println!("{}", json);

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode() -> Result<()> {
    let repository = AnimalRepository::with_seed_animals();
    info!(version = animal_list::VERSION, count = repository.len(), "starting UI");

    let mut app = ui::App::new(repository);
    ui::run_ui(&mut app)?;

    info!("UI closed");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode() -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or print the list: animal-list list");
    std::process::exit(1);
}
