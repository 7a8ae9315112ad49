//! Lyra - inspect and maintain the local vault state
//!
//! Reads the persisted vault snapshot from the Lyra config directory.
//!
//! Commands:
//! - `status` (default): print a summary of the snapshot
//! - `reset-key`: forget the stored session
//! - `clear-errors`: empty the error log

use anyhow::{Context, Result, bail};
use log::{error, info};
use std::path::Path;
use vault::actions::reset_key;
use vault::{Action, Store, VaultConfig, VaultState};

mod report;

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    // Bootstrap config directory
    if let Err(e) = config::init() {
        error!("Failed to initialize config directory: {}", e);
    }

    if let Err(e) = run() {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cfg = VaultConfig::load()?;
    let path = cfg
        .state_path()
        .context("Could not determine config directory")?;
    let store = Store::from_state(load_state(&path)?);

    match std::env::args().nth(1).as_deref() {
        None | Some("status") => {
            print!("{}", report::render_status(&store.snapshot(), &cfg));
        }
        Some("reset-key") => {
            store.dispatch(reset_key());
            config::save_json_file(&path, &store.snapshot())?;
            info!("Session cleared");
        }
        Some("clear-errors") => {
            store.dispatch(Action::ClearErrors);
            config::save_json_file(&path, &store.snapshot())?;
            info!("Error log cleared");
        }
        Some(other) => bail!("Unknown command: {} (expected status, reset-key or clear-errors)", other),
    }

    Ok(())
}

fn load_state(path: &Path) -> Result<VaultState> {
    if !path.exists() {
        info!("No vault snapshot at {}, starting empty", path.display());
        return Ok(VaultState::default());
    }
    config::load_json_file(path)
}
