//! Matrium Server - inventory / MRP backend
//!
//! # Module structure
//!
//! ```text
//! server/src/
//! ├── core/          # configuration, state, server bootstrap
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # SQLite pool + repositories
//! ├── inventory/     # stock arithmetic (status, merge, totals)
//! └── utils/         # errors, logging, validation
//! ```
//!
//! The HTTP surface keeps the legacy route names (`/createProduct`,
//! `/getDeliveries`, `/useRecipe/{id}` ...) so existing clients keep
//! working unchanged.

pub mod api;
pub mod core;
pub mod db;
pub mod inventory;
pub mod utils;

// Re-export public types
pub use crate::core::{build_app, Config, Server, ServerState};
pub use crate::utils::{AppError, AppResult};

/// Prepare the process environment: create the working directory layout
/// and install the logger. Production writes daily-rolling log files into
/// the work dir; everything else logs to the console.
pub fn setup_environment(config: &Config) -> anyhow::Result<()> {
    config.ensure_work_dir_structure()?;

    if config.is_production() {
        let logs_dir = config.logs_dir();
        utils::logger::init_logger_with_file(Some(&config.log_level), logs_dir.to_str());
    } else {
        utils::logger::init_logger(&config.log_level);
    }
    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    __  ___      __       _
   /  |/  /___ _/ /______(_)_  ______ ___
  / /|_/ / __ `/ __/ ___/ / / / / __ `__ \
 / /  / / /_/ / /_/ /  / / /_/ / / / / / /
/_/  /_/\__,_/\__/_/  /_/\__,_/_/ /_/ /_/
    "#
    );
}
