// ABOUTME: MacroTracker CLI - command-line front end for the calorie tracking client
// ABOUTME: Handles unit conversion, calorie attribution, and interactive tracking sessions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Convert 1.5 cups of cooked rice to grams
//! macro-cli convert --amount 1.5 --unit cup --to g --food "cooked rice"
//!
//! # Attribute calories for 200 g of a food listed as 50 kcal per 100 g
//! macro-cli calories --amount 200 --unit grams --serving-qty 100 --serving-unit g --calories 50
//!
//! # Interactive session against the configured backend
//! macro-cli session
//!
//! # Interactive session with built-in foods and in-memory accounts
//! macro-cli session --offline
//! ```

mod commands;
mod helpers;

use anyhow::Result;
use clap::{Parser, Subcommand};
use macro_tracker::config::TrackerConfig;
use macro_tracker::external::{
    initialize_shared_client, HttpAuthClient, HttpGoalStore, HttpNutritionClient,
    InMemoryAuthService, InMemoryGoalStore, MockNutritionClient,
};
use macro_tracker::logging::LoggingConfig;
use macro_tracker::models::ServingSpec;
use macro_tracker::session::Session;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "macro-cli",
    about = "MacroTracker calorie tracking CLI",
    long_about = "Convert servings between units, attribute calories, and track meals against a daily goal."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Express an amount of one unit in another
    Convert {
        /// Amount of `unit`
        #[arg(long)]
        amount: f64,

        /// Unit the amount is given in
        #[arg(long)]
        unit: String,

        /// Unit to express the amount in
        #[arg(long)]
        to: String,

        /// Food name used to pick a density for volume to weight
        #[arg(long)]
        food: Option<String>,
    },

    /// Attribute calories for a serving of a food
    Calories {
        /// Amount the user eats
        #[arg(long)]
        amount: f64,

        /// Unit of the amount
        #[arg(long, default_value = "serving")]
        unit: String,

        /// Quantity the food's calories refer to
        #[arg(long)]
        serving_qty: f64,

        /// Unit the food's calories refer to
        #[arg(long)]
        serving_unit: String,

        /// Calories for `serving_qty` of `serving_unit`
        #[arg(long)]
        calories: f64,

        /// Food name (also selects the density hint)
        #[arg(long)]
        food: Option<String>,
    },

    /// Start an interactive tracking session
    Session {
        /// Use built-in foods and in-memory accounts instead of the backend
        #[arg(long)]
        offline: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        "debug".clone_into(&mut logging.level);
    }
    logging.init()?;

    match cli.command {
        Command::Convert {
            amount,
            unit,
            to,
            food,
        } => commands::convert::convert(amount, &unit, &to, food.as_deref())?,
        Command::Calories {
            amount,
            unit,
            serving_qty,
            serving_unit,
            calories,
            food,
        } => {
            let serving = ServingSpec::new(amount, unit)?;
            commands::convert::calories(
                &serving,
                serving_qty,
                &serving_unit,
                calories,
                food.as_deref(),
            )?;
        }
        Command::Session { offline } => {
            let config = TrackerConfig::from_env()?;
            let session = build_session(&config, offline);
            commands::session::run(session).await?;
        }
    }

    Ok(())
}

fn build_session(config: &TrackerConfig, offline: bool) -> Session {
    if offline {
        info!("Starting offline session");
        return Session::new(
            config,
            Arc::new(MockNutritionClient::new()),
            Arc::new(InMemoryAuthService::new()),
            Arc::new(InMemoryGoalStore::new()),
        );
    }

    info!(api_base_url = %config.http.api_base_url, "Starting session");
    initialize_shared_client(&config.http);
    let base_url = &config.http.api_base_url;
    Session::new(
        config,
        Arc::new(HttpNutritionClient::new(base_url.as_str())),
        Arc::new(HttpAuthClient::new(base_url.as_str())),
        Arc::new(HttpGoalStore::new(base_url.as_str())),
    )
}
