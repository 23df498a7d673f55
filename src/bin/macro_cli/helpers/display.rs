// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Output formatting helpers for macro-cli
// ABOUTME: Provides consistent display functions for attribution results and daily summaries

use chrono::Local;
use macro_tracker::intelligence::{AttributionMethod, CalorieAttribution, FallbackReason};
use macro_tracker::session::DailySummary;
use macro_tracker::tracking::LedgerSnapshot;

/// Describe how a calorie value was derived
pub fn describe_method(attribution: &CalorieAttribution) -> String {
    match &attribution.method {
        AttributionMethod::UnitScaled { normalized_amount } => {
            format!("scaled by unit conversion ({normalized_amount:.3} base units)")
        }
        AttributionMethod::ServingMultiplier { reason } => match reason {
            FallbackReason::Conversion { failure } => {
                format!("serving multiplier ({failure})")
            }
            FallbackReason::InvalidServingQuantity => {
                "serving multiplier (food has no usable serving quantity)".to_owned()
            }
        },
    }
}

/// Print the ledger grouped by meal followed by the goal summary
pub fn display_summary(snapshot: &LedgerSnapshot, summary: &DailySummary) {
    println!("{}", "=".repeat(50));
    match &summary.username {
        Some(username) => println!("Welcome, {username}!"),
        None => println!("Welcome, Guest!"),
    }
    println!("{}", summary.status);
    println!(
        "Goal: {} | Eaten: {} | Remaining: {} | {:.0}%",
        summary.goal,
        summary.eaten,
        summary.remaining,
        summary.fraction_consumed * 100.0
    );
    println!("{}", "=".repeat(50));

    for (meal, entries) in &snapshot.meals {
        println!("{}:", meal.label());
        if entries.is_empty() {
            println!("   (nothing logged)");
        }
        for entry in entries {
            println!(
                "   [{}] {} - {} cal ({})",
                entry.logged_at.with_timezone(&Local).format("%H:%M"),
                entry.name,
                entry.calories,
                entry.serving
            );
        }
    }
}

/// Print the interactive command reference
pub fn display_help() {
    println!("Commands:");
    println!("  suggest <query>                          autocomplete food names");
    println!("  log <meal> [<amount> [<unit>]] <food...> look up a food and log it");
    println!("  goal <calories>                          set the daily goal");
    println!("  clear                                    clear all logged foods");
    println!("  summary                                  show meals and totals");
    println!("  register <user> <password> <confirm>     create an account and sign in");
    println!("  login <user> <password>                  sign in");
    println!("  logout                                   sign out");
    println!("  help                                     show this list");
    println!("  quit                                     leave the session");
    println!();
    println!("Meals: breakfast, lunch, dinner, snacks. Units: g, oz, lb, ml, cup, tbsp, tsp, serving, ...");
}
