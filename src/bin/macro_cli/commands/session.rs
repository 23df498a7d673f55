// ABOUTME: Interactive line-oriented tracking session for macro-cli
// ABOUTME: Parses text commands from stdin and drives the library Session
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use macro_tracker::errors::{AppError, AppResult};
use macro_tracker::models::{MealBucket, ServingSpec};
use macro_tracker::session::Session;
use macro_tracker::tracking::GoalPersistence;
use std::io::{stdout, Write};
use std::slice;
use tokio::io::{stdin, AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::helpers::display::{display_help, display_summary};

/// One parsed input line
#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    /// Autocomplete food names
    Suggest(String),
    /// Look up and log a food
    Log {
        /// Target meal
        meal: MealBucket,
        /// Requested serving
        serving: ServingSpec,
        /// Food query
        query: String,
    },
    /// Set the daily goal
    Goal(u32),
    /// Clear all logged foods
    Clear,
    /// Show meals and totals
    Summary,
    /// Create an account
    Register {
        /// Account name
        username: String,
        /// Password
        password: String,
        /// Password confirmation
        confirm: String,
    },
    /// Sign in
    Login {
        /// Account name
        username: String,
        /// Password
        password: String,
    },
    /// Sign out
    Logout,
    /// Show the command list
    Help,
    /// Leave the session
    Quit,
    /// Blank line
    Empty,
}

fn usage(text: &str) -> AppError {
    AppError::invalid_input(format!("Usage: {text}"))
}

/// Parse one input line
///
/// # Errors
///
/// Returns `InvalidInput` with a usage line for malformed commands
pub fn parse_line(line: &str) -> AppResult<ReplCommand> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(ReplCommand::Empty);
    };
    let rest: Vec<&str> = words.collect();

    match command.to_lowercase().as_str() {
        "suggest" => Ok(ReplCommand::Suggest(rest.join(" "))),
        "log" => parse_log(&rest),
        "goal" => {
            let [value] = rest.as_slice() else {
                return Err(usage("goal <calories>"));
            };
            let goal = value
                .parse::<u32>()
                .map_err(|_| AppError::invalid_input("Calorie goal must be a positive number"))?;
            Ok(ReplCommand::Goal(goal))
        }
        "clear" => Ok(ReplCommand::Clear),
        "summary" => Ok(ReplCommand::Summary),
        "register" => {
            let [username, password, confirm] = rest.as_slice() else {
                return Err(usage("register <user> <password> <confirm>"));
            };
            Ok(ReplCommand::Register {
                username: (*username).to_owned(),
                password: (*password).to_owned(),
                confirm: (*confirm).to_owned(),
            })
        }
        "login" => {
            let [username, password] = rest.as_slice() else {
                return Err(usage("login <user> <password>"));
            };
            Ok(ReplCommand::Login {
                username: (*username).to_owned(),
                password: (*password).to_owned(),
            })
        }
        "logout" => Ok(ReplCommand::Logout),
        "help" | "?" => Ok(ReplCommand::Help),
        "quit" | "exit" => Ok(ReplCommand::Quit),
        other => Err(AppError::invalid_input(format!(
            "Unknown command '{other}'. Type 'help' for the command list."
        ))),
    }
}

/// `log <meal> [<amount> [<unit>]] <food...>`
///
/// A leading number is always the amount. With a single food word after it the
/// unit defaults to "serving"; a number with no food after it is rejected.
fn parse_log(words: &[&str]) -> AppResult<ReplCommand> {
    const LOG_USAGE: &str = "log <meal> [<amount> [<unit>]] <food...>";

    let Some((meal, rest)) = words.split_first() else {
        return Err(usage(LOG_USAGE));
    };
    let meal: MealBucket = meal.parse()?;

    let Some((first, after_amount)) = rest.split_first() else {
        return Ok(ReplCommand::Log {
            meal,
            serving: ServingSpec::default(),
            query: String::new(),
        });
    };
    let (serving, food_words) = match first.parse::<f64>() {
        Err(_) => (ServingSpec::default(), rest),
        Ok(amount) => match after_amount {
            [] => return Err(usage(LOG_USAGE)),
            [food] => (
                ServingSpec::new(amount, ServingSpec::default().unit)?,
                slice::from_ref(food),
            ),
            [unit, food @ ..] => (ServingSpec::new(amount, *unit)?, food),
        },
    };

    Ok(ReplCommand::Log {
        meal,
        serving,
        query: food_words.join(" "),
    })
}

/// Run commands from stdin until `quit` or end of input
pub async fn run(mut session: Session) -> AppResult<()> {
    println!("Welcome to MacroTracker. Type 'help' for commands.");
    let mut lines = BufReader::new(stdin()).lines();

    loop {
        print!("> ");
        stdout()
            .flush()
            .map_err(|e| AppError::internal("stdout flush failed").with_source(e))?;

        let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| AppError::internal("stdin read failed").with_source(e))?
        else {
            break;
        };

        let command = match parse_line(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e.message);
                continue;
            }
        };
        debug!(?command, "repl command");

        if command == ReplCommand::Quit {
            break;
        }
        if let Err(e) = execute(&mut session, command).await {
            println!("{}", e.message);
        }
    }

    Ok(())
}

async fn execute(session: &mut Session, command: ReplCommand) -> AppResult<()> {
    match command {
        ReplCommand::Suggest(query) => {
            let names = session.suggestions(&query).await;
            if names.is_empty() {
                println!("No suggestions.");
            }
            for name in names {
                println!("   {name}");
            }
        }
        ReplCommand::Log {
            meal,
            serving,
            query,
        } => {
            let outcome = session.search_and_log(meal, &query, &serving).await?;
            println!("{}", outcome.message);
        }
        ReplCommand::Goal(value) => match session.set_goal(value).await? {
            GoalPersistence::LocalOnly => println!("Goal set to {value}. Sign in to save it."),
            GoalPersistence::Persisted => println!("Goal set to {value} and saved."),
            GoalPersistence::Failed => println!("Goal set to {value}."),
        },
        ReplCommand::Clear => {
            session.clear_all()?;
            println!("Cleared all logged foods.");
        }
        ReplCommand::Summary => {
            display_summary(&session.snapshot()?, &session.summary()?);
        }
        ReplCommand::Register {
            username,
            password,
            confirm,
        } => {
            session.register(&username, &password, &confirm).await?;
            println!("Welcome, {username}!");
        }
        ReplCommand::Login { username, password } => {
            session.login(&username, &password).await?;
            println!("Welcome, {username}!");
            println!("{}", session.summary()?.status);
        }
        ReplCommand::Logout => {
            session.logout()?;
            println!("Signed out.");
        }
        ReplCommand::Help => display_help(),
        ReplCommand::Quit | ReplCommand::Empty => {}
    }
    Ok(())
}
