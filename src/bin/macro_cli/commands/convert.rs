// ABOUTME: One-shot conversion commands for macro-cli
// ABOUTME: Normalizes a serving between units and attributes calories without a backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use macro_tracker::errors::AppResult;
use macro_tracker::intelligence::{CalorieAttributor, UnitConverter, UnitKind};
use macro_tracker::models::{FoodRecord, ServingSpec};

use crate::helpers::display::describe_method;

/// Print `amount` of `unit` expressed in `to`
pub fn convert(amount: f64, unit: &str, to: &str, food: Option<&str>) -> AppResult<()> {
    let serving = ServingSpec::new(amount, unit)?;
    let converter = UnitConverter::default();

    match converter.normalize(serving.amount, &serving.unit, to, food) {
        Ok(normalized) => {
            println!("{} = {normalized:.4} {to}", serving.display());
        }
        Err(failure) => {
            println!(
                "Cannot convert {} ({:?}) to {to} ({:?}): {failure}",
                serving.display(),
                UnitKind::of(&serving.unit),
                UnitKind::of(to)
            );
        }
    }
    Ok(())
}

/// Print the calories for a serving of a food described on the command line
pub fn calories(
    serving: &ServingSpec,
    serving_qty: f64,
    serving_unit: &str,
    calories_per_serving: f64,
    food: Option<&str>,
) -> AppResult<()> {
    let record = FoodRecord::new(
        food.unwrap_or("food"),
        serving_qty,
        serving_unit,
        calories_per_serving,
    )?;
    let attribution = CalorieAttributor::default().attribute(serving, &record);

    println!(
        "{} of {} = {} cal",
        serving.display(),
        record.name,
        attribution.calories
    );
    println!("   method: {}", describe_method(&attribution));
    Ok(())
}
