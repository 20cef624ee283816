//! Create and plan command implementations.

use std::path::Path;

use serde::Serialize;

use crate::app::api::{CancelFlag, CreateOutcome, PlanOutcome, ScaffoldRequest};
use crate::domain::{AppError, ExecutionStatus};

pub fn run_create(
    world: &str,
    request: ScaffoldRequest,
    config: Option<&Path>,
    json: bool,
) -> Result<i32, AppError> {
    let outcome = crate::app::api::create_world(world, request, config, &CancelFlag::new())?;

    if json {
        print_json(&outcome)?;
    } else {
        print_create_report(&outcome);
    }
    Ok(outcome.exit_code())
}

pub fn run_plan(
    world: &str,
    request: ScaffoldRequest,
    config: Option<&Path>,
    json: bool,
) -> Result<(), AppError> {
    let outcome = crate::app::api::plan_world(world, request, config)?;

    if json {
        return print_json(&outcome);
    }
    print_plan(&outcome);
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|err| AppError::ParseError { what: "JSON output".into(), details: err.to_string() })?;
    println!("{}", rendered);
    Ok(())
}

fn print_plan(outcome: &PlanOutcome) {
    println!("Plan for {} at {} ({} operations)", outcome.name, outcome.plan.root.display(), outcome.plan.len());
    for (index, operation) in outcome.plan.operations.iter().enumerate() {
        println!("  {:>3}. {}", index + 1, operation);
    }
    println!("digest: sha256:{}", outcome.digest);
}

fn print_create_report(outcome: &CreateOutcome) {
    let result = &outcome.result;
    let root = outcome.planned.plan.root.display();

    match result.status {
        ExecutionStatus::Committed if result.partial_failures.is_empty() => {
            println!(
                "✅ Created {} ({}) at {}: {} new, {} existing",
                outcome.planned.name,
                outcome.planned.world.world_type,
                root,
                result.created_paths.len(),
                result.reused_paths.len()
            );
        }
        ExecutionStatus::Committed => {
            println!(
                "⚠️  Created {} at {} with {} failure(s)",
                outcome.planned.name,
                root,
                result.partial_failures.len()
            );
            for failure in &result.partial_failures {
                eprintln!("  • {}", failure);
            }
        }
        ExecutionStatus::RolledBack => {
            eprintln!("❌ Creation of {} rolled back", outcome.planned.name);
            if let Some(operation) = &result.failed_op {
                eprintln!("  failed at: {}", operation);
            }
            if let Some(cause) = &result.cause {
                eprintln!("  cause: {}", cause);
            }
            eprintln!("  removed {} director(ies)", result.removed_count());
        }
        ExecutionStatus::PartiallyFailed => {
            eprintln!("❌ Creation of {} failed and was not fully cleaned up", outcome.planned.name);
            if let Some(cause) = &result.cause {
                eprintln!("  cause: {}", cause);
            }
            for leaked in &result.leaked_paths {
                eprintln!("  left behind: {}", leaked);
            }
        }
    }

    for (path, reason) in &result.ownership_skipped {
        eprintln!("  ownership not changed for {}: {}", path.display(), reason);
    }
}
