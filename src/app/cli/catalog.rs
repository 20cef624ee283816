//! List and show command implementations.

use std::path::Path;

use crate::domain::AppError;

pub fn run_list(config: Option<&Path>) -> Result<(), AppError> {
    let summaries = crate::app::api::list_worlds(config)?;
    let width = summaries.iter().map(|summary| summary.name.len()).max().unwrap_or(0);

    for summary in &summaries {
        match (&summary.world_type, &summary.error) {
            (Some(world_type), _) => println!(
                "{:width$}  {:<16}  {} ({})",
                summary.name,
                world_type,
                summary.description.as_deref().unwrap_or_default(),
                summary.origin,
                width = width
            ),
            (None, Some(error)) => {
                println!("{:width$}  ⚠️  invalid: {} ({})", summary.name, error, summary.origin, width = width)
            }
            (None, None) => println!("{:width$}  ({})", summary.name, summary.origin, width = width),
        }
    }
    Ok(())
}

pub fn run_show(name: &str, config: Option<&Path>) -> Result<(), AppError> {
    let document = crate::app::api::show_world(name, config)?;
    print!("{}", document.content);
    if !document.content.ends_with('\n') {
        println!();
    }
    Ok(())
}
