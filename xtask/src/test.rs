use anyhow::Result;
use colored::Colorize;
use std::time::Instant;

use crate::cargo::{run_step, Step};

/// Steps of `cargo xtask test` for the given filters.
pub fn steps(unit_only: bool, integration_only: bool) -> Vec<Step> {
    let mut steps = Vec::new();
    if !integration_only {
        steps.push(Step::new("Unit tests", &["test", "--lib", "--workspace"]));
    }
    if !unit_only {
        steps.push(Step::new(
            "Integration tests",
            &["test", "--tests", "--workspace"],
        ));
    }
    if !unit_only && !integration_only {
        steps.push(Step::new("Doc tests", &["test", "--doc", "--workspace"]).warn_only());
    }
    steps
}

pub fn run(unit_only: bool, integration_only: bool) -> Result<()> {
    println!();
    println!("{}", "🧪 Running tests...".cyan().bold());
    println!();

    let total_start = Instant::now();
    for step in steps(unit_only, integration_only) {
        run_step(&step)?;
    }

    println!(
        "{}",
        format!(
            "✓ All tests completed in {:.2}s",
            total_start.elapsed().as_secs_f64()
        )
        .green()
        .bold()
    );
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(steps: &[Step]) -> Vec<&str> {
        steps.iter().map(|s| s.label.as_str()).collect()
    }

    #[test]
    fn filters_select_the_test_kinds() {
        assert_eq!(labels(&steps(false, false)), ["Unit tests", "Integration tests", "Doc tests"]);
        assert_eq!(labels(&steps(true, false)), ["Unit tests"]);
        assert_eq!(labels(&steps(false, true)), ["Integration tests"]);
    }
}
