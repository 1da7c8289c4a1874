use anyhow::Result;
use colored::Colorize;
use std::time::Instant;

use crate::cargo::{run_step, Step, NO_STD_CRATES, TARGET};

/// Steps of `cargo xtask check`, in order.
pub fn steps() -> Vec<Step> {
    let mut steps = vec![Step::new(
        format!("Checking firmware ({TARGET}, hardware)"),
        &["check", "-p", "firmware", "--target", TARGET, "--features", "hardware"],
    )];
    for krate in NO_STD_CRATES {
        steps.push(Step::new(
            format!("Checking {krate} (no_std)"),
            &["check", "-p", krate, "--target", TARGET, "--no-default-features"],
        ));
    }
    steps.push(Step::new("Checking host build", &["check", "--workspace", "--all-targets"]));
    steps.push(
        Step::new("Running clippy", &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"]).warn_only(),
    );
    steps.push(Step::new("Checking formatting", &["fmt", "--all", "--check"]).warn_only());
    steps
}

pub fn run() -> Result<()> {
    println!();
    println!(
        "{}",
        format!("🔍 Checking {} builds...", platform::config::APP_NAME)
            .cyan()
            .bold()
    );
    println!();

    let total_start = Instant::now();
    for step in steps() {
        run_step(&step)?;
    }

    println!(
        "{}",
        format!(
            "✓ All checks completed in {:.2}s",
            total_start.elapsed().as_secs_f64()
        )
        .green()
        .bold()
    );
    println!();

    Ok(())
}
