//! Shared helpers for running cargo steps with coloured status lines.

use anyhow::{Context, Result};
use colored::Colorize;
use std::process::{Command, Output};
use std::time::Instant;

/// Cortex-M3 target of the STM32F103.
pub const TARGET: &str = "thumbv7m-none-eabi";

/// probe-rs chip name.
pub const CHIP: &str = "STM32F103C8";

/// Library crates that must stay `no_std`.
pub const NO_STD_CRATES: [&str; 3] = ["platform", "menu", "pages"];

/// How a failing step affects the whole command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnFailure {
    /// Abort the command.
    Fail,
    /// Print the output and carry on.
    Warn,
}

/// One cargo invocation with a label for the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub label: String,
    pub args: Vec<String>,
    pub on_failure: OnFailure,
}

impl Step {
    pub fn new(label: impl Into<String>, args: &[&str]) -> Self {
        Self {
            label: label.into(),
            args: args.iter().map(|a| (*a).to_string()).collect(),
            on_failure: OnFailure::Fail,
        }
    }

    pub fn warn_only(mut self) -> Self {
        self.on_failure = OnFailure::Warn;
        self
    }
}

/// Run `cargo` with `args` and capture its output.
pub fn cargo(args: &[String]) -> Result<Output> {
    Command::new("cargo")
        .args(args)
        .output()
        .with_context(|| format!("Failed to run cargo {}", args.join(" ")))
}

/// Run a step, print its outcome and return its stdout.
///
/// Returns `Ok(None)` for a warn-only step that failed.
pub fn run_step(step: &Step) -> Result<Option<String>> {
    println!("{}", format!("  {}...", step.label).cyan());
    let start = Instant::now();
    let output = cargo(&step.args)?;
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();

    if output.status.success() {
        let summary = test_summary(&stdout).map(|s| format!(" ({s})")).unwrap_or_default();
        println!(
            "{}",
            format!(
                "  ✓ {}{} in {:.2}s",
                step.label,
                summary,
                start.elapsed().as_secs_f64()
            )
            .green()
        );
        println!();
        return Ok(Some(stdout));
    }

    match step.on_failure {
        OnFailure::Fail => {
            eprintln!("{}", format!("  ✗ {} failed", step.label).red().bold());
            eprintln!();
            eprintln!("{}", String::from_utf8_lossy(&output.stderr));
            for line in stdout.lines() {
                eprintln!("  {line}");
            }
            anyhow::bail!("{} failed", step.label);
        }
        OnFailure::Warn => {
            eprintln!("{}", format!("  ⚠ {} reported problems", step.label).yellow().bold());
            eprintln!("{}", String::from_utf8_lossy(&output.stderr));
            println!();
            Ok(None)
        }
    }
}

/// The text after `test result:` on the last summary line, if any.
pub fn test_summary(output: &str) -> Option<String> {
    output
        .lines()
        .filter_map(|line| line.split("test result:").nth(1))
        .last()
        .map(|s| s.trim().to_string())
}

/// Path of the firmware ELF for the given profile.
pub fn firmware_elf(release: bool) -> String {
    let profile = if release { "release" } else { "debug" };
    format!("target/{TARGET}/{profile}/firmware")
}
