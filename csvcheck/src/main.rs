//! Checks a `;`-delimited UTF-16 CSV export against per-column regex
//! patterns and logs the indices of the rows that fail. Path and patterns
//! come from `csvcheck.toml` (see [`settings::Settings`]).

mod settings;

use std::process::ExitCode;

use anyhow::{bail, Context as _};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use csvcheck::{read_rows, ColumnChecks};

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "check failed");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let settings = settings::Settings::new().context("failed to load settings")?;
    if settings.columns.is_empty() {
        bail!("no column patterns configured");
    }

    let checks = ColumnChecks::compile(
        settings
            .columns
            .iter()
            .map(|c| (c.name.as_str(), c.pattern.as_str())),
    )?;

    let rows = read_rows(&settings.path)?;
    let invalid = checks.find_invalid(&rows);

    if invalid.is_empty() {
        tracing::info!(rows = rows.len(), path = %settings.path, "all rows valid");
    } else {
        tracing::warn!(?invalid, path = %settings.path, "invalid rows");
    }
    Ok(())
}
