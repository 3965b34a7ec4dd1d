mod config;
mod error;
mod io;
mod netting;
mod types;
mod utils;

use std::path::Path;

use config::load_settings;
use io::{load_transactions, render_report};
use netting::{accumulate, net};

pub use error::SettleError;

/// Runs the full pipeline: settings, ledger, accumulation, netting, report.
///
/// Skipped rows and unknown participants surface as warnings on the
/// diagnostic channel; only the finished report is returned.
pub fn settle_expenses(ledger_path: &Path, config_path: &Path) -> Result<String, SettleError> {
    let settings = load_settings(config_path)?;
    let roster = settings.roster()?;

    let (transactions, row_warnings) =
        load_transactions(ledger_path, settings.split_column_index)?;
    for warning in &row_warnings {
        tracing::warn!("{warning}");
    }

    let (matrix, engine_warnings) = accumulate(Box::new(transactions.into_iter()), &roster)?;
    for warning in &engine_warnings {
        tracing::warn!("{warning}");
    }

    let settlement = net(&matrix, &roster);
    Ok(render_report(&settlement))
}
