//! Sync subcommand: full refresh against the habit service.
//!
//! Prints the reconciliation report so callers can see which default
//! habits, if any, had to be recreated.

use super::{open_store, print_json, runtime};

/// Run the sync command.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store()?;
    let rt = runtime()?;

    let (outcome, report) = rt.block_on(store.update_user_info_with_report())?;

    eprintln!("{}", report.message());
    if !outcome.is_applied() {
        eprintln!("service response not applied: {outcome:?}");
    }
    print_json(&report)?;
    Ok(())
}
