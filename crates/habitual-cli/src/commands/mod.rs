pub mod config;
pub mod habit;
pub mod sync;

use habitual_core::error::Result;
use habitual_core::{Config, HabitStore};
use serde::Serialize;

/// Build a store against the configured service.
pub(crate) fn open_store() -> Result<HabitStore> {
    let config = Config::load()?;
    tracing::debug!(base_url = %config.service.base_url, "opening habit store");
    Ok(HabitStore::from_config(&config)?)
}

/// Runtime for a single command.
pub(crate) fn runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}

/// Print `value` as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
