//! Habit management commands for CLI.

use clap::Subcommand;
use habitual_core::habit::is_default_id;
use habitual_core::SyncOutcome;

use super::{open_store, print_json, runtime};

#[derive(Subcommand)]
pub enum HabitAction {
    /// Refresh and list all habits
    List,
    /// Create a new habit
    Create {
        /// Habit name
        name: String,
    },
    /// Rename a habit
    Rename {
        /// Habit ID
        id: String,
        /// New name
        name: String,
    },
    /// Delete a habit
    Delete {
        /// Habit ID
        id: String,
    },
}

pub fn run(action: HabitAction) -> Result<(), Box<dyn std::error::Error>> {
    if let HabitAction::Delete { id } = &action {
        if let Some(notice) = default_delete_notice(id) {
            eprintln!("{notice}");
        }
    }

    let store = open_store()?;
    let rt = runtime()?;

    let outcome = rt.block_on(async {
        match action {
            HabitAction::List => store.update_user_info().await,
            HabitAction::Create { name } => store.create_habit(&name, None).await,
            HabitAction::Rename { id, name } => store.rename_habit(&id, &name).await,
            HabitAction::Delete { id } => store.delete_habit(&id).await,
        }
    })?;

    if let SyncOutcome::Unchanged(reason) = outcome {
        eprintln!("service response not applied: {reason:?}");
    }
    print_json(&store.habits())?;
    Ok(())
}

/// Deleted defaults come back on the next refresh.
fn default_delete_notice(id: &str) -> Option<String> {
    is_default_id(id).then(|| {
        format!("note: {id} is a default habit and will be restored on the next refresh")
    })
}
