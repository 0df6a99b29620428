//! The fixed catalog of default habits every user must have.

use super::Habit;

/// A reserved default habit: fixed id, fixed initial name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultHabit {
    pub id: &'static str,
    pub name: &'static str,
}

impl DefaultHabit {
    pub fn to_habit(&self) -> Habit {
        Habit::new(self.id, self.name)
    }
}

/// Default habits, in the order they are seeded.
pub const DEFAULT_HABITS: [DefaultHabit; 5] = [
    DefaultHabit {
        id: "habit_talk",
        name: "Talk to humans for 30 mins",
    },
    DefaultHabit {
        id: "habit_meditate",
        name: "Meditate for 30 mins",
    },
    DefaultHabit {
        id: "habit_exercise",
        name: "Exercise for 30 mins",
    },
    DefaultHabit {
        id: "habit_sleep",
        name: "Sleep 8 hours",
    },
    DefaultHabit {
        id: "habit_fast",
        name: "Fast for 14+ hours",
    },
];

/// The catalog as habit records with no completions.
pub fn default_habits() -> Vec<Habit> {
    DEFAULT_HABITS.iter().map(DefaultHabit::to_habit).collect()
}

/// Whether `id` is one of the reserved default ids.
pub fn is_default_id(id: &str) -> bool {
    DEFAULT_HABITS.iter().any(|d| d.id == id)
}
