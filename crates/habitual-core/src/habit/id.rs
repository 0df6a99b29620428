// Session identifier generation.
// Format: 16 ASCII alphanumeric characters.

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Length of a generated session id.
pub const SESSION_ID_LEN: usize = 16;

/// Source of random identifiers.
///
/// Injected into the store so tests can pin the session id.
pub trait IdGenerator: Send + Sync {
    /// Produce a new identifier of `len` characters.
    fn generate(&self, len: usize) -> String;
}

/// Thread-local RNG backed generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn generate(&self, len: usize) -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(len)
            .map(char::from)
            .collect()
    }
}

impl<F> IdGenerator for F
where
    F: Fn(usize) -> String + Send + Sync,
{
    fn generate(&self, len: usize) -> String {
        self(len)
    }
}
