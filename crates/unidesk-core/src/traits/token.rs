//! Concurrency token generation.

/// Produces fresh, unpredictable guids.
pub trait TokenGenerator: Send + Sync + 'static {
    /// Generate a new token. Tokens are never reused.
    fn generate(&self) -> String;
}
