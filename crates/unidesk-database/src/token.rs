//! Random concurrency tokens.

use rand::Rng;

use unidesk_core::traits::TokenGenerator;

/// Number of random bytes per token.
const TOKEN_BYTES: usize = 32;

/// Generates 64-character lowercase hex tokens from the thread RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct HexTokenGenerator;

impl HexTokenGenerator {
    /// Create a new generator.
    pub fn new() -> Self {
        Self
    }
}

impl TokenGenerator for HexTokenGenerator {
    fn generate(&self) -> String {
        let mut rng = rand::thread_rng();
        let bytes: [u8; TOKEN_BYTES] = rng.r#gen();
        hex::encode(bytes)
    }
}
