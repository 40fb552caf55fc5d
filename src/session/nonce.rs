use rand::{distributions::Alphanumeric, rngs::OsRng, Rng};

/// Default nonce length requested from the host signing ceremony.
pub const NONCE_LENGTH: usize = 16;

/// Generates an alphanumeric nonce (`[A-Za-z0-9]`) of the given length using
/// the operating system CSPRNG. The nonce anti-replay-protects the signed
/// sign-in message, so it must never come from a seeded generator.
#[must_use]
pub fn generate(length: usize) -> String {
    OsRng
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}
