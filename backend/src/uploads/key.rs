//! Object key generation

use rand::{rngs::OsRng, RngCore};

/// Prefix shared by every issued object key
pub const KEY_PREFIX: &str = "uploads/";

/// Number of random bytes prepended to the filename (128 bits)
const RANDOM_PREFIX_BYTES: usize = 16;

/// Builds a fresh object key of the form `uploads/<32 hex chars>-<filename>`.
///
/// Uniqueness comes from the random prefix drawn from the OS CSPRNG. The filename is
/// appended verbatim.
#[must_use]
pub fn generate_object_key(filename: &str) -> String {
    let mut random_prefix = [0u8; RANDOM_PREFIX_BYTES];
    OsRng.fill_bytes(&mut random_prefix);

    format!("{KEY_PREFIX}{}-{filename}", hex::encode(random_prefix))
}
