//! Cheap structural check for stored password hashes.

/// `$argon2id$v=19$t=1,m=1,p=1$`: markers, separators and one digit per
/// parameter.
const FIXED_OVERHEAD: usize = 27;

/// Unpadded base64 length of a 16 byte salt.
const MIN_SALT_CHARS: usize = 22;

/// Unpadded base64 length of a 16 byte key.
const MIN_KEY_CHARS: usize = 22;

/// Shortest string that can hold the fixed overhead, a 16 byte salt, the
/// separator before the key and a 16 byte key.
pub const MIN_HASH_LEN: usize = FIXED_OVERHEAD + MIN_SALT_CHARS + 1 + MIN_KEY_CHARS;

const REQUIRED_MARKERS: [&str; 5] = ["$argon2id$", "$v=", "$t=", ",m=", ",p="];

const EMPTY_FIELD_MARKERS: [&str; 3] = ["=$", "=,", "$$"];

/// Whether `hash` has the shape of an encoded Argon2id hash.
///
/// Only structure is checked; numeric fields and base64 are parsed later.
#[must_use]
pub fn is_well_formed(hash: &str) -> bool {
    hash.len() >= MIN_HASH_LEN
        && hash.matches('$').count() == 5
        && REQUIRED_MARKERS.iter().all(|marker| hash.contains(marker))
        && !EMPTY_FIELD_MARKERS.iter().any(|marker| hash.contains(marker))
        && !hash.ends_with('$')
}
