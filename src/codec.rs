//! Codec primitives shared by the token codec and the secret store.

use base64::{DecodeError, Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use sha2::Sha512;
use subtle::ConstantTimeEq;

use crate::random::RandomSource;

/// Length in bytes of an HMAC-SHA512 tag.
pub const HMAC_SHA512_BYTES: usize = 64;

type HmacSha512 = Hmac<Sha512>;

/// Encode bytes as unpadded base64url.
#[must_use]
pub fn encode(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Strictly decode an unpadded base64url segment.
///
/// Padding, characters from the standard alphabet and non-canonical trailing
/// bits are all rejected.
///
/// # Errors
///
/// Returns the underlying [`DecodeError`] when the segment is not canonical
/// base64url.
pub fn decode(segment: &str) -> Result<Vec<u8>, DecodeError> {
    URL_SAFE_NO_PAD.decode(segment)
}

/// Whether every byte of `segment` belongs to the base64url alphabet.
#[must_use]
pub fn is_base64url(segment: &str) -> bool {
    segment
        .bytes()
        .all(|byte| byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_')
}

/// Compare two byte slices in time independent of where they first differ.
///
/// Slices of different length compare unequal.
#[must_use]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

/// Compute `HMAC-SHA512(message, key)`.
#[must_use]
pub fn hmac_sha512(message: &[u8], key: &[u8]) -> [u8; HMAC_SHA512_BYTES] {
    let Ok(mut mac) = HmacSha512::new_from_slice(key) else {
        unreachable!("HMAC accepts keys of any length");
    };

    mac.update(message);

    mac.finalize().into_bytes().into()
}

/// Draw `len` random bytes and return them base64url encoded.
#[must_use]
pub fn random_text(random: &dyn RandomSource, len: usize) -> String {
    let mut bytes = vec![0_u8; len];

    random.fill_bytes(&mut bytes);

    encode(&bytes)
}
