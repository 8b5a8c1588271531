//! HS512 tokens signed with rotating secrets.
//!
//! A token is `base64url(header).base64url(payload).base64url(signature)`,
//! where the signature is `HMAC-SHA512` over the first two segments exactly as
//! they appear on the wire.

mod claims;
mod errors;
mod service;
mod untrusted;

pub use claims::{ALGORITHM, Header, NewToken, Payload, TOKEN_TYPE, Token, sign};
pub use errors::{TokenError, TokenErrorClass};
pub use service::{IssuedToken, TOKEN_ID_BYTES, TokenCodec, VerifiedToken};
pub use untrusted::{UntrustedToken, check_time_window};
