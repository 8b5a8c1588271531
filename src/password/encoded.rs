//! The self-describing stored hash string.
//!
//! `$argon2id$v=<version>$t=<time>,m=<memory KiB>,p=<lanes>$<salt>$<key>`,
//! salt and key in unpadded base64. New hashes use the URL-safe alphabet;
//! hashes in the standard alphabet are still read.

use argon2::Version;
use base64::{
    Engine as _,
    engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD},
};

use crate::password::CostParams;

const VARIANT: &str = "argon2id";

/// Base64 alphabet of a stored salt and key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Alphabet {
    UrlSafe,
    Standard,
}

impl Alphabet {
    fn detect(salt: &str, key: &str) -> Option<Self> {
        let fields = || salt.bytes().chain(key.bytes());
        let url = fields().any(|byte| byte == b'-' || byte == b'_');
        let standard = fields().any(|byte| byte == b'+' || byte == b'/');

        match (url, standard) {
            (true, true) => None,
            (false, true) => Some(Self::Standard),
            _ => Some(Self::UrlSafe),
        }
    }

    fn encode(self, bytes: &[u8]) -> String {
        match self {
            Self::UrlSafe => URL_SAFE_NO_PAD.encode(bytes),
            Self::Standard => STANDARD_NO_PAD.encode(bytes),
        }
    }

    fn decode(self, field: &str) -> Option<Vec<u8>> {
        match self {
            Self::UrlSafe => URL_SAFE_NO_PAD.decode(field).ok(),
            Self::Standard => STANDARD_NO_PAD.decode(field).ok(),
        }
    }
}

/// A parsed stored hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EncodedHash {
    pub version: Version,
    pub params: CostParams,
    pub salt: Vec<u8>,
    pub key: Vec<u8>,
    pub alphabet: Alphabet,
}

impl EncodedHash {
    /// Parse a stored hash. Any deviation from the format yields `None`.
    pub fn parse(hash: &str) -> Option<Self> {
        let mut fields = hash.split('$');

        let (Some(""), Some(VARIANT), Some(version), Some(params), Some(salt), Some(key), None) = (
            fields.next(),
            fields.next(),
            fields.next(),
            fields.next(),
            fields.next(),
            fields.next(),
            fields.next(),
        ) else {
            return None;
        };

        let version = Version::try_from(number(version, "v=")?).ok()?;

        let mut params = params.split(',');
        let (Some(time_cost), Some(memory_cost), Some(parallelism), None) =
            (params.next(), params.next(), params.next(), params.next())
        else {
            return None;
        };

        let params = CostParams {
            time_cost: number(time_cost, "t=")?,
            memory_cost: number(memory_cost, "m=")?,
            parallelism: number(parallelism, "p=")?,
        };

        let alphabet = Alphabet::detect(salt, key)?;

        Some(Self {
            version,
            params,
            salt: alphabet.decode(salt)?,
            key: alphabet.decode(key)?,
            alphabet,
        })
    }

    /// Format in this hash's alphabet.
    pub fn encode(&self) -> String {
        format!(
            "${VARIANT}$v={}$t={},m={},p={}${}${}",
            u32::from(self.version),
            self.params.time_cost,
            self.params.memory_cost,
            self.params.parallelism,
            self.alphabet.encode(&self.salt),
            self.alphabet.encode(&self.key),
        )
    }
}

fn number(field: &str, prefix: &str) -> Option<u32> {
    let digits = field.strip_prefix(prefix)?;

    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }

    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }

    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(alphabet: Alphabet) -> EncodedHash {
        EncodedHash {
            version: Version::V0x13,
            params: CostParams {
                time_cost: 6,
                memory_cost: 131_072,
                parallelism: 5,
            },
            salt: vec![0xfb; 64],
            key: vec![0xff; 16],
            alphabet,
        }
    }

    #[test]
    fn encodes_in_the_documented_layout() {
        let hash = sample(Alphabet::UrlSafe).encode();

        assert!(
            hash.starts_with("$argon2id$v=19$t=6,m=131072,p=5$-_v7"),
            "unexpected layout: {hash}"
        );
    }

    #[test]
    fn parses_both_alphabets() {
        for alphabet in [Alphabet::UrlSafe, Alphabet::Standard] {
            let hash = sample(alphabet).encode();

            assert_eq!(EncodedHash::parse(&hash), Some(sample(alphabet)), "{hash}");
        }
    }

    #[test]
    fn parses_legacy_version() {
        let hash = sample(Alphabet::UrlSafe).encode().replace("v=19", "v=16");

        let parsed = EncodedHash::parse(&hash).expect("v=16 parses");

        assert_eq!(parsed.version, Version::V0x10);
    }

    #[test]
    fn rejects_deviations() {
        let valid = sample(Alphabet::UrlSafe).encode();

        let cases = [
            valid.replace("argon2id", "argon2i"),
            valid.replace("v=19", "v=20"),
            valid.replace("t=6", "t=+6"),
            valid.replace("t=6", "t=six"),
            valid.replace("t=6", "t=06"),
            valid.replace("p=5", "p=00"),
            valid.replace(",p=5", ""),
            valid.replace(",p=5", ",p=5,x=1"),
            valid.replace("m=131072", "m=99999999999"),
            format!("{valid}$"),
            valid.replacen('-', "+", 1),
            valid.replace('$', "#"),
        ];

        for hash in cases {
            assert_eq!(EncodedHash::parse(&hash), None, "{hash} should not parse");
        }
    }
}
