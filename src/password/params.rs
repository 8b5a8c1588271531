//! Cost levels and the Argon2id parameters they map to.

use argon2::Params;
use serde::Deserialize;

/// Maps a caller-chosen cost level to Argon2id parameters.
///
/// Level `c` yields `t = c * time_per_level`,
/// `m = (1 + c) * memory_per_level_kib` and `p = 1 + 3c / 2`. Level 0 means
/// `default_level`; levels above `max_level` are clamped to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CostPolicy {
    /// Level used when the caller asks for level 0.
    pub default_level: u32,

    /// Highest level honoured.
    pub max_level: u32,

    /// Argon2 iterations added per level.
    pub time_per_level: u32,

    /// Memory added per level, in KiB.
    pub memory_per_level_kib: u32,
}

impl Default for CostPolicy {
    fn default() -> Self {
        Self {
            default_level: 3,
            max_level: 16,
            time_per_level: 2,
            memory_per_level_kib: 32 * 1024,
        }
    }
}

impl CostPolicy {
    /// Parameters for `level`.
    #[must_use]
    pub fn params(&self, level: u32) -> CostParams {
        let level = match level {
            0 => self.default_level,
            level => level.min(self.max_level),
        }
        .max(1);

        CostParams {
            time_cost: level.saturating_mul(self.time_per_level).max(1),
            memory_cost: level
                .saturating_add(1)
                .saturating_mul(self.memory_per_level_kib),
            parallelism: 1 + level.saturating_mul(3) / 2,
        }
    }
}

/// Concrete Argon2id cost parameters, as embedded in a stored hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostParams {
    /// Iterations.
    pub time_cost: u32,

    /// Memory in KiB.
    pub memory_cost: u32,

    /// Lanes.
    pub parallelism: u32,
}

impl CostParams {
    pub(crate) fn argon2(self, output_len: usize) -> Result<Params, argon2::Error> {
        Params::new(
            self.memory_cost,
            self.time_cost,
            self.parallelism,
            Some(output_len),
        )
    }
}
