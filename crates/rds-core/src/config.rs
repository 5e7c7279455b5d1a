// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Decoder tunables: the fractional thresholds and quality gates the
//! registries use to separate real signal from noise.

#[cfg(feature = "config-file")]
use serde::{Deserialize, Serialize};

/// All of the decoder's configurable thresholds. Every field has a default
/// matching common defaults for RDS/RBDS decoding; most applications never
/// need to change these.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
pub struct DecoderConfig {
    /// Per-block correction count at or above which a group is treated as
    /// bad. Default 2.
    pub bad_block_threshold: u8,
    /// Minimum fractional share of 3A observations an ODA binding needs to
    /// be consumed internally (TMC/RT+ routing). Default 0.02.
    pub oda_accept_fraction: f64,
    /// Minimum fractional share an ODA binding needs to be surfaced in
    /// reports. Default 0.05.
    pub oda_display_fraction: f64,
    /// Total per-group correction count at or below which a 3A observation
    /// is allowed to overwrite an existing ODA binding. Default 1.
    pub oda_rebind_quality: u8,
    /// Minimum fractional share within a source group for an alternate
    /// frequency to be surfaced in reports. Default 0.05.
    pub af_display_fraction: f64,
    /// Minimum fractional share of accepted groups for a quickgroup tag to
    /// be surfaced. Default 0.03.
    pub quickgroup_fraction: f64,
}

impl DecoderConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_bad_block_threshold(mut self, threshold: u8) -> Self {
        self.bad_block_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_oda_accept_fraction(mut self, fraction: f64) -> Self {
        self.oda_accept_fraction = fraction;
        self
    }

    #[must_use]
    pub fn with_oda_display_fraction(mut self, fraction: f64) -> Self {
        self.oda_display_fraction = fraction;
        self
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            bad_block_threshold: 2,
            oda_accept_fraction: 0.02,
            oda_display_fraction: 0.05,
            oda_rebind_quality: 1,
            af_display_fraction: 0.05,
            quickgroup_fraction: 0.03,
        }
    }
}
