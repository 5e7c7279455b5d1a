// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Alternate-frequency multiset accumulation, per originating group variant.
//!
//! Two AF bytes arrive per 0A group (block C high/low halves); a `250` code
//! latches "the next byte is LF/MF, not FM" across the pair. The latch lives
//! per source variant and is never timed out: a noisy `250` mislabels the
//! following byte until the next list start, matching the original firmware
//! behavior it was ported from.

use crate::freq::{self, FreqCode};
use crate::variant::Variant;
use std::collections::HashMap;

/// Per-variant frequency tally plus the sticky LF/MF latch.
#[derive(Debug, Clone, Default)]
pub struct AfRegistry {
    counts: HashMap<Variant, HashMap<String, u32>>,
    low_freq_latch: HashMap<Variant, bool>,
}

impl AfRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one raw AF byte observed in a group of `group`'s variant.
    /// Handles the `250` follow-latch internally: the byte immediately
    /// after a `250` is interpreted as raw kHz rather than decoded via
    /// [`freq::decode`].
    pub fn observe_byte(&mut self, group: Variant, byte: u8) {
        if self.low_freq_latch.get(&group).copied().unwrap_or(false) {
            self.low_freq_latch.insert(group, false);
            self.add(group, format!("{byte} raw khz"));
            return;
        }

        match freq::decode(byte) {
            FreqCode::Fm(_) => self.add(group, freq::label(freq::decode(byte))),
            FreqCode::NextIsLowFreq => {
                self.low_freq_latch.insert(group, true);
            }
            FreqCode::Unused
            | FreqCode::Filler
            | FreqCode::Unassigned
            | FreqCode::NoAf
            | FreqCode::Follow(_) => {}
        }
    }

    fn add(&mut self, group: Variant, label: String) {
        *self
            .counts
            .entry(group)
            .or_default()
            .entry(label)
            .or_insert(0) += 1;
    }

    /// Whether `group`'s next AF byte is currently latched to LF/MF
    /// interpretation. Exposed mainly for tests and diagnostics.
    #[must_use]
    pub fn is_low_freq_latched(&self, group: Variant) -> bool {
        self.low_freq_latch.get(&group).copied().unwrap_or(false)
    }

    /// Frequencies observed for `group` whose share of that group's total
    /// meets or exceeds `min_fraction` (default 0.05), sorted by
    /// descending count.
    #[must_use]
    pub fn frequencies(&self, group: Variant, min_fraction: f64) -> Vec<(String, u32)> {
        let Some(table) = self.counts.get(&group) else {
            return Vec::new();
        };
        let total: u32 = table.values().sum();
        if total == 0 {
            return Vec::new();
        }
        let mut entries: Vec<(String, u32)> = table
            .iter()
            .filter(|&(_, &c)| f64::from(c) / f64::from(total) >= min_fraction)
            .map(|(label, &c)| (label.clone(), c))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries
    }

    /// Clear every tally and latch, for session reset.
    pub fn clear(&mut self) {
        self.counts.clear();
        self.low_freq_latch.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v0a() -> Variant {
        Variant::new(0, false)
    }

    #[test]
    fn fm_bytes_accumulate_by_label() {
        let mut reg = AfRegistry::new();
        reg.observe_byte(v0a(), 1);
        reg.observe_byte(v0a(), 1);
        reg.observe_byte(v0a(), 205);
        let freqs = reg.frequencies(v0a(), 0.0);
        assert_eq!(freqs[0], ("87.6".to_string(), 2));
    }

    #[test]
    fn low_fraction_entries_are_hidden_by_default_threshold() {
        let mut reg = AfRegistry::new();
        for _ in 0..19 {
            reg.observe_byte(v0a(), 1);
        }
        reg.observe_byte(v0a(), 2); // 1/20 = 5%, at the boundary, included
        let freqs = reg.frequencies(v0a(), 0.05);
        assert_eq!(freqs.len(), 2);
    }

    #[test]
    fn code_250_latches_next_byte_as_raw_khz() {
        let mut reg = AfRegistry::new();
        reg.observe_byte(v0a(), 250);
        assert!(reg.is_low_freq_latched(v0a()));
        reg.observe_byte(v0a(), 153);
        assert!(!reg.is_low_freq_latched(v0a()));
        let freqs = reg.frequencies(v0a(), 0.0);
        assert_eq!(freqs[0].0, "153 raw khz");
    }

    #[test]
    fn unused_and_noaf_codes_add_no_entries() {
        let mut reg = AfRegistry::new();
        reg.observe_byte(v0a(), 0);
        reg.observe_byte(v0a(), 224);
        assert!(reg.frequencies(v0a(), 0.0).is_empty());
    }

    #[test]
    fn clear_drops_counts_and_latch() {
        let mut reg = AfRegistry::new();
        reg.observe_byte(v0a(), 250);
        reg.observe_byte(v0a(), 1);
        reg.clear();
        assert!(!reg.is_low_freq_latched(v0a()));
        assert!(reg.frequencies(v0a(), 0.0).is_empty());
    }
}
