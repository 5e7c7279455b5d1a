// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Open Data Application (ODA) binding: maps a `(group-type, variant)` slot
//! to an Application Identifier learned from 3A groups.

use crate::variant::Variant;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
struct Binding {
    count: u32,
    aid: Option<u16>,
}

/// Per-variant binding counts and the currently accepted AID, if any.
#[derive(Debug, Clone, Default)]
pub struct OdaBinder {
    bindings: HashMap<Variant, Binding>,
}

impl OdaBinder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a 3A observation binding `target` to `aid`.
    ///
    /// `vary` is the raw 3A VARY field; `0` and `0x1F` mark "not carried" /
    /// "encoder error" and are counted but do not update the binding
    /// table.
    /// `total_correction` is the sum of the group's four block correction
    /// flags; an existing binding is only overwritten when this group passed
    /// the stricter quality bar of at most `rebind_quality` total
    /// corrections (default 1, see [`crate::config::DecoderConfig`]).
    pub fn observe_3a(
        &mut self,
        target: Variant,
        aid: u16,
        vary: u8,
        total_correction: u8,
        rebind_quality: u8,
    ) {
        let binding = self.bindings.entry(target).or_default();
        binding.count += 1;

        if vary == 0 || vary == 0x1F {
            return;
        }

        if binding.aid.is_none() || total_correction <= rebind_quality {
            binding.aid = Some(aid);
        }
    }

    /// The AID bound to `target`, if its share of all observed 3A bindings
    /// meets or exceeds `threshold` (default 0.02, display 0.05) and
    /// a real AID has actually been recorded (not just count-only noise).
    #[must_use]
    pub fn query(&self, target: Variant, threshold: f64) -> Option<u16> {
        let total: u32 = self.bindings.values().map(|b| b.count).sum();
        if total == 0 {
            return None;
        }
        let binding = self.bindings.get(&target)?;
        let aid = binding.aid?;
        if f64::from(binding.count) / f64::from(total) >= threshold {
            Some(aid)
        } else {
            None
        }
    }

    /// All `(variant, aid)` pairs currently accepted at `threshold`.
    #[must_use]
    pub fn accepted(&self, threshold: f64) -> Vec<(Variant, u16)> {
        let total: u32 = self.bindings.values().map(|b| b.count).sum();
        if total == 0 {
            return Vec::new();
        }
        let mut out: Vec<(Variant, u16)> = self
            .bindings
            .iter()
            .filter(|&(_, b)| f64::from(b.count) / f64::from(total) >= threshold)
            .filter_map(|(&v, b)| b.aid.map(|aid| (v, aid)))
            .collect();
        out.sort();
        out
    }

    /// Clear every binding, for session reset.
    pub fn clear(&mut self) {
        self.bindings.clear();
    }
}
