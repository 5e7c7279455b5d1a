// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! TMC message cache, keyed by `(event, location, direction)`.

use crate::tmc::assembler::TmcMessage;
use std::collections::HashMap;
use std::time::Instant;

/// Cache key for a TMC message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TmcKey {
    pub event: u16,
    pub location: u16,
    pub direction: bool,
}

/// A cached TMC message: the decoded payload, when it was first observed,
/// and how many times a message with this key has since been seen.
#[derive(Debug, Clone)]
pub struct TmcRecord {
    pub message: TmcMessage,
    pub first_seen: Instant,
    pub count: u32,
}

/// Insert policy: a complete record (single-group, or a finished multi-group
/// publication) always overwrites and bumps `count`. A partial record (a
/// bare first-group that arrived standalone) only inserts if the key is
/// absent, so it never displaces a complete record already held.
#[derive(Debug, Clone, Default)]
pub struct TmcCache {
    records: HashMap<TmcKey, TmcRecord>,
}

impl TmcCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a complete message (from [`crate::tmc::assembler::TmcAssembler::feed`]
    /// returning `Some`).
    pub fn insert_complete(&mut self, message: TmcMessage, now: Instant) {
        let key = message.key();
        match self.records.get_mut(&key) {
            Some(record) => {
                record.message = message;
                record.count += 1;
            }
            None => {
                self.records.insert(
                    key,
                    TmcRecord {
                        message,
                        first_seen: now,
                        count: 1,
                    },
                );
            }
        }
    }

    /// Insert a partial message (a first-group-only observation). Only
    /// takes effect if no record for this key exists yet.
    pub fn insert_partial(&mut self, message: TmcMessage, now: Instant) {
        let key = message.key();
        self.records.entry(key).or_insert_with(|| TmcRecord {
            message,
            first_seen: now,
            count: 1,
        });
    }

    /// All cached records, most-recently-inserted order is not guaranteed;
    /// callers that need a stable order should sort by key.
    #[must_use]
    pub fn records(&self) -> Vec<&TmcRecord> {
        self.records.values().collect()
    }

    /// Lookup by key.
    #[must_use]
    pub fn get(&self, key: TmcKey) -> Option<&TmcRecord> {
        self.records.get(&key)
    }

    /// Clear the whole cache, for session reset.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}
