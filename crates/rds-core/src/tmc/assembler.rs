// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Multi-group TMC reassembly state machine.
//!
//! ```text
//! IDLE ──first(F=0,D=1)──▶ COLLECTING{CI, seq=unknown}
//! COLLECTING ──second(same CI, sets seq)──▶ COLLECTING{seq}
//! COLLECTING ──continuation(same CI, SEQ=seq−1)──▶ COLLECTING{seq−1}
//! COLLECTING ──SEQ=0──▶ publish → IDLE
//! COLLECTING ──CI mismatch | SEQ out of order──▶ drop → IDLE
//! *          ──F=1 (single)──▶ publish immediately (stateless)
//! ```
//!
//! A continuation observed while IDLE (no first group seen yet) is dropped
//! rather than misfiled.

use crate::bits::{bit, bits};
use crate::tables::TMC_LABEL_LENGTHS;
use crate::tmc::cache::TmcKey;

/// A fully or partially decoded TMC user message, ready for
/// [`crate::tmc::cache::TmcCache`] insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TmcMessage {
    /// 11-bit ALERT-C event code.
    pub event: u16,
    /// 16-bit location code.
    pub location: u16,
    /// Direction bit.
    pub direction: bool,
    /// 3-bit extent field.
    pub extent: u8,
    /// `D`/divert-advised bit; doubles as the first-group marker on
    /// multi-group messages.
    pub diversion_advised: bool,
    /// Present only for single-group (`F=1`) messages: the 3-bit duration
    /// field carried in VARY[2:0].
    pub duration: Option<u8>,
    /// Decoded auxiliary label values from the packed continuation data;
    /// empty for single-group messages.
    pub aux: Vec<u32>,
}

impl TmcMessage {
    /// The cache key this message publishes under.
    #[must_use]
    pub fn key(&self) -> TmcKey {
        TmcKey {
            event: self.event,
            location: self.location,
            direction: self.direction,
        }
    }
}

#[derive(Debug, Clone)]
enum State {
    Idle,
    Collecting {
        ci: u8,
        first_c: u16,
        first_d: u16,
        /// `None` until the first continuation ("second group") arrives.
        seq: Option<u8>,
        /// Packed `(C[11:0], D)` pairs from every continuation so far.
        continuations: Vec<(u16, u16)>,
    },
}

/// Per-session TMC reassembly state. One instance per [`crate::session::RdsSession`].
#[derive(Debug, Clone)]
pub struct TmcAssembler {
    state: State,
}

/// Result of feeding one group to [`TmcAssembler::feed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TmcOutcome {
    /// Nothing publishable yet (mid-collection, or a dropped group).
    None,
    /// A first multi-group arrived standalone with no continuation yet:
    /// cache it as a partial record.
    Partial(TmcMessage),
    /// A message is complete: single-group, or multi-group at `SEQ=0`.
    Complete(TmcMessage),
}

impl TmcAssembler {
    #[must_use]
    pub fn new() -> Self {
        Self { state: State::Idle }
    }

    /// Feed one TMC-bound group (`VARY`, block C, block D) in a user-message
    /// (`T=0`) context.
    pub fn feed(&mut self, vary: u8, c: u16, d: u16) -> TmcOutcome {
        let f_single = bit(u32::from(vary), 3);
        if f_single {
            // Stateless: does not touch in-progress multi-group state.
            return TmcOutcome::Complete(decode_single(vary, c, d));
        }

        let first_marker = bit(u32::from(c), 15);
        if first_marker {
            self.state = State::Collecting {
                ci: bits(u32::from(vary), 0, 3) as u8,
                first_c: c,
                first_d: d,
                seq: None,
                continuations: Vec::new(),
            };
            return TmcOutcome::Partial(decode_first(c, d));
        }

        match std::mem::replace(&mut self.state, State::Idle) {
            State::Idle => TmcOutcome::None,
            State::Collecting {
                ci,
                first_c,
                first_d,
                seq,
                mut continuations,
            } => {
                let this_ci = bits(u32::from(vary), 0, 3) as u8;
                if this_ci != ci {
                    return TmcOutcome::None; // CI mismatch: already reset to Idle above.
                }

                let is_second = bit(u32::from(c), 14);
                let this_seq = bits(u32::from(c), 12, 2) as u8;

                let next_seq = match (seq, is_second) {
                    (None, true) => this_seq,
                    (Some(expected), false) if expected > 0 && expected - 1 == this_seq => {
                        this_seq
                    }
                    _ => return TmcOutcome::None, // out of order: already reset to Idle above.
                };

                continuations.push((c & 0x0FFF, d));

                if next_seq == 0 {
                    return TmcOutcome::Complete(decode_multi(first_c, first_d, &continuations));
                }

                self.state = State::Collecting {
                    ci,
                    first_c,
                    first_d,
                    seq: Some(next_seq),
                    continuations,
                };
                TmcOutcome::None
            }
        }
    }

    /// Abandon any in-progress record without publishing, for session reset.
    pub fn reset(&mut self) {
        self.state = State::Idle;
    }
}

impl Default for TmcAssembler {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_single(vary: u8, c: u16, d: u16) -> TmcMessage {
    TmcMessage {
        event: bits(u32::from(c), 0, 11) as u16,
        location: d,
        direction: bit(u32::from(c), 14),
        extent: bits(u32::from(c), 11, 3) as u8,
        diversion_advised: bit(u32::from(c), 15),
        duration: Some(bits(u32::from(vary), 0, 3) as u8),
        aux: Vec::new(),
    }
}

/// Decode a standalone first-of-multi-group for partial caching: the
/// duration field only exists on single-group (`F=1`) messages, so it is
/// absent here.
fn decode_first(c: u16, d: u16) -> TmcMessage {
    TmcMessage {
        event: bits(u32::from(c), 0, 11) as u16,
        location: d,
        direction: bit(u32::from(c), 14),
        extent: bits(u32::from(c), 11, 3) as u8,
        diversion_advised: bit(u32::from(c), 15),
        duration: None,
        aux: Vec::new(),
    }
}

fn decode_multi(first_c: u16, first_d: u16, continuations: &[(u16, u16)]) -> TmcMessage {
    TmcMessage {
        event: bits(u32::from(first_c), 0, 11) as u16,
        location: first_d,
        direction: bit(u32::from(first_c), 14),
        extent: bits(u32::from(first_c), 11, 3) as u8,
        diversion_advised: bit(u32::from(first_c), 15),
        duration: None,
        aux: parse_aux(continuations),
    }
}

/// Streaming bit cursor over the packed 28-bit continuation halves, used to
/// pull variable-length auxiliary labels without building a heap string.
struct BitCursor {
    bits: Vec<bool>,
    pos: usize,
}

impl BitCursor {
    fn from_continuations(continuations: &[(u16, u16)]) -> Self {
        let mut bits = Vec::with_capacity(continuations.len() * 28);
        for &(c12, d16) in continuations {
            push_bits(&mut bits, u32::from(c12), 12);
            push_bits(&mut bits, u32::from(d16), 16);
        }
        Self { bits, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Option<u32> {
        if self.bits.len() - self.pos < n {
            return None;
        }
        let mut v: u32 = 0;
        for &b in &self.bits[self.pos..self.pos + n] {
            v = (v << 1) | u32::from(b);
        }
        self.pos += n;
        Some(v)
    }
}

fn push_bits(bits: &mut Vec<bool>, value: u32, width: u32) {
    for i in (0..width).rev() {
        bits.push((value >> i) & 1 != 0);
    }
}

fn parse_aux(continuations: &[(u16, u16)]) -> Vec<u32> {
    let mut cursor = BitCursor::from_continuations(continuations);
    let mut data = Vec::new();
    loop {
        let Some(label) = cursor.take(4) else {
            break;
        };
        if label == 0 {
            break;
        }
        let len = TMC_LABEL_LENGTHS[label as usize] as usize;
        let Some(value) = cursor.take(len) else {
            break;
        };
        if label == 15 {
            continue;
        }
        data.push(value);
    }
    data
}
