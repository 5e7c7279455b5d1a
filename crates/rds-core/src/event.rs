// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The decoded-event sum type emitted by [`crate::dispatch`].
//!
//! One function returns a tagged value per group instead of a grab-bag of
//! mixed string-keyed decoders. [`crate::report::Reporter`] does not consume
//! this stream directly (it reads accumulated state instead), but callers
//! that want a per-group trace (logging, pcap annotation, a UI event feed)
//! can match on it.

use crate::clock::ClockReading;
use crate::rtplus::RtPlusReading;
use crate::tmc::TmcMessage;
use crate::variant::Variant;

/// One decoded outcome of dispatching a single accepted group.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedEvent {
    /// Program Service name buffer was written.
    Ps { variant: Variant, addr: u8 },
    /// RadioText buffer was written.
    Rt { variant: Variant, addr: u8 },
    /// A 4A group decoded a calendar date-time.
    Clock(ClockReading),
    /// One alternate-frequency byte was observed.
    Af { variant: Variant, byte: u8 },
    /// A 3A group bound (or counted toward binding) an ODA AID.
    OdaBind {
        target: Variant,
        aid: u16,
        accepted: bool,
    },
    /// A TMC user message completed (single- or multi-group).
    TmcMsg(TmcMessage),
    /// A group bound to the `RadioText+` AID decoded its tags.
    RtPlus(RtPlusReading),
    /// An Enhanced Other Networks group (14A/14B) updated cross-reference
    /// state for another station's PI.
    Eon { variant: Variant, pi_on: u16 },
    /// A 10A group wrote the Program Type Name buffer.
    PtyName { addr: u8 },
    /// Accepted but otherwise unremarkable: only the histogram moved.
    Raw { variant: Variant },
}
