// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Top-level group dispatch: the 32-way switch over `(GTYPE, B0)` that wires
//! every decoded group into the registries and buffers it affects.
//!
//! Dispatch checks an ODA binding before falling through to the literal
//! group-type table, so an operator-assigned variant (e.g. "11A bound to
//! `RadioText+`") reaches its decoder even though gtype 11 has no built-in
//! meaning of its own. Group type 8A is always routed to the TMC path
//! regardless of binding state.

use crate::bits::{bit, bits, raw37};
use crate::clock;
use crate::event::DecodedEvent;
use crate::rtplus;
use crate::session::{RawGroup, RdsSession};
use crate::tables::{ODA_AID_RTPLUS, ODA_AID_TMC};
use crate::tmc::TmcOutcome;
use crate::variant::Variant;
use std::time::Instant;

/// Dispatch one already-accepted, non-duplicate group.
pub(crate) fn dispatch(
    session: &mut RdsSession,
    variant: Variant,
    blocks: RawGroup,
    corr: [u8; 4],
) -> DecodedEvent {
    let (_a, b, c, d) = blocks;
    let vary = bits(u32::from(b), 0, 5) as u8;

    if let Some(aid) = session.oda.query(variant, session.config.oda_accept_fraction) {
        if aid == ODA_AID_RTPLUS {
            crate::trace_fn!("dispatch_rtplus");
            return DecodedEvent::RtPlus(rtplus::decode(raw37(b, c, d)));
        }
        if aid == ODA_AID_TMC {
            return dispatch_tmc(session, variant, vary, c, d);
        }
    }

    if variant.gtype == 8 && !variant.b0 {
        return dispatch_tmc(session, variant, vary, c, d);
    }

    match variant.gtype {
        0 => dispatch_basic_tuning(session, variant, vary, c, d),
        2 => dispatch_radiotext(session, variant, vary, c, d),
        3 if !variant.b0 => dispatch_oda_binding(session, vary, d, corr),
        4 if !variant.b0 => dispatch_clock(session, b, c, d),
        10 if !variant.b0 => dispatch_ptyn(session, vary, c, d),
        14 if !variant.b0 => {
            session.eon.observe_14a(vary, c, d);
            DecodedEvent::Eon { variant, pi_on: d }
        }
        14 if variant.b0 => {
            session.eon.observe_14b(d);
            DecodedEvent::Eon { variant, pi_on: d }
        }
        _ => DecodedEvent::Raw { variant },
    }
}

/// 0A/0B: PS chars, TA/MS flags (both versions), DI bit and AF pair
/// (A-version only).
fn dispatch_basic_tuning(
    session: &mut RdsSession,
    variant: Variant,
    vary: u8,
    c: u16,
    d: u16,
) -> DecodedEvent {
    let addr = bits(u32::from(vary), 0, 2) as usize;
    session.last_ta = Some(bit(u32::from(vary), 4));
    session.last_ms = Some(bit(u32::from(vary), 3));
    if !variant.b0 {
        let di_bit = if bit(u32::from(vary), 2) { b'1' } else { b'0' };
        session.buffers.di.set(addr, &[di_bit]);
        session.af.observe_byte(variant, (c >> 8) as u8);
        session.af.observe_byte(variant, (c & 0xff) as u8);
    }
    session.buffers.ps.set(addr, &[(d >> 8) as u8, (d & 0xff) as u8]);
    DecodedEvent::Ps {
        variant,
        addr: addr as u8,
    }
}

/// 2A: 64-char RadioText, 4-byte slot from blocks C and D (`VARY[3:0]·4..+4`).
/// 2B: 32-char RadioText, 2-byte slot from block D only (`VARY[3:0]·2..+2`),
/// with the unused upper half of the 64-byte buffer blanked back to its
/// sentinel so a stale 2A tail never lingers alongside 2B-only text.
fn dispatch_radiotext(
    session: &mut RdsSession,
    variant: Variant,
    vary: u8,
    c: u16,
    d: u16,
) -> DecodedEvent {
    let addr = bits(u32::from(vary), 0, 4) as usize;
    if variant.b0 {
        session.buffers.rt.blank_range(32, 64);
        session.buffers.rt.set_at(addr * 2, &[(d >> 8) as u8, (d & 0xff) as u8]);
    } else {
        session.buffers.rt.set(
            addr,
            &[(c >> 8) as u8, (c & 0xff) as u8, (d >> 8) as u8, (d & 0xff) as u8],
        );
    }
    DecodedEvent::Rt {
        variant,
        addr: addr as u8,
    }
}

/// 3A: bind `(VARY[4:1], VARY[0])` to AID = D. `VARY` 0/0x1F ("not
/// carried"/"encoder error") still counts but never binds, handled inside
/// [`crate::oda::OdaBinder::observe_3a`].
fn dispatch_oda_binding(session: &mut RdsSession, vary: u8, d: u16, corr: [u8; 4]) -> DecodedEvent {
    let target = Variant::new(bits(u32::from(vary), 1, 4) as u8, bit(u32::from(vary), 0));
    let total_correction: u8 = corr.iter().sum();
    let rebind_quality = session.config.oda_rebind_quality;
    session
        .oda
        .observe_3a(target, d, vary, total_correction, rebind_quality);
    let accepted =
        session.oda.query(target, session.config.oda_accept_fraction) == Some(d);
    crate::debug!("3A binding: {target} -> {d:#06x} (accepted={accepted})");
    DecodedEvent::OdaBind {
        target,
        aid: d,
        accepted,
    }
}

/// 4A: Modified Julian Day clock decode.
fn dispatch_clock(session: &mut RdsSession, b: u16, c: u16, d: u16) -> DecodedEvent {
    let reading = clock::decode(raw37(b, c, d));
    if clock::is_implausible_year(reading.year) {
        crate::warn!("4A clock decoded an implausible year: {}", reading.year);
    }
    session.last_clock = Some(reading);
    DecodedEvent::Clock(reading)
}

/// 10A: Program Type Name, addressed by `VARY[0]` only (2 slots).
fn dispatch_ptyn(session: &mut RdsSession, vary: u8, c: u16, d: u16) -> DecodedEvent {
    let addr = bits(u32::from(vary), 0, 1) as usize;
    session
        .buffers
        .ptyn
        .set(addr, &[(c >> 8) as u8, (c & 0xff) as u8, (d >> 8) as u8, (d & 0xff) as u8]);
    DecodedEvent::PtyName { addr: addr as u8 }
}

/// Groups routed to the TMC path: literal 8A, or any variant ODA-bound to
/// `0xCD46`. `T=VARY[4]` selects tuning-info (writes TMCID) vs. user message
/// (feeds the reassembly state machine).
fn dispatch_tmc(
    session: &mut RdsSession,
    variant: Variant,
    vary: u8,
    c: u16,
    d: u16,
) -> DecodedEvent {
    if bit(u32::from(vary), 4) {
        let var = bits(u32::from(vary), 0, 4) as u8;
        if var == 4 || var == 5 {
            let addr = usize::from(var - 4);
            session.buffers.tmcid.set(
                addr,
                &[(c >> 8) as u8, (c & 0xff) as u8, (d >> 8) as u8, (d & 0xff) as u8],
            );
        }
        return DecodedEvent::Raw { variant };
    }

    match session.tmc_assembler.feed(vary, c, d) {
        TmcOutcome::None => DecodedEvent::Raw { variant },
        TmcOutcome::Partial(msg) => {
            session.tmc_cache.insert_partial(msg.clone(), Instant::now());
            DecodedEvent::TmcMsg(msg)
        }
        TmcOutcome::Complete(msg) => {
            session.tmc_cache.insert_complete(msg.clone(), Instant::now());
            DecodedEvent::TmcMsg(msg)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DecoderConfig;

    fn session() -> RdsSession {
        RdsSession::new(DecoderConfig::default())
    }

    #[test]
    fn di_bit_is_written_only_on_a_version() {
        let mut s = session();
        let event = dispatch(&mut s, Variant::new(0, false), (0x232D, 0x0004, 0x0000, 0x5241), [0; 4]);
        assert!(matches!(event, DecodedEvent::Ps { .. }));
        assert_eq!(s.buffers.di.raw()[0], b'1');
    }

    #[test]
    fn ta_and_ms_flags_surface_on_both_0a_and_0b() {
        let mut s = session();
        // VARY = 0b11000: TA=1, MS=1, addr=0.
        dispatch(&mut s, Variant::new(0, false), (0x232D, 0x0018, 0x0000, 0x5241), [0; 4]);
        assert_eq!(s.last_ta, Some(true));
        assert_eq!(s.last_ms, Some(true));
        // VARY = 0b00000 on 0B: TA=0, MS=0.
        dispatch(&mut s, Variant::new(0, true), (0x232D, 0x0800, 0x0000, 0x5241), [0; 4]);
        assert_eq!(s.last_ta, Some(false));
        assert_eq!(s.last_ms, Some(false));
    }

    #[test]
    fn rt_2b_writes_two_bytes_and_blanks_upper_half() {
        let mut s = session();
        dispatch(&mut s, Variant::new(2, false), (0x232D, 0x2000, 0x4865, 0x6C6C), [0; 4]);
        assert_eq!(&s.buffers.rt.raw()[0..4], b"Hell");
        // Switch to 2B: addr=0 writes 2 bytes from D only, upper half blanks.
        let event = dispatch(&mut s, Variant::new(2, true), (0x232D, 0x2800, 0x0000, 0x4869), [0; 4]);
        assert!(matches!(event, DecodedEvent::Rt { .. }));
        assert_eq!(&s.buffers.rt.raw()[0..2], b"Hi");
        assert_eq!(&s.buffers.rt.raw()[32..64], &[crate::buffers::UNSET; 32]);
    }

    #[test]
    fn s2_clock_scenario() {
        let mut s = session();
        // Grounded worked example: raw37(0x40E1, 0xD6DE, 0x3540) -> 2023-11-23 03:21 +0.
        let event = dispatch(&mut s, Variant::new(4, false), (0x232D, 0x40E1, 0xD6DE, 0x3540), [0; 4]);
        let DecodedEvent::Clock(reading) = event else {
            panic!("expected Clock event");
        };
        assert_eq!(reading.display(), "2023-11-23 03:21");
    }

    #[test]
    fn s4_tmc_single_group_scenario() {
        let mut s = session();
        // VARY=0x0F: T=0, F=1 (single-group), CI=7, duration=7;
        // C/D encode event=0x0E7, direction=1, extent=1.
        let event = dispatch(&mut s, Variant::new(8, false), (0x232D, 0x000F, 0x48E7, 0xC2E7), [0; 4]);
        let DecodedEvent::TmcMsg(msg) = event else {
            panic!("expected TmcMsg event");
        };
        assert_eq!(msg.event, 0x0E7);
        assert_eq!(msg.location, 0xC2E7);
        assert_eq!(s.tmc_cache.records().len(), 1);
    }

    #[test]
    fn oda_binding_routes_11a_to_rtplus_once_accepted() {
        let mut s = session();
        // Bind 11A (gtype=11, b0=false) to RT+: VARY = (11<<1)|0 = 0x16.
        for _ in 0..40 {
            dispatch(&mut s, Variant::new(3, false), (0x232D, 0x3000 | 0x16, 0x0000, ODA_AID_RTPLUS), [0; 4]);
        }
        let event = dispatch(&mut s, Variant::new(11, false), (0x232D, 0xB000, 0x0000, 0x0000), [0; 4]);
        assert!(matches!(event, DecodedEvent::RtPlus(_)));
    }

    #[test]
    fn eon_14a_and_14b_both_register_pi_on() {
        let mut s = session();
        dispatch(&mut s, Variant::new(14, false), (0x232D, 0xE000, 0x0000, 0x1234), [0; 4]);
        dispatch(&mut s, Variant::new(14, true), (0x232D, 0xE800, 0x0000, 0x5678), [0; 4]);
        assert!(s.eon.get(0x1234).is_some());
        assert!(s.eon.get(0x5678).is_some());
    }

    #[test]
    fn unbound_generic_variant_only_touches_histogram() {
        let mut s = session();
        let event = dispatch(&mut s, Variant::new(6, false), (0x232D, 0x6000, 0x0000, 0x0000), [0; 4]);
        assert!(matches!(event, DecodedEvent::Raw { .. }));
    }
}
