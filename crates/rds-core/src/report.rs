// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Read-only snapshots of session state for UI consumers. Every method
//! borrows the session immutably; callers serialize these against
//! concurrent `feed`/`reset` calls themselves.

use crate::bits::bits;
use crate::session::RdsSession;
use crate::tables::{self, PI_AREA_DESC};
use crate::tmc::TmcRecord;
use crate::variant::Variant;

/// A decomposed Program Identification Code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PicDecomposition {
    pub country: u8,
    pub area: u8,
    pub area_descriptor: &'static str,
    pub program: u8,
}

/// Borrows an [`RdsSession`] to answer read-only queries; holds no state of
/// its own.
pub struct Reporter<'a> {
    session: &'a RdsSession,
}

impl<'a> Reporter<'a> {
    #[must_use]
    pub fn new(session: &'a RdsSession) -> Self {
        Self { session }
    }

    /// Program Service name, underscore-padded where unset.
    #[must_use]
    pub fn ps(&self) -> String {
        self.session.buffers.ps.as_display_string()
    }

    /// RadioText, underscore-padded where unset.
    #[must_use]
    pub fn rt(&self) -> String {
        self.session.buffers.rt.as_display_string()
    }

    /// Program Type Name, underscore-padded where unset.
    #[must_use]
    pub fn ptyn(&self) -> String {
        self.session.buffers.ptyn.as_display_string()
    }

    /// TMC station identification string, underscore-padded where unset.
    #[must_use]
    pub fn tmcid(&self) -> String {
        self.session.buffers.tmcid.as_display_string()
    }

    /// Decoder Identification bits as decoded so far.
    #[must_use]
    pub fn di(&self) -> String {
        self.session.buffers.di.as_display_string()
    }

    /// Most recently decoded 4A clock, rendered as `"YYYY-MM-DD HH:MM"`, or
    /// `None` if no clock group has been seen yet.
    #[must_use]
    pub fn clock(&self) -> Option<String> {
        self.session.last_clock.map(|c| c.display())
    }

    /// `(index, (rds_name, rbds_name))` for the most recently observed PTY,
    /// taken from block B of the last accepted group (`PTY = B[9:5]`, a
    /// fixed field extracted from every group).
    #[must_use]
    pub fn pty(&self) -> Option<(u8, (&'static str, &'static str))> {
        let pty = self.session.last_pty?;
        tables::pty_name(pty).map(|names| (pty, names))
    }

    /// Traffic Announcement / Music-Speech flags from the most recently
    /// observed 0A/0B group (`VARY[4]`/`VARY[3]`), or `None` if no type-0
    /// group has been seen yet.
    #[must_use]
    pub fn ta_ms(&self) -> Option<(bool, bool)> {
        Some((self.session.last_ta?, self.session.last_ms?))
    }

    /// Decompose the most recently observed PIC into its country/area/
    /// program fields (`PIC>>12` / `PIC>>8` / `PIC&0xff`).
    #[must_use]
    pub fn pic_decomposition(&self) -> Option<PicDecomposition> {
        let pic = self.session.pic?;
        let pic = u32::from(pic);
        let country = bits(pic, 12, 4) as u8;
        let area = bits(pic, 8, 4) as u8;
        let program = (pic & 0xff) as u8;
        Some(PicDecomposition {
            country,
            area,
            area_descriptor: PI_AREA_DESC[area as usize],
            program,
        })
    }

    /// Alternate frequencies observed for `group`, filtered by fractional
    /// share (default 0.05).
    #[must_use]
    pub fn alt_frequencies(&self, group: Variant, min_fraction: f64) -> Vec<(String, u32)> {
        self.session.af.frequencies(group, min_fraction)
    }

    /// `(variant, count)` for every variant observed at least once.
    #[must_use]
    pub fn group_stats(&self) -> Vec<(Variant, u32)> {
        self.session.stats.group_stats()
    }

    /// Count of groups rejected at the block-quality gate.
    #[must_use]
    pub fn rejected_count(&self) -> u32 {
        self.session.stats.rejected()
    }

    /// Quickgroup tags whose share exceeds `fraction` (default 0.03).
    #[must_use]
    pub fn quickgroups(&self, fraction: f64) -> Vec<String> {
        self.session.stats.quickgroups(fraction)
    }

    /// `(variant, aid, aid_name)` for every ODA binding accepted at
    /// `min_fraction` (default 0.02, display 0.05).
    #[must_use]
    pub fn oda_bindings(&self, min_fraction: f64) -> Vec<(Variant, u16, Option<&'static str>)> {
        self.session
            .oda
            .accepted(min_fraction)
            .into_iter()
            .map(|(v, aid)| (v, aid, tables::oda_aid_name(aid)))
            .collect()
    }

    /// All cached TMC records.
    #[must_use]
    pub fn tmc_records(&self) -> Vec<&TmcRecord> {
        self.session.tmc_cache.records()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DecoderConfig;

    #[test]
    fn ps_and_group_stats_reflect_s1_scenario() {
        let mut session = RdsSession::new(DecoderConfig::default());
        session.feed((0x232D, 0x0000, 0x0000, 0x5241), [0; 4]);
        session.feed((0x232D, 0x0001, 0x0000, 0x4449), [0; 4]);
        session.feed((0x232D, 0x0002, 0x0000, 0x4F20), [0; 4]);
        session.feed((0x232D, 0x0003, 0x0000, 0x2020), [0; 4]);
        let report = Reporter::new(&session);
        assert_eq!(report.ps(), "RADIO   ");
        assert_eq!(report.group_stats(), vec![(Variant::new(0, false), 4)]);
    }

    #[test]
    fn pic_decomposition_matches_reference_breakdown() {
        let mut session = RdsSession::new(DecoderConfig::default());
        session.feed((0x232D, 0x0000, 0x0000, 0x5241), [0; 4]);
        let report = Reporter::new(&session);
        let pic = report.pic_decomposition().unwrap();
        assert_eq!(pic.country, 0x2);
        assert_eq!(pic.area, 0x3);
        assert_eq!(pic.program, 0x2D);
        assert_eq!(pic.area_descriptor, "supraregional");
    }

    #[test]
    fn pic_decomposition_is_none_before_any_group() {
        let session = RdsSession::new(DecoderConfig::default());
        let report = Reporter::new(&session);
        assert!(report.pic_decomposition().is_none());
    }

    #[test]
    fn pty_reflects_block_b_of_last_accepted_group() {
        let mut session = RdsSession::new(DecoderConfig::default());
        // B = 0x00A0: PTY field (bits 9..5) = 5 ("education" / "rock_music").
        session.feed((0x232D, 0x00A0, 0x0000, 0x0000), [0; 4]);
        let report = Reporter::new(&session);
        assert_eq!(report.pty(), Some((5, ("education", "rock_music"))));
    }

    #[test]
    fn pty_is_none_before_any_group() {
        let session = RdsSession::new(DecoderConfig::default());
        let report = Reporter::new(&session);
        assert!(report.pty().is_none());
    }

    #[test]
    fn ta_ms_reflect_most_recent_type_0_group() {
        let mut session = RdsSession::new(DecoderConfig::default());
        let report = Reporter::new(&session);
        assert!(report.ta_ms().is_none());
        drop(report);
        // VARY = 0b11000: TA=1, MS=1.
        session.feed((0x232D, 0x0018, 0x0000, 0x5241), [0; 4]);
        let report = Reporter::new(&session);
        assert_eq!(report.ta_ms(), Some((true, true)));
    }

    #[test]
    fn tmc_records_surface_cached_messages() {
        let mut session = RdsSession::new(DecoderConfig::default());
        session.feed((0x232D, 0x000F, 0x48E7, 0xC2E7), [0; 4]);
        let report = Reporter::new(&session);
        assert_eq!(report.tmc_records().len(), 1);
    }
}
