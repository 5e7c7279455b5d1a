// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The per-channel decoding session: owns every registry and buffer, and is
//! the sole mutable entry point into the core. No module-global
//! singletons; everything lives in one value the caller threads
//! explicitly.

use crate::af::AfRegistry;
use crate::buffers::StringBuffers;
use crate::clock::ClockReading;
use crate::config::DecoderConfig;
use crate::dispatch;
use crate::eon::EonRegistry;
use crate::event::DecodedEvent;
use crate::oda::OdaBinder;
use crate::quality;
use crate::stats::StatRegistry;
use crate::tmc::{TmcAssembler, TmcCache};
use crate::variant::Variant;

/// A single group as read from the tuner: four 16-bit blocks and their
/// per-block correction flags.
pub type RawGroup = (u16, u16, u16, u16);

/// Everything the decoder remembers about one tuned channel. Created when
/// the tuner locks a station, fed one group at a time via [`RdsSession::feed`],
/// and fully [`RdsSession::reset`] on retune.
#[derive(Debug, Clone)]
pub struct RdsSession {
    pub(crate) config: DecoderConfig,
    pub(crate) buffers: StringBuffers,
    pub(crate) stats: StatRegistry,
    pub(crate) af: AfRegistry,
    pub(crate) oda: OdaBinder,
    pub(crate) eon: EonRegistry,
    pub(crate) tmc_assembler: TmcAssembler,
    pub(crate) tmc_cache: TmcCache,
    pub(crate) pic: Option<u16>,
    pub(crate) last_pty: Option<u8>,
    pub(crate) last_clock: Option<ClockReading>,
    /// Traffic Announcement flag (`VARY[4]`), updated by every 0A/0B group.
    pub(crate) last_ta: Option<bool>,
    /// Music/Speech flag (`VARY[3]`), updated by every 0A/0B group.
    pub(crate) last_ms: Option<bool>,
    last_blocks: Option<RawGroup>,
}

impl RdsSession {
    #[must_use]
    pub fn new(config: DecoderConfig) -> Self {
        Self {
            config,
            buffers: StringBuffers::new(),
            stats: StatRegistry::new(),
            af: AfRegistry::new(),
            oda: OdaBinder::new(),
            eon: EonRegistry::new(),
            tmc_assembler: TmcAssembler::new(),
            tmc_cache: TmcCache::new(),
            pic: None,
            last_pty: None,
            last_clock: None,
            last_ta: None,
            last_ms: None,
            last_blocks: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Feed one freshly-read group:
    /// 1. drop exact repeats of the previous read (hardware dedup);
    /// 2. gate on block quality at threshold 2, counting rejects separately;
    /// 3. record the histogram entry and hand off to the dispatcher;
    /// 4. remember these blocks for the next call's dedup check.
    ///
    /// Returns `None` for a dropped duplicate or a rejected (bad-block)
    /// group; `Some(event)` for every accepted, dispatched group.
    pub fn feed(&mut self, blocks: RawGroup, corr: [u8; 4]) -> Option<DecodedEvent> {
        if self.last_blocks == Some(blocks) {
            crate::debug!("dropping duplicate RDS group {:?}", blocks);
            return None;
        }

        if quality::is_bad(corr, self.config.bad_block_threshold) {
            self.stats.record_rejected();
            self.last_blocks = Some(blocks);
            crate::debug!("rejecting bad-block group {:?} corr={:?}", blocks, corr);
            return None;
        }

        let (a, b, _c, _d) = blocks;
        self.pic = Some(a);
        self.last_pty = Some(crate::bits::bits(u32::from(b), 5, 5) as u8);
        let variant = Variant::from_block_b(b);
        self.stats.record(variant);

        let event = dispatch::dispatch(self, variant, blocks, corr);
        self.last_blocks = Some(blocks);
        Some(event)
    }

    /// Clear every registry and string buffer to its sentinel state.
    /// Called on retune, explicit reset, or chip reinitialization.
    pub fn reset(&mut self) {
        self.buffers.clear();
        self.stats.clear();
        self.af.clear();
        self.oda.clear();
        self.eon.clear();
        self.tmc_assembler.reset();
        self.tmc_cache.clear();
        self.pic = None;
        self.last_pty = None;
        self.last_clock = None;
        self.last_ta = None;
        self.last_ms = None;
        self.last_blocks = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(a: u16, b: u16, c: u16, d: u16) -> RawGroup {
        (a, b, c, d)
    }

    #[test]
    fn s1_ps_assembly_scenario() {
        let mut session = RdsSession::new(DecoderConfig::default());
        session.feed(group(0x232D, 0x0000, 0x0000, 0x5241), [0, 0, 0, 0]);
        session.feed(group(0x232D, 0x0001, 0x0000, 0x4449), [0, 0, 0, 0]);
        session.feed(group(0x232D, 0x0002, 0x0000, 0x4F20), [0, 0, 0, 0]);
        session.feed(group(0x232D, 0x0003, 0x0000, 0x2020), [0, 0, 0, 0]);
        assert_eq!(session.buffers.ps.as_display_string(), "RADIO   ");
        assert_eq!(session.stats.count(Variant::new(0, false)), 4);
    }

    #[test]
    fn s6_duplicate_suppression_scenario() {
        let mut session = RdsSession::new(DecoderConfig::default());
        let g = group(0x232D, 0x0000, 0x0000, 0x5241);
        assert!(session.feed(g, [0, 0, 0, 0]).is_some());
        assert!(session.feed(g, [0, 0, 0, 0]).is_none());
        assert_eq!(session.stats.total_accepted(), 1);
    }

    #[test]
    fn bad_block_is_counted_and_not_dispatched() {
        let mut session = RdsSession::new(DecoderConfig::default());
        let result = session.feed(group(0x232D, 0x0000, 0x0000, 0x5241), [2, 0, 0, 0]);
        assert!(result.is_none());
        assert_eq!(session.stats.rejected(), 1);
        assert_eq!(session.stats.total_accepted(), 0);
    }

    #[test]
    fn reset_clears_buffers_and_registries() {
        let mut session = RdsSession::new(DecoderConfig::default());
        session.feed(group(0x232D, 0x0000, 0x0000, 0x5241), [0, 0, 0, 0]);
        session.reset();
        assert_eq!(session.stats.total_accepted(), 0);
        assert!(session.pic.is_none());
        assert_eq!(session.buffers.ps.raw(), &[b'_'; 8]);
    }
}
