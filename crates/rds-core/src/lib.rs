// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # rds-core
//!
//! A stateful RDS/RBDS bitstream decoder for Si4703-class FM tuners.
//!
//! This crate is the decoding core only: it demultiplexes the sixteen RDS
//! group types, reassembles Program Service/RadioText/PTY-name/TMC-ID
//! strings, accumulates alternate-frequency lists, binds Open Data
//! Applications to group variants, reassembles multi-group Traffic Message
//! Channel messages, and maintains decayed statistics separating real
//! signal from noise. It never touches hardware: callers hand it
//! `(blocks, correction_flags)` tuples, either live from a tuner driver via
//! [`source::SourceAdapter`] or replayed from an RDS-Spy capture log via
//! [`source::LogFileSource`].
//!
//! ## Quick start
//!
//! ```rust
//! use rds_core::config::DecoderConfig;
//! use rds_core::session::RdsSession;
//! use rds_core::report::Reporter;
//!
//! let mut session = RdsSession::new(DecoderConfig::default());
//! session.feed((0x232D, 0x0000, 0x0000, 0x5241), [0, 0, 0, 0]);
//! session.feed((0x232D, 0x0001, 0x0000, 0x4449), [0, 0, 0, 0]);
//! session.feed((0x232D, 0x0002, 0x0000, 0x4F20), [0, 0, 0, 0]);
//! session.feed((0x232D, 0x0003, 0x0000, 0x2020), [0, 0, 0, 0]);
//!
//! let report = Reporter::new(&session);
//! assert_eq!(report.ps(), "RADIO   ");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! SourceAdapter -> RdsSession::feed -> dedup -> BlockQuality gate
//!   -> GroupDispatcher -> {StringBuffers, AfRegistry, StatRegistry,
//!                          OdaBinder, EonRegistry, TmcAssembler/Cache}
//!   -> Reporter (read-only snapshots)
//! ```
//!
//! Everything mutable lives inside one [`session::RdsSession`] value; there
//! are no module-global singletons. A single mutex around the session is
//! the intended discipline for callers serializing `feed` against
//! concurrent `reset`/`Reporter` queries.

pub mod af;
pub mod bits;
pub mod buffers;
pub mod clock;
pub mod config;
mod dispatch;
pub mod eon;
pub mod error;
pub mod event;
pub mod freq;
pub mod logging;
pub mod oda;
pub mod pcap;
pub mod quality;
pub mod report;
pub mod rtplus;
pub mod session;
pub mod source;
pub mod stats;
pub mod tables;
pub mod tmc;
pub mod variant;

pub use config::DecoderConfig;
pub use event::DecodedEvent;
pub use report::Reporter;
pub use session::RdsSession;
pub use variant::Variant;
