// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types surfaced at the `SourceAdapter` / log-replay / pcap boundary.
//!
//! The decoding core never unwinds to its caller over malformed RDS content
//! (bad blocks, out-of-order TMC groups, unbound ODA variants); those
//! conditions are absorbed into [`crate::stats::StatRegistry`] and friends.
//! These variants only cover failures at the edges: reading from hardware,
//! parsing a captured log line, or building a synthetic capture packet.

use std::fmt;

/// Result type used at the core's I/O boundary.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by [`crate::source::SourceAdapter`] implementations and the
/// optional log/pcap facilities.
#[derive(Debug)]
pub enum Error {
    /// The underlying hardware or replay source failed to produce a reading.
    SourceUnavailable(String),

    /// A seek/tune request could not be satisfied.
    SeekFailed(String),

    /// A log line did not match the RDS-Spy block format.
    MalformedLogLine(String),

    /// A pcap/RFtap capture could not be assembled (e.g. payload too large).
    CaptureError(String),

    /// Wraps an underlying I/O failure (file read for log replay, etc).
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceUnavailable(msg) => write!(f, "RDS source unavailable: {msg}"),
            Self::SeekFailed(msg) => write!(f, "seek failed: {msg}"),
            Self::MalformedLogLine(line) => write!(f, "malformed RDS log line: {line}"),
            Self::CaptureError(msg) => write!(f, "capture error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_malformed_log_line_with_its_content() {
        let err = Error::MalformedLogLine("not a block line".to_string());
        assert_eq!(err.to_string(), "malformed RDS log line: not a block line");
    }

    #[test]
    fn wraps_io_error_as_source() {
        use std::error::Error as _;
        let io_err = std::io::Error::other("disk gone");
        let err: Error = io_err.into();
        assert!(err.source().is_some());
    }
}
