// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Synthetic pcap/RFtap capture output, so a replayed or live RDS session
//! can be opened in Wireshark.
//!
//! This is pure byte-buffer construction: no file handle lives here. The
//! caller (the `rds-cli` crate) owns the output file and writes
//! [`global_header`] once followed by one [`packet`] per captured group.
//! Ethernet/IPv4/UDP addressing and checksums are synthetic placeholders —
//! this capture exists so RDS groups can be opened in Wireshark via the
//! RFtap dissector, not to represent a real network path.

/// Standard pcap global file header: magic `0xA1B2C3D4`, version 2.4,
/// `thiszone`/`sigfigs` zero, snaplen 65535, linktype 1 (Ethernet).
#[must_use]
pub fn global_header() -> [u8; 24] {
    let mut out = [0u8; 24];
    out[0..4].copy_from_slice(&0xA1B2_C3D4u32.to_le_bytes());
    out[4..6].copy_from_slice(&2u16.to_le_bytes()); // version_major
    out[6..8].copy_from_slice(&4u16.to_le_bytes()); // version_minor
    out[8..12].copy_from_slice(&0u32.to_le_bytes()); // thiszone
    out[12..16].copy_from_slice(&0u32.to_le_bytes()); // sigfigs
    out[16..20].copy_from_slice(&65_535u32.to_le_bytes()); // snaplen
    out[20..24].copy_from_slice(&1u32.to_le_bytes()); // linktype: Ethernet
    out
}

/// RFtap datalink type carried inside the RFtap header (distinct from the
/// outer pcap linktype, which stays Ethernet so ordinary tools can at least
/// parse the Ethernet/IP/UDP wrapper).
pub const RFTAP_DATALINK_TYPE: u32 = 265;

const MAC_DEST: [u8; 6] = [10, 2, 2, 2, 2, 2];
const MAC_SRC: [u8; 6] = [10, 1, 1, 1, 1, 1];
const SRC_IP: [u8; 4] = [10, 1, 1, 1];
const DST_IP: [u8; 4] = [10, 2, 2, 2];
const UDP_DST_PORT: u16 = 0xCB21;

/// Build one capture record: pcap per-packet header, followed by a
/// synthetic Ethernet + IPv4 + UDP + RFtap + raw-RDS-blocks packet.
///
/// `timestamp` is `(seconds, microseconds)` since the Unix epoch, supplied
/// by the caller (this module performs no I/O and reads no clock).
/// `nominal_freq_hz` is the tuned frequency, carried in the RFtap header's
/// nominal-frequency field.
#[must_use]
pub fn packet(blocks: (u16, u16, u16, u16), timestamp: (u32, u32), nominal_freq_hz: f64) -> Vec<u8> {
    let rftap = rftap_header(nominal_freq_hz);
    let rds_payload = rds_payload_bytes(blocks);
    let udp_payload_len = rftap.len() + rds_payload.len();

    let udp = udp_header(udp_payload_len);
    let ipv4 = ipv4_header(udp.len() + udp_payload_len);
    let eth = ethernet_header();

    let mut frame = Vec::with_capacity(eth.len() + ipv4.len() + udp.len() + udp_payload_len);
    frame.extend_from_slice(&eth);
    frame.extend_from_slice(&ipv4);
    frame.extend_from_slice(&udp);
    frame.extend_from_slice(&rftap);
    frame.extend_from_slice(&rds_payload);

    let mut record = Vec::with_capacity(16 + frame.len());
    record.extend_from_slice(&packet_header(timestamp, frame.len()));
    record.extend_from_slice(&frame);
    record
}

fn packet_header(timestamp: (u32, u32), frame_len: usize) -> [u8; 16] {
    let (secs, usec) = timestamp;
    let len = frame_len as u32;
    let mut out = [0u8; 16];
    out[0..4].copy_from_slice(&secs.to_le_bytes());
    out[4..8].copy_from_slice(&usec.to_le_bytes());
    out[8..12].copy_from_slice(&len.to_le_bytes()); // included length
    out[12..16].copy_from_slice(&len.to_le_bytes()); // original length
    out
}

fn ethernet_header() -> [u8; 14] {
    let mut out = [0u8; 14];
    out[0..6].copy_from_slice(&MAC_DEST);
    out[6..12].copy_from_slice(&MAC_SRC);
    out[12..14].copy_from_slice(&0x0800u16.to_be_bytes()); // EtherType: IPv4
    out
}

/// Fixed identification/flags/checksum fields: this is a synthetic capture
/// with no real network path, so these are placeholders rather than
/// computed values, matching the reference dump tool.
fn ipv4_header(payload_len: usize) -> [u8; 20] {
    let total_len = (20 + payload_len) as u16;
    let mut out = [0u8; 20];
    out[0] = 0x45; // version 4, IHL 5 words
    out[1] = 0x00; // DSCP/ECN
    out[2..4].copy_from_slice(&total_len.to_be_bytes());
    out[4..6].copy_from_slice(&0x1234u16.to_be_bytes()); // identification
    out[6..8].copy_from_slice(&0x0000u16.to_be_bytes()); // flags/fragment offset
    out[8] = 255; // TTL
    out[9] = 17; // protocol: UDP
    out[10..12].copy_from_slice(&0x923Eu16.to_be_bytes()); // header checksum (synthetic)
    out[12..16].copy_from_slice(&SRC_IP);
    out[16..20].copy_from_slice(&DST_IP);
    out
}

fn udp_header(payload_len: usize) -> [u8; 8] {
    let total_len = (8 + payload_len) as u16;
    let mut out = [0u8; 8];
    out[0..2].copy_from_slice(&1u16.to_be_bytes()); // source port
    out[2..4].copy_from_slice(&UDP_DST_PORT.to_be_bytes());
    out[4..6].copy_from_slice(&total_len.to_be_bytes());
    out[6..8].copy_from_slice(&0x3319u16.to_be_bytes()); // checksum (synthetic)
    out
}

/// `length` is in 32-bit words (always 5 here: this header has no variable
/// trailer), `flags` is the fixed `0x0005` the reference tool emits.
fn rftap_header(nominal_freq_hz: f64) -> [u8; 20] {
    let mut out = [0u8; 20];
    out[0..4].copy_from_slice(b"RFta");
    out[4..6].copy_from_slice(&5u16.to_le_bytes());
    out[6..8].copy_from_slice(&0x0005u16.to_le_bytes());
    out[8..12].copy_from_slice(&RFTAP_DATALINK_TYPE.to_le_bytes());
    out[12..20].copy_from_slice(&nominal_freq_hz.to_le_bytes());
    out
}

fn rds_payload_bytes(blocks: (u16, u16, u16, u16)) -> [u8; 8] {
    let (a, b, c, d) = blocks;
    let mut out = [0u8; 8];
    out[0..2].copy_from_slice(&a.to_be_bytes());
    out[2..4].copy_from_slice(&b.to_be_bytes());
    out[4..6].copy_from_slice(&c.to_be_bytes());
    out[6..8].copy_from_slice(&d.to_be_bytes());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_header_matches_standard_pcap_layout() {
        let hdr = global_header();
        assert_eq!(&hdr[0..4], &0xA1B2_C3D4u32.to_le_bytes());
        assert_eq!(u16::from_le_bytes([hdr[4], hdr[5]]), 2);
        assert_eq!(u16::from_le_bytes([hdr[6], hdr[7]]), 4);
        assert_eq!(u32::from_le_bytes([hdr[16], hdr[17], hdr[18], hdr[19]]), 65_535);
        assert_eq!(u32::from_le_bytes([hdr[20], hdr[21], hdr[22], hdr[23]]), 1);
    }

    #[test]
    fn packet_frame_length_accounts_for_every_layer() {
        let record = packet((0x232D, 0x0000, 0x0000, 0x5241), (1_700_000_000, 0), 97_500_000.0);
        // 16-byte pcap record header + 14 eth + 20 ip + 8 udp + 20 rftap + 8 rds.
        assert_eq!(record.len(), 16 + 14 + 20 + 8 + 20 + 8);
    }

    #[test]
    fn packet_header_carries_caller_supplied_timestamp() {
        let record = packet((0, 0, 0, 0), (42, 7), 100_000_000.0);
        assert_eq!(u32::from_le_bytes(record[0..4].try_into().unwrap()), 42);
        assert_eq!(u32::from_le_bytes(record[4..8].try_into().unwrap()), 7);
    }

    #[test]
    fn rftap_header_carries_magic_and_datalink_type() {
        let hdr = rftap_header(97_500_000.0);
        assert_eq!(&hdr[0..4], b"RFta");
        assert_eq!(
            u32::from_le_bytes([hdr[8], hdr[9], hdr[10], hdr[11]]),
            RFTAP_DATALINK_TYPE
        );
        let freq = f64::from_le_bytes(hdr[12..20].try_into().unwrap());
        assert!((freq - 97_500_000.0).abs() < 1.0);
    }

    #[test]
    fn rds_payload_packs_blocks_big_endian() {
        let bytes = rds_payload_bytes((0x232D, 0x0000, 0x0000, 0x5241));
        assert_eq!(&bytes[0..2], &[0x23, 0x2D]);
        assert_eq!(&bytes[6..8], &[0x52, 0x41]);
    }
}
