// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Static reference tables: ODA AID names, PTY names, PI area descriptors,
//! `RadioText+` content-type tags, and group-variant descriptions.
//!
//! These are read-only reference data, injected at construction rather
//! than computed, and owned by the application rather than the decoding
//! core's mutable state.

/// The TMC ODA Application Identifier.
pub const ODA_AID_TMC: u16 = 0xCD46;
/// The `RadioText+` ODA Application Identifier.
pub const ODA_AID_RTPLUS: u16 = 0x4BD7;

/// Area coverage descriptions, indexed by the PI's area-coverage nibble
/// (bits 9..12 of the PI code).
pub const PI_AREA_DESC: [&str; 16] = [
    "local",
    "international",
    "national",
    "supraregional",
    "region1",
    "region2",
    "region3",
    "region4",
    "region5",
    "region6",
    "region7",
    "region8",
    "region9",
    "region10",
    "region11",
    "region12",
];

/// `(RDS name, RBDS name)` pairs, indexed by the 5-bit PTY field.
pub const PTY_NAMES: [(&str, &str); 32] = [
    ("none", "none"),
    ("news", "news"),
    ("current affairs", "information"),
    ("information", "sport"),
    ("sport", "talk"),
    ("education", "rock_music"),
    ("drama", "classic_rock_music"),
    ("culture", "adult_hits"),
    ("science", "soft_rock"),
    ("varied", "top_40"),
    ("pop music", "country"),
    ("rock music", "oldies"),
    ("mor music", "soft"),
    ("light classical", "nostalgia"),
    ("serious classical", "jazz"),
    ("other music", "classical"),
    ("weather", "r&b"),
    ("finance", "soft_r&b"),
    ("childrens programmes", "language"),
    ("social affairs", "religious_music"),
    ("religion", "religious_talk"),
    ("phone in", "personality"),
    ("travel", "public"),
    ("leisure", "college"),
    ("jazz music", "spanish talk"),
    ("country music", "spanish music"),
    ("national music", "hip hop"),
    ("oldies music", "?27"),
    ("folk music", "?28"),
    ("documentary", "weather"),
    ("alarm test", "emergency_test"),
    ("alarm", "emergency"),
];

/// Look up `(rds_name, rbds_name)` for a 5-bit PTY value. Returns `None` for
/// out-of-range input (PTY is always 0..=31 in practice, but callers may
/// pass raw noise-corrupted fields).
#[must_use]
pub fn pty_name(pty: u8) -> Option<(&'static str, &'static str)> {
    PTY_NAMES.get(pty as usize).copied()
}

/// Human description for a group variant, matching the reference decoder's
/// `RDS_GTYPE_desc` table. Unknown variants (none exist in 0..=15B) fall
/// back to `None`.
#[must_use]
pub fn gtype_description(gtype: u8, b0: bool) -> Option<&'static str> {
    Some(match (gtype, b0) {
        (0, false) => "basicTuning",
        (0, true) => "basicTuningB",
        (1, false) => "progItemnoSlowLabel",
        (1, true) => "progItemno",
        (2, false) => "radioText",
        (2, true) => "radioTextB",
        (3, false) => "openDataAppId",
        (3, true) => "oda",
        (4, false) => "clock",
        (4, true) => "oda",
        (5, false) | (5, true) => "TDC/oda",
        (6, false) => "inHouseA",
        (6, true) => "inHouseB",
        (7, false) => "RadioPaging/oda",
        (7, true) => "oda",
        (8, false) => "TMC",
        (8, true) => "oda",
        (9, false) => "EWS/oda",
        (9, true) => "oda",
        (10, false) => "progTypeName",
        (10, true) => "oda",
        (11, false) | (12, false) => "oda-freeformat",
        (11, true) | (12, true) => "oda",
        (13, false) => "enhancedRadioPaging/oda",
        (13, true) => "oda",
        (14, false) => "EON",
        (14, true) => "EON_B",
        (15, false) => "(RBDS only)",
        (15, true) => "fastBasicTuning",
        _ => return None,
    })
}

/// Known ODA AID -> name mappings, for [`crate::report::Reporter`] display.
/// Not exhaustive over the full RDS Forum registry; covers the common and
/// frequently-seen assignments plus a selection of rarer ones.
pub const ODA_AID_NAMES: &[(u16, &str)] = &[
    (0x4bd7, "RT+"),
    (0xcd46, "TMC"),
    (0xe911, "EAS open protocol"),
    (0x0093, "DAB-RDS-crossref"),
    (0x0d45, "TMC ALERT-C test"),
    (0x5757, "personalWeatherStation"),
    (0x6365, "RDS2"),
    (0x6a7a, "WarningReceiverSweden"),
    (0x7373, "Enhanced Early Warning System"),
    (0xc3b0, "iTunes tagging"),
    (0xcd47, "TMC arbPICC"),
    (0x125f, "I-FM-RDS for Fixed and Mobile devices"),
    (0x1c68, "ITIS In-vehicle database"),
    (0x4400, "RDS Light"),
    (0x4bd8, "RT+/eRT"),
    (0x50dd, "DisasterWarning"),
    (0x6552, "Enhanced RadioText / eRT"),
    (0xa112, "NL_Alert System"),
    (0xa911, "Data FM Selective Multipoint"),
    (0xc350, "NRSC Song title and artist"),
    (0xc4d4, "eEAS"),
    (0xc737, "UMC - Utility Message Channel"),
    (0xe123, "APS Gateway"),
    (0xe1c1, "eCARmerce Action code"),
    (0xe411, "Cell-Loc Beacon downlink"),
];

/// Look up a display name for a known ODA AID.
#[must_use]
pub fn oda_aid_name(aid: u16) -> Option<&'static str> {
    ODA_AID_NAMES
        .iter()
        .find(|&&(known, _)| known == aid)
        .map(|&(_, name)| name)
}

/// Number of entries in the fixed `RadioText+` content-type name table.
pub const RTPLUS_TAG_COUNT: usize = 64;

const RTPLUS_TAG_NAMES: [&str; 59] = [
    "dummy_class",
    "item_title",
    "item_album",
    "item_tracknumber",
    "item_artist",
    "item_composition",
    "item_movement",
    "item_conductor",
    "item_composer",
    "item_band",
    "item_comment",
    "item_genre",
    "info_news",
    "info_news_local",
    "info_stockmarket",
    "info_sport",
    "info_lottery",
    "info_horoscope",
    "info_daily_diversion",
    "info_health",
    "info_event",
    "info_szene",
    "info_cinema",
    "info_stupidity_machine",
    "info_date_time",
    "info_weather",
    "info_traffic",
    "info_alarm",
    "info_advertisement",
    "info_url",
    "info_other",
    "stationname_short",
    "stationname_long",
    "programme_now",
    "programme_next",
    "programme_part",
    "programme_host",
    "programme_editorial_staff",
    "programme_frequency",
    "programme_homepage",
    "programme_subchannel",
    "phone_hotline",
    "phone_studio",
    "phone_other",
    "sms_studio",
    "sms_other",
    "email_hotline",
    "email_studio",
    "email_other",
    "mms_other",
    "chat",
    "chat_center",
    "vote_question",
    "vote_center",
    "place",
    "appointment",
    "identifier",
    "purchase",
    "get_data",
];

/// Name for a `RadioText+` content type, or `None` for the unused/reserved
/// tail of the 64-entry table (rendered numerically by callers).
#[must_use]
pub fn rtplus_tag_name(content_type: u8) -> Option<&'static str> {
    RTPLUS_TAG_NAMES.get(content_type as usize).copied()
}

/// Fixed label-length table for TMC auxiliary data extraction. Index is
/// the 4-bit label; a 0 entry (labels 14, 15) means "no payload defined"
/// for that label.
pub const TMC_LABEL_LENGTHS: [u8; 16] = [3, 3, 5, 5, 5, 8, 8, 8, 8, 11, 16, 16, 16, 16, 0, 0];

/// A handful of sample ALERT-C event descriptions, keyed by event code.
/// The full ISO 14819-2 event catalog (≈2000 entries with duration/severity
/// metadata) is licensed reference data outside this crate's scope; callers
/// needing it inject their own table at construction.
pub const TMC_EVENT_SAMPLE: &[(u16, &str)] = &[
    (1, "traffic problem"),
    (101, "accident"),
    (231, "roadworks"),
    (263, "closed"),
    (0x0e7, "queuing traffic"),
];

/// Look up a sample event description, if present in [`TMC_EVENT_SAMPLE`].
#[must_use]
pub fn tmc_event_name(event: u16) -> Option<&'static str> {
    TMC_EVENT_SAMPLE
        .iter()
        .find(|&&(code, _)| code == event)
        .map(|&(_, name)| name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pty_name_covers_full_5_bit_range() {
        assert_eq!(pty_name(0), Some(("none", "none")));
        assert_eq!(pty_name(31), Some(("alarm", "emergency")));
        assert_eq!(pty_name(32), None);
    }

    #[test]
    fn gtype_description_matches_reference_table() {
        assert_eq!(gtype_description(8, false), Some("TMC"));
        assert_eq!(gtype_description(14, true), Some("EON_B"));
    }

    #[test]
    fn oda_aid_name_known_and_unknown() {
        assert_eq!(oda_aid_name(0xcd46), Some("TMC"));
        assert_eq!(oda_aid_name(0x0000), None);
    }

    #[test]
    fn rtplus_tag_table_has_64_logical_slots_with_59_named() {
        assert_eq!(rtplus_tag_name(0), Some("dummy_class"));
        assert_eq!(rtplus_tag_name(58), Some("get_data"));
        assert_eq!(rtplus_tag_name(59), None);
        assert_eq!(rtplus_tag_name(63), None);
    }

    #[test]
    fn tmc_label_lengths_match_reference_table() {
        assert_eq!(TMC_LABEL_LENGTHS[0], 3);
        assert_eq!(TMC_LABEL_LENGTHS[9], 11);
        assert_eq!(TMC_LABEL_LENGTHS[14], 0);
        assert_eq!(TMC_LABEL_LENGTHS[15], 0);
    }
}
