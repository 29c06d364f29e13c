//! # AIVDM/AIVDO Codec
//!
//! A Rust library for decoding and encoding AIS (Automatic Identification
//! System) messages carried in NMEA 0183 `AIVDM`/`AIVDO` sentences.
//!
//! AIS transponders broadcast vessel positions and static data as bit
//! fields. On the wire these bits are armored into six-bit ASCII and
//! wrapped in checksummed NMEA sentences, split across several sentences
//! when the message is long. This library provides:
//!
//! - Sentence framing and checksum validation
//! - Six-bit armoring and de-armoring
//! - Multi-sentence reassembly scoped to a caller-owned context
//! - Bit-level decode and encode of message types 1, 2, 3, 5, 18 and 24
//!
//! ## Features
//!
//! - `serde`: Enable serialization/deserialization support
//!
//! ## Example
//!
//! ```
//! use aivdm_codec::{AisDecoder, AisMessage, Validity};
//!
//! let mut decoder = AisDecoder::new();
//! let decoded = decoder.decode_line("!AIVDM,1,1,,A,B69>7mh0?B<:>05B0`0e8TN000000,0*72");
//! assert_eq!(decoded.validity(), Validity::Valid);
//!
//! if let Some(AisMessage::ClassBPosition(report)) = decoded.message() {
//!     println!("MMSI {} at {:.5}, {:.5}", report.mmsi, report.latitude, report.longitude);
//! }
//! ```
//!
//! Encoding goes the other way:
//!
//! ```
//! use aivdm_codec::{AisEncoderBuilder, Channel, ClassBPositionRequest, EncodeRequest};
//!
//! let mut encoder = AisEncoderBuilder::new().with_channel(Channel::B).build()?;
//! let request = EncodeRequest::ClassBPosition(ClassBPositionRequest {
//!     mmsi: Some(412321751),
//!     speed_over_ground: Some(6.1),
//!     ..Default::default()
//! });
//! let lines = encoder.encode_sentences(&request)?;
//! assert_eq!(lines.len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod bits;
pub mod codec;
pub mod core;
pub mod encoding;
pub mod error;
pub mod fragment;
pub mod frame;
pub mod layout;
pub mod message;
pub mod request;
pub mod sentence;

pub use codec::{decode_sentence, AisDecoder, AisEncoder, AisEncoderBuilder};
pub use core::{Channel, NavigationStatus, Validity};
pub use error::{AisError, Result};
pub use fragment::CorrelationContext;
pub use frame::RawSentence;
pub use message::{
    AisMessage, ClassBPositionReport, DecodedMessage, MessageCodec, PositionReport,
    StaticDataPartA, StaticDataPartB, StaticVoyageData,
};
pub use request::{
    ClassBPositionRequest, EncodeRequest, PositionReportRequest, StaticDataARequest,
    StaticDataBRequest, StaticVoyageRequest,
};
pub use sentence::SentenceBuilder;

/// AIS and NMEA 0183 protocol constants
pub mod limits {
    /// Conventional maximum sentence length, excluding the line terminator
    pub const MAX_SENTENCE_LEN: usize = crate::sentence::MAX_SENTENCE_LEN;

    /// Maximum number of sentences in one message
    pub const MAX_FRAGMENTS: u8 = crate::frame::MAX_FRAGMENTS;

    /// Largest sequential message id
    pub const MAX_SEQ_ID: u8 = crate::frame::MAX_SEQ_ID;

    /// Largest MMSI representable in 30 bits
    pub const MAX_MMSI: u32 = (1 << 30) - 1;

    /// Raw speed units per knot
    pub const SPEED_SCALE: f64 = 10.0;

    /// Raw course units per degree
    pub const COURSE_SCALE: f64 = 10.0;

    /// Raw coordinate units per degree (1/10000 minute)
    pub const COORDINATE_SCALE: f64 = 600_000.0;

    /// Raw draught units per metre
    pub const DRAUGHT_SCALE: f64 = 10.0;

    /// Navigation status "not defined"
    pub const NAV_STATUS_NOT_AVAILABLE: i64 = 15;

    /// Rate of turn "no information"
    pub const TURN_RATE_NOT_AVAILABLE: i64 = -128;

    /// Speed over ground "not available" (102.3 knots)
    pub const SPEED_NOT_AVAILABLE: i64 = 1023;

    /// Longitude "not available" (181 degrees)
    pub const LONGITUDE_NOT_AVAILABLE: i64 = 181 * 600_000;

    /// Latitude "not available" (91 degrees)
    pub const LATITUDE_NOT_AVAILABLE: i64 = 91 * 600_000;

    /// Course over ground "not available" (360 degrees)
    pub const COURSE_NOT_AVAILABLE: i64 = 3600;

    /// True heading "not available"
    pub const HEADING_NOT_AVAILABLE: i64 = 511;

    /// Time stamp "not available"
    pub const TIMESTAMP_NOT_AVAILABLE: i64 = 60;

    /// ETA hour "not available"
    pub const ETA_HOUR_NOT_AVAILABLE: i64 = 24;

    /// ETA minute "not available"
    pub const ETA_MINUTE_NOT_AVAILABLE: i64 = 60;
}
