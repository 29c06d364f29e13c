//! Decoded AIS message types and the per-type decoder

use crate::core::{NavigationStatus, Validity};
use crate::error::{AisError, Result};
use crate::layout::{class_b_position, common, position_report, static_data, static_voyage};

/// Class A position report (message types 1, 2 and 3)
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionReport {
    /// Message type (1, 2 or 3)
    pub message_type: u8,
    /// Repeat indicator
    pub repeat: u8,
    /// Maritime Mobile Service Identity
    pub mmsi: u32,
    /// Navigational status code (15 = not defined)
    pub nav_status: u8,
    /// Rate of turn in ROT_AIS units (-128 = not available)
    pub turn_rate: i8,
    /// Speed over ground in knots (102.3 = not available)
    pub speed_over_ground: f64,
    /// Position accuracy flag (true = better than 10 m)
    pub position_accuracy: bool,
    /// Longitude in degrees (181 = not available)
    pub longitude: f64,
    /// Latitude in degrees (91 = not available)
    pub latitude: f64,
    /// Course over ground in degrees (360 = not available)
    pub course_over_ground: f64,
    /// True heading in degrees (511 = not available)
    pub true_heading: u16,
    /// UTC second of the report (60 = not available)
    pub timestamp: u8,
}

impl PositionReport {
    fn decode(bits: &[bool]) -> Result<Self> {
        Ok(PositionReport {
            message_type: common::MESSAGE_TYPE.read_raw(bits)? as u8,
            repeat: common::REPEAT.read_raw(bits)? as u8,
            mmsi: common::MMSI.read_raw(bits)? as u32,
            nav_status: position_report::NAV_STATUS.read_raw(bits)? as u8,
            turn_rate: position_report::TURN_RATE.read_raw(bits)? as i8,
            speed_over_ground: position_report::SPEED_OVER_GROUND.read_scaled(bits)?,
            position_accuracy: position_report::POSITION_ACCURACY.read_flag(bits)?,
            longitude: position_report::LONGITUDE.read_scaled(bits)?,
            latitude: position_report::LATITUDE.read_scaled(bits)?,
            course_over_ground: position_report::COURSE_OVER_GROUND.read_scaled(bits)?,
            true_heading: position_report::TRUE_HEADING.read_raw(bits)? as u16,
            timestamp: position_report::TIMESTAMP.read_raw(bits)? as u8,
        })
    }

    /// Navigational status as an enum
    pub fn navigation_status(&self) -> Result<NavigationStatus> {
        NavigationStatus::try_from(self.nav_status)
    }

    /// Rate of turn in degrees per minute, signed, if a turn indicator
    /// value is available
    pub fn rate_of_turn_degrees(&self) -> Option<f64> {
        match self.turn_rate {
            -128 => None,
            raw => {
                let magnitude = (f64::from(raw) / 4.733).powi(2);
                Some(if raw < 0 { -magnitude } else { magnitude })
            }
        }
    }
}

/// Static and voyage related data (message type 5)
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaticVoyageData {
    /// Repeat indicator
    pub repeat: u8,
    /// Maritime Mobile Service Identity
    pub mmsi: u32,
    /// IMO ship identification number (0 = not available)
    pub imo: u32,
    /// Call sign, up to 7 characters
    pub callsign: String,
    /// Vessel name, up to 20 characters
    pub shipname: String,
    /// Ship and cargo type code
    pub cargo_type: u8,
    /// Distance from reference point to bow, metres
    pub dim_a: u16,
    /// Distance from reference point to stern, metres
    pub dim_b: u16,
    /// Distance from reference point to port side, metres
    pub dim_c: u8,
    /// Distance from reference point to starboard side, metres
    pub dim_d: u8,
    /// ETA month (0 = not available)
    pub eta_month: u8,
    /// ETA day (0 = not available)
    pub eta_day: u8,
    /// ETA hour (24 = not available)
    pub eta_hour: u8,
    /// ETA minute (60 = not available)
    pub eta_minute: u8,
    /// Maximum present static draught, metres
    pub draught: f64,
    /// Destination, up to 20 characters
    pub destination: String,
}

impl StaticVoyageData {
    fn decode(bits: &[bool]) -> Result<Self> {
        Ok(StaticVoyageData {
            repeat: common::REPEAT.read_raw(bits)? as u8,
            mmsi: common::MMSI.read_raw(bits)? as u32,
            imo: static_voyage::IMO.read_raw(bits)? as u32,
            callsign: static_voyage::CALLSIGN.read_text(bits)?,
            shipname: static_voyage::SHIPNAME.read_text(bits)?,
            cargo_type: static_voyage::CARGO_TYPE.read_raw(bits)? as u8,
            dim_a: static_voyage::DIM_A.read_raw(bits)? as u16,
            dim_b: static_voyage::DIM_B.read_raw(bits)? as u16,
            dim_c: static_voyage::DIM_C.read_raw(bits)? as u8,
            dim_d: static_voyage::DIM_D.read_raw(bits)? as u8,
            eta_month: static_voyage::ETA_MONTH.read_raw(bits)? as u8,
            eta_day: static_voyage::ETA_DAY.read_raw(bits)? as u8,
            eta_hour: static_voyage::ETA_HOUR.read_raw(bits)? as u8,
            eta_minute: static_voyage::ETA_MINUTE.read_raw(bits)? as u8,
            draught: static_voyage::DRAUGHT.read_scaled(bits)?,
            destination: static_voyage::DESTINATION.read_text(bits)?,
        })
    }

    /// Overall length in metres
    pub fn length(&self) -> u16 {
        self.dim_a + self.dim_b
    }

    /// Overall beam in metres
    pub fn width(&self) -> u16 {
        u16::from(self.dim_c) + u16::from(self.dim_d)
    }
}

/// Standard class B position report (message type 18)
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassBPositionReport {
    /// Repeat indicator
    pub repeat: u8,
    /// Maritime Mobile Service Identity
    pub mmsi: u32,
    /// Speed over ground in knots (102.3 = not available)
    pub speed_over_ground: f64,
    /// Position accuracy flag
    pub position_accuracy: bool,
    /// Longitude in degrees (181 = not available)
    pub longitude: f64,
    /// Latitude in degrees (91 = not available)
    pub latitude: f64,
    /// Course over ground in degrees (360 = not available)
    pub course_over_ground: f64,
    /// True heading in degrees (511 = not available)
    pub true_heading: u16,
    /// UTC second of the report (60 = not available)
    pub timestamp: u8,
}

impl ClassBPositionReport {
    fn decode(bits: &[bool]) -> Result<Self> {
        Ok(ClassBPositionReport {
            repeat: common::REPEAT.read_raw(bits)? as u8,
            mmsi: common::MMSI.read_raw(bits)? as u32,
            speed_over_ground: class_b_position::SPEED_OVER_GROUND.read_scaled(bits)?,
            position_accuracy: class_b_position::POSITION_ACCURACY.read_flag(bits)?,
            longitude: class_b_position::LONGITUDE.read_scaled(bits)?,
            latitude: class_b_position::LATITUDE.read_scaled(bits)?,
            course_over_ground: class_b_position::COURSE_OVER_GROUND.read_scaled(bits)?,
            true_heading: class_b_position::TRUE_HEADING.read_raw(bits)? as u16,
            timestamp: class_b_position::TIMESTAMP.read_raw(bits)? as u8,
        })
    }
}

/// Class B static data, part A (message type 24, part 0)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaticDataPartA {
    /// Repeat indicator
    pub repeat: u8,
    /// Maritime Mobile Service Identity
    pub mmsi: u32,
    /// Vessel name, up to 20 characters
    pub shipname: String,
}

impl StaticDataPartA {
    fn decode(bits: &[bool]) -> Result<Self> {
        Ok(StaticDataPartA {
            repeat: common::REPEAT.read_raw(bits)? as u8,
            mmsi: common::MMSI.read_raw(bits)? as u32,
            shipname: static_data::PART_A_SHIPNAME.read_text(bits)?,
        })
    }
}

/// Class B static data, part B (message type 24, part 1)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaticDataPartB {
    /// Repeat indicator
    pub repeat: u8,
    /// Maritime Mobile Service Identity
    pub mmsi: u32,
    /// Ship and cargo type code
    pub cargo_type: u8,
    /// Equipment vendor id, up to 3 characters
    pub vendor_id: String,
    /// Call sign, up to 7 characters
    pub callsign: String,
    /// Distance from reference point to bow, metres
    pub dim_a: u16,
    /// Distance from reference point to stern, metres
    pub dim_b: u16,
    /// Distance from reference point to port side, metres
    pub dim_c: u8,
    /// Distance from reference point to starboard side, metres
    pub dim_d: u8,
}

impl StaticDataPartB {
    fn decode(bits: &[bool]) -> Result<Self> {
        Ok(StaticDataPartB {
            repeat: common::REPEAT.read_raw(bits)? as u8,
            mmsi: common::MMSI.read_raw(bits)? as u32,
            cargo_type: static_data::PART_B_CARGO_TYPE.read_raw(bits)? as u8,
            vendor_id: static_data::PART_B_VENDOR_ID.read_text(bits)?,
            callsign: static_data::PART_B_CALLSIGN.read_text(bits)?,
            dim_a: static_data::PART_B_DIM_A.read_raw(bits)? as u16,
            dim_b: static_data::PART_B_DIM_B.read_raw(bits)? as u16,
            dim_c: static_data::PART_B_DIM_C.read_raw(bits)? as u8,
            dim_d: static_data::PART_B_DIM_D.read_raw(bits)? as u8,
        })
    }

    /// Overall length in metres
    pub fn length(&self) -> u16 {
        self.dim_a + self.dim_b
    }

    /// Overall beam in metres
    pub fn width(&self) -> u16 {
        u16::from(self.dim_c) + u16::from(self.dim_d)
    }
}

/// A decoded message of one of the supported types
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AisMessage {
    /// Types 1, 2, 3
    PositionReport(PositionReport),
    /// Type 5
    StaticVoyage(StaticVoyageData),
    /// Type 18
    ClassBPosition(ClassBPositionReport),
    /// Type 24 part A
    StaticDataA(StaticDataPartA),
    /// Type 24 part B
    StaticDataB(StaticDataPartB),
}

impl AisMessage {
    /// Message type id
    pub fn message_type(&self) -> u8 {
        match self {
            AisMessage::PositionReport(report) => report.message_type,
            AisMessage::StaticVoyage(_) => 5,
            AisMessage::ClassBPosition(_) => 18,
            AisMessage::StaticDataA(_) | AisMessage::StaticDataB(_) => 24,
        }
    }

    /// MMSI of the sending station
    pub fn mmsi(&self) -> u32 {
        match self {
            AisMessage::PositionReport(m) => m.mmsi,
            AisMessage::StaticVoyage(m) => m.mmsi,
            AisMessage::ClassBPosition(m) => m.mmsi,
            AisMessage::StaticDataA(m) => m.mmsi,
            AisMessage::StaticDataB(m) => m.mmsi,
        }
    }
}

/// Outcome of decoding a sentence or a bit sequence
///
/// Semantic fields are only present on [`Validity::Valid`]; an invalid
/// result keeps the raw message type when it could be read, plus the
/// reason decoding failed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecodedMessage {
    validity: Validity,
    message_type: Option<u8>,
    message: Option<AisMessage>,
    error: Option<AisError>,
}

impl DecodedMessage {
    /// A successfully decoded message
    pub fn valid(message: AisMessage) -> Self {
        DecodedMessage {
            validity: Validity::Valid,
            message_type: Some(message.message_type()),
            message: Some(message),
            error: None,
        }
    }

    /// A failed decode
    pub fn invalid(message_type: Option<u8>, error: AisError) -> Self {
        DecodedMessage {
            validity: Validity::Invalid,
            message_type,
            message: None,
            error: Some(error),
        }
    }

    /// A fragment stored while waiting for the rest of the message
    pub fn partial() -> Self {
        DecodedMessage {
            validity: Validity::Partial,
            message_type: None,
            message: None,
            error: None,
        }
    }

    /// Validity of the result
    pub fn validity(&self) -> Validity {
        self.validity
    }

    /// Whether a complete message was decoded
    pub fn is_valid(&self) -> bool {
        self.validity == Validity::Valid
    }

    /// Raw message type id, if it could be read
    pub fn message_type(&self) -> Option<u8> {
        self.message_type
    }

    /// The decoded message
    pub fn message(&self) -> Option<&AisMessage> {
        self.message.as_ref()
    }

    /// Take the decoded message
    pub fn into_message(self) -> Option<AisMessage> {
        self.message
    }

    /// Why decoding failed
    pub fn error(&self) -> Option<&AisError> {
        self.error.as_ref()
    }
}

/// Polymorphic decoder and encoder over the supported message types
pub struct MessageCodec;

impl MessageCodec {
    /// Decode a de-armored payload, reading the type id from its first
    /// six bits
    pub fn decode_payload(bits: &[bool]) -> DecodedMessage {
        if bits.len() < common::MESSAGE_TYPE.end() {
            return DecodedMessage::invalid(
                None,
                AisError::insufficient_data(format!(
                    "{} bits cannot hold a message type",
                    bits.len()
                )),
            );
        }
        match common::MESSAGE_TYPE.read_raw(bits) {
            Ok(type_id) => Self::decode(bits, type_id as u8),
            Err(err) => DecodedMessage::invalid(None, err),
        }
    }

    /// Decode `bits` as a message of type `type_id`
    ///
    /// Never fails: unsupported types and short payloads come back as
    /// [`Validity::Invalid`].
    pub fn decode(bits: &[bool], type_id: u8) -> DecodedMessage {
        match Self::decode_message(bits, type_id) {
            Ok(message) => DecodedMessage::valid(message),
            Err(err) => DecodedMessage::invalid(Some(type_id), err),
        }
    }

    fn decode_message(bits: &[bool], type_id: u8) -> Result<AisMessage> {
        let required = match type_id {
            1..=3 | 5 | 18 => common::IDENTITY_BITS,
            24 => static_data::IDENTITY_BITS,
            other => return Err(AisError::UnsupportedType(other)),
        };
        if bits.len() < required {
            return Err(AisError::insufficient_data(format!(
                "Type {type_id} needs at least {required} bits, got {}",
                bits.len()
            )));
        }

        match type_id {
            1..=3 => {
                let mut report = PositionReport::decode(bits)?;
                report.message_type = type_id;
                Ok(AisMessage::PositionReport(report))
            }
            5 => Ok(AisMessage::StaticVoyage(StaticVoyageData::decode(bits)?)),
            18 => Ok(AisMessage::ClassBPosition(ClassBPositionReport::decode(bits)?)),
            _ => match static_data::PART_NUMBER.read_raw(bits)? {
                0 => Ok(AisMessage::StaticDataA(StaticDataPartA::decode(bits)?)),
                1 => Ok(AisMessage::StaticDataB(StaticDataPartB::decode(bits)?)),
                part => Err(AisError::validation(format!(
                    "Type 24 part number {part} is not defined"
                ))),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::ArmorDecoder;
    use crate::request::{EncodeRequest, StaticDataARequest};
    use test_case::test_case;

    fn payload_bits(payload: &str, fill: u8) -> Vec<bool> {
        ArmorDecoder::armor_to_bits_with_fill(payload, fill).unwrap()
    }

    #[test]
    fn test_decode_class_b_position() {
        let bits = payload_bits("B69>7mh0?B<:>05B0`0e8TN000000", 0);
        let decoded = MessageCodec::decode_payload(&bits);
        assert!(decoded.is_valid());
        assert_eq!(decoded.message_type(), Some(18));

        let Some(AisMessage::ClassBPosition(report)) = decoded.message() else {
            panic!("expected a class B position report, got {decoded:?}");
        };
        assert_eq!(report.mmsi, 412321751);
        assert!((report.longitude - 122.47338666666667).abs() < 1e-9);
        assert!((report.latitude - 36.91968).abs() < 1e-9);
        assert!((report.course_over_ground - 72.2).abs() < 1e-9);
        assert!((report.speed_over_ground - 6.1).abs() < 1e-9);
        assert!(!report.position_accuracy);
    }

    #[test]
    fn test_decode_static_voyage() {
        let bits = payload_bits(
            "55?MbV42;H;s<HtKR20EHE:0@T4@Dn2222222216L961O0000i000000000000000000000",
            0,
        );
        let decoded = MessageCodec::decode_payload(&bits);
        let Some(AisMessage::StaticVoyage(data)) = decoded.into_message() else {
            panic!("expected static voyage data");
        };
        assert_eq!(data.mmsi, 351759000);
        assert_eq!(data.imo, 9134270);
        assert_eq!(data.callsign, "3FOF8");
        assert_eq!(data.shipname, "EVER DIADEM");
        assert_eq!(data.cargo_type, 70);
        assert_eq!((data.dim_a, data.dim_b, data.dim_c, data.dim_d), (225, 70, 1, 31));
        assert_eq!(data.length(), 295);
        assert_eq!(data.width(), 32);
        assert_eq!(data.destination, "");
    }

    #[test]
    fn test_decode_static_data_part_a() {
        let bits = payload_bits("H42O55i18tMET00000000000000", 0);
        let decoded = MessageCodec::decode_payload(&bits);
        assert_eq!(
            decoded.into_message(),
            Some(AisMessage::StaticDataA(StaticDataPartA {
                repeat: 0,
                mmsi: 271041815,
                shipname: "PROGUY".to_string(),
            }))
        );
    }

    #[test]
    fn test_decode_static_data_part_b() {
        let bits = payload_bits("H42O55lt0000000D3nink000?0500", 0);
        let decoded = MessageCodec::decode_payload(&bits);
        let Some(AisMessage::StaticDataB(data)) = decoded.message() else {
            panic!("expected static data part B");
        };
        assert_eq!(data.mmsi, 271041815);
        assert_eq!(data.cargo_type, 60);
    }

    #[test]
    fn test_unsupported_type_is_invalid() {
        // type 4 base station report
        let bits = payload_bits("403OviQuMGCqWrRO9>E6fE700@GO", 0);
        let decoded = MessageCodec::decode_payload(&bits);
        assert_eq!(decoded.validity(), Validity::Invalid);
        assert_eq!(decoded.message_type(), Some(4));
        assert_eq!(decoded.error(), Some(&AisError::UnsupportedType(4)));
        assert!(decoded.message().is_none());
    }

    #[test_case(false, false, Validity::Valid ; "part A")]
    #[test_case(false, true, Validity::Valid ; "part B")]
    #[test_case(true, false, Validity::Invalid ; "part 2")]
    #[test_case(true, true, Validity::Invalid ; "part 3")]
    fn test_static_data_part_number(high: bool, low: bool, expected: Validity) {
        let request = EncodeRequest::StaticDataA(StaticDataARequest {
            mmsi: Some(271041815),
            shipname: Some("PROGUY".to_string()),
            ..Default::default()
        });
        let mut bits = MessageCodec::encode(&request).unwrap();
        bits[static_data::PART_NUMBER.offset] = high;
        bits[static_data::PART_NUMBER.offset + 1] = low;

        let decoded = MessageCodec::decode_payload(&bits);
        assert_eq!(decoded.validity(), expected);
        assert_eq!(decoded.message_type(), Some(24));
        if expected == Validity::Invalid {
            assert!(matches!(decoded.error(), Some(AisError::Validation(_))));
            assert!(decoded.message().is_none());
        }
    }

    #[test]
    fn test_short_payload_is_invalid() {
        let decoded = MessageCodec::decode(&[false; 20], 1);
        assert_eq!(decoded.validity(), Validity::Invalid);
        assert_eq!(decoded.message_type(), Some(1));
        assert!(matches!(decoded.error(), Some(AisError::InsufficientData(_))));

        let decoded = MessageCodec::decode_payload(&[true; 4]);
        assert_eq!(decoded.message_type(), None);
    }

    #[test]
    fn test_truncated_position_report_keeps_sentinels() {
        // identity section only: everything after it is "not available"
        let bits = payload_bits("B69>7mh0?B<:>05B0`0e8TN000000", 0);
        let mut bits = bits[..38].to_vec();
        bits[0..6].copy_from_slice(&[false, false, false, false, false, true]);
        let decoded = MessageCodec::decode_payload(&bits);
        let Some(AisMessage::PositionReport(report)) = decoded.message() else {
            panic!("expected position report");
        };
        assert_eq!(report.message_type, 1);
        assert_eq!(report.nav_status, 15);
        assert_eq!(report.turn_rate, -128);
        assert_eq!(report.speed_over_ground, 102.3);
        assert_eq!(report.longitude, 181.0);
        assert_eq!(report.latitude, 91.0);
        assert_eq!(report.course_over_ground, 360.0);
        assert_eq!(report.true_heading, 511);
        assert_eq!(report.timestamp, 60);
        assert!(report.rate_of_turn_degrees().is_none());
    }

    #[test]
    fn test_rate_of_turn_degrees() {
        let bits = payload_bits("B69>7mh0?B<:>05B0`0e8TN000000", 0);
        let mut report = PositionReport::decode(&bits).unwrap();
        report.turn_rate = -10;
        let rot = report.rate_of_turn_degrees().unwrap();
        assert!(rot < 0.0);
        assert!((rot + (10.0f64 / 4.733).powi(2)).abs() < 1e-9);
    }
}
