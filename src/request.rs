//! Encode requests and the per-type encoder
//!
//! Request structs mirror the decoded message types with every field
//! optional. Absent fields are written as their "not available" sentinel;
//! only the MMSI is mandatory.

use crate::bits::BitWriter;
use crate::error::{AisError, Result};
use crate::layout::{class_b_position, common, position_report, static_data, static_voyage};
use crate::message::{
    AisMessage, ClassBPositionReport, MessageCodec, PositionReport, StaticDataPartA,
    StaticDataPartB, StaticVoyageData,
};

fn start(
    message_type: u8,
    repeat: Option<u8>,
    mmsi: Option<u32>,
    capacity: usize,
) -> Result<BitWriter> {
    let mmsi = mmsi.ok_or_else(|| AisError::missing_field(common::MMSI.name))?;
    let mut writer = BitWriter::with_capacity(capacity);
    common::MESSAGE_TYPE.write_raw(&mut writer, Some(i64::from(message_type)))?;
    common::REPEAT.write_raw(&mut writer, repeat.map(i64::from))?;
    common::MMSI.write_raw(&mut writer, Some(i64::from(mmsi)))?;
    Ok(writer)
}

fn finish(mut writer: BitWriter, bit_length: usize) -> Result<Vec<bool>> {
    writer.pad_to(bit_length)?;
    Ok(writer.into_bits())
}

/// Fields of a class A position report to encode
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionReportRequest {
    /// Message type (1, 2 or 3)
    pub message_type: u8,
    /// Repeat indicator
    pub repeat: Option<u8>,
    /// Maritime Mobile Service Identity, required
    pub mmsi: Option<u32>,
    /// Navigational status code
    pub nav_status: Option<u8>,
    /// Rate of turn in ROT_AIS units
    pub turn_rate: Option<i8>,
    /// Speed over ground in knots
    pub speed_over_ground: Option<f64>,
    /// High position accuracy flag
    pub position_accuracy: Option<bool>,
    /// Longitude in degrees, east positive
    pub longitude: Option<f64>,
    /// Latitude in degrees, north positive
    pub latitude: Option<f64>,
    /// Course over ground in degrees
    pub course_over_ground: Option<f64>,
    /// True heading in degrees
    pub true_heading: Option<u16>,
    /// UTC second of the report
    pub timestamp: Option<u8>,
}

impl Default for PositionReportRequest {
    fn default() -> Self {
        PositionReportRequest {
            message_type: 1,
            repeat: None,
            mmsi: None,
            nav_status: None,
            turn_rate: None,
            speed_over_ground: None,
            position_accuracy: None,
            longitude: None,
            latitude: None,
            course_over_ground: None,
            true_heading: None,
            timestamp: None,
        }
    }
}

impl PositionReportRequest {
    fn encode(&self) -> Result<Vec<bool>> {
        if !(1..=3).contains(&self.message_type) {
            return Err(AisError::UnsupportedType(self.message_type));
        }
        let mut w = start(
            self.message_type,
            self.repeat,
            self.mmsi,
            position_report::BIT_LENGTH,
        )?;
        position_report::NAV_STATUS.write_raw(&mut w, self.nav_status.map(i64::from))?;
        position_report::TURN_RATE.write_raw(&mut w, self.turn_rate.map(i64::from))?;
        position_report::SPEED_OVER_GROUND.write_scaled(&mut w, self.speed_over_ground)?;
        position_report::POSITION_ACCURACY.write_flag(&mut w, self.position_accuracy)?;
        position_report::LONGITUDE.write_scaled(&mut w, self.longitude)?;
        position_report::LATITUDE.write_scaled(&mut w, self.latitude)?;
        position_report::COURSE_OVER_GROUND.write_scaled(&mut w, self.course_over_ground)?;
        position_report::TRUE_HEADING.write_raw(&mut w, self.true_heading.map(i64::from))?;
        position_report::TIMESTAMP.write_raw(&mut w, self.timestamp.map(i64::from))?;
        finish(w, position_report::BIT_LENGTH)
    }
}

impl From<&PositionReport> for PositionReportRequest {
    fn from(m: &PositionReport) -> Self {
        PositionReportRequest {
            message_type: m.message_type,
            repeat: Some(m.repeat),
            mmsi: Some(m.mmsi),
            nav_status: Some(m.nav_status),
            turn_rate: Some(m.turn_rate),
            speed_over_ground: Some(m.speed_over_ground),
            position_accuracy: Some(m.position_accuracy),
            longitude: Some(m.longitude),
            latitude: Some(m.latitude),
            course_over_ground: Some(m.course_over_ground),
            true_heading: Some(m.true_heading),
            timestamp: Some(m.timestamp),
        }
    }
}

/// Fields of a static and voyage data message to encode
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaticVoyageRequest {
    /// Repeat indicator
    pub repeat: Option<u8>,
    /// Maritime Mobile Service Identity, required
    pub mmsi: Option<u32>,
    /// IMO ship identification number
    pub imo: Option<u32>,
    /// Call sign, up to 7 characters
    pub callsign: Option<String>,
    /// Vessel name, up to 20 characters
    pub shipname: Option<String>,
    /// Ship and cargo type code
    pub cargo_type: Option<u8>,
    /// Reference point to bow in metres
    pub dim_a: Option<u16>,
    /// Reference point to stern in metres
    pub dim_b: Option<u16>,
    /// Reference point to port side in metres
    pub dim_c: Option<u8>,
    /// Reference point to starboard side in metres
    pub dim_d: Option<u8>,
    /// ETA month
    pub eta_month: Option<u8>,
    /// ETA day
    pub eta_day: Option<u8>,
    /// ETA hour
    pub eta_hour: Option<u8>,
    /// ETA minute
    pub eta_minute: Option<u8>,
    /// Static draught in metres
    pub draught: Option<f64>,
    /// Destination, up to 20 characters
    pub destination: Option<String>,
}

impl StaticVoyageRequest {
    fn encode(&self) -> Result<Vec<bool>> {
        let mut w = start(5, self.repeat, self.mmsi, static_voyage::BIT_LENGTH)?;
        static_voyage::IMO.write_raw(&mut w, self.imo.map(i64::from))?;
        static_voyage::CALLSIGN.write_text(&mut w, self.callsign.as_deref())?;
        static_voyage::SHIPNAME.write_text(&mut w, self.shipname.as_deref())?;
        static_voyage::CARGO_TYPE.write_raw(&mut w, self.cargo_type.map(i64::from))?;
        static_voyage::DIM_A.write_raw(&mut w, self.dim_a.map(i64::from))?;
        static_voyage::DIM_B.write_raw(&mut w, self.dim_b.map(i64::from))?;
        static_voyage::DIM_C.write_raw(&mut w, self.dim_c.map(i64::from))?;
        static_voyage::DIM_D.write_raw(&mut w, self.dim_d.map(i64::from))?;
        static_voyage::ETA_MONTH.write_raw(&mut w, self.eta_month.map(i64::from))?;
        static_voyage::ETA_DAY.write_raw(&mut w, self.eta_day.map(i64::from))?;
        static_voyage::ETA_HOUR.write_raw(&mut w, self.eta_hour.map(i64::from))?;
        static_voyage::ETA_MINUTE.write_raw(&mut w, self.eta_minute.map(i64::from))?;
        static_voyage::DRAUGHT.write_scaled(&mut w, self.draught)?;
        static_voyage::DESTINATION.write_text(&mut w, self.destination.as_deref())?;
        finish(w, static_voyage::BIT_LENGTH)
    }
}

impl From<&StaticVoyageData> for StaticVoyageRequest {
    fn from(m: &StaticVoyageData) -> Self {
        StaticVoyageRequest {
            repeat: Some(m.repeat),
            mmsi: Some(m.mmsi),
            imo: Some(m.imo),
            callsign: Some(m.callsign.clone()),
            shipname: Some(m.shipname.clone()),
            cargo_type: Some(m.cargo_type),
            dim_a: Some(m.dim_a),
            dim_b: Some(m.dim_b),
            dim_c: Some(m.dim_c),
            dim_d: Some(m.dim_d),
            eta_month: Some(m.eta_month),
            eta_day: Some(m.eta_day),
            eta_hour: Some(m.eta_hour),
            eta_minute: Some(m.eta_minute),
            draught: Some(m.draught),
            destination: Some(m.destination.clone()),
        }
    }
}

/// Fields of a class B position report to encode
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassBPositionRequest {
    /// Repeat indicator
    pub repeat: Option<u8>,
    /// Maritime Mobile Service Identity, required
    pub mmsi: Option<u32>,
    /// Speed over ground in knots
    pub speed_over_ground: Option<f64>,
    /// High position accuracy flag
    pub position_accuracy: Option<bool>,
    /// Longitude in degrees, east positive
    pub longitude: Option<f64>,
    /// Latitude in degrees, north positive
    pub latitude: Option<f64>,
    /// Course over ground in degrees
    pub course_over_ground: Option<f64>,
    /// True heading in degrees
    pub true_heading: Option<u16>,
    /// UTC second of the report
    pub timestamp: Option<u8>,
}

impl ClassBPositionRequest {
    fn encode(&self) -> Result<Vec<bool>> {
        let mut w = start(18, self.repeat, self.mmsi, class_b_position::BIT_LENGTH)?;
        class_b_position::SPEED_OVER_GROUND.write_scaled(&mut w, self.speed_over_ground)?;
        class_b_position::POSITION_ACCURACY.write_flag(&mut w, self.position_accuracy)?;
        class_b_position::LONGITUDE.write_scaled(&mut w, self.longitude)?;
        class_b_position::LATITUDE.write_scaled(&mut w, self.latitude)?;
        class_b_position::COURSE_OVER_GROUND.write_scaled(&mut w, self.course_over_ground)?;
        class_b_position::TRUE_HEADING.write_raw(&mut w, self.true_heading.map(i64::from))?;
        class_b_position::TIMESTAMP.write_raw(&mut w, self.timestamp.map(i64::from))?;
        finish(w, class_b_position::BIT_LENGTH)
    }
}

impl From<&ClassBPositionReport> for ClassBPositionRequest {
    fn from(m: &ClassBPositionReport) -> Self {
        ClassBPositionRequest {
            repeat: Some(m.repeat),
            mmsi: Some(m.mmsi),
            speed_over_ground: Some(m.speed_over_ground),
            position_accuracy: Some(m.position_accuracy),
            longitude: Some(m.longitude),
            latitude: Some(m.latitude),
            course_over_ground: Some(m.course_over_ground),
            true_heading: Some(m.true_heading),
            timestamp: Some(m.timestamp),
        }
    }
}

/// Fields of a class B static data part A to encode
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaticDataARequest {
    /// Repeat indicator
    pub repeat: Option<u8>,
    /// Maritime Mobile Service Identity, required
    pub mmsi: Option<u32>,
    /// Vessel name, up to 20 characters
    pub shipname: Option<String>,
}

impl StaticDataARequest {
    fn encode(&self) -> Result<Vec<bool>> {
        let mut w = start(24, self.repeat, self.mmsi, static_data::PART_A_BIT_LENGTH)?;
        static_data::PART_NUMBER.write_raw(&mut w, Some(0))?;
        static_data::PART_A_SHIPNAME.write_text(&mut w, self.shipname.as_deref())?;
        finish(w, static_data::PART_A_BIT_LENGTH)
    }
}

impl From<&StaticDataPartA> for StaticDataARequest {
    fn from(m: &StaticDataPartA) -> Self {
        StaticDataARequest {
            repeat: Some(m.repeat),
            mmsi: Some(m.mmsi),
            shipname: Some(m.shipname.clone()),
        }
    }
}

/// Fields of a class B static data part B to encode
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaticDataBRequest {
    /// Repeat indicator
    pub repeat: Option<u8>,
    /// Maritime Mobile Service Identity, required
    pub mmsi: Option<u32>,
    /// Ship and cargo type code
    pub cargo_type: Option<u8>,
    /// Equipment vendor id, up to 3 characters
    pub vendor_id: Option<String>,
    /// Call sign, up to 7 characters
    pub callsign: Option<String>,
    /// Reference point to bow in metres
    pub dim_a: Option<u16>,
    /// Reference point to stern in metres
    pub dim_b: Option<u16>,
    /// Reference point to port side in metres
    pub dim_c: Option<u8>,
    /// Reference point to starboard side in metres
    pub dim_d: Option<u8>,
}

impl StaticDataBRequest {
    fn encode(&self) -> Result<Vec<bool>> {
        let mut w = start(24, self.repeat, self.mmsi, static_data::PART_B_BIT_LENGTH)?;
        static_data::PART_NUMBER.write_raw(&mut w, Some(1))?;
        static_data::PART_B_CARGO_TYPE.write_raw(&mut w, self.cargo_type.map(i64::from))?;
        static_data::PART_B_VENDOR_ID.write_text(&mut w, self.vendor_id.as_deref())?;
        static_data::PART_B_CALLSIGN.write_text(&mut w, self.callsign.as_deref())?;
        static_data::PART_B_DIM_A.write_raw(&mut w, self.dim_a.map(i64::from))?;
        static_data::PART_B_DIM_B.write_raw(&mut w, self.dim_b.map(i64::from))?;
        static_data::PART_B_DIM_C.write_raw(&mut w, self.dim_c.map(i64::from))?;
        static_data::PART_B_DIM_D.write_raw(&mut w, self.dim_d.map(i64::from))?;
        finish(w, static_data::PART_B_BIT_LENGTH)
    }
}

impl From<&StaticDataPartB> for StaticDataBRequest {
    fn from(m: &StaticDataPartB) -> Self {
        StaticDataBRequest {
            repeat: Some(m.repeat),
            mmsi: Some(m.mmsi),
            cargo_type: Some(m.cargo_type),
            vendor_id: Some(m.vendor_id.clone()),
            callsign: Some(m.callsign.clone()),
            dim_a: Some(m.dim_a),
            dim_b: Some(m.dim_b),
            dim_c: Some(m.dim_c),
            dim_d: Some(m.dim_d),
        }
    }
}

/// A message to encode
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EncodeRequest {
    /// Types 1, 2, 3
    PositionReport(PositionReportRequest),
    /// Type 5
    StaticVoyage(StaticVoyageRequest),
    /// Type 18
    ClassBPosition(ClassBPositionRequest),
    /// Type 24 part A
    StaticDataA(StaticDataARequest),
    /// Type 24 part B
    StaticDataB(StaticDataBRequest),
}

impl EncodeRequest {
    /// Message type id the request encodes to
    pub fn message_type(&self) -> u8 {
        match self {
            EncodeRequest::PositionReport(request) => request.message_type,
            EncodeRequest::StaticVoyage(_) => 5,
            EncodeRequest::ClassBPosition(_) => 18,
            EncodeRequest::StaticDataA(_) | EncodeRequest::StaticDataB(_) => 24,
        }
    }
}

impl From<&AisMessage> for EncodeRequest {
    fn from(message: &AisMessage) -> Self {
        match message {
            AisMessage::PositionReport(m) => EncodeRequest::PositionReport(m.into()),
            AisMessage::StaticVoyage(m) => EncodeRequest::StaticVoyage(m.into()),
            AisMessage::ClassBPosition(m) => EncodeRequest::ClassBPosition(m.into()),
            AisMessage::StaticDataA(m) => EncodeRequest::StaticDataA(m.into()),
            AisMessage::StaticDataB(m) => EncodeRequest::StaticDataB(m.into()),
        }
    }
}

impl AisMessage {
    /// Request that re-encodes this message field for field
    pub fn to_request(&self) -> EncodeRequest {
        EncodeRequest::from(self)
    }
}

impl MessageCodec {
    /// Encode a request into its bit sequence
    ///
    /// Fails with the offending field's name when the MMSI is missing or a
    /// value does not fit its bit range; nothing partial is returned.
    pub fn encode(request: &EncodeRequest) -> Result<Vec<bool>> {
        match request {
            EncodeRequest::PositionReport(r) => r.encode(),
            EncodeRequest::StaticVoyage(r) => r.encode(),
            EncodeRequest::ClassBPosition(r) => r.encode(),
            EncodeRequest::StaticDataA(r) => r.encode(),
            EncodeRequest::StaticDataB(r) => r.encode(),
        }
    }
}
