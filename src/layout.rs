//! Bit layout tables of the supported message types
//!
//! Every message field is described once, by a [`Field`] constant holding
//! its offset, width, scaling and "not available" sentinel. Decoding and
//! encoding both go through these constants, so the two directions cannot
//! drift apart.

use crate::bits::{BitReader, BitWriter};
use crate::error::{AisError, Result};

/// How the bits of a field are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Unsigned big-endian integer
    Unsigned,
    /// Two's-complement signed integer
    Signed,
    /// Six-bit packed string
    Text,
}

/// One fixed bit range of a message
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field {
    /// Field name, used in encode errors
    pub name: &'static str,
    /// Offset of the first bit
    pub offset: usize,
    /// Width in bits
    pub width: usize,
    /// Interpretation of the bits
    pub kind: FieldKind,
    /// Raw units per engineering unit (1.0 for unscaled fields)
    pub scale: f64,
    /// Raw value meaning "not available"
    pub sentinel: i64,
}

impl Field {
    const fn unsigned(name: &'static str, offset: usize, width: usize, sentinel: i64) -> Self {
        Field {
            name,
            offset,
            width,
            kind: FieldKind::Unsigned,
            scale: 1.0,
            sentinel,
        }
    }

    const fn signed(name: &'static str, offset: usize, width: usize, sentinel: i64) -> Self {
        Field {
            name,
            offset,
            width,
            kind: FieldKind::Signed,
            scale: 1.0,
            sentinel,
        }
    }

    const fn text(name: &'static str, offset: usize, width: usize) -> Self {
        Field {
            name,
            offset,
            width,
            kind: FieldKind::Text,
            scale: 1.0,
            sentinel: 0,
        }
    }

    const fn scaled(self, scale: f64) -> Self {
        Field { scale, ..self }
    }

    /// First bit after the field
    pub fn end(&self) -> usize {
        self.offset + self.width
    }

    fn reader<'a>(&self, bits: &'a [bool]) -> BitReader<'a> {
        let mut reader = BitReader::new(bits);
        reader.seek(self.offset);
        reader
    }

    /// Raw integer value, or the sentinel when the field starts past the
    /// end of `bits`
    pub fn read_raw(&self, bits: &[bool]) -> Result<i64> {
        if self.offset >= bits.len() {
            return Ok(self.sentinel);
        }
        let mut reader = self.reader(bits);
        match self.kind {
            FieldKind::Unsigned => Ok(reader.read_unsigned(self.width)? as i64),
            FieldKind::Signed => reader.read_signed(self.width),
            FieldKind::Text => Err(AisError::invalid_width(format!(
                "{} is a text field",
                self.name
            ))),
        }
    }

    /// Raw value divided by the field's scale
    pub fn read_scaled(&self, bits: &[bool]) -> Result<f64> {
        Ok(self.read_raw(bits)? as f64 / self.scale)
    }

    /// Single-bit flag
    pub fn read_flag(&self, bits: &[bool]) -> Result<bool> {
        Ok(self.read_raw(bits)? != 0)
    }

    /// Six-bit string with padding and surrounding spaces removed
    pub fn read_text(&self, bits: &[bool]) -> Result<String> {
        if self.offset >= bits.len() {
            return Ok(String::new());
        }
        let text = self.reader(bits).read_six_bit_string(self.width)?;
        Ok(text.trim_start().to_string())
    }

    /// Write a raw integer, or the sentinel when `value` is `None`
    pub fn write_raw(&self, writer: &mut BitWriter, value: Option<i64>) -> Result<()> {
        let raw = value.unwrap_or(self.sentinel);
        writer.pad_to(self.offset)?;
        let written = match self.kind {
            FieldKind::Unsigned if raw < 0 => {
                return Err(AisError::out_of_range(
                    self.name,
                    format!("{raw} is negative"),
                ))
            }
            FieldKind::Unsigned => writer.write_unsigned(raw as u64, self.width),
            FieldKind::Signed => writer.write_signed(raw, self.width),
            FieldKind::Text => Err(AisError::invalid_width(format!(
                "{} is a text field",
                self.name
            ))),
        };
        written.map_err(|err| err.for_field(self.name))
    }

    /// Write a value in engineering units, rounding to the nearest raw step
    pub fn write_scaled(&self, writer: &mut BitWriter, value: Option<f64>) -> Result<()> {
        let raw = match value {
            None => None,
            Some(value) if !value.is_finite() => {
                return Err(AisError::out_of_range(
                    self.name,
                    format!("{value} is not a finite number"),
                ))
            }
            Some(value) => {
                let raw = (value * self.scale).round();
                if raw.abs() > (1u64 << 62) as f64 {
                    return Err(AisError::out_of_range(
                        self.name,
                        format!("{value} does not fit {} bits", self.width),
                    ));
                }
                Some(raw as i64)
            }
        };
        self.write_raw(writer, raw)
    }

    /// Write a single-bit flag (0 when absent)
    pub fn write_flag(&self, writer: &mut BitWriter, value: Option<bool>) -> Result<()> {
        self.write_raw(writer, value.map(i64::from))
    }

    /// Write a six-bit string padded to the field width (all padding when
    /// absent)
    pub fn write_text(&self, writer: &mut BitWriter, value: Option<&str>) -> Result<()> {
        writer.pad_to(self.offset)?;
        writer
            .write_six_bit_string(value.unwrap_or(""), self.width)
            .map_err(|err| err.for_field(self.name))
    }
}

/// Fields shared by every message type
pub mod common {
    use super::Field;

    /// Message type id
    pub const MESSAGE_TYPE: Field = Field::unsigned("message_type", 0, 6, 0);
    /// Repeat indicator
    pub const REPEAT: Field = Field::unsigned("repeat", 6, 2, 0);
    /// Maritime Mobile Service Identity
    pub const MMSI: Field = Field::unsigned("mmsi", 8, 30, 0);

    /// Bits needed to identify the sender of any message
    pub const IDENTITY_BITS: usize = 38;
}

/// Types 1, 2 and 3: class A position report
pub mod position_report {
    use super::Field;
    use crate::limits::*;

    /// Navigational status code
    pub const NAV_STATUS: Field = Field::unsigned("nav_status", 38, 4, NAV_STATUS_NOT_AVAILABLE);
    /// Rate of turn, ROT_AIS units
    pub const TURN_RATE: Field = Field::signed("turn_rate", 42, 8, TURN_RATE_NOT_AVAILABLE);
    /// Speed over ground, knots
    pub const SPEED_OVER_GROUND: Field =
        Field::unsigned("speed_over_ground", 50, 10, SPEED_NOT_AVAILABLE).scaled(SPEED_SCALE);
    /// Position accuracy flag
    pub const POSITION_ACCURACY: Field = Field::unsigned("position_accuracy", 60, 1, 0);
    /// Longitude, degrees
    pub const LONGITUDE: Field =
        Field::signed("longitude", 61, 28, LONGITUDE_NOT_AVAILABLE).scaled(COORDINATE_SCALE);
    /// Latitude, degrees
    pub const LATITUDE: Field =
        Field::signed("latitude", 89, 27, LATITUDE_NOT_AVAILABLE).scaled(COORDINATE_SCALE);
    /// Course over ground, degrees
    pub const COURSE_OVER_GROUND: Field =
        Field::unsigned("course_over_ground", 116, 12, COURSE_NOT_AVAILABLE).scaled(COURSE_SCALE);
    /// True heading, degrees
    pub const TRUE_HEADING: Field =
        Field::unsigned("true_heading", 128, 9, HEADING_NOT_AVAILABLE);
    /// UTC second
    pub const TIMESTAMP: Field = Field::unsigned("timestamp", 137, 6, TIMESTAMP_NOT_AVAILABLE);

    /// Encoded length of the message
    pub const BIT_LENGTH: usize = 168;
}

/// Type 5: static and voyage related data
pub mod static_voyage {
    use super::Field;
    use crate::limits::*;

    /// IMO ship identification number
    pub const IMO: Field = Field::unsigned("imo", 40, 30, 0);
    /// Call sign, 7 characters
    pub const CALLSIGN: Field = Field::text("callsign", 70, 42);
    /// Vessel name, 20 characters
    pub const SHIPNAME: Field = Field::text("shipname", 112, 120);
    /// Ship and cargo type code
    pub const CARGO_TYPE: Field = Field::unsigned("cargo_type", 232, 8, 0);
    /// Reference point to bow, metres
    pub const DIM_A: Field = Field::unsigned("dim_a", 240, 9, 0);
    /// Reference point to stern, metres
    pub const DIM_B: Field = Field::unsigned("dim_b", 249, 9, 0);
    /// Reference point to port side, metres
    pub const DIM_C: Field = Field::unsigned("dim_c", 258, 6, 0);
    /// Reference point to starboard side, metres
    pub const DIM_D: Field = Field::unsigned("dim_d", 264, 6, 0);
    /// ETA month
    pub const ETA_MONTH: Field = Field::unsigned("eta_month", 274, 4, 0);
    /// ETA day
    pub const ETA_DAY: Field = Field::unsigned("eta_day", 278, 5, 0);
    /// ETA hour
    pub const ETA_HOUR: Field = Field::unsigned("eta_hour", 283, 5, ETA_HOUR_NOT_AVAILABLE);
    /// ETA minute
    pub const ETA_MINUTE: Field =
        Field::unsigned("eta_minute", 288, 6, ETA_MINUTE_NOT_AVAILABLE);
    /// Static draught, metres
    pub const DRAUGHT: Field = Field::unsigned("draught", 294, 8, 0).scaled(DRAUGHT_SCALE);
    /// Destination, 20 characters
    pub const DESTINATION: Field = Field::text("destination", 302, 120);

    /// Encoded length of the message
    pub const BIT_LENGTH: usize = 424;
}

/// Type 18: class B position report
pub mod class_b_position {
    use super::Field;
    use crate::limits::*;

    /// Speed over ground, knots
    pub const SPEED_OVER_GROUND: Field =
        Field::unsigned("speed_over_ground", 46, 10, SPEED_NOT_AVAILABLE).scaled(SPEED_SCALE);
    /// Position accuracy flag
    pub const POSITION_ACCURACY: Field = Field::unsigned("position_accuracy", 56, 1, 0);
    /// Longitude, degrees
    pub const LONGITUDE: Field =
        Field::signed("longitude", 57, 28, LONGITUDE_NOT_AVAILABLE).scaled(COORDINATE_SCALE);
    /// Latitude, degrees
    pub const LATITUDE: Field =
        Field::signed("latitude", 85, 27, LATITUDE_NOT_AVAILABLE).scaled(COORDINATE_SCALE);
    /// Course over ground, degrees
    pub const COURSE_OVER_GROUND: Field =
        Field::unsigned("course_over_ground", 112, 12, COURSE_NOT_AVAILABLE).scaled(COURSE_SCALE);
    /// True heading, degrees
    pub const TRUE_HEADING: Field =
        Field::unsigned("true_heading", 124, 9, HEADING_NOT_AVAILABLE);
    /// UTC second
    pub const TIMESTAMP: Field = Field::unsigned("timestamp", 133, 6, TIMESTAMP_NOT_AVAILABLE);

    /// Encoded length of the message
    pub const BIT_LENGTH: usize = 168;
}

/// Type 24: class B static data, parts A and B
pub mod static_data {
    use super::Field;

    /// Part number: 0 for part A, 1 for part B
    pub const PART_NUMBER: Field = Field::unsigned("part_number", 38, 2, 0);

    /// Bits needed to tell part A from part B
    pub const IDENTITY_BITS: usize = 40;

    /// Part A vessel name, 20 characters
    pub const PART_A_SHIPNAME: Field = Field::text("shipname", 40, 120);
    /// Encoded length of part A
    pub const PART_A_BIT_LENGTH: usize = 160;

    /// Part B ship and cargo type code
    pub const PART_B_CARGO_TYPE: Field = Field::unsigned("cargo_type", 40, 8, 0);
    /// Part B equipment vendor id, 3 characters
    pub const PART_B_VENDOR_ID: Field = Field::text("vendor_id", 48, 18);
    /// Part B call sign, 7 characters
    pub const PART_B_CALLSIGN: Field = Field::text("callsign", 66, 42);
    /// Part B reference point to bow, metres
    pub const PART_B_DIM_A: Field = Field::unsigned("dim_a", 108, 9, 0);
    /// Part B reference point to stern, metres
    pub const PART_B_DIM_B: Field = Field::unsigned("dim_b", 117, 9, 0);
    /// Part B reference point to port side, metres
    pub const PART_B_DIM_C: Field = Field::unsigned("dim_c", 126, 6, 0);
    /// Part B reference point to starboard side, metres
    pub const PART_B_DIM_D: Field = Field::unsigned("dim_d", 132, 6, 0);
    /// Encoded length of part B
    pub const PART_B_BIT_LENGTH: usize = 168;
}
