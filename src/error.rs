//! Error types for AIVDM/AIVDO decoding and encoding

use thiserror::Error;

/// Result type for AIS codec operations
pub type Result<T> = std::result::Result<T, AisError>;

/// Error types encountered while framing, de-armoring, reassembling,
/// decoding or encoding AIS sentences
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AisError {
    /// Bad checksum or malformed NMEA header
    #[error("Frame error: {0}")]
    Frame(String),

    /// Character outside the six-bit armoring alphabet
    #[error("Armor error: invalid six-bit character {0:?}")]
    Armor(char),

    /// Orphan, duplicate or conflicting fragment
    #[error("Fragment error: {0}")]
    Fragment(String),

    /// Message type outside the supported set
    #[error("Unsupported message type: {0}")]
    UnsupportedType(u8),

    /// Not enough bits to decode the fixed part of a message
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Field width that a cursor cannot represent
    #[error("Invalid field width: {0}")]
    InvalidWidth(String),

    /// Field value that does not fit its bit range
    #[error("Field {field} out of range: {reason}")]
    OutOfRange {
        /// Name of the offending field
        field: String,
        /// What was wrong with the value
        reason: String,
    },

    /// Field value that is well-formed but not allowed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Mandatory field absent from an encode request
    #[error("Missing field: {0}")]
    MissingField(String),
}

impl AisError {
    /// Create a new Frame error
    pub fn frame(msg: impl Into<String>) -> Self {
        AisError::Frame(msg.into())
    }

    /// Create a new Fragment error
    pub fn fragment(msg: impl Into<String>) -> Self {
        AisError::Fragment(msg.into())
    }

    /// Create a new InsufficientData error
    pub fn insufficient_data(msg: impl Into<String>) -> Self {
        AisError::InsufficientData(msg.into())
    }

    /// Create a new InvalidWidth error
    pub fn invalid_width(msg: impl Into<String>) -> Self {
        AisError::InvalidWidth(msg.into())
    }

    /// Create a new OutOfRange error for `field`
    pub fn out_of_range(field: impl Into<String>, reason: impl Into<String>) -> Self {
        AisError::OutOfRange {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a new Validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        AisError::Validation(msg.into())
    }

    /// Create a new MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        AisError::MissingField(field.into())
    }

    /// Attach a field name to a cursor-level range error.
    ///
    /// The bit writer does not know which message field it is writing, so
    /// the message layer renames its errors before handing them back.
    pub fn for_field(self, field: &str) -> Self {
        match self {
            AisError::OutOfRange { reason, .. } => AisError::out_of_range(field, reason),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AisError::frame("bad checksum");
        assert!(err.to_string().contains("Frame error"));

        let err = AisError::out_of_range("mmsi", "exceeds 30 bits");
        assert_eq!(err.to_string(), "Field mmsi out of range: exceeds 30 bits");
    }

    #[test]
    fn test_for_field_renames_only_range_errors() {
        let err = AisError::out_of_range("30-bit unsigned", "too big").for_field("mmsi");
        assert_eq!(
            err,
            AisError::OutOfRange {
                field: "mmsi".to_string(),
                reason: "too big".to_string()
            }
        );

        let err = AisError::missing_field("mmsi").for_field("imo");
        assert_eq!(err, AisError::MissingField("mmsi".to_string()));
    }
}
