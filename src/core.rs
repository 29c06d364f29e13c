//! Core types shared across the AIS codec

use crate::error::{AisError, Result};

/// VHF radio channel a sentence was received on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Channel {
    /// AIS channel A (161.975 MHz)
    #[default]
    A,
    /// AIS channel B (162.025 MHz)
    B,
    /// Channel field left empty by the sender
    Unspecified,
}

impl Channel {
    /// Parse the channel field of a sentence header.
    ///
    /// Some receivers emit `1`/`2` instead of `A`/`B`.
    pub fn from_field(field: &str) -> Result<Self> {
        match field {
            "A" | "1" => Ok(Channel::A),
            "B" | "2" => Ok(Channel::B),
            "" => Ok(Channel::Unspecified),
            other => Err(AisError::frame(format!("Unknown radio channel {other:?}"))),
        }
    }

    /// Text written in the channel field of a sentence
    pub fn as_field(&self) -> &'static str {
        match self {
            Channel::A => "A",
            Channel::B => "B",
            Channel::Unspecified => "",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Channel::A => write!(f, "Channel A"),
            Channel::B => write!(f, "Channel B"),
            Channel::Unspecified => write!(f, "Channel unspecified"),
        }
    }
}

/// Outcome of decoding one sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Validity {
    /// A complete message was decoded
    Valid,
    /// The sentence or its payload could not be decoded
    Invalid,
    /// A fragment was stored; more are needed to complete the message
    Partial,
}

impl std::fmt::Display for Validity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Validity::Valid => write!(f, "Valid"),
            Validity::Invalid => write!(f, "Invalid"),
            Validity::Partial => write!(f, "Partial"),
        }
    }
}

/// Navigational status reported by class A position reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NavigationStatus {
    /// Under way using engine
    UnderWayUsingEngine = 0,
    /// At anchor
    AtAnchor = 1,
    /// Not under command
    NotUnderCommand = 2,
    /// Restricted manoeuverability
    RestrictedManoeuverability = 3,
    /// Constrained by her draught
    ConstrainedByDraught = 4,
    /// Moored
    Moored = 5,
    /// Aground
    Aground = 6,
    /// Engaged in fishing
    EngagedInFishing = 7,
    /// Under way sailing
    UnderWaySailing = 8,
    /// Reserved for high speed craft
    ReservedHsc = 9,
    /// Reserved for wing in ground craft
    ReservedWig = 10,
    /// Power-driven vessel towing astern
    TowingAstern = 11,
    /// Power-driven vessel pushing ahead or towing alongside
    PushingAhead = 12,
    /// Reserved for future use
    Reserved = 13,
    /// AIS-SART, MOB-AIS or EPIRB-AIS active
    AisSartActive = 14,
    /// Not defined (default)
    NotDefined = 15,
}

impl TryFrom<u8> for NavigationStatus {
    type Error = AisError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(NavigationStatus::UnderWayUsingEngine),
            1 => Ok(NavigationStatus::AtAnchor),
            2 => Ok(NavigationStatus::NotUnderCommand),
            3 => Ok(NavigationStatus::RestrictedManoeuverability),
            4 => Ok(NavigationStatus::ConstrainedByDraught),
            5 => Ok(NavigationStatus::Moored),
            6 => Ok(NavigationStatus::Aground),
            7 => Ok(NavigationStatus::EngagedInFishing),
            8 => Ok(NavigationStatus::UnderWaySailing),
            9 => Ok(NavigationStatus::ReservedHsc),
            10 => Ok(NavigationStatus::ReservedWig),
            11 => Ok(NavigationStatus::TowingAstern),
            12 => Ok(NavigationStatus::PushingAhead),
            13 => Ok(NavigationStatus::Reserved),
            14 => Ok(NavigationStatus::AisSartActive),
            15 => Ok(NavigationStatus::NotDefined),
            _ => Err(AisError::out_of_range(
                "nav_status",
                format!("Unknown navigational status: {value}"),
            )),
        }
    }
}

impl std::fmt::Display for NavigationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            NavigationStatus::UnderWayUsingEngine => "Under way using engine",
            NavigationStatus::AtAnchor => "At anchor",
            NavigationStatus::NotUnderCommand => "Not under command",
            NavigationStatus::RestrictedManoeuverability => "Restricted manoeuverability",
            NavigationStatus::ConstrainedByDraught => "Constrained by her draught",
            NavigationStatus::Moored => "Moored",
            NavigationStatus::Aground => "Aground",
            NavigationStatus::EngagedInFishing => "Engaged in fishing",
            NavigationStatus::UnderWaySailing => "Under way sailing",
            NavigationStatus::ReservedHsc => "Reserved for HSC",
            NavigationStatus::ReservedWig => "Reserved for WIG",
            NavigationStatus::TowingAstern => "Towing astern",
            NavigationStatus::PushingAhead => "Pushing ahead or towing alongside",
            NavigationStatus::Reserved => "Reserved",
            NavigationStatus::AisSartActive => "AIS-SART active",
            NavigationStatus::NotDefined => "Not defined",
        };
        write!(f, "{text}")
    }
}

/// Human readable description of a ship and cargo type code
pub fn ship_type_description(code: u8) -> &'static str {
    match code {
        0 => "Not available",
        1..=19 => "Reserved for future use",
        20..=29 => "Wing in ground",
        30 => "Fishing",
        31 | 32 => "Towing",
        33 => "Dredging or underwater ops",
        34 => "Diving ops",
        35 => "Military ops",
        36 => "Sailing",
        37 => "Pleasure craft",
        38 | 39 => "Reserved",
        40..=49 => "High speed craft",
        50 => "Pilot vessel",
        51 => "Search and rescue vessel",
        52 => "Tug",
        53 => "Port tender",
        54 => "Anti-pollution equipment",
        55 => "Law enforcement",
        56 | 57 => "Spare - local vessel",
        58 => "Medical transport",
        59 => "Noncombatant ship",
        60..=69 => "Passenger",
        70..=79 => "Cargo",
        80..=89 => "Tanker",
        90..=99 => "Other type",
        _ => "Unknown",
    }
}
