//! NMEA 0183 sentence framing and checksum handling

use crate::core::Channel;
use crate::error::{AisError, Result};

/// Number of comma-separated fields between the leading marker and `*`
pub const FIELD_COUNT: usize = 7;

/// Highest fragment count a sentence header can carry
pub const MAX_FRAGMENTS: u8 = 9;

/// Highest sequential message id
pub const MAX_SEQ_ID: u8 = 9;

/// Highest fill-bit count
pub const MAX_FILL_BITS: u8 = 5;

/// XOR of every byte of `body`, the text between the marker and `*`
pub fn checksum(body: &str) -> u8 {
    body.bytes().fold(0u8, |acc, byte| acc ^ byte)
}

/// A validated AIVDM/AIVDO sentence with its framing stripped
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawSentence {
    /// Talker id followed by the formatter, e.g. `AIVDM`
    pub address: String,
    /// Number of sentences making up the message
    pub fragment_total: u8,
    /// 1-based position of this sentence in the message
    pub fragment_index: u8,
    /// Sequential message id shared by the fragments of one message
    pub seq_id: Option<u8>,
    /// Radio channel
    pub channel: Channel,
    /// Armored payload text
    pub payload: String,
    /// Padding bits in the last payload character
    pub fill_bits: u8,
    /// Transmitted checksum
    pub checksum: u8,
}

impl RawSentence {
    /// Parse and validate one sentence line
    ///
    /// A trailing `\r\n` is ignored.
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        if !line.is_ascii() {
            return Err(AisError::frame("Sentence contains non-ASCII characters"));
        }

        let rest = line
            .strip_prefix('!')
            .or_else(|| line.strip_prefix('$'))
            .ok_or_else(|| AisError::frame("Sentence must start with '!' or '$'"))?;

        let (body, trailer) = rest
            .rsplit_once('*')
            .ok_or_else(|| AisError::frame("Missing '*' checksum delimiter"))?;

        let uppercase_hex = |b: u8| b.is_ascii_digit() || (b'A'..=b'F').contains(&b);
        if trailer.len() != 2 || !trailer.bytes().all(uppercase_hex) {
            return Err(AisError::frame(format!(
                "Checksum must be two uppercase hex digits, got {trailer:?}"
            )));
        }
        let transmitted = u8::from_str_radix(trailer, 16)
            .map_err(|_| AisError::frame(format!("Checksum {trailer:?} is not hexadecimal")))?;
        let computed = checksum(body);
        if computed != transmitted {
            return Err(AisError::frame(format!(
                "Checksum mismatch: transmitted {transmitted:02X}, computed {computed:02X}"
            )));
        }

        let fields: Vec<&str> = body.split(',').collect();
        if fields.len() != FIELD_COUNT {
            return Err(AisError::frame(format!(
                "Expected {FIELD_COUNT} fields, got {}",
                fields.len()
            )));
        }

        let address = fields[0];
        check_address(address)?;

        let fragment_total = parse_number(fields[1], "fragment count")?;
        if fragment_total == 0 || fragment_total > MAX_FRAGMENTS {
            return Err(AisError::frame(format!(
                "Fragment count {fragment_total} out of range [1, {MAX_FRAGMENTS}]"
            )));
        }

        let fragment_index = parse_number(fields[2], "fragment index")?;
        if fragment_index == 0 || fragment_index > fragment_total {
            return Err(AisError::frame(format!(
                "Fragment index {fragment_index} out of range [1, {fragment_total}]"
            )));
        }

        let seq_id = match fields[3] {
            "" => None,
            field => {
                let id = parse_number(field, "sequential id")?;
                if id > MAX_SEQ_ID {
                    return Err(AisError::frame(format!(
                        "Sequential id {id} out of range [0, {MAX_SEQ_ID}]"
                    )));
                }
                Some(id)
            }
        };

        let channel = Channel::from_field(fields[4])?;

        let fill_bits = parse_number(fields[6], "fill bits")?;
        if fill_bits > MAX_FILL_BITS {
            return Err(AisError::frame(format!(
                "Fill bits {fill_bits} out of range [0, {MAX_FILL_BITS}]"
            )));
        }

        Ok(RawSentence {
            address: address.to_string(),
            fragment_total,
            fragment_index,
            seq_id,
            channel,
            payload: fields[5].to_string(),
            fill_bits,
            checksum: transmitted,
        })
    }

    /// Talker id, e.g. `AI`
    pub fn talker(&self) -> &str {
        &self.address[..self.address.len().min(2)]
    }

    /// Sentence formatter, e.g. `VDM`
    pub fn formatter(&self) -> &str {
        &self.address[self.address.len().min(2)..]
    }

    /// Whether the sentence reports the receiving station's own vessel
    pub fn is_own_ship(&self) -> bool {
        self.formatter() == "VDO"
    }

    /// Re-emit the sentence as a framed line
    pub fn to_line(&self) -> String {
        build_frame(
            &self.address,
            self.fragment_total,
            self.fragment_index,
            self.seq_id,
            self.channel,
            &self.payload,
            self.fill_bits,
        )
    }
}

/// Reject an address field that would not survive framing
///
/// Addresses are non-empty and alphanumeric, e.g. `AIVDM`.
pub fn check_address(address: &str) -> Result<()> {
    if address.is_empty() || !address.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AisError::frame(format!("Invalid address field {address:?}")));
    }
    Ok(())
}

fn parse_number(field: &str, what: &str) -> Result<u8> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AisError::frame(format!("Non-numeric {what} {field:?}")));
    }
    field
        .parse::<u8>()
        .map_err(|_| AisError::frame(format!("{what} {field:?} out of range")))
}

/// Frame a payload as a `!`-prefixed sentence with its checksum appended
///
/// Callers guarantee the field ranges; nothing is validated here.
pub fn build_frame(
    address: &str,
    fragment_total: u8,
    fragment_index: u8,
    seq_id: Option<u8>,
    channel: Channel,
    payload: &str,
    fill_bits: u8,
) -> String {
    let seq = seq_id.map(|id| id.to_string()).unwrap_or_default();
    let body = format!(
        "{address},{fragment_total},{fragment_index},{seq},{},{payload},{fill_bits}",
        channel.as_field()
    );
    format!("!{body}*{:02X}", checksum(&body))
}
