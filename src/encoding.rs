//! Six-bit ASCII armoring and de-armoring of AIS payloads

use crate::error::{AisError, Result};

/// Number of bits carried by one armored character
pub const BITS_PER_CHAR: usize = 6;

/// Six-bit armor decoder: payload text to a flat bit sequence
pub struct ArmorDecoder;

impl ArmorDecoder {
    /// Decode a single armored character into its 6-bit value
    ///
    /// Valid characters are `0`..=`W` (values 0-39) and `` ` ``..=`w`
    /// (values 40-63).
    pub fn decode_char(ch: char) -> Result<u8> {
        match ch {
            '0'..='W' | '`'..='w' => {
                let mut value = ch as u8 - 48;
                if value > 40 {
                    value -= 8;
                }
                Ok(value)
            }
            _ => Err(AisError::Armor(ch)),
        }
    }

    /// Decode armored text into bits, most significant bit of each
    /// character first
    pub fn armor_to_bits(text: &str) -> Result<Vec<bool>> {
        let mut bits = Vec::with_capacity(text.len() * BITS_PER_CHAR);
        for ch in text.chars() {
            let value = Self::decode_char(ch)?;
            for shift in (0..BITS_PER_CHAR).rev() {
                bits.push((value >> shift) & 1 == 1);
            }
        }
        Ok(bits)
    }

    /// Decode armored text and drop the `fill_bits` padding bits of the
    /// last character
    pub fn armor_to_bits_with_fill(text: &str, fill_bits: u8) -> Result<Vec<bool>> {
        let mut bits = Self::armor_to_bits(text)?;
        let fill = fill_bits as usize;
        if fill >= BITS_PER_CHAR {
            return Err(AisError::frame(format!(
                "Fill bit count {fill_bits} must be below {BITS_PER_CHAR}"
            )));
        }
        if fill > bits.len() {
            return Err(AisError::insufficient_data(format!(
                "{fill} fill bits declared for a {}-bit payload",
                bits.len()
            )));
        }
        bits.truncate(bits.len() - fill);
        Ok(bits)
    }
}

/// Six-bit armor encoder: flat bit sequence to payload text
pub struct ArmorEncoder;

impl ArmorEncoder {
    /// Encode a 6-bit value as an armored character
    pub fn encode_value(value: u8) -> char {
        let value = value & 0x3F;
        let code = if value > 39 { value + 56 } else { value + 48 };
        code as char
    }

    /// Encode bits into armored text
    ///
    /// The last group is zero-padded to six bits; the number of padding
    /// bits is returned alongside the text so it can be carried in the
    /// sentence's fill-bit field.
    pub fn bits_to_armor(bits: &[bool]) -> (String, u8) {
        let mut text = String::with_capacity(bits.len().div_ceil(BITS_PER_CHAR));
        for chunk in bits.chunks(BITS_PER_CHAR) {
            let mut value = 0u8;
            for (i, &bit) in chunk.iter().enumerate() {
                if bit {
                    value |= 1 << (BITS_PER_CHAR - 1 - i);
                }
            }
            text.push(Self::encode_value(value));
        }
        let fill = (BITS_PER_CHAR - bits.len() % BITS_PER_CHAR) % BITS_PER_CHAR;
        (text, fill as u8)
    }
}
