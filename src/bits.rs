//! Bit-level read and write cursors over a flat bit sequence

use crate::error::{AisError, Result};

/// Widest integer field a cursor can read or write
pub const MAX_FIELD_WIDTH: usize = 64;

/// Padding character of six-bit strings (value 0)
pub const STRING_PADDING: char = '@';

/// Map a 6-bit value to its character in the AIS string alphabet
///
/// 0-31 map to `@`..=`_`, 32-63 map to ` `..=`?`.
pub fn six_bit_char(value: u8) -> char {
    let value = value & 0x3F;
    if value < 32 {
        (value + 64) as char
    } else {
        value as char
    }
}

/// Map a character of the AIS string alphabet to its 6-bit value
pub fn six_bit_value(ch: char) -> Option<u8> {
    match ch {
        '@'..='_' => Some(ch as u8 - 64),
        ' '..='?' => Some(ch as u8),
        _ => None,
    }
}

fn check_width(width: usize) -> Result<()> {
    if width == 0 || width > MAX_FIELD_WIDTH {
        return Err(AisError::invalid_width(format!(
            "Field width {width} outside [1, {MAX_FIELD_WIDTH}]"
        )));
    }
    Ok(())
}

fn check_string_width(width_bits: usize) -> Result<()> {
    if width_bits % 6 != 0 {
        return Err(AisError::invalid_width(format!(
            "String width {width_bits} is not a multiple of 6"
        )));
    }
    Ok(())
}

/// Positioned read cursor
///
/// Bits past the end of the sequence read as zero, so a payload truncated
/// by the sender still yields its leading fields.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    bits: &'a [bool],
    position: usize,
}

impl<'a> BitReader<'a> {
    /// Create a cursor at the start of `bits`
    pub fn new(bits: &'a [bool]) -> Self {
        BitReader { bits, position: 0 }
    }

    /// Current bit offset
    pub fn position(&self) -> usize {
        self.position
    }

    /// Total number of bits in the sequence
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether the sequence holds no bits at all
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Bits left between the cursor and the end of the sequence
    pub fn remaining(&self) -> usize {
        self.bits.len().saturating_sub(self.position)
    }

    /// Whether the cursor sits at or beyond the end of the sequence
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.bits.len()
    }

    /// Move the cursor to an absolute bit offset
    pub fn seek(&mut self, position: usize) {
        self.position = position;
    }

    /// Read a single bit
    pub fn read_bool(&mut self) -> bool {
        let bit = self.bits.get(self.position).copied().unwrap_or(false);
        self.position += 1;
        bit
    }

    /// Read an unsigned big-endian field of `width` bits
    pub fn read_unsigned(&mut self, width: usize) -> Result<u64> {
        check_width(width)?;
        let mut value = 0u64;
        for _ in 0..width {
            value = (value << 1) | u64::from(self.read_bool());
        }
        Ok(value)
    }

    /// Read a two's-complement signed field of `width` bits
    pub fn read_signed(&mut self, width: usize) -> Result<i64> {
        let raw = self.read_unsigned(width)?;
        if width == MAX_FIELD_WIDTH {
            return Ok(raw as i64);
        }
        if (raw >> (width - 1)) & 1 == 1 {
            Ok((raw | (!0u64 << width)) as i64)
        } else {
            Ok(raw as i64)
        }
    }

    /// Read a six-bit packed string of `width_bits` bits
    ///
    /// Trailing `@` padding and spaces are stripped.
    pub fn read_six_bit_string(&mut self, width_bits: usize) -> Result<String> {
        check_string_width(width_bits)?;
        let mut text = String::with_capacity(width_bits / 6);
        for _ in 0..width_bits / 6 {
            let value = self.read_unsigned(6)? as u8;
            text.push(six_bit_char(value));
        }
        let trimmed_len = text
            .trim_end_matches(|c| c == STRING_PADDING || c == ' ')
            .len();
        text.truncate(trimmed_len);
        Ok(text)
    }
}

/// Append-only write cursor
///
/// Every write either emits exactly the declared width or fails without
/// touching the sequence.
#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    bits: Vec<bool>,
}

impl BitWriter {
    /// Create an empty writer
    pub fn new() -> Self {
        BitWriter { bits: Vec::new() }
    }

    /// Create an empty writer with room for `capacity` bits
    pub fn with_capacity(capacity: usize) -> Self {
        BitWriter {
            bits: Vec::with_capacity(capacity),
        }
    }

    /// Number of bits written so far
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether nothing has been written yet
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Borrow the bits written so far
    pub fn as_bits(&self) -> &[bool] {
        &self.bits
    }

    /// Consume the writer and return its bits
    pub fn into_bits(self) -> Vec<bool> {
        self.bits
    }

    /// Append zero bits until the sequence is `len` bits long
    pub fn pad_to(&mut self, len: usize) -> Result<()> {
        if len < self.bits.len() {
            return Err(AisError::invalid_width(format!(
                "Cannot pad to offset {len}: {} bits already written",
                self.bits.len()
            )));
        }
        self.bits.resize(len, false);
        Ok(())
    }

    /// Write a single bit
    pub fn write_bool(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Write an unsigned big-endian field of `width` bits
    pub fn write_unsigned(&mut self, value: u64, width: usize) -> Result<()> {
        check_width(width)?;
        if width < MAX_FIELD_WIDTH && value >> width != 0 {
            return Err(AisError::out_of_range(
                format!("{width}-bit unsigned"),
                format!("{value} exceeds {}", (1u64 << width) - 1),
            ));
        }
        self.push_raw(value, width);
        Ok(())
    }

    /// Write a two's-complement signed field of `width` bits
    pub fn write_signed(&mut self, value: i64, width: usize) -> Result<()> {
        check_width(width)?;
        if width < MAX_FIELD_WIDTH {
            let min = -(1i64 << (width - 1));
            let max = (1i64 << (width - 1)) - 1;
            if value < min || value > max {
                return Err(AisError::out_of_range(
                    format!("{width}-bit signed"),
                    format!("{value} outside [{min}, {max}]"),
                ));
            }
        }
        self.push_raw(value as u64, width);
        Ok(())
    }

    /// Write a six-bit packed string, padded with `@` to `width_bits`
    pub fn write_six_bit_string(&mut self, text: &str, width_bits: usize) -> Result<()> {
        check_string_width(width_bits)?;
        let max_chars = width_bits / 6;
        let count = text.chars().count();
        if count > max_chars {
            return Err(AisError::out_of_range(
                format!("{max_chars}-character string"),
                format!("{text:?} has {count} characters"),
            ));
        }
        let values = text
            .chars()
            .map(|ch| {
                six_bit_value(ch).ok_or_else(|| {
                    AisError::out_of_range(
                        format!("{max_chars}-character string"),
                        format!("{ch:?} is not in the six-bit alphabet"),
                    )
                })
            })
            .collect::<Result<Vec<u8>>>()?;

        for value in values {
            self.push_raw(u64::from(value), 6);
        }
        for _ in count..max_chars {
            self.push_raw(0, 6);
        }
        Ok(())
    }

    fn push_raw(&mut self, value: u64, width: usize) {
        for shift in (0..width).rev() {
            self.bits.push((value >> shift) & 1 == 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits_of(text: &str) -> Vec<bool> {
        text.chars().map(|c| c == '1').collect()
    }

    #[test]
    fn test_read_unsigned() -> Result<()> {
        let bits = bits_of("101100");
        let mut reader = BitReader::new(&bits);
        assert_eq!(reader.read_unsigned(3)?, 0b101);
        assert_eq!(reader.read_unsigned(3)?, 0b100);
        assert!(reader.is_exhausted());
        Ok(())
    }

    #[test]
    fn test_read_signed_sign_extends() -> Result<()> {
        let bits = bits_of("11111111");
        let mut reader = BitReader::new(&bits);
        assert_eq!(reader.read_signed(8)?, -1);

        let bits = bits_of("10000000");
        let mut reader = BitReader::new(&bits);
        assert_eq!(reader.read_signed(8)?, -128);

        let bits = bits_of("01111111");
        let mut reader = BitReader::new(&bits);
        assert_eq!(reader.read_signed(8)?, 127);
        Ok(())
    }

    #[test]
    fn test_read_past_end_reads_zeros() -> Result<()> {
        let bits = bits_of("11");
        let mut reader = BitReader::new(&bits);
        assert_eq!(reader.read_unsigned(4)?, 0b1100);
        assert_eq!(reader.remaining(), 0);
        assert_eq!(reader.read_unsigned(6)?, 0);
        Ok(())
    }

    #[test]
    fn test_invalid_widths() {
        let bits = bits_of("1010");
        let mut reader = BitReader::new(&bits);
        assert!(reader.read_unsigned(0).is_err());
        assert!(reader.read_unsigned(65).is_err());
        assert!(reader.read_six_bit_string(8).is_err());
    }

    #[test]
    fn test_six_bit_alphabet() {
        assert_eq!(six_bit_char(0), '@');
        assert_eq!(six_bit_char(1), 'A');
        assert_eq!(six_bit_char(32), ' ');
        assert_eq!(six_bit_char(48), '0');
        assert_eq!(six_bit_value('Z'), Some(26));
        assert_eq!(six_bit_value('a'), None);
        for value in 0..64u8 {
            assert_eq!(six_bit_value(six_bit_char(value)), Some(value));
        }
    }

    #[test]
    fn test_string_strips_trailing_padding() -> Result<()> {
        let mut writer = BitWriter::new();
        writer.write_six_bit_string("AB C  ", 60)?;
        assert_eq!(writer.len(), 60);

        let bits = writer.into_bits();
        let mut reader = BitReader::new(&bits);
        assert_eq!(reader.read_six_bit_string(60)?, "AB C");
        Ok(())
    }

    #[test]
    fn test_write_unsigned_range() {
        let mut writer = BitWriter::new();
        assert!(writer.write_unsigned(63, 6).is_ok());
        assert!(writer.write_unsigned(64, 6).is_err());
        assert_eq!(writer.len(), 6);
    }

    #[test]
    fn test_write_signed_range() -> Result<()> {
        let mut writer = BitWriter::new();
        writer.write_signed(-128, 8)?;
        writer.write_signed(127, 8)?;
        assert!(writer.write_signed(128, 8).is_err());
        assert!(writer.write_signed(-129, 8).is_err());

        let bits = writer.into_bits();
        let mut reader = BitReader::new(&bits);
        assert_eq!(reader.read_signed(8)?, -128);
        assert_eq!(reader.read_signed(8)?, 127);
        Ok(())
    }

    #[test]
    fn test_write_string_rejects_bad_input() {
        let mut writer = BitWriter::new();
        assert!(writer.write_six_bit_string("TOO LONG", 42).is_err());
        assert!(writer.write_six_bit_string("lower", 42).is_err());
        assert!(writer.is_empty());
    }

    #[test]
    fn test_pad_to() -> Result<()> {
        let mut writer = BitWriter::with_capacity(16);
        writer.write_bool(true);
        writer.pad_to(8)?;
        assert_eq!(writer.as_bits(), bits_of("10000000").as_slice());
        assert!(writer.pad_to(4).is_err());
        Ok(())
    }
}
