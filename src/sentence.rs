//! Splitting encoded messages into framed sentences

use crate::core::Channel;
use crate::encoding::ArmorEncoder;
use crate::error::{AisError, Result};
use crate::frame::{build_frame, check_address, MAX_FRAGMENTS, MAX_SEQ_ID};

/// Conventional maximum NMEA 0183 sentence length
pub const MAX_SENTENCE_LEN: usize = 82;

/// Slices encoded bits into one or more AIVDM/AIVDO sentences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentenceBuilder {
    max_len: usize,
}

impl Default for SentenceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SentenceBuilder {
    /// Builder for the conventional 82-character sentence length
    pub fn new() -> Self {
        SentenceBuilder {
            max_len: MAX_SENTENCE_LEN,
        }
    }

    /// Use a different maximum sentence length
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    /// Maximum length of each emitted line
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    fn payload_room(&self, address: &str, channel: Channel, seq_id: Option<u8>) -> usize {
        let overhead = build_frame(
            address,
            MAX_FRAGMENTS,
            MAX_FRAGMENTS,
            seq_id,
            channel,
            "",
            0,
        )
        .len();
        self.max_len.saturating_sub(overhead)
    }

    /// Armor `bits` and frame them as sentences
    ///
    /// A payload that fits one sentence is emitted with a fragment count
    /// of 1 and no sequential id. Longer payloads are split on character
    /// boundaries; every fragment carries `seq_id` and only the last one
    /// carries the fill-bit count.
    pub fn build(
        &self,
        bits: &[bool],
        address: &str,
        channel: Channel,
        seq_id: u8,
    ) -> Result<Vec<String>> {
        if seq_id > MAX_SEQ_ID {
            return Err(AisError::out_of_range(
                "seq_id",
                format!("{seq_id} exceeds {MAX_SEQ_ID}"),
            ));
        }

        check_address(address)?;

        let (payload, fill_bits) = ArmorEncoder::bits_to_armor(bits);

        if payload.len() <= self.payload_room(address, channel, None) {
            return Ok(vec![build_frame(
                address, 1, 1, None, channel, &payload, fill_bits,
            )]);
        }

        let room = self.payload_room(address, channel, Some(seq_id));
        if room == 0 {
            return Err(AisError::validation(format!(
                "Sentence length {} leaves no room for payload",
                self.max_len
            )));
        }

        // armored text is ASCII, so byte chunks are character chunks
        let chunks: Vec<&[u8]> = payload.as_bytes().chunks(room).collect();
        if chunks.len() > MAX_FRAGMENTS as usize {
            return Err(AisError::validation(format!(
                "Payload of {} characters needs {} sentences, at most {MAX_FRAGMENTS} allowed",
                payload.len(),
                chunks.len()
            )));
        }

        let total = chunks.len() as u8;
        let lines = chunks
            .iter()
            .enumerate()
            .map(|(i, chunk)| {
                let index = i as u8 + 1;
                let fill = if index == total { fill_bits } else { 0 };
                let text = String::from_utf8_lossy(chunk);
                build_frame(address, total, index, Some(seq_id), channel, &text, fill)
            })
            .collect();
        Ok(lines)
    }
}
