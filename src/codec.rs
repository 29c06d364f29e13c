//! High-level AIVDM/AIVDO decoder and encoder

use tracing::{debug, trace};

use crate::core::Channel;
use crate::encoding::ArmorDecoder;
use crate::error::{AisError, Result};
use crate::fragment::{CorrelationContext, FragmentAssembler, FragmentOutcome};
use crate::frame::{check_address, RawSentence, MAX_SEQ_ID};
use crate::message::{DecodedMessage, MessageCodec};
use crate::request::EncodeRequest;
use crate::sentence::SentenceBuilder;

/// Default address field of encoded sentences
pub const DEFAULT_ADDRESS: &str = "AIVDM";

/// Decode one sentence against a caller-owned correlation context
///
/// Never fails: framing errors, fragment drops and undecodable payloads
/// come back as [`Validity::Invalid`](crate::Validity::Invalid), and a
/// stored fragment as [`Validity::Partial`](crate::Validity::Partial).
pub fn decode_sentence(line: &str, context: &mut CorrelationContext) -> DecodedMessage {
    let sentence = match RawSentence::parse(line) {
        Ok(sentence) => sentence,
        Err(err) => {
            debug!(error = %err, "dropping unframed line");
            return DecodedMessage::invalid(None, err);
        }
    };

    let assembled = match FragmentAssembler::ingest(context, &sentence) {
        FragmentOutcome::Complete(assembled) => assembled,
        FragmentOutcome::Pending => return DecodedMessage::partial(),
        FragmentOutcome::Rejected(err) => return DecodedMessage::invalid(None, err),
    };

    let bits = match ArmorDecoder::armor_to_bits_with_fill(&assembled.payload, assembled.fill_bits)
    {
        Ok(bits) => bits,
        Err(err) => {
            debug!(error = %err, "payload could not be de-armored");
            return DecodedMessage::invalid(None, err);
        }
    };

    trace!(
        bits = bits.len(),
        fragments = assembled.fragment_count,
        channel = %assembled.channel,
        "decoding payload"
    );
    let decoded = MessageCodec::decode_payload(&bits);
    if let Some(err) = decoded.error() {
        debug!(message_type = ?decoded.message_type(), error = %err, "payload rejected");
    }
    decoded
}

/// Sentence decoder for one data source
///
/// Owns the [`CorrelationContext`] grouping that source's fragments. Use
/// one decoder per receiving station so unrelated streams never share
/// sequential ids.
#[derive(Debug, Default)]
pub struct AisDecoder {
    context: CorrelationContext,
}

impl AisDecoder {
    /// Create a decoder with an empty context
    pub fn new() -> Self {
        AisDecoder {
            context: CorrelationContext::new(),
        }
    }

    /// Decode a single line
    pub fn decode_line(&mut self, line: &str) -> DecodedMessage {
        decode_sentence(line, &mut self.context)
    }

    /// Decode a batch of lines, one result per line
    pub fn decode_lines<'a, I>(&mut self, lines: I) -> Vec<DecodedMessage>
    where
        I: IntoIterator<Item = &'a str>,
    {
        lines
            .into_iter()
            .map(|line| self.decode_line(line))
            .collect()
    }

    /// Fragments still waiting for completion
    pub fn context(&self) -> &CorrelationContext {
        &self.context
    }

    /// Forget every pending assembly
    pub fn reset(&mut self) {
        self.context.clear();
    }
}

/// Encodes requests into framed sentences
#[derive(Debug, Clone)]
pub struct AisEncoder {
    address: String,
    channel: Channel,
    next_seq_id: u8,
    sentences: SentenceBuilder,
}

impl AisEncoder {
    /// Create an encoder with the default configuration
    pub fn new() -> Self {
        AisEncoder {
            address: DEFAULT_ADDRESS.to_string(),
            channel: Channel::A,
            next_seq_id: 0,
            sentences: SentenceBuilder::new(),
        }
    }

    /// Address field written to every sentence
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Channel written to every sentence
    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Sequential id the next multi-sentence message will use
    pub fn next_seq_id(&self) -> u8 {
        self.next_seq_id
    }

    /// Encode a request into one or more sentences
    ///
    /// The sequential id advances, wrapping after 9, only when a message
    /// needs more than one sentence.
    pub fn encode_sentences(&mut self, request: &EncodeRequest) -> Result<Vec<String>> {
        let bits = MessageCodec::encode(request)?;
        let lines = self
            .sentences
            .build(&bits, &self.address, self.channel, self.next_seq_id)?;
        if lines.len() > 1 {
            self.next_seq_id = (self.next_seq_id + 1) % (MAX_SEQ_ID + 1);
        }
        trace!(
            message_type = request.message_type(),
            sentences = lines.len(),
            "encoded message"
        );
        Ok(lines)
    }
}

impl Default for AisEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`AisEncoder`]
#[derive(Debug, Clone)]
pub struct AisEncoderBuilder {
    address: String,
    channel: Channel,
    seq_id: u8,
    max_len: usize,
}

impl AisEncoderBuilder {
    /// Create a new encoder builder
    pub fn new() -> Self {
        AisEncoderBuilder {
            address: DEFAULT_ADDRESS.to_string(),
            channel: Channel::A,
            seq_id: 0,
            max_len: crate::sentence::MAX_SENTENCE_LEN,
        }
    }

    /// Set the address field, e.g. `AIVDO` for own-ship reports
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Set the radio channel
    pub fn with_channel(mut self, channel: Channel) -> Self {
        self.channel = channel;
        self
    }

    /// Set the first sequential id
    pub fn with_seq_id(mut self, seq_id: u8) -> Self {
        self.seq_id = seq_id;
        self
    }

    /// Set the maximum sentence length
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    /// Build the encoder
    ///
    /// Fails when the address or the starting sequential id could not be
    /// framed into a parseable sentence.
    pub fn build(self) -> Result<AisEncoder> {
        if self.seq_id > MAX_SEQ_ID {
            return Err(AisError::out_of_range(
                "seq_id",
                format!("{} exceeds {MAX_SEQ_ID}", self.seq_id),
            ));
        }
        check_address(&self.address)?;
        Ok(AisEncoder {
            address: self.address,
            channel: self.channel,
            next_seq_id: self.seq_id,
            sentences: SentenceBuilder::new().with_max_len(self.max_len),
        })
    }
}

impl Default for AisEncoderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Validity;
    use crate::message::AisMessage;
    use crate::request::{ClassBPositionRequest, StaticVoyageRequest};

    const TYPE18: &str = "!AIVDM,1,1,,A,B69>7mh0?B<:>05B0`0e8TN000000,0*72";

    #[test]
    fn test_decode_type18_line() {
        let mut decoder = AisDecoder::new();
        let decoded = decoder.decode_line(TYPE18);
        assert_eq!(decoded.validity(), Validity::Valid);
        assert_eq!(decoded.message_type(), Some(18));
        match decoded.message() {
            Some(AisMessage::ClassBPosition(report)) => {
                assert_eq!(report.mmsi, 412321751);
                assert!((report.speed_over_ground - 6.1).abs() < 1e-9);
            }
            other => panic!("unexpected message {other:?}"),
        }
    }

    #[test]
    fn test_decode_garbage_is_invalid() {
        let mut decoder = AisDecoder::new();
        let decoded = decoder.decode_line("This is not a valid message");
        assert_eq!(decoded.validity(), Validity::Invalid);
        assert!(matches!(decoded.error(), Some(AisError::Frame(_))));
    }

    #[test]
    fn test_partial_then_complete() {
        let mut decoder = AisDecoder::new();
        let results = decoder.decode_lines([
            "!AIVDM,2,1,0,A,58wt8Ui`g??r21`7S=:22058<v05Htp000000015>8OA;0sk,0*7B",
            "!AIVDM,2,2,0,A,eQ8823mDm3kP00000000000,2*5D",
        ]);
        assert_eq!(results[0].validity(), Validity::Partial);
        assert_eq!(results[1].validity(), Validity::Valid);
        assert_eq!(results[1].message_type(), Some(5));
        assert!(decoder.context().is_empty());
    }

    #[test]
    fn test_reset_drops_pending() {
        let mut decoder = AisDecoder::new();
        decoder.decode_line(
            "!AIVDM,2,1,0,A,58wt8Ui`g??r21`7S=:22058<v05Htp000000015>8OA;0sk,0*7B",
        );
        assert_eq!(decoder.context().len(), 1);
        decoder.reset();
        let decoded = decoder.decode_line("!AIVDM,2,2,0,A,eQ8823mDm3kP00000000000,2*5D");
        assert_eq!(decoded.validity(), Validity::Invalid);
    }

    #[test]
    fn test_encoder_builder() -> Result<()> {
        let encoder = AisEncoderBuilder::new()
            .with_address("AIVDO")
            .with_channel(Channel::B)
            .with_seq_id(9)
            .build()?;
        assert_eq!(encoder.address(), "AIVDO");
        assert_eq!(encoder.channel(), Channel::B);
        assert_eq!(encoder.next_seq_id(), 9);

        let encoder = AisEncoderBuilder::default().build()?;
        assert_eq!(encoder.address(), AisEncoder::new().address());
        Ok(())
    }

    #[test]
    fn test_builder_rejects_unframeable_settings() {
        assert!(matches!(
            AisEncoderBuilder::new().with_seq_id(10).build(),
            Err(AisError::OutOfRange { .. })
        ));
        assert!(matches!(
            AisEncoderBuilder::new().with_address("AI,VDM").build(),
            Err(AisError::Frame(_))
        ));
        assert!(AisEncoderBuilder::new().with_address("").build().is_err());
    }

    #[test]
    fn test_encoded_lines_always_parse() -> Result<()> {
        let mut encoder = AisEncoderBuilder::new().with_address("AIVDO").build()?;
        let request = EncodeRequest::ClassBPosition(ClassBPositionRequest {
            mmsi: Some(412321751),
            ..Default::default()
        });
        for line in encoder.encode_sentences(&request)? {
            let sentence = RawSentence::parse(&line)?;
            assert_eq!(sentence.address, "AIVDO");
        }
        Ok(())
    }

    #[test]
    fn test_seq_id_rotates_on_multipart_only() -> Result<()> {
        let mut encoder = AisEncoderBuilder::new().with_seq_id(9).build()?;

        let position = EncodeRequest::ClassBPosition(ClassBPositionRequest {
            mmsi: Some(412321751),
            ..Default::default()
        });
        let lines = encoder.encode_sentences(&position)?;
        assert_eq!(lines.len(), 1);
        assert_eq!(encoder.next_seq_id(), 9);

        let voyage = EncodeRequest::StaticVoyage(StaticVoyageRequest {
            mmsi: Some(603916439),
            ..Default::default()
        });
        let lines = encoder.encode_sentences(&voyage)?;
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("!AIVDM,2,1,9,A,"));
        assert_eq!(encoder.next_seq_id(), 0);

        let lines = encoder.encode_sentences(&voyage)?;
        assert!(lines[1].starts_with("!AIVDM,2,2,0,A,"));
        assert_eq!(encoder.next_seq_id(), 1);
        Ok(())
    }

    #[test]
    fn test_encode_error_emits_nothing() {
        let mut encoder = AisEncoder::new();
        let request = EncodeRequest::ClassBPosition(ClassBPositionRequest::default());
        assert_eq!(
            encoder.encode_sentences(&request),
            Err(AisError::MissingField("mmsi".to_string()))
        );
        assert_eq!(encoder.next_seq_id(), 0);
    }

    #[test]
    fn test_encoded_sentences_decode() -> Result<()> {
        let mut encoder = AisEncoder::new();
        let mut decoder = AisDecoder::new();
        let request = EncodeRequest::StaticVoyage(StaticVoyageRequest {
            mmsi: Some(603916439),
            callsign: Some("ZA83R".to_string()),
            shipname: Some("ARCO AVON".to_string()),
            destination: Some("HOUSTON".to_string()),
            ..Default::default()
        });

        let lines = encoder.encode_sentences(&request)?;
        let results = decoder.decode_lines(lines.iter().map(String::as_str));
        let last = results.last().cloned().and_then(DecodedMessage::into_message);
        match last {
            Some(AisMessage::StaticVoyage(data)) => {
                assert_eq!(data.mmsi, 603916439);
                assert_eq!(data.callsign, "ZA83R");
                assert_eq!(data.shipname, "ARCO AVON");
                assert_eq!(data.destination, "HOUSTON");
            }
            other => panic!("unexpected message {other:?}"),
        }
        Ok(())
    }
}
