use aivdm_codec::{
    AisDecoder, AisError, AisMessage, Channel, DecodedMessage, NavigationStatus, RawSentence,
    Validity,
};
use test_case::test_case;

const TYPE18: &str = "!AIVDM,1,1,,A,B69>7mh0?B<:>05B0`0e8TN000000,0*72";

const TYPE5_SEQ0_PART1: &str =
    "!AIVDM,2,1,0,A,58wt8Ui`g??r21`7S=:22058<v05Htp000000015>8OA;0sk,0*7B";
const TYPE5_SEQ1_PART1: &str =
    "!AIVDM,2,1,1,A,58wt8Ui`g??r21`7S=:22058<v05Htp000000015>8OA;0sk,0*7B";
const TYPE5_SEQ0_PART2: &str = "!AIVDM,2,2,0,A,eQ8823mDm3kP00000000000,2*5D";
const TYPE5_SEQ1_PART2: &str = "!AIVDM,2,2,1,A,eQ8823mDm3kP00000000000,2*5D";

fn assert_arco_avon(decoded: &DecodedMessage) {
    assert_eq!(decoded.validity(), Validity::Valid);
    match decoded.message() {
        Some(AisMessage::StaticVoyage(data)) => {
            assert_eq!(data.mmsi, 603916439);
            assert_eq!(data.shipname, "ARCO AVON");
            assert_eq!(data.callsign, "ZA83R");
            assert_eq!(data.imo, 439303422);
            assert_eq!(data.cargo_type, 69);
            assert_eq!(
                (data.eta_month, data.eta_day, data.eta_hour, data.eta_minute),
                (3, 23, 19, 45)
            );
            assert!(
                data.destination.ends_with("HOUSTON"),
                "destination {:?}",
                data.destination
            );
        }
        other => panic!("expected static voyage data, got {other:?}"),
    }
}

#[test]
fn test_class_b_position_report() {
    let mut decoder = AisDecoder::new();
    let decoded = decoder.decode_line(TYPE18);

    assert_eq!(decoded.validity(), Validity::Valid);
    assert_eq!(decoded.message_type(), Some(18));
    let Some(AisMessage::ClassBPosition(report)) = decoded.message() else {
        panic!("expected a class B report, got {decoded:?}");
    };
    assert_eq!(report.mmsi, 412321751);
    assert!((report.longitude - 122.4733866).abs() < 1e-6, "{}", report.longitude);
    assert!((report.latitude - 36.91968).abs() < 1e-5, "{}", report.latitude);
    assert!((report.course_over_ground - 72.2).abs() < 1e-9);
    assert!((report.speed_over_ground - 6.1).abs() < 1e-9);
}

#[test]
fn test_crlf_terminated_line() {
    let mut decoder = AisDecoder::new();
    let decoded = decoder.decode_line(&format!("{TYPE18}\r\n"));
    assert!(decoded.is_valid());
}

#[test]
fn test_interleaved_multipart_static_voyage() {
    let mut decoder = AisDecoder::new();

    let first = decoder.decode_line(TYPE5_SEQ0_PART1);
    assert_eq!(first.validity(), Validity::Partial);
    assert!(first.message().is_none());

    let second = decoder.decode_line(TYPE5_SEQ1_PART1);
    assert_eq!(second.validity(), Validity::Partial);
    assert_eq!(decoder.context().len(), 2);

    assert_arco_avon(&decoder.decode_line(TYPE5_SEQ0_PART2));
    assert_eq!(decoder.context().len(), 1);

    assert_arco_avon(&decoder.decode_line(TYPE5_SEQ1_PART2));
    assert!(decoder.context().is_empty());
}

#[test]
fn test_static_voyage_derived_values() {
    let mut decoder = AisDecoder::new();
    let results = decoder.decode_lines([TYPE5_SEQ0_PART1, TYPE5_SEQ0_PART2]);
    let Some(AisMessage::StaticVoyage(data)) = results[1].message() else {
        panic!("expected static voyage data, got {:?}", results[1]);
    };
    assert_eq!(data.length(), data.dim_a + data.dim_b);
    assert_eq!(
        data.width(),
        u16::from(data.dim_c) + u16::from(data.dim_d)
    );
}

#[test]
fn test_not_a_sentence() {
    let mut decoder = AisDecoder::new();
    let decoded = decoder.decode_line("This is not a valid message");
    assert_eq!(decoded.validity(), Validity::Invalid);
    assert_eq!(decoded.message_type(), None);
    assert!(decoded.message().is_none());
}

#[test_case("" ; "empty line")]
#[test_case("!AIVDM,1,1,,A,B69>7mh0?B<:>05B0`0e8TN000000,0*73" ; "wrong checksum")]
#[test_case("!AIVDM,1,1,,A,B69>7mh0?B<:>05B0`0e8TN000000,0" ; "missing checksum")]
#[test_case("AIVDM,1,1,,A,B69>7mh0?B<:>05B0`0e8TN000000,0*72" ; "missing marker")]
#[test_case("!AIVDM,1,1,,A,B69>7mh0?B<:>05B0`0e8TN000000*6E" ; "missing fill field")]
fn test_malformed_frames_are_invalid(line: &str) {
    let mut decoder = AisDecoder::new();
    let decoded = decoder.decode_line(line);
    assert_eq!(decoded.validity(), Validity::Invalid);
    assert!(matches!(decoded.error(), Some(AisError::Frame(_))));
}

#[test]
fn test_every_single_bit_corruption_is_rejected() {
    let mut decoder = AisDecoder::new();
    let bytes = TYPE18.as_bytes();
    for position in 0..bytes.len() {
        for bit in 0..7 {
            let mut corrupted = bytes.to_vec();
            corrupted[position] ^= 1 << bit;
            let line = String::from_utf8(corrupted).unwrap();
            let decoded = decoder.decode_line(&line);
            assert_eq!(
                decoded.validity(),
                Validity::Invalid,
                "corruption at {position}:{bit} accepted: {line:?}"
            );
        }
    }
}

#[test]
fn test_orphan_fragment_is_invalid() {
    let mut decoder = AisDecoder::new();
    let decoded = decoder.decode_line(TYPE5_SEQ0_PART2);
    assert_eq!(decoded.validity(), Validity::Invalid);
    assert!(matches!(decoded.error(), Some(AisError::Fragment(_))));
}

#[test]
fn test_duplicate_fragment_keeps_assembly() {
    let mut decoder = AisDecoder::new();
    decoder.decode_line(TYPE5_SEQ0_PART1);
    decoder.decode_line(TYPE5_SEQ0_PART1);
    assert_eq!(decoder.context().len(), 1);
    assert_arco_avon(&decoder.decode_line(TYPE5_SEQ0_PART2));
}

#[test_case("4", Some(4) ; "base station report")]
#[test_case("8", Some(8) ; "binary broadcast")]
fn test_unsupported_type_keeps_type_id(first_char: &str, expected: Option<u8>) {
    let payload = format!("{first_char}000000000000000000000000000");
    let line = aivdm_codec::frame::build_frame("AIVDM", 1, 1, None, Channel::A, &payload, 0);
    let mut decoder = AisDecoder::new();
    let decoded = decoder.decode_line(&line);
    assert_eq!(decoded.validity(), Validity::Invalid);
    assert_eq!(decoded.message_type(), expected);
    assert!(matches!(decoded.error(), Some(AisError::UnsupportedType(_))));
}

#[test]
fn test_channel_aliases_and_own_ship() {
    let line = aivdm_codec::frame::build_frame(
        "AIVDO",
        1,
        1,
        None,
        Channel::B,
        "B69>7mh0?B<:>05B0`0e8TN000000",
        0,
    );
    let sentence = RawSentence::parse(&line).unwrap();
    assert!(sentence.is_own_ship());
    assert_eq!(sentence.talker(), "AI");
    assert_eq!(sentence.formatter(), "VDO");
    assert_eq!(sentence.channel, Channel::B);

    let numeric = line.replacen(",B,", ",2,", 1);
    let body = &numeric[1..numeric.len() - 3];
    let numeric = format!("!{body}*{:02X}", aivdm_codec::frame::checksum(body));
    assert_eq!(RawSentence::parse(&numeric).unwrap().channel, Channel::B);
}

#[test]
fn test_navigation_status_text() {
    assert_eq!(
        NavigationStatus::try_from(5).unwrap(),
        NavigationStatus::Moored
    );
    assert!(NavigationStatus::try_from(16).is_err());
}
