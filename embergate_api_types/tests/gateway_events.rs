use std::str::FromStr;

use embergate_api_types::{
    decode_frame, encode_frame, DecodeError, DispatchEvent, GatewayEvent, GatewaySendPayload,
    IdentifyConnectionProperties, IdentifyData,
};

#[test]
fn dispatch_event_name_round_trips() {
    assert_eq!(DispatchEvent::from_str("READY"), Ok(DispatchEvent::Ready));
    assert_eq!(DispatchEvent::Ready.to_string(), "READY");
    assert_eq!(
        DispatchEvent::from_str("GUILD_MEMBER_CHUNK"),
        Ok(DispatchEvent::GuildMemberChunk)
    );
}

#[test]
fn decode_hello_frame() {
    let frame = r#"{"op":10,"d":{"heartbeat_interval":41250}}"#;
    match decode_frame(frame).unwrap() {
        GatewayEvent::Hello(interval) => assert_eq!(interval, 41250),
        other => panic!("expected Hello, got {other:?}"),
    }
}

#[test]
fn decode_dispatch_frame_requires_seq_and_event_name() {
    let missing_seq = r#"{"op":0,"t":"READY","d":{}}"#;
    assert_eq!(
        decode_frame(missing_seq).unwrap_err(),
        DecodeError::DispatchMissingEnvelope
    );

    let missing_t = r#"{"op":0,"s":1,"d":{}}"#;
    assert_eq!(
        decode_frame(missing_t).unwrap_err(),
        DecodeError::DispatchMissingEnvelope
    );
}

#[test]
fn decode_dispatch_unknown_event_name_is_recoverable() {
    let frame = r#"{"op":0,"s":3,"t":"SOME_FUTURE_EVENT","d":{"foo":"bar"}}"#;
    match decode_frame(frame).unwrap() {
        GatewayEvent::Dispatch(seq, payload) => {
            assert_eq!(seq, 3);
            assert_eq!(payload.event_name(), "SOME_FUTURE_EVENT");
        }
        other => panic!("expected Dispatch, got {other:?}"),
    }
}

#[test]
fn decode_non_dispatch_frame_rejects_seq_or_event_name() {
    let with_seq = r#"{"op":1,"s":3,"d":null}"#;
    assert_eq!(
        decode_frame(with_seq).unwrap_err(),
        DecodeError::NonDispatchHasEnvelope
    );

    let with_t = r#"{"op":11,"t":"HEARTBEAT_ACK","d":null}"#;
    assert_eq!(
        decode_frame(with_t).unwrap_err(),
        DecodeError::NonDispatchHasEnvelope
    );

    let with_both = r#"{"op":10,"s":1,"t":"HELLO","d":{"heartbeat_interval":1000}}"#;
    assert_eq!(
        decode_frame(with_both).unwrap_err(),
        DecodeError::NonDispatchHasEnvelope
    );
}

#[test]
fn decode_unknown_opcode_is_an_error() {
    let frame = r#"{"op":99}"#;
    assert_eq!(decode_frame(frame).unwrap_err(), DecodeError::UnknownOpcode(99));
}

#[test]
fn encode_identify_carries_op_2() {
    let payload = GatewaySendPayload::Identify(IdentifyData {
        token: "abc".into(),
        properties: IdentifyConnectionProperties::default(),
        compress: false,
        large_threshold: 250,
        shard: (0, 1),
        intents: Some(513),
    });

    let text = encode_frame(&payload).unwrap();
    assert!(text.contains("\"op\":2"));
    assert!(text.contains("\"token\":\"abc\""));
}

#[test]
fn encode_heartbeat_carries_seq_or_null() {
    let text = encode_frame(&GatewaySendPayload::Heartbeat(Some(7))).unwrap();
    assert!(text.contains("\"op\":1"));
    assert!(text.contains("\"d\":7"));

    let text = encode_frame(&GatewaySendPayload::Heartbeat(None)).unwrap();
    assert!(text.contains("\"d\":null"));
}
