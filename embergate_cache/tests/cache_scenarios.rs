use std::sync::Arc;

use embergate_api_types::{decode_frame, GatewayEvent};
use embergate_cache::{ApiMessage, Registry, Snapshot};

fn apply(prev: &Arc<Snapshot>, frame: &str) -> (Arc<Snapshot>, Option<ApiMessage>) {
    let GatewayEvent::Dispatch(_, payload) = decode_frame(frame).unwrap() else {
        panic!("expected a dispatch frame");
    };
    Registry::apply(prev, &payload)
}

#[test]
fn guild_create_then_delete_unavailable_moves_guild() {
    let snapshot = Arc::new(Snapshot::empty());

    let (snapshot, _) = apply(
        &snapshot,
        r#"{"op":0,"s":1,"t":"GUILD_CREATE","d":{"id":"1","name":"g","owner_id":"2"}}"#,
    );
    assert!(snapshot.guilds.contains_key("1"));

    let (snapshot, _) = apply(
        &snapshot,
        r#"{"op":0,"s":2,"t":"GUILD_DELETE","d":{"id":"1","unavailable":true}}"#,
    );

    assert!(!snapshot.guilds.contains_key("1"));
    assert!(snapshot.unavailable_guilds.contains_key("1"));
}

#[test]
fn guild_delete_without_unavailable_removes_entirely() {
    let snapshot = Arc::new(Snapshot::empty());
    let (snapshot, _) = apply(
        &snapshot,
        r#"{"op":0,"s":1,"t":"GUILD_CREATE","d":{"id":"1","name":"g","owner_id":"2"}}"#,
    );
    let (snapshot, _) = apply(
        &snapshot,
        r#"{"op":0,"s":2,"t":"GUILD_DELETE","d":{"id":"1","unavailable":false}}"#,
    );

    assert!(!snapshot.guilds.contains_key("1"));
    assert!(!snapshot.unavailable_guilds.contains_key("1"));
}

#[test]
fn channel_delete_preserves_prior_snapshot() {
    let snapshot = Arc::new(Snapshot::empty());
    let (snapshot, _) = apply(
        &snapshot,
        r#"{"op":0,"s":1,"t":"GUILD_CREATE","d":{"id":"1","name":"g","owner_id":"2"}}"#,
    );
    let (snapshot, _) = apply(
        &snapshot,
        r#"{"op":0,"s":2,"t":"CHANNEL_CREATE","d":{"id":"C","type":0,"guild_id":"1"}}"#,
    );
    assert!(snapshot.get_guild_channel(&"C".to_string()).is_some());

    let (snapshot, message) = apply(
        &snapshot,
        r#"{"op":0,"s":3,"t":"CHANNEL_DELETE","d":{"id":"C","type":0,"guild_id":"1"}}"#,
    );

    assert!(snapshot.get_guild_channel(&"C".to_string()).is_none());
    match message {
        Some(ApiMessage::ChannelDelete { prev, curr, channel_id }) => {
            assert_eq!(channel_id, "C");
            assert!(prev.get_guild_channel(&channel_id).is_some());
            assert!(curr.get_guild_channel(&channel_id).is_none());
        }
        other => panic!("expected ChannelDelete, got {other:?}"),
    }
}

#[test]
fn message_create_is_visible_in_cache() {
    let snapshot = Arc::new(Snapshot::empty());
    let (snapshot, _) = apply(
        &snapshot,
        r#"{"op":0,"s":7,"t":"MESSAGE_CREATE","d":{"id":"M","channel_id":"C","author":{"id":"U","username":"a","discriminator":"0001","avatar":null},"content":"hi","timestamp":"now"}}"#,
    );

    let message = snapshot.get_message(&"C".to_string(), &"M".to_string()).unwrap();
    assert_eq!(message.content, "hi");
}

#[test]
fn message_update_with_only_content_preserves_other_fields() {
    let snapshot = Arc::new(Snapshot::empty());
    let (snapshot, _) = apply(
        &snapshot,
        r#"{"op":0,"s":1,"t":"MESSAGE_CREATE","d":{"id":"M","channel_id":"C","author":{"id":"U","username":"a","discriminator":"0001","avatar":null},"content":"hi","timestamp":"t1","mention_everyone":true}}"#,
    );

    let (snapshot, _) = apply(
        &snapshot,
        r#"{"op":0,"s":2,"t":"MESSAGE_UPDATE","d":{"id":"M","channel_id":"C","content":"edited"}}"#,
    );

    let message = snapshot.get_message(&"C".to_string(), &"M".to_string()).unwrap();
    assert_eq!(message.content, "edited");
    assert_eq!(message.timestamp, "t1");
    assert!(message.mention_everyone);
}

#[test]
fn message_update_for_uncached_message_yields_no_api_message() {
    let snapshot = Arc::new(Snapshot::empty());
    let (_, message) = apply(
        &snapshot,
        r#"{"op":0,"s":1,"t":"MESSAGE_UPDATE","d":{"id":"M","channel_id":"C","content":"edited"}}"#,
    );
    assert!(message.is_none());
}

#[test]
fn guild_member_remove_keeps_user_in_top_level_map() {
    let snapshot = Arc::new(Snapshot::empty());
    let (snapshot, _) = apply(
        &snapshot,
        r#"{"op":0,"s":1,"t":"GUILD_CREATE","d":{"id":"1","name":"g","owner_id":"2"}}"#,
    );
    let (snapshot, _) = apply(
        &snapshot,
        r#"{"op":0,"s":2,"t":"GUILD_MEMBER_ADD","d":{"guild_id":"1","user":{"id":"U","username":"a","discriminator":"0001","avatar":null}}}"#,
    );
    assert!(snapshot.guilds["1"].members.contains_key("U"));

    let (snapshot, _) = apply(
        &snapshot,
        r#"{"op":0,"s":3,"t":"GUILD_MEMBER_REMOVE","d":{"guild_id":"1","user":{"id":"U","username":"a","discriminator":"0001","avatar":null}}}"#,
    );

    assert!(!snapshot.guilds["1"].members.contains_key("U"));
    assert!(snapshot.users.contains_key("U"));
}

#[test]
fn unknown_event_name_does_not_block_subsequent_known_dispatches() {
    let snapshot = Arc::new(Snapshot::empty());
    let (snapshot, message) = apply(
        &snapshot,
        r#"{"op":0,"s":1,"t":"SOME_FUTURE_EVENT","d":{}}"#,
    );
    assert!(message.is_none());

    let (snapshot, _) = apply(
        &snapshot,
        r#"{"op":0,"s":2,"t":"GUILD_CREATE","d":{"id":"1","name":"g","owner_id":"2"}}"#,
    );
    assert!(snapshot.guilds.contains_key("1"));
}
