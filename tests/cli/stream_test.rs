//! Integration tests for the JSON-lines reader.

use chat_alerts::chat::{Channel, Payload, ScanPass};
use chat_alerts::cli::{read_messages, InboundMessage, StreamError};
use futures_util::StreamExt;
use tokio::io::BufReader;

use crate::common::{literal_rule, recording_watcher};

#[tokio::test]
async fn read_messages_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chat.jsonl");
    std::fs::write(
        &path,
        concat!(
            r#"{"channel":"party","sender":[{"type":"text","value":"Alice"}],"body":[{"type":"text","value":"raid soon"}]}"#,
            "\n",
            r#"{"channel":"shout","body":[{"type":"text","value":"wts gil"}],"pre_filter":true}"#,
            "\n",
        ),
    )
    .unwrap();

    let file = tokio::fs::File::open(&path).await.unwrap();
    let messages: Vec<InboundMessage> = read_messages(BufReader::new(file))
        .map(Result::unwrap)
        .collect()
        .await;

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].message.channel, Channel::Party);
    assert_eq!(messages[0].pass(), ScanPass::Display);
    assert_eq!(messages[1].pass(), ScanPass::PreFilter);
}

#[tokio::test]
async fn malformed_line_does_not_end_stream() {
    let input = "{\"channel\":\"nowhere\"}\n{\"channel\":\"say\"}\n";
    let items: Vec<_> = read_messages(input.as_bytes()).collect().await;

    assert_eq!(items.len(), 2);
    assert!(matches!(items[0], Err(StreamError::Parse(_))));
    assert!(items[1].as_ref().unwrap().message.body.is_empty());
}

#[tokio::test]
async fn stream_feeds_watcher() {
    let mut rule = literal_rule("raid", "raid", &[Channel::Party]);
    rule.foreground_color = 5;
    let (mut watcher, _) = recording_watcher(vec![rule]);

    let input = concat!(
        r#"{"channel":"party","body":[{"type":"text","value":"raid"}]}"#,
        "\n"
    );
    let mut stream = Box::pin(read_messages(input.as_bytes()));
    let mut inbound = stream.next().await.unwrap().unwrap();
    let pass = inbound.pass();
    let outcome = watcher.handle_message(&mut inbound.message, pass);

    assert!(outcome.rewritten);
    let json = serde_json::to_value(&inbound).unwrap();
    assert_eq!(json["body"][0]["type"], "foreground_on");
    assert_eq!(json["body"][0]["value"], 5);
    assert_eq!(json["pre_filter"], false);
    assert_eq!(inbound.message.body.payloads()[1], Payload::text("raid"));
}
