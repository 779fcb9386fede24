use super::*;
use page_classifier::relay::MSG_RELAY_KEY_MISSING;

fn message(action: ClassificationKind, text: &str, api_key: &str) -> RelayMessage {
    RelayMessage {
        action,
        text: text.to_string(),
        api_key: api_key.to_string(),
    }
}

#[tokio::test]
async fn test_sentiment_reply() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", COMPLETIONS)
        .match_header("authorization", "Bearer sk-or-1")
        .with_status(200)
        .with_body(completion_body("Positive"))
        .create_async()
        .await;

    let relay = MessageRelay::new(backend_for(&server));
    let reply = relay
        .handle(message(ClassificationKind::Sentiment, "I love this!", "sk-or-1"))
        .await;
    assert_eq!(reply, RelayReply::Sentiment(Label::Positive));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_missing_key_reply() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", COMPLETIONS)
        .expect(0)
        .create_async()
        .await;

    let relay = MessageRelay::new(backend_for(&server));
    let reply = relay
        .handle(message(ClassificationKind::Leaning, "text", " "))
        .await;
    assert_eq!(reply, RelayReply::Error(MSG_RELAY_KEY_MISSING.to_string()));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_failure_reply_names_the_kind() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("POST", COMPLETIONS)
        .with_status(429)
        .with_body(r#"{"error":{"message":"Rate limit exceeded"}}"#)
        .create_async()
        .await;

    let relay = MessageRelay::new(backend_for(&server));
    let reply = relay
        .handle(message(ClassificationKind::Leaning, "text", "sk-or-1"))
        .await;
    assert_eq!(
        reply,
        RelayReply::Error(
            "Could not analyze news leaning: OpenRouter API error: 429 - Rate limit exceeded"
                .to_string()
        )
    );
}

#[tokio::test]
async fn test_run_answers_one_line_per_message() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("POST", COMPLETIONS)
        .with_status(200)
        .with_body(completion_body("Right-leaning"))
        .create_async()
        .await;

    let relay = MessageRelay::new(backend_for(&server));
    let input = concat!(
        r#"{"action":"analyzeLeaning","text":"Cut taxes now.","apiKey":"sk-or-1"}"#,
        "\n\n",
        r#"{"action":"sentiment","text":"hi","apiKey":""}"#,
        "\n",
        "not json\n",
    );
    let mut output = Vec::new();
    relay.run(input.as_bytes(), &mut output).await.unwrap();

    let output = String::from_utf8(output).unwrap();
    let replies: Vec<RelayReply> = output
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(replies.len(), 3);
    assert_eq!(replies[0], RelayReply::Leaning(Label::RightLeaning));
    assert_eq!(replies[1], RelayReply::Error(MSG_RELAY_KEY_MISSING.to_string()));
    assert!(matches!(&replies[2], RelayReply::Error(e) if e.starts_with("invalid message")));
    assert!(output.lines().next().unwrap().contains(r#""leaning":"Right-leaning""#));
}

#[tokio::test]
async fn test_run_survives_non_utf8_line() {
    let server = mockito::Server::new_async().await;
    let relay = MessageRelay::new(backend_for(&server));

    let mut input = b"\xff\xfe garbage\n".to_vec();
    input.extend_from_slice(br#"{"action":"sentiment","text":"hi","apiKey":""}"#);
    input.push(b'\n');
    let mut output = Vec::new();
    relay.run(input.as_slice(), &mut output).await.unwrap();

    let output = String::from_utf8(output).unwrap();
    let replies: Vec<RelayReply> = output
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(replies.len(), 2);
    assert!(matches!(&replies[0], RelayReply::Error(e) if e.starts_with("invalid message")));
    assert_eq!(replies[1], RelayReply::Error(MSG_RELAY_KEY_MISSING.to_string()));
}
