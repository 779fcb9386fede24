use super::*;
use page_classifier::session::{MSG_EXTRACT_FAILED, MSG_KEY_REQUIRED, MSG_NO_TEXT};
use serial_test::serial;

fn page(text: &str) -> PageSource {
    PageSource::Text(text.to_string())
}

#[tokio::test]
async fn test_missing_key_stops_before_network() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", COMPLETIONS)
        .expect(0)
        .create_async()
        .await;

    let mut session = ClassifierSession::new(backend_for(&server), MemoryStore::new());
    assert_eq!(session.credential_status(), CredentialStatus::Missing);

    let state = session
        .analyze(ClassificationKind::Sentiment, &page("I love this!"))
        .await;
    assert_eq!(state, DisplayState::Error(MSG_KEY_REQUIRED.to_string()));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_empty_page_stops_before_network() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", COMPLETIONS)
        .expect(0)
        .create_async()
        .await;

    let mut session = ClassifierSession::new(backend_for(&server), MemoryStore::new());
    session.save_credential("sk-or-1").unwrap();

    for source in [
        page(""),
        page(" \n\t \u{00A0}"),
        PageSource::Html("<html><head><script>var x = 1;</script></head><body> </body></html>".into()),
    ] {
        let state = session.analyze(ClassificationKind::Leaning, &source).await;
        assert_eq!(state, DisplayState::Error(MSG_NO_TEXT.to_string()));
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_unreadable_page() {
    let server = mockito::Server::new_async().await;
    let dir = tempfile::tempdir().unwrap();
    let mut session = ClassifierSession::new(backend_for(&server), MemoryStore::new())
        .with_credential_override(Some("sk-or-1"));

    let state = session
        .analyze(
            ClassificationKind::Sentiment,
            &PageSource::File(dir.path().join("missing.html")),
        )
        .await;
    assert_eq!(state, DisplayState::Error(MSG_EXTRACT_FAILED.to_string()));
}

#[tokio::test]
async fn test_saved_key_is_used() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", COMPLETIONS)
        .match_header("authorization", "Bearer sk-or-saved")
        .with_status(200)
        .with_body(completion_body("Negative"))
        .create_async()
        .await;

    let mut session = ClassifierSession::new(backend_for(&server), MemoryStore::new());
    assert_eq!(
        session.save_credential("  sk-or-saved  ").unwrap(),
        CredentialStatus::Saved
    );
    assert_eq!(session.credential_status(), CredentialStatus::Loaded);

    let state = session
        .analyze(ClassificationKind::Sentiment, &page("This is awful."))
        .await;
    assert_eq!(
        state,
        DisplayState::Label {
            kind: ClassificationKind::Sentiment,
            label: Label::Negative,
            tone: Tone::Red,
        }
    );
    assert_eq!(state.to_string(), "Negative");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_blank_save_is_rejected() {
    let server = mockito::Server::new_async().await;
    let mut session = ClassifierSession::new(backend_for(&server), MemoryStore::new());
    session.save_credential("sk-or-1").unwrap();

    assert_eq!(
        session.save_credential("   ").unwrap(),
        CredentialStatus::Rejected
    );
    // the earlier key survives a rejected save
    assert_eq!(session.credential_status(), CredentialStatus::Loaded);
}

#[tokio::test]
async fn test_override_beats_stored_key() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", COMPLETIONS)
        .match_header("authorization", "Bearer sk-or-typed")
        .with_status(200)
        .with_body(completion_body("Left-leaning"))
        .create_async()
        .await;

    let mut store = MemoryStore::new();
    store
        .set(page_classifier::credentials::CREDENTIAL_KEY, "sk-or-stored")
        .unwrap();
    let mut session = ClassifierSession::new(backend_for(&server), store)
        .with_credential_override(Some("sk-or-typed"));

    let state = session
        .analyze(ClassificationKind::Leaning, &page("The union won better wages."))
        .await;
    assert_eq!(
        state,
        DisplayState::Label {
            kind: ClassificationKind::Leaning,
            label: Label::LeftLeaning,
            tone: Tone::Blue,
        }
    );
    mock.assert_async().await;
}

#[tokio::test]
#[serial]
async fn test_env_key_is_last_resort() {
    const ENV_VAR: &str = "PAGE_CLASSIFIER_TEST_ENV_KEY";
    std::env::set_var(ENV_VAR, "sk-or-env");

    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", COMPLETIONS)
        .match_header("authorization", "Bearer sk-or-env")
        .with_status(200)
        .with_body(completion_body("Neutral"))
        .create_async()
        .await;

    let backend = PageClassifier::openrouter()
        .logging_enabled(false)
        .with_api_base_url(server.url())
        .with_api_key_env_var(ENV_VAR)
        .init()
        .unwrap();
    let mut session = ClassifierSession::new(backend, MemoryStore::new());
    assert_eq!(session.credential_status(), CredentialStatus::Missing);

    let state = session
        .analyze(ClassificationKind::Sentiment, &page("The meeting is at noon."))
        .await;
    std::env::remove_var(ENV_VAR);

    assert_eq!(state.to_string(), "Neutral");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_classifier_failure_display() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("POST", COMPLETIONS)
        .with_status(401)
        .with_body(r#"{"error":{"message":"User not found.","code":401}}"#)
        .create_async()
        .await;

    let mut session = ClassifierSession::new(backend_for(&server), MemoryStore::new())
        .with_credential_override(Some("sk-or-bad"));
    let state = session
        .analyze(ClassificationKind::Sentiment, &page("Hello"))
        .await;

    assert!(state.is_error());
    assert_eq!(
        state.to_string(),
        "Error: OpenRouter API error: 401 - User not found."
    );
}

#[tokio::test]
async fn test_confy_store_round_trip_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("credentials.toml");
    let server = mockito::Server::new_async().await;

    let mut first = ClassifierSession::new(backend_for(&server), ConfyStore::new(&path));
    assert_eq!(first.credential_status(), CredentialStatus::Missing);
    first.save_credential("sk-or-persisted").unwrap();

    let second = ClassifierSession::new(backend_for(&server), ConfyStore::new(&path));
    assert_eq!(second.credential_status(), CredentialStatus::Loaded);
    let credential = second.resolve_credential().unwrap();
    assert_eq!(
        secrecy::ExposeSecret::expose_secret(&credential),
        "sk-or-persisted"
    );
}

#[tokio::test]
async fn test_credential_checked_without_a_page() {
    let server = mockito::Server::new_async().await;
    let session = ClassifierSession::new(backend_for(&server), MemoryStore::new());
    assert_eq!(
        session.require_credential().unwrap_err(),
        DisplayState::Error(MSG_KEY_REQUIRED.to_string())
    );

    let session = session.with_credential_override(Some(" sk-or-typed "));
    let credential = session.require_credential().unwrap();
    assert_eq!(
        secrecy::ExposeSecret::expose_secret(&credential),
        "sk-or-typed"
    );
}
