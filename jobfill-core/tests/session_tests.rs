// Tests for the session state machine over the static backend.

use jobfill_core::{CoreError, FillSession, PlatformId, ResumeData, SessionState};
use jobfill_driver::StaticBackend;
use std::time::Duration;

const APPLY_URL: &str = "https://careers.example.com/apply";

const GENERIC_FORM: &str = r#"<html><body><form>
    <input name="first_name" type="text">
    <input name="last_name" type="text">
    <input name="applicant_email" type="email">
    <textarea name="skills"></textarea>
</form></body></html>"#;

fn session_with(url: &str, html: &str) -> FillSession {
    FillSession::new(Box::new(StaticBackend::new().with_page(url, html)))
}

fn sample_resume() -> ResumeData {
    ResumeData::from_json(
        r#"{
            "contact": {"firstName": "Ann", "lastName": "Lee", "email": "a@x.com"},
            "experience": [{"company": "Acme", "title": "Eng"}],
            "skills": {"technical": ["Go", "SQL"]}
        }"#,
    )
    .unwrap()
}

#[tokio::test]
async fn test_full_pass_walks_the_state_machine() {
    let mut session = session_with(APPLY_URL, GENERIC_FORM);
    assert_eq!(session.state(), SessionState::Unnavigated);

    session.navigate(APPLY_URL, Duration::from_secs(5)).await.unwrap();
    assert_eq!(session.state(), SessionState::Navigated);

    let platform = session.detect_platform().await.unwrap();
    assert_eq!(platform, PlatformId::Generic);
    assert_eq!(session.state(), SessionState::PlatformDetected);

    let fields = session.discover_fields().await.unwrap();
    assert_eq!(fields.len(), 4);
    assert_eq!(session.state(), SessionState::FieldsDiscovered);

    let outcome = session.fill(&sample_resume()).await.unwrap();
    assert_eq!(outcome.filled, 4);
    assert_eq!(outcome.failed, 0);
    assert_eq!(session.state(), SessionState::Filled);
}

#[tokio::test]
async fn test_operations_before_navigation_are_errors() {
    let mut session = session_with(APPLY_URL, GENERIC_FORM);

    let detect = session.detect_platform().await;
    assert!(matches!(detect, Err(CoreError::InvalidState { .. })));

    let discover = session.discover_fields().await;
    assert!(matches!(discover, Err(CoreError::InvalidState { .. })));

    let fill = session.fill(&sample_resume()).await;
    assert!(matches!(fill, Err(CoreError::InvalidState { .. })));
}

#[tokio::test]
async fn test_platform_uses_dedicated_rules() {
    let url = "https://boards.greenhouse.io/acme/jobs/42";
    let html = r#"<html><body><form>
        <input name="first_name" type="text">
        <input name="last_name" type="text">
    </form></body></html>"#;
    let mut session = session_with(url, html);

    session.navigate(url, Duration::from_secs(5)).await.unwrap();
    let platform = session.detect_platform().await.unwrap();
    assert_eq!(platform, PlatformId::Greenhouse);

    let fields = session.discover_fields().await.unwrap();
    let names: Vec<&str> = fields.iter().map(|f| f.logical_name.as_str()).collect();
    assert_eq!(names, vec!["firstName", "lastName"]);
}

#[tokio::test]
async fn test_rediscovery_replaces_not_accumulates() {
    let mut session = session_with(APPLY_URL, GENERIC_FORM);
    session.navigate(APPLY_URL, Duration::from_secs(5)).await.unwrap();
    session.detect_platform().await.unwrap();

    let first: Vec<(String, String)> = session
        .discover_fields()
        .await
        .unwrap()
        .iter()
        .map(|f| (f.logical_name.clone(), f.matched_selector.clone()))
        .collect();

    let second: Vec<(String, String)> = session
        .discover_fields()
        .await
        .unwrap()
        .iter()
        .map(|f| (f.logical_name.clone(), f.matched_selector.clone()))
        .collect();

    assert_eq!(first, second);
    assert_eq!(session.fields().len(), first.len());
}

#[tokio::test]
async fn test_platform_is_cached_per_page() {
    let mut session = session_with(APPLY_URL, GENERIC_FORM);
    session.navigate(APPLY_URL, Duration::from_secs(5)).await.unwrap();

    let first = session.detect_platform().await.unwrap();
    let second = session.detect_platform().await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_navigation_restarts_the_lifecycle() {
    let mut session = FillSession::new(Box::new(
        StaticBackend::new()
            .with_page(APPLY_URL, GENERIC_FORM)
            .with_page("https://jobs.lever.co/acme/1", "<html><body></body></html>"),
    ));

    session.navigate(APPLY_URL, Duration::from_secs(5)).await.unwrap();
    session.detect_platform().await.unwrap();
    session.discover_fields().await.unwrap();
    assert!(!session.fields().is_empty());

    session
        .navigate("https://jobs.lever.co/acme/1", Duration::from_secs(5))
        .await
        .unwrap();
    assert_eq!(session.state(), SessionState::Navigated);
    assert!(session.fields().is_empty());
    assert_eq!(session.platform(), None);

    let platform = session.detect_platform().await.unwrap();
    assert_eq!(platform, PlatformId::Lever);
}

#[tokio::test]
async fn test_navigation_to_unloadable_page_is_fatal() {
    let mut session = session_with(APPLY_URL, GENERIC_FORM);
    let result = session
        .navigate("https://nowhere.example.com/", Duration::from_secs(5))
        .await;
    assert!(result.is_err());
    assert_eq!(session.state(), SessionState::Unnavigated);
}

#[tokio::test]
async fn test_close_is_idempotent() {
    let mut session = session_with(APPLY_URL, GENERIC_FORM);
    // Closing an unnavigated session must also be safe.
    session.close().await.unwrap();
    session.close().await.unwrap();
}

#[tokio::test]
async fn test_screenshot_writes_capture() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("page.html");

    let mut session = session_with(APPLY_URL, GENERIC_FORM);
    session.navigate(APPLY_URL, Duration::from_secs(5)).await?;
    session.screenshot(&path).await?;

    let captured = std::fs::read_to_string(&path)?;
    assert!(captured.contains("first_name"));
    Ok(())
}
