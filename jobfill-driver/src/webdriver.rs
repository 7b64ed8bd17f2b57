use crate::backend::{ElementHandle, PageDriver};
use crate::error::{DriverError, Result};
use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use serde_json::{Value, json};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// W3C WebDriver element identifier key.
const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// How often `dom_ready` re-checks `document.readyState`.
const READY_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Backend speaking the W3C WebDriver wire protocol to a driver process
/// (chromedriver, geckodriver, or a Selenium grid endpoint).
pub struct WebDriverBackend {
    client: Client,
    base: String,
    session_id: Option<String>,
}

impl WebDriverBackend {
    /// Create a browser session against `endpoint` (e.g. `http://localhost:9515`).
    /// Failure to create the session is fatal for the caller.
    pub async fn connect(endpoint: &str, headless: bool) -> Result<Self> {
        let client = Client::builder()
            .user_agent("Jobfill/0.1 (https://github.com/trapdoorsec/jobfill)")
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(DriverError::HttpError)?;

        let mut args = vec![
            "--no-sandbox".to_string(),
            "--disable-dev-shm-usage".to_string(),
            "--disable-gpu".to_string(),
            "--window-size=1920,1080".to_string(),
        ];
        if headless {
            args.push("--headless".to_string());
        }

        let base = endpoint.trim_end_matches('/').to_string();
        let body = json!({
            "capabilities": {
                "alwaysMatch": {
                    "browserName": "chrome",
                    "goog:chromeOptions": { "args": args }
                }
            }
        });

        let response = client
            .post(format!("{}/session", base))
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        let payload: Value = response.json().await?;
        let value = unwrap_value(status.as_u16(), payload)?;

        let session_id = value
            .get("sessionId")
            .and_then(|v| v.as_str())
            .ok_or_else(|| DriverError::Session("no sessionId in response".to_string()))?
            .to_string();

        info!("WebDriver session {} created at {}", session_id, base);

        Ok(Self {
            client,
            base,
            session_id: Some(session_id),
        })
    }

    fn session(&self) -> Result<&str> {
        self.session_id
            .as_deref()
            .ok_or_else(|| DriverError::Session("session is closed".to_string()))
    }

    fn session_url(&self, tail: &str) -> Result<String> {
        Ok(format!("{}/session/{}{}", self.base, self.session()?, tail))
    }

    async fn get(&self, tail: &str) -> Result<Value> {
        let response = self.client.get(self.session_url(tail)?).send().await?;
        let status = response.status().as_u16();
        let payload: Value = response.json().await?;
        unwrap_value(status, payload)
    }

    async fn post(&self, tail: &str, body: Value) -> Result<Value> {
        let response = self
            .client
            .post(self.session_url(tail)?)
            .json(&body)
            .send()
            .await?;
        let status = response.status().as_u16();
        let payload: Value = response.json().await?;
        unwrap_value(status, payload)
    }

    /// All option elements belonging to a select, in document order.
    async fn option_handles(&self, el: &ElementHandle) -> Result<Vec<ElementHandle>> {
        let value = self
            .post(
                &format!("/element/{}/elements", el.raw()),
                json!({ "using": "css selector", "value": "option" }),
            )
            .await?;

        let mut handles = Vec::new();
        if let Some(items) = value.as_array() {
            for item in items {
                if let Some(id) = item.get(ELEMENT_KEY).and_then(|v| v.as_str()) {
                    handles.push(ElementHandle::new(id));
                }
            }
        }
        Ok(handles)
    }

    async fn click(&self, el: &ElementHandle) -> Result<()> {
        self.post(&format!("/element/{}/click", el.raw()), json!({}))
            .await?;
        Ok(())
    }
}

/// Extract the `value` field from a wire response, converting protocol
/// errors into `DriverError` variants.
fn unwrap_value(status: u16, payload: Value) -> Result<Value> {
    let value = payload.get("value").cloned().unwrap_or(Value::Null);

    if (200..300).contains(&status) {
        return Ok(value);
    }

    let error = value
        .get("error")
        .and_then(|v| v.as_str())
        .unwrap_or("unknown error")
        .to_string();
    let message = value
        .get("message")
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string();

    match error.as_str() {
        "invalid selector" => Err(DriverError::InvalidSelector(message)),
        "no such element" => Err(DriverError::NoSuchElement(message)),
        _ => Err(DriverError::Wire { error, message }),
    }
}

#[async_trait]
impl PageDriver for WebDriverBackend {
    async fn goto(&mut self, url: &str) -> Result<()> {
        debug!("Navigating to {}", url);
        self.post("/url", json!({ "url": url }))
            .await
            .map_err(|e| DriverError::Navigation(format!("{}: {}", url, e)))?;
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        let value = self.get("/url").await?;
        value
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| DriverError::Session("current URL is not a string".to_string()))
    }

    async fn dom_ready(&self, timeout: Duration) -> Result<bool> {
        let start = Instant::now();
        loop {
            let value = self
                .post(
                    "/execute/sync",
                    json!({ "script": "return document.readyState", "args": [] }),
                )
                .await?;

            if value.as_str() == Some("complete") {
                return Ok(true);
            }
            if start.elapsed() >= timeout {
                warn!("Page not ready after {:?}", timeout);
                return Ok(false);
            }
            tokio::time::sleep(READY_POLL_INTERVAL).await;
        }
    }

    async fn query(&self, selector: &str) -> Result<Option<ElementHandle>> {
        let result = self
            .post(
                "/element",
                json!({ "using": "css selector", "value": selector }),
            )
            .await;

        match result {
            Ok(value) => {
                let id = value
                    .get(ELEMENT_KEY)
                    .and_then(|v| v.as_str())
                    .ok_or_else(|| {
                        DriverError::Session("element response missing identifier".to_string())
                    })?;
                Ok(Some(ElementHandle::new(id)))
            }
            Err(DriverError::NoSuchElement(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn tag_name(&self, el: &ElementHandle) -> Result<String> {
        let value = self.get(&format!("/element/{}/name", el.raw())).await?;
        Ok(value.as_str().unwrap_or_default().to_lowercase())
    }

    async fn attribute(&self, el: &ElementHandle, name: &str) -> Result<Option<String>> {
        let value = self
            .get(&format!("/element/{}/attribute/{}", el.raw(), name))
            .await?;
        Ok(value.as_str().map(|s| s.to_string()))
    }

    async fn set_text(&self, el: &ElementHandle, value: &str) -> Result<()> {
        self.post(&format!("/element/{}/clear", el.raw()), json!({}))
            .await?;
        self.post(
            &format!("/element/{}/value", el.raw()),
            json!({ "text": value }),
        )
        .await?;
        Ok(())
    }

    async fn option_labels(&self, el: &ElementHandle) -> Result<Vec<String>> {
        let mut labels = Vec::new();
        for option in self.option_handles(el).await? {
            let value = self.get(&format!("/element/{}/text", option.raw())).await?;
            labels.push(value.as_str().unwrap_or_default().to_string());
        }
        Ok(labels)
    }

    async fn select_option(&self, el: &ElementHandle, index: usize) -> Result<()> {
        let options = self.option_handles(el).await?;
        let option = options.get(index).ok_or_else(|| {
            DriverError::NoSuchElement(format!("select has no option at index {}", index))
        })?;
        self.click(option).await
    }

    async fn is_checked(&self, el: &ElementHandle) -> Result<bool> {
        let value = self.get(&format!("/element/{}/selected", el.raw())).await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    async fn set_checked(&self, el: &ElementHandle, want: bool) -> Result<()> {
        if self.is_checked(el).await? != want {
            self.click(el).await?;
        }
        Ok(())
    }

    async fn screenshot(&self, path: &Path) -> Result<()> {
        let value = self.get("/screenshot").await?;
        let encoded = value.as_str().unwrap_or_default();
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| DriverError::Session(format!("bad screenshot payload: {}", e)))?;
        std::fs::write(path, bytes)?;
        info!("Screenshot saved to {}", path.display());
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        // Tolerate double-close and partially initialized sessions.
        let Some(session_id) = self.session_id.take() else {
            return Ok(());
        };

        let result = self
            .client
            .delete(format!("{}/session/{}", self.base, session_id))
            .send()
            .await;

        match result {
            Ok(_) => info!("WebDriver session {} closed", session_id),
            Err(e) => warn!("Error closing session {}: {}", session_id, e),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mock_session(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/session"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "value": { "sessionId": "abc123", "capabilities": {} }
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_connect_creates_session() {
        let server = MockServer::start().await;
        mock_session(&server).await;

        let backend = WebDriverBackend::connect(&server.uri(), true).await.unwrap();
        assert_eq!(backend.session_id.as_deref(), Some("abc123"));
    }

    #[tokio::test]
    async fn test_connect_failure_propagates() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/session"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "value": { "error": "session not created", "message": "no chrome binary" }
            })))
            .mount(&server)
            .await;

        let result = WebDriverBackend::connect(&server.uri(), true).await;
        assert!(matches!(result, Err(DriverError::Wire { .. })));
    }

    #[tokio::test]
    async fn test_query_missing_element_is_none() {
        let server = MockServer::start().await;
        mock_session(&server).await;
        Mock::given(method("POST"))
            .and(path("/session/abc123/element"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "value": { "error": "no such element", "message": "not found" }
            })))
            .mount(&server)
            .await;

        let backend = WebDriverBackend::connect(&server.uri(), true).await.unwrap();
        let found = backend.query("input[name='missing']").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_query_invalid_selector_is_error() {
        let server = MockServer::start().await;
        mock_session(&server).await;
        Mock::given(method("POST"))
            .and(path("/session/abc123/element"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "value": { "error": "invalid selector", "message": "could not parse" }
            })))
            .mount(&server)
            .await;

        let backend = WebDriverBackend::connect(&server.uri(), true).await.unwrap();
        let result = backend.query("input[[[").await;
        assert!(matches!(result, Err(DriverError::InvalidSelector(_))));
    }

    #[tokio::test]
    async fn test_query_found_element() {
        let server = MockServer::start().await;
        mock_session(&server).await;
        Mock::given(method("POST"))
            .and(path("/session/abc123/element"))
            .and(body_partial_json(json!({ "using": "css selector" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "value": { ELEMENT_KEY: "el-7" }
            })))
            .mount(&server)
            .await;

        let backend = WebDriverBackend::connect(&server.uri(), true).await.unwrap();
        let found = backend.query("input[name='email']").await.unwrap();
        assert_eq!(found, Some(ElementHandle::new("el-7")));
    }

    #[tokio::test]
    async fn test_set_checked_skips_click_when_state_matches() {
        let server = MockServer::start().await;
        mock_session(&server).await;
        Mock::given(method("GET"))
            .and(path("/session/abc123/element/el-1/selected"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": true })))
            .mount(&server)
            .await;
        // Click must never fire when the checkbox is already in the wanted state.
        Mock::given(method("POST"))
            .and(path("/session/abc123/element/el-1/click"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": null })))
            .expect(0)
            .mount(&server)
            .await;

        let backend = WebDriverBackend::connect(&server.uri(), true).await.unwrap();
        let el = ElementHandle::new("el-1");
        backend.set_checked(&el, true).await.unwrap();
        backend.set_checked(&el, true).await.unwrap();
    }

    #[tokio::test]
    async fn test_close_is_idempotent() {
        let server = MockServer::start().await;
        mock_session(&server).await;
        Mock::given(method("DELETE"))
            .and(path("/session/abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": null })))
            .expect(1)
            .mount(&server)
            .await;

        let mut backend = WebDriverBackend::connect(&server.uri(), true).await.unwrap();
        backend.close().await.unwrap();
        backend.close().await.unwrap();
    }

    #[test]
    fn test_unwrap_value_maps_wire_errors() {
        let err = unwrap_value(
            400,
            json!({ "value": { "error": "stale element reference", "message": "gone" } }),
        )
        .unwrap_err();
        assert!(matches!(err, DriverError::Wire { .. }));
    }
}
