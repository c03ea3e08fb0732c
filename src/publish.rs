//! Share publisher: send a capture to the share endpoint, then open a
//! pre-filled social-post composer with the returned link.
//!
//! Opening a new browsing context is a platform capability, so it sits
//! behind the [`ComposerLauncher`] trait; the pipeline guarantees the
//! launcher fires at most once per successful publish and never when the
//! exchange fails or omits the link.

use std::sync::Mutex;

use base64::Engine as Base64Engine;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::rendering::RasterImage;
use crate::{Error, Result};

/// Social-post composer endpoint the intent URL points at.
pub const COMPOSER_ENDPOINT: &str = "https://x.com/intent/tweet";

/// Escape set matching JavaScript's `encodeURIComponent`: everything but
/// alphanumerics and `- _ . ! ~ * ' ( )`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Serialize)]
struct ShareRequest<'a> {
    image: String,
    title: &'a str,
    summary: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ShareReply {
    #[serde(default)]
    share_url: Option<String>,
}

/// Result of a successful publish.
#[derive(Debug, Clone)]
pub struct ShareOutcome {
    /// Link issued by the share endpoint; owned remotely, never mutated.
    pub share_url: String,
    /// The composer intent URL that was opened.
    pub composer_url: Url,
}

/// Opens a composer intent URL in a new browsing context.
pub trait ComposerLauncher: Send + Sync {
    fn open(&self, url: &Url);
}

/// Default launcher: logs the intent URL instead of spawning a browser,
/// which is all a headless host can do.
pub struct LogComposer;

impl ComposerLauncher for LogComposer {
    fn open(&self, url: &Url) {
        log::info!("composer intent: {}", url);
    }
}

impl<T: ComposerLauncher + ?Sized> ComposerLauncher for std::sync::Arc<T> {
    fn open(&self, url: &Url) {
        (**self).open(url)
    }
}

/// Test double that records every opened URL.
#[derive(Default)]
pub struct RecordingComposer {
    opened: Mutex<Vec<String>>,
}

impl RecordingComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().map(|v| v.clone()).unwrap_or_default()
    }
}

impl ComposerLauncher for RecordingComposer {
    fn open(&self, url: &Url) {
        if let Ok(mut opened) = self.opened.lock() {
            opened.push(url.to_string());
        }
    }
}

/// Blocking publisher for the share exchange.
pub struct SharePublisher {
    client: Client,
    endpoint: String,
    timeout_ms: u64,
}

impl SharePublisher {
    pub fn new(client: Client, endpoint: impl Into<String>, timeout_ms: u64) -> Self {
        Self { client, endpoint: endpoint.into(), timeout_ms }
    }

    /// Send the capture plus plan metadata to the share endpoint; on success
    /// build the composer intent URL and open it through `launcher` exactly
    /// once. On any failure no composer is opened.
    pub fn publish(
        &self,
        raster: &RasterImage,
        title: &str,
        summary: &str,
        launcher: &dyn ComposerLauncher,
    ) -> Result<ShareOutcome> {
        let request = ShareRequest { image: encode_data_url(&raster.png_data), title, summary };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .map_err(|e| self.map_transport_error(e))?;

        let reply: ShareReply = response
            .json()
            .map_err(|e| Error::PublishError(format!("malformed share response: {}", e)))?;

        let share_url = match reply.share_url {
            Some(url) if !url.is_empty() => url,
            _ => return Err(Error::PublishError("share response carried no shareUrl".into())),
        };

        let composer_url = composer_intent_url(title, &share_url)?;
        launcher.open(&composer_url);
        Ok(ShareOutcome { share_url, composer_url })
    }

    fn map_transport_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::Timeout(self.timeout_ms)
        } else {
            Error::NetworkError(format!("share exchange failed: {}", e))
        }
    }
}

/// Encode PNG bytes as a transport-safe `data:` URL.
pub fn encode_data_url(png: &[u8]) -> String {
    let b64 = base64::engine::general_purpose::STANDARD.encode(png);
    format!("data:image/png;base64,{}", b64)
}

/// Build the pre-filled composer URL:
/// `https://x.com/intent/tweet?text=<enc>&url=<enc>`.
pub fn composer_intent_url(title: &str, share_url: &str) -> Result<Url> {
    let text = format!("Check out my 2026 Roadmap: {}", title);
    let raw = format!(
        "{}?text={}&url={}",
        COMPOSER_ENDPOINT,
        utf8_percent_encode(&text, URI_COMPONENT),
        utf8_percent_encode(share_url, URI_COMPONENT),
    );
    Url::parse(&raw).map_err(|e| Error::PublishError(format!("invalid composer URL: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_url_has_png_prefix() {
        let data_url = encode_data_url(b"\x89PNG\r\n\x1a\n");
        assert!(data_url.starts_with("data:image/png;base64,"));
        assert!(data_url.len() > "data:image/png;base64,".len());
    }

    #[test]
    fn composer_url_escapes_text_and_link() {
        let url = composer_intent_url("Dream Big", "https://example.com/s/abc").expect("url");
        let s = url.as_str();
        assert!(s.starts_with("https://x.com/intent/tweet?"));
        assert!(s.contains("text=Check%20out%20my%202026%20Roadmap%3A%20Dream%20Big"));
        assert!(s.contains("url=https%3A%2F%2Fexample.com%2Fs%2Fabc"));
    }

    #[test]
    fn composer_url_keeps_unreserved_marks() {
        let url = composer_intent_url("It's (almost) 2026!", "https://example.com/x").expect("url");
        assert!(url.as_str().contains("It's%20(almost)%202026!"));
    }

    #[test]
    fn recording_composer_counts_opens() {
        let composer = RecordingComposer::new();
        let url = Url::parse("https://x.com/intent/tweet?text=hi").expect("url");
        composer.open(&url);
        assert_eq!(composer.opened().len(), 1);
    }
}
