//! Client for the plan generation exchange.
//!
//! The endpoint is an external collaborator; only its request/response
//! contract matters here: `POST { message }` answered by either
//! `{ response: Plan }` or `{ error }`. A reported error surfaces as
//! [`Error::GenerationError`] carrying the remote's message verbatim.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::model::Plan;
use crate::{Error, Result};

#[derive(Serialize)]
struct GenerateRequest<'a> {
    message: &'a str,
}

#[derive(Deserialize)]
struct GenerateReply {
    #[serde(default)]
    response: Option<Plan>,
    #[serde(default)]
    error: Option<String>,
}

/// Blocking client for the generation endpoint. The underlying HTTP client
/// carries the studio-wide timeout; there is no retry, the user re-triggers.
pub struct GenerateClient {
    client: Client,
    endpoint: String,
    timeout_ms: u64,
}

impl GenerateClient {
    pub fn new(client: Client, endpoint: impl Into<String>, timeout_ms: u64) -> Self {
        Self { client, endpoint: endpoint.into(), timeout_ms }
    }

    /// Run one generation exchange and return the produced plan.
    pub fn generate(&self, message: &str) -> Result<Plan> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&GenerateRequest { message })
            .send()
            .map_err(|e| self.map_transport_error(e))?;

        let reply: GenerateReply = response
            .json()
            .map_err(|e| Error::GenerationError(format!("malformed generation response: {}", e)))?;

        if let Some(error) = reply.error {
            return Err(Error::GenerationError(error));
        }
        reply
            .response
            .ok_or_else(|| Error::GenerationError("generation response was empty".into()))
    }

    fn map_transport_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::Timeout(self.timeout_ms)
        } else {
            Error::NetworkError(format!("generation exchange failed: {}", e))
        }
    }
}
