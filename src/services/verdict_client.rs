use crate::domain::constants::API_KEY_HEADER;
use crate::domain::errors::EnrichError;
use crate::domain::models::VerdictRecord;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;

/// Looks up the verdict for one hash.
pub trait VerdictLookup {
    fn fetch(&self, hash: &str) -> Result<VerdictRecord, EnrichError>;
}

/// VirusTotal v3 `files/{hash}` lookups over one reused HTTP session.
pub struct VirusTotalClient {
    http: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct ObjectEnvelope {
    data: VerdictRecord,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    code: String,
    #[serde(default)]
    message: String,
}

impl VirusTotalClient {
    pub fn new(api_key: &str, base_url: &str, timeout: Duration) -> Result<Self, EnrichError> {
        let mut key = HeaderValue::from_str(api_key)
            .map_err(|_| EnrichError::Config("api key is not a valid header value".to_string()))?;
        key.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key);

        let http = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .user_agent(concat!("hashscope/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| EnrichError::Config(format!("http client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn object_url(&self, hash: &str) -> String {
        format!("{}/files/{}", self.base_url, hash)
    }
}

impl VerdictLookup for VirusTotalClient {
    fn fetch(&self, hash: &str) -> Result<VerdictRecord, EnrichError> {
        let resp = self
            .http
            .get(self.object_url(hash))
            .send()
            .map_err(send_error)?;
        let status = resp.status();
        let body = resp
            .text()
            .map_err(|e| EnrichError::Transport(e.to_string()))?;
        if !status.is_success() {
            return Err(api_error(status, &body));
        }
        decode_object(&body)
    }
}

fn send_error(e: reqwest::Error) -> EnrichError {
    if e.is_builder() {
        EnrichError::Unexpected(format!("cannot build request: {e}"))
    } else {
        EnrichError::Transport(e.to_string())
    }
}

fn api_error(status: StatusCode, body: &str) -> EnrichError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(env) => EnrichError::RemoteApi {
            code: env.error.code,
            message: env.error.message,
        },
        Err(_) => EnrichError::RemoteApi {
            code: status.to_string(),
            message: body.trim().chars().take(200).collect(),
        },
    }
}

fn decode_object(body: &str) -> Result<VerdictRecord, EnrichError> {
    serde_json::from_str::<ObjectEnvelope>(body)
        .map(|env| env.data)
        .map_err(|e| EnrichError::Unexpected(format!("undecodable lookup response: {e}")))
}
