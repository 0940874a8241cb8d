// Hand-crafted async HTTP client for the myUplink REST API v2.
//
// Base path: /v2/
// Auth: OAuth2 bearer token (client-credentials grant or pre-acquired)

use std::collections::HashMap;

use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::Error;
use crate::auth::{Credentials, TokenProvider};
use crate::transport::TransportConfig;
use crate::types::{DeviceDetails, DevicePointResponse, SystemSummary, SystemsPage};

/// Systems page size used by [`MyUplinkClient::list_all_systems`].
const SYSTEMS_PAGE_SIZE: u32 = 100;

// ── Error response shape from the myUplink API ───────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    details: Option<Vec<String>>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the myUplink cloud API.
///
/// Acquires bearer tokens through its [`TokenProvider`] and communicates
/// via JSON REST endpoints under `/v2/`.
pub struct MyUplinkClient {
    http: reqwest::Client,
    base_url: Url,
    tokens: TokenProvider,
}

impl MyUplinkClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from credentials and transport config.
    pub fn new(
        base_url: &str,
        credentials: Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http, credentials)
    }

    /// Wrap an existing `reqwest::Client` (used by tests and callers
    /// that tune their own transport).
    pub fn from_reqwest(
        base_url: &str,
        http: reqwest::Client,
        credentials: Credentials,
    ) -> Result<Self, Error> {
        let base_url = normalize_base_url(base_url)?;
        let tokens = TokenProvider::new(http.clone(), &base_url, credentials)?;
        Ok(Self {
            http,
            base_url,
            tokens,
        })
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"v2/systems/me"`) onto the base URL.
    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        let token = self.tokens.bearer().await?;
        debug!("GET {url}");

        let resp = self
            .http
            .get(url)
            .bearer_auth(token.expose_secret())
            .send()
            .await?;
        handle_response(resp).await
    }

    async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        let token = self.tokens.bearer().await?;
        debug!("GET {url} params={params:?}");

        let resp = self
            .http
            .get(url)
            .bearer_auth(token.expose_secret())
            .query(params)
            .send()
            .await?;
        handle_response(resp).await
    }

    async fn patch_no_response<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), Error> {
        let url = self.url(path)?;
        let token = self.tokens.bearer().await?;
        debug!("PATCH {url}");

        let resp = self
            .http
            .patch(url)
            .bearer_auth(token.expose_secret())
            .json(body)
            .send()
            .await?;
        handle_empty(resp).await
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    // ── Systems ──────────────────────────────────────────────────────

    /// Fetch one page of the caller's systems.
    pub async fn list_systems(&self, page: u32, items_per_page: u32) -> Result<SystemsPage, Error> {
        self.get_with_params(
            "v2/systems/me",
            &[
                ("page", page.to_string()),
                ("itemsPerPage", items_per_page.to_string()),
            ],
        )
        .await
    }

    /// Walk all systems pages and collect them into a single list.
    pub async fn list_all_systems(&self) -> Result<Vec<SystemSummary>, Error> {
        let mut all = Vec::new();
        let mut page = 1;

        loop {
            let chunk = self.list_systems(page, SYSTEMS_PAGE_SIZE).await?;
            let received = u64::try_from(chunk.systems.len()).unwrap_or(u64::MAX);
            all.extend(chunk.systems);

            if received == 0
                || received < u64::from(SYSTEMS_PAGE_SIZE)
                || u64::try_from(all.len()).unwrap_or(u64::MAX) >= chunk.num_items
            {
                break;
            }
            page += 1;
        }

        Ok(all)
    }

    // ── Devices ──────────────────────────────────────────────────────

    pub async fn get_device(&self, device_id: &str) -> Result<DeviceDetails, Error> {
        self.get(&format!("v2/devices/{device_id}")).await
    }

    pub async fn list_device_points(
        &self,
        device_id: &str,
    ) -> Result<Vec<DevicePointResponse>, Error> {
        self.get(&format!("v2/devices/{device_id}/points")).await
    }

    /// Write one or more writable points on a device.
    ///
    /// The body is a map of parameter id to new value, exactly as the
    /// API expects: `{"47041": "1"}`.
    pub async fn patch_points(
        &self,
        device_id: &str,
        values: &HashMap<String, serde_json::Value>,
    ) -> Result<(), Error> {
        self.patch_no_response(&format!("v2/devices/{device_id}/points"), values)
            .await
    }
}

// ── Response handling ────────────────────────────────────────────────

fn normalize_base_url(raw: &str) -> Result<Url, Error> {
    let mut url = Url::parse(raw)?;
    // A trailing slash makes relative joins of "v2/…" behave.
    let path = url.path().trim_end_matches('/').to_owned();
    url.set_path(&format!("{path}/"));
    Ok(url)
}

async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let status = resp.status();
    if status.is_success() {
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            let preview = &body[..body.len().min(200)];
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    } else {
        Err(parse_error(status, resp).await)
    }
}

async fn handle_empty(resp: reqwest::Response) -> Result<(), Error> {
    let status = resp.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(parse_error(status, resp).await)
    }
}

async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
    let raw = resp.text().await.unwrap_or_default();

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Error::Authentication {
            message: if raw.is_empty() {
                status.to_string()
            } else {
                raw
            },
        };
    }

    let message = serde_json::from_str::<ErrorResponse>(&raw)
        .ok()
        .and_then(|err| {
            err.description
                .or_else(|| err.details.and_then(|d| d.into_iter().next()))
        })
        .unwrap_or_else(|| {
            if raw.is_empty() {
                status.to_string()
            } else {
                raw
            }
        });

    Error::Api {
        status: status.as_u16(),
        message,
    }
}
