// OAuth2 token management for the myUplink cloud API.
//
// The API accepts bearer tokens from the client-credentials grant
// (POST /oauth/token). Tokens are cached in memory and re-acquired
// shortly before expiry; a pre-acquired token can be supplied instead
// for callers that manage their own OAuth session.

use std::time::{Duration, Instant};

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::debug;
use url::Url;

use crate::Error;

/// OAuth2 scopes requested with the client-credentials grant.
pub const OAUTH2_SCOPES: &str = "READSYSTEM WRITESYSTEM";

/// Refresh the cached token this long before its reported expiry.
const EXPIRY_SKEW: Duration = Duration::from_secs(30);

/// Credentials for authenticating with the myUplink cloud.
///
/// Each variant carries the secret material needed for its flow.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// Client-credentials grant. Create an application at
    /// <https://dev.myuplink.com> to obtain an id/secret pair.
    ClientCredentials {
        client_id: String,
        client_secret: SecretString,
    },

    /// A pre-acquired bearer token. The caller owns renewal; requests
    /// start failing with an auth error once it expires.
    AccessToken(SecretString),
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: u64,
}

struct CachedToken {
    bearer: SecretString,
    acquired_at: Instant,
    lifetime: Duration,
}

impl CachedToken {
    fn is_fresh(&self) -> bool {
        self.acquired_at.elapsed() + EXPIRY_SKEW < self.lifetime
    }
}

/// Acquires and caches bearer tokens for a single credential set.
///
/// Concurrent callers serialize on the internal cache: at most one
/// token request is in flight at a time.
pub(crate) struct TokenProvider {
    http: reqwest::Client,
    token_url: Url,
    credentials: Credentials,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenProvider {
    pub(crate) fn new(
        http: reqwest::Client,
        base_url: &Url,
        credentials: Credentials,
    ) -> Result<Self, Error> {
        let token_url = base_url.join("oauth/token")?;
        Ok(Self {
            http,
            token_url,
            credentials,
            cached: Mutex::new(None),
        })
    }

    /// Return a bearer token valid for at least [`EXPIRY_SKEW`] from now.
    pub(crate) async fn bearer(&self) -> Result<SecretString, Error> {
        let (client_id, client_secret) = match &self.credentials {
            Credentials::AccessToken(token) => return Ok(token.clone()),
            Credentials::ClientCredentials {
                client_id,
                client_secret,
            } => (client_id, client_secret),
        };

        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref() {
            if token.is_fresh() {
                return Ok(token.bearer.clone());
            }
        }

        debug!(token_url = %self.token_url, "requesting access token");
        let resp = self
            .http
            .post(self.token_url.clone())
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", client_id.as_str()),
                ("client_secret", client_secret.expose_secret()),
                ("scope", OAUTH2_SCOPES),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Authentication {
                message: if body.is_empty() {
                    format!("token endpoint returned {status}")
                } else {
                    format!("token endpoint returned {status}: {body}")
                },
            });
        }

        let token: TokenResponse = resp.json().await.map_err(|e| Error::Authentication {
            message: format!("malformed token response: {e}"),
        })?;

        let bearer = SecretString::from(token.access_token);
        *cached = Some(CachedToken {
            bearer: bearer.clone(),
            acquired_at: Instant::now(),
            lifetime: Duration::from_secs(token.expires_in.max(60)),
        });

        Ok(bearer)
    }
}
