use std::path::Path;

use reqwest::{header, Client, Response};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{ProbeError, ProbeResult};
use crate::models::{
    ApiErrorBody, Credentials, InventoryItem, InventoryRecord, LoginRequest, LoginResponse,
};
use crate::probe::{Probe, ProbeOutcome, INVENTORY_PATH};

pub const REGISTER_PATH: &str = "/api/auth/register";
pub const LOGIN_PATH: &str = "/api/auth/login";

/// Credentials file contents: the parsed login pair plus the raw document,
/// which registration submits unchanged.
#[derive(Debug, Clone)]
pub struct CredentialsFile {
    pub raw: Value,
    pub credentials: Credentials,
}

pub fn load_credentials(path: &Path) -> ProbeResult<CredentialsFile> {
    let text = std::fs::read_to_string(path).map_err(|source| ProbeError::Credentials {
        path: path.to_path_buf(),
        source,
    })?;
    let raw: Value = serde_json::from_str(&text).map_err(ProbeError::InvalidCredentials)?;
    let credentials =
        serde_json::from_value(raw.clone()).map_err(ProbeError::InvalidCredentials)?;
    Ok(CredentialsFile { raw, credentials })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct Session {
    /// `name=value` pairs from the login response's `Set-Cookie` headers.
    pub cookie: Option<String>,
    pub profile: LoginResponse,
}

#[derive(Debug, Clone)]
pub enum LoginOutcome {
    Accepted { status: u16, session: Session },
    Rejected { status: u16, message: String },
}

impl LoginOutcome {
    /// The established session, or `None` when the server refused the login.
    pub fn session(&self) -> Option<&Session> {
        match self {
            LoginOutcome::Accepted { session, .. } => Some(session),
            LoginOutcome::Rejected { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryListing {
    Listed { status: u16, count: usize },
    Refused { status: u16, body: String },
}

/// Drives the authenticated flows: register, log in, list and submit
/// inventory under a session cookie.
#[derive(Debug, Clone)]
pub struct SessionClient {
    client: Client,
    config: Config,
}

impl SessionClient {
    pub fn new(config: &Config) -> ProbeResult<Self> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    pub async fn register(&self, file: &CredentialsFile) -> ProbeResult<RawResponse> {
        debug!(username = %file.credentials.username, "Registering account");
        let response = self
            .client
            .post(self.config.endpoint(REGISTER_PATH))
            .json(&file.raw)
            .send()
            .await?;
        read_raw(response).await
    }

    pub async fn login(&self, credentials: &Credentials) -> ProbeResult<LoginOutcome> {
        debug!(username = %credentials.username, "Logging in");
        let response = self
            .client
            .post(self.config.endpoint(LOGIN_PATH))
            .json(&LoginRequest::from(credentials))
            .send()
            .await?;

        let status = response.status().as_u16();
        let cookie = session_cookie(response.headers());
        let body = response.text().await?;

        if status != 200 {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Ok(LoginOutcome::Rejected { status, message });
        }

        if cookie.is_none() {
            warn!("Login succeeded but no session cookie was set");
        }
        let profile: LoginResponse = serde_json::from_str(&body)?;
        Ok(LoginOutcome::Accepted {
            status,
            session: Session { cookie, profile },
        })
    }

    pub async fn list_inventory(&self, session: &Session) -> ProbeResult<InventoryListing> {
        let mut request = self.client.get(self.config.endpoint(INVENTORY_PATH));
        if let Some(cookie) = &session.cookie {
            request = request.header(header::COOKIE, cookie);
        }

        let RawResponse { status, body } = read_raw(request.send().await?).await?;
        if status != 200 {
            return Ok(InventoryListing::Refused { status, body });
        }

        let items: Vec<InventoryItem> = serde_json::from_str(&body)?;
        debug!(count = items.len(), "Listed inventory");
        Ok(InventoryListing::Listed {
            status,
            count: items.len(),
        })
    }

    pub async fn submit(
        &self,
        session: &Session,
        record: &InventoryRecord,
    ) -> ProbeResult<ProbeOutcome> {
        Probe::with_client(self.client.clone(), &self.config)
            .submit_with_cookie(record, session.cookie.as_deref())
            .await
    }
}

async fn read_raw(response: Response) -> ProbeResult<RawResponse> {
    let status = response.status().as_u16();
    let body = response.text().await?;
    Ok(RawResponse { status, body })
}

/// Collapses every `Set-Cookie` header into a single `Cookie` header value,
/// dropping attributes such as `Path` or `HttpOnly`.
fn session_cookie(headers: &header::HeaderMap) -> Option<String> {
    let pairs: Vec<&str> = headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .collect();

    if pairs.is_empty() {
        None
    } else {
        Some(pairs.join("; "))
    }
}
