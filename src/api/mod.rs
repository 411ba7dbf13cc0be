// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Vault REST API
//!
//! [`VaultApi`] issues the raw HTTP calls. It does no validation and holds
//! no session; callers pass the [`User`] whose id goes into `x-user-id`.
//!
//! | Method | Path | Body |
//! |--------|------|------|
//! | POST | `/login` | [`LoginRequest`] |
//! | POST | `/register` | [`RegisterRequest`] |
//! | GET | `/getData` | - |
//! | POST | `/saveData` | [`CredentialRecord`] |
//! | PUT | `/data/{id}` | [`RecordDraft`] |
//! | DELETE | `/data/{id}` | - |

pub mod response;

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder};
use tracing::{debug, info, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::models::{
    Ack, CredentialRecord, GroupId, LoginRequest, LoginResponse, RecordDraft, RegisterRequest,
    RemoveOutcome, User,
};

pub use response::{Operation, RawResponse};

/// Header carrying the session's user id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Header carrying the optional registration CSRF token.
pub const CSRF_HEADER: &str = "X-CSRF-Token";

#[derive(Debug, Clone)]
pub struct VaultApi {
    base_url: Url,
    http: Client,
}

impl VaultApi {
    pub fn new(base_url: Url, timeout: Duration) -> ClientResult<Self> {
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Config(format!(
                "API base URL {base_url} cannot carry paths"
            )));
        }
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { base_url, http })
    }

    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        Self::new(config.api_base_url.clone(), config.request_timeout)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append `segments` to the base path, keeping any prefix such as `/api`.
    pub fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Config(format!("API base URL {} cannot carry paths", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `GET /getData`: every record of the user, in server order.
    pub async fn fetch_all(&self, user: &User) -> ClientResult<Vec<CredentialRecord>> {
        let url = self.endpoint(&["getData"])?;
        debug!(user_id = %user.user_id, "fetching records");

        let raw = send(self.http.get(url).header(USER_ID_HEADER, user.header_value())).await?;
        if !raw.is_success() {
            return Err(response::fetch_failure(raw.status));
        }
        let records: Vec<CredentialRecord> = serde_json::from_slice(&raw.body)?;
        debug!(count = records.len(), "records fetched");
        Ok(records)
    }

    /// `POST /saveData`: insert a record.
    pub async fn create(&self, user: &User, record: &CredentialRecord) -> ClientResult<Ack> {
        let url = self.endpoint(&["saveData"])?;
        debug!(group_id = %record.group_id, "saving record");

        let raw = send(
            self.http
                .post(url)
                .header(USER_ID_HEADER, user.header_value())
                .json(record),
        )
        .await?;
        let ack = response::normalize_write(&raw, Operation::Save)?;
        info!(group_id = %record.group_id, "record saved");
        Ok(ack)
    }

    /// `PUT /data/{id}`: replace username and domain, and the password when
    /// the draft carries one.
    pub async fn update(&self, user: &User, id: GroupId, draft: &RecordDraft) -> ClientResult<Ack> {
        let url = self.endpoint(&["data", &id.to_string()])?;
        debug!(group_id = %id, keeps_password = draft.keeps_password(), "updating record");

        let raw = send(
            self.http
                .put(url)
                .header(USER_ID_HEADER, user.header_value())
                .json(draft),
        )
        .await?;
        let ack = response::normalize_write(&raw, Operation::Update)?;
        info!(group_id = %id, "record updated");
        Ok(ack)
    }

    /// `DELETE /data/{id}`. A 404 comes back as [`RemoveOutcome::AlreadyAbsent`].
    pub async fn remove(&self, user: &User, id: GroupId) -> ClientResult<RemoveOutcome> {
        let url = self.endpoint(&["data", &id.to_string()])?;
        debug!(group_id = %id, "removing record");

        let raw = send(self.http.delete(url).header(USER_ID_HEADER, user.header_value())).await?;
        let outcome = response::normalize_remove(&raw)?;
        match outcome {
            RemoveOutcome::Deleted(_) => info!(group_id = %id, "record removed"),
            RemoveOutcome::AlreadyAbsent => {
                warn!(group_id = %id, "record not found on server, treating as removed")
            }
        }
        Ok(outcome)
    }

    /// `POST /login`: the user to persist as the session.
    pub async fn login(&self, request: &LoginRequest) -> ClientResult<User> {
        let url = self.endpoint(&["login"])?;
        debug!("submitting login");

        let raw = send(self.http.post(url).json(request)).await?;
        if !raw.is_success() {
            return Err(response::login_failure(&raw));
        }
        let body: LoginResponse = serde_json::from_slice(&raw.body)?;
        info!(user_id = %body.user.user_id, "login accepted");
        Ok(body.user)
    }

    /// `POST /register`. Any success body is accepted.
    pub async fn register(&self, request: &RegisterRequest, csrf_token: Option<&str>) -> ClientResult<()> {
        let url = self.endpoint(&["register"])?;
        debug!(with_csrf = csrf_token.is_some(), "submitting registration");

        let mut builder = self.http.post(url).json(request);
        if let Some(token) = csrf_token {
            builder = builder.header(CSRF_HEADER, token);
        }
        let raw = send(builder).await?;
        if !raw.is_success() {
            return Err(response::register_failure(&raw));
        }
        info!("registration accepted");
        Ok(())
    }
}

/// Send the request and read the whole response.
async fn send(builder: RequestBuilder) -> ClientResult<RawResponse> {
    let response = builder.send().await?;
    let status = response.status().as_u16();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let body = response.bytes().await?.to_vec();
    Ok(RawResponse {
        status,
        content_type,
        body,
    })
}
