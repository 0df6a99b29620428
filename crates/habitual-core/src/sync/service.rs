//! Persistence service contract and its HTTP client.

use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;
use url::Url;

use crate::storage::ServiceConfig;
use crate::sync::types::{
    CreateHabitRequest, DeleteHabitRequest, HabitsResponse, RenameHabitRequest, SyncError,
};

pub const FETCH_PATH: &str = "habits";
pub const CREATE_PATH: &str = "habits/create";
pub const RENAME_PATH: &str = "habits/rename";
pub const DELETE_PATH: &str = "habits/delete";

/// Remote store of a user's habits.
///
/// Every call returns the service's full habit collection (or a body
/// without one). Transport and status failures are errors; a body
/// without `habits` is not.
#[async_trait]
pub trait HabitService: Send + Sync {
    /// `GET /habits`
    async fn fetch_habits(&self) -> Result<HabitsResponse, SyncError>;

    /// `POST /habits/create`
    async fn create_habit(&self, request: &CreateHabitRequest)
        -> Result<HabitsResponse, SyncError>;

    /// `POST /habits/rename`
    async fn rename_habit(&self, request: &RenameHabitRequest)
        -> Result<HabitsResponse, SyncError>;

    /// `POST /habits/delete`
    async fn delete_habit(&self, request: &DeleteHabitRequest)
        -> Result<HabitsResponse, SyncError>;
}

/// JSON-over-HTTP implementation of [`HabitService`].
pub struct HttpHabitService {
    base_url: Url,
    http_client: Client,
}

impl HttpHabitService {
    /// Create a client rooted at `base_url` with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SyncError> {
        let base_url = parse_base_url(base_url)?;
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url,
            http_client,
        })
    }

    /// Create a client from the `[service]` config section.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, SyncError> {
        Self::new(&config.base_url, config.timeout())
    }

    fn endpoint(&self, path: &str) -> Result<Url, SyncError> {
        self.base_url
            .join(path)
            .map_err(|e| SyncError::InvalidUrl(format!("{}{path}: {e}", self.base_url)))
    }

    async fn post<B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<HabitsResponse, SyncError> {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, "POST");
        let resp = self.http_client.post(url).json(body).send().await?;
        read_habits_response(path, resp).await
    }
}

#[async_trait]
impl HabitService for HttpHabitService {
    async fn fetch_habits(&self) -> Result<HabitsResponse, SyncError> {
        let url = self.endpoint(FETCH_PATH)?;
        tracing::debug!(%url, "GET");
        let resp = self.http_client.get(url).send().await?;
        read_habits_response(FETCH_PATH, resp).await
    }

    async fn create_habit(
        &self,
        request: &CreateHabitRequest,
    ) -> Result<HabitsResponse, SyncError> {
        self.post(CREATE_PATH, request).await
    }

    async fn rename_habit(
        &self,
        request: &RenameHabitRequest,
    ) -> Result<HabitsResponse, SyncError> {
        self.post(RENAME_PATH, request).await
    }

    async fn delete_habit(
        &self,
        request: &DeleteHabitRequest,
    ) -> Result<HabitsResponse, SyncError> {
        self.post(DELETE_PATH, request).await
    }
}

/// Parse a base URL, forcing a trailing slash so relative joins keep its path.
pub fn parse_base_url(raw: &str) -> Result<Url, SyncError> {
    let mut url = Url::parse(raw).map_err(|e| SyncError::InvalidUrl(format!("{raw}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(SyncError::InvalidUrl(format!(
            "{raw}: unsupported scheme '{}'",
            url.scheme()
        )));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

async fn read_habits_response(path: &str, resp: Response) -> Result<HabitsResponse, SyncError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(SyncError::Status {
            endpoint: format!("/{path}"),
            status: status.as_u16(),
        });
    }

    let body = resp.text().await?;
    if body.trim().is_empty() {
        tracing::warn!(endpoint = path, "empty response body");
        return Ok(HabitsResponse::empty());
    }

    match serde_json::from_str::<HabitsResponse>(&body) {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            tracing::warn!(endpoint = path, error = %e, "malformed response body");
            Ok(HabitsResponse::empty())
        }
    }
}
