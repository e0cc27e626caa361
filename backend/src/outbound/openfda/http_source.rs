//! Reqwest-backed openFDA NDC adapter.
//!
//! This adapter owns transport details only: query parameters, the result
//! window ceiling, timeout and status mapping, and JSON decoding into
//! domain medications.

use std::time::Duration;

use async_trait::async_trait;
use pagination::ResultWindow;
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, warn};

use super::dto::NdcResponseDto;
use super::query::{build_identifier_search, build_search};
use crate::domain::ports::{MedicationRepository, MedicationRepositoryError, MedicationSlice};
use crate::domain::{Medication, MedicationFilter};

/// Deepest record openFDA will serve for any query (`skip + limit`).
pub const MAX_RESULT_WINDOW: u64 = 5000;

const NDC_PATH: &str = "drug/ndc.json";

/// Medication repository that performs HTTP GET requests against openFDA.
#[derive(Clone)]
pub struct OpenFdaMedicationRepository {
    client: Client,
    endpoint: Url,
    api_key: Option<String>,
    window: ResultWindow,
}

impl OpenFdaMedicationRepository {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// `base_url` is the API root, for example `https://api.fda.gov/`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed or the
    /// NDC path cannot be joined onto `base_url`.
    pub fn new(
        base_url: &Url,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, OpenFdaSetupError> {
        let client = Client::builder().timeout(timeout).build()?;
        Self::with_client(client, base_url, api_key)
    }

    /// Build an adapter around an existing client.
    ///
    /// # Errors
    ///
    /// Returns an error when the NDC path cannot be joined onto `base_url`.
    pub fn with_client(
        client: Client,
        base_url: &Url,
        api_key: Option<String>,
    ) -> Result<Self, OpenFdaSetupError> {
        let mut base = base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base.join(NDC_PATH)?;
        Ok(Self {
            client,
            endpoint,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            window: ResultWindow::new(MAX_RESULT_WINDOW),
        })
    }

    async fn fetch(
        &self,
        search: &str,
        limit: u32,
        skip: u64,
    ) -> Result<FetchOutcome, MedicationRepositoryError> {
        let mut request = self.client.get(self.endpoint.clone());
        if let Some(api_key) = &self.api_key {
            request = request.query(&[("api_key", api_key.as_str())]);
        }
        let limit = limit.to_string();
        let skip = skip.to_string();
        debug!(search, limit = %limit, skip = %skip, "querying openFDA");
        let response = request
            .query(&[
                ("search", search),
                ("limit", limit.as_str()),
                ("skip", skip.as_str()),
            ])
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if status.is_success() {
            return parse_response(body.as_ref()).map(FetchOutcome::Found);
        }
        if status == StatusCode::NOT_FOUND {
            debug!(search, "openFDA reported no matches");
            return Ok(FetchOutcome::NoMatches);
        }
        warn!(status = status.as_u16(), search, "openFDA request failed");
        if status.is_client_error() {
            return Ok(FetchOutcome::Rejected);
        }
        Err(map_status_error(status, body.as_ref()))
    }
}

/// Errors raised while constructing [`OpenFdaMedicationRepository`].
#[derive(Debug, thiserror::Error)]
pub enum OpenFdaSetupError {
    /// The HTTP client could not be built.
    #[error("failed to build openFDA client: {0}")]
    Client(#[from] reqwest::Error),
    /// The base URL cannot carry the NDC path.
    #[error("invalid openFDA base URL: {0}")]
    BaseUrl(#[from] url::ParseError),
}

enum FetchOutcome {
    Found(NdcResponseDto),
    NoMatches,
    Rejected,
}

#[async_trait]
impl MedicationRepository for OpenFdaMedicationRepository {
    async fn find_medications(
        &self,
        filter: &MedicationFilter,
    ) -> Result<MedicationSlice, MedicationRepositoryError> {
        let page = filter.page();
        if !self.window.admits(&page) {
            debug!(
                page = page.page(),
                limit = page.limit(),
                max_pages = self.window.max_pages(page.limit()),
                "page beyond openFDA result window"
            );
            return Ok(MedicationSlice {
                medications: Vec::new(),
                total: self.window.max_records(),
            });
        }

        let search = build_search(filter);
        match self.fetch(&search, page.limit(), page.offset()).await? {
            FetchOutcome::Found(decoded) => {
                let total = self.window.cap(decoded.meta.results.total);
                let medications = decoded
                    .into_medications()
                    .map_err(MedicationRepositoryError::response_validation)?;
                Ok(MedicationSlice { medications, total })
            }
            FetchOutcome::NoMatches => Ok(MedicationSlice::default()),
            FetchOutcome::Rejected => Ok(MedicationSlice {
                medications: Vec::new(),
                total: self.window.max_records(),
            }),
        }
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Medication>, MedicationRepositoryError> {
        let search = build_identifier_search(id);
        match self.fetch(&search, 1, 0).await? {
            FetchOutcome::Found(decoded) => Ok(decoded
                .into_medications()
                .map_err(MedicationRepositoryError::response_validation)?
                .into_iter()
                .next()),
            FetchOutcome::NoMatches => Ok(None),
            FetchOutcome::Rejected => Err(MedicationRepositoryError::upstream(
                StatusCode::BAD_REQUEST.as_u16(),
                format!("openFDA rejected lookup for {}", id.trim()),
            )),
        }
    }
}

fn parse_response(body: &[u8]) -> Result<NdcResponseDto, MedicationRepositoryError> {
    serde_json::from_slice(body).map_err(|error| {
        MedicationRepositoryError::response_validation(format!(
            "invalid openFDA JSON payload: {error}"
        ))
    })
}

fn map_transport_error(error: reqwest::Error) -> MedicationRepositoryError {
    if error.is_timeout() {
        MedicationRepositoryError::timeout(error.to_string())
    } else {
        MedicationRepositoryError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> MedicationRepositoryError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_owned()
    } else {
        preview
    };
    MedicationRepositoryError::upstream(status.as_u16(), message)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
#[path = "http_source_tests.rs"]
mod tests;
