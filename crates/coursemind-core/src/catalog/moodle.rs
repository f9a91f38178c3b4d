//! Moodle web service catalog provider.

use super::{parse_catalog_response, CatalogCourse, CatalogProvider};
use crate::config::{MOODLE_GET_COURSES_FUNCTION, MOODLE_RESPONSE_FORMAT, MOODLE_REST_PATH};
use crate::error::CatalogError;
use std::fmt;
use std::time::Duration;
use tracing::{error, info, instrument};

/// Connection settings for a Moodle site.
#[derive(Clone)]
pub struct MoodleConfig {
    /// Site root, e.g. `https://school.moodlecloud.com`
    pub base_url: String,
    /// Web service token
    pub token: String,
    /// Request timeout; None waits indefinitely
    pub timeout: Option<Duration>,
}

// Token is redacted
impl fmt::Debug for MoodleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MoodleConfig")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Catalog provider backed by `core_course_get_courses`.
#[derive(Debug, Clone)]
pub struct MoodleCatalog {
    client: reqwest::Client,
    config: MoodleConfig,
}

impl MoodleCatalog {
    /// Creates a provider. No request is made until
    /// [`fetch_all_courses`](CatalogProvider::fetch_all_courses).
    pub fn new(config: MoodleConfig) -> Result<Self, CatalogError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| CatalogError::Other(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    async fn request_courses(&self) -> Result<serde_json::Value, reqwest::Error> {
        self.client
            .get(self.endpoint())
            .query(&[
                ("wstoken", self.config.token.as_str()),
                ("wsfunction", MOODLE_GET_COURSES_FUNCTION),
                ("moodlewsrestformat", MOODLE_RESPONSE_FORMAT),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    /// Full REST endpoint URL.
    pub fn endpoint(&self) -> String {
        format!(
            "{}{}",
            self.config.base_url.trim_end_matches('/'),
            MOODLE_REST_PATH
        )
    }
}

/// Maps a transport failure to its catalog error category.
fn classify(err: reqwest::Error) -> CatalogError {
    let message = err.to_string();
    if err.is_timeout() {
        CatalogError::Timeout(message)
    } else if err.is_connect() {
        CatalogError::Connection(message)
    } else if err.is_status() {
        CatalogError::Http(message)
    } else {
        CatalogError::Other(message)
    }
}

#[async_trait::async_trait]
impl CatalogProvider for MoodleCatalog {
    #[instrument(skip(self), fields(site = %self.config.base_url))]
    async fn fetch_all_courses(&self) -> Result<Vec<CatalogCourse>, CatalogError> {
        info!("Connecting to Moodle API");

        let result = self.request_courses().await;

        match result {
            Ok(body) => parse_catalog_response(body),
            Err(e) => {
                let err = classify(e);
                error!(error = %err, "Failed to fetch Moodle courses");
                Err(err)
            }
        }
    }
}
