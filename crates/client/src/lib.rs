//! # MedFind Directory Client
//!
//! Read-only access to the medical center directory:
//!
//! - `GET /states` lists state names
//! - `GET /cities/{state}` lists the cities of one state
//! - `GET /data?state={state}&city={city}` lists the centers in one city
//!
//! Each call is a single request with the transport's default timeout. There
//! is no retry and no caching. Callers that must keep going on failure use
//! the `*_or_empty` helpers, which log the error and return an empty list.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use medfind_core::{
    errors::{FinderError, FinderResult},
    models::center::Center,
};

/// Public directory used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://meddata-backend.onrender.com";

#[async_trait]
pub trait DirectoryClient: Send + Sync {
    async fn list_states(&self) -> FinderResult<Vec<String>>;

    async fn list_cities(&self, state: &str) -> FinderResult<Vec<String>>;

    async fn list_centers(&self, state: &str, city: &str) -> FinderResult<Vec<Center>>;
}

/// [`DirectoryClient`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpDirectoryClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpDirectoryClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn states_url(&self) -> String {
        format!("{}/states", self.base_url)
    }

    pub fn cities_url(&self, state: &str) -> String {
        format!("{}/cities/{}", self.base_url, urlencoding::encode(state))
    }

    pub fn centers_url(&self, state: &str, city: &str) -> String {
        format!(
            "{}/data?state={}&city={}",
            self.base_url,
            urlencoding::encode(state),
            urlencoding::encode(city)
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> FinderResult<T> {
        debug!(url, "directory request");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| FinderError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FinderError::Network(format!("{} returned {}", url, status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FinderError::Network(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| FinderError::Parse(e.to_string()))
    }
}

impl Default for HttpDirectoryClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl DirectoryClient for HttpDirectoryClient {
    async fn list_states(&self) -> FinderResult<Vec<String>> {
        self.get_json(&self.states_url()).await
    }

    async fn list_cities(&self, state: &str) -> FinderResult<Vec<String>> {
        self.get_json(&self.cities_url(state)).await
    }

    async fn list_centers(&self, state: &str, city: &str) -> FinderResult<Vec<Center>> {
        self.get_json(&self.centers_url(state, city)).await
    }
}

pub async fn states_or_empty<C>(client: &C) -> Vec<String>
where
    C: DirectoryClient + ?Sized,
{
    match client.list_states().await {
        Ok(states) => states,
        Err(e) => {
            error!(error = %e, "Error fetching states");
            Vec::new()
        }
    }
}

pub async fn cities_or_empty<C>(client: &C, state: &str) -> Vec<String>
where
    C: DirectoryClient + ?Sized,
{
    match client.list_cities(state).await {
        Ok(cities) => cities,
        Err(e) => {
            error!(state, error = %e, "Error fetching cities");
            Vec::new()
        }
    }
}

pub async fn centers_or_empty<C>(client: &C, state: &str, city: &str) -> Vec<Center>
where
    C: DirectoryClient + ?Sized,
{
    match client.list_centers(state, city).await {
        Ok(centers) => centers,
        Err(e) => {
            error!(state, city, error = %e, "Error fetching medical centers");
            Vec::new()
        }
    }
}
