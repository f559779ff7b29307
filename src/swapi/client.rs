use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;

use super::fetch::{fetch_all_pages_with, FetchError, PageError};
use super::model::{Character, Page, Planet, Snapshot, Species};

/// HTTP access to the three SWAPI listings the search window needs.
#[derive(Clone)]
pub struct SwapiClient {
    client: Client,
    base_url: String,
}

impl SwapiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().connect_timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn listing_url(&self, resource: &str) -> String {
        format!("{}/{}/", self.base_url, resource)
    }

    async fn get_page<T: DeserializeOwned>(&self, url: String) -> Result<Page<T>, PageError> {
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PageError::Status(status.as_u16()));
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    pub async fn fetch_all_pages<T: DeserializeOwned>(
        &self,
        start_url: &str,
    ) -> Result<Vec<T>, FetchError> {
        fetch_all_pages_with(start_url, |url| self.get_page(url)).await
    }

    /// Fetches characters, planets and species concurrently. Resolves once all
    /// three listings are complete or as soon as one of them fails.
    pub async fn fetch_snapshot(&self) -> Result<Snapshot, FetchError> {
        let people_url = self.listing_url("people");
        let planets_url = self.listing_url("planets");
        let species_url = self.listing_url("species");

        let (characters, planets, species) = tokio::try_join!(
            self.fetch_all_pages::<Character>(&people_url),
            self.fetch_all_pages::<Planet>(&planets_url),
            self.fetch_all_pages::<Species>(&species_url),
        )?;

        log::info!(
            "Fetched {} characters, {} planets, {} species",
            characters.len(),
            planets.len(),
            species.len()
        );

        Ok(Snapshot {
            characters,
            planets,
            species,
        })
    }

    /// Runs [`fetch_snapshot`](Self::fetch_snapshot) to completion on a
    /// dedicated current-thread runtime. Meant for a background thread.
    pub fn fetch_snapshot_blocking(&self) -> Result<Snapshot, FetchError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(self.fetch_snapshot())
    }
}
