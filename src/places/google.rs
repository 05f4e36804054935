// Google Places web service client (blocking, one request per call)

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::debug;

use super::{parse_find_place, parse_nearby, LatLng, Place, PlaceLookup};
use crate::config::AppConfig;

pub const FIND_PLACE_URL: &str =
    "https://maps.googleapis.com/maps/api/place/findplacefromtext/json";
pub const NEARBY_SEARCH_URL: &str =
    "https://maps.googleapis.com/maps/api/place/nearbysearch/json";

const FIND_PLACE_FIELDS: &str = "place_id,name,formatted_address,types";

pub struct GooglePlacesClient {
    client: Client,
    api_key: String,
    find_place_url: String,
    nearby_url: String,
}

impl GooglePlacesClient {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(GooglePlacesClient {
            client,
            api_key: api_key.into(),
            find_place_url: FIND_PLACE_URL.to_string(),
            nearby_url: NEARBY_SEARCH_URL.to_string(),
        })
    }

    /// Client using the configured credential, endpoints and timeout
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let mut client = Self::new(config.api_key()?, Duration::from_secs(config.timeout_secs))?;
        if let Some(url) = &config.places_endpoint {
            client.find_place_url = url.clone();
        }
        if let Some(url) = &config.nearby_endpoint {
            client.nearby_url = url.clone();
        }
        Ok(client)
    }

    fn get(&self, url: &str, params: &[(&str, &str)]) -> Result<String> {
        let response = self
            .client
            .get(url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .with_context(|| format!("Request to {} failed", url))?
            .error_for_status()
            .context("Place lookup returned an error status")?;

        response.text().context("Failed to read place lookup response")
    }
}

impl PlaceLookup for GooglePlacesClient {
    fn find_place(&self, query: &str) -> Result<Option<Place>> {
        debug!(query, "find place from text");

        let body = self.get(
            &self.find_place_url,
            &[
                ("input", query),
                ("inputtype", "textquery"),
                ("fields", FIND_PLACE_FIELDS),
            ],
        )?;

        parse_find_place(&body)
    }

    fn nearby(&self, location: LatLng, radius_m: u32) -> Result<Vec<Place>> {
        debug!(lat = location.lat, lng = location.lng, radius_m, "nearby search");

        let location = format!("{},{}", location.lat, location.lng);
        let radius = radius_m.to_string();
        let body = self.get(
            &self.nearby_url,
            &[("location", location.as_str()), ("radius", radius.as_str())],
        )?;

        parse_nearby(&body)
    }
}
