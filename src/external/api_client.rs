use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::env;

use crate::{
    entities::{Coordinates, PlaceSummary},
    error::{invalid_input_error, upstream_error, Error},
    map::PlaceSource,
};

#[derive(Clone, Debug, Serialize, Deserialize)]
struct ListResponse {
    success: bool,
    places: Vec<PlaceSummary>,
}

/// HTTP client for the place API, the map display's place source.
#[derive(Clone, Debug)]
pub struct PlacesClient {
    api_base: String,
}

impl PlacesClient {
    pub fn new(api_base: String) -> Self {
        Self { api_base }
    }

    pub fn from_env() -> Result<Self, Error> {
        Ok(Self::new(env::var("PLACES_API_BASE")?))
    }
}

#[async_trait]
impl PlaceSource for PlacesClient {
    #[tracing::instrument(skip(self))]
    async fn places_near(
        &self,
        center: Coordinates,
        radius_km: f64,
    ) -> Result<Vec<PlaceSummary>, Error> {
        let url = format!("{}/place", self.api_base);

        let res = reqwest::Client::new()
            .get(url)
            .query(&[("lat", center.lat)])
            .query(&[("lng", center.lng)])
            .query(&[("r", radius_km)])
            .send()
            .await?;

        let status_code = res.status().as_u16();

        if status_code >= 400 && status_code < 500 {
            return Err(invalid_input_error());
        } else if status_code != 200 {
            return Err(upstream_error());
        }

        let data: ListResponse = res.json().await?;

        if !data.success {
            return Err(upstream_error());
        }

        Ok(data.places)
    }
}
