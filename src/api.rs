use async_trait::async_trait;
use uuid::Uuid;

use crate::entities::{NewPlace, Place, PlaceChanges, PlaceFilter, PlaceLinkage, PlaceSummary};
use crate::error::Error;

#[async_trait]
pub trait PlaceQueryAPI {
    /// Never fails on store errors: a failed query is logged and served as an
    /// empty result set.
    async fn list_places(&self, filter: PlaceFilter) -> Result<Vec<PlaceSummary>, Error>;

    async fn find_place(&self, id: Uuid) -> Result<Option<Place>, Error>;

    async fn find_linkages(&self, id: Uuid) -> Result<Vec<PlaceLinkage>, Error>;
}

#[async_trait]
pub trait PlaceCommandAPI {
    /// Persistence failures propagate to the caller, unlike reads.
    async fn create_place(&self, input: NewPlace) -> Result<Place, Error>;

    async fn update_place(&self, id: Uuid, changes: PlaceChanges) -> Result<Place, Error>;
}

pub trait API: PlaceQueryAPI + PlaceCommandAPI {}
