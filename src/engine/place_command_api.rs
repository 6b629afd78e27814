use super::Engine;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    api::PlaceCommandAPI,
    db::PlaceStore,
    entities::{NewPlace, Place, PlaceChanges},
    error::{unimplemented_error, Error},
};

#[async_trait]
impl<S: PlaceStore> PlaceCommandAPI for Engine<S> {
    #[tracing::instrument(skip(self, input))]
    async fn create_place(&self, input: NewPlace) -> Result<Place, Error> {
        let place = Place::new(input);

        self.store.insert_place(&place).await?;

        Ok(place)
    }

    #[tracing::instrument(skip(self, _changes))]
    async fn update_place(&self, _id: Uuid, _changes: PlaceChanges) -> Result<Place, Error> {
        Err(unimplemented_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::PlaceQueryAPI;
    use crate::db::memory::MemoryStore;
    use crate::entities::{Coordinates, LocalizedText, Provider};
    use tokio_test::{assert_err, assert_ok};

    fn manual_place(provider_id: Option<&str>) -> NewPlace {
        NewPlace {
            name: Some(LocalizedText::zh_hk("新增地點")),
            description: None,
            location: Coordinates::new(22.2783, 114.1747),
            address: None,
            provider: Provider::Manual,
            provider_id: provider_id.map(Into::into),
            year_from: None,
            year_to: None,
        }
    }

    #[tokio::test]
    async fn created_place_is_readable_back() {
        let engine = Engine::new(MemoryStore::new());

        let created = assert_ok!(engine.create_place(manual_place(None)).await);
        let found = engine.find_place(created.id).await.unwrap();

        assert_eq!(found.unwrap().id, created.id);
    }

    #[tokio::test]
    async fn manual_provider_id_overrides_request_body() {
        let engine = Engine::new(MemoryStore::new());

        let created = assert_ok!(engine.create_place(manual_place(Some("supplied"))).await);

        assert_ne!(created.provider_id, "supplied");
    }

    #[tokio::test]
    async fn store_failure_propagates() {
        let engine = Engine::new(MemoryStore::failing());

        let result = engine.create_place(manual_place(None)).await;

        assert_err!(result);
    }

    #[tokio::test]
    async fn update_is_rejected_as_unimplemented() {
        let engine = Engine::new(MemoryStore::new());
        let changes = PlaceChanges {
            name: None,
            description: None,
            location: None,
            address: None,
            year_from: None,
            year_to: None,
        };

        let err = assert_err!(engine.update_place(Uuid::new_v4(), changes).await);

        assert_eq!(err.code, 100);
    }
}
