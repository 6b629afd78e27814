use super::Engine;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    api::PlaceQueryAPI,
    db::PlaceStore,
    entities::{Place, PlaceFilter, PlaceLinkage, PlaceSummary},
    error::Error,
};

#[async_trait]
impl<S: PlaceStore> PlaceQueryAPI for Engine<S> {
    #[tracing::instrument(skip(self))]
    async fn list_places(&self, filter: PlaceFilter) -> Result<Vec<PlaceSummary>, Error> {
        // store failures are served as an empty result set, availability over
        // error visibility
        let places = match self.store.find_within(&filter).await {
            Ok(places) => places,
            Err(err) => {
                tracing::error!(code = err.code, message = %err.message, "place query failed");
                return Ok(vec![]);
            }
        };

        Ok(places.iter().map(Place::summary).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn find_place(&self, id: Uuid) -> Result<Option<Place>, Error> {
        match self.store.find_by_id(id).await {
            Ok(maybe_place) => Ok(maybe_place),
            Err(err) => {
                tracing::error!(code = err.code, message = %err.message, "place fetch failed");
                Ok(None)
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn find_linkages(&self, id: Uuid) -> Result<Vec<PlaceLinkage>, Error> {
        match self.store.find_linkages(id).await {
            Ok(linkages) => Ok(linkages),
            Err(err) => {
                tracing::error!(code = err.code, message = %err.message, "linkage fetch failed");
                Ok(vec![])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::PlaceCommandAPI;
    use crate::db::memory::MemoryStore;
    use crate::entities::{
        Coordinates, LinkageKind, LinkageRecord, LocalizedText, NewPlace, Provider,
    };
    use tokio_test::assert_ok;

    fn new_place(name: &str, location: Coordinates, years: Option<(i32, i32)>) -> NewPlace {
        NewPlace {
            name: Some(LocalizedText::zh_hk(name)),
            description: None,
            location,
            address: None,
            provider: Provider::Manual,
            provider_id: None,
            year_from: years.map(|(from, _)| from),
            year_to: years.map(|(_, to)| to),
        }
    }

    #[tokio::test]
    async fn list_filters_by_distance_and_years() {
        let engine = Engine::new(MemoryStore::new());
        let center = Coordinates::new(22.30, 114.17);

        let near = engine
            .create_place(new_place(
                "近",
                Coordinates::new(22.302, 114.172),
                Some((1950, 2000)),
            ))
            .await
            .unwrap();
        // roughly 15 km away
        engine
            .create_place(new_place(
                "遠",
                Coordinates::new(22.44, 114.17),
                Some((1950, 2000)),
            ))
            .await
            .unwrap();
        // validity interval outside the requested year range
        engine
            .create_place(new_place(
                "早",
                Coordinates::new(22.301, 114.171),
                Some((1800, 1850)),
            ))
            .await
            .unwrap();

        let filter = PlaceFilter::new(center, Some(1.0), Some(1900), Some(2999), None);
        let places = engine.list_places(filter).await.unwrap();

        assert_eq!(places.len(), 1);
        assert_eq!(places[0].id, near.id);
    }

    #[tokio::test]
    async fn list_respects_limit() {
        let engine = Engine::new(MemoryStore::new());
        let center = Coordinates::new(22.30, 114.17);

        for _ in 0..3 {
            engine
                .create_place(new_place("地", center, None))
                .await
                .unwrap();
        }

        let filter = PlaceFilter::new(center, None, None, None, Some(2));
        let places = engine.list_places(filter).await.unwrap();

        assert_eq!(places.len(), 2);
    }

    #[tokio::test]
    async fn store_failure_yields_empty_result() {
        let engine = Engine::new(MemoryStore::failing());
        let filter = PlaceFilter::new(Coordinates::new(22.30, 114.17), None, None, None, None);

        let result = engine.list_places(filter).await;

        let places = assert_ok!(result);
        assert!(places.is_empty());
    }

    #[tokio::test]
    async fn find_linkages_swallows_store_failure() {
        let engine = Engine::new(MemoryStore::failing());

        let result = engine.find_linkages(Uuid::new_v4()).await;

        let linkages = assert_ok!(result);
        assert!(linkages.is_empty());
    }

    #[tokio::test]
    async fn find_place_swallows_store_failure() {
        let engine = Engine::new(MemoryStore::failing());

        let result = engine.find_place(Uuid::new_v4()).await;

        assert!(assert_ok!(result).is_none());
    }

    #[tokio::test]
    async fn linkages_inline_member_names() {
        let store = MemoryStore::new();
        let old = crate::entities::Place::new(new_place(
            "裙帶路",
            Coordinates::new(22.28, 114.15),
            Some((1800, 1842)),
        ));
        let new = crate::entities::Place::new(new_place(
            "維多利亞城",
            Coordinates::new(22.28, 114.15),
            Some((1843, 2999)),
        ));

        store.insert_place(&old).await.unwrap();
        store.insert_place(&new).await.unwrap();
        store.seed_linkage(LinkageRecord {
            id: Uuid::new_v4(),
            kind: LinkageKind::RenamedTo,
            parent_ids: vec![old.id],
            child_ids: vec![new.id],
        });

        let engine = Engine::new(store);
        let linkages = engine.find_linkages(old.id).await.unwrap();

        assert_eq!(linkages.len(), 1);
        assert_eq!(linkages[0].kind, LinkageKind::RenamedTo);
        assert_eq!(linkages[0].parents[0].name, LocalizedText::zh_hk("裙帶路"));
        assert_eq!(linkages[0].parents[0].year_to, 1842);
        assert_eq!(linkages[0].children[0].id, new.id);
    }
}
