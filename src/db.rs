use async_trait::async_trait;
use geo_types::Geometry;
use geozero::wkb;
use sqlx::{pool::PoolConnection, postgres::PgPoolOptions, types::Json, Executor, Pool, Postgres, Row};
use std::collections::HashMap;
use uuid::Uuid;

use crate::{
    entities::{LinkageRecord, Place, PlaceFilter, PlaceLinkage},
    error::Error,
};

/// Persistence boundary for places and their linkages. Any replacement has
/// to support equivalent proximity + year-range filtering semantics.
#[async_trait]
pub trait PlaceStore: Send + Sync {
    async fn insert_place(&self, place: &Place) -> Result<(), Error>;

    /// Places within `filter.radius_km` of the center whose validity interval
    /// lies inside the filter's year range, nearest first, at most
    /// `filter.limit` rows.
    async fn find_within(&self, filter: &PlaceFilter) -> Result<Vec<Place>, Error>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Place>, Error>;

    /// Linkages referencing the place as parent or child, with member names
    /// and validity years inlined.
    async fn find_linkages(&self, place_id: Uuid) -> Result<Vec<PlaceLinkage>, Error>;
}

pub struct PgStore {
    pool: Pool<Postgres>,
}

impl PgStore {
    #[tracing::instrument(name = "PgStore::new", skip_all)]
    pub async fn new(db_uri: &str, max_connections: u32) -> Result<Self, Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(db_uri)
            .await?;

        // TODO: move this to migrations
        pool.execute("CREATE EXTENSION IF NOT EXISTS postgis").await?;
        pool.execute(
            "CREATE TABLE IF NOT EXISTS places (id UUID PRIMARY KEY, location geometry(Point, 4326) NOT NULL, year_from INT4 NOT NULL, year_to INT4 NOT NULL, data JSONB NOT NULL)",
        )
        .await?;
        pool.execute("CREATE INDEX IF NOT EXISTS places_location_idx ON places USING GIST (location)")
            .await?;
        pool.execute(
            "CREATE TABLE IF NOT EXISTS place_linkages (id UUID PRIMARY KEY, parents UUID[] NOT NULL, children UUID[] NOT NULL, data JSONB NOT NULL)",
        )
        .await?;

        Ok(Self { pool })
    }

    async fn acquire_conn(&self) -> Result<PoolConnection<Postgres>, sqlx::Error> {
        self.pool.acquire().await
    }
}

#[async_trait]
impl PlaceStore for PgStore {
    #[tracing::instrument(skip(self, place), fields(id = %place.id))]
    async fn insert_place(&self, place: &Place) -> Result<(), Error> {
        let location: Geometry<f64> = place.location.into();

        let mut conn = self.acquire_conn().await?;

        conn.execute(
            sqlx::query(
                "INSERT INTO places (id, location, year_from, year_to, data) VALUES ($1, ST_SetSRID($2, 4326), $3, $4, $5)",
            )
            .bind(&place.id)
            .bind(wkb::Encode(location))
            .bind(place.year_from)
            .bind(place.year_to)
            .bind(Json(place)),
        )
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn find_within(&self, filter: &PlaceFilter) -> Result<Vec<Place>, Error> {
        let center: Geometry<f64> = filter.center.into();
        let radius_m = filter.radius_km * 1000.0;

        let query = "
            SELECT data
            FROM places
            WHERE
                ST_DWithin(location::geography, ST_SetSRID($1, 4326)::geography, $2)
                AND year_from >= $3
                AND year_to <= $4
            ORDER BY location <-> ST_SetSRID($1, 4326)
            LIMIT $5
        ";

        let mut conn = self.acquire_conn().await?;

        let results = conn
            .fetch_all(
                sqlx::query(query)
                    .bind(wkb::Encode(center))
                    .bind(radius_m)
                    .bind(filter.year_from)
                    .bind(filter.year_to)
                    .bind(filter.limit),
            )
            .await?;

        let mut places = vec![];

        for result in results.iter() {
            let Json(place): Json<Place> = result.try_get("data")?;
            places.push(place);
        }

        Ok(places)
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Place>, Error> {
        let mut conn = self.acquire_conn().await?;

        let maybe_result = conn
            .fetch_optional(sqlx::query("SELECT data FROM places WHERE id = $1").bind(&id))
            .await?;

        match maybe_result {
            Some(result) => {
                let Json(place) = result.try_get("data")?;
                Ok(Some(place))
            }
            None => Ok(None),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn find_linkages(&self, place_id: Uuid) -> Result<Vec<PlaceLinkage>, Error> {
        let mut conn = self.acquire_conn().await?;

        let results = conn
            .fetch_all(
                sqlx::query(
                    "SELECT data FROM place_linkages WHERE $1 = ANY(parents) OR $1 = ANY(children)",
                )
                .bind(&place_id),
            )
            .await?;

        let mut records = vec![];

        for result in results.iter() {
            let Json(record): Json<LinkageRecord> = result.try_get("data")?;
            records.push(record);
        }

        // inline member names and validity years
        let mut member_ids: Vec<Uuid> = records
            .iter()
            .flat_map(|record| record.parent_ids.iter().chain(record.child_ids.iter()))
            .copied()
            .collect();
        member_ids.sort();
        member_ids.dedup();

        let results = conn
            .fetch_all(sqlx::query("SELECT data FROM places WHERE id = ANY($1)").bind(&member_ids))
            .await?;

        let mut members = HashMap::new();

        for result in results.iter() {
            let Json(place): Json<Place> = result.try_get("data")?;
            members.insert(place.id, place);
        }

        Ok(records
            .into_iter()
            .map(|record| PlaceLinkage::from_record(record, &members))
            .collect())
    }
}
