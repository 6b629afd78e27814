use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::Coordinates;

pub const DEFAULT_RADIUS_KM: f64 = 1.0;
pub const DEFAULT_YEAR_FROM: i32 = 0;
pub const DEFAULT_YEAR_TO: i32 = 2999;
pub const MAX_LIMIT: i64 = 1000;

/// Localized text keyed by language code.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub zh_hk: Option<String>,
    pub en_us: Option<String>,
}

impl LocalizedText {
    pub fn zh_hk(text: &str) -> Self {
        Self {
            zh_hk: Some(text.into()),
            en_us: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    Manual,
    Had,
}

impl Provider {
    pub fn is_manual(&self) -> bool {
        matches!(self, Self::Manual)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Place {
    pub id: Uuid,
    pub name: LocalizedText,
    pub description: LocalizedText,
    pub location: Coordinates,
    pub address: Option<String>,
    pub year_from: i32,
    pub year_to: i32,
    pub provider: Provider,
    pub provider_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create input. Only `location` and `provider` are required.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewPlace {
    pub name: Option<LocalizedText>,
    pub description: Option<LocalizedText>,
    pub location: Coordinates,
    pub address: Option<String>,
    pub provider: Provider,
    pub provider_id: Option<String>,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
}

/// Update input. Updates are not supported yet; the shape is kept for the
/// PATCH surface.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlaceChanges {
    pub name: Option<LocalizedText>,
    pub description: Option<LocalizedText>,
    pub location: Option<Coordinates>,
    pub address: Option<String>,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
}

impl Place {
    pub fn new(input: NewPlace) -> Self {
        // manual entries never keep a caller-supplied provider id, so they
        // cannot collide with externally sourced ids
        let provider_id = if input.provider.is_manual() {
            Uuid::new_v4().to_string()
        } else {
            input.provider_id.unwrap_or_default()
        };

        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            name: input.name.unwrap_or_default(),
            description: input.description.unwrap_or_default(),
            location: input.location,
            address: input.address,
            year_from: input.year_from.unwrap_or(DEFAULT_YEAR_FROM),
            year_to: input.year_to.unwrap_or(DEFAULT_YEAR_TO),
            provider: input.provider,
            provider_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn summary(&self) -> PlaceSummary {
        PlaceSummary {
            id: self.id,
            location: self.location,
            name: self.name.clone(),
            year_from: self.year_from,
            year_to: self.year_to,
        }
    }
}

/// Reduced projection returned by the list query to keep payloads small.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlaceSummary {
    pub id: Uuid,
    pub location: Coordinates,
    pub name: LocalizedText,
    pub year_from: i32,
    pub year_to: i32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlaceFilter {
    pub center: Coordinates,
    pub radius_km: f64,
    pub year_from: i32,
    pub year_to: i32,
    pub limit: i64,
}

impl PlaceFilter {
    pub fn new(
        center: Coordinates,
        radius_km: Option<f64>,
        year_from: Option<i32>,
        year_to: Option<i32>,
        limit: Option<i64>,
    ) -> Self {
        Self {
            center,
            radius_km: radius_km.unwrap_or(DEFAULT_RADIUS_KM),
            year_from: year_from.unwrap_or(DEFAULT_YEAR_FROM),
            year_to: year_to.unwrap_or(DEFAULT_YEAR_TO),
            limit: limit.unwrap_or(MAX_LIMIT).clamp(0, MAX_LIMIT),
        }
    }
}
