use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::entities::{LocalizedText, Place};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkageKind {
    RenamedTo,
    MergedInto,
}

/// A linkage as persisted: member places are referenced by id only.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LinkageRecord {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: LinkageKind,
    pub parent_ids: Vec<Uuid>,
    pub child_ids: Vec<Uuid>,
}

/// A linkage as served: member names and validity years are inlined.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlaceLinkage {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: LinkageKind,
    pub parents: Vec<LinkedPlace>,
    pub children: Vec<LinkedPlace>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LinkedPlace {
    pub id: Uuid,
    pub name: LocalizedText,
    pub year_from: i32,
    pub year_to: i32,
}

impl From<&Place> for LinkedPlace {
    fn from(place: &Place) -> Self {
        Self {
            id: place.id,
            name: place.name.clone(),
            year_from: place.year_from,
            year_to: place.year_to,
        }
    }
}

impl PlaceLinkage {
    /// Inlines member places into the record. Dangling references are
    /// dropped.
    pub fn from_record(record: LinkageRecord, places: &HashMap<Uuid, Place>) -> Self {
        fn resolve(ids: &[Uuid], places: &HashMap<Uuid, Place>) -> Vec<LinkedPlace> {
            ids.iter()
                .filter_map(|id| places.get(id))
                .map(LinkedPlace::from)
                .collect()
        }

        Self {
            id: record.id,
            kind: record.kind,
            parents: resolve(&record.parent_ids, places),
            children: resolve(&record.child_ids, places),
        }
    }
}
