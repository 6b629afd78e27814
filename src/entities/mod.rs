mod linkage;
mod location;
mod place;

pub use linkage::{LinkageKind, LinkageRecord, LinkedPlace, PlaceLinkage};
pub use location::Coordinates;
pub use place::{
    LocalizedText, NewPlace, Place, PlaceChanges, PlaceFilter, PlaceSummary, Provider,
    DEFAULT_RADIUS_KM, DEFAULT_YEAR_FROM, DEFAULT_YEAR_TO, MAX_LIMIT,
};
