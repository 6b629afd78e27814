mod cluster;
mod popup;
mod style;
mod viewport;

pub use cluster::{Cluster, ClusterLayer, MapFeature};
pub use popup::Popup;
pub use style::{MarkerStyle, StyleCache, MARKER_RADIUS_PX};
pub use viewport::Viewport;

use async_trait::async_trait;
use std::sync::Arc;

use crate::entities::{Coordinates, PlaceSummary};
use crate::error::Error;

/// Radius used for every viewport-settle query.
pub const FALLBACK_RADIUS_KM: f64 = 10.0;

/// Pixel distance below which markers merge into one cluster.
pub const CLUSTER_DISTANCE_PX: f64 = 10.0;

/// The only contract the map display depends on from the API client layer.
#[async_trait]
pub trait PlaceSource: Send + Sync {
    async fn places_near(
        &self,
        center: Coordinates,
        radius_km: f64,
    ) -> Result<Vec<PlaceSummary>, Error>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MapState {
    Idle,
    Fetching { seq: u64 },
    Updated,
    Selected,
}

/// Owns the viewport, the clustering marker layer and the selection popup,
/// and drives the settle/select cycle as an explicit state machine.
pub struct MapDisplay<S> {
    source: S,
    state: MapState,
    viewport: Viewport,
    layer: ClusterLayer,
    styles: StyleCache,
    popup: Popup,
    seq: u64,
}

impl<S: PlaceSource> MapDisplay<S> {
    pub fn new(source: S, viewport: Viewport) -> Self {
        Self {
            source,
            state: MapState::Idle,
            viewport,
            layer: ClusterLayer::new(CLUSTER_DISTANCE_PX),
            styles: StyleCache::new(),
            popup: Popup::new(),
            seq: 0,
        }
    }

    pub fn state(&self) -> MapState {
        self.state
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn layer(&self) -> &ClusterLayer {
        &self.layer
    }

    pub fn popup(&self) -> &Popup {
        &self.popup
    }

    pub fn clusters(&self) -> Vec<Cluster> {
        self.layer.clusters(self.viewport.resolution())
    }

    pub fn style_for(&mut self, cluster: &Cluster) -> Arc<MarkerStyle> {
        self.styles.get(cluster.size())
    }

    /// Viewport move completed: any open popup is invalidated, and a
    /// sequence-stamped fetch begins.
    pub fn begin_settle(&mut self, center: Coordinates) -> u64 {
        self.popup.clear();
        self.viewport.center = center;
        self.seq += 1;
        self.state = MapState::Fetching { seq: self.seq };

        self.seq
    }

    /// Applies a fetch result. Responses stamped with an older sequence than
    /// the latest issued one are discarded, so a stale response can never
    /// overwrite a newer viewport's markers.
    pub fn finish_settle(&mut self, seq: u64, places: Vec<PlaceSummary>) -> bool {
        if seq != self.seq {
            tracing::debug!(seq, latest = self.seq, "discarding stale settle response");
            return false;
        }

        self.layer
            .replace(places.iter().map(MapFeature::from).collect());
        self.state = MapState::Updated;

        true
    }

    /// Full settle cycle against the place source. A failed query renders
    /// zero markers rather than surfacing an error.
    pub async fn settle(&mut self, center: Coordinates) {
        let seq = self.begin_settle(center);

        let places = match self.source.places_near(center, FALLBACK_RADIUS_KM).await {
            Ok(places) => places,
            Err(err) => {
                tracing::error!(code = err.code, message = %err.message, "place query failed");
                vec![]
            }
        };

        self.finish_settle(seq, places);
    }

    /// Click selection: the topmost cluster at the click point opens the
    /// popup with all its underlying features; a miss clears the popup.
    pub fn select_at(&mut self, at: Coordinates) {
        match self.layer.hit(at, self.viewport.resolution()) {
            Some(cluster) => {
                self.popup
                    .show(cluster.coordinates(), cluster.features().to_vec());
                self.state = MapState::Selected;
            }
            None => self.popup.clear(),
        }
    }

    /// Popup close button: position is cleared, selection is not otherwise
    /// reset.
    pub fn close_popup(&mut self) {
        self.popup.clear();
        self.state = MapState::Idle;
    }
}
