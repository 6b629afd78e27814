use crate::entities::Coordinates;
use crate::map::cluster::MapFeature;

/// Detail overlay for the current selection. Fully controlled by the map
/// display: it renders whatever feature list it is handed.
#[derive(Debug, Default)]
pub struct Popup {
    position: Option<Coordinates>,
    features: Vec<MapFeature>,
}

impl Popup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, position: Coordinates, features: Vec<MapFeature>) {
        self.features = features;
        self.position = Some(position);
    }

    /// Hides the popup by clearing its position. The attached features are
    /// left as-is, matching the close-button behavior.
    pub fn clear(&mut self) {
        self.position = None;
    }

    pub fn is_open(&self) -> bool {
        self.position.is_some()
    }

    pub fn position(&self) -> Option<Coordinates> {
        self.position
    }

    pub fn features(&self) -> &[MapFeature] {
        &self.features
    }
}
