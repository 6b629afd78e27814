use crate::entities::Coordinates;

/// Map view over EPSG:4326 with the default 256px tile grid.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub center: Coordinates,
    pub zoom: u8,
}

impl Viewport {
    pub fn new(center: Coordinates, zoom: u8) -> Self {
        Self { center, zoom }
    }

    /// Map units (degrees) per pixel at the current zoom.
    pub fn resolution(&self) -> f64 {
        180.0 / 256.0 / f64::powi(2.0, self.zoom as i32)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(Coordinates::new(22.35201, 114.160147), 11)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_halves_per_zoom_level() {
        let near = Viewport::new(Coordinates::new(22.30, 114.17), 11);
        let far = Viewport::new(Coordinates::new(22.30, 114.17), 10);

        assert_eq!(far.resolution(), near.resolution() * 2.0);
    }
}
