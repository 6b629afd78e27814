use uuid::Uuid;

use crate::entities::{Coordinates, PlaceSummary};
use crate::map::style::MARKER_RADIUS_PX;

#[derive(Clone, Debug, PartialEq)]
pub struct MapFeature {
    pub id: Uuid,
    pub name: String,
    pub coordinates: Coordinates,
}

impl From<&PlaceSummary> for MapFeature {
    fn from(place: &PlaceSummary) -> Self {
        Self {
            id: place.id,
            name: place.name.zh_hk.clone().unwrap_or_default(),
            coordinates: place.location,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Cluster {
    coordinates: Coordinates,
    features: Vec<MapFeature>,
}

impl Cluster {
    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    pub fn features(&self) -> &[MapFeature] {
        &self.features
    }

    pub fn size(&self) -> usize {
        self.features.len()
    }
}

/// Marker layer that merges features within a fixed pixel distance into
/// cluster markers.
pub struct ClusterLayer {
    distance_px: f64,
    features: Vec<MapFeature>,
}

// planar distance in map units; the view projection is unprojected lat/lng
fn planar_distance(a: Coordinates, b: Coordinates) -> f64 {
    let d_lng = a.lng - b.lng;
    let d_lat = a.lat - b.lat;

    (d_lng * d_lng + d_lat * d_lat).sqrt()
}

impl ClusterLayer {
    pub fn new(distance_px: f64) -> Self {
        Self {
            distance_px,
            features: vec![],
        }
    }

    /// Replaces the source contents wholesale, no incremental diff.
    pub fn replace(&mut self, features: Vec<MapFeature>) {
        self.features = features;
    }

    pub fn features(&self) -> &[MapFeature] {
        &self.features
    }

    /// Greedy clustering pass: every feature joins the group seeded by the
    /// first unassigned feature within the pixel distance at the given
    /// resolution. Cluster coordinate is the centroid of its members.
    pub fn clusters(&self, resolution: f64) -> Vec<Cluster> {
        let radius = self.distance_px * resolution;
        let mut assigned = vec![false; self.features.len()];
        let mut clusters = vec![];

        for (i, seed) in self.features.iter().enumerate() {
            if assigned[i] {
                continue;
            }

            let mut members = vec![];

            for (j, candidate) in self.features.iter().enumerate().skip(i) {
                if assigned[j] {
                    continue;
                }

                if planar_distance(seed.coordinates, candidate.coordinates) <= radius {
                    assigned[j] = true;
                    members.push(candidate.clone());
                }
            }

            let count = members.len() as f64;
            let coordinates = Coordinates::new(
                members.iter().map(|f| f.coordinates.lat).sum::<f64>() / count,
                members.iter().map(|f| f.coordinates.lng).sum::<f64>() / count,
            );

            clusters.push(Cluster {
                coordinates,
                features: members,
            });
        }

        clusters
    }

    /// Resolves the topmost cluster marker covering the given point, if any.
    pub fn hit(&self, at: Coordinates, resolution: f64) -> Option<Cluster> {
        let marker_radius = MARKER_RADIUS_PX * resolution;

        self.clusters(resolution)
            .into_iter()
            .rev()
            .find(|cluster| planar_distance(cluster.coordinates(), at) <= marker_radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature(lat: f64, lng: f64) -> MapFeature {
        MapFeature {
            id: Uuid::new_v4(),
            name: "地點".into(),
            coordinates: Coordinates::new(lat, lng),
        }
    }

    // ~0.000343 degrees per pixel, zoom 11 over EPSG:4326
    const RESOLUTION: f64 = 180.0 / 256.0 / 2048.0;

    #[test]
    fn nearby_features_merge_into_one_cluster() {
        let mut layer = ClusterLayer::new(10.0);
        layer.replace(vec![
            feature(22.3000, 114.1700),
            feature(22.3001, 114.1701),
            feature(22.3002, 114.1699),
        ]);

        let clusters = layer.clusters(RESOLUTION);

        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].size(), 3);
    }

    #[test]
    fn distant_features_stay_separate() {
        let mut layer = ClusterLayer::new(10.0);
        layer.replace(vec![feature(22.30, 114.17), feature(22.35, 114.20)]);

        let clusters = layer.clusters(RESOLUTION);

        assert_eq!(clusters.len(), 2);
        assert!(clusters.iter().all(|c| c.size() == 1));
    }

    #[test]
    fn replace_discards_previous_markers() {
        let mut layer = ClusterLayer::new(10.0);
        let old = feature(22.30, 114.17);
        layer.replace(vec![old.clone()]);

        let new = feature(22.31, 114.18);
        layer.replace(vec![new.clone()]);

        assert_eq!(layer.features(), &[new]);
        assert!(!layer.features().contains(&old));
    }

    #[test]
    fn hit_resolves_the_cluster_under_the_point() {
        let mut layer = ClusterLayer::new(10.0);
        let target = feature(22.3000, 114.1700);
        layer.replace(vec![target.clone(), feature(22.35, 114.20)]);

        let hit = layer.hit(target.coordinates, RESOLUTION).unwrap();

        assert_eq!(hit.features()[0].id, target.id);
    }

    #[test]
    fn hit_misses_empty_map_area() {
        let mut layer = ClusterLayer::new(10.0);
        layer.replace(vec![feature(22.30, 114.17)]);

        assert!(layer.hit(Coordinates::new(22.40, 114.30), RESOLUTION).is_none());
    }
}
