use std::collections::HashMap;
use std::sync::Arc;

pub const MARKER_RADIUS_PX: f64 = 10.0;

#[derive(Clone, Debug, PartialEq)]
pub struct MarkerStyle {
    pub radius_px: f64,
    pub stroke_color: &'static str,
    pub fill_color: &'static str,
    pub label: String,
    pub label_color: &'static str,
}

impl MarkerStyle {
    fn for_size(size: usize) -> Self {
        Self {
            radius_px: MARKER_RADIUS_PX,
            stroke_color: "#fff",
            fill_color: "#3399CC",
            label: size.to_string(),
            label_color: "#fff",
        }
    }
}

/// Marker styles memoized by cluster size. Cluster sizes are small bounded
/// integers, so entries are never evicted.
#[derive(Default)]
pub struct StyleCache {
    styles: HashMap<usize, Arc<MarkerStyle>>,
}

impl StyleCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, size: usize) -> Arc<MarkerStyle> {
        self.styles
            .entry(size)
            .or_insert_with(|| Arc::new(MarkerStyle::for_size(size)))
            .clone()
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_lookup_returns_the_cached_instance() {
        let mut cache = StyleCache::new();

        let first = cache.get(5);
        let second = cache.get(5);

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn style_carries_the_cluster_size_label() {
        let mut cache = StyleCache::new();

        let style = cache.get(3);

        assert_eq!(style.label, "3");
        assert_eq!(style.radius_px, MARKER_RADIUS_PX);
    }

    #[test]
    fn distinct_sizes_get_distinct_styles() {
        let mut cache = StyleCache::new();

        let small = cache.get(1);
        let large = cache.get(8);

        assert!(!Arc::ptr_eq(&small, &large));
        assert_eq!(cache.len(), 2);
    }
}
