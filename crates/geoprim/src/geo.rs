/// Geographic position in WGS84 degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// A position is usable only when both components are finite and within
    /// `[-90, 90]` / `[-180, 180]`.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// Axis-aligned geographic rectangle in degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeoBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl GeoBounds {
    pub fn new(min_lat: f64, max_lat: f64, min_lng: f64, max_lng: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        }
    }

    /// Tightest bounds covering `points`. `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = LatLng>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Self::new(first.lat, first.lat, first.lng, first.lng);
        for p in iter {
            bounds.extend(p);
        }
        Some(bounds)
    }

    /// Grows the bounds to include `p`.
    pub fn extend(&mut self, p: LatLng) {
        self.min_lat = self.min_lat.min(p.lat);
        self.max_lat = self.max_lat.max(p.lat);
        self.min_lng = self.min_lng.min(p.lng);
        self.max_lng = self.max_lng.max(p.lng);
    }

    pub fn contains(&self, p: LatLng) -> bool {
        p.lat >= self.min_lat
            && p.lat <= self.max_lat
            && p.lng >= self.min_lng
            && p.lng <= self.max_lng
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }

    /// Degree spans as `(lat_span, lng_span)`.
    pub fn spans(&self) -> (f64, f64) {
        (
            (self.max_lat - self.min_lat).max(0.0),
            (self.max_lng - self.min_lng).max(0.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{GeoBounds, LatLng};

    #[test]
    fn latlng_validity_edges() {
        assert!(LatLng::new(90.0, 180.0).is_valid());
        assert!(LatLng::new(-90.0, -180.0).is_valid());
        assert!(!LatLng::new(90.0001, 0.0).is_valid());
        assert!(!LatLng::new(0.0, -180.5).is_valid());
        assert!(!LatLng::new(f64::NAN, 0.0).is_valid());
        assert!(!LatLng::new(0.0, f64::INFINITY).is_valid());
    }

    #[test]
    fn from_points_covers_all_inputs() {
        let b = GeoBounds::from_points([
            LatLng::new(16.05, 108.24),
            LatLng::new(16.07, 108.21),
            LatLng::new(16.06, 108.22),
        ])
        .expect("non-empty");
        assert_eq!(b, GeoBounds::new(16.05, 16.07, 108.21, 108.24));
        assert!(b.contains(LatLng::new(16.06, 108.23)));
        assert!(!b.contains(LatLng::new(16.08, 108.23)));
    }

    #[test]
    fn from_points_empty_is_none() {
        assert!(GeoBounds::from_points([]).is_none());
    }

    #[test]
    fn center_of_single_point_bounds_is_the_point() {
        let b = GeoBounds::from_points([LatLng::new(1.0, 2.0)]).unwrap();
        let c = b.center();
        assert_eq!(c, LatLng::new(1.0, 2.0));
        assert_eq!(b.spans(), (0.0, 0.0));
    }
}
