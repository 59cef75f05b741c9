use geoprim::LatLng;
use serde::Deserialize;
use serde_json::Value;

/// A restaurant renderable as a map marker.
#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantMapEntry {
    pub id: String,
    pub name: String,
    pub address: String,
    pub photo: Option<String>,
    pub coordinates: LatLng,
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
}

/// Raw bounds-query record as returned by the discovery backend.
///
/// Coordinate fields are deserialized leniently (the backend occasionally
/// emits strings or nulls), so a malformed record parses and is then dropped
/// by [`RawEntry::validate`] instead of failing the whole response.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub latitude: Value,
    #[serde(default)]
    pub longitude: Value,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub review_count: Option<u32>,
}

impl RawEntry {
    /// Validates into a renderable entry.
    ///
    /// Returns `None` when either coordinate is non-numeric or outside
    /// `[-90, 90]` / `[-180, 180]`; such records never reach the marker set.
    pub fn validate(&self) -> Option<RestaurantMapEntry> {
        let coordinates = LatLng::new(self.latitude.as_f64()?, self.longitude.as_f64()?);
        if !coordinates.is_valid() {
            return None;
        }
        Some(RestaurantMapEntry {
            id: self.id.clone(),
            name: self.name.clone(),
            address: self.address.clone(),
            photo: self.photo.clone(),
            coordinates,
            rating: self.rating,
            review_count: self.review_count,
        })
    }
}

/// Photo attachment on a manual-search record.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchPhoto {
    pub photo_reference: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SearchGeometry {
    pub lat: f64,
    pub lng: f64,
}

/// The richer restaurant record produced by a manual search.
///
/// Field names follow the search backend's response; `to_map_entry`
/// flattens it into the marker shape.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchRestaurant {
    pub place_id: String,
    pub name: String,
    #[serde(default)]
    pub vicinity: String,
    #[serde(default)]
    pub photos: Vec<SearchPhoto>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u32>,
    pub geometry: SearchGeometry,
}

impl SearchRestaurant {
    /// Transforms the search record into a marker entry.
    ///
    /// Applies the same coordinate validity gate as bounds-query records.
    pub fn to_map_entry(&self) -> Option<RestaurantMapEntry> {
        let coordinates = LatLng::new(self.geometry.lat, self.geometry.lng);
        if !coordinates.is_valid() {
            return None;
        }
        Some(RestaurantMapEntry {
            id: self.place_id.clone(),
            name: self.name.clone(),
            address: self.vicinity.clone(),
            photo: self.photos.first().map(|p| p.photo_reference.clone()),
            coordinates,
            rating: self.rating,
            review_count: self.user_ratings_total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{RawEntry, SearchRestaurant};

    fn raw(json: &str) -> RawEntry {
        serde_json::from_str(json).expect("payload parses")
    }

    #[test]
    fn valid_record_becomes_an_entry() {
        let entry = raw(
            r#"{
                "id": "r1",
                "name": "Banh Mi Corner",
                "address": "12 Tran Phu",
                "latitude": 16.06,
                "longitude": 108.22,
                "rating": 4.5,
                "review_count": 120
            }"#,
        )
        .validate()
        .expect("valid");
        assert_eq!(entry.name, "Banh Mi Corner");
        assert_eq!(entry.coordinates.lat, 16.06);
        assert_eq!(entry.review_count, Some(120));
    }

    #[test]
    fn string_coordinate_parses_but_fails_validation() {
        let raw = raw(r#"{"id": "r2", "name": "Bad", "latitude": "bad", "longitude": 108.22}"#);
        assert!(raw.validate().is_none());
    }

    #[test]
    fn out_of_range_coordinate_is_rejected() {
        let raw3 = raw(r#"{"id": "r3", "name": "Far", "latitude": 91.0, "longitude": 108.22}"#);
        assert!(raw3.validate().is_none());
        let raw4 = raw(r#"{"id": "r4", "name": "Far", "latitude": 16.0, "longitude": 181.0}"#);
        assert!(raw4.validate().is_none());
    }

    #[test]
    fn missing_coordinates_are_rejected_not_a_parse_error() {
        let raw = raw(r#"{"id": "r5", "name": "NoGeo"}"#);
        assert!(raw.validate().is_none());
    }

    #[test]
    fn search_record_flattens_into_an_entry() {
        let search: SearchRestaurant = serde_json::from_str(
            r#"{
                "place_id": "p1",
                "name": "Pho 75",
                "vicinity": "75 Le Loi",
                "photos": [{"photo_reference": "ref-1"}, {"photo_reference": "ref-2"}],
                "rating": 4.2,
                "user_ratings_total": 88,
                "geometry": {"lat": 16.07, "lng": 108.21}
            }"#,
        )
        .expect("payload parses");
        let entry = search.to_map_entry().expect("valid");
        assert_eq!(entry.id, "p1");
        assert_eq!(entry.address, "75 Le Loi");
        assert_eq!(entry.photo.as_deref(), Some("ref-1"));
    }

    #[test]
    fn search_record_with_bad_geometry_is_dropped() {
        let search: SearchRestaurant = serde_json::from_str(
            r#"{"place_id": "p2", "name": "Nowhere", "geometry": {"lat": 120.0, "lng": 0.0}}"#,
        )
        .expect("payload parses");
        assert!(search.to_map_entry().is_none());
    }
}
