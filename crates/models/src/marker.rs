use serde::{Deserialize, Serialize};

/// Geographic coordinate pair in degrees.
///
/// Serialized as `{"latitude": .., "longitude": ..}`. Deserialization keeps the
/// stored values as-is; only [`LatLng::new`] normalizes.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLng {
    /// Build a coordinate the way a map position type does: latitude is clamped
    /// to [-90, 90] and longitude wrapped into [-180, 180).
    pub fn new(latitude: f64, longitude: f64) -> Self {
        let longitude = if (-180.0..180.0).contains(&longitude) {
            longitude
        } else {
            ((longitude - 180.0) % 360.0 + 360.0) % 360.0 - 180.0
        };
        Self { latitude: latitude.clamp(-90.0, 90.0), longitude }
    }
}

/// A user-placed marker. Two records are the same marker when title and
/// position are exactly equal; there is no surrogate id.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MarkerRecord {
    pub title: String,
    #[serde(rename = "latLng")]
    pub lat_lng: LatLng,
}

impl MarkerRecord {
    pub fn new(title: impl Into<String>, lat_lng: LatLng) -> Self {
        Self { title: title.into(), lat_lng }
    }

    /// Structural match used by delete: title and both coordinates equal.
    pub fn matches(&self, other: &MarkerRecord) -> bool {
        self == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_lat_lng_field_names() {
        let rec = MarkerRecord::new("Home", LatLng { latitude: -33.86, longitude: 151.2 });
        let json = serde_json::to_string(&vec![rec]).unwrap();
        assert_eq!(json, r#"[{"title":"Home","latLng":{"latitude":-33.86,"longitude":151.2}}]"#);
    }

    #[test]
    fn equality_is_exact() {
        let a = MarkerRecord::new("A", LatLng { latitude: 1.0, longitude: 2.0 });
        let b = MarkerRecord::new("A", LatLng { latitude: 1.0, longitude: 2.0 });
        let c = MarkerRecord::new("A", LatLng { latitude: 1.0 + 1e-12, longitude: 2.0 });
        let d = MarkerRecord::new("a", LatLng { latitude: 1.0, longitude: 2.0 });
        assert!(a.matches(&b));
        assert!(!a.matches(&c));
        assert!(!a.matches(&d));
    }

    #[test]
    fn new_clamps_latitude_and_wraps_longitude() {
        assert_eq!(LatLng::new(95.0, 10.0), LatLng { latitude: 90.0, longitude: 10.0 });
        assert_eq!(LatLng::new(-100.0, 10.0).latitude, -90.0);
        assert_eq!(LatLng::new(0.0, 190.0).longitude, -170.0);
        assert_eq!(LatLng::new(0.0, 180.0).longitude, -180.0);
        assert_eq!(LatLng::new(0.0, -190.0).longitude, 170.0);
        assert_eq!(LatLng::new(0.0, 540.0).longitude, -180.0);
        assert_eq!(LatLng::new(12.5, -45.25), LatLng { latitude: 12.5, longitude: -45.25 });
    }

    #[test]
    fn deserialization_does_not_normalize() {
        let rec: MarkerRecord =
            serde_json::from_str(r#"{"title":"X","latLng":{"latitude":120.0,"longitude":200.0}}"#).unwrap();
        assert_eq!(rec.lat_lng.latitude, 120.0);
        assert_eq!(rec.lat_lng.longitude, 200.0);
    }
}
