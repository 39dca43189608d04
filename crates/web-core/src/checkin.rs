//! The arithmetic behind a QR check-in: payload freshness and the
//! classroom geofence. Everything here is pure so both the server and
//! any client can agree on the same answers.

/// How long an issued QR code stays scannable.
pub const QR_VALIDITY_MILLIS: i64 = 30 * 60 * 1000;

/// How far from the embedded reference point a check-in may happen.
pub const GEOFENCE_RADIUS_METERS: f64 = 50.0;

const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

#[derive(Clone, Copy, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// The JSON blob embedded in a lecture's QR code. Unsigned and therefore
/// client-trusted; forgeable by construction.
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QrPayload {
    pub class_id: i32,
    pub lecture_id: i32,
    /// Epoch milliseconds at issuance.
    pub timestamp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lecture_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
}

impl QrPayload {
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn decode(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Valid for exactly `QR_VALIDITY_MILLIS` after issuance, boundary
    /// inclusive. No grace period, no clock-skew tolerance.
    pub fn is_fresh(&self, now_millis: i64) -> bool {
        now_millis - self.timestamp <= QR_VALIDITY_MILLIS
    }
}

/// Great-circle distance in metres between two degree-valued coordinates.
pub fn haversine_distance_meters(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);

    // Rounding can nudge h past 1.0 for near-antipodal points, and asin of
    // anything above 1.0 is NaN.
    2.0 * EARTH_RADIUS_METERS * h.sqrt().min(1.0).asin()
}

pub fn within_geofence(distance_meters: f64) -> bool {
    distance_meters <= GEOFENCE_RADIUS_METERS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(timestamp: i64) -> QrPayload {
        QrPayload {
            class_id: 1,
            lecture_id: 2,
            timestamp,
            lecture_name: None,
            teacher_name: None,
            location: None,
        }
    }

    #[test]
    fn qr_fresh_within_window() {
        assert!(payload(0).is_fresh(0));
        assert!(payload(0).is_fresh(29 * 60 * 1000));
    }

    #[test]
    fn qr_fresh_at_exact_boundary() {
        assert!(payload(0).is_fresh(QR_VALIDITY_MILLIS));
    }

    #[test]
    fn qr_stale_past_boundary() {
        assert!(!payload(0).is_fresh(QR_VALIDITY_MILLIS + 1));
        assert!(!payload(0).is_fresh(i64::MAX));
    }

    #[test]
    fn haversine_zero_for_identical_points() {
        let p = GeoPoint { lat: 12.97, lng: 77.59 };
        assert_eq!(haversine_distance_meters(p, p), 0.0);
    }

    #[test]
    fn haversine_is_symmetric() {
        let a = GeoPoint { lat: 51.5, lng: -0.12 };
        let b = GeoPoint { lat: 48.85, lng: 2.35 };
        let forward = haversine_distance_meters(a, b);
        let backward = haversine_distance_meters(b, a);
        assert!((forward - backward).abs() < 1e-6);
    }

    #[test]
    fn haversine_one_degree_of_latitude() {
        let a = GeoPoint { lat: 0.0, lng: 0.0 };
        let b = GeoPoint { lat: 1.0, lng: 0.0 };
        let distance = haversine_distance_meters(a, b);
        assert!((distance - 111_000.0).abs() <= 500.0, "got {}", distance);
    }

    #[test]
    fn haversine_is_finite_for_antipodal_points() {
        let a = GeoPoint { lat: 0.0, lng: 0.0 };
        let b = GeoPoint { lat: 0.0, lng: 180.0 };
        let distance = haversine_distance_meters(a, b);
        assert!(distance.is_finite(), "got {}", distance);
        // Half the Earth's circumference.
        assert!(
            (distance - std::f64::consts::PI * 6_371_000.0).abs() < 1_000.0,
            "got {}",
            distance
        );
    }

    #[test]
    fn geofence_boundary_is_inclusive() {
        assert!(within_geofence(0.0));
        assert!(within_geofence(50.0));
        assert!(!within_geofence(50.01));
    }

    #[test]
    fn payload_round_trips_with_camel_case_keys() {
        let text = r#"{"classId":7,"lectureId":9,"timestamp":1700000000000,"location":{"lat":1.5,"lng":2.5}}"#;
        let payload = QrPayload::decode(text).unwrap();
        assert_eq!(payload.class_id, 7);
        assert_eq!(payload.lecture_id, 9);
        assert_eq!(payload.location.unwrap().lat, 1.5);

        let encoded = payload.encode().unwrap();
        assert!(encoded.contains("\"classId\":7"));
        assert!(encoded.contains("\"lectureId\":9"));
    }
}
