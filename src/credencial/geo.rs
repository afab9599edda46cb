//! GPS helpers for the check-in flow.

/// Maximum allowed distance between the delegate and the voting center of
/// the JRV named in the credential.
pub const MAX_DISTANCE_KM: f64 = 20.0;

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine great-circle distance in meters.
#[must_use]
pub fn distance_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_phi = (lat2 - lat1).to_radians();
    let delta_lambda = (lon2 - lon1).to_radians();

    let a = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Honduras bounding box: 13.0-16.5 N, 89.5-83.0 W.
#[must_use]
pub fn within_honduras(lat: f64, lng: f64) -> bool {
    (13.0..=16.5).contains(&lat) && (-89.5..=-83.0).contains(&lng)
}
