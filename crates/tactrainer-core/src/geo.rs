//! Geometry primitives shared by every system.
//!
//! Distances and bearings are great-circle (haversine). Motion is NOT: the
//! integrator uses a small-step flat-earth update, see [`flat_earth_step`].

use crate::constants::{EARTH_RADIUS_NM, NM_PER_DEGREE, RADAR_HORIZON_COEFF, SECS_PER_HOUR};
use crate::error::CommandError;
use crate::types::GeoPoint;

/// Great-circle distance between two lat/lon points in nautical miles.
pub fn haversine_distance_nm(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    // Rounding can push `a` just past 1 for antipodal points.
    let a = ((delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2))
    .min(1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_NM * c
}

/// Initial bearing from point 1 to point 2 in degrees (0-360, clockwise from north).
pub fn initial_bearing(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let x = delta_lon.sin() * lat2_rad.cos();
    let y = lat1_rad.cos() * lat2_rad.sin() - lat1_rad.sin() * lat2_rad.cos() * delta_lon.cos();

    normalize_heading(x.atan2(y).to_degrees())
}

/// Wrap any angle into [0, 360).
pub fn normalize_heading(deg: f64) -> f64 {
    let h = deg.rem_euclid(360.0);
    // rem_euclid can return 360.0 for tiny negative inputs
    if h >= 360.0 {
        0.0
    } else {
        h
    }
}

/// Signed shortest turn from `current` to `target`, in (-180, 180].
pub fn shortest_turn(current: f64, target: f64) -> f64 {
    let delta = (target - current).rem_euclid(360.0);
    if delta > 180.0 {
        delta - 360.0
    } else {
        delta
    }
}

/// Absolute angular separation of two bearings, in [0, 180].
pub fn angular_separation(a: f64, b: f64) -> f64 {
    shortest_turn(a, b).abs()
}

/// Advance a position one step along `heading_deg` at `speed_kn` for `dt` seconds.
///
/// Flat-earth: `d = speed/3600*dt`, `dlat = d*cos(h)/60`,
/// `dlon = d*sin(h)/(60*cos(lat))`. Valid only for small steps.
pub fn flat_earth_step(pos: &GeoPoint, heading_deg: f64, speed_kn: f64, dt: f64) -> GeoPoint {
    let distance = speed_kn / SECS_PER_HOUR * dt;
    let heading = heading_deg.to_radians();
    let dlat = distance * heading.cos() / NM_PER_DEGREE;
    let dlon = distance * heading.sin() / (NM_PER_DEGREE * pos.lat.to_radians().cos());
    GeoPoint::new(pos.lat + dlat, pos.lon + dlon)
}

/// Radar horizon in NM for a sensor and target at the given heights (feet).
pub fn radar_horizon_nm(sensor_alt_ft: f64, target_alt_ft: f64) -> f64 {
    RADAR_HORIZON_COEFF * (sensor_alt_ft.max(0.0).sqrt() + target_alt_ft.max(0.0).sqrt())
}

/// Parse degrees-decimal-minutes text such as `26 30.000N 054 00.000E`.
///
/// Hemisphere letters may prefix or suffix each half (`N26 30.0 E054 0.0`).
/// Degree and minute marks are ignored.
pub fn parse_dmm(text: &str) -> Result<GeoPoint, CommandError> {
    let invalid = || CommandError::InvalidCoordinate(text.to_string());

    let mut spaced = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c.to_ascii_uppercase() {
            h @ ('N' | 'S' | 'E' | 'W') => {
                spaced.push(' ');
                spaced.push(h);
                spaced.push(' ');
            }
            '\u{b0}' | '\'' | ',' => spaced.push(' '),
            other => spaced.push(other),
        }
    }
    let tokens: Vec<&str> = spaced.split_whitespace().collect();
    let is_hemi = |t: &str| matches!(t, "N" | "S" | "E" | "W");
    let hemis: Vec<usize> = (0..tokens.len()).filter(|&i| is_hemi(tokens[i])).collect();
    if hemis.len() != 2 {
        return Err(invalid());
    }
    let (h1, h2) = (hemis[0], hemis[1]);

    let (lat_nums, lon_nums) = if h1 == 0 {
        (&tokens[1..h2], &tokens[h2 + 1..])
    } else {
        if h2 != tokens.len() - 1 {
            return Err(invalid());
        }
        (&tokens[..h1], &tokens[h1 + 1..h2])
    };

    let lat_sign = match tokens[h1] {
        "N" => 1.0,
        "S" => -1.0,
        _ => return Err(invalid()),
    };
    let lon_sign = match tokens[h2] {
        "E" => 1.0,
        "W" => -1.0,
        _ => return Err(invalid()),
    };

    let lat = lat_sign * dmm_value(lat_nums, 90.0).ok_or_else(invalid)?;
    let lon = lon_sign * dmm_value(lon_nums, 180.0).ok_or_else(invalid)?;
    Ok(GeoPoint::new(lat, lon))
}

fn dmm_value(nums: &[&str], max_deg: f64) -> Option<f64> {
    let [deg, min] = nums else {
        return None;
    };
    let deg: u32 = deg.parse().ok()?;
    let min: f64 = min.parse().ok()?;
    if !(0.0..60.0).contains(&min) {
        return None;
    }
    let value = deg as f64 + min / 60.0;
    (value <= max_deg).then_some(value)
}

/// Format a point as degrees-decimal-minutes, e.g. `26 30.000N 054 00.000E`.
pub fn format_dmm(point: &GeoPoint) -> String {
    let (lat_deg, lat_min) = split_dmm(point.lat.abs());
    let (lon_deg, lon_min) = split_dmm(point.lon.abs());
    let ns = if point.lat < 0.0 { 'S' } else { 'N' };
    let ew = if point.lon < 0.0 { 'W' } else { 'E' };
    format!("{lat_deg:02} {lat_min:06.3}{ns} {lon_deg:03} {lon_min:06.3}{ew}")
}

fn split_dmm(value: f64) -> (u32, f64) {
    let mut deg = value.trunc() as u32;
    let mut min = ((value - deg as f64) * 60.0 * 1000.0).round() / 1000.0;
    if min >= 60.0 {
        deg += 1;
        min = 0.0;
    }
    (deg, min)
}
