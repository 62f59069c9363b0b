//! Line-of-sight calculation with terrain occlusion.
//!
//! Stepped ray traversal with Earth curvature correction via the standard
//! 4/3-Earth-radius atmospheric refraction model.

use tacsim_core::constants::{EFFECTIVE_EARTH_RADIUS_M, TERRAIN_LOS_SAMPLE_INTERVAL};
use tacsim_core::types::GeodeticPosition;

use crate::grid::TerrainGrid;

/// Checks line-of-sight between two geodetic positions, accounting for
/// terrain and Earth curvature. Returns true if there is clear LOS.
pub fn has_line_of_sight(grid: &TerrainGrid, from: &GeodeticPosition, to: &GeodeticPosition) -> bool {
    let horiz_dist = from.horizontal_range_to(to);

    if horiz_dist < TERRAIN_LOS_SAMPLE_INTERVAL {
        return true;
    }

    let bearing = from.bearing_to(to);
    let num_samples = (horiz_dist / TERRAIN_LOS_SAMPLE_INTERVAL).ceil().max(2.0) as usize;

    for i in 1..num_samples {
        let t = i as f64 / num_samples as f64;
        let d = horiz_dist * t;

        let sample_pos = destination_point(from, bearing, d);
        let ray_height = from.alt + (to.alt - from.alt) * t;

        let d_from = d;
        let d_to = horiz_dist - d;
        let earth_drop = (d_from * d_to) / (2.0 * EFFECTIVE_EARTH_RADIUS_M);

        let terrain_elev = grid.elevation_at(&sample_pos).unwrap_or(0.0);
        let effective_terrain = terrain_elev - earth_drop;

        if effective_terrain > ray_height {
            return false;
        }
    }

    true
}

/// Great-circle destination point from `origin`, given initial bearing and distance.
fn destination_point(origin: &GeodeticPosition, bearing: f64, distance_m: f64) -> GeodeticPosition {
    let r = tacsim_core::constants::EARTH_RADIUS_M;
    let delta = distance_m / r;
    let (sin_lat1, cos_lat1) = origin.lat.sin_cos();
    let (sin_delta, cos_delta) = delta.sin_cos();

    let lat2 = (sin_lat1 * cos_delta + cos_lat1 * sin_delta * bearing.cos()).asin();
    let lon2 = origin.lon
        + (bearing.sin() * sin_delta * cos_lat1).atan2(cos_delta - sin_lat1 * lat2.sin());

    GeodeticPosition::new(lat2, lon2, origin.alt)
}
