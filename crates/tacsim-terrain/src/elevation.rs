//! Elevation-query interface: the "globe elevation" external collaborator
//! consumed by the terrain-following autopilot (§4.7). The globe renderer
//! itself is out of scope; this crate supplies a concrete heightmap-backed
//! implementation so the autopilot has something real to sample.

use tacsim_core::types::GeodeticPosition;

use crate::grid::TerrainGrid;

/// Synchronous elevation sampling. Per §7's `ElevationUnavailable` recovery,
/// callers treat `None` as 0 m MSL rather than propagating an error.
pub trait ElevationProvider {
    fn elevation_at(&self, pos: &GeodeticPosition) -> Option<f64>;
}

impl ElevationProvider for TerrainGrid {
    fn elevation_at(&self, pos: &GeodeticPosition) -> Option<f64> {
        TerrainGrid::elevation_at(self, pos)
    }
}

/// Samples elevation via `provider`, falling back to 0 m MSL when
/// unavailable (spec.md §7 `ElevationUnavailable` recovery).
pub fn sample_or_sea_level(provider: &dyn ElevationProvider, pos: &GeodeticPosition) -> f64 {
    provider.elevation_at(pos).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::TerrainHeader;

    #[test]
    fn test_sample_or_sea_level_falls_back_outside_grid() {
        let grid = TerrainGrid::new(
            TerrainHeader {
                origin_lat: 0.0,
                origin_lon: 0.0,
                cell_size: 1.0,
                width: 2,
                height: 2,
                min_elevation: 0,
                max_elevation: 0,
            },
            vec![0, 0, 0, 0],
            None,
        );
        let far = GeodeticPosition::new(80.0_f64.to_radians(), 80.0_f64.to_radians(), 0.0);
        assert_eq!(sample_or_sea_level(&grid, &far), 0.0);
    }
}
