//! TerrainGrid: loaded heightmap with elevation queries, addressed directly
//! by geodetic lat/lon (no intermediate local-Cartesian projection).

use tacsim_core::types::GeodeticPosition;

/// Terrain grid header metadata.
#[derive(Debug, Clone)]
pub struct TerrainHeader {
    /// Southwest corner latitude (degrees).
    pub origin_lat: f64,
    /// Southwest corner longitude (degrees).
    pub origin_lon: f64,
    /// Arc-seconds per grid cell.
    pub cell_size: f64,
    /// Number of columns (west to east).
    pub width: u32,
    /// Number of rows (north to south).
    pub height: u32,
    /// Minimum elevation in the grid (meters).
    pub min_elevation: i16,
    /// Maximum elevation in the grid (meters).
    pub max_elevation: i16,
}

impl TerrainHeader {
    /// North edge latitude (degrees).
    pub fn north_lat(&self) -> f64 {
        self.origin_lat + (self.height as f64 * self.cell_size) / 3600.0
    }

    /// East edge longitude (degrees).
    pub fn east_lon(&self) -> f64 {
        self.origin_lon + (self.width as f64 * self.cell_size) / 3600.0
    }
}

/// Loaded terrain heightmap grid.
#[derive(Debug, Clone)]
pub struct TerrainGrid {
    pub header: TerrainHeader,
    /// Elevation values in meters, row-major (north-to-south, west-to-east).
    pub elevations: Vec<i16>,
    /// Packed ocean mask: bit 1 = land, bit 0 = ocean. One bit per cell.
    pub ocean_mask: Option<Vec<u8>>,
}

impl TerrainGrid {
    pub fn new(header: TerrainHeader, elevations: Vec<i16>, ocean_mask: Option<Vec<u8>>) -> Self {
        Self {
            header,
            elevations,
            ocean_mask,
        }
    }

    /// Convert lat/lon (degrees) to grid row/col (fractional). `None` if outside bounds.
    fn geo_to_grid(&self, lat_deg: f64, lon_deg: f64) -> Option<(f64, f64)> {
        let h = &self.header;
        let col = (lon_deg - h.origin_lon) * 3600.0 / h.cell_size;
        let row = (h.north_lat() - lat_deg) * 3600.0 / h.cell_size;

        if col < 0.0 || row < 0.0 || col >= h.width as f64 || row >= h.height as f64 {
            return None;
        }
        Some((row, col))
    }

    fn raw_elevation(&self, row: usize, col: usize) -> i16 {
        let h = &self.header;
        if row >= h.height as usize || col >= h.width as usize {
            return 0;
        }
        self.elevations[row * h.width as usize + col]
    }

    /// Elevation at a geodetic position with bilinear interpolation.
    pub fn elevation_at(&self, pos: &GeodeticPosition) -> Option<f64> {
        self.elevation_at_geo(pos.lat.to_degrees(), pos.lon.to_degrees())
    }

    /// Elevation at lat/lon in degrees, bilinear interpolation.
    pub fn elevation_at_geo(&self, lat_deg: f64, lon_deg: f64) -> Option<f64> {
        let (row, col) = self.geo_to_grid(lat_deg, lon_deg)?;
        Some(self.bilinear(row, col))
    }

    fn bilinear(&self, row: f64, col: f64) -> f64 {
        let r0 = row.floor() as usize;
        let c0 = col.floor() as usize;
        let r1 = (r0 + 1).min(self.header.height as usize - 1);
        let c1 = (c0 + 1).min(self.header.width as usize - 1);

        let fr = row - r0 as f64;
        let fc = col - c0 as f64;

        let e00 = self.raw_elevation(r0, c0) as f64;
        let e01 = self.raw_elevation(r0, c1) as f64;
        let e10 = self.raw_elevation(r1, c0) as f64;
        let e11 = self.raw_elevation(r1, c1) as f64;

        let top = e00 * (1.0 - fc) + e01 * fc;
        let bot = e10 * (1.0 - fc) + e11 * fc;
        top * (1.0 - fr) + bot * fr
    }

    /// Whether a geodetic position is over ocean (mask if present, else elevation <= 0).
    pub fn is_ocean(&self, pos: &GeodeticPosition) -> bool {
        if let Some(ref mask) = self.ocean_mask {
            if let Some((row, col)) = self.geo_to_grid(pos.lat.to_degrees(), pos.lon.to_degrees()) {
                let r = row.round() as usize;
                let c = col.round() as usize;
                let idx = r * self.header.width as usize + c;
                let byte_idx = idx / 8;
                let bit_idx = idx % 8;
                if byte_idx < mask.len() {
                    return mask[byte_idx] & (1 << bit_idx) == 0;
                }
            }
            return true;
        }
        self.elevation_at(pos).is_none_or(|e| e <= 0.0)
    }

    /// Downsample the elevation grid to a target resolution.
    pub fn downsample(&self, target_width: u32, target_height: u32) -> Vec<i16> {
        let h = &self.header;
        let mut result = Vec::with_capacity((target_width * target_height) as usize);
        for tr in 0..target_height {
            for tc in 0..target_width {
                let sr = (tr as f64 / target_height as f64) * h.height as f64;
                let sc = (tc as f64 / target_width as f64) * h.width as f64;
                result.push(self.bilinear(sr, sc) as i16);
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_grid() -> TerrainGrid {
        let cell_size = 1.0;
        let width = 5u32;
        let height = 5u32;
        let origin_lat = 26.5 - (height as f64 * cell_size / 3600.0) / 2.0;
        let origin_lon = 56.2 - (width as f64 * cell_size / 3600.0) / 2.0;

        #[rustfmt::skip]
        let elevations: Vec<i16> = vec![
            0,   0,   0,   0,   0,
            0,  50,  50,  50,   0,
            0,  50, 100,  50,   0,
            0,  50,  50,  50,   0,
            0,   0,   0,   0,   0,
        ];

        TerrainGrid::new(
            TerrainHeader {
                origin_lat,
                origin_lon,
                cell_size,
                width,
                height,
                min_elevation: 0,
                max_elevation: 100,
            },
            elevations,
            None,
        )
    }

    #[test]
    fn test_elevation_query_center() {
        let grid = make_test_grid();
        let h = &grid.header;
        let peak_lat = h.north_lat() - 2.0 * h.cell_size / 3600.0;
        let peak_lon = h.origin_lon + 2.0 * h.cell_size / 3600.0;
        let elev = grid.elevation_at_geo(peak_lat, peak_lon);
        assert!(elev.is_some());
        assert!((elev.unwrap() - 100.0).abs() < 1.0);
    }

    #[test]
    fn test_elevation_query_outside_grid() {
        let grid = make_test_grid();
        assert!(grid.elevation_at_geo(10.0, 10.0).is_none());
    }

    #[test]
    fn test_elevation_bilinear_interpolation() {
        let grid = make_test_grid();
        let h = &grid.header;
        let lat = h.north_lat() - 1.5 * h.cell_size / 3600.0;
        let lon = h.origin_lon + 2.0 * h.cell_size / 3600.0;
        let elev = grid.elevation_at_geo(lat, lon).unwrap();
        assert!((elev - 75.0).abs() < 1.0, "got {elev}");
    }

    #[test]
    fn test_is_ocean_no_mask() {
        let grid = make_test_grid();
        let center = GeodeticPosition::new(26.5_f64.to_radians(), 56.2_f64.to_radians(), 0.0);
        assert!(!grid.is_ocean(&center));
    }

    #[test]
    fn test_downsample() {
        let grid = make_test_grid();
        let ds = grid.downsample(3, 3);
        assert_eq!(ds.len(), 9);
        assert!(ds[4] > 50);
    }
}
