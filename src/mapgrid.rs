// mapgrid.rs
//
// Copyright (c) 2019-2021  Minnesota Department of Transportation
//
//! TileId, GeoBBox and TileRange structs.
//!
use crate::error::{Error, Result};
use crate::feature::PointFeature;
use crate::geo::{lon_lat_to_mercator, Wgs84Pos};
use pointy::{BBox, Pt};
use std::f64::consts::PI;
use std::fmt;

/// Maximum zoom level which can be addressed
pub const MAX_TILE_ZOOM: u32 = 31;

/// A tile ID identifies a tile on a map grid at a specific zoom level.
///
/// It uses XYZ addressing, with X increasing from west to east and Y increasing
/// from north to south.  The X and Y values can range from 0 to
/// 2<sup>Z</sup>-1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileId {
    x: u32, // not public to prevent invalid values being created
    y: u32,
    z: u32,
}

/// A geographic bounding box in degrees.
///
/// # Example
/// ```
/// # use pointtiles::Error;
/// # fn main() -> Result<(), Error> {
/// use pointtiles::GeoBBox;
///
/// let bbox = GeoBBox::new(139.5, 35.4, 140.0, 35.8)?;
/// assert!(bbox.contains(139.767, 35.681));
/// # Ok(()) }
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoBBox {
    west: f64,
    south: f64,
    east: f64,
    north: f64,
}

/// An inclusive rectangle of tile indices at one zoom level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileRange {
    z: u32,
    x_min: u32,
    x_max: u32,
    y_min: u32,
    y_max: u32,
}

impl TileId {
    /// Create a new TileId.
    ///
    /// If invalid, returns [Error::InvalidTid](enum.Error.html).
    pub fn new(x: u32, y: u32, z: u32) -> Result<Self> {
        TileId::check_valid(x, y, z)?;
        Ok(TileId { x, y, z })
    }

    /// Check whether a tile ID is valid.
    fn check_valid(x: u32, y: u32, z: u32) -> Result<()> {
        if z > MAX_TILE_ZOOM {
            return Err(Error::InvalidTid());
        }
        let s = 1u64 << z;
        if u64::from(x) < s && u64::from(y) < s {
            Ok(())
        } else {
            Err(Error::InvalidTid())
        }
    }

    /// Get the X value.
    pub fn x(&self) -> u32 {
        self.x
    }

    /// Get the Y value.
    pub fn y(&self) -> u32 {
        self.y
    }

    /// Get the Z (zoom) value.
    pub fn z(&self) -> u32 {
        self.z
    }

    /// Get the geographic bounding box of the tile.
    ///
    /// Tile Y grows southward, so the south edge comes from `y + 1` and the
    /// north edge from `y`.
    pub fn geo_bbox(&self) -> GeoBBox {
        let x = u64::from(self.x);
        let y = u64::from(self.y);
        GeoBBox {
            west: tile_x_to_lon(x, self.z),
            south: tile_y_to_lat(y + 1, self.z),
            east: tile_x_to_lon(x + 1, self.z),
            north: tile_y_to_lat(y, self.z),
        }
    }

    /// Get the web mercator bounding box of the tile (meters).
    pub fn mercator_bbox(&self) -> BBox<f64> {
        self.geo_bbox().to_mercator()
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}

impl GeoBBox {
    /// Create a new bounding box.
    ///
    /// Returns [Error::InvalidBBox](enum.Error.html) unless
    /// `west <= east` and `south <= north`.
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Result<Self> {
        if west <= east && south <= north {
            Ok(GeoBBox {
                west,
                south,
                east,
                north,
            })
        } else {
            Err(Error::InvalidBBox())
        }
    }

    /// Compute the envelope of a set of positions.
    ///
    /// Returns `None` if there are no positions.
    pub fn from_positions<I>(positions: I) -> Option<Self>
    where
        I: IntoIterator<Item = Wgs84Pos>,
    {
        positions.into_iter().fold(None, |bbox, pos| {
            let (lon, lat) = (pos.lon(), pos.lat());
            Some(match bbox {
                None => GeoBBox {
                    west: lon,
                    south: lat,
                    east: lon,
                    north: lat,
                },
                Some(b) => GeoBBox {
                    west: b.west.min(lon),
                    south: b.south.min(lat),
                    east: b.east.max(lon),
                    north: b.north.max(lat),
                },
            })
        })
    }

    /// Compute the envelope of a feature collection.
    ///
    /// Returns `None` for an empty collection.
    pub fn from_features(features: &[PointFeature]) -> Option<Self> {
        GeoBBox::from_positions(features.iter().map(PointFeature::pos))
    }

    /// Get the west edge (degrees).
    pub fn west(&self) -> f64 {
        self.west
    }

    /// Get the south edge (degrees).
    pub fn south(&self) -> f64 {
        self.south
    }

    /// Get the east edge (degrees).
    pub fn east(&self) -> f64 {
        self.east
    }

    /// Get the north edge (degrees).
    pub fn north(&self) -> f64 {
        self.north
    }

    /// Check whether a position is inside the box.
    ///
    /// Edges are inclusive, so a position on an edge shared by two tiles is
    /// contained in both.
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        lon >= self.west
            && lon <= self.east
            && lat >= self.south
            && lat <= self.north
    }

    /// Project the south-west and north-east corners to web mercator.
    pub fn to_mercator(&self) -> BBox<f64> {
        let (x0, y0) = lon_lat_to_mercator(self.west, self.south);
        let (x1, y1) = lon_lat_to_mercator(self.east, self.north);
        BBox::from((Pt::new(x0, y0), Pt::new(x1, y1)))
    }
}

impl TileRange {
    /// Get the zoom level.
    pub fn z(&self) -> u32 {
        self.z
    }

    /// Get the minimum X index.
    pub fn x_min(&self) -> u32 {
        self.x_min
    }

    /// Get the maximum X index.
    pub fn x_max(&self) -> u32 {
        self.x_max
    }

    /// Get the minimum Y index (north).
    pub fn y_min(&self) -> u32 {
        self.y_min
    }

    /// Get the maximum Y index (south).
    pub fn y_max(&self) -> u32 {
        self.y_max
    }

    /// Get the number of tiles in the range.
    pub fn len(&self) -> u64 {
        let w = u64::from(self.x_max - self.x_min) + 1;
        let h = u64::from(self.y_max - self.y_min) + 1;
        w * h
    }

    /// Check whether a tile is inside the range.
    pub fn contains(&self, tid: TileId) -> bool {
        tid.z == self.z
            && tid.x >= self.x_min
            && tid.x <= self.x_max
            && tid.y >= self.y_min
            && tid.y <= self.y_max
    }

    /// Iterate tile IDs in row-major order (north to south, west to east).
    pub fn tiles(&self) -> impl Iterator<Item = TileId> {
        let (z, x_min, x_max) = (self.z, self.x_min, self.x_max);
        (self.y_min..=self.y_max)
            .flat_map(move |y| (x_min..=x_max).map(move |x| TileId { x, y, z }))
    }
}

/// Get the number of tiles along one axis at a zoom level.
fn num_tiles(z: u32) -> f64 {
    2f64.powi(z as i32)
}

/// Get the longitude of the west edge of tile column `x`.
pub fn tile_x_to_lon(x: u64, z: u32) -> f64 {
    x as f64 / num_tiles(z) * 360.0 - 180.0
}

/// Get the latitude of the north edge of tile row `y`.
pub fn tile_y_to_lat(y: u64, z: u32) -> f64 {
    let n = PI - 2.0 * PI * y as f64 / num_tiles(z);
    n.sinh().atan().to_degrees()
}

/// Get the (unclamped) tile column containing a longitude.
pub fn lon_to_tile_x(lon: f64, z: u32) -> i64 {
    ((lon + 180.0) / 360.0 * num_tiles(z)).floor() as i64
}

/// Get the (unclamped) tile row containing a latitude.
pub fn lat_to_tile_y(lat: f64, z: u32) -> i64 {
    let lat_rad = lat.to_radians();
    let y = (1.0 - lat_rad.tan().asinh() / PI) / 2.0;
    (y * num_tiles(z)).floor() as i64
}

/// Project a position to tile-local coördinates.
///
/// * `lon` Longitude (degrees).
/// * `lat` Latitude (degrees).
/// * `extent` Height / width of tile bounds.
/// * `bbox` Web mercator bounding box of the tile.
///
/// Y is inverted so that north maps to 0.  Values are floored, so a position
/// on the east or south edge maps to `extent` itself.
pub fn project_to_tile(
    lon: f64,
    lat: f64,
    extent: u32,
    bbox: &BBox<f64>,
) -> Result<(i64, i64)> {
    let (mx, my) = lon_lat_to_mercator(lon, lat);
    let width = bbox.x_max() - bbox.x_min();
    let height = bbox.y_max() - bbox.y_min();
    let x_rel = (mx - bbox.x_min()) / width;
    let y_rel = (bbox.y_max() - my) / height;
    let ext = f64::from(extent);
    let x = (x_rel * ext).floor();
    let y = (y_rel * ext).floor();
    if x.is_finite() && y.is_finite() {
        Ok((x as i64, y as i64))
    } else {
        Err(Error::InvalidCoordinate(lon, lat))
    }
}

/// Resolve the range of tiles intersecting a bounding box at one zoom level.
///
/// Returns `Ok(None)` if no tile at this zoom intersects the box (the zoom
/// level should be skipped).
///
/// A box lying wholly outside the grid is rejected *before* its tile
/// indices are clamped.  For example, a box entirely north of the mercator
/// limit (85.0511°) yields `None`, not row 0.  Clamping such a box would
/// only produce tiles whose bounds cannot contain any of its points.
pub fn tile_range(bbox: &GeoBBox, z: u32) -> Result<Option<TileRange>> {
    if z > MAX_TILE_ZOOM {
        return Err(Error::InvalidZoomRange(z, z));
    }
    let last = (1i64 << z) - 1;
    let x_min = lon_to_tile_x(bbox.west, z);
    let x_max = lon_to_tile_x(bbox.east, z);
    // north gives the minimum row
    let y_min = lat_to_tile_y(bbox.north, z);
    let y_max = lat_to_tile_y(bbox.south, z);
    if x_max < 0 || y_max < 0 || x_min > last || y_min > last {
        return Ok(None);
    }
    let x_min = x_min.clamp(0, last);
    let x_max = x_max.clamp(0, last);
    let y_min = y_min.clamp(0, last);
    let y_max = y_max.clamp(0, last);
    if x_min > x_max || y_min > y_max {
        return Ok(None);
    }
    Ok(Some(TileRange {
        z,
        x_min: x_min as u32,
        x_max: x_max as u32,
        y_min: y_min as u32,
        y_max: y_max as u32,
    }))
}
