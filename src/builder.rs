// builder.rs
//
// Copyright (c) 2021  Minnesota Department of Transportation
//
//! Build the vector tile payload for one tile address.
//!
use crate::config::TileConfig;
use crate::encoder::{encode_point, GeomData};
use crate::error::{Error, Result};
use crate::feature::PointFeature;
use crate::mapgrid::{project_to_tile, TileId};
use crate::tile::encode_layer;

/// Build the payload of one tile.
///
/// * `config` Extent and layer name.
/// * `features` All point features (filtered to the tile here).
/// * `tid` Tile to build.
///
/// Features on an edge shared by two tiles are included in both.  Positions
/// landing on the east or south edge are clamped to `extent - 1`.
///
/// An empty `Vec` means no features intersect the tile, and the tile should
/// be omitted.
///
/// # Example
/// ```
/// # use pointtiles::Error;
/// # fn main() -> Result<(), Error> {
/// use pointtiles::{build_tile, PointFeature, TileConfig, TileId};
///
/// let config = TileConfig::default();
/// let features = vec![PointFeature::new(139.767, 35.681)?];
/// let data = build_tile(&config, &features, TileId::new(909, 403, 10)?)?;
/// assert!(!data.is_empty());
/// let data = build_tile(&config, &features, TileId::new(0, 0, 10)?)?;
/// assert!(data.is_empty());
/// # Ok(()) }
/// ```
pub fn build_tile(
    config: &TileConfig,
    features: &[PointFeature],
    tid: TileId,
) -> Result<Vec<u8>> {
    build_tile_from(config, features, tid)
}

/// Build the payload of one tile from any sequence of features.
///
/// Feature order is kept in the encoded layer.
pub(crate) fn build_tile_from<'f, I>(
    config: &TileConfig,
    features: I,
    tid: TileId,
) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = &'f PointFeature>,
{
    if config.extent == 0 {
        return Err(Error::InvalidExtent());
    }
    let geo_bbox = tid.geo_bbox();
    let merc_bbox = geo_bbox.to_mercator();
    let max = i64::from(config.extent) - 1;
    let mut geoms: Vec<GeomData> = vec![];
    for feature in features {
        let (lon, lat) = (feature.lon(), feature.lat());
        if !geo_bbox.contains(lon, lat) {
            continue;
        }
        let (x, y) = project_to_tile(lon, lat, config.extent, &merc_bbox)?;
        geoms.push(encode_point(x.clamp(0, max), y.clamp(0, max))?);
    }
    if geoms.is_empty() {
        return Ok(vec![]);
    }
    debug!("tile {}: {} features", tid, geoms.len());
    encode_layer(&geoms, &config.layer_name, config.extent)
}
