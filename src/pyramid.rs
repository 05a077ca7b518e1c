// pyramid.rs
//
// Copyright (c) 2021  Minnesota Department of Transportation
//
//! Build every tile of a zoom range for a feature collection.
//!
use crate::builder::build_tile_from;
use crate::config::TileConfig;
use crate::error::Result;
use crate::feature::PointFeature;
use crate::mapgrid::{
    lat_to_tile_y, lon_to_tile_x, tile_range, GeoBBox, TileId, TileRange,
};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::convert::TryFrom;
use std::io;

/// Features grouped by candidate tile, keyed by (row, column)
type Candidates<'a> = BTreeMap<(u32, u32), (TileId, Vec<&'a PointFeature>)>;

/// Destination for encoded tiles.
///
/// Implemented for closures, so a directory writer can be as simple as
/// `|tid, data| std::fs::write(path_for(tid), data)`.
pub trait TileSink {
    /// Write one non-empty tile.
    fn write_tile(&mut self, tid: TileId, data: Vec<u8>) -> io::Result<()>;
}

impl<F> TileSink for F
where
    F: FnMut(TileId, Vec<u8>) -> io::Result<()>,
{
    fn write_tile(&mut self, tid: TileId, data: Vec<u8>) -> io::Result<()> {
        self(tid, data)
    }
}

/// A tile pyramid over a point feature collection.
///
/// # Example
/// ```
/// # use pointtiles::Error;
/// # fn main() -> Result<(), Error> {
/// use pointtiles::{PointFeature, Pyramid, TileConfig, TileId};
/// use std::io;
///
/// let config = TileConfig::default().with_zoom_range(0, 4);
/// let features = vec![PointFeature::new(139.767, 35.681)?];
/// let pyramid = Pyramid::new(config, &features)?;
/// let mut count = 0;
/// pyramid.write_to(&mut |_tid: TileId, _data: Vec<u8>| -> io::Result<()> {
///     count += 1;
///     Ok(())
/// })?;
/// assert_eq!(count, 5);
/// # Ok(()) }
/// ```
pub struct Pyramid<'a> {
    config: TileConfig,
    features: &'a [PointFeature],
    bbox: Option<GeoBBox>,
}

impl<'a> Pyramid<'a> {
    /// Create a new pyramid.
    ///
    /// The configuration is validated before any tile is built.
    pub fn new(config: TileConfig, features: &'a [PointFeature]) -> Result<Self> {
        config.validate()?;
        let bbox = GeoBBox::from_features(features);
        Ok(Pyramid {
            config,
            features,
            bbox,
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &TileConfig {
        &self.config
    }

    /// Get the envelope of all features.
    pub fn bbox(&self) -> Option<GeoBBox> {
        self.bbox
    }

    /// Get the tiles which may hold features at one zoom level.
    ///
    /// Only the tile containing each feature and its eight neighbors are
    /// considered, so the count is bounded by the number of features rather
    /// than the size of the tile range.  Tiles are in row-major order.
    pub fn tiles(&self, z: u32) -> Result<Vec<TileId>> {
        Ok(self.candidates(z)?.values().map(|(tid, _)| *tid).collect())
    }

    /// Group features by candidate tile.
    ///
    /// A feature on a shared edge lands in more than one group; the
    /// containment test in the builder decides which tiles it belongs to.
    fn candidates(&self, z: u32) -> Result<Candidates<'a>> {
        let mut candidates = Candidates::new();
        let range = match self.bbox {
            Some(bbox) => tile_range(&bbox, z)?,
            None => None,
        };
        let range = match range {
            Some(range) => range,
            None => return Ok(candidates),
        };
        for feature in self.features {
            let x = lon_to_tile_x(feature.lon(), z);
            let y = lat_to_tile_y(feature.lat(), z);
            for ty in y - 1..=y + 1 {
                for tx in x - 1..=x + 1 {
                    if let Some(tid) = neighbor(&range, tx, ty) {
                        candidates
                            .entry((tid.y(), tid.x()))
                            .or_insert_with(|| (tid, vec![]))
                            .1
                            .push(feature);
                    }
                }
            }
        }
        Ok(candidates)
    }

    /// Build all non-empty tiles of one zoom level.
    ///
    /// Tiles are built in parallel; the result is in row-major order.
    pub fn build_zoom(&self, z: u32) -> Result<Vec<(TileId, Vec<u8>)>> {
        let candidates: Vec<_> = self.candidates(z)?.into_values().collect();
        debug!("zoom {}: {} candidate tiles", z, candidates.len());
        candidates
            .into_par_iter()
            .filter_map(|(tid, features)| {
                match build_tile_from(&self.config, features, tid) {
                    Ok(data) if data.is_empty() => None,
                    res => Some(res.map(|data| (tid, data))),
                }
            })
            .collect()
    }

    /// Build every zoom level and hand each non-empty tile to a sink.
    ///
    /// Returns the number of tiles written.
    pub fn write_to<S: TileSink>(&self, sink: &mut S) -> Result<usize> {
        let mut total = 0;
        for z in self.config.min_zoom..=self.config.max_zoom {
            let tiles = self.build_zoom(z)?;
            info!("zoom {}: {} tiles", z, tiles.len());
            for (tid, data) in tiles {
                sink.write_tile(tid, data)?;
                total += 1;
            }
        }
        if self.bbox.is_none() {
            warn!("no features to tile");
        }
        Ok(total)
    }
}

/// Get a neighboring tile, if it lies within a range.
fn neighbor(range: &TileRange, x: i64, y: i64) -> Option<TileId> {
    let x = u32::try_from(x).ok()?;
    let y = u32::try_from(y).ok()?;
    let tid = TileId::new(x, y, range.z()).ok()?;
    if range.contains(tid) {
        Some(tid)
    } else {
        None
    }
}
