// lib.rs      pointtiles crate.
//
// Copyright (c) 2019-2021  Minnesota Department of Transportation
//
//! A library for encoding point features into
//! [mapbox vector tiles](https://github.com/mapbox/vector-tile-spec) (MVT).
//!
//! Each tile holds one layer of POINT features, without attributes.
//!
//! # Example
//! ```
//! # use pointtiles::Error;
//! # fn main() -> Result<(), Error> {
//! use pointtiles::{build_tile, tile_range, GeoBBox, PointFeature, TileConfig};
//!
//! let config = TileConfig::default();
//! let features = vec![PointFeature::new(139.767, 35.681)?];
//! let bbox = GeoBBox::from_features(&features).ok_or(Error::InvalidBBox())?;
//! if let Some(range) = tile_range(&bbox, 10)? {
//!     for tid in range.tiles() {
//!         let data = build_tile(&config, &features, tid)?;
//!         assert!(!data.is_empty());
//!     }
//! }
//! # Ok(()) }
//! ```
#![forbid(unsafe_code)]

#[macro_use]
extern crate log;

mod builder;
mod config;
mod encoder;
mod error;
mod feature;
mod geo;
mod mapgrid;
mod pyramid;
mod tile;
pub mod wire;

pub use crate::builder::build_tile;
pub use crate::config::{TileConfig, DEFAULT_LAYER_NAME, MAX_ZOOM};
pub use crate::encoder::{encode_point, GeomData, GeomEncoder, GeomType};
pub use crate::error::{Error, Result};
pub use crate::feature::PointFeature;
pub use crate::geo::{lon_lat_to_mercator, WebMercatorPos, Wgs84Pos};
pub use crate::mapgrid::{
    lat_to_tile_y, lon_to_tile_x, project_to_tile, tile_range, tile_x_to_lon,
    tile_y_to_lat, GeoBBox, TileId, TileRange, MAX_TILE_ZOOM,
};
pub use crate::pyramid::{Pyramid, TileSink};
pub use crate::tile::{encode_feature, encode_layer, Layer, DEFAULT_EXTENT};
