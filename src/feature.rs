// feature.rs
//
// Copyright (c) 2021  Minnesota Department of Transportation
//
//! Point features to be tiled.
//!
use crate::error::Result;
use crate::geo::Wgs84Pos;
use serde_json::{Map, Value};

/// A geo-referenced point with free-form properties.
///
/// Properties are carried along but never written to tiles.
#[derive(Clone, Debug, PartialEq)]
pub struct PointFeature {
    pos: Wgs84Pos,
    properties: Map<String, Value>,
}

impl PointFeature {
    /// Create a new point feature.
    ///
    /// * `lon` Longitude (degrees).
    /// * `lat` Latitude (degrees).
    ///
    /// Returns [Error::InvalidCoordinate](enum.Error.html) for non-finite
    /// values, poles or out of range longitude.
    pub fn new(lon: f64, lat: f64) -> Result<Self> {
        let pos = Wgs84Pos::new(lon, lat).map_err(|e| {
            warn!("rejected feature: {}", e);
            e
        })?;
        Ok(PointFeature {
            pos,
            properties: Map::new(),
        })
    }

    /// Attach properties.
    pub fn with_properties(mut self, properties: Map<String, Value>) -> Self {
        self.properties = properties;
        self
    }

    /// Get the position.
    pub fn pos(&self) -> Wgs84Pos {
        self.pos
    }

    /// Get the longitude (degrees).
    pub fn lon(&self) -> f64 {
        self.pos.lon()
    }

    /// Get the latitude (degrees).
    pub fn lat(&self) -> f64 {
        self.pos.lat()
    }

    /// Get the properties.
    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }
}
