// geo.rs
//
// Copyright (C) 2019-2024  Minnesota Department of Transportation
//
//! Geographic positions and spherical mercator projection.
//!
use crate::error::{Error, Result};
use std::f64::consts::PI;

/// WGS-84 (EPSG:4326) position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wgs84Pos {
    /// Longitude (degrees)
    lon: f64,
    /// Latitude (degrees)
    lat: f64,
}

/// Web mercator (EPSG:3857) position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WebMercatorPos {
    /// X coordinate (meters)
    pub x: f64,
    /// Y coordinate (meters)
    pub y: f64,
}

impl Wgs84Pos {
    /// Create a new WGS-84 position.
    ///
    /// * `lon` Longitude in degrees, from -180 to 180.
    /// * `lat` Latitude in degrees, strictly between -90 and 90.
    ///
    /// Poles have no mercator Y, so they are rejected along with non-finite
    /// values with [Error::InvalidCoordinate](enum.Error.html).
    pub fn new(lon: f64, lat: f64) -> Result<Self> {
        if !lon.is_finite() || !lat.is_finite() {
            return Err(Error::InvalidCoordinate(lon, lat));
        }
        if lon < -180.0 || lon > 180.0 || lat <= -90.0 || lat >= 90.0 {
            return Err(Error::InvalidCoordinate(lon, lat));
        }
        Ok(Wgs84Pos { lon, lat })
    }

    /// Get the longitude in degrees
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Get the latitude in degrees
    pub fn lat(&self) -> f64 {
        self.lat
    }
}

impl WebMercatorPos {
    /// Half size of map (meters)
    pub const HALF_SIZE_M: f64 = 20_037_508.34;

    /// Create a new web mercator position
    pub fn new(x: f64, y: f64) -> Self {
        WebMercatorPos { x, y }
    }
}

impl From<Wgs84Pos> for WebMercatorPos {
    fn from(pos: Wgs84Pos) -> Self {
        let (x, y) = lon_lat_to_mercator(pos.lon, pos.lat);
        WebMercatorPos::new(x, y)
    }
}

/// Project longitude / latitude (degrees) to web mercator meters.
///
/// No range checks are done here: at the poles `y` is infinite, so use
/// [Wgs84Pos::new](struct.Wgs84Pos.html#method.new) to validate input first.
pub fn lon_lat_to_mercator(lon: f64, lat: f64) -> (f64, f64) {
    let half = WebMercatorPos::HALF_SIZE_M;
    let x = lon * half / 180.0;
    let y = ((90.0 + lat) * PI / 360.0).tan().ln() / (PI / 180.0);
    (x, y * half / 180.0)
}
