// config.rs
//
// Copyright (c) 2021  Minnesota Department of Transportation
//
//! Tile encoding configuration.
//!
use crate::error::{Error, Result};
use crate::tile::DEFAULT_EXTENT;

/// Default layer name
pub const DEFAULT_LAYER_NAME: &str = "myLayer";

/// Highest zoom level accepted for a pyramid
pub const MAX_ZOOM: u32 = 24;

/// Configuration for building tiles.
///
/// # Example
/// ```
/// # use pointtiles::Error;
/// # fn main() -> Result<(), Error> {
/// use pointtiles::TileConfig;
///
/// let config = TileConfig::default()
///     .with_layer_name("stations")
///     .with_zoom_range(4, 12);
/// config.validate()?;
/// # Ok(()) }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileConfig {
    /// Height / width of tile bounds
    pub extent: u32,

    /// Name of the (only) layer in each tile
    pub layer_name: String,

    /// Lowest zoom level to build
    pub min_zoom: u32,

    /// Highest zoom level to build
    pub max_zoom: u32,
}

impl Default for TileConfig {
    fn default() -> Self {
        TileConfig {
            extent: DEFAULT_EXTENT,
            layer_name: DEFAULT_LAYER_NAME.to_string(),
            min_zoom: 0,
            max_zoom: 14,
        }
    }
}

impl TileConfig {
    /// Set the extent.
    pub fn with_extent(mut self, extent: u32) -> Self {
        self.extent = extent;
        self
    }

    /// Set the layer name.
    pub fn with_layer_name(mut self, name: &str) -> Self {
        self.layer_name = name.to_string();
        self
    }

    /// Set the zoom range (inclusive).
    pub fn with_zoom_range(mut self, min_zoom: u32, max_zoom: u32) -> Self {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self
    }

    /// Check the configuration.
    ///
    /// Returns an error if:
    /// * the extent is zero
    /// * `min_zoom > max_zoom` or `max_zoom` exceeds [MAX_ZOOM](constant.MAX_ZOOM.html)
    pub fn validate(&self) -> Result<()> {
        if self.extent == 0 {
            return Err(Error::InvalidExtent());
        }
        if self.min_zoom > self.max_zoom || self.max_zoom > MAX_ZOOM {
            return Err(Error::InvalidZoomRange(self.min_zoom, self.max_zoom));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_default() {
        let c = TileConfig::default();
        assert_eq!(c.extent, 4096);
        assert_eq!(c.layer_name, "myLayer");
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_invalid() {
        let c = TileConfig::default().with_extent(0);
        assert!(matches!(c.validate(), Err(Error::InvalidExtent())));
        let c = TileConfig::default().with_zoom_range(5, 4);
        assert!(matches!(c.validate(), Err(Error::InvalidZoomRange(5, 4))));
        let c = TileConfig::default().with_zoom_range(0, 25);
        assert!(matches!(c.validate(), Err(Error::InvalidZoomRange(0, 25))));
        let c = TileConfig::default().with_zoom_range(24, 24);
        assert!(c.validate().is_ok());
    }
}
