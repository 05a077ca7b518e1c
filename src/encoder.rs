// encoder.rs
//
// Copyright (c) 2019-2021  Minnesota Department of Transportation
//
//! Encoder for Mapbox Vector Tile (MVT) geometry.
//!
use crate::error::{Error, Result};
use crate::wire::zigzag;
use std::convert::TryFrom;

#[derive(Copy, Clone, Debug)]
enum Command {
    MoveTo = 1,
}

#[derive(Copy, Clone, Debug)]
struct CommandInt {
    id: Command,
    count: u32,
}

/// Geometry types for [Features](fn.encode_feature.html).
///
/// Only points are produced by the [GeomEncoder](struct.GeomEncoder.html);
/// the other types keep the feature `type` field complete.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeomType {
    /// Point or multipoint
    Point,

    /// Linestring or Multilinestring
    Linestring,

    /// Polygon or Multipolygon
    Polygon,
}

/// Encoder for point [Feature](fn.encode_feature.html) geometry.
///
/// Coördinates must already be tile-local integers; no clamping is done here.
///
/// # Example
/// ```
/// # use pointtiles::Error;
/// # fn main() -> Result<(), Error> {
/// use pointtiles::GeomEncoder;
///
/// let geom_data = GeomEncoder::new()
///     .point(25, 17)?
///     .encode()?;
/// assert_eq!(geom_data.as_slice(), &[9, 50, 34]);
/// # Ok(()) }
/// ```
#[derive(Debug, Default)]
pub struct GeomEncoder {
    x: i32,
    y: i32,
    cmd_offset: usize,
    count: u32,
    data: Vec<u32>,
}

/// Validated geometry data (a command stream) for features.
///
/// Use [GeomEncoder](struct.GeomEncoder.html) to encode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeomData {
    geom_tp: GeomType,
    data: Vec<u32>,
}

impl GeomType {
    /// Get the `type` value of a vector tile feature.
    pub fn as_u32(self) -> u32 {
        match self {
            GeomType::Point => 1,
            GeomType::Linestring => 2,
            GeomType::Polygon => 3,
        }
    }
}

impl CommandInt {
    fn new(id: Command, count: u32) -> Self {
        CommandInt { id, count }
    }

    fn encode(&self) -> u32 {
        ((self.id as u32) & 0x7) | (self.count << 3)
    }
}

impl GeomEncoder {
    /// Create a new point geometry encoder.
    pub fn new() -> Self {
        GeomEncoder::default()
    }

    /// Add a Command
    fn command(&mut self, cmd: Command, count: u32) {
        self.cmd_offset = self.data.len();
        debug!("command: {:?}", &cmd);
        self.data.push(CommandInt::new(cmd, count).encode());
    }

    /// Set count of the most recent Command.
    fn set_command(&mut self, cmd: Command, count: u32) {
        let off = self.cmd_offset;
        self.data[off] = CommandInt::new(cmd, count).encode();
    }

    /// Push one point with coördinates relative to the previous one.
    fn push_point(&mut self, x: i64, y: i64) -> Result<()> {
        let x = i32::try_from(x).map_err(|_| Error::EncodingOverflow())?;
        let y = i32::try_from(y).map_err(|_| Error::EncodingOverflow())?;
        let dx = x.checked_sub(self.x).ok_or(Error::EncodingOverflow())?;
        let dy = y.checked_sub(self.y).ok_or(Error::EncodingOverflow())?;
        self.data.push(zigzag(dx));
        self.data.push(zigzag(dy));
        debug!("point: {},{}", x, y);
        self.x = x;
        self.y = y;
        Ok(())
    }

    /// Add a point.
    pub fn add_point(&mut self, x: i64, y: i64) -> Result<()> {
        if self.count == 0 {
            self.command(Command::MoveTo, 1);
        }
        self.push_point(x, y)?;
        self.count += 1;
        Ok(())
    }

    /// Add a point, taking ownership (for method chaining).
    pub fn point(mut self, x: i64, y: i64) -> Result<Self> {
        self.add_point(x, y)?;
        Ok(self)
    }

    /// Encode the geometry data, consuming the encoder.
    ///
    /// Returns [Error::InvalidGeometry](enum.Error.html) if no points were
    /// added.
    pub fn encode(mut self) -> Result<GeomData> {
        match self.count {
            0 => return Err(Error::InvalidGeometry()),
            1 => (),
            n => self.set_command(Command::MoveTo, n),
        }
        Ok(GeomData::new(GeomType::Point, self.data))
    }
}

impl GeomData {
    /// Create new geometry data.
    ///
    /// * `geom_tp` Geometry type.
    /// * `data` Validated geometry.
    fn new(geom_tp: GeomType, data: Vec<u32>) -> Self {
        GeomData { geom_tp, data }
    }

    /// Get the geometry type
    pub fn geom_type(&self) -> GeomType {
        self.geom_tp
    }

    /// Get the command stream
    pub fn as_slice(&self) -> &[u32] {
        &self.data
    }

    /// Get the command stream, consuming the data
    pub fn into_vec(self) -> Vec<u32> {
        self.data
    }
}

/// Encode a single point as one `MoveTo` command.
///
/// The first point is a delta from the origin, so the result is
/// `[9, zigzag(x), zigzag(y)]`.
pub fn encode_point(x: i64, y: i64) -> Result<GeomData> {
    GeomEncoder::new().point(x, y)?.encode()
}

#[cfg(test)]
mod test {
    use super::*;

    // Examples from MVT spec:
    #[test]
    fn test_point() {
        let v = encode_point(25, 17).unwrap().into_vec();
        assert_eq!(v, vec!(9, 50, 34));
    }

    #[test]
    fn test_multipoint() {
        let v = GeomEncoder::new()
            .point(5, 7)
            .unwrap()
            .point(3, 2)
            .unwrap()
            .encode()
            .unwrap()
            .into_vec();
        assert_eq!(v, vec!(17, 10, 14, 3, 9));
    }

    #[test]
    fn test_tile_corners() {
        assert_eq!(encode_point(0, 0).unwrap().into_vec(), vec!(9, 0, 0));
        assert_eq!(
            encode_point(4095, 4095).unwrap().into_vec(),
            vec!(9, 8190, 8190)
        );
        assert_eq!(encode_point(-1, 0).unwrap().into_vec(), vec!(9, 1, 0));
    }

    #[test]
    fn test_geom_type() {
        let g = encode_point(1, 1).unwrap();
        assert_eq!(g.geom_type(), GeomType::Point);
        assert_eq!(GeomType::Point.as_u32(), 1);
        assert_eq!(GeomType::Linestring.as_u32(), 2);
        assert_eq!(GeomType::Polygon.as_u32(), 3);
    }

    #[test]
    fn test_overflow() {
        let big = i64::from(i32::MAX) + 1;
        assert!(matches!(encode_point(big, 0), Err(Error::EncodingOverflow())));
        assert!(matches!(
            encode_point(0, i64::from(i32::MIN) - 1),
            Err(Error::EncodingOverflow())
        ));
        let r = GeomEncoder::new()
            .point(i64::from(i32::MIN), 0)
            .unwrap()
            .point(i64::from(i32::MAX), 0);
        assert!(matches!(r, Err(Error::EncodingOverflow())));
    }

    #[test]
    fn test_empty() {
        assert!(matches!(
            GeomEncoder::new().encode(),
            Err(Error::InvalidGeometry())
        ));
    }
}
