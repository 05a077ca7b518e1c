// error.rs
//
// Copyright (c) 2019-2020  Minnesota Department of Transportation
//
use protobuf::error::ProtobufError;
use std::fmt;

/// Point tile error types
#[non_exhaustive]
#[derive(Debug)]
pub enum Error {
    /// Longitude / latitude is non-finite or outside the valid range.
    InvalidCoordinate(f64, f64),
    /// The bounding box is inverted (west > east or south > north).
    InvalidBBox(),
    /// The zoom range is inverted or exceeds the maximum zoom level.
    InvalidZoomRange(u32, u32),
    /// The tile ID is invalid.
    InvalidTid(),
    /// The tile extent is zero.
    InvalidExtent(),
    /// The geometry contains no points.
    InvalidGeometry(),
    /// A value does not fit the supported integer range.
    EncodingOverflow(),
    /// Error while encoding protobuf data.
    Protobuf(ProtobufError),
    /// Error while handing a tile to its sink.
    Io(std::io::Error),
}

/// Result type for point tiles
pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidCoordinate(lon, lat) => {
                write!(f, "Invalid coordinate: {}, {}", lon, lat)
            }
            Error::InvalidBBox() => write!(f, "Invalid bounding box"),
            Error::InvalidZoomRange(min, max) => {
                write!(f, "Invalid zoom range: {}..={}", min, max)
            }
            Error::InvalidTid() => write!(f, "Invalid tile ID"),
            Error::InvalidExtent() => write!(f, "Invalid tile extent"),
            Error::InvalidGeometry() => write!(f, "Empty geometry data"),
            Error::EncodingOverflow() => write!(f, "Value out of encoding range"),
            Error::Protobuf(e) => write!(f, "Protobuf {:?}", e),
            Error::Io(e) => write!(f, "IO {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Protobuf(p) => Some(p),
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ProtobufError> for Error {
    fn from(e: ProtobufError) -> Self {
        Error::Protobuf(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
