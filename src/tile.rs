// tile.rs
//
// Copyright (c) 2019-2021  Minnesota Department of Transportation
//
//! Layer and Feature message assembly.
//!
//! A tile payload is a concatenation of framed `layers` fields of the
//! top-level `Tile` message, which has no other required fields.
use crate::encoder::GeomData;
use crate::error::Result;
use crate::wire::{encode_message, write_length_delimited, write_packed};
use crate::wire::{write_string, write_uint32};

/// Default height / width of tile bounds
pub const DEFAULT_EXTENT: u32 = 4096;

/// Vector tile spec version written to layers
const LAYER_VERSION: u32 = 2;

/// Tile field: layers
const TILE_LAYERS: u32 = 3;

/// Layer fields
const LAYER_NAME: u32 = 1;
const LAYER_FEATURES: u32 = 2;
const LAYER_EXTENT: u32 = 5;
const LAYER_VERSION_FIELD: u32 = 15;

/// Feature fields
const FEATURE_TYPE: u32 = 3;
const FEATURE_GEOMETRY: u32 = 4;

/// A layer is a set of related features in a tile.
///
/// Features are encoded as they are added, so the layer only holds bytes.
///
/// # Example
/// ```
/// # use pointtiles::Error;
/// # fn main() -> Result<(), Error> {
/// use pointtiles::{encode_point, Layer};
///
/// let mut layer = Layer::new("First Layer", 4096);
/// layer.add_feature(&encode_point(25, 17)?)?;
/// let data = layer.into_bytes()?;
/// assert!(!data.is_empty());
/// # Ok(()) }
/// ```
#[derive(Debug)]
pub struct Layer {
    name: String,
    extent: u32,
    features: Vec<u8>,
    num_features: usize,
}

impl Layer {
    /// Create a new layer.
    ///
    /// * `name` Layer name.
    /// * `extent` Height / width of tile bounds.
    pub fn new(name: &str, extent: u32) -> Self {
        Layer {
            name: name.to_string(),
            extent,
            features: vec![],
            num_features: 0,
        }
    }

    /// Get the layer name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the extent.
    pub fn extent(&self) -> u32 {
        self.extent
    }

    /// Get number of features (count).
    pub fn num_features(&self) -> usize {
        self.num_features
    }

    /// Encode and add a feature.
    pub fn add_feature(&mut self, geom_data: &GeomData) -> Result<()> {
        let feature = encode_feature(geom_data)?;
        self.features.extend_from_slice(&feature);
        self.num_features += 1;
        Ok(())
    }

    /// Encode the layer as a framed `layers` field of a tile.
    ///
    /// Fields are written in a fixed order (name, extent, version, features)
    /// so output is byte-for-byte reproducible.
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        let body = encode_message(|os| {
            write_string(os, LAYER_NAME, &self.name)?;
            write_uint32(os, LAYER_EXTENT, self.extent)?;
            write_uint32(os, LAYER_VERSION_FIELD, LAYER_VERSION)?;
            os.write_raw_bytes(&self.features)?;
            Ok(())
        })?;
        encode_message(|os| write_length_delimited(os, TILE_LAYERS, &body))
    }
}

/// Encode a feature as a framed `features` field of a layer.
///
/// Only `type` and `geometry` are written.  Feature properties are not
/// encoded: there is no `id`, no `tags` and no key / value dictionary in the
/// layer.
pub fn encode_feature(geom_data: &GeomData) -> Result<Vec<u8>> {
    let body = encode_message(|os| {
        write_uint32(os, FEATURE_TYPE, geom_data.geom_type().as_u32())?;
        write_packed(os, FEATURE_GEOMETRY, geom_data.as_slice())
    })?;
    encode_message(|os| write_length_delimited(os, LAYER_FEATURES, &body))
}

/// Encode a layer containing features.
///
/// * `features` Geometry of each feature.
/// * `name` Layer name.
/// * `extent` Height / width of tile bounds.
pub fn encode_layer(
    features: &[GeomData],
    name: &str,
    extent: u32,
) -> Result<Vec<u8>> {
    let mut layer = Layer::new(name, extent);
    for geom_data in features {
        layer.add_feature(geom_data)?;
    }
    layer.into_bytes()
}

/// Minimal tile reader used to check encoded output.
#[cfg(test)]
pub(crate) mod decode {
    use protobuf::wire_format::WireType;
    use protobuf::CodedInputStream;

    #[derive(Debug, Default)]
    pub(crate) struct DecodedFeature {
        pub geom_type: u32,
        pub geometry: Vec<u32>,
    }

    #[derive(Debug, Default)]
    pub(crate) struct DecodedLayer {
        pub name: String,
        pub extent: u32,
        pub version: u32,
        pub features: Vec<DecodedFeature>,
    }

    pub(crate) fn decode_tile(data: &[u8]) -> Vec<DecodedLayer> {
        let mut layers = vec![];
        let mut is = CodedInputStream::from_bytes(data);
        while !is.eof().unwrap() {
            match is.read_tag_unpack().unwrap() {
                (3, WireType::WireTypeLengthDelimited) => {
                    layers.push(decode_layer(&is.read_bytes().unwrap()));
                }
                tag => panic!("unexpected tile field {:?}", tag),
            }
        }
        layers
    }

    fn decode_layer(data: &[u8]) -> DecodedLayer {
        let mut layer = DecodedLayer::default();
        let mut is = CodedInputStream::from_bytes(data);
        while !is.eof().unwrap() {
            match is.read_tag_unpack().unwrap() {
                (1, WireType::WireTypeLengthDelimited) => {
                    layer.name = is.read_string().unwrap();
                }
                (2, WireType::WireTypeLengthDelimited) => {
                    let f = decode_feature(&is.read_bytes().unwrap());
                    layer.features.push(f);
                }
                (5, WireType::WireTypeVarint) => {
                    layer.extent = is.read_raw_varint32().unwrap();
                }
                (15, WireType::WireTypeVarint) => {
                    layer.version = is.read_raw_varint32().unwrap();
                }
                tag => panic!("unexpected layer field {:?}", tag),
            }
        }
        layer
    }

    fn decode_feature(data: &[u8]) -> DecodedFeature {
        let mut feature = DecodedFeature::default();
        let mut is = CodedInputStream::from_bytes(data);
        while !is.eof().unwrap() {
            match is.read_tag_unpack().unwrap() {
                (3, WireType::WireTypeVarint) => {
                    feature.geom_type = is.read_raw_varint32().unwrap();
                }
                (4, WireType::WireTypeLengthDelimited) => {
                    let packed = is.read_bytes().unwrap();
                    let mut ps = CodedInputStream::from_bytes(&packed);
                    while !ps.eof().unwrap() {
                        feature.geometry.push(ps.read_raw_varint32().unwrap());
                    }
                }
                tag => panic!("unexpected feature field {:?}", tag),
            }
        }
        feature
    }
}

#[cfg(test)]
mod test {
    use super::decode::decode_tile;
    use super::*;
    use crate::encoder::{encode_point, GeomEncoder};

    #[test]
    fn test_feature() {
        let g = encode_point(25, 17).unwrap();
        let b = encode_feature(&g).unwrap();
        // features (2) len 7: type (3) = 1, geometry (4) len 3
        assert_eq!(b, vec!(0x12, 7, 0x18, 1, 0x22, 3, 9, 50, 34));
    }

    #[test]
    fn test_layer_bytes() {
        let g = encode_point(25, 17).unwrap();
        let b = encode_layer(&[g], "a", 4096).unwrap();
        assert_eq!(
            b,
            vec!(
                0x1a, 17, // layers (3)
                0x0a, 1, b'a', // name (1)
                0x28, 0x80, 0x20, // extent (5)
                0x78, 2, // version (15)
                0x12, 7, 0x18, 1, 0x22, 3, 9, 50, 34, // features (2)
            )
        );
    }

    #[test]
    fn test_layer_decode() {
        let points = [(0, 0), (2048, 2048), (4095, 17)];
        let features: Vec<GeomData> = points
            .iter()
            .map(|(x, y)| encode_point(*x, *y).unwrap())
            .collect();
        let b = encode_layer(&features, "myLayer", 4096).unwrap();
        let layers = decode_tile(&b);
        assert_eq!(layers.len(), 1);
        let layer = &layers[0];
        assert_eq!(layer.name, "myLayer");
        assert_eq!(layer.extent, 4096);
        assert_eq!(layer.version, 2);
        assert_eq!(layer.features.len(), 3);
        for (f, (x, y)) in layer.features.iter().zip(points.iter()) {
            assert_eq!(f.geom_type, 1);
            assert_eq!(f.geometry[0], 9);
            assert_eq!(crate::wire::unzigzag(f.geometry[1]), *x as i32);
            assert_eq!(crate::wire::unzigzag(f.geometry[2]), *y as i32);
        }
    }

    #[test]
    fn test_multipoint_feature() {
        let g = GeomEncoder::new()
            .point(5, 7)
            .unwrap()
            .point(3, 2)
            .unwrap()
            .encode()
            .unwrap();
        let b = encode_layer(&[g], "multi", 256).unwrap();
        let layers = decode_tile(&b);
        assert_eq!(layers[0].extent, 256);
        assert_eq!(layers[0].features[0].geometry, vec!(17, 10, 14, 3, 9));
    }

    #[test]
    fn test_layer_struct() {
        let mut layer = Layer::new("myLayer", 512);
        assert_eq!(layer.name(), "myLayer");
        assert_eq!(layer.extent(), 512);
        assert_eq!(layer.num_features(), 0);
        layer.add_feature(&encode_point(1, 2).unwrap()).unwrap();
        layer.add_feature(&encode_point(3, 4).unwrap()).unwrap();
        assert_eq!(layer.num_features(), 2);
        let layers = decode_tile(&layer.into_bytes().unwrap());
        assert_eq!(layers[0].features.len(), 2);
    }

    #[test]
    fn test_deterministic() {
        let a = encode_layer(&[encode_point(7, 9).unwrap()], "x", 4096);
        let b = encode_layer(&[encode_point(7, 9).unwrap()], "x", 4096);
        assert_eq!(a.unwrap(), b.unwrap());
    }
}
