// wire.rs
//
// Copyright (c) 2019-2021  Minnesota Department of Transportation
//
//! Protobuf wire format primitives for vector tile messages.
//!
//! Only the subset needed by MVT is covered: varints, zigzag parameters,
//! tags and length-delimited fields.
use crate::error::{Error, Result};
use protobuf::wire_format::WireType;
use protobuf::CodedOutputStream;
use std::convert::TryFrom;

/// Largest valid protobuf field number
const FIELD_NUMBER_MAX: u32 = 0x1fff_ffff;

/// Write a varint (7-bit groups, low-order first).
pub fn write_varint(os: &mut CodedOutputStream, value: u32) -> Result<()> {
    os.write_raw_varint32(value)?;
    Ok(())
}

/// Zigzag encode a signed parameter integer.
///
/// Small magnitudes map to small values: 0 => 0, -1 => 1, 1 => 2, -2 => 3.
pub fn zigzag(n: i32) -> u32 {
    ((n << 1) ^ (n >> 31)) as u32
}

/// Decode a zigzag encoded parameter integer.
pub fn unzigzag(n: u32) -> i32 {
    ((n >> 1) as i32) ^ -((n & 1) as i32)
}

/// Write a field tag.
pub fn write_tag(
    os: &mut CodedOutputStream,
    field_number: u32,
    wire_type: WireType,
) -> Result<()> {
    if field_number == 0 || field_number > FIELD_NUMBER_MAX {
        return Err(Error::EncodingOverflow());
    }
    os.write_tag(field_number, wire_type)?;
    Ok(())
}

/// Write a varint field (tag + value).
pub fn write_uint32(
    os: &mut CodedOutputStream,
    field_number: u32,
    value: u32,
) -> Result<()> {
    write_tag(os, field_number, WireType::WireTypeVarint)?;
    write_varint(os, value)
}

/// Write a length-delimited field (tag + length + payload).
pub fn write_length_delimited(
    os: &mut CodedOutputStream,
    field_number: u32,
    payload: &[u8],
) -> Result<()> {
    let len =
        u32::try_from(payload.len()).map_err(|_| Error::EncodingOverflow())?;
    write_tag(os, field_number, WireType::WireTypeLengthDelimited)?;
    write_varint(os, len)?;
    os.write_raw_bytes(payload)?;
    Ok(())
}

/// Write a string field as UTF-8 bytes.
pub fn write_string(
    os: &mut CodedOutputStream,
    field_number: u32,
    value: &str,
) -> Result<()> {
    write_length_delimited(os, field_number, value.as_bytes())
}

/// Write a packed repeated varint field.
pub fn write_packed(
    os: &mut CodedOutputStream,
    field_number: u32,
    values: &[u32],
) -> Result<()> {
    let payload = encode_message(|os| {
        for v in values {
            write_varint(os, *v)?;
        }
        Ok(())
    })?;
    write_length_delimited(os, field_number, &payload)
}

/// Encode one message body into a new buffer.
pub fn encode_message<F>(write_body: F) -> Result<Vec<u8>>
where
    F: FnOnce(&mut CodedOutputStream) -> Result<()>,
{
    let mut buf = Vec::new();
    {
        let mut os = CodedOutputStream::vec(&mut buf);
        write_body(&mut os)?;
        os.flush()?;
    }
    Ok(buf)
}

#[cfg(test)]
mod test {
    use super::*;
    use protobuf::CodedInputStream;

    fn varint_bytes(value: u32) -> Vec<u8> {
        encode_message(|os| write_varint(os, value)).unwrap()
    }

    #[test]
    fn test_varint() {
        assert_eq!(varint_bytes(0), vec![0x00]);
        assert_eq!(varint_bytes(1), vec![0x01]);
        assert_eq!(varint_bytes(127), vec![0x7f]);
        assert_eq!(varint_bytes(128), vec![0x80, 0x01]);
        assert_eq!(varint_bytes(300), vec![0xac, 0x02]);
        assert_eq!(varint_bytes(u32::MAX), vec![0xff, 0xff, 0xff, 0xff, 0x0f]);
    }

    #[test]
    fn test_varint_decode() {
        let values = [0, 1, 127, 128, 16_383, 16_384, 1 << 21, 1 << 28, u32::MAX];
        for v in values.iter() {
            let b = varint_bytes(*v);
            let mut is = CodedInputStream::from_bytes(&b);
            assert_eq!(is.read_raw_varint32().unwrap(), *v);
            assert!(is.eof().unwrap());
        }
    }

    #[test]
    fn test_zigzag() {
        assert_eq!(zigzag(0), 0);
        assert_eq!(zigzag(-1), 1);
        assert_eq!(zigzag(1), 2);
        assert_eq!(zigzag(-2), 3);
        assert_eq!(zigzag(25), 50);
        assert_eq!(zigzag(i32::MAX), 0xffff_fffe);
        assert_eq!(zigzag(i32::MIN), 0xffff_ffff);
        for n in [0, 1, -1, 4096, -4096, i32::MAX, i32::MIN].iter() {
            assert_eq!(unzigzag(zigzag(*n)), *n);
        }
    }

    #[test]
    fn test_tag() {
        let b = encode_message(|os| write_uint32(os, 5, 4096)).unwrap();
        assert_eq!(b, vec![0x28, 0x80, 0x20]);
        let r = encode_message(|os| write_tag(os, 0, WireType::WireTypeVarint));
        assert!(matches!(r, Err(Error::EncodingOverflow())));
        let r = encode_message(|os| {
            write_tag(os, FIELD_NUMBER_MAX + 1, WireType::WireTypeVarint)
        });
        assert!(matches!(r, Err(Error::EncodingOverflow())));
    }

    #[test]
    fn test_string() {
        let b = encode_message(|os| write_string(os, 1, "myLayer")).unwrap();
        assert_eq!(b[0], 0x0a);
        assert_eq!(b[1], 7);
        assert_eq!(&b[2..], b"myLayer");
    }

    #[test]
    fn test_packed() {
        let b = encode_message(|os| write_packed(os, 4, &[9, 50, 34])).unwrap();
        assert_eq!(b, vec![0x22, 3, 9, 50, 34]);
        let b = encode_message(|os| write_packed(os, 4, &[300])).unwrap();
        assert_eq!(b, vec![0x22, 2, 0xac, 0x02]);
    }
}
