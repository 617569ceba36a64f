//! Table snapshot encoding.
//!
//! Layout:
//! [ magic: "RLAG" ][ version: u16 ][ codec: u8 ][ reserved: u8 ]
//! [ uncompressed_len: u64 ][ compressed_len: u64 ]
//! [ payload bytes … ]
//! [ blake3(header || payload): 32 bytes ]
//!
//! The payload is the JSON form of `TableImage`, compressed with `codec`.
//! Integers are little-endian.

use relalg_core::prelude::{Attribute, Domain, IndexKind, Schema, Table, Tuple};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::codec::{self, Codec};
use crate::error::{Error, Result};

pub const MAGIC: [u8; 4] = *b"RLAG";
pub const VERSION: u16 = 1;
pub const HEADER_LEN: usize = 4 + 2 + 1 + 1 + 8 + 8;
pub const CHECKSUM_LEN: usize = 32;

/// Upper bound on a decoded payload; guards allocations on corrupt headers.
pub const MAX_PAYLOAD: u64 = 256 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotHeader {
    pub version: u16,
    pub codec: Codec,
    pub uncompressed_len: u64,
    pub compressed_len: u64,
}

impl SnapshotHeader {
    pub fn new(codec: Codec, uncompressed_len: u64, compressed_len: u64) -> Self {
        Self {
            version: VERSION,
            codec,
            uncompressed_len,
            compressed_len,
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_LEN);
        out.extend_from_slice(&MAGIC);
        out.extend_from_slice(&self.version.to_le_bytes());
        out.push(self.codec as u8);
        out.push(0u8); // reserved
        out.extend_from_slice(&self.uncompressed_len.to_le_bytes());
        out.extend_from_slice(&self.compressed_len.to_le_bytes());
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_LEN {
            return Err(Error::Format("short header".into()));
        }
        if bytes[0..4] != MAGIC {
            return Err(Error::Format("bad magic".into()));
        }
        let version = u16::from_le_bytes(array(bytes, 4));
        if version != VERSION {
            return Err(Error::Format(format!("unsupported version {version}")));
        }
        let codec = Codec::from_u8(bytes[6])?;
        // bytes[7] reserved
        let uncompressed_len = u64::from_le_bytes(array(bytes, 8));
        let compressed_len = u64::from_le_bytes(array(bytes, 16));

        Ok(Self {
            version,
            codec,
            uncompressed_len,
            compressed_len,
        })
    }

    /// Reject sizes that are larger than `max` or inconsistent with the codec.
    pub fn validate_sizes(&self, max: u64) -> Result<()> {
        if self.uncompressed_len > max || self.compressed_len > max {
            return Err(Error::Format(format!(
                "payload of {}/{} bytes exceeds max {max}",
                self.compressed_len, self.uncompressed_len
            )));
        }
        if self.codec == Codec::None && self.compressed_len != self.uncompressed_len {
            return Err(Error::Format("uncompressed payload with differing lengths".into()));
        }
        Ok(())
    }
}

fn array<const N: usize>(bytes: &[u8], at: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[at..at + N]);
    out
}

/// Serialized form of a table: its schema spelled out plus every tuple.
#[derive(Debug, Serialize, Deserialize)]
pub struct TableImage {
    pub name: String,
    pub attributes: Vec<String>,
    pub domains: Vec<Domain>,
    pub key: Vec<String>,
    pub index: IndexKind,
    pub tuples: Vec<Tuple>,
}

impl TableImage {
    pub fn of(table: &Table) -> Self {
        let schema = table.schema();
        Self {
            name: table.name().to_string(),
            attributes: schema.names().into_iter().map(str::to_string).collect(),
            domains: schema.domains(),
            key: schema.key().to_vec(),
            index: table.index_kind(),
            tuples: table.tuples().to_vec(),
        }
    }

    /// Rebuild the table from its tuples in saved order.
    ///
    /// Every tuple is type-checked against the saved schema. The key is not
    /// required to be unique: derived tables may carry a nominal key, and the
    /// rebuilt index keeps the first tuple per key exactly as the saved table
    /// did.
    pub fn into_table(self) -> Result<Table> {
        if self.attributes.len() != self.domains.len() {
            return Err(Error::Format(format!(
                "{} attribute names but {} domains",
                self.attributes.len(),
                self.domains.len()
            )));
        }
        let attributes = self
            .attributes
            .into_iter()
            .zip(self.domains)
            .map(|(name, domain)| Attribute::new(name, domain))
            .collect();
        let schema = Schema::new(attributes, self.key)?;
        for tuple in &self.tuples {
            schema.type_check(tuple)?;
        }
        Ok(Table::from_tuples(self.name, schema, self.index, self.tuples))
    }
}

pub fn encode(table: &Table, codec: Codec) -> Result<Vec<u8>> {
    let payload = serde_json::to_vec(&TableImage::of(table))
        .map_err(|e| Error::Codec(format!("json serialize: {e}")))?;
    let compressed = codec::compress(codec, &payload)?;

    let header = SnapshotHeader::new(codec, payload.len() as u64, compressed.len() as u64);
    let header_bytes = header.to_bytes();

    let mut hasher = blake3::Hasher::new();
    hasher.update(&header_bytes);
    hasher.update(&compressed);
    let checksum: [u8; 32] = hasher.finalize().into();

    let mut out = Vec::with_capacity(HEADER_LEN + compressed.len() + CHECKSUM_LEN);
    out.extend_from_slice(&header_bytes);
    out.extend_from_slice(&compressed);
    out.extend_from_slice(&checksum);

    debug!(
        table = table.name(),
        rows = table.len(),
        codec = %codec,
        bytes = out.len(),
        "encode snapshot"
    );
    Ok(out)
}

pub fn decode(bytes: &[u8]) -> Result<Table> {
    let header = SnapshotHeader::from_bytes(bytes)?;
    header.validate_sizes(MAX_PAYLOAD)?;

    let body_len = HEADER_LEN + header.compressed_len as usize;
    if bytes.len() != body_len + CHECKSUM_LEN {
        return Err(Error::Format(format!(
            "expected {} bytes, found {}",
            body_len + CHECKSUM_LEN,
            bytes.len()
        )));
    }

    let (body, trailer) = bytes.split_at(body_len);
    let computed: [u8; 32] = blake3::hash(body).into();
    if computed[..] != trailer[..] {
        return Err(Error::ChecksumMismatch);
    }

    let payload = codec::decompress(header.codec, &body[HEADER_LEN..])?;
    if payload.len() as u64 != header.uncompressed_len {
        return Err(Error::Format("payload length does not match header".into()));
    }

    let image: TableImage = serde_json::from_slice(&payload)
        .map_err(|e| Error::Codec(format!("json deserialize: {e}")))?;
    let table = image.into_table()?;
    debug!(table = table.name(), rows = table.len(), codec = %header.codec, "decode snapshot");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use relalg_core::prelude::{Key, Value};
    use relalg_core::values;

    fn studio() -> Table {
        let mut t = Table::with_index(
            "studio",
            Schema::parse("name address presNo", "String String Integer", "name").unwrap(),
            IndexKind::BTree,
        );
        t.insert(values!["Fox", "Los_Angeles", 7777]).unwrap();
        t.insert(values!["Universal", "Universal_City", 8888]).unwrap();
        t
    }

    #[test]
    fn test_header_layout() {
        let h = SnapshotHeader::new(Codec::Lz4, 10, 7);
        let bytes = h.to_bytes();
        assert_eq!(bytes.len(), HEADER_LEN);
        assert_eq!(&bytes[0..4], b"RLAG");
        assert_eq!(bytes[6], 2);
        assert_eq!(SnapshotHeader::from_bytes(&bytes).unwrap(), h);
    }

    #[test]
    fn test_decode_rebuilds_table_and_index() {
        let t = studio();
        let back = decode(&encode(&t, Codec::None).unwrap()).unwrap();
        assert_eq!(back.name(), "studio");
        assert_eq!(back.schema(), t.schema());
        assert_eq!(back.tuples(), t.tuples());
        assert_eq!(back.index_kind(), IndexKind::BTree);
        assert_eq!(back.get(&Key::single("Universal")).unwrap()[2], Value::Integer(8888));
    }

    #[test]
    fn test_corruption_is_detected() {
        let bytes = encode(&studio(), Codec::None).unwrap();

        let mut flipped = bytes.clone();
        flipped[HEADER_LEN + 3] ^= 0x01;
        assert!(matches!(decode(&flipped), Err(Error::ChecksumMismatch)));

        let mut magic = bytes.clone();
        magic[0] = b'X';
        assert!(matches!(decode(&magic), Err(Error::Format(_))));

        let mut version = bytes.clone();
        version[4] = 9;
        assert!(matches!(decode(&version), Err(Error::Format(_))));

        let mut codec = bytes.clone();
        codec[6] = 7;
        assert!(matches!(decode(&codec), Err(Error::CodecUnsupported(_))));

        assert!(matches!(decode(&bytes[..bytes.len() - 1]), Err(Error::Format(_))));
        assert!(matches!(decode(&bytes[..10]), Err(Error::Format(_))));
    }

    #[test]
    fn test_compressed_snapshot_when_available() {
        let t = studio();
        for codec in [Codec::Zstd, Codec::Lz4] {
            match encode(&t, codec) {
                Ok(bytes) => assert_eq!(decode(&bytes).unwrap().tuples(), t.tuples()),
                Err(e) => {
                    assert!(!codec.is_available());
                    assert!(matches!(e, Error::CodecUnsupported(_)));
                }
            }
        }
    }

    #[test]
    fn test_nominal_key_rebuilds_first_tuple_index() {
        let schema = Schema::parse("studioName", "String", "studioName").unwrap();
        let tuples = vec![
            Tuple::new(values!["Fox"]),
            Tuple::new(values!["Fox"]),
            Tuple::new(values!["Universal"]),
        ];
        let t = Table::from_tuples("movie0", schema, IndexKind::Hash, tuples);

        let back = decode(&encode(&t, Codec::None).unwrap()).unwrap();
        assert_eq!(back.tuples(), t.tuples());
        assert_eq!(back.len(), 3);
        assert_eq!(back.index().len(), 2);
    }

    #[test]
    fn test_rebuild_rejects_mistyped_tuple() {
        let mut image = TableImage::of(&studio());
        image.tuples.push(Tuple::new(values!["DreamWorks", "Universal_City", "9999"]));
        assert!(matches!(
            image.into_table(),
            Err(Error::Core(relalg_core::Error::TypeMismatch { position: 2, .. }))
        ));
    }

    #[test]
    fn test_non_finite_floats_survive() {
        let schema = Schema::parse("id rate scale", "Integer Double Float", "id").unwrap();
        let mut t = Table::new("rates", schema);
        t.insert(values![1, f64::INFINITY, f32::NEG_INFINITY]).unwrap();
        t.insert(values![2, f64::NAN, -0.0f32]).unwrap();
        t.insert(values![3, 0.1, 2.5f32]).unwrap();

        let back = decode(&encode(&t, Codec::None).unwrap()).unwrap();
        assert_eq!(back.tuples(), t.tuples());
        assert_eq!(back.get(&Key::single(2)).unwrap()[1], Value::Double(f64::NAN));
        assert_eq!(back.get(&Key::single(2)).unwrap()[2], Value::Float(-0.0));
    }
}
