//! Index adapters: key → tuple maps.
//!
//! A table owns exactly one `Index` over its primary key. The backing is
//! chosen with `IndexKind`; both backings honour the same `put`/`get`
//! contract and differ only in iteration order (hash order vs. key order),
//! which is used for display only.
//!
//! `MultiIndex` is the operator-local, multi-valued structure joins build over
//! a probed table. It is never stored in a `Table`.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::types::{Key, Tuple};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexKind {
    #[default]
    Hash,
    BTree,
}

impl IndexKind {
    pub fn build(self) -> Box<dyn Index> {
        match self {
            IndexKind::Hash => Box::new(HashIndex::default()),
            IndexKind::BTree => Box::new(BTreeIndex::default()),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            IndexKind::Hash => "hash",
            IndexKind::BTree => "btree",
        }
    }
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndexKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.to_ascii_lowercase().as_str() {
            "hash" | "linhash" => Ok(IndexKind::Hash),
            "btree" | "tree" | "bptree" => Ok(IndexKind::BTree),
            other => Err(Error::Parse(format!("unknown index kind '{other}'"))),
        }
    }
}

/// Minimal key → tuple map contract consumed by tables.
pub trait Index: fmt::Debug + Send + Sync {
    fn kind(&self) -> IndexKind;

    /// Store `tuple` under `key`, returning the tuple previously stored there.
    fn put(&mut self, key: Key, tuple: Tuple) -> Option<Tuple>;

    fn get(&self, key: &Key) -> Option<&Tuple>;

    fn contains(&self, key: &Key) -> bool {
        self.get(key).is_some()
    }

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries in backing order. Callers must not rely on the order for
    /// anything but display.
    fn iter(&self) -> Box<dyn Iterator<Item = (&Key, &Tuple)> + '_>;
}

#[derive(Debug, Default)]
pub struct HashIndex {
    map: HashMap<Key, Tuple>,
}

impl Index for HashIndex {
    fn kind(&self) -> IndexKind {
        IndexKind::Hash
    }

    fn put(&mut self, key: Key, tuple: Tuple) -> Option<Tuple> {
        self.map.insert(key, tuple)
    }

    fn get(&self, key: &Key) -> Option<&Tuple> {
        self.map.get(key)
    }

    fn len(&self) -> usize {
        self.map.len()
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (&Key, &Tuple)> + '_> {
        Box::new(self.map.iter())
    }
}

/// Ordered index; iterates in key order.
#[derive(Debug, Default)]
pub struct BTreeIndex {
    map: BTreeMap<Key, Tuple>,
}

impl Index for BTreeIndex {
    fn kind(&self) -> IndexKind {
        IndexKind::BTree
    }

    fn put(&mut self, key: Key, tuple: Tuple) -> Option<Tuple> {
        self.map.insert(key, tuple)
    }

    fn get(&self, key: &Key) -> Option<&Tuple> {
        self.map.get(key)
    }

    fn len(&self) -> usize {
        self.map.len()
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (&Key, &Tuple)> + '_> {
        Box::new(self.map.iter())
    }
}

/// Key → every tuple carrying that key, in insertion order.
#[derive(Debug, Default)]
pub struct MultiIndex {
    map: HashMap<Key, Vec<Tuple>>,
    tuples: usize,
}

impl MultiIndex {
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            map: HashMap::with_capacity(cap),
            tuples: 0,
        }
    }

    /// Index every tuple under its values at `cols`.
    pub fn build<'a, I>(tuples: I, cols: &[usize]) -> Self
    where
        I: IntoIterator<Item = &'a Tuple>,
    {
        let tuples = tuples.into_iter();
        let mut idx = Self::with_capacity(tuples.size_hint().0);
        for t in tuples {
            idx.insert(t.key(cols), t.clone());
        }
        idx
    }

    pub fn insert(&mut self, key: Key, tuple: Tuple) {
        self.map.entry(key).or_default().push(tuple);
        self.tuples += 1;
    }

    /// All tuples stored under `key`; empty when the key is absent.
    pub fn get(&self, key: &Key) -> &[Tuple] {
        self.map.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct keys.
    pub fn keys(&self) -> usize {
        self.map.len()
    }

    /// Number of indexed tuples.
    pub fn len(&self) -> usize {
        self.tuples
    }

    pub fn is_empty(&self) -> bool {
        self.tuples == 0
    }
}
