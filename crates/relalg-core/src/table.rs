//! In-memory relational table: a schema, an ordered tuple sequence and one
//! index over the primary key.
//!
//! Base tables are filled through `insert`, which type-checks the tuple and
//! rejects a colliding key. Operator results are materialized in one go with
//! `from_tuples`; their nominal key may not be unique (projection onto a
//! non-key, one-to-many joins), so the index keeps the first tuple per key.

use std::fmt;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::index::{Index, IndexKind};
use crate::schema::Schema;
use crate::types::{Key, Tuple, Value};

pub struct Table {
    name: String,
    schema: Schema,
    tuples: Vec<Tuple>,
    index: Box<dyn Index>,
}

impl Table {
    /// Empty table with the default (hash) index.
    pub fn new(name: impl Into<String>, schema: Schema) -> Self {
        Self::with_index(name, schema, IndexKind::default())
    }

    pub fn with_index(name: impl Into<String>, schema: Schema, kind: IndexKind) -> Self {
        let name = name.into();
        debug!(table = %name, schema = %schema, index = %kind, "create table");
        Self {
            name,
            schema,
            tuples: Vec::new(),
            index: kind.build(),
        }
    }

    /// Empty table from whitespace-separated attribute, domain and key lists.
    pub fn parse(name: impl Into<String>, attributes: &str, domains: &str, key: &str) -> Result<Self> {
        Ok(Self::new(name, Schema::parse(attributes, domains, key)?))
    }

    /// Materialize a table from tuples that already conform to `schema`.
    pub fn from_tuples(
        name: impl Into<String>,
        schema: Schema,
        kind: IndexKind,
        tuples: Vec<Tuple>,
    ) -> Self {
        debug_assert!(tuples.iter().all(|t| schema.type_check(t).is_ok()));
        let name = name.into();
        let mut index = kind.build();
        let mut collisions = 0usize;
        for tuple in &tuples {
            let key = tuple.key(schema.key_positions());
            if index.contains(&key) {
                collisions += 1;
                continue;
            }
            index.put(key, tuple.clone());
        }
        if collisions > 0 {
            debug!(table = %name, collisions, "nominal key is not unique; index keeps first tuple per key");
        }
        Self {
            name,
            schema,
            tuples,
            index,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn tuples(&self) -> &[Tuple] {
        &self.tuples
    }

    pub fn len(&self) -> usize {
        self.tuples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }

    pub fn index(&self) -> &dyn Index {
        self.index.as_ref()
    }

    pub fn index_kind(&self) -> IndexKind {
        self.index.kind()
    }

    pub fn attribute_names(&self) -> Vec<&str> {
        self.schema.names()
    }

    /// Column position of `attr`, if present.
    pub fn col(&self, attr: &str) -> Option<usize> {
        self.schema.index_of(attr)
    }

    pub fn key_of(&self, tuple: &Tuple) -> Key {
        tuple.key(self.schema.key_positions())
    }

    /// Point lookup through the primary-key index.
    pub fn get(&self, key: &Key) -> Option<&Tuple> {
        self.index.get(key)
    }

    /// Type-check and append a tuple, indexing it under its key.
    ///
    /// Nothing is mutated when the tuple is rejected.
    pub fn insert(&mut self, values: Vec<Value>) -> Result<()> {
        if let Err(e) = self.schema.type_check(&values) {
            warn!(table = %self.name, error = %e, "insert rejected");
            return Err(e);
        }
        let tuple = Tuple::new(values);
        let key = self.key_of(&tuple);
        if self.index.contains(&key) {
            warn!(table = %self.name, key = %key, "insert rejected: duplicate key");
            return Err(Error::DuplicateKey {
                table: self.name.clone(),
                key: key.to_string(),
            });
        }
        debug!(table = %self.name, tuple = %tuple, "insert");
        self.index.put(key, tuple.clone());
        self.tuples.push(tuple);
        Ok(())
    }

    /// Insert every row, stopping at the first rejected one.
    pub fn insert_all<I>(&mut self, rows: I) -> Result<()>
    where
        I: IntoIterator<Item = Vec<Value>>,
    {
        for row in rows {
            self.insert(row)?;
        }
        Ok(())
    }

    /// Same tuples under a new name; the index is rebuilt.
    pub fn renamed(&self, name: impl Into<String>) -> Table {
        Table::from_tuples(name, self.schema.clone(), self.index_kind(), self.tuples.clone())
    }
}

impl Clone for Table {
    fn clone(&self) -> Self {
        self.renamed(self.name.clone())
    }
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("name", &self.name)
            .field("schema", &self.schema)
            .field("tuples", &self.tuples)
            .field("index", &self.index.kind())
            .finish()
    }
}
