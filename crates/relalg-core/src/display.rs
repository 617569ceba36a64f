//! Console rendering of tables and index listings. Display only.

use std::fmt;

use crate::table::Table;

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self.attribute_names();
        let cells: Vec<Vec<String>> = self
            .tuples()
            .iter()
            .map(|t| t.iter().map(ToString::to_string).collect())
            .collect();

        let mut widths: Vec<usize> = names.iter().map(|n| n.chars().count()).collect();
        for row in &cells {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.chars().count());
            }
        }

        writeln!(f, " Table {}", self.name())?;
        write_rule(f, &widths)?;
        write!(f, "|")?;
        for (name, &w) in names.iter().zip(&widths) {
            write!(f, " {name:>w$} |")?;
        }
        writeln!(f)?;
        write_rule(f, &widths)?;
        for row in &cells {
            write!(f, "|")?;
            for (cell, &w) in row.iter().zip(&widths) {
                write!(f, " {cell:>w$} |")?;
            }
            writeln!(f)?;
        }
        write_rule(f, &widths)
    }
}

fn write_rule(f: &mut fmt::Formatter<'_>, widths: &[usize]) -> fmt::Result {
    write!(f, "|")?;
    for w in widths {
        write!(f, "-{}-|", "-".repeat(*w))?;
    }
    writeln!(f)
}

/// `key -> tuple` lines for a table's index, in backing order.
pub struct IndexListing<'a>(&'a Table);

impl Table {
    pub fn index_listing(&self) -> IndexListing<'_> {
        IndexListing(self)
    }
}

impl fmt::Display for IndexListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.0;
        writeln!(f, " Index for {} ({})", table.name(), table.index_kind())?;
        writeln!(f, "-------------------")?;
        for (key, tuple) in table.index().iter() {
            writeln!(f, "{key} -> {tuple}")?;
        }
        writeln!(f, "-------------------")
    }
}

#[cfg(test)]
mod tests {
    use crate::index::IndexKind;
    use crate::schema::Schema;
    use crate::table::Table;
    use crate::values;

    #[test]
    fn test_grid_is_aligned() {
        let schema = Schema::parse("name presNo", "String Integer", "name").unwrap();
        let mut t = Table::new("studio", schema);
        t.insert(values!["Fox", 7777]).unwrap();
        let out = t.to_string();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], " Table studio");
        assert_eq!(lines[2], "| name | presNo |");
        assert_eq!(lines[4], "|  Fox |   7777 |");
        assert_eq!(lines[1].len(), lines[2].len());
    }

    #[test]
    fn test_index_listing_in_key_order() {
        let schema = Schema::parse("name presNo", "String Integer", "name").unwrap();
        let mut t = Table::with_index("studio", schema, IndexKind::BTree);
        t.insert(values!["Universal", 8888]).unwrap();
        t.insert(values!["Fox", 7777]).unwrap();
        let out = t.index_listing().to_string();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], " Index for studio (btree)");
        assert_eq!(lines[2], "(Fox) -> (Fox, 7777)");
        assert_eq!(lines[3], "(Universal) -> (Universal, 8888)");
    }
}
