use sqlx::FromRow;
use std::collections::{HashMap, HashSet};

#[derive(FromRow, Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub source_type: String,
    pub is_nullable: bool,
    pub max_length: Option<i32>,
    pub ordinal: i32,
}

impl Column {
    pub fn new(name: &str, source_type: &str, is_nullable: bool, ordinal: i32) -> Self {
        Self {
            name: name.to_string(),
            source_type: source_type.to_string(),
            is_nullable,
            max_length: None,
            ordinal,
        }
    }

    pub fn with_max_length(mut self, max_length: i32) -> Self {
        self.max_length = Some(max_length);
        self
    }
}

#[derive(FromRow, Debug, Clone)]
pub struct ForeignKeyInfo {
    pub column_name: String,
    pub ref_schema: String,
    pub ref_table: String,
    pub ref_column: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyRef {
    pub schema: String,
    pub table: String,
    pub column: String,
}

impl From<ForeignKeyInfo> for ForeignKeyRef {
    fn from(info: ForeignKeyInfo) -> Self {
        Self {
            schema: info.ref_schema,
            table: info.ref_table,
            column: info.ref_column,
        }
    }
}

/// Column names compared without regard to case.
#[derive(Debug, Clone, Default)]
pub struct NameSet(HashSet<String>);

impl NameSet {
    pub fn insert(&mut self, name: &str) {
        self.0.insert(name.to_lowercase());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for NameSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = NameSet::default();
        for name in iter {
            set.insert(name.as_ref());
        }
        set
    }
}

// Keeps the scanning phase separate from the rendering phase.
#[derive(Debug, Clone)]
pub struct TableModel {
    pub schema: String,
    pub table: String,
    pub columns: Vec<Column>,
    pub primary_keys: NameSet,
    pub identity_columns: NameSet,
    foreign_keys: HashMap<String, ForeignKeyRef>,
}

impl TableModel {
    pub fn new(schema: &str, table: &str, mut columns: Vec<Column>) -> Self {
        columns.sort_by_key(|c| c.ordinal);
        Self {
            schema: schema.to_string(),
            table: table.to_string(),
            columns,
            primary_keys: NameSet::default(),
            identity_columns: NameSet::default(),
            foreign_keys: HashMap::new(),
        }
    }

    pub fn with_primary_keys(mut self, keys: NameSet) -> Self {
        self.primary_keys = keys;
        self
    }

    pub fn with_identity_columns(mut self, columns: NameSet) -> Self {
        self.identity_columns = columns;
        self
    }

    /// Later rows overwrite earlier ones for the same column.
    pub fn with_foreign_keys<I>(mut self, rows: I) -> Self
    where
        I: IntoIterator<Item = ForeignKeyInfo>,
    {
        for row in rows {
            let key = row.column_name.to_lowercase();
            self.foreign_keys.insert(key, row.into());
        }
        self
    }

    pub fn is_primary_key(&self, column: &str) -> bool {
        self.primary_keys.contains(column)
    }

    pub fn is_identity(&self, column: &str) -> bool {
        self.identity_columns.contains(column)
    }

    pub fn foreign_key(&self, column: &str) -> Option<&ForeignKeyRef> {
        self.foreign_keys.get(&column.to_lowercase())
    }

    pub fn foreign_key_count(&self) -> usize {
        self.foreign_keys.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fk(column: &str, table: &str) -> ForeignKeyInfo {
        ForeignKeyInfo {
            column_name: column.to_string(),
            ref_schema: "dbo".to_string(),
            ref_table: table.to_string(),
            ref_column: "Id".to_string(),
        }
    }

    #[test]
    fn test_name_set_ignores_case() {
        let set: NameSet = ["OrderId", "LINE_NO"].into_iter().collect();
        assert!(set.contains("orderid"));
        assert!(set.contains("ORDERID"));
        assert!(set.contains("line_no"));
        assert!(!set.contains("Notes"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_model_orders_columns_by_ordinal() {
        let model = TableModel::new(
            "dbo",
            "Orders",
            vec![
                Column::new("Notes", "varchar", true, 3),
                Column::new("Id", "int", false, 1),
                Column::new("CustomerId", "int", false, 2),
            ],
        );
        let names: Vec<_> = model.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Id", "CustomerId", "Notes"]);
    }

    #[test]
    fn test_foreign_key_lookup_ignores_case() {
        let model = TableModel::new("dbo", "Orders", vec![])
            .with_foreign_keys([fk("CustomerId", "Customers")]);
        let reference = model.foreign_key("customerid").unwrap();
        assert_eq!(reference.table, "Customers");
        assert!(model.foreign_key("Id").is_none());
    }

    #[test]
    fn test_last_foreign_key_row_wins() {
        let model = TableModel::new("dbo", "Orders", vec![])
            .with_foreign_keys([fk("CustomerId", "Customers"), fk("CUSTOMERID", "Clients")]);
        assert_eq!(model.foreign_key_count(), 1);
        assert_eq!(model.foreign_key("CustomerId").unwrap().table, "Clients");
    }
}
