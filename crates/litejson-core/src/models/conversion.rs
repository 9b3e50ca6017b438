use serde::ser::{SerializeMap, SerializeStruct, Serializer};
use serde::Serialize;

use super::value::Row;

/// Metadata describing one extracted table, without its rows
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDescriptor {
    pub name: String,
    /// Rows actually extracted, never more than the configured cap
    pub row_count: usize,
    pub columns: Vec<String>,
}

/// Successful conversion of one uploaded database.
///
/// Descriptors and content are only ever added together through [`push_table`], so the
/// content keys always match the descriptor names and share their order.
///
/// [`push_table`]: ConversionResult::push_table
#[derive(Clone, Debug, PartialEq)]
pub struct ConversionResult {
    file_name: String,
    file_size: u64,
    total_rows: usize,
    tables: Vec<TableDescriptor>,
    content: Vec<Vec<Row>>,
}

impl ConversionResult {
    pub fn new(file_name: impl Into<String>, file_size: u64) -> Self {
        Self {
            file_name: file_name.into(),
            file_size,
            total_rows: 0,
            tables: Vec::new(),
            content: Vec::new(),
        }
    }

    /// Append one table's descriptor and rows, updating the aggregate counters
    pub fn push_table(&mut self, name: impl Into<String>, columns: Vec<String>, rows: Vec<Row>) {
        let row_count = rows.len();
        self.tables.push(TableDescriptor {
            name: name.into(),
            row_count,
            columns,
        });
        self.content.push(rows);
        self.total_rows += row_count;
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    pub fn tables(&self) -> &[TableDescriptor] {
        &self.tables
    }

    /// Rows extracted for `table`
    pub fn rows(&self, table: &str) -> Option<&[Row]> {
        self.tables
            .iter()
            .position(|t| t.name == table)
            .map(|index| self.content[index].as_slice())
    }
}

/// Table name to rows, in extraction order
struct ContentView<'a> {
    tables: &'a [TableDescriptor],
    content: &'a [Vec<Row>],
}

impl Serialize for ContentView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.tables.len()))?;
        for (table, rows) in self.tables.iter().zip(self.content) {
            map.serialize_entry(&table.name, rows)?;
        }
        map.end()
    }
}

impl Serialize for ConversionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ConversionResult", 6)?;
        state.serialize_field("fileName", &self.file_name)?;
        state.serialize_field("fileSize", &self.file_size)?;
        state.serialize_field("tableCount", &self.table_count())?;
        state.serialize_field("totalRows", &self.total_rows)?;
        state.serialize_field("tables", &self.tables)?;
        state.serialize_field(
            "content",
            &ContentView {
                tables: &self.tables,
                content: &self.content,
            },
        )?;
        state.end()
    }
}
