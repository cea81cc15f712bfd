use tabled::{builder::Builder, settings::Style, Table, Tabled};

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Table")]
    pub table: String,
    #[tabled(rename = "Rows")]
    pub rows: String,
}

pub struct TableBuilder {
    rows: Vec<TableRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn add_row(&mut self, table: &str, rows: usize) {
        self.rows.push(TableRow {
            table: table.to_string(),
            rows: rows.to_string(),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn stats_table(stats: &[(&str, usize)]) -> String {
    let mut builder = TableBuilder::new();
    for (table, rows) in stats {
        builder.add_row(table, *rows);
    }
    builder.build()
}

/// Render arbitrary rows under a header line
pub fn records_table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut builder = Builder::default();
    builder.push_record(headers.iter().map(|h| h.to_string()));
    for row in rows {
        builder.push_record(row);
    }
    builder.build().with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stats_table_is_blank() {
        assert!(stats_table(&[]).is_empty());
    }

    #[test]
    fn test_stats_table_lists_tables_and_counts() {
        let table = stats_table(&[("countries", 3), ("payments", 0)]);
        assert!(table.contains("Table"));
        assert!(table.contains("Rows"));
        assert!(table.contains("countries"));
        assert!(table.contains('3'));
    }

    #[test]
    fn test_records_table_contains_cells() {
        let table = records_table(
            &["ID", "Name"],
            vec![vec!["1".to_string(), "United States".to_string()]],
        );
        assert!(table.contains("Name"));
        assert!(table.contains("United States"));
    }
}
