/// Helpers shared by the unit tests
pub mod test_utils {
    use std::path::{Path, PathBuf};

    use polars::{io::SerReader, prelude::*};

    use crate::OCELTables;

    pub fn get_test_data_path() -> PathBuf {
        std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("test_data")
    }

    pub fn read_csv(path: &Path) -> DataFrame {
        CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .unwrap()
            .finish()
            .unwrap()
    }

    /// Excerpt of an order management OCEL (objects, events and E2O relations as CSV)
    ///
    /// Contains a relation to the unknown event `e8`, a relation to the unknown object `i4`
    /// and a relation (`e3`, `o1`) stating the wrong object type `items`.
    pub fn load_order_management_excerpt() -> OCELTables {
        let dir = get_test_data_path()
            .join("ocel")
            .join("order-management-excerpt");
        OCELTables::new(
            read_csv(&dir.join("objects.csv")),
            read_csv(&dir.join("events.csv")),
            read_csv(&dir.join("relations.csv")),
        )
    }

    /// Column names of a `DataFrame` as owned strings
    pub fn column_names(df: &DataFrame) -> Vec<String> {
        df.get_column_names().iter().map(|c| c.to_string()).collect()
    }

    /// Values of a column, cast to strings
    pub fn str_values(df: &DataFrame, column: &str) -> Vec<Option<String>> {
        df.column(column)
            .unwrap()
            .as_materialized_series()
            .cast(&DataType::String)
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .map(|v| v.map(|v| v.to_string()))
            .collect()
    }
}
