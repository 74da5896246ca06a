//! CSV loading for the CLI driver. The core itself only ever sees an
//! already-materialized [`Table`].

use std::error::Error;
use std::io::Read;

use csv::Reader;

use crate::table::Table;

pub fn load_table(path: &str) -> Result<Table, Box<dyn Error>> {
    let reader = Reader::from_path(path)?;
    table_from_reader(reader)
}

pub fn table_from_reader<R: Read>(mut reader: Reader<R>) -> Result<Table, Box<dyn Error>> {
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(Table::new(headers, rows))
}
