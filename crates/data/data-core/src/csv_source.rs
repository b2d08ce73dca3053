//! Sequence source that reads one column of a CSV stream.

use std::io::Read;

use csv::StringRecord;
use data_api::InputConfig;
use data_spi::{DataError, Result, SequenceSource};
use tracing::debug;

use crate::cleaning::{fill_missing, parse_text, shorten};

/// One-shot CSV source; a header row is required.
///
/// The column is picked by name, then by index, from `InputConfig::value_field`;
/// without one the first column whose first record is numeric is used.
pub struct CsvReaderSource<R> {
    reader: Option<R>,
    config: InputConfig,
    name: String,
}

impl<R: Read> CsvReaderSource<R> {
    /// Create a source over `reader`.
    pub fn new(reader: R, config: InputConfig) -> Self {
        Self {
            reader: Some(reader),
            config,
            name: "csv".to_string(),
        }
    }

    /// Rename the source, e.g. after the file it reads.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl<R: Read> SequenceSource for CsvReaderSource<R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn load_sequence(&mut self) -> Result<Vec<f64>> {
        let reader = self
            .reader
            .take()
            .ok_or_else(|| DataError::Exhausted(self.name.clone()))?;
        let mut csv = csv::Reader::from_reader(reader);

        let headers = csv.headers().map_err(csv_error)?.clone();
        let records: Vec<StringRecord> = csv
            .records()
            .collect::<std::result::Result<_, _>>()
            .map_err(csv_error)?;

        let column = select_column(&headers, &records, self.config.value_field.as_deref())?;
        let header = headers.get(column).unwrap_or_default();

        let slots = records
            .iter()
            .enumerate()
            .map(|(row, record)| {
                let cell = record.get(column).unwrap_or_default();
                parse_text(cell).ok_or_else(|| DataError::NonNumeric {
                    position: format!("row {} column '{}'", row + 1, header),
                    found: shorten(cell.trim(), 64),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let values = fill_missing(&slots, self.config.missing);
        debug!(source = %self.name, column = header, observations = values.len(), "decoded CSV sequence");
        if values.is_empty() {
            return Err(DataError::NoData);
        }
        Ok(values)
    }
}

fn select_column(
    headers: &StringRecord,
    records: &[StringRecord],
    wanted: Option<&str>,
) -> Result<usize> {
    match wanted {
        Some(name) => headers
            .iter()
            .position(|h| h.trim() == name)
            .or_else(|| name.parse::<usize>().ok().filter(|&i| i < headers.len()))
            .ok_or_else(|| DataError::Config(format!("column '{}' not found", name))),
        None => {
            let first = records.first().ok_or(DataError::NoData)?;
            first
                .iter()
                .position(|cell| cell.trim().parse::<f64>().is_ok())
                .ok_or_else(|| DataError::Config("no numeric column found".to_string()))
        }
    }
}

fn csv_error(err: csv::Error) -> DataError {
    DataError::Parse(err.to_string())
}
