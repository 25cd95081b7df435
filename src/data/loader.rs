//! CSV Data Loader Module
//! Reads the sensor location table using Polars.

use log::debug;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::{LATITUDE, LONGITUDE};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Required column '{0}' not found in header")]
    MissingColumn(&'static str),
    #[error("Coordinate columns contain non-numeric values: {0}")]
    InvalidCoordinates(PolarsError),
    #[error("Delimiter {0:?} is not a single-byte ASCII character")]
    InvalidDelimiter(char),
}

/// Options controlling how the delimited file is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    separator: u8,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { separator: b',' }
    }
}

impl LoadOptions {
    pub fn new(delimiter: char) -> Result<Self, LoaderError> {
        if !delimiter.is_ascii() {
            return Err(LoaderError::InvalidDelimiter(delimiter));
        }
        Ok(Self {
            separator: delimiter as u8,
        })
    }

    pub fn separator(&self) -> u8 {
        self.separator
    }
}

/// Load a comma separated file with a header row.
pub fn load_csv(path: impl AsRef<Path>) -> Result<DataFrame, LoaderError> {
    load_csv_with(path, &LoadOptions::default())
}

/// Load a delimited file with a header row.
///
/// Every column is kept with its header name verbatim. `Latitude` and
/// `Longitude` must be present and are cast to `Float64`, so empty fields
/// become nulls.
pub fn load_csv_with(path: impl AsRef<Path>, options: &LoadOptions) -> Result<DataFrame, LoaderError> {
    let path = path.as_ref();

    // Polars reports missing files as a generic compute error; surface the io error instead
    std::fs::metadata(path).map_err(|source| LoaderError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    // Whole-file inference, and no ignore_errors: malformed rows must fail the load
    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_separator(options.separator())
        .with_infer_schema_length(None)
        .finish()?
        .collect()?;

    debug!("Loaded {} rows with schema {:?}", df.height(), df.schema());

    for name in [LATITUDE, LONGITUDE] {
        if df.column(name).is_err() {
            return Err(LoaderError::MissingColumn(name));
        }
    }

    df.lazy()
        .with_columns([
            col(LATITUDE).strict_cast(DataType::Float64),
            col(LONGITUDE).strict_cast(DataType::Float64),
        ])
        .collect()
        .map_err(LoaderError::InvalidCoordinates)
}

/// Read a coordinate column as optional floats, in row order.
pub fn coordinate_values(df: &DataFrame, column: &str) -> PolarsResult<Vec<Option<f64>>> {
    let values = df.column(column)?.cast(&DataType::Float64)?;
    Ok(values.f64()?.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn keeps_every_column_in_header_order() {
        let file = write_csv("Sensor,Latitude,Longitude,Type\nA,52.0,-1.0,soil\nB,51.5,-0.1,air\n");
        let df = load_csv(file.path()).unwrap();

        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, ["Sensor", "Latitude", "Longitude", "Type"]);
        assert_eq!(df.height(), 2);
        assert_eq!(df.column(LATITUDE).unwrap().dtype(), &DataType::Float64);
    }

    #[test]
    fn empty_fields_become_missing_coordinates() {
        let file = write_csv("Latitude,Longitude\n52.0,\n,-1.0\n53.1,-2.2\n");
        let df = load_csv(file.path()).unwrap();

        assert_eq!(
            coordinate_values(&df, LONGITUDE).unwrap(),
            vec![None, Some(-1.0), Some(-2.2)]
        );
        assert_eq!(
            coordinate_values(&df, LATITUDE).unwrap(),
            vec![Some(52.0), None, Some(53.1)]
        );
    }

    #[test]
    fn integer_coordinates_are_widened_to_float() {
        let file = write_csv("Latitude,Longitude\n52,-1\n");
        let df = load_csv(file.path()).unwrap();
        assert_eq!(coordinate_values(&df, LATITUDE).unwrap(), vec![Some(52.0)]);
    }

    #[test]
    fn header_only_file_loads_as_empty_dataset() {
        let file = write_csv("Latitude,Longitude,Sensor\n");
        let df = load_csv(file.path()).unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 3);
    }

    #[test]
    fn custom_delimiter() {
        let file = write_csv("Latitude;Longitude\n52.0;-1.0\n");
        let options = LoadOptions::new(';').unwrap();
        let df = load_csv_with(file.path(), &options).unwrap();
        assert_eq!(coordinate_values(&df, LONGITUDE).unwrap(), vec![Some(-1.0)]);
    }

    #[test]
    fn rejects_non_ascii_delimiter() {
        assert!(matches!(
            LoadOptions::new('→'),
            Err(LoaderError::InvalidDelimiter('→'))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_csv("does/not/exist/GrowLocations.csv").unwrap_err();
        assert!(matches!(err, LoaderError::Io { .. }));
    }

    #[test]
    fn column_names_are_case_sensitive() {
        let file = write_csv("latitude,Longitude\n52.0,-1.0\n");
        let err = load_csv(file.path()).unwrap_err();
        assert!(matches!(err, LoaderError::MissingColumn("Latitude")));
    }

    #[test]
    fn ragged_row_is_rejected() {
        let file = write_csv("Latitude,Longitude\n52.0,-1.0,extra\n");
        let err = load_csv(file.path()).unwrap_err();
        assert!(matches!(err, LoaderError::CsvError(_)));
    }

    #[test]
    fn text_in_coordinate_column_is_rejected() {
        let file = write_csv("Latitude,Longitude\nnorth,-1.0\n");
        let err = load_csv(file.path()).unwrap_err();
        assert!(matches!(err, LoaderError::InvalidCoordinates(_)));
    }
}
