//! Reading uploaded datasets.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use bioprint_types::{ProcessParameters, ViabilityClass};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{DatasetError, Result};
use crate::sample::BioprintingSample;

/// Accepted upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    /// Comma-separated values with a header row.
    Csv,
    /// Excel workbook. Recognised but not parsed.
    Xlsx,
}

impl DatasetFormat {
    /// Matches a file extension, case-insensitively.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        if ext.eq_ignore_ascii_case("csv") {
            Some(Self::Csv)
        } else if ext.eq_ignore_ascii_case("xlsx") {
            Some(Self::Xlsx)
        } else {
            None
        }
    }

    /// Detects the format from a file name.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::UnsupportedFormat`] for any other suffix.
    ///
    /// # Example
    ///
    /// ```
    /// use bioprint_dataset::DatasetFormat;
    ///
    /// assert_eq!(DatasetFormat::from_path("runs.CSV").unwrap(), DatasetFormat::Csv);
    /// assert!(DatasetFormat::from_path("runs.json").is_err());
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| DatasetError::unsupported_format(path.display().to_string()))
    }
}

/// Flat CSV record; `csv` cannot deserialize flattened structs.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CsvRow {
    cell_density: f64,
    temperature: f64,
    print_speed: f64,
    layer_height: f64,
    viscosity: f64,
    crosslink_time: f64,
    viability: String,
}

impl CsvRow {
    fn into_sample(self, row: usize) -> Result<BioprintingSample> {
        let viability: ViabilityClass = self
            .viability
            .parse()
            .map_err(|e| DatasetError::invalid_sample(row, format!("{e}")))?;
        let parameters = ProcessParameters::new(
            self.cell_density,
            self.temperature,
            self.print_speed,
            self.layer_height,
            self.viscosity,
            self.crosslink_time,
        );
        parameters
            .validate()
            .map_err(|e| DatasetError::invalid_sample(row, e.to_string()))?;
        Ok(BioprintingSample::new(parameters, viability))
    }
}

/// Parses samples from CSV with a camelCase header row.
///
/// Columns: `cellDensity, temperature, printSpeed, layerHeight, viscosity,
/// crosslinkTime, viability`, in any order. Viability is `Low`, `Medium` or
/// `High`.
///
/// # Errors
///
/// Returns [`DatasetError::Csv`] for malformed records and
/// [`DatasetError::InvalidSample`] for unknown labels or non-finite values.
pub fn read_csv_samples<R: Read>(reader: R) -> Result<Vec<BioprintingSample>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut samples = Vec::new();
    for (i, record) in csv_reader.deserialize::<CsvRow>().enumerate() {
        samples.push(record?.into_sample(i + 1)?);
    }

    debug!(count = samples.len(), "parsed CSV samples");
    Ok(samples)
}

/// Loads samples from a dataset file.
///
/// # Errors
///
/// Returns [`DatasetError::UnsupportedFormat`] for XLSX and unknown suffixes,
/// otherwise any error of [`read_csv_samples`] or opening the file.
pub fn read_samples_from_path(path: impl AsRef<Path>) -> Result<Vec<BioprintingSample>> {
    let path = path.as_ref();
    match DatasetFormat::from_path(path)? {
        DatasetFormat::Csv => {
            let samples = read_csv_samples(File::open(path)?)?;
            info!(path = %path.display(), count = samples.len(), "loaded dataset");
            Ok(samples)
        }
        DatasetFormat::Xlsx => Err(DatasetError::unsupported_format(format!(
            "{} (xlsx parsing is not available; export as CSV)",
            path.display()
        ))),
    }
}

/// Upload row estimate: non-empty lines minus the header.
#[must_use]
pub fn estimate_row_count(text: &str) -> usize {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .count()
        .saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CSV: &str = "\
cellDensity,temperature,printSpeed,layerHeight,viscosity,crosslinkTime,viability
5,180,30,0.3,3.5,30,High
10,200,25,0.2,2.8,45,medium
";

    #[test]
    fn format_from_path() {
        assert_eq!(DatasetFormat::from_path("a.csv").unwrap(), DatasetFormat::Csv);
        assert_eq!(DatasetFormat::from_path("a.XLSX").unwrap(), DatasetFormat::Xlsx);
        assert!(matches!(
            DatasetFormat::from_path("a"),
            Err(DatasetError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn reads_csv() {
        let samples = read_csv_samples(CSV.as_bytes()).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].viability, ViabilityClass::High);
        assert_eq!(samples[1].viability, ViabilityClass::Medium);
        assert_eq!(samples[1].parameters.crosslink_time, 45.0);
    }

    #[test]
    fn reads_columns_in_any_order() {
        let text = "viability,crosslinkTime,viscosity,layerHeight,printSpeed,temperature,cellDensity\n\
                    Low,60,2.0,0.4,20,210,15\n";
        let samples = read_csv_samples(text.as_bytes()).unwrap();
        assert_eq!(samples[0].parameters.cell_density, 15.0);
        assert_eq!(samples[0].viability, ViabilityClass::Low);
    }

    #[test]
    fn rejects_unknown_label() {
        let text = "cellDensity,temperature,printSpeed,layerHeight,viscosity,crosslinkTime,viability\n\
                    5,180,30,0.3,3.5,30,Excellent\n";
        let err = read_csv_samples(text.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidSample { row: 1, .. }));
    }

    #[test]
    fn rejects_missing_column() {
        let text = "cellDensity,temperature\n5,180\n";
        assert!(matches!(
            read_csv_samples(text.as_bytes()),
            Err(DatasetError::Csv(_))
        ));
    }

    #[test]
    fn reads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runs.csv");
        let mut file = File::create(&path).unwrap();
        file.write_all(CSV.as_bytes()).unwrap();

        let samples = read_samples_from_path(&path).unwrap();
        assert_eq!(samples.len(), 2);
    }

    #[test]
    fn xlsx_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runs.xlsx");
        File::create(&path).unwrap();
        assert!(matches!(
            read_samples_from_path(&path),
            Err(DatasetError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn row_estimate_skips_header() {
        assert_eq!(estimate_row_count(CSV), 2);
        assert_eq!(estimate_row_count(""), 0);
        assert_eq!(estimate_row_count("header\n"), 0);
    }
}
