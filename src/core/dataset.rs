//! Named collection of series sharing one time axis.

use crate::core::series::Series;
use crate::error::{ForecastError, Result};
use std::io::Read;

/// An ordered set of named series, all labelled on the same time axis.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    names: Vec<String>,
    series: Vec<Series>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named series.
    ///
    /// The series must use the same labels as the ones already present, and
    /// names must be unique.
    pub fn insert(&mut self, name: impl Into<String>, series: Series) -> Result<()> {
        let name = name.into();
        if self.names.contains(&name) {
            return Err(ForecastError::InvalidParameter(format!(
                "duplicate series name '{}'",
                name
            )));
        }
        if let Some(first) = self.series.first() {
            if first.labels() != series.labels() {
                return Err(ForecastError::TimestampError(format!(
                    "series '{}' does not share the dataset time axis",
                    name
                )));
            }
        }
        self.names.push(name);
        self.series.push(series);
        Ok(())
    }

    /// Read the wide layout: one row per instrument, the first column holding
    /// its name and the remaining columns its observations in time order.
    ///
    /// The header row fixes the number of observations. Empty or non-numeric
    /// cells become missing observations, as do the cells a short row leaves
    /// out. Observations are labelled `Day -n` … `Day -1`.
    pub fn from_wide_csv<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let width = csv_reader.headers()?.len().saturating_sub(1);

        let mut dataset = Dataset::new();
        for record in csv_reader.records() {
            let record = record?;
            let mut fields = record.iter();
            let name = match fields.next() {
                Some(name) if !name.is_empty() => name.to_string(),
                _ => {
                    return Err(ForecastError::DataSource(
                        "row without a series name".to_string(),
                    ))
                }
            };
            let mut values: Vec<f64> = fields
                .map(|cell| cell.parse::<f64>().unwrap_or(f64::NAN))
                .collect();
            if values.len() > width {
                return Err(ForecastError::DataSource(format!(
                    "row '{}' has {} observations but the header has {}",
                    name,
                    values.len(),
                    width
                )));
            }
            values.resize(width, f64::NAN);
            dataset.insert(name, Series::from_values(values))?;
        }

        if dataset.is_empty() {
            return Err(ForecastError::EmptyData);
        }
        Ok(dataset)
    }

    /// Look up a series by name.
    pub fn get(&self, name: &str) -> Result<&Series> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| &self.series[i])
            .ok_or_else(|| ForecastError::UnknownSeries(name.to_string()))
    }

    /// Series names in insertion order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate over `(name, series)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Series)> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.series.iter())
    }
}
