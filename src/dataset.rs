use std::collections::BTreeSet;
use std::path::Path;

use polars::prelude::*;
use tracing::{debug, info, instrument};

use crate::category::Category;
use crate::error::FlowError;
use crate::schema::{category, csv, record};
use crate::selection::Selection;

/// The refugee-movement table, loaded once and never mutated.
///
/// Year is stored as Int64 and every category column as Float64 (nulls
/// preserved). Cloning shares the underlying column buffers.
#[derive(Debug, Clone)]
pub struct Dataset {
    frame: DataFrame,
    origins: Vec<String>,
    years: Vec<i64>,
}

impl Dataset {
    /// Load the `;`-separated dataset file.
    ///
    /// Missing columns, unparseable numbers and null key cells are fatal.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self, FlowError> {
        let raw = read_csv_as_strings(path)?;
        debug!(rows = raw.height(), columns = raw.width(), "read raw CSV");
        let dataset = Self::from_frame(raw)?;
        info!(
            rows = dataset.height(),
            origins = dataset.origins.len(),
            years = dataset.years.len(),
            "loaded refugee dataset"
        );
        Ok(dataset)
    }

    /// Build a dataset from an in-memory frame.
    ///
    /// Year and category columns may be strings or numbers; they are parsed
    /// to Int64 and Float64 respectively.
    pub fn from_frame(df: DataFrame) -> Result<Self, FlowError> {
        require_columns(&df, &[record::ORIGIN, record::RESIDENCE, record::YEAR])?;
        require_columns(&df, &category::ALL)?;

        let mut exprs = vec![
            col(record::ORIGIN).cast(DataType::String),
            col(record::RESIDENCE).cast(DataType::String),
            parse_column(&df, record::YEAR, DataType::Int64)?,
        ];
        for name in category::ALL {
            exprs.push(parse_column(&df, name, DataType::Float64)?);
        }
        let frame = df.lazy().with_columns(exprs).collect()?;

        for key in [record::ORIGIN, record::RESIDENCE, record::YEAR] {
            let nulls = frame.column(key)?.null_count();
            if nulls > 0 {
                return Err(FlowError::InvalidData(format!(
                    "Column '{key}' has {nulls} null values"
                )));
            }
        }

        let origins: BTreeSet<String> = frame
            .column(record::ORIGIN)?
            .str()?
            .into_iter()
            .flatten()
            .map(str::to_string)
            .collect();
        let years: BTreeSet<i64> = frame.column(record::YEAR)?.i64()?.into_iter().flatten().collect();

        Ok(Self {
            frame,
            origins: origins.into_iter().collect(),
            years: years.into_iter().rev().collect(),
        })
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// Distinct origin countries, sorted ascending.
    pub fn origins(&self) -> &[String] {
        &self.origins
    }

    /// Distinct years, latest first.
    pub fn years(&self) -> &[i64] {
        &self.years
    }

    pub fn has_origin(&self, origin: &str) -> bool {
        self.origins
            .binary_search_by(|o| o.as_str().cmp(origin))
            .is_ok()
    }

    pub fn has_year(&self, year: i64) -> bool {
        self.years.contains(&year)
    }

    /// Build a selection checked against the values seen at load time.
    pub fn select(&self, origin: &str, year: i64, category: &str) -> Result<Selection, FlowError> {
        let category: Category = category.parse()?;
        if !self.has_origin(origin) {
            return Err(FlowError::UnknownOrigin(origin.to_string()));
        }
        if !self.has_year(year) {
            return Err(FlowError::UnknownYear(year));
        }
        Ok(Selection::new(origin, year, category))
    }

    /// First origin, latest year, first category; `None` for an empty dataset.
    pub fn default_selection(&self) -> Option<Selection> {
        let origin = self.origins.first()?;
        let year = self.years.first()?;
        Some(Selection::new(origin, *year, Category::ALL[0]))
    }
}

/// Read a CSV file with all columns as String dtype.
/// Trims whitespace from column names.
fn read_csv_as_strings(path: &Path) -> Result<DataFrame, FlowError> {
    std::fs::metadata(path)?;
    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0)) // all columns as String
        .map_parse_options(|opts| opts.with_separator(csv::SEPARATOR))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    let trimmed: Vec<String> = df
        .get_column_names_str()
        .iter()
        .map(|c| c.trim().to_string())
        .collect();
    df.set_column_names(trimmed)?;

    Ok(df)
}

fn require_columns(df: &DataFrame, required: &[&str]) -> Result<(), FlowError> {
    for &col_name in required {
        if df.column(col_name).is_err() {
            return Err(FlowError::MissingColumn(col_name.to_string()));
        }
    }
    Ok(())
}

/// Strict cast to `dtype`, stripping surrounding whitespace from string cells first.
fn parse_column(df: &DataFrame, column: &str, dtype: DataType) -> Result<Expr, FlowError> {
    let expr = if df.column(column)?.dtype() == &DataType::String {
        col(column).str().strip_chars(lit(" \t\r\n"))
    } else {
        col(column)
    };
    Ok(expr.strict_cast(dtype))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "Country or territory of asylum or residence;Country or territory of origin;Year;Refugees*;Refugees assisted by UNHCR;Total refugees and people in refugee-like situations**;Total refugees and people in refugee-like situations assisted by UNHCR\n";

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn load_parses_types_and_nulls() {
        let file = create_temp_csv(&format!(
            "{HEADER}Turkey;Syria;2015;1000;;1000;\nGermany;Syria;2014; 500 ;20;500;20\n"
        ));
        let ds = Dataset::load(file.path()).unwrap();

        assert_eq!(ds.height(), 2);
        assert_eq!(ds.frame().column(record::YEAR).unwrap().dtype(), &DataType::Int64);
        let assisted = ds.frame().column(category::REFUGEES_ASSISTED).unwrap().f64().unwrap();
        assert_eq!(assisted.get(0), None);
        assert_eq!(assisted.get(1), Some(20.0));
        let refugees = ds.frame().column(category::REFUGEES).unwrap().f64().unwrap();
        assert_eq!(refugees.get(1), Some(500.0));
    }

    #[test]
    fn load_trims_column_names() {
        let padded = HEADER.replace(";Year;", "; Year ;");
        let file = create_temp_csv(&format!("{padded}Turkey;Syria;2015;1;1;1;1\n"));
        let ds = Dataset::load(file.path()).unwrap();
        assert_eq!(ds.years(), &[2015]);
    }

    #[test]
    fn missing_column_is_fatal() {
        let file = create_temp_csv(
            "Country or territory of asylum or residence;Country or territory of origin;Year\nTurkey;Syria;2015\n",
        );
        let err = Dataset::load(file.path()).unwrap_err();
        assert!(matches!(err, FlowError::MissingColumn(c) if c == category::REFUGEES));
    }

    #[test]
    fn unparseable_number_is_fatal() {
        let file = create_temp_csv(&format!("{HEADER}Turkey;Syria;2015;lots;1;1;1\n"));
        assert!(matches!(
            Dataset::load(file.path()),
            Err(FlowError::Polars(_))
        ));
    }

    #[test]
    fn null_year_is_fatal() {
        let file = create_temp_csv(&format!("{HEADER}Turkey;Syria;;1;1;1;1\n"));
        assert!(matches!(
            Dataset::load(file.path()),
            Err(FlowError::InvalidData(_))
        ));
    }

    #[test]
    fn selector_values_are_sorted() {
        let file = create_temp_csv(&format!(
            "{HEADER}Turkey;Syria;2014;1;1;1;1\nKenya;Somalia;2016;1;1;1;1\nChad;Sudan;2015;1;1;1;1\nIran;Afghanistan;2016;1;1;1;1\n"
        ));
        let ds = Dataset::load(file.path()).unwrap();
        assert_eq!(ds.origins(), &["Afghanistan", "Somalia", "Sudan", "Syria"]);
        assert_eq!(ds.years(), &[2016, 2015, 2014]);

        let default = ds.default_selection().unwrap();
        assert_eq!(default.origin(), "Afghanistan");
        assert_eq!(default.year(), 2016);
        assert_eq!(default.category(), Category::Refugees);
    }

    #[test]
    fn select_validates_against_dataset() {
        let file = create_temp_csv(&format!("{HEADER}Turkey;Syria;2015;1;1;1;1\n"));
        let ds = Dataset::load(file.path()).unwrap();

        assert!(ds.select("Syria", 2015, "Refugees*").is_ok());
        assert!(matches!(
            ds.select("Atlantis", 2015, "Refugees*"),
            Err(FlowError::UnknownOrigin(_))
        ));
        assert!(matches!(
            ds.select("Syria", 1990, "Refugees*"),
            Err(FlowError::UnknownYear(1990))
        ));
        assert!(matches!(
            ds.select("Syria", 2015, "Migrants"),
            Err(FlowError::UnknownCategory(_))
        ));
    }
}
