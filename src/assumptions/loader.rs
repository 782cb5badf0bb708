//! CSV-based assumption loader
//!
//! Loads the ordered lookup tables from CSV files in data/assumptions/:
//! - `mra_bands.csv`: `born_before,mra`
//! - `life_expectancy.csv`: `below_age,divisor` (blank `below_age` marks the floor row)
//! - `tax_brackets.csv`: `lower,upper,rate` (blank `upper` marks the open top band)

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use super::life_expectancy::{DivisorBand, LifeExpectancyTable};
use super::mra::{MraBand, MraTable};
use super::tax_tables::{BracketTable, TaxBracket};

/// Default path to assumptions directory
pub const DEFAULT_ASSUMPTIONS_PATH: &str = "data/assumptions";

pub const MRA_FILE: &str = "mra_bands.csv";
pub const LIFE_EXPECTANCY_FILE: &str = "life_expectancy.csv";
pub const TAX_BRACKETS_FILE: &str = "tax_brackets.csv";

#[derive(Error, Debug)]
pub enum AssumptionLoadError {
    #[error("failed to open {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed row in {file}: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },

    #[error("invalid table in {file}: {detail}")]
    InvalidTable { file: String, detail: String },
}

impl AssumptionLoadError {
    fn invalid(file: &str, detail: impl Into<String>) -> Self {
        AssumptionLoadError::InvalidTable {
            file: file.to_string(),
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MraRow {
    born_before: i32,
    mra: u32,
}

#[derive(Debug, Deserialize)]
struct DivisorRow {
    below_age: Option<u32>,
    divisor: f64,
}

#[derive(Debug, Deserialize)]
struct BracketRow {
    lower: f64,
    upper: Option<f64>,
    rate: f64,
}

fn open(path: &Path, file: &str) -> Result<File, AssumptionLoadError> {
    File::open(path.join(file)).map_err(|source| AssumptionLoadError::Io {
        file: file.to_string(),
        source,
    })
}

fn read_rows<R: Read, T: for<'de> Deserialize<'de>>(
    reader: R,
    file: &str,
) -> Result<Vec<T>, AssumptionLoadError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut rows = Vec::new();

    for result in csv_reader.deserialize() {
        let row: T = result.map_err(|source| AssumptionLoadError::Csv {
            file: file.to_string(),
            source,
        })?;
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(AssumptionLoadError::invalid(file, "table has no rows"));
    }
    Ok(rows)
}

/// Load MRA bands from any reader; bands must be strictly increasing in birth year
pub fn mra_table_from_reader<R: Read>(reader: R) -> Result<MraTable, AssumptionLoadError> {
    let rows: Vec<MraRow> = read_rows(reader, MRA_FILE)?;

    if rows.windows(2).any(|w| w[1].born_before <= w[0].born_before) {
        return Err(AssumptionLoadError::invalid(
            MRA_FILE,
            "born_before must be strictly increasing",
        ));
    }

    let bands = rows
        .into_iter()
        .map(|row| MraBand {
            born_before: row.born_before,
            mra: row.mra,
        })
        .collect();
    Ok(MraTable::from_bands(bands))
}

/// Load life-expectancy divisors from any reader; exactly one floor row is required
pub fn life_expectancy_from_reader<R: Read>(
    reader: R,
) -> Result<LifeExpectancyTable, AssumptionLoadError> {
    let rows: Vec<DivisorRow> = read_rows(reader, LIFE_EXPECTANCY_FILE)?;

    let mut bands = Vec::new();
    let mut floor = None;
    for row in rows {
        if row.divisor <= 0.0 {
            return Err(AssumptionLoadError::invalid(
                LIFE_EXPECTANCY_FILE,
                format!("divisor must be positive, got {}", row.divisor),
            ));
        }
        match row.below_age {
            Some(below_age) => bands.push(DivisorBand {
                below_age,
                divisor: row.divisor,
            }),
            None if floor.is_none() => floor = Some(row.divisor),
            None => {
                return Err(AssumptionLoadError::invalid(
                    LIFE_EXPECTANCY_FILE,
                    "more than one floor row",
                ))
            }
        }
    }

    if bands.windows(2).any(|w| w[1].below_age <= w[0].below_age) {
        return Err(AssumptionLoadError::invalid(
            LIFE_EXPECTANCY_FILE,
            "below_age must be strictly increasing",
        ));
    }

    let floor = floor.ok_or_else(|| {
        AssumptionLoadError::invalid(LIFE_EXPECTANCY_FILE, "missing floor row (blank below_age)")
    })?;
    Ok(LifeExpectancyTable::from_loaded(bands, floor))
}

/// Load tax brackets from any reader; bands must be contiguous and only the last may be open
pub fn tax_brackets_from_reader<R: Read>(reader: R) -> Result<BracketTable, AssumptionLoadError> {
    let rows: Vec<BracketRow> = read_rows(reader, TAX_BRACKETS_FILE)?;
    let last = rows.len() - 1;

    let mut brackets = Vec::with_capacity(rows.len());
    for (i, row) in rows.into_iter().enumerate() {
        let upper = match (row.upper, i == last) {
            (Some(upper), _) => upper,
            (None, true) => f64::INFINITY,
            (None, false) => {
                return Err(AssumptionLoadError::invalid(
                    TAX_BRACKETS_FILE,
                    format!("only the top band may be open-ended (row {})", i + 1),
                ))
            }
        };
        if upper <= row.lower {
            return Err(AssumptionLoadError::invalid(
                TAX_BRACKETS_FILE,
                format!("empty band [{}, {})", row.lower, upper),
            ));
        }
        brackets.push(TaxBracket {
            lower: row.lower,
            upper,
            rate: row.rate,
        });
    }

    if brackets.windows(2).any(|w| w[1].lower != w[0].upper) {
        return Err(AssumptionLoadError::invalid(
            TAX_BRACKETS_FILE,
            "bands must be contiguous and ordered",
        ));
    }

    Ok(BracketTable::from_brackets(brackets))
}

/// All table assumptions loaded from one directory
pub struct LoadedAssumptions {
    pub mra: MraTable,
    pub life_expectancy: LifeExpectancyTable,
    pub tax_brackets: BracketTable,
}

impl LoadedAssumptions {
    /// Load all assumptions from the default path
    pub fn load_default() -> Result<Self, AssumptionLoadError> {
        Self::load_from(Path::new(DEFAULT_ASSUMPTIONS_PATH))
    }

    /// Load all assumptions from a specific path
    pub fn load_from(path: &Path) -> Result<Self, AssumptionLoadError> {
        Ok(Self {
            mra: mra_table_from_reader(open(path, MRA_FILE)?)?,
            life_expectancy: life_expectancy_from_reader(open(path, LIFE_EXPECTANCY_FILE)?)?,
            tax_brackets: tax_brackets_from_reader(open(path, TAX_BRACKETS_FILE)?)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shipped_dir() -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_ASSUMPTIONS_PATH)
    }

    #[test]
    fn test_shipped_tables_match_defaults() {
        let loaded = LoadedAssumptions::load_from(&shipped_dir())
            .expect("shipped assumption tables should load");

        let default_mra = MraTable::default();
        for year in 1940..1990 {
            assert_eq!(loaded.mra.lookup(year), default_mra.lookup(year), "birth year {}", year);
        }

        let default_le = LifeExpectancyTable::default();
        for age in 50..110 {
            assert_eq!(loaded.life_expectancy.divisor(age), default_le.divisor(age), "age {}", age);
        }

        assert_eq!(loaded.tax_brackets.brackets(), BracketTable::default().brackets());
    }

    #[test]
    fn test_brackets_from_reader() {
        let data = "lower,upper,rate\n0,10000,0.1\n10000,,0.2\n";
        let table = tax_brackets_from_reader(data.as_bytes()).unwrap();

        assert_eq!(table.brackets().len(), 2);
        assert!(table.brackets()[1].upper.is_infinite());
        assert!((table.tax(15_000.0) - 2_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_brackets_with_gap_rejected() {
        let data = "lower,upper,rate\n0,10000,0.1\n12000,,0.2\n";
        let err = tax_brackets_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, AssumptionLoadError::InvalidTable { .. }));
    }

    #[test]
    fn test_open_band_must_be_last() {
        let data = "lower,upper,rate\n0,,0.1\n10000,20000,0.2\n";
        assert!(tax_brackets_from_reader(data.as_bytes()).is_err());
    }

    #[test]
    fn test_life_expectancy_requires_floor() {
        let data = "below_age,divisor\n70,27.4\n75,24.7\n";
        let err = life_expectancy_from_reader(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("floor"));
    }

    #[test]
    fn test_mra_unsorted_rejected() {
        let data = "born_before,mra\n1965,56\n1950,55\n";
        assert!(mra_table_from_reader(data.as_bytes()).is_err());
    }

    #[test]
    fn test_malformed_row_reports_file() {
        let data = "born_before,mra\nabc,55\n";
        let err = mra_table_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, AssumptionLoadError::Csv { ref file, .. } if file == MRA_FILE));
    }

    #[test]
    fn test_missing_directory() {
        let result = LoadedAssumptions::load_from(Path::new("/nonexistent/assumptions"));
        assert!(matches!(result, Err(AssumptionLoadError::Io { .. })));
    }
}
