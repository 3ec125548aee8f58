use std::{
    borrow::Cow,
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use log::{info, warn};
use serde::Deserialize;
use thiserror::Error;

use crate::dimension::Dimension;

/// One row of the fatality dataset. Columns not listed here are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FatalityRecord {
    #[serde(rename = "Year")]
    pub year: u16,
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "Month")]
    pub month: String,
    #[serde(rename = "Road User", default)]
    pub road_user: Option<String>,
    #[serde(rename = "Speed Limit", default)]
    pub speed_limit: Option<String>,
    #[serde(
        rename = "Age",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    pub age: Option<f64>,
}

impl FatalityRecord {
    /// Value of `dimension` for this row, coerced to text.
    pub fn value_of(&self, dimension: Dimension) -> Cow<'_, str> {
        match dimension {
            Dimension::Year => Cow::Owned(self.year.to_string()),
            Dimension::State => Cow::Borrowed(&self.state),
            Dimension::Month => Cow::Borrowed(&self.month),
        }
    }

    /// Age in years, if it was recorded. The dataset uses -9 for unknown.
    pub fn known_age(&self) -> Option<f64> {
        self.age.filter(|age| *age >= 0.0)
    }

    /// Road user role, blank entries count as missing.
    pub fn road_user(&self) -> Option<&str> {
        non_blank(self.road_user.as_deref())
    }

    /// Posted speed limit of the crash site, blank entries count as missing.
    pub fn speed_limit(&self) -> Option<&str> {
        non_blank(self.speed_limit.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Unable to open dataset {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Malformed dataset {path:?}: {source}")]
    Csv { path: PathBuf, source: csv::Error },
}

/// The fatality table. Loaded once, then only ever read.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<FatalityRecord>,
}

impl Dataset {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_reader(file).map_err(|source| DatasetError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        if dataset.is_empty() {
            warn!("dataset {path:?} has no rows");
        } else {
            info!("loaded {} fatality records from {path:?}", dataset.len());
        }
        Ok(dataset)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, csv::Error> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let records = rdr.deserialize().collect::<Result<Vec<FatalityRecord>, _>>()?;
        Ok(Self { records })
    }

    pub fn from_records(records: Vec<FatalityRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[FatalityRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Projects one column as text without touching the table.
    pub fn column(&self, dimension: Dimension) -> impl Iterator<Item = Cow<'_, str>> + '_ {
        self.records.iter().map(move |r| r.value_of(dimension))
    }
}
