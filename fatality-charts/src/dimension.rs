use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Column the fatality records get grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Dimension {
    #[default]
    Year,
    State,
    Month,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown dimension {0:?}, expected one of Year, State, Month")]
pub struct UnknownDimension(pub String);

impl Dimension {
    /// Every dimension, in the order the picker lists them.
    pub const ALL: [Dimension; 3] = [Dimension::Year, Dimension::State, Dimension::Month];

    /// Name of the dataset column backing this dimension.
    pub fn column_name(&self) -> &'static str {
        match self {
            Dimension::Year => "Year",
            Dimension::State => "State",
            Dimension::Month => "Month",
        }
    }
}

impl Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column_name())
    }
}

impl FromStr for Dimension {
    type Err = UnknownDimension;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dimension::ALL
            .into_iter()
            .find(|d| d.column_name() == s)
            .ok_or_else(|| UnknownDimension(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_column_names() {
        for dimension in Dimension::ALL {
            assert_eq!(dimension.to_string().parse::<Dimension>(), Ok(dimension));
        }
    }

    #[test]
    fn rejects_unknown_names() {
        assert_eq!(
            "year".parse::<Dimension>(),
            Err(UnknownDimension("year".to_string()))
        );
        assert!("Speed Limit".parse::<Dimension>().is_err());
        assert!("".parse::<Dimension>().is_err());
    }

    #[test]
    fn defaults_to_year() {
        assert_eq!(Dimension::default(), Dimension::Year);
    }
}
