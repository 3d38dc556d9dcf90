//! Lookback windows offered by the dashboard.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::models::selection::ParseSelectionError;

/// Lookback window for a history request.
///
/// The wire form (`"7d"`, `"1mo"`, ...) is passed to the quote provider verbatim
/// as its `range` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Period {
    SevenDays,
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
    FiveYears,
}

impl Period {
    /// All periods, in the order they are offered for selection.
    pub const ALL: [Period; 6] = [
        Period::SevenDays,
        Period::OneMonth,
        Period::ThreeMonths,
        Period::SixMonths,
        Period::OneYear,
        Period::FiveYears,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Period::SevenDays => "7d",
            Period::OneMonth => "1mo",
            Period::ThreeMonths => "3mo",
            Period::SixMonths => "6mo",
            Period::OneYear => "1y",
            Period::FiveYears => "5y",
        }
    }

    /// Position of this period in [`Period::ALL`].
    pub fn position(self) -> usize {
        Period::ALL
            .iter()
            .position(|p| *p == self)
            .unwrap_or_default()
    }
}

impl Default for Period {
    fn default() -> Self {
        Period::ALL[0]
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = ParseSelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Period::ALL
            .into_iter()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| ParseSelectionError::UnknownPeriod(wanted.to_string()))
    }
}

impl TryFrom<String> for Period {
    type Error = ParseSelectionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Period> for String {
    fn from(value: Period) -> Self {
        value.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_forms_are_verbatim() {
        let forms: Vec<&str> = Period::ALL.iter().map(|p| p.as_str()).collect();
        assert_eq!(forms, vec!["7d", "1mo", "3mo", "6mo", "1y", "5y"]);
    }

    #[test]
    fn parse_round_trips_every_period() {
        for period in Period::ALL {
            assert_eq!(period.as_str().parse::<Period>().unwrap(), period);
        }
    }

    #[test]
    fn rejects_unsupported_ranges() {
        // "1mo" is accepted, but only the exact wire form is.
        assert!("1MO".parse::<Period>().is_err());
        assert!("2y".parse::<Period>().is_err());
        assert!(matches!(
            "max".parse::<Period>(),
            Err(ParseSelectionError::UnknownPeriod(p)) if p == "max"
        ));
    }

    #[test]
    fn serializes_as_wire_form() {
        let json = serde_json::to_string(&Period::ThreeMonths).unwrap();
        assert_eq!(json, "\"3mo\"");
        let back: Period = serde_json::from_str("\"1y\"").unwrap();
        assert_eq!(back, Period::OneYear);
    }
}
