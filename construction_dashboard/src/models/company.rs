//! The fixed catalog of listed construction companies the dashboard covers.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::models::selection::ParseSelectionError;

/// A Brazilian homebuilder listed on B3.
///
/// The set is closed: the dashboard never queries symbols outside this list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Company {
    Cyrela,
    Mrv,
    Eztec,
    Even,
    Direcional,
    Tenda,
}

impl Company {
    /// All companies, in the order they are offered for selection.
    pub const ALL: [Company; 6] = [
        Company::Cyrela,
        Company::Mrv,
        Company::Eztec,
        Company::Even,
        Company::Direcional,
        Company::Tenda,
    ];

    /// Display name as shown in the company picker.
    pub fn name(self) -> &'static str {
        match self {
            Company::Cyrela => "Cyrela",
            Company::Mrv => "MRV",
            Company::Eztec => "Eztec",
            Company::Even => "Even",
            Company::Direcional => "Direcional",
            Company::Tenda => "Tenda",
        }
    }

    /// Exchange ticker as understood by the quote provider.
    pub fn symbol(self) -> &'static str {
        match self {
            Company::Cyrela => "CYRE3.SA",
            Company::Mrv => "MRVE3.SA",
            Company::Eztec => "EZTC3.SA",
            Company::Even => "EVEN3.SA",
            Company::Direcional => "DIRR3.SA",
            Company::Tenda => "TEND3.SA",
        }
    }

    /// Position of this company in [`Company::ALL`].
    pub fn position(self) -> usize {
        Company::ALL
            .iter()
            .position(|c| *c == self)
            .unwrap_or_default()
    }
}

impl Default for Company {
    fn default() -> Self {
        Company::ALL[0]
    }
}

impl fmt::Display for Company {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Company {
    type Err = ParseSelectionError;

    /// Accepts either the display name or the ticker, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Company::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(wanted) || c.symbol().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseSelectionError::UnknownCompany(wanted.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_matches_listed_tickers() {
        let pairs: Vec<(&str, &str)> = Company::ALL.iter().map(|c| (c.name(), c.symbol())).collect();
        assert_eq!(
            pairs,
            vec![
                ("Cyrela", "CYRE3.SA"),
                ("MRV", "MRVE3.SA"),
                ("Eztec", "EZTC3.SA"),
                ("Even", "EVEN3.SA"),
                ("Direcional", "DIRR3.SA"),
                ("Tenda", "TEND3.SA"),
            ]
        );
    }

    #[test]
    fn parses_name_or_symbol() {
        assert_eq!("mrv".parse::<Company>().unwrap(), Company::Mrv);
        assert_eq!(" TEND3.SA ".parse::<Company>().unwrap(), Company::Tenda);
        assert!(matches!(
            "Gafisa".parse::<Company>(),
            Err(ParseSelectionError::UnknownCompany(name)) if name == "Gafisa"
        ));
    }

    #[test]
    fn position_follows_picker_order() {
        for (i, company) in Company::ALL.iter().enumerate() {
            assert_eq!(company.position(), i);
        }
    }
}
