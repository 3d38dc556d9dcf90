//! The user's current choice, passed by value through fetch, normalize and render.

use serde::Serialize;
use thiserror::Error;

use crate::models::{company::Company, period::Period};

/// Errors raised when a company or period cannot be resolved from text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseSelectionError {
    #[error("Unknown company: {0}")]
    UnknownCompany(String),

    #[error("Unsupported period: {0} (expected one of 7d, 1mo, 3mo, 6mo, 1y, 5y)")]
    UnknownPeriod(String),
}

/// An immutable (company, period) request.
///
/// A new value is built whenever the user changes either picker; nothing else
/// about the previous request is carried forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Selection {
    pub company: Company,
    pub period: Period,
}

impl Selection {
    pub fn new(company: Company, period: Period) -> Self {
        Self { company, period }
    }

    /// Ticker sent to the provider.
    pub fn symbol(&self) -> &'static str {
        self.company.symbol()
    }

    pub fn with_company(self, company: Company) -> Self {
        Self { company, ..self }
    }

    pub fn with_period(self, period: Period) -> Self {
        Self { period, ..self }
    }

    /// Heading shown above the results, e.g. `Historical data for Cyrela (CYRE3.SA) over 1mo`.
    pub fn heading(&self) -> String {
        format!(
            "Historical data for {} ({}) over {}",
            self.company.name(),
            self.symbol(),
            self.period
        )
    }
}
