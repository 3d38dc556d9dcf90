//! Provider abstraction for historical quote sources.
//!
//! This module defines the [`DataProvider`] trait, the single seam between the
//! dashboard and a remote market-data service. A provider answers one
//! [`Selection`] with one [`RawTable`]: the table is empty when the service has no
//! data for the request, and an error is returned only when the request itself
//! failed.
//!
//! The trait is designed for async usage and supports dynamic dispatch
//! (`dyn DataProvider`) so the interactive loop and tests can swap sources.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use construction_dashboard::models::{
//!     raw_table::{Columns, RawTable},
//!     selection::Selection,
//! };
//! use construction_dashboard::providers::{DataProvider, ProviderError};
//!
//! struct NothingProvider;
//!
//! #[async_trait]
//! impl DataProvider for NothingProvider {
//!     async fn fetch_history(&self, _selection: Selection) -> Result<RawTable, ProviderError> {
//!         Ok(RawTable::empty(Columns::Flat(vec![])))
//!     }
//! }
//! ```

pub mod yahoo_chart;

use async_trait::async_trait;
use snafu::{Backtrace, Snafu};

use crate::models::{raw_table::RawTable, selection::Selection};

/// Trait for fetching daily price history from a market data provider.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Fetches the daily history for the selection's symbol over its period.
    ///
    /// # Returns
    ///
    /// * `Ok(RawTable)` - Provider-shaped table; empty when there is no data.
    /// * `Err(ProviderError)` - The request could not be completed.
    async fn fetch_history(&self, selection: Selection) -> Result<RawTable, ProviderError>;
}

/// Errors that can occur during the creation of a provider instance.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderInitError {
    /// failed to init reqwest client
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// User agent contains characters not allowed in a header.
    #[snafu(display("Invalid user agent: {source}"))]
    InvalidUserAgent {
        source: reqwest::header::InvalidHeaderValue,
        backtrace: Backtrace,
    },
}

/// Errors that can occur within a `DataProvider` implementation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderError {
    /// An error during an API request (e.g., network failure, timeout).
    #[snafu(display("API request failed: {source}"))]
    Reqwest {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The provider's API returned an error payload or status.
    #[snafu(display("API error: {message}"))]
    Api {
        message: String,
        backtrace: Backtrace,
    },

    /// The response body did not have the expected shape.
    #[snafu(display("Malformed response: {source}"))]
    Decode {
        source: serde_json::Error,
        backtrace: Backtrace,
    },

    /// An internal error occurred while processing data within the provider.
    #[snafu(display("Internal provider error: {message}"))]
    Internal {
        message: String,
        backtrace: Backtrace,
    },
}
