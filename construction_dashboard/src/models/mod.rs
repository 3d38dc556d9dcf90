pub mod company;
pub mod period;
pub mod price_series;
pub mod raw_table;
pub mod selection;
