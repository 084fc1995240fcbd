//! Core types: holdings, statements, and classification.

mod classification;
mod holding;
mod statement;

pub use classification::{ClassificationBands, DiversificationLevel};
pub use holding::Holding;
pub use statement::Statement;
