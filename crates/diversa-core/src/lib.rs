//! # Diversa Core
//!
//! Portfolio holdings model and concentration metrics.
//!
//! This crate holds the one piece of the system worth specifying formally:
//! the Herfindahl-Hirschman Index and its normalized form, computed over a
//! validated list of holdings. Everything else in the workspace is plumbing
//! around it.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: all calculations are stateless with explicit inputs
//! - **Validated construction**: holdings and bands reject bad data at the
//!   edge, so the math never sees it
//! - **Typed rejection**: empty or zero-value portfolios produce errors,
//!   never `NaN`
//!
//! ## Quick Start
//!
//! ```rust
//! use diversa_core::prelude::*;
//!
//! # fn main() -> CoreResult<()> {
//! let holdings = vec![
//!     Holding::new("VTI", dec!(1000))?,
//!     Holding::new("BND", dec!(2500))?,
//! ];
//!
//! let metrics = calculate_concentration(&holdings, &ClassificationBands::default())?;
//! assert_eq!(metrics.holding_count, 2);
//! assert!(metrics.hhi > 0.59 && metrics.hhi < 0.60);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod metrics;
pub mod types;

// Re-export error types at crate root
pub use error::{CoreError, CoreResult};

// Re-export main types
pub use types::{ClassificationBands, DiversificationLevel, Holding, Statement};

// Re-export metrics
pub use metrics::{calculate_concentration, ConcentrationMetrics, HoldingWeight};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::metrics::{calculate_concentration, ConcentrationMetrics, HoldingWeight};
    pub use crate::types::{ClassificationBands, DiversificationLevel, Holding, Statement};

    // Re-export commonly used types from dependencies
    pub use rust_decimal::Decimal;
    pub use rust_decimal_macros::dec;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crate_smoke() {
        let err = CoreError::EmptyStatement;
        assert!(err.to_string().contains("no holdings"));
    }
}
