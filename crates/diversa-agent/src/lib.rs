//! # Diversa Agent
//!
//! The portfolio analyst: runs the full pipeline for one document.
//!
//! 1. Extract holdings from the PDF (via `diversa-extract`).
//! 2. Compute concentration metrics locally (via `diversa-core`).
//! 3. Ask the model to narrate the computed numbers (optional; a failure
//!    here degrades to a built-in narrative).
//! 4. Render the result as JSON or a plain-text report.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analyst;
pub mod error;
pub mod report;

pub use analyst::{Analysis, Analyst};
pub use error::{AgentError, AgentResult};
pub use report::render_text_report;
