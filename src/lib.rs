//! Turns untrusted model output into fully-populated market research reports.
//!
//! Raw text flows through [`parser::extract_payload`], [`parser::parse_lenient`]
//! and [`report::normalize`], which never fails. [`classify`] and
//! [`markup::render_blocks`] work on individual report fields, and
//! [`output::to_plain_text`] flattens a report for export.

pub mod classify;
pub mod config;
pub mod error;
pub mod markup;
pub mod output;
pub mod parser;
pub mod provider;
pub mod report;
pub mod runner;

pub use classify::{classify, Axis, Bucket};
pub use markup::{render_blocks, Block, Span};
pub use output::to_plain_text;
pub use report::{normalize, Payload, Report};
