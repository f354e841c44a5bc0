//! Conversion tests
//!
//! Whole page conversions through the public entry point.

mod documents;
mod links;
mod properties;
mod rules;
