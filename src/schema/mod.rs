//! # Table Schemas
//!
//! Column names and header validation for the three tables this crate
//! touches:
//!
//! | Table | Columns |
//! |-------|---------|
//! | electrical | `Timestamp, Voltage(V), Current(A), Cycle_Index` (+ optional `Step_Index`) |
//! | optical | `Timestamp, Luminance` |
//! | combined | `Timestamp, Brightness, Brightness_smooth, Voltage(V), Voltage(V)_smooth, Current(mA), Current(mA)_smooth, Cycle_Index, Test Time (h), Brightness Derivative, Brightness Derivative_smooth` |
//!
//! Inputs are validated once, when the header row is read. Row parsing then
//! works from resolved column positions and never looks names up again.

/// Column name constants.
pub mod columns;
mod validation;


pub use validation::{validate_headers, ColumnIndex, SchemaError};
