#![forbid(unsafe_code)]

//! Call-log filter demo: two independent multi-select dropdowns over
//! IzenDoc-style sample data.

pub mod app;
pub mod cli;
pub mod terminal;
