//! Command-line parsing and output contracts

mod output_contracts;
