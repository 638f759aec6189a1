//! Source composition for [`TermfolioConfig`](crate::config::TermfolioConfig).

pub mod merge_policy;
pub mod service;
