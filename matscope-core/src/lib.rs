//! matscope-core: material usage analytics and report generation

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod assistant;
pub mod config;
pub mod data;
pub mod error;
pub mod filters;
pub mod reports;
pub mod service;
pub mod store;

pub use error::{Error, Result};
