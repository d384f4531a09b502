//! Project, material and manufacturer records that feed reports

mod fixture;
mod models;
mod source;

pub use fixture::demo_dataset;
pub use models::{Dataset, Manufacturer, Material, MaterialUsage, Project, ProjectStatus};
pub use source::{DataSource, FixtureSource, InMemorySource, JsonFileSource};
