//! Core data structures for series analysis.

mod dataset;
mod forecast;
pub mod guard;
mod series;

pub use dataset::Dataset;
pub use forecast::{Forecast, ForecastWithHistory};
pub use guard::{guard, DegeneratePolicy, Degeneracy, Guarded};
pub use series::{Series, TimeLabel};
