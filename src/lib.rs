pub mod aggregate;
pub mod builders;
pub mod curve;
pub mod driver;
pub mod errors;
pub mod input;
pub mod output;
mod parallelism;
pub mod scored_data;
pub mod transform;
