pub mod config;
pub mod error;
pub mod heads;
pub mod ingestion;
pub mod ledger;
pub mod outputs;
pub mod store;

pub use error::{ChargesError, Result};
