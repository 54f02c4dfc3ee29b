pub mod config;
pub mod convert;
pub mod error;
pub mod execution;
pub mod fetch;
pub mod output;
pub mod playlist;
pub mod time;

mod sync;

pub use error::{Error, Result};
