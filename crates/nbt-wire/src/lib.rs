#![warn(clippy::pedantic)]

pub mod error;
pub mod input;
pub mod mutf8;

pub use error::WireError;
pub use input::{DataInput, DataReader};
