#![warn(clippy::pedantic)]

pub mod config;
pub mod decoder;
pub mod error;

mod context;

pub use config::DecoderConfig;
pub use decoder::BoundedTreeDecoder;
pub use error::{DecodeError, Limit, UnsafePayload};
