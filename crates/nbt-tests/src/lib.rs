//! Shared fixtures for the integration tests, benches, fuzz targets and the
//! golden generator.
//!
//! The production crates only decode. Tests need to produce bytes too, so
//! this crate carries a small reference encoder ([`encode_named`]) and a raw
//! [`PayloadBuilder`] for payloads no well-behaved encoder would emit.

pub mod fixture;

pub use fixture::{PayloadBuilder, encode_mutf8, encode_named, encode_root, sample_player};
