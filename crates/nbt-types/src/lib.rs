#![warn(clippy::pedantic)]

pub mod compound;
pub mod error;
pub mod list;
pub mod tag;
pub mod tag_type;

pub use compound::CompoundTag;
pub use error::TypeError;
pub use list::ListTag;
pub use tag::{NamedTag, Tag};
pub use tag_type::TagType;
