//! Collection+JSON style document data.
//!
//! A document's fields are [`Property`] values grouped in an immutable
//! [`Data`]. Data converts to and from generic `serde_json` trees, maps onto
//! caller types through serde, and supplies the variables for [`Target`]
//! URI Templates.

pub mod data;
pub mod error;
pub mod from_json;
pub mod json;
pub mod property;
pub mod target;
pub mod template;
pub mod value;

pub use data::Data;
pub use error::{Error, Result};
pub use property::{Payload, Property};
pub use target::Target;
pub use template::Binding;
pub use value::{Value, ValueKind};
