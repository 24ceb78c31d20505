//! Object-literal reader for props mappings.

mod api;

pub use api::{parse_props, PropsParser};
