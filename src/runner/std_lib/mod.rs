//! Capabilities installed on a realm's root node.

pub mod compose;

pub use compose::register as register_root_capabilities;
