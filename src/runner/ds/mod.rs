//! Data structures: values, keys, nodes, functions and the realm that roots them.

pub mod error;
pub mod function_object;
pub mod node;
pub mod object_property;
pub mod operations;
pub mod realm;
pub mod symbol;
pub mod value;
