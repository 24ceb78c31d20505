//! Abstract operations over the delegation graph.

pub mod compose;
