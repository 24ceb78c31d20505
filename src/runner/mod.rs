//! Delegation runtime: nodes, functions, override dispatch and the root realm.

pub mod config;
pub mod ds;
pub mod std_lib;

pub use config::ComposeConfig;
pub use ds::error::ComposeError;
pub use ds::function_object::Function;
pub use ds::node::NodeRef;
pub use ds::realm::Realm;
pub use ds::value::Value;
