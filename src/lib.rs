//! # protochain - delegation chains with super-forwarding overrides
//!
//! Derive new objects from existing ones without class declarations:
//! - `extend` creates a node that falls back to its base for any key it does not own
//! - `override` replaces a reachable method with a wrapper whose replacement receives
//!   a "super" callable bound to the real receiver
//! - `create` is `extend` with nothing to copy
//!
//! ## Quick Start
//!
//! ```
//! use protochain::runner::{Function, NodeRef, Realm, Value};
//!
//! let realm = Realm::new();
//! let base = realm
//!     .root()
//!     .extend(&NodeRef::from_pairs(vec![("x", Value::from(1i64))]))
//!     .unwrap();
//! base.set(
//!     "describe",
//!     Function::native("describe", |this, _args| {
//!         Ok(Value::String(format!("x={}", this.get("x"))))
//!     }),
//! );
//!
//! let derived = base.create().unwrap();
//! derived
//!     .override_method(
//!         "describe",
//!         Function::replacement("describe", |super_fn, this, args| {
//!             let inner = super_fn.call(this, args)?;
//!             Ok(Value::String(format!("<{}>", inner.as_str().unwrap_or(""))))
//!         }),
//!     )
//!     .unwrap();
//!
//! let leaf = derived.extend_from_source("{ x: 5 }").unwrap();
//! assert_eq!(
//!     leaf.invoke("describe", vec![]).unwrap(),
//!     Value::String("<x=5>".to_string())
//! );
//! ```
//!
//! ## Lookup
//!
//! A node answers a key from its own properties first, then walks its fallback
//! links until the root. Writes always land on the node written to.
//!
//! ```text
//! leaf { x: 5 } ──> derived { describe: override } ──> base { x: 1, describe } ──> root { extend, override, create }
//! ```
//!
//! ## Super calls
//!
//! An override captures the method reachable at declaration time, once. When
//! invoked through some receiver `R`, the replacement gets a super callable as its
//! first argument; that callable runs the captured method with `R` as `this`, so
//! the original sees the state of the object the call went through.
//!
//! ## Architecture
//!
//! - **[`parser`]** - Object-literal reader for props mappings
//! - **[`runner`]** - The delegation runtime
//!   - **[`runner::ds`]** - Values, keys, nodes, functions, realm
//!   - **[`runner::ds::operations`]** - `extend`, `create_empty`, `override_method`
//!   - **[`runner::std_lib`]** - Root capabilities
//!   - **[`runner::config`]** - Composition settings

#[macro_use]
extern crate lazy_static;

pub mod parser;
pub mod runner;
