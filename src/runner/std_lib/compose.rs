//! Root capabilities: `extend`, `override` and `create`.
//!
//! Installed as hidden own keys on a realm's root node, so every node built from
//! that root inherits them and can itself be extended or overridden.

use std::rc::Rc;

use crate::runner::config::ComposeConfig;
use crate::runner::ds::error::ComposeError;
use crate::runner::ds::function_object::Function;
use crate::runner::ds::node::NodeRef;
use crate::runner::ds::object_property::{Property, PropertyKey};
use crate::runner::ds::operations::compose;
use crate::runner::ds::value::Value;

lazy_static! {
    pub static ref EXTEND_KEY: PropertyKey = PropertyKey::Str("extend".to_string());
    pub static ref OVERRIDE_KEY: PropertyKey = PropertyKey::Str("override".to_string());
    pub static ref CREATE_KEY: PropertyKey = PropertyKey::Str("create".to_string());
}

/// Install the capabilities on `root`.
pub fn register(root: &NodeRef, config: Rc<ComposeConfig>) {
    let extend_config = config.clone();
    let extend = Function::closure("extend", move |this, args| {
        let props = args.into_iter().next().unwrap_or(Value::Undefined);
        compose::extend(this, &props, &extend_config).map(Value::Object)
    });

    let create_config = config;
    let create = Function::closure("create", move |this, _args| {
        compose::create_empty(this, &create_config).map(Value::Object)
    });

    root.define_own_property(EXTEND_KEY.clone(), Property::hidden(Value::Function(extend)));
    root.define_own_property(
        OVERRIDE_KEY.clone(),
        Property::hidden(Value::Function(Function::native("override", override_capability))),
    );
    root.define_own_property(CREATE_KEY.clone(), Property::hidden(Value::Function(create)));
}

/// `override(name, replacement)`
fn override_capability(this: &NodeRef, args: Vec<Value>) -> Result<Value, ComposeError> {
    let mut args = args.into_iter();
    let name = args.next().unwrap_or(Value::Undefined);
    let replacement = args.next().unwrap_or(Value::Undefined);

    let key = PropertyKey::from_method_name_value(&name)?;
    let replacement = match replacement {
        Value::Function(f) => f,
        other => {
            return Err(ComposeError::InvalidArgument(format!(
                "replacement for `{}` must be a function, got {}",
                key,
                other.type_name()
            )))
        }
    };
    compose::override_method(this, &key, replacement).map(Value::Object)
}
