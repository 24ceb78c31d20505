use log::debug;

use crate::runner::config::ComposeConfig;
use crate::runner::ds::error::ComposeError;
use crate::runner::ds::function_object::Function;
use crate::runner::ds::node::NodeRef;
use crate::runner::ds::object_property::{Property, PropertyKey};
use crate::runner::ds::value::Value;

/// Creates a node delegating to `base` and copies the own enumerable keys of
/// `props` onto it. `base` is never mutated.
///
/// `props` must be an object. `undefined`/`null` read as an empty mapping unless
/// the config says otherwise.
pub fn extend(
    base: &NodeRef,
    props: &Value,
    config: &ComposeConfig,
) -> Result<NodeRef, ComposeError> {
    let entries = match props {
        Value::Object(mapping) => mapping.own_enumerable_entries(),
        Value::Undefined | Value::Null if config.coerce_nullish_props => Vec::new(),
        other => {
            return Err(ComposeError::InvalidTarget(format!(
                "props mapping must be an object, got {}",
                other.type_name()
            )))
        }
    };
    check_depth(base, config)?;

    let node = NodeRef::with_fallback(base.clone());
    for (key, value) in entries {
        node.define_own_property(key, Property::new(value));
    }
    debug!(
        "extended node at depth {} with {} own key(s)",
        node.depth(),
        node.own_keys().len()
    );
    Ok(node)
}

/// A pure delegation node with no own keys.
pub fn create_empty(base: &NodeRef, config: &ComposeConfig) -> Result<NodeRef, ComposeError> {
    check_depth(base, config)?;
    let node = NodeRef::with_fallback(base.clone());
    debug!("created empty node at depth {}", node.depth());
    Ok(node)
}

fn check_depth(base: &NodeRef, config: &ComposeConfig) -> Result<(), ComposeError> {
    if let Some(limit) = config.max_chain_depth {
        // The new node's chain holds base's chain plus itself.
        if base.depth() + 2 > limit {
            return Err(ComposeError::ChainTooDeep { limit });
        }
    }
    Ok(())
}

/// Replaces `target`'s own `key` slot with a wrapper around the method currently
/// reachable from `target`. The reachable method is captured once, here.
///
/// Ancestors are left untouched: overriding an inherited method shadows it for
/// `target` and whatever delegates to `target`.
pub fn override_method(
    target: &NodeRef,
    key: &PropertyKey,
    replacement: Function,
) -> Result<NodeRef, ComposeError> {
    key.validate_method_name()?;
    let current = match target.lookup_property(key) {
        Some(p) => p,
        None => return Err(ComposeError::NotAMethod(key.to_string())),
    };
    let original = match current.value {
        Value::Function(f) => f,
        _ => return Err(ComposeError::NotAMethod(key.to_string())),
    };

    let wrapper = Function::new_override(original, replacement);
    target.define_own_property(
        key.clone(),
        Property {
            value: Value::Function(wrapper),
            enumerable: current.enumerable,
        },
    );
    debug!("installed override of `{}` at depth {}", key, target.depth());
    Ok(target.clone())
}
