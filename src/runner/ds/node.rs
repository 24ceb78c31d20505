use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

use log::trace;

use crate::parser::parse_props;
use crate::runner::ds::error::ComposeError;
use crate::runner::ds::function_object::Function;
use crate::runner::ds::object_property::{Property, PropertyKey};
use crate::runner::ds::value::Value;
use crate::runner::std_lib::compose::{CREATE_KEY, EXTEND_KEY, OVERRIDE_KEY};

/// A participant in a delegation chain: own properties plus an optional fallback
/// that answers lookups for keys this node does not hold.
pub struct Node {
    properties: HashMap<PropertyKey, Property>,
    fallback: Option<NodeRef>,
    depth: usize,
}

impl Node {
    fn new(fallback: Option<NodeRef>) -> Self {
        let depth = match &fallback {
            None => 0,
            Some(f) => f.depth() + 1,
        };
        Node {
            properties: HashMap::new(),
            fallback,
            depth,
        }
    }
}

/// Shared handle to a [`Node`]. Clones point at the same node; equality is identity.
#[derive(Clone)]
pub struct NodeRef(Rc<RefCell<Node>>);

impl NodeRef {
    /// A node with no fallback. Used as a root and as a plain props mapping.
    pub fn plain() -> Self {
        NodeRef(Rc::new(RefCell::new(Node::new(None))))
    }

    /// Builds a fallback-less mapping node from key/value pairs. Later pairs win.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<PropertyKey>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let node = NodeRef::plain();
        for (k, v) in pairs {
            node.set(k, v);
        }
        node
    }

    pub(crate) fn with_fallback(fallback: NodeRef) -> Self {
        NodeRef(Rc::new(RefCell::new(Node::new(Some(fallback)))))
    }

    pub fn ptr_eq(&self, other: &NodeRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn fallback(&self) -> Option<NodeRef> {
        self.0.borrow().fallback.clone()
    }

    /// Number of fallback links between this node and its root.
    pub fn depth(&self) -> usize {
        self.0.borrow().depth
    }

    /// Iterates the delegation chain starting with this node and ending at the root.
    pub fn chain(&self) -> Chain {
        Chain {
            next: Some(self.clone()),
        }
    }

    pub fn get_own_property(&self, key: &PropertyKey) -> Option<Property> {
        self.0.borrow().properties.get(key).cloned()
    }

    pub fn has_own(&self, key: &PropertyKey) -> bool {
        self.0.borrow().properties.contains_key(key)
    }

    /// Finds the slot answering `key`: own first, then the first match walking the
    /// fallback chain.
    pub fn lookup_property(&self, key: &PropertyKey) -> Option<Property> {
        for node in self.chain() {
            if let Some(p) = node.get_own_property(key) {
                return Some(p);
            }
        }
        None
    }

    pub fn lookup(&self, key: &PropertyKey) -> Option<Value> {
        self.lookup_property(key).map(|p| p.value)
    }

    /// Like [`lookup`](Self::lookup) but absent keys read as `Undefined`.
    pub fn get(&self, key: impl Into<PropertyKey>) -> Value {
        self.lookup(&key.into()).unwrap_or(Value::Undefined)
    }

    pub fn has_property(&self, key: &PropertyKey) -> bool {
        self.chain().any(|node| node.has_own(key))
    }

    /// Writes an own, enumerable key. Never touches the fallback chain.
    pub fn set(&self, key: impl Into<PropertyKey>, value: impl Into<Value>) {
        self.define_own_property(key.into(), Property::new(value.into()));
    }

    pub fn define_own_property(&self, key: PropertyKey, property: Property) {
        self.0.borrow_mut().properties.insert(key, property);
    }

    pub fn delete_own(&self, key: &PropertyKey) -> bool {
        self.0.borrow_mut().properties.remove(key).is_some()
    }

    /// Own keys in sorted order.
    pub fn own_keys(&self) -> Vec<PropertyKey> {
        let mut keys: Vec<PropertyKey> = self.0.borrow().properties.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn own_enumerable_entries(&self) -> Vec<(PropertyKey, Value)> {
        let mut entries: Vec<(PropertyKey, Value)> = self
            .0
            .borrow()
            .properties
            .iter()
            .filter(|(_, p)| p.enumerable)
            .map(|(k, p)| (k.clone(), p.value.clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    /// Resolves `name` through the chain and calls it with this node as receiver.
    pub fn invoke(
        &self,
        name: impl Into<PropertyKey>,
        args: Vec<Value>,
    ) -> Result<Value, ComposeError> {
        let key = name.into();
        // The borrow is released before the call so method bodies can mutate `this`.
        let method = match self.lookup(&key) {
            Some(Value::Function(f)) => f,
            _ => return Err(ComposeError::NotAMethod(key.to_string())),
        };
        trace!("invoking `{}`", key);
        method.call(self, args)
    }

    pub fn extend(&self, props: &NodeRef) -> Result<NodeRef, ComposeError> {
        self.extend_value(&Value::Object(props.clone()))
    }

    pub fn extend_value(&self, props: &Value) -> Result<NodeRef, ComposeError> {
        let result = self.invoke(EXTEND_KEY.clone(), vec![props.clone()])?;
        expect_node(result, "extend")
    }

    /// Extends with a mapping written as an object literal, e.g. `{ x: 1 }`.
    pub fn extend_from_source(&self, source: &str) -> Result<NodeRef, ComposeError> {
        let props = parse_props(source)?;
        self.extend(&props)
    }

    pub fn create(&self) -> Result<NodeRef, ComposeError> {
        let result = self.invoke(CREATE_KEY.clone(), Vec::new())?;
        expect_node(result, "create")
    }

    pub fn override_method(
        &self,
        name: impl Into<PropertyKey>,
        replacement: Function,
    ) -> Result<NodeRef, ComposeError> {
        let name = name.into().to_value();
        let result = self.invoke(
            OVERRIDE_KEY.clone(),
            vec![name, Value::Function(replacement)],
        )?;
        expect_node(result, "override")
    }
}

fn expect_node(value: Value, operation: &str) -> Result<NodeRef, ComposeError> {
    match value {
        Value::Object(node) => Ok(node),
        other => Err(ComposeError::InvalidTarget(format!(
            "`{}` returned {} instead of an object",
            operation,
            other.type_name()
        ))),
    }
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Display for NodeRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let keys: Vec<String> = self.own_keys().iter().map(|k| k.to_string()).collect();
        write!(f, "[object {{{}}}]", keys.join(", "))
    }
}

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "NodeRef(depth: {}, own: {})", self.depth(), self)
    }
}

pub struct Chain {
    next: Option<NodeRef>,
}

impl Iterator for Chain {
    type Item = NodeRef;

    fn next(&mut self) -> Option<NodeRef> {
        let current = self.next.take()?;
        self.next = current.fallback();
        Some(current)
    }
}
