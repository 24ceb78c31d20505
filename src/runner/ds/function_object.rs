use std::fmt;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

use log::trace;

use crate::runner::ds::error::ComposeError;
use crate::runner::ds::node::NodeRef;
use crate::runner::ds::value::Value;

/// Signature for compiled-in methods. The receiver is always passed explicitly.
pub type NativeFn = fn(this: &NodeRef, args: Vec<Value>) -> Result<Value, ComposeError>;

pub type ClosureFn = dyn Fn(&NodeRef, Vec<Value>) -> Result<Value, ComposeError>;

pub enum FunctionKind {
    /// Direct function pointer.
    Native(NativeFn),

    /// Boxed closure, may capture state.
    Closure(Box<ClosureFn>),

    /// Wrapper installed by `override`. `original` is the exact function that was
    /// reachable when the override was declared; it is never re-resolved.
    Override(OverrideRecord),

    /// The super callable handed to a replacement. Calls `original` with the
    /// receiver captured at dispatch time, whatever it is invoked through.
    Super(SuperBinding),
}

pub struct OverrideRecord {
    pub original: Function,
    pub replacement: Function,
}

pub struct SuperBinding {
    pub original: Function,
    pub receiver: NodeRef,
}

/// A callable value. Clones share the same underlying function, and equality is
/// identity, so a wrapper's captured original can be checked with `==`.
#[derive(Clone)]
pub struct Function {
    name: Rc<str>,
    kind: Rc<FunctionKind>,
}

impl Function {
    pub fn native(name: &str, f: NativeFn) -> Self {
        Function {
            name: Rc::from(name),
            kind: Rc::new(FunctionKind::Native(f)),
        }
    }

    pub fn closure<F>(name: &str, f: F) -> Self
    where
        F: Fn(&NodeRef, Vec<Value>) -> Result<Value, ComposeError> + 'static,
    {
        Function {
            name: Rc::from(name),
            kind: Rc::new(FunctionKind::Closure(Box::new(f))),
        }
    }

    /// Adapts a typed replacement into a function usable with `override`. The super
    /// callable is peeled off the front of the argument list and handed over
    /// separately.
    pub fn replacement<F>(name: &str, f: F) -> Self
    where
        F: Fn(&Function, &NodeRef, Vec<Value>) -> Result<Value, ComposeError> + 'static,
    {
        let fn_name = name.to_string();
        Function::closure(name, move |this, mut args| {
            let super_fn = match args.first() {
                Some(Value::Function(s)) => s.clone(),
                _ => {
                    return Err(ComposeError::InvalidArgument(format!(
                        "replacement `{}` expects a super callable as its first argument",
                        fn_name
                    )))
                }
            };
            args.remove(0);
            f(&super_fn, this, args)
        })
    }

    pub(crate) fn new_override(original: Function, replacement: Function) -> Self {
        Function {
            name: original.name.clone(),
            kind: Rc::new(FunctionKind::Override(OverrideRecord {
                original,
                replacement,
            })),
        }
    }

    fn new_super(original: Function, receiver: NodeRef) -> Self {
        Function {
            name: Rc::from(format!("super {}", original.name).as_str()),
            kind: Rc::new(FunctionKind::Super(SuperBinding { original, receiver })),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &FunctionKind {
        &self.kind
    }

    /// The function this wrapper's super call reaches, if this is an override.
    pub fn overridden(&self) -> Option<&Function> {
        match &*self.kind {
            FunctionKind::Override(record) => Some(&record.original),
            _ => None,
        }
    }

    /// Calls the function with `this` as receiver.
    pub fn call(&self, this: &NodeRef, args: Vec<Value>) -> Result<Value, ComposeError> {
        match &*self.kind {
            FunctionKind::Native(f) => f(this, args),
            FunctionKind::Closure(f) => f(this, args),
            FunctionKind::Override(record) => {
                trace!("dispatching override of `{}`", self.name);
                let super_fn = Function::new_super(record.original.clone(), this.clone());
                let mut full_args = Vec::with_capacity(args.len() + 1);
                full_args.push(Value::Function(super_fn));
                full_args.extend(args);
                record.replacement.call(this, full_args)
            }
            FunctionKind::Super(binding) => binding.original.call(&binding.receiver, args),
        }
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.kind, &other.kind)
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "function {}()", self.name)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let kind = match &*self.kind {
            FunctionKind::Native(_) => "native",
            FunctionKind::Closure(_) => "closure",
            FunctionKind::Override(_) => "override",
            FunctionKind::Super(_) => "super",
        };
        write!(f, "Function({}, {})", self.name, kind)
    }
}
