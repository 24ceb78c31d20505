use std::rc::Rc;

use log::debug;

use crate::runner::config::ComposeConfig;
use crate::runner::ds::error::ComposeError;
use crate::runner::ds::node::NodeRef;
use crate::runner::std_lib::register_root_capabilities;

/// Owns a root node carrying the composition capabilities, plus the config those
/// capabilities obey. Every node created from the root shares the config.
pub struct Realm {
    config: Rc<ComposeConfig>,
    root: NodeRef,
}

impl Realm {
    pub fn new() -> Self {
        Self::with_config(ComposeConfig::default())
    }

    pub fn with_config(config: ComposeConfig) -> Self {
        let config = Rc::new(config);
        let root = NodeRef::plain();
        register_root_capabilities(&root, config.clone());
        debug!("realm created with {:?}", config);
        Realm { config, root }
    }

    pub fn root(&self) -> NodeRef {
        self.root.clone()
    }

    pub fn config(&self) -> &ComposeConfig {
        &self.config
    }

    /// A fresh empty node delegating to the root.
    pub fn create(&self) -> Result<NodeRef, ComposeError> {
        self.root.create()
    }
}

impl Default for Realm {
    fn default() -> Self {
        Self::new()
    }
}
