//! Mock construction helpers

use mockall::mock;
use nodedump_rs::catalog::FunctionInfo;
use nodedump_rs::error::{DumpError, Result};
use nodedump_rs::pipeline::{
    DocumentWriter, NodeFactory, NodeHandle, NodeTemplate, RawPin, SignatureNodeFactory,
};
use nodedump_rs::NodeDescriptor;
use std::path::Path;

mock! {
    pub Writer {}

    impl DocumentWriter for Writer {
        fn write_document(&mut self, descriptors: &[NodeDescriptor], path: &Path) -> Result<()>;
    }
}

/// Permission-denied IO error for simulating an unwritable destination
pub fn denied() -> DumpError {
    DumpError::Io(std::io::Error::new(
        std::io::ErrorKind::PermissionDenied,
        "destination is read-only",
    ))
}

/// Signature factory that refuses or breaks selected functions.
///
/// Tracks instantiate/dispose pairs so tests can check nothing leaks.
#[derive(Default)]
pub struct FaultyFactory {
    inner: SignatureNodeFactory,
    /// Functions whose node cannot be instantiated
    pub refuse: Vec<String>,
    /// Functions whose pins cannot be populated
    pub break_pins: Vec<String>,
    broken_handles: Vec<u64>,
    pub instantiated: usize,
    pub disposed: usize,
}

impl FaultyFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse to instantiate nodes for a function
    pub fn refusing(mut self, function: &str) -> Self {
        self.refuse.push(function.to_string());
        self
    }

    /// Fail pin population for a function's nodes
    pub fn breaking_pins(mut self, function: &str) -> Self {
        self.break_pins.push(function.to_string());
        self
    }

    pub fn live_count(&self) -> usize {
        self.inner.live_count()
    }
}

fn template_function<'a>(template: &NodeTemplate<'a>) -> Option<&'a FunctionInfo> {
    match template {
        NodeTemplate::Function { function, .. } | NodeTemplate::Event { function, .. } => {
            Some(*function)
        }
        NodeTemplate::ControlFlow(_) => None,
    }
}

impl NodeFactory for FaultyFactory {
    fn instantiate(&mut self, template: &NodeTemplate<'_>) -> Result<NodeHandle> {
        let name = template_function(template).map(|f| f.name.clone());
        if let Some(name) = &name {
            if self.refuse.contains(name) {
                return Err(DumpError::NodeFactory(format!("cannot build {}", name)));
            }
        }

        let handle = self.inner.instantiate(template)?;
        self.instantiated += 1;
        if name.is_some_and(|n| self.break_pins.contains(&n)) {
            self.broken_handles.push(handle.0);
        }
        Ok(handle)
    }

    fn title(&self, handle: &NodeHandle) -> Result<String> {
        self.inner.title(handle)
    }

    fn populate_pins(&mut self, handle: &NodeHandle) -> Result<Vec<RawPin>> {
        if self.broken_handles.contains(&handle.0) {
            return Err(DumpError::NodeFactory("pin allocation failed".to_string()));
        }
        self.inner.populate_pins(handle)
    }

    fn dispose(&mut self, handle: NodeHandle) {
        self.disposed += 1;
        self.inner.dispose(handle);
    }
}
