//! Scratch node instantiation.
//!
//! Some hosts only expose a member's connectors after a node object has been
//! built for it. [`NodeFactory`] is that seam, and [`ScratchNode`] wraps each
//! instance so it is disposed on every exit path, including errors.

use crate::catalog::{FunctionInfo, PinType, TypeInfo};
use crate::error::Result;
use crate::types::PinDirection;

/// A hard-coded control-flow primitive injected after the catalog walk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlFlowPrimitive {
    /// If/else on a boolean condition
    Branch,
    /// Fires its outputs in order
    Sequence,
}

impl ControlFlowPrimitive {
    /// All primitives in injection order
    pub fn all() -> &'static [ControlFlowPrimitive] {
        &[ControlFlowPrimitive::Branch, ControlFlowPrimitive::Sequence]
    }

    /// Display name of the descriptor
    pub fn display_name(&self) -> &'static str {
        match self {
            ControlFlowPrimitive::Branch => "Branch",
            ControlFlowPrimitive::Sequence => "Sequence",
        }
    }

    /// Host node-class tag
    pub fn node_type(&self) -> &'static str {
        match self {
            ControlFlowPrimitive::Branch => "K2Node_IfThenElse",
            ControlFlowPrimitive::Sequence => "K2Node_ExecutionSequence",
        }
    }
}

/// What a scratch node is built from
#[derive(Debug, Clone, Copy)]
pub enum NodeTemplate<'a> {
    /// Call node for a callable or pure function
    Function {
        owner: &'a TypeInfo,
        function: &'a FunctionInfo,
    },
    /// Event node for an externally triggerable event
    Event {
        owner: &'a TypeInfo,
        function: &'a FunctionInfo,
    },
    ControlFlow(ControlFlowPrimitive),
}

/// Opaque handle to a live scratch node
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct NodeHandle(pub u64);

/// A connector as reported by a scratch node, before normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPin {
    pub name: String,
    pub direction: PinDirection,
    /// `None` when the host could not resolve the pin's type
    pub pin_type: Option<PinType>,
    /// Visibility as reported by the host
    pub hidden: bool,
    pub default_value: String,
}

impl RawPin {
    pub fn new(name: impl Into<String>, direction: PinDirection, pin_type: PinType) -> Self {
        Self {
            name: name.into(),
            direction,
            pin_type: Some(pin_type),
            hidden: false,
            default_value: String::new(),
        }
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = value.into();
        self
    }
}

/// Builds transient nodes to obtain their resolved connectors
pub trait NodeFactory {
    /// Build a scratch node. Must not touch persistent host state.
    fn instantiate(&mut self, template: &NodeTemplate<'_>) -> Result<NodeHandle>;

    /// The node's list-view title
    fn title(&self, handle: &NodeHandle) -> Result<String>;

    /// Populate and return the node's connectors in declaration order
    fn populate_pins(&mut self, handle: &NodeHandle) -> Result<Vec<RawPin>>;

    /// Destroy the node
    fn dispose(&mut self, handle: NodeHandle);
}

/// Scoped scratch node; disposed when dropped
pub struct ScratchNode<'f, F: NodeFactory + ?Sized> {
    factory: &'f mut F,
    handle: Option<NodeHandle>,
}

impl<'f, F: NodeFactory + ?Sized> ScratchNode<'f, F> {
    /// Instantiate a node through the factory
    pub fn acquire(factory: &'f mut F, template: &NodeTemplate<'_>) -> Result<Self> {
        let handle = factory.instantiate(template)?;
        Ok(Self {
            factory,
            handle: Some(handle),
        })
    }

    pub fn title(&self) -> Result<String> {
        match &self.handle {
            Some(handle) => self.factory.title(handle),
            None => Ok(String::new()),
        }
    }

    pub fn populate_pins(&mut self) -> Result<Vec<RawPin>> {
        match &self.handle {
            Some(handle) => self.factory.populate_pins(handle),
            None => Ok(Vec::new()),
        }
    }
}

impl<F: NodeFactory + ?Sized> Drop for ScratchNode<'_, F> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.factory.dispose(handle);
        }
    }
}
