//! Core data types for nodedump-rs
//!
//! This module contains the descriptor records written to the output
//! documents and the bucket tags used to route them.
//!
//! # Main Types
//!
//! - [`NodeDescriptor`] - One potential graph node (function, event, accessor or primitive)
//! - [`PinDescriptor`] - One typed connector on a node
//! - [`NodeKind`] - Tag for the kind of member a descriptor was built from
//! - [`Bucket`] / [`BucketSet`] - Output classifications
//!
//! # Wire Format
//!
//! Descriptors serialize with camelCase keys in declaration order, so two
//! runs over the same catalog produce byte-identical documents.

use serde::{Deserialize, Serialize};

/// Owner path used for nodes that are not declared on any type
pub const NO_OWNER: &str = "None";

/// The kind of member a node descriptor was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// A callable or pure member function
    CallFunction,
    /// An externally triggerable event
    Event,
    /// Synthesized property read accessor
    VariableGet,
    /// Synthesized property write accessor
    VariableSet,
    /// Hard-coded control-flow primitive (Branch, Sequence)
    ControlFlow,
}

impl NodeKind {
    /// Default host node-class tag for this kind.
    ///
    /// Control-flow primitives carry their own tag, see
    /// [`ControlFlowPrimitive::node_type`](crate::pipeline::ControlFlowPrimitive::node_type).
    pub fn default_node_type(&self) -> &'static str {
        match self {
            NodeKind::CallFunction => "K2Node_CallFunction",
            NodeKind::Event => "K2Node_Event",
            NodeKind::VariableGet => "K2Node_VariableGet",
            NodeKind::VariableSet => "K2Node_VariableSet",
            NodeKind::ControlFlow => "K2Node",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            NodeKind::CallFunction => "CallFunction",
            NodeKind::Event => "Event",
            NodeKind::VariableGet => "VariableGet",
            NodeKind::VariableSet => "VariableSet",
            NodeKind::ControlFlow => "ControlFlow",
        };
        write!(f, "{}", name)
    }
}

/// Whether a pin is an input or output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PinDirection {
    Input,
    Output,
}

/// Container wrapping a pin's value type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ContainerShape {
    #[default]
    None,
    Array,
    Set,
    Map,
}

/// Well-known pin categories
pub mod category {
    pub const EXEC: &str = "exec";
    pub const OBJECT: &str = "object";
    pub const BOOLEAN: &str = "bool";
    pub const DELEGATE: &str = "delegate";
    pub const WILDCARD: &str = "wildcard";
    /// Subcategory marking an implicit self pin
    pub const SELF_SUBCATEGORY: &str = "self";
}

/// Well-known pin names
pub mod pin_name {
    pub const EXECUTE: &str = "execute";
    pub const THEN: &str = "then";
    pub const SELF: &str = "self";
    pub const WORLD_CONTEXT: &str = "WorldContextObject";
    pub const RETURN_VALUE: &str = "ReturnValue";
    /// Prefix of the pass-through value pin on setters
    pub const SETTER_OUTPUT_PREFIX: &str = "Output_";
}

/// One connector on a node descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinDescriptor {
    pub pin_name: String,
    pub direction: PinDirection,
    pub category: String,
    pub subcategory: String,
    /// Rendered path of the referenced struct/class/enum, empty if none
    pub referenced_type_path: String,
    pub container_shape: ContainerShape,
    pub is_reference: bool,
    pub is_const: bool,
    pub is_hidden: bool,
    pub default_value: String,
}

impl PinDescriptor {
    /// Create a pin with only a name, direction and category set
    pub fn new(pin_name: impl Into<String>, direction: PinDirection, category: &str) -> Self {
        Self {
            pin_name: pin_name.into(),
            direction,
            category: category.to_string(),
            subcategory: String::new(),
            referenced_type_path: String::new(),
            container_shape: ContainerShape::None,
            is_reference: false,
            is_const: false,
            is_hidden: false,
            default_value: String::new(),
        }
    }

    /// Create an execution-flow pin
    pub fn exec(pin_name: impl Into<String>, direction: PinDirection) -> Self {
        Self::new(pin_name, direction, category::EXEC)
    }

    /// Check if this pin carries execution flow rather than data
    pub fn is_exec(&self) -> bool {
        self.category == category::EXEC
    }
}

/// Canonical record describing one potential graph node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescriptor {
    pub name: String,
    pub kind: NodeKind,
    /// Host node-class tag (e.g. `K2Node_CallFunction`)
    pub node_type: String,
    /// Underlying member identifier, empty for control-flow primitives
    pub member_name: String,
    pub owner_path: String,
    pub keywords: String,
    pub tooltip: String,
    pub inputs: Vec<PinDescriptor>,
    pub outputs: Vec<PinDescriptor>,
}

impl NodeDescriptor {
    /// Create an empty descriptor of the given kind
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            node_type: kind.default_node_type().to_string(),
            member_name: String::new(),
            owner_path: NO_OWNER.to_string(),
            keywords: String::new(),
            tooltip: String::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Display name with all whitespace removed
    pub fn stripped_name(&self) -> String {
        self.name.chars().filter(|c| !c.is_whitespace()).collect()
    }

    /// Find an input pin by name
    pub fn input(&self, pin_name: &str) -> Option<&PinDescriptor> {
        self.inputs.iter().find(|p| p.pin_name == pin_name)
    }

    /// Find an output pin by name
    pub fn output(&self, pin_name: &str) -> Option<&PinDescriptor> {
        self.outputs.iter().find(|p| p.pin_name == pin_name)
    }
}

/// Named output classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bucket {
    Full,
    Essentials,
    Debug,
}

impl Bucket {
    /// All buckets in write order
    pub fn all() -> &'static [Bucket] {
        &[Bucket::Full, Bucket::Essentials, Bucket::Debug]
    }

    /// Name used in output file names and logs
    pub fn name(&self) -> &'static str {
        match self {
            Bucket::Full => "Full",
            Bucket::Essentials => "Essentials",
            Bucket::Debug => "Debug",
        }
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Set of buckets a descriptor belongs to. Full is always present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BucketSet {
    pub essentials: bool,
    pub debug: bool,
}

impl Default for BucketSet {
    fn default() -> Self {
        Self::full_only()
    }
}

impl BucketSet {
    /// Membership in Full only
    pub fn full_only() -> Self {
        Self {
            essentials: false,
            debug: false,
        }
    }

    /// Check membership of a bucket
    pub fn contains(&self, bucket: Bucket) -> bool {
        match bucket {
            Bucket::Full => true,
            Bucket::Essentials => self.essentials,
            Bucket::Debug => self.debug,
        }
    }

    /// Iterate member buckets in write order
    pub fn iter(&self) -> impl Iterator<Item = Bucket> + '_ {
        Bucket::all().iter().copied().filter(|b| self.contains(*b))
    }
}
