//! Member normalization.
//!
//! Converts each catalog member into one or more [`NodeDescriptor`]s:
//!
//! | Member                | Descriptors                         |
//! |-----------------------|-------------------------------------|
//! | callable/pure function| one `CallFunction`                  |
//! | event                 | one `Event`                         |
//! | property              | `Get <Var>`, plus `Set <Var>` unless read-only |
//! | control-flow primitive| one `ControlFlow`                   |
//!
//! Function, event and primitive pins come from a scratch node built by the
//! [`NodeFactory`]; accessor pins are synthesized by the [`PinResolver`].
//! A malformed member never aborts the run: instantiation failures skip the
//! member, everything else degrades.

use super::node_factory::{ControlFlowPrimitive, NodeFactory, NodeTemplate, RawPin, ScratchNode};
use super::pins::{PinLists, PinResolver};
use crate::catalog::{
    CatalogMember, FunctionInfo, Member, PinType, PropertyInfo, ReflectionCatalog, TypeInfo,
    META_KEYWORDS, META_TOOLTIP,
};
use crate::types::{NodeDescriptor, NodeKind, NO_OWNER};

/// Counters for members that could not be normalized cleanly
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeStats {
    /// Members dropped because no scratch node could be built
    pub skipped: usize,
    /// Members emitted with placeholder pin data
    pub degraded: usize,
}

/// Normalizes catalog members into node descriptors
pub struct MemberNormalizer<'a, C: ReflectionCatalog + ?Sized, F: NodeFactory + ?Sized> {
    catalog: &'a C,
    factory: &'a mut F,
    pins: PinResolver<'a, C>,
    stats: NormalizeStats,
}

impl<'a, C: ReflectionCatalog + ?Sized, F: NodeFactory + ?Sized> MemberNormalizer<'a, C, F> {
    pub fn new(catalog: &'a C, factory: &'a mut F, module_root: &'a str) -> Self {
        Self {
            catalog,
            factory,
            pins: PinResolver::new(catalog, module_root),
            stats: NormalizeStats::default(),
        }
    }

    pub fn stats(&self) -> NormalizeStats {
        self.stats
    }

    /// Normalize one discovered member
    pub fn normalize(&mut self, member: CatalogMember<'_>) -> Vec<NodeDescriptor> {
        match member.member {
            Member::Function(func) => self.normalize_function(member.owner, func),
            Member::Property(prop) => self.normalize_property(member.owner, prop),
        }
    }

    /// Normalize a callable, pure or event function
    pub fn normalize_function(&mut self, owner: &TypeInfo, func: &FunctionInfo) -> Vec<NodeDescriptor> {
        let (kind, template) = if func.is_call() {
            (
                NodeKind::CallFunction,
                NodeTemplate::Function {
                    owner,
                    function: func,
                },
            )
        } else {
            (
                NodeKind::Event,
                NodeTemplate::Event {
                    owner,
                    function: func,
                },
            )
        };

        // Members are named by identifier; the node title only stands in for a
        // missing one.
        let explicit_name = Some(func.name.as_str()).filter(|name| !name.is_empty());
        let Some(mut desc) = self.from_scratch_node(&template, kind, explicit_name) else {
            return Vec::new();
        };

        desc.member_name = func.name.clone();
        desc.owner_path = self.pins.render_type(owner);
        desc.keywords = self.catalog.function_metadata(func, META_KEYWORDS);
        desc.tooltip = self.catalog.function_metadata(func, META_TOOLTIP);

        vec![desc]
    }

    /// Synthesize the getter and, unless read-only, the setter of a property
    pub fn normalize_property(&mut self, owner: &TypeInfo, prop: &PropertyInfo) -> Vec<NodeDescriptor> {
        let pin_type = match self.catalog.resolve_pin_type(prop) {
            Ok(pin_type) => pin_type,
            Err(e) => {
                tracing::warn!("{}; emitting {} with a wildcard pin", e, prop.name);
                self.stats.degraded += 1;
                PinType::wildcard()
            }
        };

        let owner_path = self.pins.render_type(owner);
        let keywords = self.catalog.property_metadata(prop, META_KEYWORDS);

        let accessor = |kind: NodeKind, verb: &str, (inputs, outputs): PinLists| {
            let name = format!("{} {}", verb, prop.name);
            NodeDescriptor {
                tooltip: name.clone(),
                name,
                kind,
                node_type: kind.default_node_type().to_string(),
                member_name: prop.name.clone(),
                owner_path: owner_path.clone(),
                keywords: keywords.clone(),
                inputs,
                outputs,
            }
        };

        let mut descriptors = vec![accessor(
            NodeKind::VariableGet,
            "Get",
            self.pins.getter_pins(owner, &prop.name, &pin_type),
        )];

        if !prop.flags.read_only {
            descriptors.push(accessor(
                NodeKind::VariableSet,
                "Set",
                self.pins.setter_pins(owner, &prop.name, &pin_type),
            ));
        }

        descriptors
    }

    /// Build the descriptor of a hard-coded control-flow primitive
    pub fn normalize_primitive(&mut self, primitive: ControlFlowPrimitive) -> Option<NodeDescriptor> {
        let template = NodeTemplate::ControlFlow(primitive);
        let mut desc =
            self.from_scratch_node(&template, NodeKind::ControlFlow, Some(primitive.display_name()))?;
        desc.node_type = primitive.node_type().to_string();
        desc.owner_path = NO_OWNER.to_string();
        Some(desc)
    }

    /// Build a descriptor from a scratch node's title and pins.
    ///
    /// The node is disposed before returning. `None` if it could not be built.
    fn from_scratch_node(
        &mut self,
        template: &NodeTemplate<'_>,
        kind: NodeKind,
        explicit_name: Option<&str>,
    ) -> Option<NodeDescriptor> {
        let label = template_label(template);

        let (title, raw_pins) = {
            let mut node = match ScratchNode::acquire(&mut *self.factory, template) {
                Ok(node) => node,
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", label, e);
                    self.stats.skipped += 1;
                    return None;
                }
            };

            let title = match explicit_name {
                Some(name) => name.to_string(),
                None => node.title().unwrap_or_else(|e| {
                    tracing::warn!("No title for {}: {}", label, e);
                    label.clone()
                }),
            };

            let raw_pins = node.populate_pins().unwrap_or_else(|e| {
                tracing::warn!("No pins for {}: {}", label, e);
                self.stats.degraded += 1;
                Vec::new()
            });

            (title, raw_pins)
        };

        if raw_pins.iter().any(|p: &RawPin| p.pin_type.is_none()) {
            tracing::debug!("{} has pins without a resolved type", label);
            self.stats.degraded += 1;
        }

        let (inputs, outputs) = self.pins.resolve(&raw_pins);
        let mut desc = NodeDescriptor::new(title, kind);
        desc.inputs = inputs;
        desc.outputs = outputs;
        Some(desc)
    }
}

fn template_label(template: &NodeTemplate<'_>) -> String {
    match template {
        NodeTemplate::Function { owner, function } | NodeTemplate::Event { owner, function } => {
            format!("{}::{}", owner.name, function.name)
        }
        NodeTemplate::ControlFlow(primitive) => primitive.display_name().to_string(),
    }
}
