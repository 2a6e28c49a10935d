//! Signature-derived node factory.
//!
//! Derives connectors straight from reflected function signatures, so no
//! host runtime is needed. Control-flow primitives use fixed pin tables.
//!
//! Pin layout for call nodes:
//! - impure: `execute` in, `then` out
//! - `self` in (typed as the owner)
//! - input parameters in, out parameters and the return value out, in
//!   declaration order
//!
//! Event nodes expose `OutputDelegate` and `then` followed by their
//! parameters, all as outputs.

use super::node_factory::{ControlFlowPrimitive, NodeFactory, NodeHandle, NodeTemplate, RawPin};
use crate::catalog::{FunctionInfo, ParamRole, PinType, TypeInfo, META_DISPLAY_NAME};
use crate::error::{DumpError, Result};
use crate::types::{category, pin_name, PinDirection};
use std::collections::HashMap;

/// Pin name of the delegate output on event nodes
const OUTPUT_DELEGATE: &str = "OutputDelegate";

/// A node that has been instantiated but not yet disposed
#[derive(Debug)]
struct LiveNode {
    title: String,
    pins: Vec<RawPin>,
}

/// Pure factory that builds nodes from static signature data
#[derive(Debug, Default)]
pub struct SignatureNodeFactory {
    next_id: u64,
    live: HashMap<u64, LiveNode>,
}

impl SignatureNodeFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes instantiated and not yet disposed
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    fn live(&self, handle: &NodeHandle) -> Result<&LiveNode> {
        self.live
            .get(&handle.0)
            .ok_or_else(|| DumpError::NodeFactory(format!("Unknown node handle {}", handle.0)))
    }
}

impl NodeFactory for SignatureNodeFactory {
    fn instantiate(&mut self, template: &NodeTemplate<'_>) -> Result<NodeHandle> {
        let node = match template {
            NodeTemplate::Function { owner, function } => LiveNode {
                title: function_title(function),
                pins: call_pins(owner, function),
            },
            NodeTemplate::Event { function, .. } => LiveNode {
                title: format!("Event {}", function_title(function)),
                pins: event_pins(function),
            },
            NodeTemplate::ControlFlow(primitive) => LiveNode {
                title: primitive.display_name().to_string(),
                pins: primitive_pins(*primitive),
            },
        };

        self.next_id += 1;
        self.live.insert(self.next_id, node);
        Ok(NodeHandle(self.next_id))
    }

    fn title(&self, handle: &NodeHandle) -> Result<String> {
        Ok(self.live(handle)?.title.clone())
    }

    fn populate_pins(&mut self, handle: &NodeHandle) -> Result<Vec<RawPin>> {
        Ok(self.live(handle)?.pins.clone())
    }

    fn dispose(&mut self, handle: NodeHandle) {
        self.live.remove(&handle.0);
    }
}

/// Title from `DisplayName` metadata, else the identifier split into words
fn function_title(function: &FunctionInfo) -> String {
    match function.metadata.get(META_DISPLAY_NAME) {
        Some(name) if !name.trim().is_empty() => name.clone(),
        _ => display_string(&function.name),
    }
}

/// Convert an identifier into a spaced display string.
///
/// `PrintString` → `Print String`, `Add_VectorVector` → `Add Vector Vector`,
/// `GetHTTPStatus` → `Get HTTP Status`.
pub fn display_string(identifier: &str) -> String {
    let chars: Vec<char> = identifier.chars().collect();
    let mut out = String::with_capacity(identifier.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' {
            if !out.is_empty() && !out.ends_with(' ') {
                out.push(' ');
            }
            continue;
        }

        if c.is_uppercase() && i > 0 && !out.is_empty() && !out.ends_with(' ') {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                out.push(' ');
            }
        }
        out.push(c);
    }

    out.trim_end().to_string()
}

fn self_pin(owner: &TypeInfo) -> RawPin {
    RawPin::new(
        pin_name::SELF,
        PinDirection::Input,
        PinType::referencing(category::OBJECT, owner.path.clone())
            .with_subcategory(category::SELF_SUBCATEGORY),
    )
}

fn exec_pin(name: &str, direction: PinDirection) -> RawPin {
    RawPin::new(name, direction, PinType::new(category::EXEC))
}

fn param_pin(param: &crate::catalog::ParamInfo, direction: PinDirection) -> RawPin {
    RawPin {
        name: param.name.clone(),
        direction,
        pin_type: param.pin_type.clone(),
        hidden: param.hidden,
        default_value: param.default_value.clone().unwrap_or_default(),
    }
}

fn call_pins(owner: &TypeInfo, function: &FunctionInfo) -> Vec<RawPin> {
    let mut pins = Vec::with_capacity(function.params.len() + 3);

    if !function.flags.pure {
        pins.push(exec_pin(pin_name::EXECUTE, PinDirection::Input));
        pins.push(exec_pin(pin_name::THEN, PinDirection::Output));
    }

    let mut this = self_pin(owner);
    this.hidden = function.flags.is_static;
    pins.push(this);

    for param in &function.params {
        let direction = match param.role {
            ParamRole::Input => PinDirection::Input,
            ParamRole::Output | ParamRole::Return => PinDirection::Output,
        };
        pins.push(param_pin(param, direction));
    }

    pins
}

fn event_pins(function: &FunctionInfo) -> Vec<RawPin> {
    let mut pins = vec![
        RawPin::new(
            OUTPUT_DELEGATE,
            PinDirection::Output,
            PinType::new(category::DELEGATE),
        ),
        exec_pin(pin_name::THEN, PinDirection::Output),
    ];

    pins.extend(
        function
            .params
            .iter()
            .filter(|p| p.role != ParamRole::Return)
            .map(|p| param_pin(p, PinDirection::Output)),
    );

    pins
}

fn primitive_pins(primitive: ControlFlowPrimitive) -> Vec<RawPin> {
    match primitive {
        ControlFlowPrimitive::Branch => vec![
            exec_pin(pin_name::EXECUTE, PinDirection::Input),
            RawPin::new("Condition", PinDirection::Input, PinType::new(category::BOOLEAN))
                .with_default("true"),
            exec_pin(pin_name::THEN, PinDirection::Output),
            exec_pin("else", PinDirection::Output),
        ],
        ControlFlowPrimitive::Sequence => vec![
            exec_pin(pin_name::EXECUTE, PinDirection::Input),
            exec_pin("then_0", PinDirection::Output),
            exec_pin("then_1", PinDirection::Output),
        ],
    }
}
