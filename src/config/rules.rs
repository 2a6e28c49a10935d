//! Classification rule tables
//!
//! The classifier is driven entirely by these tables, so the rule set can be
//! audited (and overridden from `nodedump.toml`) without touching code.
//!
//! # Rules
//!
//! - **Debug**: the whitespace-stripped display name contains a debug marker
//! - **Essentials**: any of
//!   - a control-flow node whose node-type tag contains a control-flow marker
//!   - a member name exactly equal to an allow-listed name
//!   - an owner path containing the math library marker and a member name
//!     containing a math operation marker
//!
//! The math rule is a broad substring heuristic: any math library member whose
//! name contains `Vector` qualifies, including ones that are not arithmetic.

use serde::{Deserialize, Serialize};

/// Predicate tables used by the classifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRules {
    /// Substrings of the stripped display name that route to Debug
    #[serde(default = "default_debug_name_markers")]
    pub debug_name_markers: Vec<String>,

    /// Substrings of a control-flow node-type tag that route to Essentials
    #[serde(default = "default_control_flow_markers")]
    pub control_flow_markers: Vec<String>,

    /// Member names that route to Essentials on exact match
    #[serde(default = "default_essential_members")]
    pub essential_members: Vec<String>,

    /// Substring of the owner path identifying the math utility library
    #[serde(default = "default_math_library_marker")]
    pub math_library_marker: String,

    /// Substrings of a math library member name that route to Essentials
    #[serde(default = "default_math_operation_markers")]
    pub math_operation_markers: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_debug_name_markers() -> Vec<String> {
    strings(&["PrintString", "DrawDebug"])
}

fn default_control_flow_markers() -> Vec<String> {
    strings(&["IfThenElse", "ExecutionSequence"])
}

fn default_essential_members() -> Vec<String> {
    strings(&["Delay", "RetriggerableDelay", "IsValid"])
}

fn default_math_library_marker() -> String {
    "KismetMathLibrary".to_string()
}

fn default_math_operation_markers() -> Vec<String> {
    strings(&[
        "Add", "Subtract", "Multiply", "Divide", "Equal", "Less", "Greater", "Boolean", "Vector",
    ])
}

impl Default for ClassificationRules {
    fn default() -> Self {
        Self {
            debug_name_markers: default_debug_name_markers(),
            control_flow_markers: default_control_flow_markers(),
            essential_members: default_essential_members(),
            math_library_marker: default_math_library_marker(),
            math_operation_markers: default_math_operation_markers(),
        }
    }
}

impl ClassificationRules {
    /// Stripped display name matches a debug marker
    pub fn is_debug_name(&self, stripped_name: &str) -> bool {
        contains_any(stripped_name, &self.debug_name_markers)
    }

    /// Node-type tag matches a control-flow marker
    pub fn is_essential_control_flow(&self, node_type: &str) -> bool {
        contains_any(node_type, &self.control_flow_markers)
    }

    /// Member name is on the allow-list
    pub fn is_essential_member(&self, member_name: &str) -> bool {
        self.essential_members.iter().any(|m| m == member_name)
    }

    /// Member of the math library whose name matches an operation marker
    pub fn is_essential_math(&self, owner_path: &str, member_name: &str) -> bool {
        !self.math_library_marker.is_empty()
            && owner_path.contains(self.math_library_marker.as_str())
            && contains_any(member_name, &self.math_operation_markers)
    }
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles
        .iter()
        .any(|needle| !needle.is_empty() && haystack.contains(needle.as_str()))
}
