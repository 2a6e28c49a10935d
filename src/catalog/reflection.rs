//! Reflection records exposed by a type catalog
//!
//! These are the shapes a host reflection system hands to the walker:
//! types, member functions with their parameters, member properties, and
//! the resolved pin type of a value. All of them deserialize from JSON so a
//! catalog snapshot can be loaded from disk.

use crate::types::ContainerShape;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metadata key holding search keywords
pub const META_KEYWORDS: &str = "Keywords";
/// Metadata key holding the tooltip text
pub const META_TOOLTIP: &str = "ToolTip";
/// Metadata key holding an explicit display name
pub const META_DISPLAY_NAME: &str = "DisplayName";

/// Free-form metadata strings attached to a member
pub type Metadata = BTreeMap<String, String>;

/// The reflection kind of a registered type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReflectionKind {
    #[default]
    Class,
    ScriptStruct,
    Enum,
    /// Any other reflected object (rendered as a bare path)
    Other,
}

impl ReflectionKind {
    /// Name used inside rendered type paths, `None` for bare-path kinds
    pub fn path_tag(&self) -> Option<&'static str> {
        match self {
            ReflectionKind::Class => Some("Class"),
            ReflectionKind::ScriptStruct => Some("ScriptStruct"),
            ReflectionKind::Enum => Some("Enum"),
            ReflectionKind::Other => None,
        }
    }
}

/// A registered type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeInfo {
    /// Short identifier (e.g. `KismetMathLibrary`, `SKEL_MyActor_C`)
    pub name: String,
    /// Fully-qualified path (e.g. `/Script/Engine.KismetMathLibrary`)
    pub path: String,
    #[serde(default)]
    pub kind: ReflectionKind,
    /// Path of the parent type, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub super_path: Option<String>,
}

impl TypeInfo {
    pub fn new(name: impl Into<String>, path: impl Into<String>, kind: ReflectionKind) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind,
            super_path: None,
        }
    }

    /// Set the parent type
    pub fn with_super(mut self, super_path: impl Into<String>) -> Self {
        self.super_path = Some(super_path.into());
        self
    }
}

/// The value type of a pin as resolved by the host
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PinType {
    pub category: String,
    #[serde(default)]
    pub subcategory: String,
    /// Path of the referenced struct/class/enum, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referenced_type: Option<String>,
    #[serde(default)]
    pub container: ContainerShape,
    #[serde(default)]
    pub is_reference: bool,
    #[serde(default)]
    pub is_const: bool,
}

impl PinType {
    /// A plain value of the given category
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            ..Default::default()
        }
    }

    /// A value referencing a reflected type
    pub fn referencing(category: impl Into<String>, type_path: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            referenced_type: Some(type_path.into()),
            ..Default::default()
        }
    }

    /// Placeholder used when the host cannot resolve a type
    pub fn wildcard() -> Self {
        Self::new(crate::types::category::WILDCARD)
    }

    pub fn with_subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = subcategory.into();
        self
    }

    pub fn with_container(mut self, container: ContainerShape) -> Self {
        self.container = container;
        self
    }

    pub fn by_reference(mut self) -> Self {
        self.is_reference = true;
        self
    }

    pub fn as_const(mut self) -> Self {
        self.is_const = true;
        self
    }
}

/// Flags on a member function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FunctionFlags {
    /// Callable from graphs (has execution pins)
    #[serde(default)]
    pub callable: bool,
    /// Side-effect-free callable (no execution pins)
    #[serde(default)]
    pub pure: bool,
    /// Externally triggerable event
    #[serde(default)]
    pub event: bool,
    /// Static function (no implicit self pin)
    #[serde(default)]
    pub is_static: bool,
}

/// How a parameter surfaces on a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ParamRole {
    #[default]
    Input,
    /// Out parameter (written by the callee)
    Output,
    /// The function's return value
    Return,
}

/// A formal parameter of a member function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamInfo {
    pub name: String,
    #[serde(default)]
    pub role: ParamRole,
    /// Resolved pin type, `None` if the host could not resolve it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin_type: Option<PinType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    /// Visibility as declared by the host
    #[serde(default)]
    pub hidden: bool,
}

impl ParamInfo {
    pub fn new(name: impl Into<String>, role: ParamRole, pin_type: PinType) -> Self {
        Self {
            name: name.into(),
            role,
            pin_type: Some(pin_type),
            default_value: None,
            hidden: false,
        }
    }

    pub fn input(name: impl Into<String>, pin_type: PinType) -> Self {
        Self::new(name, ParamRole::Input, pin_type)
    }

    pub fn output(name: impl Into<String>, pin_type: PinType) -> Self {
        Self::new(name, ParamRole::Output, pin_type)
    }

    pub fn return_value(pin_type: PinType) -> Self {
        Self::new(crate::types::pin_name::RETURN_VALUE, ParamRole::Return, pin_type)
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

/// A member function of a type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionInfo {
    pub name: String,
    /// Path of the type that declares this function
    pub declared_on: String,
    #[serde(default)]
    pub flags: FunctionFlags,
    #[serde(default)]
    pub params: Vec<ParamInfo>,
    #[serde(default)]
    pub metadata: Metadata,
}

impl FunctionInfo {
    pub fn new(name: impl Into<String>, declared_on: impl Into<String>, flags: FunctionFlags) -> Self {
        Self {
            name: name.into(),
            declared_on: declared_on.into(),
            flags,
            params: Vec::new(),
            metadata: Metadata::new(),
        }
    }

    pub fn with_param(mut self, param: ParamInfo) -> Self {
        self.params.push(param);
        self
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Check if this function surfaces as a call node
    pub fn is_call(&self) -> bool {
        self.flags.callable || self.flags.pure
    }
}

/// Flags on a member property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PropertyFlags {
    #[serde(default)]
    pub externally_visible: bool,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub read_only: bool,
}

/// A member property of a type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyInfo {
    pub name: String,
    /// Path of the type that declares this property
    pub declared_on: String,
    #[serde(default)]
    pub flags: PropertyFlags,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin_type: Option<PinType>,
    #[serde(default)]
    pub metadata: Metadata,
}

impl PropertyInfo {
    pub fn new(name: impl Into<String>, declared_on: impl Into<String>, pin_type: PinType) -> Self {
        Self {
            name: name.into(),
            declared_on: declared_on.into(),
            flags: PropertyFlags {
                externally_visible: true,
                ..Default::default()
            },
            pin_type: Some(pin_type),
            metadata: Metadata::new(),
        }
    }

    pub fn read_only(mut self) -> Self {
        self.flags.read_only = true;
        self
    }

    pub fn deprecated(mut self) -> Self {
        self.flags.deprecated = true;
        self
    }

    pub fn not_visible(mut self) -> Self {
        self.flags.externally_visible = false;
        self
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflection_kind_tags() {
        assert_eq!(ReflectionKind::Class.path_tag(), Some("Class"));
        assert_eq!(ReflectionKind::ScriptStruct.path_tag(), Some("ScriptStruct"));
        assert_eq!(ReflectionKind::Enum.path_tag(), Some("Enum"));
        assert_eq!(ReflectionKind::Other.path_tag(), None);
    }

    #[test]
    fn test_function_is_call() {
        let pure = FunctionFlags {
            pure: true,
            ..Default::default()
        };
        let event = FunctionFlags {
            event: true,
            ..Default::default()
        };
        assert!(FunctionInfo::new("Add_IntInt", "/Script/Engine.KismetMathLibrary", pure).is_call());
        assert!(!FunctionInfo::new("ReceiveTick", "/Script/Engine.Actor", event).is_call());
    }

    #[test]
    fn test_property_deserializes_with_defaults() {
        let json = r#"{ "name": "Score", "declared_on": "/Game/BP_Player.BP_Player_C" }"#;
        let prop: PropertyInfo = serde_json::from_str(json).unwrap();
        assert!(!prop.flags.externally_visible);
        assert!(prop.pin_type.is_none());
        assert!(prop.metadata.is_empty());
    }
}
