//! Pin resolution.
//!
//! Turns raw scratch-node connectors into [`PinDescriptor`]s, and synthesizes
//! the fixed connector sets of property accessors.
//!
//! Referenced types render as `<module-root>.<Kind>'<path>'` for classes,
//! structs and enums, and as the bare path for other reflected objects. A
//! reference the catalog cannot resolve renders as an empty string.

use super::node_factory::RawPin;
use crate::catalog::{PinType, ReflectionCatalog, TypeInfo};
use crate::types::{category, pin_name, PinDescriptor, PinDirection};

/// Pins that are implementation plumbing and always hidden
const ALWAYS_HIDDEN: &[&str] = &[pin_name::WORLD_CONTEXT, pin_name::SELF];

/// Ordered input and output pins of one node
pub type PinLists = (Vec<PinDescriptor>, Vec<PinDescriptor>);

/// Resolves pin types against a catalog
pub struct PinResolver<'a, C: ReflectionCatalog + ?Sized> {
    catalog: &'a C,
    module_root: &'a str,
}

impl<'a, C: ReflectionCatalog + ?Sized> PinResolver<'a, C> {
    pub fn new(catalog: &'a C, module_root: &'a str) -> Self {
        Self {
            catalog,
            module_root,
        }
    }

    /// Render a type as `<module-root>.<Kind>'<path>'` or its bare path
    pub fn render_type(&self, ty: &TypeInfo) -> String {
        match ty.kind.path_tag() {
            Some(tag) => format!("{}.{}'{}'", self.module_root, tag, ty.path),
            None => ty.path.clone(),
        }
    }

    /// Render a referenced type path, empty when absent or unresolvable
    pub fn render_reference(&self, type_path: Option<&str>) -> String {
        let Some(path) = type_path.filter(|p| !p.is_empty()) else {
            return String::new();
        };

        match self.catalog.find_type(path) {
            Some(ty) => self.render_type(ty),
            None => {
                tracing::debug!("Unresolved type reference {}", path);
                String::new()
            }
        }
    }

    /// Convert a raw pin, applying the visibility override
    pub fn describe(&self, raw: &RawPin) -> PinDescriptor {
        let degraded;
        let pin_type = match &raw.pin_type {
            Some(t) => t,
            None => {
                degraded = PinType::wildcard();
                &degraded
            }
        };

        let mut pin = self.typed_pin(&raw.name, raw.direction, pin_type);
        pin.is_hidden = raw.hidden || is_always_hidden(&raw.name);
        pin.default_value = raw.default_value.clone();
        pin
    }

    /// Split raw pins into inputs and outputs, keeping declaration order
    pub fn resolve(&self, raw_pins: &[RawPin]) -> PinLists {
        let mut inputs = Vec::new();
        let mut outputs = Vec::new();

        for raw in raw_pins {
            let pin = self.describe(raw);
            match pin.direction {
                PinDirection::Input => inputs.push(pin),
                PinDirection::Output => outputs.push(pin),
            }
        }

        (inputs, outputs)
    }

    /// Pins of a property getter: `self` in, const value out
    pub fn getter_pins(&self, owner: &TypeInfo, var_name: &str, pin_type: &PinType) -> PinLists {
        let mut value = self.typed_pin(var_name, PinDirection::Output, pin_type);
        value.is_const = true;

        (vec![self.self_pin(owner)], vec![value])
    }

    /// Pins of a property setter: `execute`, `self`, value in; `then`,
    /// pass-through value out. Neither value pin is by-reference.
    pub fn setter_pins(&self, owner: &TypeInfo, var_name: &str, pin_type: &PinType) -> PinLists {
        let mut value_in = self.typed_pin(var_name, PinDirection::Input, pin_type);
        value_in.is_const = false;
        value_in.is_reference = false;

        let mut value_out = self.typed_pin(
            &format!("{}{}", pin_name::SETTER_OUTPUT_PREFIX, var_name),
            PinDirection::Output,
            pin_type,
        );
        value_out.is_const = false;
        value_out.is_reference = false;

        let inputs = vec![
            PinDescriptor::exec(pin_name::EXECUTE, PinDirection::Input),
            self.self_pin(owner),
            value_in,
        ];
        let outputs = vec![PinDescriptor::exec(pin_name::THEN, PinDirection::Output), value_out];

        (inputs, outputs)
    }

    fn self_pin(&self, owner: &TypeInfo) -> PinDescriptor {
        let mut pin = PinDescriptor::new(pin_name::SELF, PinDirection::Input, category::OBJECT);
        pin.subcategory = category::SELF_SUBCATEGORY.to_string();
        pin.referenced_type_path = self.render_type(owner);
        pin.is_hidden = true;
        pin
    }

    fn typed_pin(&self, name: &str, direction: PinDirection, pin_type: &PinType) -> PinDescriptor {
        PinDescriptor {
            pin_name: name.to_string(),
            direction,
            category: pin_type.category.clone(),
            subcategory: pin_type.subcategory.clone(),
            referenced_type_path: self.render_reference(pin_type.referenced_type.as_deref()),
            container_shape: pin_type.container,
            is_reference: pin_type.is_reference,
            is_const: pin_type.is_const,
            is_hidden: is_always_hidden(name),
            default_value: String::new(),
        }
    }
}

fn is_always_hidden(pin_name: &str) -> bool {
    ALWAYS_HIDDEN.contains(&pin_name)
}
