//! Reflection catalog access
//!
//! The walker never talks to a live runtime registry directly. Instead it is
//! handed a [`ReflectionCatalog`], which lists registered types and their
//! members. [`InMemoryCatalog`] is the bundled implementation, built in code
//! or loaded from a JSON snapshot.
//!
//! # Example
//!
//! ```ignore
//! use nodedump_rs::catalog::{InMemoryCatalog, TypeCatalogWalker};
//! use nodedump_rs::config::WalkerConfig;
//!
//! let catalog = InMemoryCatalog::load("catalog.json")?;
//! let config = WalkerConfig::default();
//! for member in TypeCatalogWalker::new(&catalog, &config).members() {
//!     println!("{} :: {}", member.owner.name, member.member.name());
//! }
//! ```

pub mod reflection;
pub mod type_table;
pub mod walker;

pub use reflection::{
    FunctionFlags, FunctionInfo, Metadata, ParamInfo, ParamRole, PinType, PropertyFlags,
    PropertyInfo, ReflectionKind, TypeInfo, META_DISPLAY_NAME, META_KEYWORDS, META_TOOLTIP,
};
pub use type_table::{CatalogSnapshot, CatalogStats, InMemoryCatalog, TypeEntry, TypeId};
pub use walker::{CatalogMember, Member, TypeCatalogWalker};

use crate::error::{DumpError, Result};

/// Read-only view of a host type system
///
/// Implementations must return types and members in a stable order; the
/// output documents follow catalog order exactly.
pub trait ReflectionCatalog {
    /// All registered types, in catalog order
    fn list_types(&self) -> &[TypeInfo];

    /// Member functions visible on a type, including inherited ones.
    ///
    /// Each function reports the type that declares it, so callers can
    /// filter out inherited duplicates.
    fn list_functions(&self, ty: &TypeInfo) -> Vec<&FunctionInfo>;

    /// Member properties visible on a type, including inherited ones
    fn list_properties(&self, ty: &TypeInfo) -> Vec<&PropertyInfo>;

    /// Look up a type by its fully-qualified path
    fn find_type(&self, path: &str) -> Option<&TypeInfo>;

    /// Metadata string on a function, empty if absent
    fn function_metadata(&self, func: &FunctionInfo, key: &str) -> String {
        func.metadata.get(key).cloned().unwrap_or_default()
    }

    /// Metadata string on a property, empty if absent
    fn property_metadata(&self, property: &PropertyInfo, key: &str) -> String {
        property.metadata.get(key).cloned().unwrap_or_default()
    }

    /// Resolve the pin type a property's value surfaces as
    fn resolve_pin_type(&self, property: &PropertyInfo) -> Result<PinType> {
        property.pin_type.clone().ok_or_else(|| {
            DumpError::PinType(format!(
                "Property {} on {} has no pin type",
                property.name, property.declared_on
            ))
        })
    }
}
