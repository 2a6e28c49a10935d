//! Type catalog walker
//!
//! Lazily enumerates `(owner type, member)` pairs from a [`ReflectionCatalog`].
//!
//! Filters applied:
//! - Types whose name starts with a synthetic prefix (`SKEL_`, `REINST_`) are skipped
//! - Functions and properties are only taken from the type that declares them,
//!   so a member is emitted once per hierarchy rather than once per subclass
//! - Functions must be callable, pure, or an event that is not the reserved
//!   dispatcher
//! - Properties must be externally visible and not deprecated

use super::reflection::{FunctionInfo, PropertyInfo, TypeInfo};
use super::ReflectionCatalog;
use crate::config::WalkerConfig;

/// A member discovered on a type
#[derive(Debug, Clone, Copy)]
pub enum Member<'a> {
    Function(&'a FunctionInfo),
    Property(&'a PropertyInfo),
}

impl Member<'_> {
    /// The member's identifier
    pub fn name(&self) -> &str {
        match self {
            Member::Function(f) => &f.name,
            Member::Property(p) => &p.name,
        }
    }

    /// Path of the type declaring this member
    pub fn declared_on(&self) -> &str {
        match self {
            Member::Function(f) => &f.declared_on,
            Member::Property(p) => &p.declared_on,
        }
    }
}

/// A member paired with the type it was discovered on
#[derive(Debug, Clone, Copy)]
pub struct CatalogMember<'a> {
    pub owner: &'a TypeInfo,
    pub member: Member<'a>,
}

/// Walks every registered type and its members
pub struct TypeCatalogWalker<'a, C: ReflectionCatalog + ?Sized> {
    catalog: &'a C,
    config: &'a WalkerConfig,
}

impl<'a, C: ReflectionCatalog + ?Sized> TypeCatalogWalker<'a, C> {
    pub fn new(catalog: &'a C, config: &'a WalkerConfig) -> Self {
        Self { catalog, config }
    }

    /// Lazily enumerate all included members.
    ///
    /// Order is catalog type order, then functions before properties, each in
    /// the order the catalog lists them. Every call starts a fresh walk.
    pub fn members(&self) -> impl Iterator<Item = CatalogMember<'a>> + 'a {
        let catalog = self.catalog;
        let config = self.config;

        catalog
            .list_types()
            .iter()
            .filter(move |ty| include_type(ty, config))
            .flat_map(move |owner| {
                tracing::debug!("Walking type {}", owner.path);

                let functions = catalog
                    .list_functions(owner)
                    .into_iter()
                    .filter(move |func| include_function(owner, func, config))
                    .map(move |func| CatalogMember {
                        owner,
                        member: Member::Function(func),
                    });

                let properties = catalog
                    .list_properties(owner)
                    .into_iter()
                    .filter(move |prop| include_property(owner, prop))
                    .map(move |prop| CatalogMember {
                        owner,
                        member: Member::Property(prop),
                    });

                functions.chain(properties)
            })
    }
}

fn include_type(ty: &TypeInfo, config: &WalkerConfig) -> bool {
    if config.is_synthetic_type(&ty.name) {
        tracing::trace!("Skipping synthetic type {}", ty.name);
        return false;
    }
    true
}

fn include_function(owner: &TypeInfo, func: &FunctionInfo, config: &WalkerConfig) -> bool {
    if func.declared_on != owner.path {
        tracing::trace!(
            "Skipping {} on {}: declared on {}",
            func.name,
            owner.name,
            func.declared_on
        );
        return false;
    }

    if func.is_call() {
        return true;
    }

    if func.flags.event {
        if config.is_reserved_event(&func.name) {
            tracing::trace!("Skipping reserved dispatcher {} on {}", func.name, owner.name);
            return false;
        }
        return true;
    }

    false
}

fn include_property(owner: &TypeInfo, prop: &PropertyInfo) -> bool {
    if prop.declared_on != owner.path {
        return false;
    }
    if !prop.flags.externally_visible {
        return false;
    }
    if prop.flags.deprecated {
        tracing::trace!("Skipping deprecated property {} on {}", prop.name, owner.name);
        return false;
    }
    true
}
