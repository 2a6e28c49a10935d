//! In-memory type catalog
//!
//! Types are stored by index (TypeId) with their own declared members. Type
//! references use paths, resolved through a path → TypeId map, which keeps:
//! - Inheritance cheap (a type only stores its parent's path)
//! - Snapshot loading simple (no nested boxed types)
//! - Enumeration order stable (insertion order is catalog order)
//!
//! Members visible on a type are its own members followed by those of each
//! ancestor, nearest first.

use super::reflection::{FunctionInfo, PropertyInfo, TypeInfo};
use super::ReflectionCatalog;
use crate::error::{DumpError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Depth at which inheritance walks give up (guards against cycles)
const MAX_INHERITANCE_DEPTH: usize = 64;

/// A unique identifier for a type in the catalog.
/// This is just an index into the types vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TypeId(pub u32);

impl TypeId {
    /// The invalid/unresolved type ID
    pub const INVALID: TypeId = TypeId(u32::MAX);
}

impl std::fmt::Display for TypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if *self == Self::INVALID {
            write!(f, "TypeId(INVALID)")
        } else {
            write!(f, "TypeId({})", self.0)
        }
    }
}

/// One type together with the members it declares, as stored in snapshots
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeEntry {
    #[serde(flatten)]
    pub info: TypeInfo,
    #[serde(default)]
    pub functions: Vec<FunctionInfo>,
    #[serde(default)]
    pub properties: Vec<PropertyInfo>,
}

impl TypeEntry {
    pub fn new(info: TypeInfo) -> Self {
        Self {
            info,
            functions: Vec::new(),
            properties: Vec::new(),
        }
    }
}

/// Serializable catalog contents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub types: Vec<TypeEntry>,
}

/// The in-memory catalog
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    /// All type records, indexed by TypeId
    types: Vec<TypeInfo>,
    /// Members attached to each type, indexed by TypeId
    functions: Vec<Vec<FunctionInfo>>,
    properties: Vec<Vec<PropertyInfo>>,
    /// Maps fully-qualified paths to TypeIds
    path_to_id: HashMap<String, TypeId>,
}

impl InMemoryCatalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from a snapshot, keeping snapshot order
    pub fn from_snapshot(snapshot: CatalogSnapshot) -> Result<Self> {
        let mut catalog = Self::new();
        for entry in snapshot.types {
            let id = catalog.insert_type(entry.info)?;
            for func in entry.functions {
                catalog.functions[id.0 as usize].push(func);
            }
            for prop in entry.properties {
                catalog.properties[id.0 as usize].push(prop);
            }
        }
        Ok(catalog)
    }

    /// Load a JSON snapshot from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            DumpError::Catalog(format!("Failed to read catalog {:?}: {}", path, e))
        })?;
        Self::from_json(&content)
    }

    /// Parse a JSON snapshot
    pub fn from_json(content: &str) -> Result<Self> {
        let snapshot: CatalogSnapshot = serde_json::from_str(content)
            .map_err(|e| DumpError::Catalog(format!("Failed to parse catalog: {}", e)))?;
        Self::from_snapshot(snapshot)
    }

    /// Export the catalog back into a snapshot
    pub fn to_snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            types: self
                .types
                .iter()
                .enumerate()
                .map(|(i, info)| TypeEntry {
                    info: info.clone(),
                    functions: self.functions[i].clone(),
                    properties: self.properties[i].clone(),
                })
                .collect(),
        }
    }

    /// Get the number of types in the catalog
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Register a type. Paths must be unique.
    pub fn insert_type(&mut self, info: TypeInfo) -> Result<TypeId> {
        if self.path_to_id.contains_key(&info.path) {
            return Err(DumpError::Catalog(format!(
                "Duplicate type path {}",
                info.path
            )));
        }

        let id = TypeId(self.types.len() as u32);
        self.path_to_id.insert(info.path.clone(), id);
        self.types.push(info);
        self.functions.push(Vec::new());
        self.properties.push(Vec::new());
        Ok(id)
    }

    /// Attach a function to a type.
    ///
    /// The function's `declared_on` is kept as given; attaching a function
    /// whose declaring path differs models an inherited or stale entry.
    pub fn add_function(&mut self, id: TypeId, func: FunctionInfo) -> Result<()> {
        self.functions
            .get_mut(id.0 as usize)
            .ok_or_else(|| DumpError::Catalog(format!("No type at {}", id)))?
            .push(func);
        Ok(())
    }

    /// Attach a property to a type
    pub fn add_property(&mut self, id: TypeId, prop: PropertyInfo) -> Result<()> {
        self.properties
            .get_mut(id.0 as usize)
            .ok_or_else(|| DumpError::Catalog(format!("No type at {}", id)))?
            .push(prop);
        Ok(())
    }

    /// Get a type record by TypeId
    pub fn get(&self, id: TypeId) -> Option<&TypeInfo> {
        if id == TypeId::INVALID {
            return None;
        }
        self.types.get(id.0 as usize)
    }

    /// Get the TypeId registered for a path
    pub fn id_of(&self, path: &str) -> Option<TypeId> {
        self.path_to_id.get(path).copied()
    }

    /// The type itself followed by its ancestors, nearest first.
    ///
    /// Stops at an unknown parent path or when the chain loops.
    pub fn lineage(&self, id: TypeId) -> Vec<TypeId> {
        let mut chain = Vec::new();
        let mut current = Some(id);

        while let Some(id) = current {
            if chain.len() >= MAX_INHERITANCE_DEPTH || chain.contains(&id) {
                tracing::warn!("Inheritance chain of {} is cyclic or too deep", id);
                break;
            }
            let Some(info) = self.get(id) else {
                break;
            };
            chain.push(id);
            current = info.super_path.as_deref().and_then(|p| self.id_of(p));
        }

        chain
    }

    /// Members declared on this type only
    pub fn declared_functions(&self, id: TypeId) -> &[FunctionInfo] {
        self.functions
            .get(id.0 as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Properties declared on this type only
    pub fn declared_properties(&self, id: TypeId) -> &[PropertyInfo] {
        self.properties
            .get(id.0 as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Get statistics about the catalog
    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            total_types: self.types.len(),
            total_functions: self.functions.iter().map(Vec::len).sum(),
            total_properties: self.properties.iter().map(Vec::len).sum(),
            orphaned_parents: self
                .types
                .iter()
                .filter(|t| {
                    t.super_path
                        .as_deref()
                        .is_some_and(|p| !self.path_to_id.contains_key(p))
                })
                .count(),
        }
    }
}

impl ReflectionCatalog for InMemoryCatalog {
    fn list_types(&self) -> &[TypeInfo] {
        &self.types
    }

    fn list_functions(&self, ty: &TypeInfo) -> Vec<&FunctionInfo> {
        let Some(id) = self.id_of(&ty.path) else {
            return Vec::new();
        };
        self.lineage(id)
            .into_iter()
            .flat_map(|id| self.declared_functions(id))
            .collect()
    }

    fn list_properties(&self, ty: &TypeInfo) -> Vec<&PropertyInfo> {
        let Some(id) = self.id_of(&ty.path) else {
            return Vec::new();
        };
        self.lineage(id)
            .into_iter()
            .flat_map(|id| self.declared_properties(id))
            .collect()
    }

    fn find_type(&self, path: &str) -> Option<&TypeInfo> {
        self.id_of(path).and_then(|id| self.get(id))
    }
}

/// Statistics about the catalog
#[derive(Debug, Clone, Default)]
pub struct CatalogStats {
    pub total_types: usize,
    pub total_functions: usize,
    pub total_properties: usize,
    /// Types whose parent path is not registered
    pub orphaned_parents: usize,
}
