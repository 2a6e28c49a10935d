//! Test data builders for creating test catalogs

use super::{ACTOR, MATH_LIBRARY, PLAYER, PLAYER_SKELETON, SYSTEM_LIBRARY, VECTOR};
use nodedump_rs::catalog::{
    FunctionFlags, FunctionInfo, InMemoryCatalog, ParamInfo, PinType, PropertyInfo,
    ReflectionKind, TypeId, TypeInfo, META_KEYWORDS, META_TOOLTIP,
};
use nodedump_rs::types::ContainerShape;

/// Builder for creating test catalogs one type at a time
#[derive(Default)]
pub struct CatalogBuilder {
    catalog: InMemoryCatalog,
    current: Option<(TypeId, String)>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new type; following members are declared on it
    pub fn class(self, name: &str, path: &str) -> Self {
        self.type_of(name, path, ReflectionKind::Class, None)
    }

    pub fn subclass(self, name: &str, path: &str, super_path: &str) -> Self {
        self.type_of(name, path, ReflectionKind::Class, Some(super_path))
    }

    pub fn script_struct(self, name: &str, path: &str) -> Self {
        self.type_of(name, path, ReflectionKind::ScriptStruct, None)
    }

    fn type_of(mut self, name: &str, path: &str, kind: ReflectionKind, super_path: Option<&str>) -> Self {
        let mut info = TypeInfo::new(name, path, kind);
        if let Some(parent) = super_path {
            info = info.with_super(parent);
        }
        let id = self.catalog.insert_type(info).expect("Duplicate type path");
        self.current = Some((id, path.to_string()));
        self
    }

    fn owner(&self) -> (TypeId, String) {
        self.current.clone().expect("Declare a type before its members")
    }

    /// Add a function built from the current type's path
    pub fn function(mut self, build: impl FnOnce(&str) -> FunctionInfo) -> Self {
        let (id, path) = self.owner();
        self.catalog.add_function(id, build(&path)).unwrap();
        self
    }

    /// Add a property built from the current type's path
    pub fn property(mut self, build: impl FnOnce(&str) -> PropertyInfo) -> Self {
        let (id, path) = self.owner();
        self.catalog.add_property(id, build(&path)).unwrap();
        self
    }

    pub fn build(self) -> InMemoryCatalog {
        self.catalog
    }
}

pub fn pure_static() -> FunctionFlags {
    FunctionFlags {
        pure: true,
        is_static: true,
        ..Default::default()
    }
}

pub fn callable_static() -> FunctionFlags {
    FunctionFlags {
        callable: true,
        is_static: true,
        ..Default::default()
    }
}

pub fn callable() -> FunctionFlags {
    FunctionFlags {
        callable: true,
        ..Default::default()
    }
}

pub fn event() -> FunctionFlags {
    FunctionFlags {
        event: true,
        ..Default::default()
    }
}

pub fn vector() -> PinType {
    PinType::referencing("struct", VECTOR)
}

/// A small engine-like catalog.
///
/// Produces 18 descriptors: 6 Essentials, 2 Debug.
pub fn sample_catalog() -> InMemoryCatalog {
    CatalogBuilder::new()
        .class("KismetMathLibrary", MATH_LIBRARY)
        .function(|owner| {
            FunctionInfo::new("Add_VectorVector", owner, pure_static())
                .with_param(ParamInfo::input("A", vector()))
                .with_param(ParamInfo::input("B", vector()))
                .with_param(ParamInfo::return_value(vector()))
                .with_meta(META_KEYWORDS, "+ add plus")
        })
        .function(|owner| {
            FunctionInfo::new("Multiply_IntInt", owner, pure_static())
                .with_param(ParamInfo::input("A", PinType::new("int")))
                .with_param(ParamInfo::input("B", PinType::new("int")))
                .with_param(ParamInfo::return_value(PinType::new("int")))
        })
        .class("KismetSystemLibrary", SYSTEM_LIBRARY)
        .function(|owner| {
            FunctionInfo::new("PrintString", owner, callable_static())
                .with_param(ParamInfo::input("WorldContextObject", PinType::new("object")))
                .with_param(ParamInfo::input("InString", PinType::new("string")).with_default("Hello"))
                .with_param(ParamInfo::input("bPrintToScreen", PinType::new("bool")).with_default("true"))
                .with_meta(META_TOOLTIP, "Prints a string to the log")
        })
        .function(|owner| {
            FunctionInfo::new("Delay", owner, callable_static())
                .with_param(ParamInfo::input("WorldContextObject", PinType::new("object")))
                .with_param(ParamInfo::input("Duration", PinType::new("real")).with_default("0.2"))
                .with_param(ParamInfo::input("LatentInfo", PinType::new("struct")).hidden())
        })
        .function(|owner| {
            FunctionInfo::new("IsValid", owner, pure_static())
                .with_param(ParamInfo::input("Object", PinType::new("object")))
                .with_param(ParamInfo::return_value(PinType::new("bool")))
        })
        .function(|owner| {
            FunctionInfo::new("DrawDebugLine", owner, callable_static())
                .with_param(ParamInfo::input("LineStart", vector()))
                .with_param(ParamInfo::input("LineEnd", vector()))
        })
        .script_struct("Vector", VECTOR)
        .class("Actor", ACTOR)
        .function(|owner| FunctionInfo::new("ReceiveBeginPlay", owner, event()))
        .function(|owner| FunctionInfo::new("K2_DestroyActor", owner, callable()))
        .property(|owner| {
            PropertyInfo::new(
                "Tags",
                owner,
                PinType::new("name").with_container(ContainerShape::Array),
            )
        })
        .subclass("BP_Player_C", PLAYER, ACTOR)
        .function(|owner| FunctionInfo::new("ExecuteUbergraph_BP_Player", owner, event()))
        .function(|owner| {
            FunctionInfo::new("Add_VectorVector", owner, callable())
                .with_param(ParamInfo::input("A", vector()))
                .with_param(ParamInfo::input("B", vector()))
                .with_param(ParamInfo::return_value(vector()))
        })
        .property(|owner| PropertyInfo::new("Score", owner, PinType::new("int")).with_meta(META_KEYWORDS, "points"))
        .property(|owner| PropertyInfo::new("MaxHealth", owner, PinType::new("real")).read_only())
        .property(|owner| PropertyInfo::new("Velocity", owner, vector()))
        .property(|owner| PropertyInfo::new("OldScore", owner, PinType::new("int")).deprecated())
        .property(|owner| PropertyInfo::new("InternalCounter", owner, PinType::new("int")).not_visible())
        .subclass("SKEL_BP_Player_C", PLAYER_SKELETON, ACTOR)
        .function(|owner| FunctionInfo::new("PrintString", owner, callable()))
        .property(|owner| PropertyInfo::new("Score", owner, PinType::new("int")))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_builder() {
        let catalog = CatalogBuilder::new()
            .class("Actor", ACTOR)
            .function(|owner| FunctionInfo::new("K2_DestroyActor", owner, callable()))
            .build();

        let stats = catalog.stats();
        assert_eq!(stats.total_types, 1);
        assert_eq!(stats.total_functions, 1);
    }
}
