use std::{collections::HashMap, fmt::Display, rc::Rc};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("Type {0} is already registered.")]
    DuplicateType(String),

    #[error("Type {0} is not known.")]
    UnknownType(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    None,
    Int,
    Float,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Primitive {
        name: String,
        size_bits: u32,
        format: Format,
    },
}

pub type TypeRef = Rc<Type>;

impl Type {
    pub fn name(&self) -> &str {
        match self {
            Self::Primitive { name, .. } => name,
        }
    }

    pub fn size_bits(&self) -> u32 {
        match self {
            Self::Primitive { size_bits, .. } => *size_bits,
        }
    }

    pub fn format(&self) -> Format {
        match self {
            Self::Primitive { format, .. } => *format,
        }
    }

    /// A zero-sized type carries no value.
    pub fn is_void(&self) -> bool {
        self.size_bits() == 0
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Name used for integer literals.
pub const LITERAL_TYPE: &str = "int";
pub const BOOL_TYPE: &str = "bool";
pub const VOID_TYPE: &str = "void";

const BUILTINS: [(&str, u32, Format); 14] = [
    // "standard" types
    ("char", 8, Format::Int),
    ("short", 16, Format::Int),
    ("int", 32, Format::Int),
    ("long", 64, Format::Int),
    ("void", 0, Format::None),
    ("float", 32, Format::Float),
    ("double", 64, Format::Float),
    // convenience types
    ("i16", 16, Format::Int),
    ("i32", 32, Format::Int),
    ("i64", 64, Format::Int),
    ("f16", 16, Format::Float),
    ("f32", 32, Format::Float),
    ("f64", 64, Format::Float),
    // one bit for conversion purposes
    ("bool", 1, Format::Int),
];

/// Primitive types known to a compilation unit.
///
/// Filled once before validation starts and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: HashMap<String, TypeRef>,
    order: Vec<TypeRef>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtins() -> Self {
        let mut registry = Self::new();

        for (name, size_bits, format) in BUILTINS {
            registry
                .register(name, size_bits, format)
                .expect("builtin type names are unique");
        }

        registry
    }

    pub fn register(
        &mut self,
        name: &str,
        size_bits: u32,
        format: Format,
    ) -> Result<TypeRef, TypeError> {
        if self.types.contains_key(name) {
            return Err(TypeError::DuplicateType(name.to_string()));
        }

        let ty = Rc::new(Type::Primitive {
            name: name.to_string(),
            size_bits,
            format,
        });

        self.types.insert(name.to_string(), Rc::clone(&ty));
        self.order.push(Rc::clone(&ty));

        Ok(ty)
    }

    pub fn lookup(&self, name: &str) -> Result<TypeRef, TypeError> {
        self.types
            .get(name)
            .cloned()
            .ok_or_else(|| TypeError::UnknownType(name.to_string()))
    }

    /// Types in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeRef> {
        self.order.iter()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_are_registered() {
        let registry = TypeRegistry::with_builtins();

        assert_eq!(registry.len(), 14);

        let int = registry.lookup("int").unwrap();
        assert_eq!(int.size_bits(), 32);
        assert_eq!(int.format(), Format::Int);

        let bool_ty = registry.lookup("bool").unwrap();
        assert_eq!(bool_ty.size_bits(), 1);

        assert!(registry.lookup("void").unwrap().is_void());
        assert_eq!(registry.lookup("f64").unwrap().format(), Format::Float);
    }

    #[test]
    fn duplicate_registration_fails() {
        let mut registry = TypeRegistry::with_builtins();

        assert_eq!(
            registry.register("int", 32, Format::Int),
            Err(TypeError::DuplicateType("int".to_string()))
        );
        assert!(registry.register("u8", 8, Format::Int).is_ok());
    }

    #[test]
    fn unknown_lookup_fails() {
        let registry = TypeRegistry::with_builtins();

        assert_eq!(
            registry.lookup("string"),
            Err(TypeError::UnknownType("string".to_string()))
        );
    }

    #[test]
    fn iteration_keeps_registration_order() {
        let registry = TypeRegistry::with_builtins();
        let names: Vec<&str> = registry.iter().map(|ty| ty.name()).collect();

        assert_eq!(names.first(), Some(&"char"));
        assert_eq!(names.last(), Some(&"bool"));
    }
}
