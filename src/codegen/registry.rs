use std::collections::HashMap;

/// One method registered under its owning struct.
#[derive(Debug, Clone)]
pub struct MethodInfo {
    pub name: String,
    pub return_type: String,
    pub parameter_types: Vec<String>,
    pub is_pointer_receiver: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeDefKind {
    Struct,
    Union,
}

#[derive(Debug, Clone)]
pub struct TypeEntry {
    pub name: String,
    pub kind: TypeDefKind,
    /// Field name to C type string, in declaration order.
    pub fields: Vec<(String, String)>,
    pub methods: Vec<MethodInfo>,
}

/// Program-wide symbol dictionary: user-defined type layouts, their
/// methods, and a flat variable-to-type map. Rebuilt from scratch for
/// every program; lookups return `""` for anything unknown so callers can
/// fall back.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: HashMap<String, TypeEntry>,
    variables: HashMap<String, String>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_struct(&mut self, name: &str) {
        self.types.insert(
            name.to_string(),
            TypeEntry {
                name: name.to_string(),
                kind: TypeDefKind::Struct,
                fields: Vec::new(),
                methods: Vec::new(),
            },
        );
    }

    pub fn register_union(&mut self, name: &str) {
        self.types.insert(
            name.to_string(),
            TypeEntry {
                name: name.to_string(),
                kind: TypeDefKind::Union,
                fields: Vec::new(),
                methods: Vec::new(),
            },
        );
    }

    pub fn add_field(&mut self, type_name: &str, field_name: &str, field_type: &str) {
        if let Some(entry) = self.types.get_mut(type_name) {
            entry.fields.push((field_name.to_string(), field_type.to_string()));
        }
    }

    pub fn add_method(&mut self, struct_name: &str, method: MethodInfo) {
        if let Some(entry) = self.types.get_mut(struct_name) {
            entry.methods.push(method);
        }
    }

    pub fn register_variable(&mut self, name: &str, var_type: &str) {
        self.variables.insert(name.to_string(), var_type.to_string());
    }

    pub fn variable_type(&self, name: &str) -> String {
        self.variables.get(name).cloned().unwrap_or_default()
    }

    pub fn is_struct(&self, type_name: &str) -> bool {
        matches!(
            self.types.get(type_name),
            Some(TypeEntry { kind: TypeDefKind::Struct, .. })
        )
    }

    pub fn is_union(&self, type_name: &str) -> bool {
        matches!(
            self.types.get(type_name),
            Some(TypeEntry { kind: TypeDefKind::Union, .. })
        )
    }

    pub fn is_known_type(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    pub fn field_type(&self, type_name: &str, field_name: &str) -> String {
        self.types
            .get(type_name)
            .and_then(|entry| {
                entry
                    .fields
                    .iter()
                    .find(|(name, _)| name == field_name)
                    .map(|(_, ty)| ty.clone())
            })
            .unwrap_or_default()
    }

    pub fn method(&self, struct_name: &str, method_name: &str) -> Option<&MethodInfo> {
        self.types
            .get(struct_name)
            .and_then(|entry| entry.methods.iter().find(|m| m.name == method_name))
    }

    pub fn method_return_type(&self, struct_name: &str, method_name: &str) -> String {
        self.method(struct_name, method_name)
            .map(|m| m.return_type.clone())
            .unwrap_or_default()
    }

    pub fn clear(&mut self) {
        self.types.clear();
        self.variables.clear();
    }
}

/// Per-function variable-to-type map used during statement emission.
/// Parameters are installed before the body is walked; declarations
/// append as they are emitted. No nested scoping.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: HashMap<String, String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_symbol(&mut self, name: &str, symbol_type: &str) {
        self.symbols.insert(name.to_string(), symbol_type.to_string());
    }

    pub fn symbol_type(&self, name: &str) -> String {
        self.symbols.get(name).cloned().unwrap_or_default()
    }

    pub fn has_symbol(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    pub fn clear(&mut self) {
        self.symbols.clear();
    }
}
