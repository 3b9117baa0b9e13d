use std::collections::BTreeSet;

/// Records which builtins and primitive types a program actually touches,
/// so the prelude only carries helpers that are needed.
#[derive(Debug, Clone, Default)]
pub struct UsageTracker {
    used_functions: BTreeSet<String>,
    used_types: BTreeSet<String>,
    uses_range: bool,
    uses_print: bool,
    uses_len: bool,
    uses_sizeof: bool,
}

impl UsageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track_function(&mut self, name: &str) {
        self.used_functions.insert(name.to_string());

        match name {
            "range" | "range1" | "range2" | "range3" => self.uses_range = true,
            "print" => self.uses_print = true,
            "len" => self.uses_len = true,
            "sizeof" => self.uses_sizeof = true,
            _ => {}
        }
    }

    pub fn track_type(&mut self, type_name: &str) {
        self.used_types.insert(type_name.to_string());
    }

    pub fn is_range_used(&self) -> bool {
        self.uses_range
    }

    pub fn is_print_used(&self) -> bool {
        self.uses_print
    }

    pub fn is_len_used(&self) -> bool {
        self.uses_len
    }

    pub fn is_sizeof_used(&self) -> bool {
        self.uses_sizeof
    }

    pub fn used_types(&self) -> &BTreeSet<String> {
        &self.used_types
    }

    pub fn has_type(&self, type_name: &str) -> bool {
        self.used_types.contains(type_name)
    }

    pub fn no_types_observed(&self) -> bool {
        self.used_types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_flags() {
        let mut usage = UsageTracker::new();
        assert!(!usage.is_range_used());
        usage.track_function("range");
        usage.track_function("print");
        usage.track_function("len");
        usage.track_function("user_function");
        assert!(usage.is_range_used());
        assert!(usage.is_print_used());
        assert!(usage.is_len_used());
        assert!(!usage.is_sizeof_used());
    }

    #[test]
    fn test_type_tracking() {
        let mut usage = UsageTracker::new();
        assert!(usage.no_types_observed());
        usage.track_type("int");
        usage.track_type("float");
        assert!(usage.has_type("int"));
        assert!(!usage.has_type("double"));
        assert!(!usage.no_types_observed());
    }
}
