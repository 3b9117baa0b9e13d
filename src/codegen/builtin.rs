use crate::codegen::CodeGenerator;

impl CodeGenerator {
    /// Emits the includes plus whatever runtime helpers the usage
    /// pre-pass observed. Helpers that nothing references are left out.
    pub(crate) fn generate_builtins(&mut self) {
        self.generate_includes();

        if self.usage.is_range_used() {
            self.generate_range_helpers();
        }

        if self.usage.is_print_used() {
            self.generate_print_helpers();
        }

        if self.usage.is_len_used() {
            self.generate_len_macro();
        }
    }

    fn generate_includes(&mut self) {
        self.emit_line("#include <stdio.h>");
        self.emit_line("#include <stdlib.h>");
        self.emit_line("#include <string.h>");
        self.emit_line("#include <stdbool.h>");
        self.emit("\n");
    }

    fn generate_range_helpers(&mut self) {
        self.emit_line("// Range iterator structure");
        self.emit_line("typedef struct {");
        self.emit_line("    int current;");
        self.emit_line("    int stop;");
        self.emit_line("    int step;");
        self.emit_line("} Range;");
        self.emit("\n");

        self.emit_line("static Range range1(int stop) {");
        self.emit_line("    Range r = {0, stop, 1};");
        self.emit_line("    return r;");
        self.emit_line("}");
        self.emit("\n");

        self.emit_line("static Range range2(int start, int stop) {");
        self.emit_line("    Range r = {start, stop, 1};");
        self.emit_line("    return r;");
        self.emit_line("}");
        self.emit("\n");

        self.emit_line("static Range range3(int start, int stop, int step) {");
        self.emit_line("    Range r = {start, stop, step};");
        self.emit_line("    return r;");
        self.emit_line("}");
        self.emit("\n");
    }

    fn generate_print_helpers(&mut self) {
        let no_types = self.usage.no_types_observed();
        let has = |gen: &Self, name: &str| gen.usage.has_type(name);

        self.emit_line("// Print helpers for the types this program uses");

        // print_int always exists; it backs the _Generic default arm.
        self.emit_line("static void print_int(int x) { printf(\"%d\\n\", x); }");
        if has(self, "long") {
            self.emit_line("static void print_long(long x) { printf(\"%ld\\n\", x); }");
        }
        if has(self, "float") {
            self.emit_line("static void print_float(float x) { printf(\"%.6f\\n\", x); }");
        }
        if has(self, "double") {
            self.emit_line("static void print_double(double x) { printf(\"%.6f\\n\", x); }");
        }
        if has(self, "string") || no_types {
            self.emit_line("static void print_string(const char* x) { printf(\"%s\\n\", x); }");
        }
        if has(self, "bool") {
            self.emit_line(
                "static void print_bool(_Bool x) { printf(\"%s\\n\", x ? \"true\" : \"false\"); }",
            );
        }
        self.emit("\n");

        let mut entries: Vec<&str> = Vec::new();
        if has(self, "int") || no_types {
            entries.push("    int: print_int");
        }
        if has(self, "long") {
            entries.push("    long: print_long");
        }
        if has(self, "float") {
            entries.push("    float: print_float");
        }
        if has(self, "double") {
            entries.push("    double: print_double");
        }
        if has(self, "string") || no_types {
            entries.push("    char*: print_string");
            entries.push("    const char*: print_string");
        }
        if has(self, "bool") {
            entries.push("    _Bool: print_bool");
        }

        self.emit_line("// Generic print macro using _Generic (C11)");
        self.emit_line("#define print(x) _Generic((x), \\");
        for entry in entries {
            self.emit_line(&format!("{entry}, \\"));
        }
        self.emit_line("    default: print_int \\");
        self.emit_line(")(x)");
        self.emit("\n");
    }

    fn generate_len_macro(&mut self) {
        self.emit_line("// Array length macro");
        self.emit_line("#define len(arr) (sizeof(arr) / sizeof((arr)[0]))");
        self.emit("\n");
    }
}
