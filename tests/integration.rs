mod common;

use common::it;

#[test]
fn test_01_hello_world() {
    it("should translate a hello-world program", |ctx| {
        ctx.add_source(
            r#"
            def main() -> int = { print("hello"); return 0 }
        "#,
        )
        .compiles(true)
        .c_contains("print(\"hello\")")
        .c_contains("#define print(x) _Generic((x), \\")
        .c_contains("int main(void)");
    })
}

#[test]
fn test_02_range_sum() {
    it("should lower a range loop to a canonical C for loop", |ctx| {
        ctx.add_source(
            r#"
            def main() -> int = {
              var s: int = 0
              for (i <- range(1, 5)) s = s + i
              print(s); return 0
            }
        "#,
        )
        .compiles(true)
        .c_contains("for (int i = 1; i < 5; i++)")
        .c_contains("static Range range2(int start, int stop)")
        .c_contains("print(s)");
    })
}

#[test]
fn test_03_struct_with_value_receiver_method() {
    it("should lower a value-receiver method to a free function", |ctx| {
        ctx.add_source(
            r#"
            struct P { x: int y: int }
            impl P { def sum(self: void) -> int = self.x + self.y }
            def main() -> int = { val p = P{.x=3,.y=4}; print(p.sum()); return 0 }
        "#,
        )
        .compiles(true)
        .c_contains("int __P_sum(struct P self)")
        .c_contains("__P_sum(p)")
        .c_contains("(struct P){.x = 3, .y = 4}")
        .c_not_contains("UnknownStruct");
    })
}

#[test]
fn test_04_pointer_receiver_method_name() {
    it("should suffix pointer-receiver methods and take struct pointers", |ctx| {
        ctx.add_source(
            r#"
            struct C { n: int }
            impl *C { def bump(self: void) -> int = (*self).n + 1 }
        "#,
        )
        .compiles(true)
        .c_contains("int __C_bump_p(struct C* self)")
        .c_contains("(*(self)).n");
    })
}

#[test]
fn test_05_array_parameter_decay() {
    it("should decay array parameters and keep the declared bound", |ctx| {
        ctx.add_source(
            r#"
            def sum(a: [5]int) -> int = { var s = 0; for (x <- a) s = s + x; return s }
        "#,
        )
        .compiles(true)
        .c_contains("int sum(int* a)")
        .c_contains("for (int _i = 0; _i < 5; _i++)")
        .c_contains("int x = a[_i];");
    })
}

#[test]
fn test_06_unknown_method_receiver() {
    it("should surface an unresolvable receiver as a tagged comment", |ctx| {
        ctx.add_source(
            r#"
            def main() -> int = { foo.bar(); return 0 }
        "#,
        )
        .compiles(true)
        .c_contains("/* ERROR: Could not determine struct type")
        .c_contains("UnknownStruct");
    })
}

#[test]
fn test_07_val_without_initializer_fails() {
    it("should reject val declarations without an initializer", |ctx| {
        ctx.add_source(
            r#"
            def main() -> int = { val x: int; return 0 }
        "#,
        )
        .compiles(false)
        .error_contains("must be initialized");
    })
}

#[test]
fn test_08_empty_parameter_list_emits_void() {
    it("should emit void for empty parameter lists", |ctx| {
        ctx.add_source(
            r#"
            def nothing() = {}
        "#,
        )
        .compiles(true)
        .c_contains("void nothing(void)");
    })
}

#[test]
fn test_09_minimal_program_exact_output() {
    it("should emit exactly the includes and the function", |ctx| {
        ctx.add_source(
            r#"
            def nop(void) = {}
        "#,
        )
        .compiles(true)
        .c_eq(
            "#include <stdio.h>\n\
             #include <stdlib.h>\n\
             #include <string.h>\n\
             #include <stdbool.h>\n\
             \n\
             void nop(void) {\n\
             }\n\
             \n",
        );
    })
}

#[test]
fn test_10_empty_array_literal_infers_int() {
    it("should infer int elements for an empty array literal", |ctx| {
        ctx.add_source(
            r#"
            def main() -> int = { var xs = {}; return 0 }
        "#,
        )
        .compiles(true)
        .c_contains("int xs[0] = {};");
    })
}

#[test]
fn test_11_prelude_minimality() {
    it("should only emit print helpers for observed types", |ctx| {
        ctx.add_source(
            r#"
            def main() -> int = {
              var n: int = 1
              print(n)
              return 0
            }
        "#,
        )
        .compiles(true)
        .c_contains("static void print_int(int x)")
        .c_not_contains("print_float")
        .c_not_contains("print_long")
        .c_not_contains("print_bool")
        .c_not_contains("typedef struct")
        .c_not_contains("#define len");
    })
}

#[test]
fn test_12_prelude_grows_with_observed_types() {
    it("should add print helpers when more types appear", |ctx| {
        ctx.add_source(
            r#"
            def main() -> int = {
              var f: float = 1.5
              var b: bool = true
              print(f)
              print(b)
              return 0
            }
        "#,
        )
        .compiles(true)
        .c_contains("static void print_float(float x)")
        .c_contains("static void print_bool(_Bool x)")
        .c_contains("float: print_float")
        .c_contains("_Bool: print_bool");
    })
}

#[test]
fn test_13_struct_field_order_preserved() {
    it("should declare struct fields in source order", |ctx| {
        ctx.add_source(
            r#"
            struct Pair { second: int first: int }
            def main() -> int = { return 0 }
        "#,
        )
        .compiles(true)
        .inspect(|c_code| {
            let second = c_code.find("int second;").expect("second missing");
            let first = c_code.find("int first;").expect("first missing");
            assert!(second < first, "fields reordered:\n{c_code}");
        });
    })
}

#[test]
fn test_14_three_argument_range() {
    it("should lower a stepped range with a += update", |ctx| {
        ctx.add_source(
            r#"
            def main() -> int = {
              for (i <- range(0, 10, 2)) print(i)
              return 0
            }
        "#,
        )
        .compiles(true)
        .c_contains("for (int i = 0; i < 10; i += 2)");
    })
}

#[test]
fn test_15_precedence_parenthesization() {
    it("should parenthesize according to the parsed tree", |ctx| {
        ctx.add_source(
            r#"
            def main() -> int = { return 1 + 2 * 3 }
        "#,
        )
        .compiles(true)
        .c_contains("return (1 + (2 * 3));");
    })
}

#[test]
fn test_16_union_definition_and_initializer() {
    it("should emit union definitions and designated initializers", |ctx| {
        ctx.add_source(
            r#"
            union V { i: int f: float }
            def main() -> int = { val v = V{.i = 3}; return 0 }
        "#,
        )
        .compiles(true)
        .c_contains("union V {")
        .c_contains("(union V){.i = 3}");
    })
}

#[test]
fn test_17_global_declarations() {
    it("should emit globals before functions", |ctx| {
        ctx.add_source(
            r#"
            val limit = 42
            def main() -> int = { return limit }
        "#,
        )
        .compiles(true)
        .c_contains("const int limit = 42;")
        .inspect(|c_code| {
            let global = c_code.find("const int limit").expect("global missing");
            let func = c_code.find("int main").expect("main missing");
            assert!(global < func, "global emitted after main:\n{c_code}");
        });
    })
}

#[test]
fn test_18_literal_suffixes() {
    it("should keep literal kinds across lowering", |ctx| {
        ctx.add_source(
            r#"
            def main() -> int = {
              var a: long = 10L
              var b: float = 2.5f
              var c: double = 3.5d
              var d: bool = true
              return 0
            }
        "#,
        )
        .compiles(true)
        .c_contains("long a = 10L;")
        .c_contains("float b = 2.5f;")
        .c_contains("double c = 3.5;")
        .c_contains("int d = 1;");
    })
}

#[test]
fn test_19_multi_argument_print() {
    it("should join multi-argument print into a call sequence", |ctx| {
        ctx.add_source(
            r#"
            def main() -> int = { print(1, 2); return 0 }
        "#,
        )
        .compiles(true)
        .c_contains("print(1); print(2);");
    })
}

#[test]
fn test_20_len_macro_only_when_used() {
    it("should emit the len macro only when len is called", |ctx| {
        ctx.add_source(
            r#"
            def main() -> int = {
              val xs = {1, 2, 3}
              return len(xs)
            }
        "#,
        )
        .compiles(true)
        .c_contains("#define len(arr) (sizeof(arr) / sizeof((arr)[0]))")
        .c_contains("int xs[3] = {1, 2, 3};")
        .c_contains("return len(xs);");
    })
}

#[test]
fn test_21_pointer_iteration_diagnostic() {
    it("should tag pointer-parameter iteration instead of guessing", |ctx| {
        ctx.add_source(
            r#"
            def sum(a: *int) -> int = { var s = 0; for (x <- a) s = s + x; return s }
        "#,
        )
        .compiles(true)
        .c_contains("/* ERROR: Cannot iterate over pointer");
    })
}

#[test]
fn test_22_sizeof_fallback_for_unknown_arrays() {
    it("should fall back to sizeof for untracked collections", |ctx| {
        ctx.add_source(
            r#"
            def first(xs: []int) -> int = {
              for (x <- xs) return x
              return 0
            }
        "#,
        )
        .compiles(true)
        .c_contains("sizeof(xs)/sizeof(xs[0])");
    })
}

#[test]
fn test_23_if_else_chains() {
    it("should brace non-block bodies and chain else", |ctx| {
        ctx.add_source(
            r#"
            def classify(n: int) -> int = {
              if (n < 0) return 0 - 1
              else if (n == 0) return 0
              else return 1
            }
        "#,
        )
        .compiles(true)
        .c_contains("if ((n < 0)) {")
        .c_contains("else \n")
        .c_contains("if ((n == 0)) {");
    })
}

#[test]
fn test_24_while_loop() {
    it("should lower while loops directly", |ctx| {
        ctx.add_source(
            r#"
            def countdown(n: int) -> int = {
              while (n > 0) n = n - 1
              return n
            }
        "#,
        )
        .compiles(true)
        .c_contains("while ((n > 0)) {")
        .c_contains("(n = (n - 1));");
    })
}

#[test]
fn test_25_method_with_arguments() {
    it("should pass method arguments after the receiver", |ctx| {
        ctx.add_source(
            r#"
            struct Acc { total: int }
            impl Acc { def add(self: void, amount: int) -> int = self.total + amount }
            def main() -> int = {
              val a = Acc{.total = 10}
              return a.add(5)
            }
        "#,
        )
        .compiles(true)
        .c_contains("int __Acc_add(struct Acc self, int amount)")
        .c_contains("__Acc_add(a, 5)");
    })
}

#[test]
fn test_26_pointer_receiver_call_site() {
    it("should take the receiver's address for pointer methods", |ctx| {
        ctx.add_source(
            r#"
            struct C { n: int }
            impl *C { def bump(self: void) -> int = (*self).n + 1 }
            def main() -> int = {
              var c = C{.n = 1}
              return c.bump()
            }
        "#,
        )
        .compiles(true)
        .c_contains("__C_bump_p(&(c))");
    })
}

#[test]
fn test_27_nested_field_method_receiver() {
    it("should resolve receivers through struct-typed fields", |ctx| {
        ctx.add_source(
            r#"
            struct Inner { v: int }
            struct Outer { inner: Inner }
            impl Inner { def get(self: void) -> int = self.v }
            def main() -> int = {
              val o = Outer{.inner = Inner{.v = 7}}
              return o.inner.get()
            }
        "#,
        )
        .compiles(true)
        .c_contains("__Inner_get(o.inner)");
    })
}

#[test]
fn test_28_string_escape_round_trip() {
    it("should re-escape string literals on emission", |ctx| {
        ctx.add_source(
            "def main() -> int = { print(\"a\\tb\\n\\\"q\\\"\"); return 0 }",
        )
        .compiles(true)
        .c_contains("print(\"a\\tb\\n\\\"q\\\"\")");
    })
}

#[test]
fn test_29_inferred_return_type() {
    it("should infer missing return types from the body", |ctx| {
        ctx.add_source(
            r#"
            def half(x: double) = x / 2.0
            def main() -> int = { return 0 }
        "#,
        )
        .compiles(true)
        .c_contains("double half(double x)");
    })
}

#[test]
fn test_30_lexical_error_position() {
    it("should report lexical errors with line and column", |ctx| {
        ctx.add_source("def main() -> int = { val s = \"abc\n; return 0 }")
            .compiles(false)
            .error_contains("Unterminated string");
    })
}
