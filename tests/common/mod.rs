use peachc::{codegen, lexer::tokenize, parser::parse};

/// One end-to-end check: Peach source in, assertions on the emitted C
/// (or on the reported error) out. The pipeline runs when the value is
/// dropped, so a test reads as a single builder chain.
pub struct Test {
    name: String,
    source: Option<String>,
    should_compile: Option<bool>,
    expected_c: Option<String>,
    contains: Vec<String>,
    not_contains: Vec<String>,
    error_contains: Option<String>,
    inspect: Option<Box<dyn FnOnce(&str)>>,
}

impl Test {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            source: None,
            should_compile: None,
            expected_c: None,
            contains: vec![],
            not_contains: vec![],
            error_contains: None,
            inspect: None,
        }
    }

    pub fn add_source(&mut self, source: &str) -> &mut Self {
        self.source = Some(source.trim().to_string());
        self
    }

    pub fn compiles(&mut self, should_succeed: bool) -> &mut Self {
        self.should_compile = Some(should_succeed);
        self
    }

    /// Asserts the emitted C equals `expected` exactly.
    pub fn c_eq(&mut self, expected: &str) -> &mut Self {
        self.expected_c = Some(expected.to_string());
        self
    }

    pub fn c_contains(&mut self, needle: &str) -> &mut Self {
        self.contains.push(needle.to_string());
        self
    }

    pub fn c_not_contains(&mut self, needle: &str) -> &mut Self {
        self.not_contains.push(needle.to_string());
        self
    }

    pub fn error_contains(&mut self, needle: &str) -> &mut Self {
        self.error_contains = Some(needle.to_string());
        self
    }

    pub fn inspect<F>(&mut self, f: F) -> &mut Self
    where
        F: FnOnce(&str) + 'static,
    {
        self.inspect = Some(Box::new(f));
        self
    }
}

impl Drop for Test {
    fn drop(&mut self) {
        let source = self
            .source
            .take()
            .unwrap_or_else(|| panic!("test '{}' has no source", self.name));

        let failure = |err: &anyhow::Error, stage: &str| {
            if self.should_compile == Some(false) {
                if let Some(needle) = &self.error_contains {
                    let text = err.to_string();
                    assert!(
                        text.contains(needle.as_str()),
                        "test '{}': error `{}` does not contain `{}`",
                        self.name,
                        text,
                        needle
                    );
                }
                return;
            }
            panic!("test '{}': {stage} failed: {err}", self.name);
        };

        let tokens = match tokenize(&source) {
            Ok(tokens) => tokens,
            Err(err) => {
                failure(&err, "tokenization");
                return;
            }
        };

        let ast = match parse(tokens) {
            Ok(ast) => ast,
            Err(err) => {
                failure(&err, "parsing");
                return;
            }
        };

        if self.should_compile == Some(false) {
            panic!(
                "test '{}': compilation succeeded but was expected to fail",
                self.name
            );
        }

        let c_code = codegen::generate(&ast);

        if let Some(expected) = &self.expected_c {
            if expected != &c_code {
                println!("C output mismatch for test '{}'", self.name);
                let diff = similar::TextDiff::from_lines(expected.as_str(), c_code.as_str());
                println!("\nDiff:");
                for change in diff.iter_all_changes() {
                    let sign = match change.tag() {
                        similar::ChangeTag::Delete => "-",
                        similar::ChangeTag::Insert => "+",
                        similar::ChangeTag::Equal => " ",
                    };
                    print!("{}{}", sign, change);
                }
                panic!("test '{}': C output does not match expected", self.name);
            }
        }

        for needle in &self.contains {
            assert!(
                c_code.contains(needle.as_str()),
                "test '{}': generated C does not contain `{}`:\n{}",
                self.name,
                needle,
                c_code
            );
        }

        for needle in &self.not_contains {
            assert!(
                !c_code.contains(needle.as_str()),
                "test '{}': generated C unexpectedly contains `{}`:\n{}",
                self.name,
                needle,
                c_code
            );
        }

        if let Some(inspect) = self.inspect.take() {
            inspect(&c_code);
        }
    }
}

pub fn it(name: &str, f: impl FnOnce(&mut Test)) {
    let mut test = Test::new(name);
    f(&mut test);
}
