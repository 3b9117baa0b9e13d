use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::Result;

use crate::{codegen, errors::builders, lexer::tokenize, logln, parser::parse};

/// Drives one compilation run: translation to C, external `cc`
/// invocation, and cleanup of intermediate files.
#[derive(Debug, Default)]
pub struct Compiler {
    generated_c_files: Vec<PathBuf>,
}

impl Compiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translates one source file and writes `<stem>.c` next to it,
    /// returning the path of the written C file.
    pub fn generate_c_source(&mut self, path: &Path) -> Result<PathBuf> {
        let source = fs::read_to_string(path)
            .map_err(|_| builders::file(format!("Cannot open file: {}", path.display())))?;

        logln!("  Lexical analysis...");
        let tokens = tokenize(&source)?;

        logln!("  Parsing...");
        let ast = parse(tokens)?;

        logln!("  Code generation...");
        let c_code = codegen::generate(&ast);

        let c_path = path.with_extension("c");
        fs::write(&c_path, c_code).map_err(|e| {
            builders::file(format!("Cannot write file {}: {e}", c_path.display()))
        })?;

        Ok(c_path)
    }

    /// Translates one source file and compiles it to `<stem>.o`. The
    /// intermediate C file is removed whether or not `cc` succeeds.
    pub fn compile_to_object(&mut self, path: &Path) -> Result<PathBuf> {
        let c_path = self.generate_c_source(path)?;
        let obj_path = path.with_extension("o");

        let result = run_cc(&[
            "-std=c11",
            "-c",
            "-o",
            &obj_path.to_string_lossy(),
            &c_path.to_string_lossy(),
        ]);

        let _ = fs::remove_file(&c_path);
        result?;

        Ok(obj_path)
    }

    /// Translates one source file and queues its C output for the final
    /// link.
    pub fn compile(&mut self, path: &Path) -> Result<()> {
        let c_path = self.generate_c_source(path)?;
        self.generated_c_files.push(c_path);
        Ok(())
    }

    /// Links every queued C file into one executable, then removes the
    /// intermediates on every exit path.
    pub fn link_executable(&mut self, output: &Path) -> Result<()> {
        if self.generated_c_files.is_empty() {
            return Err(builders::external_tool("No source files compiled").into());
        }

        let mut args: Vec<String> = vec![
            "-std=c11".to_string(),
            "-o".to_string(),
            output.to_string_lossy().to_string(),
        ];
        for c_file in &self.generated_c_files {
            args.push(c_file.to_string_lossy().to_string());
        }

        let arg_refs: Vec<&str> = args.iter().map(|s| s.as_str()).collect();
        let result = run_cc(&arg_refs);

        for c_file in &self.generated_c_files {
            let _ = fs::remove_file(c_file);
        }
        self.generated_c_files.clear();

        result
    }
}

fn run_cc(args: &[&str]) -> Result<()> {
    logln!("  Running: cc {}", args.join(" "));

    let output = Command::new("cc")
        .args(args)
        .output()
        .map_err(|e| builders::external_tool(format!("cc: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(builders::external_tool(format!("cc failed:\n{stderr}")).into());
    }

    Ok(())
}
