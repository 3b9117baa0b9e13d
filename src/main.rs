use std::{
    fs,
    path::{Path, PathBuf},
    process::exit,
};

use clap::Parser;
use colored::Colorize;

use peachc::{cli::Cli, compiler::Compiler, logln, ENABLE_PRINTING};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = match err.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = err.print();
            exit(code);
        }
    };

    ENABLE_PRINTING.with(|e| *e.borrow_mut() = cli.verbose);

    if cli.preprocess {
        eprintln!("{}", "Error: Preprocessing (-E) is not implemented yet".red().bold());
        exit(1);
    }

    if let Err(err) = run(&cli) {
        eprintln!("{} {err}", "Compilation error:".red().bold());
        exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let mut compiler = Compiler::new();

    if cli.source {
        for file in &cli.files {
            logln!("Translating {} to C...", file.display());
            let c_path = compiler.generate_c_source(file)?;
            let final_path = rename_single_product(cli, &c_path, "c")?;
            println!("Generated: {}", final_path.display());
        }
        return Ok(());
    }

    if cli.compile {
        for file in &cli.files {
            logln!("Compiling {} to object file...", file.display());
            let obj_path = compiler.compile_to_object(file)?;
            let final_path = rename_single_product(cli, &obj_path, "o")?;
            println!("Generated: {}", final_path.display());
        }
        return Ok(());
    }

    for file in &cli.files {
        logln!("Compiling {}...", file.display());
        compiler.compile(file)?;
    }

    let output = cli.output.clone().unwrap_or_else(|| PathBuf::from("a.out"));
    compiler.link_executable(&output)?;

    println!("Compilation successful! Output: {}", output.display());
    Ok(())
}

/// With `-o` and a single input, the lone product is renamed; the
/// expected extension is appended when missing.
fn rename_single_product(cli: &Cli, produced: &Path, extension: &str) -> anyhow::Result<PathBuf> {
    let Some(output) = &cli.output else {
        return Ok(produced.to_path_buf());
    };

    if cli.files.len() != 1 {
        return Ok(produced.to_path_buf());
    }

    let target = if output.extension().and_then(|e| e.to_str()) == Some(extension) {
        output.clone()
    } else {
        let mut with_ext = output.as_os_str().to_os_string();
        with_ext.push(".");
        with_ext.push(extension);
        PathBuf::from(with_ext)
    };

    fs::rename(produced, &target).map_err(|e| {
        peachc::errors::builders::file(format!(
            "Cannot rename {} to {}: {e}",
            produced.display(),
            target.display()
        ))
    })?;

    Ok(target)
}
