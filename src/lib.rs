pub mod ast;
pub mod cli;
pub mod codegen;
pub mod compiler;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

use std::cell::RefCell;

thread_local! {
    /// Gates the `logln!`/`elogln!` progress output; switched on by
    /// `--verbose`.
    pub static ENABLE_PRINTING: RefCell<bool> = const { RefCell::new(false) };
}
