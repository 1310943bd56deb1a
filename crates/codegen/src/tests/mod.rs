// Codegen Test Modules

mod complex_tests;
mod error_tests;
mod expr_tests;
mod matrix_tests;

use crate::{CodegenError, Compiler, TiProgram};

/// Compile a source file named `test.py` (entry program `TEST`)
pub(crate) fn try_compile(source: &str) -> Result<Vec<TiProgram>, CodegenError> {
    let program = parser::parse_source(source).unwrap_or_else(|e| panic!("parse failed: {:?}", e));
    Compiler::new("test.py", source).compile_program(&program)
}

pub(crate) fn compile(source: &str) -> Vec<TiProgram> {
    try_compile(source).unwrap_or_else(|e| panic!("compile failed: {}", e))
}

/// Lines of the entry program
pub(crate) fn lines(source: &str) -> Vec<String> {
    compile(source).remove(0).lines
}

pub(crate) fn compile_err(source: &str) -> CodegenError {
    match try_compile(source) {
        Ok(programs) => panic!("expected an error, got {:?}", programs),
        Err(e) => e,
    }
}
