use crate::emit;
use crate::error::Error;
use crate::inline;
use crate::lexer::Lexer;
use crate::lower;
use crate::parser::Parser;
use crate::program::Program;

/// Compile CFS source text into a single closed-form expression string.
///
/// The pipeline is strictly linear: text → tokens → function definitions →
/// program table → resolved expression → lowered expression → string. Each
/// stage produces a new value consumed by the next.
pub fn compile_source(source: &str) -> Result<String, Error> {
    let mut lexer = Lexer::new(source);
    let tokens = lexer.tokenize()?;
    let mut parser = Parser::new(tokens);
    let defs = parser.parse()?;
    let program = Program::build(defs)?;
    let resolved = inline::resolve_program(&program)?;
    let lowered = lower::lower(resolved);
    Ok(emit::emit(&lowered))
}
