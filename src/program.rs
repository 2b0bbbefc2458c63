use std::collections::HashMap;

use thiserror::Error;

use crate::ast::{FnDef, Pos};
use crate::lexer::Lexer;
use crate::parser::Parser;

#[derive(Debug, Error)]
pub enum ProgramError {
    #[error("{line}:{col}: program error: {msg}")]
    At {
        msg: String,
        line: usize,
        col: usize,
    },
    #[error("program error: {msg}")]
    General { msg: String },
}

fn error_at(msg: impl Into<String>, pos: Pos) -> ProgramError {
    ProgramError::At {
        msg: msg.into(),
        line: pos.line,
        col: pos.col,
    }
}

/// Functions evaluated natively by the watchface engine, with their arities.
/// Calls to these are preserved verbatim in the output; user code may not
/// redefine the names.
pub const EXTERNS: &[(&str, usize)] = &[
    ("rand", 2),
    ("stRand", 2),
    ("wakeRand", 2),
    ("abs", 1),
    ("sin", 1),
    ("cos", 1),
    ("tan", 1),
    ("asin", 1),
    ("acos", 1),
    ("atan", 1),
    ("sinh", 1),
    ("cosh", 1),
    ("tanh", 1),
    ("round", 1),
    ("ceil", 1),
    ("floor", 1),
    ("log", 1),
    ("log2", 1),
    ("log10", 1),
    ("sqrt", 1),
    ("cbrt", 1),
    ("exp", 1),
    ("expm1", 1),
    ("deg", 1),
    ("rad", 1),
    ("clamp", 3),
    ("squareWave", 4),
    ("interpAccel", 4),
    ("interpDecel", 4),
    ("interpAccelDecel", 3),
    ("gyroX", 0),
    ("gyroY", 0),
    ("accelerometerX", 0),
    ("accelerometerY", 0),
    ("gyroRawX", 0),
    ("gyroRawY", 0),
    ("accelerometerRawX", 0),
    ("accelerometerRawY", 0),
];

pub fn extern_arity(name: &str) -> Option<usize> {
    EXTERNS
        .iter()
        .find(|(ename, _)| *ename == name)
        .map(|(_, arity)| *arity)
}

/// Helper functions available to every program. They are written in CFS and
/// inlined exactly like user functions, so anything non-native in their
/// bodies is lowered along with the rest of the expression.
const LIBRARY: &str = "\
sind(angle) return sin(rad(angle))
cosd(angle) return cos(rad(angle))
tand(angle) return tan(rad(angle))
asind(x) return deg(asin(x))
acosd(x) return deg(acos(x))
atand(x) return deg(atan(x))
signf(x) return abs(x) / x
sign(i) return signf(i + 0.5)
signn(i) return signf(i - 0.5)
int(x) return floor(x) + (1 - sign(floor(x))) / 2
atan2(y, x) return atan(y / x) + (x <: 0) * signf(y) * pi
atan2d(y, x) return deg(atan2(y, x))
";

/// All callable function definitions, keyed by name. Built once after
/// parsing and read-only thereafter.
pub struct Program {
    functions: HashMap<String, FnDef>,
}

impl Program {
    pub fn build(defs: Vec<FnDef>) -> Result<Program, ProgramError> {
        let mut functions = library_functions();

        for def in defs {
            if extern_arity(&def.name).is_some() {
                return Err(error_at(
                    format!("`{}` is a reserved engine function", def.name),
                    def.pos,
                ));
            }
            if functions.contains_key(&def.name) {
                return Err(error_at(
                    format!("duplicate function declaration for `{}`", def.name),
                    def.pos,
                ));
            }
            functions.insert(def.name.clone(), def);
        }

        match functions.get("main") {
            None => Err(ProgramError::General {
                msg: "missing required function `main`".into(),
            }),
            Some(main) if !main.params.is_empty() => Err(error_at(
                "function `main` must not take parameters",
                main.pos,
            )),
            Some(_) => Ok(Program { functions }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FnDef> {
        self.functions.get(name)
    }
}

fn library_functions() -> HashMap<String, FnDef> {
    let mut lexer = Lexer::new(LIBRARY);
    let tokens = lexer.tokenize().expect("library source must lex");
    let mut parser = Parser::new(tokens);
    let defs = parser.parse().expect("library source must parse");
    defs.into_iter().map(|def| (def.name.clone(), def)).collect()
}
