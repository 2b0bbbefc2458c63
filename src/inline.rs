use std::collections::HashMap;

use thiserror::Error;

use crate::ast::{Expr, ExprKind, FnDef, Pos};
use crate::program::{extern_arity, Program};

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("{line}:{col}: resolve error: {msg}")]
    Error {
        msg: String,
        line: usize,
        col: usize,
    },
}

/// Scope frame for one function activation: parameter names bound to the
/// caller's resolved argument expressions, plus the constants resolved so
/// far. A callee never sees its caller's frame, which is what keeps plain
/// name-for-name substitution capture-free.
type Frame = HashMap<String, Expr>;

/// Expand `main` into a single expression with no user-defined calls left:
/// every call is replaced by its callee's body with parameters substituted,
/// and every constant reference by its bound expression. Only engine extern
/// calls and tags survive.
pub fn resolve_program(program: &Program) -> Result<Expr, ResolveError> {
    let main = program.get("main").expect("program table guarantees `main`");
    let mut inliner = Inliner {
        program,
        stack: Vec::new(),
    };
    inliner.inline(main, Vec::new())
}

struct Inliner<'a> {
    program: &'a Program,
    /// Names of the functions currently being expanded, outermost first.
    /// Re-entering one is the termination condition for call cycles.
    stack: Vec<String>,
}

impl<'a> Inliner<'a> {
    fn error(&self, msg: impl Into<String>, pos: Pos) -> ResolveError {
        ResolveError::Error {
            msg: msg.into(),
            line: pos.line,
            col: pos.col,
        }
    }

    /// Expand one activation: bind parameters to the already-resolved
    /// arguments, resolve the constant bindings in declaration order (each
    /// sees only the ones before it), then resolve the return expression.
    fn inline(&mut self, def: &'a FnDef, args: Vec<Expr>) -> Result<Expr, ResolveError> {
        self.stack.push(def.name.clone());

        let mut frame: Frame = def.params.iter().cloned().zip(args).collect();
        for (name, value) in &def.consts {
            let resolved = self.resolve(value, &frame)?;
            frame.insert(name.clone(), resolved);
        }
        let body = self.resolve(&def.body, &frame)?;

        self.stack.pop();
        Ok(body)
    }

    fn resolve(&mut self, expr: &Expr, frame: &Frame) -> Result<Expr, ResolveError> {
        let pos = expr.pos;
        match &expr.kind {
            ExprKind::Num(_) | ExprKind::Tag(_) => Ok(expr.clone()),
            ExprKind::Ident(name) => {
                if let Some(bound) = frame.get(name) {
                    return Ok(bound.clone());
                }
                // A bare name may be a call to a zero-parameter function
                let is_zero_arg_fn = self
                    .program
                    .get(name)
                    .is_some_and(|def| def.params.is_empty());
                if is_zero_arg_fn {
                    return self.call(name, Vec::new(), pos);
                }
                Err(self.error(format!("unknown identifier `{}`", name), pos))
            }
            ExprKind::Call(name, args) => {
                let args = args
                    .iter()
                    .map(|arg| self.resolve(arg, frame))
                    .collect::<Result<Vec<_>, _>>()?;
                if let Some(arity) = extern_arity(name) {
                    if args.len() != arity {
                        return Err(self.arity_error(name, arity, args.len(), pos));
                    }
                    return Ok(Expr::new(ExprKind::Call(name.clone(), args), pos));
                }
                self.call(name, args, pos)
            }
            ExprKind::Unary(op, operand) => {
                let operand = self.resolve(operand, frame)?;
                Ok(Expr::new(ExprKind::Unary(*op, Box::new(operand)), pos))
            }
            ExprKind::Binary(op, left, right) => {
                let left = self.resolve(left, frame)?;
                let right = self.resolve(right, frame)?;
                Ok(Expr::new(
                    ExprKind::Binary(*op, Box::new(left), Box::new(right)),
                    pos,
                ))
            }
            ExprKind::If2(cond, then) => {
                let cond = self.resolve(cond, frame)?;
                let then = self.resolve(then, frame)?;
                Ok(Expr::new(
                    ExprKind::If2(Box::new(cond), Box::new(then)),
                    pos,
                ))
            }
            ExprKind::If3(cond, then, els) => {
                let cond = self.resolve(cond, frame)?;
                let then = self.resolve(then, frame)?;
                let els = self.resolve(els, frame)?;
                Ok(Expr::new(
                    ExprKind::If3(Box::new(cond), Box::new(then), Box::new(els)),
                    pos,
                ))
            }
        }
    }

    /// Inline a call to a user or library function. Arguments are already
    /// resolved in the caller's frame.
    fn call(&mut self, name: &str, args: Vec<Expr>, pos: Pos) -> Result<Expr, ResolveError> {
        let program = self.program;
        let def = match program.get(name) {
            Some(def) => def,
            None => {
                return Err(
                    self.error(format!("missing function declaration for `{}`", name), pos)
                )
            }
        };
        if args.len() != def.params.len() {
            return Err(self.arity_error(name, def.params.len(), args.len(), pos));
        }
        if self.stack.iter().any(|active| active == name) {
            return Err(self.error(format!("recursive call to function `{}`", name), pos));
        }
        self.inline(def, args)
    }

    fn arity_error(&self, name: &str, expected: usize, got: usize, pos: Pos) -> ResolveError {
        let plural = if expected == 1 { "" } else { "s" };
        self.error(
            format!(
                "function `{}` expects {} argument{}, got {}",
                name, expected, plural, got
            ),
            pos,
        )
    }
}
