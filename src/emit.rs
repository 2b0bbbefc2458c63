use crate::ast::{BinOp, Expr, ExprKind, UnOp};

// Binding strength of the emitted operators: unary minus binds tighter than
// `*` / `/`, which bind tighter than `+` / `-`. Atoms and calls never need
// parentheses.
const PREC_ADD: u8 = 1;
const PREC_MUL: u8 = 2;
const PREC_NEG: u8 = 3;
const PREC_ATOM: u8 = 4;

/// Print a lowered expression. A child is parenthesized iff it binds looser
/// than its parent, or equally tight in right-operand position (every
/// emitted operator is left-associative), which keeps the output minimal but
/// unambiguous.
pub fn emit(expr: &Expr) -> String {
    let mut out = String::new();
    write_expr(&mut out, expr);
    out
}

fn write_expr(out: &mut String, expr: &Expr) {
    match &expr.kind {
        ExprKind::Num(text) => out.push_str(text),
        ExprKind::Tag(text) => out.push_str(text),
        ExprKind::Call(name, args) => {
            out.push_str(name);
            out.push('(');
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_expr(out, arg);
            }
            out.push(')');
        }
        ExprKind::Unary(UnOp::Neg, operand) => {
            out.push('-');
            write_child(out, operand, PREC_NEG, true);
        }
        ExprKind::Binary(op, left, right) => {
            let prec = bin_prec(*op);
            write_child(out, left, prec, false);
            out.push_str(bin_symbol(*op));
            write_child(out, right, prec, true);
        }
        other => unreachable!(
            "internal error: non-arithmetic node reached the emitter: {:?}",
            other
        ),
    }
}

fn write_child(out: &mut String, child: &Expr, parent_prec: u8, is_right: bool) {
    let prec = expr_prec(child);
    let parens = prec < parent_prec || (prec == parent_prec && is_right);
    if parens {
        out.push('(');
    }
    write_expr(out, child);
    if parens {
        out.push(')');
    }
}

fn expr_prec(expr: &Expr) -> u8 {
    match &expr.kind {
        ExprKind::Num(_) | ExprKind::Tag(_) | ExprKind::Call(_, _) => PREC_ATOM,
        ExprKind::Unary(UnOp::Neg, _) => PREC_NEG,
        ExprKind::Binary(op, _, _) => bin_prec(*op),
        other => unreachable!(
            "internal error: non-arithmetic node reached the emitter: {:?}",
            other
        ),
    }
}

fn bin_prec(op: BinOp) -> u8 {
    match op {
        BinOp::Add | BinOp::Sub => PREC_ADD,
        BinOp::Mul | BinOp::Div => PREC_MUL,
        other => unreachable!("internal error: operator {:?} survived lowering", other),
    }
}

fn bin_symbol(op: BinOp) -> &'static str {
    match op {
        BinOp::Add => " + ",
        BinOp::Sub => " - ",
        BinOp::Mul => " * ",
        BinOp::Div => " / ",
        other => unreachable!("internal error: operator {:?} survived lowering", other),
    }
}
