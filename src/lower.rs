use crate::ast::{BinOp, Expr, ExprKind, Pos, UnOp};

/// Rewrite every non-native construct of a resolved expression into engine
/// arithmetic. Children are lowered first, so the right-hand sides of the
/// identities below are built from native nodes only.
pub fn lower(expr: Expr) -> Expr {
    let pos = expr.pos;
    match expr.kind {
        ExprKind::Num(text) => Expr::new(ExprKind::Num(text), pos),
        ExprKind::Tag(text) => Expr::new(ExprKind::Tag(text), pos),
        ExprKind::Call(name, args) => Expr::new(
            ExprKind::Call(name, args.into_iter().map(lower).collect()),
            pos,
        ),
        ExprKind::Unary(UnOp::Neg, operand) => {
            Expr::new(ExprKind::Unary(UnOp::Neg, Box::new(lower(*operand))), pos)
        }
        // !x  ->  1 - x
        ExprKind::Unary(UnOp::Not, operand) => sub(num("1", pos), lower(*operand)),
        ExprKind::Binary(op, left, right) => lower_binary(op, lower(*left), lower(*right), pos),
        // if(b ? t)  ->  b * t
        ExprKind::If2(cond, then) => mul(lower(*cond), lower(*then)),
        // if(b ? t : f)  ->  b * (t - f) + f
        ExprKind::If3(cond, then, els) => {
            let cond = lower(*cond);
            let then = lower(*then);
            let els = lower(*els);
            add(mul(cond, sub(then, els.clone())), els)
        }
        ExprKind::Ident(name) => unreachable!(
            "internal error: unresolved identifier `{}` reached the lowerer",
            name
        ),
    }
}

fn lower_binary(op: BinOp, l: Expr, r: Expr, pos: Pos) -> Expr {
    match op {
        BinOp::Add => add(l, r),
        BinOp::Sub => sub(l, r),
        BinOp::Mul => mul(l, r),
        BinOp::Div => div(l, r),
        // x ^ y  ->  exp(log(x) * y)
        BinOp::Pow => call("exp", vec![mul(call("log", vec![l], pos), r)], pos),
        // x % y  ->  x - y * floor(x / y)
        BinOp::Mod => sub(
            l.clone(),
            mul(r.clone(), call("floor", vec![div(l, r)], pos)),
        ),
        // x && y  ->  x * y
        BinOp::And => mul(l, r),
        // x || y  ->  1 - (1 - x) * (1 - y)
        BinOp::Or => sub(
            num("1", pos),
            mul(sub(num("1", pos), l), sub(num("1", pos), r)),
        ),
        // x < y  ->  (1 - sign(x - y)) / 2
        BinOp::Lt => div(sub(num("1", pos), sign(sub(l, r))), num("2", pos)),
        // x <= y  ->  (1 - signn(x - y)) / 2
        BinOp::Lte => div(sub(num("1", pos), signn(sub(l, r))), num("2", pos)),
        // x > y  ->  (1 + signn(x - y)) / 2
        BinOp::Gt => div(add(num("1", pos), signn(sub(l, r))), num("2", pos)),
        // x >= y  ->  (1 + sign(x - y)) / 2
        BinOp::Gte => div(add(num("1", pos), sign(sub(l, r))), num("2", pos)),
        // x == y  ->  ((1 + sign(x - y)) / 2) * ((1 - signn(x - y)) / 2)
        BinOp::Eq => {
            let diff = sub(l, r);
            mul(
                div(add(num("1", pos), sign(diff.clone())), num("2", pos)),
                div(sub(num("1", pos), signn(diff)), num("2", pos)),
            )
        }
        // x != y  ->  (4 - (1 + sign(x - y)) * (1 - signn(x - y))) / 4
        BinOp::Neq => {
            let diff = sub(l, r);
            div(
                sub(
                    num("4", pos),
                    mul(
                        add(num("1", pos), sign(diff.clone())),
                        sub(num("1", pos), signn(diff)),
                    ),
                ),
                num("4", pos),
            )
        }
        // x <: y  ->  (1 - signf(x - y)) / 2
        BinOp::LtF => div(sub(num("1", pos), signf(sub(l, r))), num("2", pos)),
        // x >: y  ->  (1 + signf(x - y)) / 2
        BinOp::GtF => div(add(num("1", pos), signf(sub(l, r))), num("2", pos)),
    }
}

// sign(i) = signf(i + 0.5), signn(i) = signf(i - 0.5), signf(x) = abs(x) / x

fn sign(x: Expr) -> Expr {
    let pos = x.pos;
    signf(add(x, num("0.5", pos)))
}

fn signn(x: Expr) -> Expr {
    let pos = x.pos;
    signf(sub(x, num("0.5", pos)))
}

fn signf(x: Expr) -> Expr {
    let pos = x.pos;
    div(call("abs", vec![x.clone()], pos), x)
}

fn num(text: &str, pos: Pos) -> Expr {
    Expr::new(ExprKind::Num(text.into()), pos)
}

fn call(name: &str, args: Vec<Expr>, pos: Pos) -> Expr {
    Expr::new(ExprKind::Call(name.into(), args), pos)
}

fn bin(op: BinOp, left: Expr, right: Expr) -> Expr {
    let pos = left.pos;
    Expr::new(ExprKind::Binary(op, Box::new(left), Box::new(right)), pos)
}

fn add(left: Expr, right: Expr) -> Expr {
    bin(BinOp::Add, left, right)
}

fn sub(left: Expr, right: Expr) -> Expr {
    bin(BinOp::Sub, left, right)
}

fn mul(left: Expr, right: Expr) -> Expr {
    bin(BinOp::Mul, left, right)
}

fn div(left: Expr, right: Expr) -> Expr {
    bin(BinOp::Div, left, right)
}
