use super::*;

impl Parser {
    pub(super) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        if matches!(self.current().kind, TokenKind::If) {
            self.parse_if()
        } else {
            self.parse_or()
        }
    }

    /// `if ( cond ? then [ : else ] )` — the sub-expression separators may
    /// also be spelled with commas; both spellings produce the same node.
    fn parse_if(&mut self) -> Result<Expr, ParseError> {
        let pos = self.current().pos;
        self.advance(); // if
        self.expect(&TokenKind::LParen)?;

        let cond = self.parse_expr()?;
        if !self.accept(&TokenKind::Question) && !self.accept(&TokenKind::Comma) {
            return Err(self.error(format!(
                "expected `?` after condition, found `{}`",
                self.current().kind
            )));
        }
        let then = self.parse_expr()?;

        let kind = if self.accept(&TokenKind::Colon) || self.accept(&TokenKind::Comma) {
            let els = self.parse_expr()?;
            ExprKind::If3(Box::new(cond), Box::new(then), Box::new(els))
        } else {
            ExprKind::If2(Box::new(cond), Box::new(then))
        };
        self.expect(&TokenKind::RParen)?;

        Ok(Expr::new(kind, pos))
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_and()?;

        while matches!(self.current().kind, TokenKind::OrOr | TokenKind::Or) {
            self.advance();
            let right = self.parse_and()?;
            left = binary(BinOp::Or, left, right);
        }

        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_equality()?;

        while matches!(self.current().kind, TokenKind::AndAnd | TokenKind::And) {
            self.advance();
            let right = self.parse_equality()?;
            left = binary(BinOp::And, left, right);
        }

        Ok(left)
    }

    /// `=` in expression position is equality, same as `==`.
    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_relational()?;

        loop {
            let op = match self.current().kind {
                TokenKind::Eq | TokenKind::Assign => BinOp::Eq,
                TokenKind::Neq | TokenKind::Diamond => BinOp::Neq,
                _ => break,
            };
            self.advance();
            let right = self.parse_relational()?;
            left = binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_relational(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_additive()?;

        loop {
            let op = match self.current().kind {
                TokenKind::Lte => BinOp::Lte,
                TokenKind::Gte => BinOp::Gte,
                TokenKind::LtF => BinOp::LtF,
                TokenKind::GtF => BinOp::GtF,
                TokenKind::Lt => BinOp::Lt,
                TokenKind::Gt => BinOp::Gt,
                _ => break,
            };
            self.advance();
            let right = self.parse_additive()?;
            left = binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match self.current().kind {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_multiplicative()?;
            left = binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_power()?;

        loop {
            let op = match self.current().kind {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                TokenKind::Percent => BinOp::Mod,
                _ => break,
            };
            self.advance();
            let right = self.parse_power()?;
            left = binary(op, left, right);
        }

        Ok(left)
    }

    /// Sequential `^` folds to the left: `a ^ b ^ c` is `(a ^ b) ^ c`.
    fn parse_power(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;

        while self.accept(&TokenKind::Caret) {
            let right = self.parse_unary()?;
            left = binary(BinOp::Pow, left, right);
        }

        Ok(left)
    }

    /// At most one leading unary operator; `--5` is rejected, `-(-5)` works
    /// through grouping.
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let pos = self.current().pos;
        if self.accept(&TokenKind::Minus) {
            let operand = self.parse_primary()?;
            return Ok(Expr::new(ExprKind::Unary(UnOp::Neg, Box::new(operand)), pos));
        }
        if self.accept(&TokenKind::Bang) || self.accept(&TokenKind::Not) {
            let operand = self.parse_primary()?;
            return Ok(Expr::new(ExprKind::Unary(UnOp::Not, Box::new(operand)), pos));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let pos = self.current().pos;
        match self.current().kind.clone() {
            TokenKind::Number(text) => {
                self.advance();
                Ok(Expr::new(ExprKind::Num(text), pos))
            }
            TokenKind::Tag(text) => {
                self.advance();
                Ok(Expr::new(ExprKind::Tag(text), pos))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(&TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::If => self.parse_if(),
            TokenKind::Ident(name) => {
                self.advance();
                if self.accept(&TokenKind::LParen) {
                    let args = self.parse_args()?;
                    Ok(Expr::new(ExprKind::Call(name, args), pos))
                } else {
                    Ok(Expr::new(ExprKind::Ident(name), pos))
                }
            }
            other => Err(self.error(format!("unexpected `{}` in expression", other))),
        }
    }

    fn parse_args(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut args = Vec::new();

        while !self.check(&TokenKind::RParen) && !self.is_eof() {
            if self.accept(&TokenKind::Comma) {
                continue;
            }
            args.push(self.parse_expr()?);
        }
        self.expect(&TokenKind::RParen)?;

        Ok(args)
    }
}

fn binary(op: BinOp, left: Expr, right: Expr) -> Expr {
    let pos = left.pos;
    Expr::new(ExprKind::Binary(op, Box::new(left), Box::new(right)), pos)
}
