use super::*;

impl Parser {
    /// Parse one function definition:
    ///
    /// ```text
    /// [ "function" | "def" | "double" ] ID "(" [ params ] ")"
    ///     { ID "=" expression }
    ///     "return" expression
    /// ```
    ///
    /// Parameters may be separated by commas or plain whitespace. A
    /// statement is a constant binding exactly when it starts with an
    /// identifier followed by `=`.
    pub(super) fn parse_function(&mut self) -> Result<FnDef, ParseError> {
        if matches!(
            self.current().kind,
            TokenKind::Function | TokenKind::Def | TokenKind::Double
        ) {
            self.advance();
        }

        let (name, pos) = self.expect_ident("function name")?;
        self.expect(&TokenKind::LParen)?;
        let params = self.parse_params()?;

        if name == "main" && !params.is_empty() {
            return Err(self.error_at("function `main` must not take parameters", pos));
        }

        let mut consts: Vec<(String, Expr)> = Vec::new();
        loop {
            self.skip_separators();
            match &self.current().kind {
                TokenKind::Return => break,
                TokenKind::Ident(_) if self.peek(1).kind == TokenKind::Assign => {
                    let (cname, cpos) = self.expect_ident("constant name")?;
                    self.expect(&TokenKind::Assign)?;
                    let value = self.parse_expr()?;
                    if params.contains(&cname) {
                        return Err(
                            self.error_at(format!("constant `{}` shadows a parameter", cname), cpos)
                        );
                    }
                    if consts.iter().any(|(n, _)| n == &cname) {
                        return Err(
                            self.error_at(format!("constant `{}` is already defined", cname), cpos)
                        );
                    }
                    consts.push((cname, value));
                }
                TokenKind::Eof | TokenKind::Function | TokenKind::Def | TokenKind::Double => {
                    return Err(self.error_at(format!("missing `return` in function `{}`", name), pos));
                }
                other => {
                    return Err(
                        self.error(format!("expected a binding or `return`, found `{}`", other))
                    );
                }
            }
        }
        self.advance(); // return

        let body = self.parse_expr()?;
        Ok(FnDef {
            name,
            pos,
            params,
            consts,
            body,
        })
    }

    fn parse_params(&mut self) -> Result<Vec<String>, ParseError> {
        let mut params = Vec::new();

        while !self.accept(&TokenKind::RParen) {
            if self.accept(&TokenKind::Comma) {
                continue;
            }
            let (name, pos) = self.expect_ident("parameter name")?;
            if params.contains(&name) {
                return Err(self.error_at(format!("duplicate parameter `{}`", name), pos));
            }
            params.push(name);
        }

        Ok(params)
    }
}
