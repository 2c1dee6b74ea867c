//! Statements introduced by a single keyword.

use kiwi_diagnostic::KiwiError;
use kiwi_ir::{LambdaDecl, Node, NodeKind, Token, TokenName, TokenType, TypeId};
use kiwi_value::Value;

use crate::error::ParseResult;
use crate::Parser;

impl Parser<'_> {
    /// Whether a value follows `keyword` on its line. Statements such as
    /// `return` and `print` take a value only when one is written there.
    fn has_value_after(&self, keyword: &Token) -> bool {
        if !self.same_line_as(keyword) {
            return false;
        }
        let current = self.current();
        match current.token_type {
            TokenType::Conditional => current.is_name(TokenName::Case),
            TokenType::Keyword => current.is_name(TokenName::This),
            TokenType::Eof => false,
            _ => true,
        }
    }

    /// `print`, `println`, `eprint`, `eprintln`. A bare keyword prints an
    /// empty string.
    pub(crate) fn parse_print(&mut self) -> ParseResult<Node> {
        let token = self.advance();
        let expression = if self.has_value_after(&token) {
            self.parse_expression()?
        } else {
            Node::new(token.clone(), NodeKind::Literal(Value::string("")))
        };
        let newline = matches!(token.name, TokenName::PrintLn | TokenName::EPrintLn);
        let stderr = matches!(token.name, TokenName::EPrint | TokenName::EPrintLn);
        Ok(Node::new(
            token,
            NodeKind::Print {
                expression: Box::new(expression),
                newline,
                stderr,
            },
        ))
    }

    /// `printxy value, x, y`, optionally parenthesized.
    pub(crate) fn parse_printxy(&mut self) -> ParseResult<Node> {
        let token = self.expect_name(TokenName::PrintXy, "`printxy`")?;
        let arguments = if self.check(TokenType::LParen) {
            self.parse_arguments()?
        } else {
            let mut arguments = vec![self.parse_expression()?];
            while self.eat(TokenType::Comma) {
                arguments.push(self.parse_expression()?);
            }
            arguments
        };

        let count = arguments.len();
        let Ok([value, x, y]) = <[Node; 3]>::try_from(arguments) else {
            let message = format!("`printxy` takes 3 arguments (value, x, y) but got {count}.");
            return Err(KiwiError::syntax(&token, message).into());
        };
        Ok(Node::new(
            token,
            NodeKind::PrintXy {
                value: Box::new(value),
                x: Box::new(x),
                y: Box::new(y),
            },
        ))
    }

    /// `return`, `throw` or `exit`, each with an optional value on the
    /// same line and an optional `when` guard.
    pub(crate) fn parse_exit_like(&mut self) -> ParseResult<Node> {
        let token = self.advance();
        let value = if self.has_value_after(&token) && !self.check_name(TokenName::When) {
            Some(Box::new(self.parse_expression()?))
        } else {
            None
        };
        let condition = self.parse_when_guard(&token)?;
        let kind = match token.name {
            TokenName::Return => NodeKind::Return { value, condition },
            TokenName::Throw => NodeKind::Throw { value, condition },
            _ => NodeKind::Exit { value, condition },
        };
        Ok(Node::new(token, kind))
    }

    /// `break` or `next`, with an optional `when` guard.
    pub(crate) fn parse_loop_control(&mut self) -> ParseResult<Node> {
        let token = self.advance();
        let condition = self.parse_when_guard(&token)?;
        let kind = if token.is_name(TokenName::Break) {
            NodeKind::Break { condition }
        } else {
            NodeKind::Next { condition }
        };
        Ok(Node::new(token, kind))
    }

    /// `on`/`once event` followed by one of:
    ///
    /// - `with (args) do ... end`
    /// - `(callback)`
    /// - `do ... end`, which becomes a lambda without parameters
    pub(crate) fn parse_on(&mut self) -> ParseResult<Node> {
        let token = self.advance();
        let event = Box::new(self.parse_expression()?);
        let callback = Box::new(self.parse_callback()?);
        let kind = if token.is_name(TokenName::Once) {
            NodeKind::Once { event, callback }
        } else {
            NodeKind::On { event, callback }
        };
        Ok(Node::new(token, kind))
    }

    fn parse_callback(&mut self) -> ParseResult<Node> {
        match self.current().token_type {
            TokenType::Lambda => self.parse_lambda(),
            TokenType::LParen => {
                self.stream.next();
                let callback = self.parse_expression()?;
                self.expect(TokenType::RParen)?;
                Ok(callback)
            }
            TokenType::Keyword if self.check_name(TokenName::Do) => {
                let token = self.advance();
                self.scopes.push();
                let body = self.parse_block(&[TokenName::End]).and_then(|body| {
                    self.expect_end()?;
                    Ok(body)
                });
                self.scopes.pop();
                Ok(Node::new(
                    token,
                    NodeKind::Lambda(LambdaDecl {
                        parameters: Vec::new(),
                        body: body?,
                        return_type: TypeId::ANY,
                    }),
                ))
            }
            _ => Err(self.unexpected("`with`, `(` or `do`")),
        }
    }

    /// `off event [(callback)]`
    pub(crate) fn parse_off(&mut self) -> ParseResult<Node> {
        let token = self.expect_name(TokenName::Off, "`off`")?;
        let event = Box::new(self.parse_expression()?);
        let callback = if self.eat(TokenType::LParen) {
            let callback = self.parse_expression()?;
            self.expect(TokenType::RParen)?;
            Some(Box::new(callback))
        } else {
            None
        };
        Ok(Node::new(token, NodeKind::Off { event, callback }))
    }

    /// `emit event [(args)]`
    pub(crate) fn parse_emit(&mut self) -> ParseResult<Node> {
        let token = self.expect_name(TokenName::Emit, "`emit`")?;
        let event = Box::new(self.parse_expression()?);
        let arguments = if self.check(TokenType::LParen) {
            self.parse_arguments()?
        } else {
            Vec::new()
        };
        Ok(Node::new(token, NodeKind::Emit { event, arguments }))
    }

    /// `eval source`
    pub(crate) fn parse_eval(&mut self) -> ParseResult<Node> {
        let token = self.expect_name(TokenName::Eval, "`eval`")?;
        let source = Box::new(self.parse_expression()?);
        Ok(Node::new(token, NodeKind::Eval { source }))
    }

    /// `import name` or `export name`. A bare name is taken as a string.
    pub(crate) fn parse_module_name(&mut self) -> ParseResult<Node> {
        let token = self.advance();
        let name = if self.check(TokenType::Identifier) {
            let name_token = self.current().clone();
            let name = self.parse_declared_name()?;
            Node::new(name_token, NodeKind::Literal(Value::string(name)))
        } else {
            self.parse_expression()?
        };
        let name = Box::new(name);
        let kind = if token.is_name(TokenName::Import) {
            NodeKind::Import { name }
        } else {
            NodeKind::Export { name }
        };
        Ok(Node::new(token, kind))
    }

    /// `include path`
    pub(crate) fn parse_include(&mut self) -> ParseResult<Node> {
        let token = self.expect_name(TokenName::Include, "`include`")?;
        let path = Box::new(self.parse_expression()?);
        Ok(Node::new(token, NodeKind::Include { path }))
    }
}
