//! Conditionals, loops, `do` blocks and `try`.
//!
//! Multi-part constructs move forward only: once `else` (or `finally`)
//! has been seen, the earlier keywords are no longer terminators and
//! show up as unexpected tokens.

use kiwi_diagnostic::KiwiError;
use kiwi_ir::{
    CaseStatement, CaseWhen, IfBranch, IfStatement, Node, NodeKind, Token, TokenName, TokenType,
    TryStatement,
};

use crate::error::ParseResult;
use crate::Parser;

impl Parser<'_> {
    /// `if c ... [elsif c ...]* [else ...] end`
    pub(crate) fn parse_if(&mut self) -> ParseResult<Node> {
        let token = self.expect_name(TokenName::If, "`if`")?;
        let branch = self.parse_if_branch()?;
        let mut elsif = Vec::new();
        let mut else_body = Vec::new();

        loop {
            if self.eat_name(TokenName::Elsif) {
                elsif.push(self.parse_if_branch()?);
            } else if self.eat_name(TokenName::Else) {
                else_body = self.parse_block(&[TokenName::End])?;
            } else {
                self.expect_end()?;
                break;
            }
        }

        Ok(Node::new(
            token,
            NodeKind::If(IfStatement {
                branch,
                elsif,
                else_body,
            }),
        ))
    }

    fn parse_if_branch(&mut self) -> ParseResult<IfBranch> {
        let condition = self.parse_expression()?;
        let body = self.parse_block(&[TokenName::Elsif, TokenName::Else, TokenName::End])?;
        Ok(IfBranch { condition: Box::new(condition), body })
    }

    /// `case [test] [as alias] (when c ...)* [else ...] end`, also usable
    /// as an expression.
    pub(crate) fn parse_case(&mut self) -> ParseResult<Node> {
        let token = self.expect_name(TokenName::Case, "`case`")?;
        let test = if self.check_name(TokenName::When) || self.check_name(TokenName::As) {
            None
        } else {
            Some(Box::new(self.parse_expression()?))
        };
        let alias = if self.eat_name(TokenName::As) {
            let alias = self.expect_identifier()?;
            Some((self.declare(&alias)?, alias.text))
        } else {
            None
        };

        let mut whens = Vec::new();
        while self.eat_name(TokenName::When) {
            let condition = self.parse_expression()?;
            let body = self.parse_block(&[TokenName::When, TokenName::Else, TokenName::End])?;
            whens.push(CaseWhen { condition, body });
        }
        let else_body = if self.eat_name(TokenName::Else) {
            self.parse_block(&[TokenName::End])?
        } else {
            Vec::new()
        };
        self.expect_end()?;

        let alias = alias.map(|(mangled, original)| {
            self.scopes.forget(&original);
            mangled
        });
        Ok(Node::new(
            token,
            NodeKind::Case(CaseStatement {
                test,
                alias,
                whens,
                else_body,
            }),
        ))
    }

    /// `for value[, index] in data do ... end`. The iterators are bound
    /// for the body only.
    pub(crate) fn parse_for(&mut self) -> ParseResult<Node> {
        let token = self.expect_name(TokenName::For, "`for`")?;
        let value = self.expect_identifier()?;
        let index = if self.eat(TokenType::Comma) {
            Some(self.expect_identifier()?)
        } else {
            None
        };
        self.expect_name(TokenName::In, "`in`")?;
        let data_set = self.parse_expression()?;

        let value_iterator = self.declare(&value)?;
        let index_iterator = match &index {
            Some(index) => Some(self.declare(index)?),
            None => None,
        };
        self.eat_name(TokenName::Do);
        let body = self.parse_block(&[TokenName::End])?;
        self.expect_end()?;
        self.scopes.forget(&value.text);
        if let Some(index) = &index {
            self.scopes.forget(&index.text);
        }

        Ok(Node::new(
            token,
            NodeKind::ForLoop {
                value_iterator,
                index_iterator,
                data_set: Box::new(data_set),
                body,
            },
        ))
    }

    /// `while condition do ... end`
    pub(crate) fn parse_while(&mut self) -> ParseResult<Node> {
        let token = self.expect_name(TokenName::While, "`while`")?;
        let condition = self.parse_expression()?;
        self.eat_name(TokenName::Do);
        let body = self.parse_block(&[TokenName::End])?;
        self.expect_end()?;
        Ok(Node::new(
            token,
            NodeKind::WhileLoop {
                condition: Box::new(condition),
                body,
            },
        ))
    }

    /// `repeat count [as alias] do ... end`
    pub(crate) fn parse_repeat(&mut self) -> ParseResult<Node> {
        let token = self.expect_name(TokenName::Repeat, "`repeat`")?;
        let count = self.parse_expression()?;
        let alias = if self.eat_name(TokenName::As) {
            Some(self.expect_identifier()?)
        } else {
            None
        };
        let mangled = match &alias {
            Some(alias) => Some(self.declare(alias)?),
            None => None,
        };
        self.eat_name(TokenName::Do);
        let body = self.parse_block(&[TokenName::End])?;
        self.expect_end()?;
        if let Some(alias) = &alias {
            self.scopes.forget(&alias.text);
        }

        Ok(Node::new(
            token,
            NodeKind::RepeatLoop {
                count: Box::new(count),
                alias: mangled,
                body,
            },
        ))
    }

    /// `do ... end [when condition]`
    pub(crate) fn parse_do(&mut self) -> ParseResult<Node> {
        let token = self.expect_name(TokenName::Do, "`do`")?;
        let body = self.parse_block(&[TokenName::End])?;
        let end = self.expect_end()?;
        let condition = self.parse_when_guard(&end)?;
        Ok(Node::new(token, NodeKind::Do { body, condition }))
    }

    /// `try ... [catch [(message) | (type, message)] ...] [finally ...] end`
    pub(crate) fn parse_try(&mut self) -> ParseResult<Node> {
        let token = self.expect_name(TokenName::Try, "`try`")?;
        let body = self.parse_block(&[TokenName::Catch, TokenName::Finally, TokenName::End])?;

        let mut error_type = None;
        let mut error_message = None;
        let mut catch_body = Vec::new();
        if self.eat_name(TokenName::Catch) {
            let bindings = self.parse_catch_bindings()?;
            let mut declared = Vec::with_capacity(bindings.len());
            for binding in &bindings {
                declared.push(self.declare(binding)?);
            }
            catch_body = self.parse_block(&[TokenName::Finally, TokenName::End])?;
            for binding in &bindings {
                self.scopes.forget(&binding.text);
            }
            let mut declared = declared.into_iter();
            match bindings.len() {
                1 => error_message = declared.next(),
                2 => {
                    error_type = declared.next();
                    error_message = declared.next();
                }
                _ => {}
            }
        }
        let finally_body = if self.eat_name(TokenName::Finally) {
            self.parse_block(&[TokenName::End])?
        } else {
            Vec::new()
        };
        self.expect_end()?;

        Ok(Node::new(
            token,
            NodeKind::Try(TryStatement {
                body,
                error_type,
                error_message,
                catch_body,
                finally_body,
            }),
        ))
    }

    /// An optional `(a)` or `(a, b)` after `catch`.
    fn parse_catch_bindings(&mut self) -> ParseResult<Vec<Token>> {
        let mut bindings = Vec::new();
        if !self.check(TokenType::LParen) {
            return Ok(bindings);
        }
        let open = self.advance();
        while !self.check(TokenType::RParen) {
            bindings.push(self.expect_identifier()?);
            if !self.eat(TokenType::Comma) {
                break;
            }
        }
        self.expect(TokenType::RParen)?;
        if bindings.is_empty() || bindings.len() > 2 {
            let message = format!("`catch` takes 1 or 2 names but got {}.", bindings.len());
            return Err(KiwiError::syntax(&open, message).into());
        }
        Ok(bindings)
    }
}
