//! Primary expressions and their postfix chains.

use kiwi_diagnostic::KiwiError;
use kiwi_ir::{Node, NodeKind, Token, TokenName, TokenType};

use crate::error::ParseResult;
use crate::Parser;

impl Parser<'_> {
    /// A primary followed by any number of `.member`, `.method(...)`,
    /// `[index]` and `[a:b:c]` suffixes.
    pub(crate) fn parse_postfix(&mut self) -> ParseResult<Node> {
        let mut node = self.parse_primary()?;
        loop {
            node = match self.current().token_type {
                TokenType::Dot => self.parse_member(node)?,
                TokenType::LBracket => self.parse_index(node)?,
                _ => return Ok(node),
            };
        }
    }

    fn parse_primary(&mut self) -> ParseResult<Node> {
        let token = self.current().clone();
        match token.token_type {
            TokenType::Literal | TokenType::String => {
                self.stream.next();
                let value = token.value.clone();
                Ok(Node::new(token, NodeKind::Literal(value)))
            }
            TokenType::LParen => {
                self.stream.next();
                let inner = self.parse_expression()?;
                self.expect(TokenType::RParen)?;
                Ok(inner)
            }
            TokenType::LBracket => self.parse_list(),
            TokenType::LBrace => self.parse_hash(),
            TokenType::Lambda => self.parse_lambda(),
            TokenType::Conditional if token.is_name(TokenName::Case) => self.parse_case(),
            TokenType::Keyword if token.is_name(TokenName::This) => self.parse_self_ref(),
            TokenType::Identifier => self.parse_identifier(),
            TokenType::Typename => {
                self.stream.next();
                let name = token.text.clone();
                Ok(Node::new(token, NodeKind::Identifier(name)))
            }
            TokenType::Error => Err(self.error(format!("Invalid token {token}."))),
            _ => Err(self.unexpected("an expression")),
        }
    }

    /// `[a, b, c]`, `[a..b]` or `[a to b]`
    fn parse_list(&mut self) -> ParseResult<Node> {
        let token = self.expect(TokenType::LBracket)?;
        let mut elements = Vec::new();
        if self.eat(TokenType::RBracket) {
            return Ok(Node::new(token, NodeKind::ListLiteral(elements)));
        }

        let first = self.parse_expression()?;
        if self.eat(TokenType::Range) || self.eat_name(TokenName::To) {
            let end = self.parse_expression()?;
            self.expect(TokenType::RBracket)?;
            return Ok(Node::new(
                token,
                NodeKind::RangeLiteral {
                    start: Box::new(first),
                    end: Box::new(end),
                },
            ));
        }

        elements.push(first);
        while self.eat(TokenType::Comma) {
            if self.check(TokenType::RBracket) {
                break;
            }
            elements.push(self.parse_expression()?);
        }
        self.expect(TokenType::RBracket)?;
        Ok(Node::new(token, NodeKind::ListLiteral(elements)))
    }

    /// `{key: value, ...}`
    fn parse_hash(&mut self) -> ParseResult<Node> {
        let token = self.expect(TokenType::LBrace)?;
        let mut entries = Vec::new();
        while !self.check(TokenType::RBrace) {
            let key = self.parse_expression()?;
            self.expect(TokenType::Colon)?;
            let value = self.parse_expression()?;
            entries.push((key, value));
            if !self.eat(TokenType::Comma) {
                break;
            }
        }
        self.expect(TokenType::RBrace)?;
        Ok(Node::new(token, NodeKind::HashLiteral(entries)))
    }

    /// `@`, `@name` or `@name(args)`.
    fn parse_self_ref(&mut self) -> ParseResult<Node> {
        let at = self.advance();
        let current = self.current();
        let attached = current.is(TokenType::Identifier)
            && current.span.file == at.span.file
            && current.span.line == at.span.line
            && current.span.column == at.span.column + 1;
        if !attached {
            return Ok(Node::new(at, NodeKind::SelfRef(String::new())));
        }

        let name = self.advance();
        if !self.check(TokenType::LParen) {
            return Ok(Node::new(at, NodeKind::SelfRef(name.text)));
        }
        let arguments = self.parse_arguments()?;
        let target = Node::new(at, NodeKind::SelfRef(String::new()));
        Ok(Node::new(
            name.clone(),
            NodeKind::MethodCall {
                target: Box::new(target),
                method: name.text,
                arguments,
                builtin: None,
            },
        ))
    }

    /// A bare or qualified name, possibly called.
    fn parse_identifier(&mut self) -> ParseResult<Node> {
        let token = self.expect_identifier()?;
        let mut segments = vec![token.text.clone()];
        while self.check(TokenType::Qualifier) && self.peek().is(TokenType::Identifier) {
            self.stream.next();
            segments.push(self.advance().text);
        }
        self.require_package(&segments)?;

        let name = if segments.len() == 1 {
            self.scopes.lookup(&token.text)
        } else {
            segments.join("::")
        };
        if !self.check(TokenType::LParen) {
            return Ok(Node::new(token, NodeKind::Identifier(name)));
        }

        let arguments = self.parse_arguments()?;
        let builtin = match token.name {
            TokenName::BuiltinFunction(_) if segments.len() == 1 => Some(token.name),
            _ => None,
        };
        Ok(Node::new(
            token,
            NodeKind::FunctionCall {
                name,
                arguments,
                builtin,
            },
        ))
    }

    /// `(a, b, ...)`
    pub(crate) fn parse_arguments(&mut self) -> ParseResult<Vec<Node>> {
        self.expect(TokenType::LParen)?;
        let mut arguments = Vec::new();
        while !self.check(TokenType::RParen) {
            arguments.push(self.parse_expression()?);
            if !self.eat(TokenType::Comma) {
                break;
            }
        }
        self.expect(TokenType::RParen)?;
        Ok(arguments)
    }

    /// `.member` or `.method(args)`
    fn parse_member(&mut self, target: Node) -> ParseResult<Node> {
        self.expect(TokenType::Dot)?;
        let member = self.current().clone();
        if !is_member_name(&member) {
            return Err(self.unexpected("a member name"));
        }
        self.stream.next();

        if !self.check(TokenType::LParen) {
            return Ok(Node::new(
                member.clone(),
                NodeKind::MemberAccess {
                    target: Box::new(target),
                    member: member.text,
                },
            ));
        }
        let arguments = self.parse_arguments()?;
        let builtin = matches!(member.name, TokenName::BuiltinMethod(_)).then_some(member.name);
        Ok(Node::new(
            member.clone(),
            NodeKind::MethodCall {
                target: Box::new(target),
                method: member.text,
                arguments,
                builtin,
            },
        ))
    }

    /// `[index]`, or a slice `[start:stop:step]` where any part may be
    /// left out and `::` stands for two colons.
    fn parse_index(&mut self, target: Node) -> ParseResult<Node> {
        let open = self.expect(TokenType::LBracket)?;

        let start = if self.at_slice_separator() {
            None
        } else {
            Some(self.parse_expression()?)
        };

        if !self.at_slice_separator() {
            self.expect(TokenType::RBracket)?;
            let Some(index) = start else {
                return Err(self.unexpected("an index"));
            };
            if !index.kind.is_index_expression() {
                let message = format!("Invalid index expression: {}.", index.kind.describe());
                return Err(KiwiError::syntax(&index.token, message).into());
            }
            return Ok(Node::new(
                open,
                NodeKind::Index {
                    target: Box::new(target),
                    index: Box::new(index),
                },
            ));
        }

        let (stop, step) = if self.eat(TokenType::Qualifier) {
            (None, self.parse_slice_part()?)
        } else {
            self.expect(TokenType::Colon)?;
            let stop = self.parse_slice_part()?;
            let step = if self.eat(TokenType::Colon) {
                self.parse_slice_part()?
            } else {
                None
            };
            (stop, step)
        };
        self.expect(TokenType::RBracket)?;

        Ok(Node::new(
            open,
            NodeKind::Slice {
                target: Box::new(target),
                start: start.map(Box::new),
                stop,
                step,
            },
        ))
    }

    fn at_slice_separator(&self) -> bool {
        self.check(TokenType::Colon) || self.check(TokenType::Qualifier)
    }

    /// An optional slice component.
    fn parse_slice_part(&mut self) -> ParseResult<Option<Box<Node>>> {
        if self.check(TokenType::RBracket) || self.at_slice_separator() {
            return Ok(None);
        }
        Ok(Some(Box::new(self.parse_expression()?)))
    }
}

/// Tokens that may follow `.`: plain names, and words the lexer gave
/// another meaning, such as `.type` or `.print`.
fn is_member_name(token: &Token) -> bool {
    match token.token_type {
        TokenType::Identifier | TokenType::Typename => true,
        TokenType::Keyword | TokenType::Conditional | TokenType::Lambda => {
            !token.is_name(TokenName::This)
        }
        _ => false,
    }
}
