//! Grammar productions.
//!
//! - `mod.rs`: statement dispatch, blocks, assignments
//! - `expr.rs`: the binary precedence chain and unary operators
//! - `primary.rs`: literals, identifiers, calls, member and index chains
//! - `stmt.rs`: single-keyword statements (print, return, events, ...)
//! - `decl.rs`: `var`, functions, lambdas, structs, interfaces, packages
//! - `control.rs`: if, case, loops, do, try

mod control;
mod decl;
mod expr;
mod primary;
mod stmt;

use kiwi_diagnostic::KiwiError;
use kiwi_ir::{MethodFlags, Node, NodeKind, Token, TokenName, TokenType};
use kiwi_stack::ensure_sufficient_stack;
use tracing::trace;

use crate::error::ParseResult;
use crate::Parser;

impl Parser<'_> {
    /// Parse one statement.
    pub(crate) fn parse_statement(&mut self) -> ParseResult<Node> {
        ensure_sufficient_stack(|| self.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> ParseResult<Node> {
        let token = self.current().clone();
        trace!(token = %token, line = token.span.line, "statement");
        match token.token_type {
            TokenType::Keyword => self.parse_keyword_statement(&token),
            TokenType::Conditional => match token.name {
                TokenName::If => self.parse_if(),
                TokenName::Case => self.parse_case(),
                _ => Err(self.error(format!("Unexpected {token}."))),
            },
            TokenType::Error => Err(self.error(format!("Invalid token {token}."))),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_keyword_statement(&mut self, token: &Token) -> ParseResult<Node> {
        match token.name {
            TokenName::Var => self.parse_variable(),
            TokenName::Const => self.parse_const(),
            TokenName::Method => self.parse_function(MethodFlags::empty()),
            TokenName::Static | TokenName::Private | TokenName::Override | TokenName::Abstract => {
                Err(self.error(format!("{token} is only allowed on methods inside a struct.")))
            }
            TokenName::Struct => self.parse_struct(),
            TokenName::Interface => self.parse_interface(),
            TokenName::Package => self.parse_package(),
            TokenName::For => self.parse_for(),
            TokenName::While => self.parse_while(),
            TokenName::Repeat => self.parse_repeat(),
            TokenName::Do => self.parse_do(),
            TokenName::Try => self.parse_try(),
            TokenName::Print | TokenName::PrintLn | TokenName::EPrint | TokenName::EPrintLn => {
                self.parse_print()
            }
            TokenName::PrintXy => self.parse_printxy(),
            TokenName::Return | TokenName::Throw | TokenName::Exit => self.parse_exit_like(),
            TokenName::Break | TokenName::Next => self.parse_loop_control(),
            TokenName::On | TokenName::Once => self.parse_on(),
            TokenName::Off => self.parse_off(),
            TokenName::Emit => self.parse_emit(),
            TokenName::Eval => self.parse_eval(),
            TokenName::Import | TokenName::Export => self.parse_module_name(),
            TokenName::Include => self.parse_include(),
            TokenName::Pass => {
                let token = self.advance();
                Ok(Node::new(token, NodeKind::NoOp))
            }
            TokenName::This => self.parse_expression_statement(),
            _ => Err(self.error(format!("Unexpected {token}."))),
        }
    }

    /// Statements up to (not including) one of `terminators`.
    ///
    /// Terminators are conditional or keyword names such as `end`,
    /// `else` or `catch`. Running out of input is an error.
    pub(crate) fn parse_block(&mut self, terminators: &[TokenName]) -> ParseResult<Vec<Node>> {
        let mut body = Vec::new();
        loop {
            let current = self.current();
            if current.is_eof() {
                return Err(self.error("Unexpected end of file."));
            }
            if matches!(current.token_type, TokenType::Conditional | TokenType::Keyword)
                && terminators.contains(&current.name)
            {
                return Ok(body);
            }
            body.push(self.parse_statement()?);
        }
    }

    /// `end`
    pub(crate) fn expect_end(&mut self) -> ParseResult<Token> {
        self.expect_name(TokenName::End, "`end`")
    }

    /// An expression, or an assignment to a name, index, member or
    /// several names at once.
    fn parse_expression_statement(&mut self) -> ParseResult<Node> {
        if self.check(TokenType::Identifier) {
            if self.peek().is(TokenType::Comma) && self.is_pack_assignment() {
                return self.parse_pack_assignment();
            }
            if self.peek().is(TokenType::Operator) && self.peek().name.is_assignment() {
                let name_token = self.advance();
                let op = self.advance();
                let value = self.parse_expression()?;
                let name = self.scopes.lookup(&name_token.text);
                return Ok(Node::new(
                    op.clone(),
                    NodeKind::Assignment {
                        name,
                        op: op.name,
                        value: Box::new(value),
                    },
                ));
            }
        }

        let expression = self.parse_expression()?;
        if !(self.check(TokenType::Operator) && self.current().name.is_assignment()) {
            return Ok(expression);
        }
        let op = self.advance();
        let value = Box::new(self.parse_expression()?);
        let target = expression.kind.describe();
        let kind = match expression.kind {
            NodeKind::Index { .. } | NodeKind::Slice { .. } => NodeKind::IndexAssignment {
                target: Box::new(expression),
                op: op.name,
                value,
            },
            NodeKind::MemberAccess { target, member } => NodeKind::MemberAssignment {
                object: target,
                member,
                op: op.name,
                value,
            },
            NodeKind::SelfRef(member) if !member.is_empty() => NodeKind::MemberAssignment {
                object: Box::new(Node::new(expression.token, NodeKind::SelfRef(String::new()))),
                member,
                op: op.name,
                value,
            },
            NodeKind::Identifier(name) => NodeKind::Assignment {
                name,
                op: op.name,
                value,
            },
            _ => return Err(KiwiError::syntax(&op, format!("Cannot assign to {target}.")).into()),
        };
        Ok(Node::new(op, kind))
    }

    /// Whether the tokens ahead read `name, name, ... =<`.
    fn is_pack_assignment(&self) -> bool {
        let mut offset = 0;
        loop {
            if !self.stream.peek_at(offset).is(TokenType::Identifier) {
                return false;
            }
            let next = self.stream.peek_at(offset + 1);
            if next.is_name(TokenName::Unpack) {
                return true;
            }
            if !next.is(TokenType::Comma) {
                return false;
            }
            offset += 2;
        }
    }

    /// `a, b, c =< x, y, z`. The right side takes at most as many
    /// expressions as there are names.
    fn parse_pack_assignment(&mut self) -> ParseResult<Node> {
        let mut left = Vec::new();
        loop {
            let token = self.expect_identifier()?;
            let name = self.scopes.lookup(&token.text);
            left.push(Node::new(token, NodeKind::Identifier(name)));
            if !self.eat(TokenType::Comma) {
                break;
            }
        }
        let op = self.expect_name(TokenName::Unpack, "`=<`")?;

        let mut right = vec![self.parse_expression()?];
        while right.len() < left.len() && self.eat(TokenType::Comma) {
            right.push(self.parse_expression()?);
        }
        Ok(Node::new(op, NodeKind::PackAssignment { left, right }))
    }

    /// An optional `when condition` on the same line as `anchor`. A
    /// `when` on a later line starts the next `case` branch.
    pub(crate) fn parse_when_guard(&mut self, anchor: &Token) -> ParseResult<Option<Box<Node>>> {
        if self.same_line_as(anchor) && self.eat_name(TokenName::When) {
            Ok(Some(Box::new(self.parse_expression()?)))
        } else {
            Ok(None)
        }
    }
}
