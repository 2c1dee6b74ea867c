//! The binary precedence chain.
//!
//! Lowest to highest: ternary, `|| ??`, `&&`, `|`, `^`, `&`, `== !=`,
//! `< <= > >=`, `<< >> >>>`, `+ -`, `* / % **`, unary `! - ~`.
//! Every binary level is left-associative.

use kiwi_ir::{Node, NodeKind, TokenName, TokenType};
use kiwi_stack::ensure_sufficient_stack;

use crate::error::ParseResult;
use crate::Parser;

/// Binary levels, loosest first.
const LEVELS: &[&[TokenName]] = &[
    &[TokenName::Or, TokenName::NullCoalesce],
    &[TokenName::And],
    &[TokenName::BitwiseOr],
    &[TokenName::BitwiseXor],
    &[TokenName::BitwiseAnd],
    &[TokenName::Equal, TokenName::NotEqual],
    &[
        TokenName::LessThan,
        TokenName::LessThanOrEqual,
        TokenName::GreaterThan,
        TokenName::GreaterThanOrEqual,
    ],
    &[
        TokenName::LeftShift,
        TokenName::RightShift,
        TokenName::UnsignedRightShift,
    ],
    &[TokenName::Add, TokenName::Subtract],
    &[
        TokenName::Multiply,
        TokenName::Divide,
        TokenName::Modulus,
        TokenName::Exponent,
    ],
];

impl Parser<'_> {
    /// Parse an expression.
    ///
    /// Uses `ensure_sufficient_stack` so deeply nested input cannot
    /// overflow the stack.
    pub(crate) fn parse_expression(&mut self) -> ParseResult<Node> {
        ensure_sufficient_stack(|| self.parse_ternary())
    }

    /// `condition ? a : b`
    fn parse_ternary(&mut self) -> ParseResult<Node> {
        let condition = self.parse_binary(0)?;
        if !self.check_operator(TokenName::Question) {
            return Ok(condition);
        }
        let token = self.advance();
        let true_branch = self.parse_expression()?;
        self.expect(TokenType::Colon)?;
        let false_branch = self.parse_expression()?;
        Ok(Node::new(
            token,
            NodeKind::TernaryOperation {
                condition: Box::new(condition),
                true_branch: Box::new(true_branch),
                false_branch: Box::new(false_branch),
            },
        ))
    }

    fn parse_binary(&mut self, level: usize) -> ParseResult<Node> {
        let Some(operators) = LEVELS.get(level) else {
            return self.parse_unary();
        };
        let mut left = self.parse_binary(level + 1)?;
        while let Some(op) = self.match_operator(operators) {
            let token = self.advance();
            let right = self.parse_binary(level + 1)?;
            left = Node::new(
                token,
                NodeKind::BinaryOperation {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
            );
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> ParseResult<Node> {
        let Some(op) = self.match_operator(&[TokenName::Not, TokenName::Subtract, TokenName::BitwiseNot]) else {
            return self.parse_postfix();
        };
        let token = self.advance();
        let operand = ensure_sufficient_stack(|| self.parse_unary())?;
        Ok(Node::new(
            token,
            NodeKind::UnaryOperation {
                op,
                operand: Box::new(operand),
            },
        ))
    }

    /// The current token's name when it is one of `operators`.
    fn match_operator(&self, operators: &[TokenName]) -> Option<TokenName> {
        let current = self.current();
        (current.is(TokenType::Operator) && operators.contains(&current.name)).then_some(current.name)
    }

    pub(crate) fn check_operator(&self, name: TokenName) -> bool {
        self.check(TokenType::Operator) && self.check_name(name)
    }
}
