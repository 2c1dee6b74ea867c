//! Declarations: variables, constants, functions, lambdas, structs,
//! interfaces and packages.

use kiwi_diagnostic::KiwiError;
use kiwi_ir::{
    FunctionDecl, LambdaDecl, MethodFlags, Node, NodeKind, Parameter, StructDecl, Token, TokenName,
    TokenType, TypeId, VariableDecl,
};
use tracing::trace;

use crate::error::ParseResult;
use crate::Parser;

impl Parser<'_> {
    /// `var name[: type][= value]` or `var (a, b: integer = 2, c)`.
    pub(crate) fn parse_variable(&mut self) -> ParseResult<Node> {
        let token = self.expect_name(TokenName::Var, "`var`")?;
        let mut declarations = Vec::new();
        if self.eat(TokenType::LParen) {
            loop {
                declarations.push(self.parse_variable_entry()?);
                if !self.eat(TokenType::Comma) {
                    break;
                }
            }
            self.expect(TokenType::RParen)?;
        } else {
            declarations.push(self.parse_variable_entry()?);
        }
        Ok(Node::new(token, NodeKind::Variable(declarations)))
    }

    fn parse_variable_entry(&mut self) -> ParseResult<VariableDecl> {
        let (name, type_hint, default) = self.parse_binding()?;
        Ok(VariableDecl {
            name,
            type_hint,
            default,
        })
    }

    /// `name[: type][= default]`, declared in the innermost scope once
    /// the default has been parsed, so the default still sees any outer
    /// binding of the same name.
    fn parse_binding(&mut self) -> ParseResult<(String, TypeId, Option<Node>)> {
        let token = self.expect_identifier()?;
        let type_hint = self.parse_type_hint()?;
        let default = if self.check_operator(TokenName::Assign) {
            self.stream.next();
            Some(self.parse_expression()?)
        } else {
            None
        };
        let name = self.declare(&token)?;
        Ok((name, type_hint, default))
    }

    /// Mangle `token`'s name into the innermost scope.
    pub(crate) fn declare(&mut self, token: &Token) -> ParseResult<String> {
        match self.scopes.declare(&token.text) {
            Some(mangled) => Ok(mangled),
            None => {
                let message = format!("`{}` is already declared in this scope.", token.text);
                Err(KiwiError::syntax(token, message).into())
            }
        }
    }

    /// `const NAME = value`
    pub(crate) fn parse_const(&mut self) -> ParseResult<Node> {
        let token = self.expect_name(TokenName::Const, "`const`")?;
        let name = self.expect_identifier()?;
        self.expect_name(TokenName::Assign, "`=`")?;
        let value = self.parse_expression()?;
        Ok(Node::new(
            token,
            NodeKind::ConstAssignment {
                name: name.text,
                value: Box::new(value),
            },
        ))
    }

    /// `fn name(params) [: type] ... end`. Inside a struct the name may
    /// be an overloadable operator. Abstract methods have no body.
    pub(crate) fn parse_function(&mut self, flags: MethodFlags) -> ParseResult<Node> {
        let token = self.expect_name(TokenName::Method, "`fn`")?;
        let name = self.current().clone();
        let is_operator = match name.token_type {
            TokenType::Identifier => false,
            TokenType::Operator if self.struct_stack.is_empty() => {
                return Err(self.error(format!("Cannot overload {name} outside a struct.")));
            }
            TokenType::Operator if name.name.is_overloadable() => true,
            TokenType::Operator => {
                return Err(self.error(format!("Operator {name} cannot be overloaded.")));
            }
            _ => return Err(self.unexpected("a function name")),
        };
        self.stream.next();
        trace!(name = %name.text, ?flags, depth = self.scopes.depth(), "function");

        self.scopes.push();
        let result = self.parse_function_rest(flags);
        self.scopes.pop();
        let (parameters, return_type, body) = result?;

        Ok(Node::new(
            token,
            NodeKind::Function(FunctionDecl {
                name: name.text,
                parameters,
                body,
                return_type,
                flags,
                is_operator,
            }),
        ))
    }

    fn parse_function_rest(&mut self, flags: MethodFlags) -> ParseResult<(Vec<Parameter>, TypeId, Vec<Node>)> {
        let parameters = self.parse_parameters()?;
        let return_type = self.parse_type_hint()?;
        if flags.contains(MethodFlags::ABSTRACT) {
            return Ok((parameters, return_type, Vec::new()));
        }
        let body = self.parse_block(&[TokenName::End])?;
        self.expect_end()?;
        Ok((parameters, return_type, body))
    }

    /// An optional `(a, b: type = default, ...)` list, declared in the
    /// current (fresh) scope.
    fn parse_parameters(&mut self) -> ParseResult<Vec<Parameter>> {
        let mut parameters = Vec::new();
        if !self.eat(TokenType::LParen) {
            return Ok(parameters);
        }
        while !self.check(TokenType::RParen) {
            let (name, type_hint, default) = self.parse_binding()?;
            parameters.push(Parameter {
                name,
                type_hint,
                default,
            });
            if !self.eat(TokenType::Comma) {
                break;
            }
        }
        self.expect(TokenType::RParen)?;
        Ok(parameters)
    }

    /// `with (params) [: type] do ... end`
    pub(crate) fn parse_lambda(&mut self) -> ParseResult<Node> {
        let token = self.expect(TokenType::Lambda)?;
        self.scopes.push();
        let result = self.parse_lambda_rest();
        self.scopes.pop();
        Ok(Node::new(token, NodeKind::Lambda(result?)))
    }

    fn parse_lambda_rest(&mut self) -> ParseResult<LambdaDecl> {
        let parameters = self.parse_parameters()?;
        let return_type = self.parse_type_hint()?;
        self.expect_name(TokenName::Do, "`do`")?;
        let body = self.parse_block(&[TokenName::End])?;
        self.expect_end()?;
        Ok(LambdaDecl {
            parameters,
            body,
            return_type,
        })
    }

    /// `struct Name [< Base] [: Interface, ...] ... end`
    pub(crate) fn parse_struct(&mut self) -> ParseResult<Node> {
        let token = self.expect_name(TokenName::Struct, "`struct`")?;
        let name = self.expect_identifier()?.text;
        self.types.get_type(&name);
        self.structs.insert(name.clone());

        let base = if self.check_operator(TokenName::LessThan) {
            self.stream.next();
            Some(self.parse_declared_name()?)
        } else {
            None
        };
        let mut interfaces = Vec::new();
        if self.eat(TokenType::Colon) {
            loop {
                interfaces.push(self.parse_declared_name()?);
                if !self.eat(TokenType::Comma) {
                    break;
                }
            }
        }

        let methods = self.parse_methods(&name, MethodFlags::empty())?;
        Ok(Node::new(
            token,
            NodeKind::Struct(StructDecl {
                name,
                base,
                interfaces,
                methods,
            }),
        ))
    }

    /// `interface Name fn a(x) fn b() end`. Every method is abstract.
    pub(crate) fn parse_interface(&mut self) -> ParseResult<Node> {
        let token = self.expect_name(TokenName::Interface, "`interface`")?;
        let name = self.expect_identifier()?.text;
        self.types.get_type(&name);
        let methods = self.parse_methods(&name, MethodFlags::ABSTRACT)?;
        Ok(Node::new(token, NodeKind::Interface { name, methods }))
    }

    /// Method declarations up to and including `end`.
    fn parse_methods(&mut self, owner: &str, implied: MethodFlags) -> ParseResult<Vec<Node>> {
        self.struct_stack.push(owner.to_string());
        let result = self.parse_methods_until_end(implied);
        self.struct_stack.pop();
        result
    }

    fn parse_methods_until_end(&mut self, implied: MethodFlags) -> ParseResult<Vec<Node>> {
        let mut methods = Vec::new();
        loop {
            if self.check_name(TokenName::End) && self.check(TokenType::Conditional) {
                self.stream.next();
                return Ok(methods);
            }
            let flags = self.parse_method_flags() | implied;
            if !self.check_name(TokenName::Method) {
                return Err(self.unexpected("a method declaration"));
            }
            methods.push(self.parse_function(flags)?);
        }
    }

    /// Any run of `static`, `private`, `override` and `abstract`.
    fn parse_method_flags(&mut self) -> MethodFlags {
        let mut flags = MethodFlags::empty();
        loop {
            let flag = match self.current().name {
                TokenName::Static => MethodFlags::STATIC,
                TokenName::Private => MethodFlags::PRIVATE,
                TokenName::Override => MethodFlags::OVERRIDE,
                TokenName::Abstract => MethodFlags::ABSTRACT,
                _ => return flags,
            };
            self.stream.next();
            flags |= flag;
        }
    }

    /// `Name` or `Pkg::Name` in a declaration header.
    pub(crate) fn parse_declared_name(&mut self) -> ParseResult<String> {
        let mut name = self.expect_identifier()?.text;
        while self.check(TokenType::Qualifier) && self.peek().is(TokenType::Identifier) {
            self.stream.next();
            name.push_str("::");
            name.push_str(&self.advance().text);
        }
        Ok(name)
    }

    /// `package Name ... end`
    pub(crate) fn parse_package(&mut self) -> ParseResult<Node> {
        let token = self.expect_name(TokenName::Package, "`package`")?;
        let name = self.parse_declared_name()?;
        self.packages.insert(name.clone());
        let body = self.parse_block(&[TokenName::End])?;
        self.expect_end()?;
        self.defined_packages.push(name.clone());
        Ok(Node::new(token, NodeKind::Package { name, body }))
    }
}
