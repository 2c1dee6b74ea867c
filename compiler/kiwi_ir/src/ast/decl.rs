//! Payloads of the larger declaration and control-flow nodes.

use bitflags::bitflags;

use crate::{Node, TypeId};

bitflags! {
    /// Modifiers written before `fn` inside a struct or interface.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct MethodFlags: u8 {
        const STATIC = 1 << 0;
        const PRIVATE = 1 << 1;
        const OVERRIDE = 1 << 2;
        const ABSTRACT = 1 << 3;
    }
}

/// One entry of a `var (...)` block.
#[derive(Clone, Debug, PartialEq)]
pub struct VariableDecl {
    /// Mangled name.
    pub name: String,
    pub type_hint: TypeId,
    pub default: Option<Node>,
}

/// A function, method or lambda parameter.
#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    /// Mangled name.
    pub name: String,
    pub type_hint: TypeId,
    pub default: Option<Node>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDecl {
    /// The declared name; for operator overloads, the operator symbol.
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub body: Vec<Node>,
    pub return_type: TypeId,
    pub flags: MethodFlags,
    pub is_operator: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LambdaDecl {
    pub parameters: Vec<Parameter>,
    pub body: Vec<Node>,
    pub return_type: TypeId,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StructDecl {
    pub name: String,
    /// `< Base`
    pub base: Option<String>,
    /// `: A, B`
    pub interfaces: Vec<String>,
    pub methods: Vec<Node>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IfBranch {
    pub condition: Box<Node>,
    pub body: Vec<Node>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IfStatement {
    pub branch: IfBranch,
    pub elsif: Vec<IfBranch>,
    pub else_body: Vec<Node>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CaseWhen {
    pub condition: Node,
    pub body: Vec<Node>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CaseStatement {
    pub test: Option<Box<Node>>,
    /// Mangled `as` binding for the test value.
    pub alias: Option<String>,
    pub whens: Vec<CaseWhen>,
    pub else_body: Vec<Node>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TryStatement {
    pub body: Vec<Node>,
    /// Binds the error type in `catch (type, message)`.
    pub error_type: Option<String>,
    /// Binds the message in `catch (message)` or `catch (type, message)`.
    pub error_message: Option<String>,
    pub catch_body: Vec<Node>,
    pub finally_body: Vec<Node>,
}
