//! The syntax tree the parser builds and the interpreter walks.
//!
//! Every node owns its children and carries the token it started at, for
//! diagnostics. Identifier text is already mangled where the parser
//! introduced a scoped binding, so the interpreter never needs to know
//! about shadowing.

mod decl;

use kiwi_value::Value;

use crate::{Token, TokenName};

pub use decl::{
    CaseStatement, CaseWhen, FunctionDecl, IfBranch, IfStatement, LambdaDecl, MethodFlags,
    Parameter, StructDecl, TryStatement, VariableDecl,
};

/// An AST node.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub token: Token,
    pub kind: NodeKind,
}

impl Node {
    #[inline]
    pub fn new(token: Token, kind: NodeKind) -> Self {
        Node { token, kind }
    }

    /// Statements of a `Program` node; empty for anything else.
    pub fn statements(&self) -> &[Node] {
        match &self.kind {
            NodeKind::Program { statements, .. } => statements,
            _ => &[],
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    /// The root: every statement of every parsed stream, in order.
    /// `is_entry_point` marks the main script rather than a library.
    Program {
        statements: Vec<Node>,
        is_entry_point: bool,
    },
    /// `pass`, and statements that produce nothing.
    NoOp,

    // Expressions
    Literal(Value),
    ListLiteral(Vec<Node>),
    /// `[a..b]` or `[a to b]`
    RangeLiteral { start: Box<Node>, end: Box<Node> },
    HashLiteral(Vec<(Node, Node)>),
    /// A name, mangled if it is a scoped binding. Qualified names keep
    /// their `::` separators: `Pkg::thing`.
    Identifier(String),
    /// `@name`; an empty name is `@` itself.
    SelfRef(String),
    BinaryOperation {
        op: TokenName,
        left: Box<Node>,
        right: Box<Node>,
    },
    UnaryOperation { op: TokenName, operand: Box<Node> },
    TernaryOperation {
        condition: Box<Node>,
        true_branch: Box<Node>,
        false_branch: Box<Node>,
    },
    Index { target: Box<Node>, index: Box<Node> },
    Slice {
        target: Box<Node>,
        start: Option<Box<Node>>,
        stop: Option<Box<Node>>,
        step: Option<Box<Node>>,
    },
    /// `name(args)`. `builtin` is set when the name is a builtin function.
    FunctionCall {
        name: String,
        arguments: Vec<Node>,
        builtin: Option<TokenName>,
    },
    /// `target.method(args)`
    MethodCall {
        target: Box<Node>,
        method: String,
        arguments: Vec<Node>,
        builtin: Option<TokenName>,
    },
    /// `target.member`
    MemberAccess { target: Box<Node>, member: String },
    Lambda(LambdaDecl),

    // Assignments
    Assignment {
        name: String,
        op: TokenName,
        value: Box<Node>,
    },
    ConstAssignment { name: String, value: Box<Node> },
    /// `target[i] op= value`; `target` is an `Index` or `Slice` node.
    IndexAssignment {
        target: Box<Node>,
        op: TokenName,
        value: Box<Node>,
    },
    /// `object.member op= value`
    MemberAssignment {
        object: Box<Node>,
        member: String,
        op: TokenName,
        value: Box<Node>,
    },
    /// `a, b =< x, y`
    PackAssignment { left: Vec<Node>, right: Vec<Node> },
    /// `var (...)`
    Variable(Vec<VariableDecl>),

    // Declarations
    Function(FunctionDecl),
    Struct(StructDecl),
    Interface { name: String, methods: Vec<Node> },
    Package { name: String, body: Vec<Node> },

    // Events
    On { event: Box<Node>, callback: Box<Node> },
    Once { event: Box<Node>, callback: Box<Node> },
    Off {
        event: Box<Node>,
        callback: Option<Box<Node>>,
    },
    Emit { event: Box<Node>, arguments: Vec<Node> },

    // Output
    Print {
        expression: Box<Node>,
        newline: bool,
        stderr: bool,
    },
    PrintXy {
        value: Box<Node>,
        x: Box<Node>,
        y: Box<Node>,
    },

    // Control flow
    If(IfStatement),
    Case(CaseStatement),
    ForLoop {
        value_iterator: String,
        index_iterator: Option<String>,
        data_set: Box<Node>,
        body: Vec<Node>,
    },
    WhileLoop { condition: Box<Node>, body: Vec<Node> },
    RepeatLoop {
        count: Box<Node>,
        alias: Option<String>,
        body: Vec<Node>,
    },
    /// `do ... end [when condition]`
    Do {
        body: Vec<Node>,
        condition: Option<Box<Node>>,
    },
    Try(TryStatement),
    Return {
        value: Option<Box<Node>>,
        condition: Option<Box<Node>>,
    },
    Throw {
        value: Option<Box<Node>>,
        condition: Option<Box<Node>>,
    },
    Exit {
        value: Option<Box<Node>>,
        condition: Option<Box<Node>>,
    },
    Break { condition: Option<Box<Node>> },
    Next { condition: Option<Box<Node>> },

    // Modules
    Eval { source: Box<Node> },
    Import { name: Box<Node> },
    Include { path: Box<Node> },
    Export { name: Box<Node> },
}

impl NodeKind {
    /// Kinds allowed as the expression inside `[...]` on a single index.
    pub fn is_index_expression(&self) -> bool {
        matches!(
            self,
            NodeKind::Literal(_)
                | NodeKind::Identifier(_)
                | NodeKind::FunctionCall { .. }
                | NodeKind::BinaryOperation { .. }
                | NodeKind::MethodCall { .. }
                | NodeKind::MemberAccess { .. }
        )
    }

    /// Short name for tracing and messages.
    pub fn describe(&self) -> &'static str {
        match self {
            NodeKind::Program { .. } => "program",
            NodeKind::NoOp => "no-op",
            NodeKind::Literal(_) => "literal",
            NodeKind::ListLiteral(_) => "list literal",
            NodeKind::RangeLiteral { .. } => "range literal",
            NodeKind::HashLiteral(_) => "hash literal",
            NodeKind::Identifier(_) => "identifier",
            NodeKind::SelfRef(_) => "self reference",
            NodeKind::BinaryOperation { .. } => "binary operation",
            NodeKind::UnaryOperation { .. } => "unary operation",
            NodeKind::TernaryOperation { .. } => "ternary operation",
            NodeKind::Index { .. } => "index",
            NodeKind::Slice { .. } => "slice",
            NodeKind::FunctionCall { .. } => "function call",
            NodeKind::MethodCall { .. } => "method call",
            NodeKind::MemberAccess { .. } => "member access",
            NodeKind::Lambda(_) => "lambda",
            NodeKind::Assignment { .. } => "assignment",
            NodeKind::ConstAssignment { .. } => "const assignment",
            NodeKind::IndexAssignment { .. } => "index assignment",
            NodeKind::MemberAssignment { .. } => "member assignment",
            NodeKind::PackAssignment { .. } => "pack assignment",
            NodeKind::Variable(_) => "variable declaration",
            NodeKind::Function(_) => "function",
            NodeKind::Struct(_) => "struct",
            NodeKind::Interface { .. } => "interface",
            NodeKind::Package { .. } => "package",
            NodeKind::On { .. } => "on",
            NodeKind::Once { .. } => "once",
            NodeKind::Off { .. } => "off",
            NodeKind::Emit { .. } => "emit",
            NodeKind::Print { .. } => "print",
            NodeKind::PrintXy { .. } => "printxy",
            NodeKind::If(_) => "if",
            NodeKind::Case(_) => "case",
            NodeKind::ForLoop { .. } => "for loop",
            NodeKind::WhileLoop { .. } => "while loop",
            NodeKind::RepeatLoop { .. } => "repeat loop",
            NodeKind::Do { .. } => "do block",
            NodeKind::Try(_) => "try",
            NodeKind::Return { .. } => "return",
            NodeKind::Throw { .. } => "throw",
            NodeKind::Exit { .. } => "exit",
            NodeKind::Break { .. } => "break",
            NodeKind::Next { .. } => "next",
            NodeKind::Eval { .. } => "eval",
            NodeKind::Import { .. } => "import",
            NodeKind::Include { .. } => "include",
            NodeKind::Export { .. } => "export",
        }
    }
}
