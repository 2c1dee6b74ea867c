//! Kiwi IR - shared front-end data structures
//!
//! This crate contains the types the lexer produces and the parser
//! consumes, plus the tree the parser hands to the interpreter:
//! - Source locations ([`TokenSpan`]) and the [`FileRegistry`] they index
//! - Tokens, their categories and fine-grained names
//! - [`TokenStream`], the cursor the parser reads from
//! - AST nodes ([`Node`], [`NodeKind`])
//! - Identifiers for builtin name tables and registered types
//!
//! Literal payloads are [`kiwi_value::Value`]s, so tokens and nodes are
//! single-threaded (`!Send`). The registries are `Send + Sync` and are
//! shared through `Arc`.

pub mod ast;
mod builtin;
mod file_registry;
mod span;
mod token;
mod type_id;

pub use ast::{
    CaseStatement, CaseWhen, FunctionDecl, IfBranch, IfStatement, LambdaDecl, MethodFlags, Node,
    NodeKind, Parameter, StructDecl, TryStatement, VariableDecl,
};
pub use builtin::BuiltinTable;
pub use file_registry::{FileId, FileRegistry, SharedFileRegistry};
pub use span::TokenSpan;
pub use token::{Token, TokenName, TokenStream, TokenType};
pub use type_id::TypeId;
