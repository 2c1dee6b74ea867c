//! Reserved words.
//!
//! Resolution order is fixed: core keywords, type names, word operators,
//! conditionals, literal words, then `with`. Builtin names are checked
//! by the lexer after all of these.

use kiwi_ir::{TokenName, TokenType};
use kiwi_value::Value;

/// Category and name of a reserved word, if `text` is one.
pub(crate) fn lookup(text: &str) -> Option<(TokenType, TokenName)> {
    if let Some(name) = core_keyword(text) {
        return Some((TokenType::Keyword, name));
    }
    if let Some(name) = type_name(text) {
        return Some((TokenType::Typename, name));
    }
    let word_operator = match text {
        "and" => Some(TokenName::And),
        "or" => Some(TokenName::Or),
        "not" => Some(TokenName::Not),
        _ => None,
    };
    if let Some(name) = word_operator {
        return Some((TokenType::Operator, name));
    }
    let conditional = match text {
        "if" => Some(TokenName::If),
        "elsif" => Some(TokenName::Elsif),
        "else" => Some(TokenName::Else),
        "end" => Some(TokenName::End),
        "case" => Some(TokenName::Case),
        _ => None,
    };
    if let Some(name) = conditional {
        return Some((TokenType::Conditional, name));
    }
    if literal(text).is_some() {
        return Some((TokenType::Literal, TokenName::Default));
    }
    (text == "with").then_some((TokenType::Lambda, TokenName::With))
}

/// Payload of `null`, `true` and `false`.
pub(crate) fn literal(text: &str) -> Option<Value> {
    match text {
        "null" => Some(Value::None),
        "true" => Some(Value::Boolean(true)),
        "false" => Some(Value::Boolean(false)),
        _ => None,
    }
}

fn core_keyword(text: &str) -> Option<TokenName> {
    let name = match text {
        "abstract" => TokenName::Abstract,
        "as" => TokenName::As,
        "break" => TokenName::Break,
        "catch" => TokenName::Catch,
        "const" => TokenName::Const,
        "def" | "fn" => TokenName::Method,
        "do" => TokenName::Do,
        "emit" => TokenName::Emit,
        "eprint" => TokenName::EPrint,
        "eprintln" => TokenName::EPrintLn,
        "eval" => TokenName::Eval,
        "exit" => TokenName::Exit,
        "export" => TokenName::Export,
        "finally" => TokenName::Finally,
        "for" => TokenName::For,
        "import" => TokenName::Import,
        "in" => TokenName::In,
        "include" => TokenName::Include,
        "interface" => TokenName::Interface,
        "next" => TokenName::Next,
        "off" => TokenName::Off,
        "on" => TokenName::On,
        "once" => TokenName::Once,
        "override" => TokenName::Override,
        "package" => TokenName::Package,
        "pass" => TokenName::Pass,
        "print" => TokenName::Print,
        "println" => TokenName::PrintLn,
        "printxy" => TokenName::PrintXy,
        "private" => TokenName::Private,
        "repeat" => TokenName::Repeat,
        "return" => TokenName::Return,
        "static" => TokenName::Static,
        "struct" => TokenName::Struct,
        "throw" => TokenName::Throw,
        "to" => TokenName::To,
        "try" => TokenName::Try,
        "var" => TokenName::Var,
        "when" => TokenName::When,
        "while" => TokenName::While,
        _ => return None,
    };
    Some(name)
}

/// Type names are accepted all lowercase or capitalized, nothing else.
fn type_name(text: &str) -> Option<TokenName> {
    let name = match text {
        "any" | "Any" => TokenName::TypeAny,
        "boolean" | "Boolean" => TokenName::TypeBoolean,
        "bytes" | "Bytes" => TokenName::TypeBytes,
        "date" | "Date" => TokenName::TypeDate,
        "float" | "Float" => TokenName::TypeFloat,
        "hashmap" | "Hashmap" => TokenName::TypeHashmap,
        "integer" | "Integer" => TokenName::TypeInteger,
        "lambda" | "Lambda" => TokenName::TypeLambda,
        "list" | "List" => TokenName::TypeList,
        "none" | "None" => TokenName::TypeNone,
        "object" | "Object" => TokenName::TypeObject,
        "pointer" | "Pointer" => TokenName::TypePointer,
        "string" | "String" => TokenName::TypeString,
        _ => return None,
    };
    Some(name)
}
