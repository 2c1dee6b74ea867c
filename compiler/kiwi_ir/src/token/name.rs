//! Fine-grained token identities.

use kiwi_value::ops::BinaryOperator;

use crate::BuiltinTable;

/// What a keyword, operator, type name or builtin token specifically is.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TokenName {
    /// The token's category is all there is to know.
    Default,

    // Keywords
    Abstract,
    As,
    Break,
    Catch,
    Const,
    Do,
    EPrint,
    EPrintLn,
    Emit,
    Eval,
    Exit,
    Export,
    Finally,
    For,
    Import,
    In,
    Include,
    Interface,
    /// `def` or `fn`
    Method,
    Next,
    Off,
    On,
    Once,
    Override,
    Package,
    Pass,
    Print,
    PrintLn,
    PrintXy,
    Private,
    Repeat,
    Return,
    Static,
    Struct,
    /// `@`
    This,
    Throw,
    To,
    Try,
    Var,
    When,
    While,
    /// `with`
    With,

    // Conditionals
    If,
    Elsif,
    Else,
    End,
    Case,

    // Type names
    TypeAny,
    TypeBoolean,
    TypeBytes,
    TypeDate,
    TypeFloat,
    TypeHashmap,
    TypeInteger,
    TypeLambda,
    TypeList,
    TypeNone,
    TypeObject,
    TypePointer,
    TypeString,

    // Operators
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulus,
    Exponent,
    Assign,
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    And,
    Or,
    Not,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseNot,
    LeftShift,
    RightShift,
    UnsignedRightShift,
    AddAssign,
    SubtractAssign,
    MultiplyAssign,
    DivideAssign,
    ModulusAssign,
    ExponentAssign,
    AndAssign,
    OrAssign,
    BitwiseAndAssign,
    BitwiseOrAssign,
    BitwiseXorAssign,
    LeftShiftAssign,
    RightShiftAssign,
    UnsignedRightShiftAssign,
    NullCoalesce,
    /// `=<`, the pack-assignment operator.
    Unpack,
    /// `?`, the ternary operator.
    Question,

    // Builtins
    BuiltinFunction(BuiltinTable),
    BuiltinMethod(BuiltinTable),
}

/// Every operator spelling the lexer recognizes.
const OPERATORS: &[(&str, TokenName)] = &[
    ("!", TokenName::Not),
    ("+", TokenName::Add),
    ("-", TokenName::Subtract),
    ("*", TokenName::Multiply),
    ("/", TokenName::Divide),
    ("%", TokenName::Modulus),
    ("=", TokenName::Assign),
    ("<", TokenName::LessThan),
    (">", TokenName::GreaterThan),
    ("|", TokenName::BitwiseOr),
    ("&", TokenName::BitwiseAnd),
    ("^", TokenName::BitwiseXor),
    ("~", TokenName::BitwiseNot),
    ("?", TokenName::Question),
    ("!=", TokenName::NotEqual),
    ("+=", TokenName::AddAssign),
    ("-=", TokenName::SubtractAssign),
    ("*=", TokenName::MultiplyAssign),
    ("/=", TokenName::DivideAssign),
    ("%=", TokenName::ModulusAssign),
    ("==", TokenName::Equal),
    ("<=", TokenName::LessThanOrEqual),
    (">=", TokenName::GreaterThanOrEqual),
    ("||", TokenName::Or),
    ("&=", TokenName::BitwiseAndAssign),
    ("|=", TokenName::BitwiseOrAssign),
    ("^=", TokenName::BitwiseXorAssign),
    ("&&", TokenName::And),
    ("<<", TokenName::LeftShift),
    (">>", TokenName::RightShift),
    ("**", TokenName::Exponent),
    ("??", TokenName::NullCoalesce),
    ("=<", TokenName::Unpack),
    ("**=", TokenName::ExponentAssign),
    ("<<=", TokenName::LeftShiftAssign),
    (">>=", TokenName::RightShiftAssign),
    (">>>", TokenName::UnsignedRightShift),
    ("||=", TokenName::OrAssign),
    ("&&=", TokenName::AndAssign),
    (">>>=", TokenName::UnsignedRightShiftAssign),
];

impl TokenName {
    /// The operator spelled `symbol`, if any.
    pub fn from_operator(symbol: &str) -> Option<TokenName> {
        OPERATORS
            .iter()
            .find(|(spelling, _)| *spelling == symbol)
            .map(|&(_, name)| name)
    }

    /// How this operator is spelled.
    pub fn operator_symbol(self) -> Option<&'static str> {
        OPERATORS
            .iter()
            .find(|(_, name)| *name == self)
            .map(|&(spelling, _)| spelling)
    }

    /// `=` and every compound assignment.
    pub fn is_assignment(self) -> bool {
        self == TokenName::Assign || self.assignment_base().is_some()
    }

    /// The operator a compound assignment applies: `+=` gives `+`.
    pub fn assignment_base(self) -> Option<TokenName> {
        let base = match self {
            TokenName::AddAssign => TokenName::Add,
            TokenName::SubtractAssign => TokenName::Subtract,
            TokenName::MultiplyAssign => TokenName::Multiply,
            TokenName::DivideAssign => TokenName::Divide,
            TokenName::ModulusAssign => TokenName::Modulus,
            TokenName::ExponentAssign => TokenName::Exponent,
            TokenName::AndAssign => TokenName::And,
            TokenName::OrAssign => TokenName::Or,
            TokenName::BitwiseAndAssign => TokenName::BitwiseAnd,
            TokenName::BitwiseOrAssign => TokenName::BitwiseOr,
            TokenName::BitwiseXorAssign => TokenName::BitwiseXor,
            TokenName::LeftShiftAssign => TokenName::LeftShift,
            TokenName::RightShiftAssign => TokenName::RightShift,
            TokenName::UnsignedRightShiftAssign => TokenName::UnsignedRightShift,
            _ => return None,
        };
        Some(base)
    }

    /// The value-level operator this binary operator token evaluates to.
    pub fn binary_operator(self) -> Option<BinaryOperator> {
        let op = match self {
            TokenName::Add => BinaryOperator::Add,
            TokenName::Subtract => BinaryOperator::Subtract,
            TokenName::Multiply => BinaryOperator::Multiply,
            TokenName::Divide => BinaryOperator::Divide,
            TokenName::Modulus => BinaryOperator::Modulus,
            TokenName::Exponent => BinaryOperator::Exponent,
            TokenName::BitwiseAnd => BinaryOperator::BitwiseAnd,
            TokenName::BitwiseOr => BinaryOperator::BitwiseOr,
            TokenName::BitwiseXor => BinaryOperator::BitwiseXor,
            TokenName::LeftShift => BinaryOperator::LeftShift,
            TokenName::RightShift => BinaryOperator::RightShift,
            TokenName::UnsignedRightShift => BinaryOperator::UnsignedRightShift,
            TokenName::Equal => BinaryOperator::Equal,
            TokenName::NotEqual => BinaryOperator::NotEqual,
            TokenName::LessThan => BinaryOperator::LessThan,
            TokenName::LessThanOrEqual => BinaryOperator::LessThanOrEqual,
            TokenName::GreaterThan => BinaryOperator::GreaterThan,
            TokenName::GreaterThanOrEqual => BinaryOperator::GreaterThanOrEqual,
            TokenName::And => BinaryOperator::And,
            TokenName::Or => BinaryOperator::Or,
            TokenName::NullCoalesce => BinaryOperator::NullCoalesce,
            _ => return None,
        };
        Some(op)
    }

    /// Operators a struct may overload with `fn <op>(...)`.
    pub fn is_overloadable(self) -> bool {
        self.binary_operator().is_some()
            && !matches!(self, TokenName::And | TokenName::Or | TokenName::NullCoalesce)
    }

    /// The builtin table a builtin function or method name belongs to.
    pub fn builtin_table(self) -> Option<BuiltinTable> {
        match self {
            TokenName::BuiltinFunction(table) | TokenName::BuiltinMethod(table) => Some(table),
            _ => None,
        }
    }
}
