use kiwi_diagnostic::ErrorKind;
use kiwi_ir::{MethodFlags, Node, NodeKind, TokenName, TypeId};
use kiwi_types::TypeRegistry;
use kiwi_value::Value;
use pretty_assertions::assert_eq;

use super::{lex, parse_source, parse_with, single, statements};
use crate::ParserOptions;

fn identifier(node: &Node) -> &str {
    match &node.kind {
        NodeKind::Identifier(name) => name,
        other => panic!("expected an identifier, got {other:?}"),
    }
}

/// The expression a `print` statement prints.
fn printed(node: &Node) -> &Node {
    match &node.kind {
        NodeKind::Print { expression, .. } => expression,
        other => panic!("expected a print, got {other:?}"),
    }
}

#[test]
fn var_block_declares_each_entry() {
    let types = TypeRegistry::shared();
    let integer = types.get_type("integer");
    let (output, _) = parse_with(
        types,
        ParserOptions::default(),
        vec![lex(0, "var (a, b: integer = 2, c)")],
    );
    assert!(!output.had_error);
    let NodeKind::Variable(entries) = &output.program.statements()[0].kind else {
        panic!("expected a var block");
    };

    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["_1$_a", "_2$_b", "_3$_c"]);
    assert_eq!(entries[0].type_hint, TypeId::ANY);
    assert_eq!(entries[1].type_hint, integer);
    assert!(entries[0].default.is_none());
    assert_eq!(
        entries[1].default.as_ref().map(|d| &d.kind),
        Some(&NodeKind::Literal(Value::Integer(2)))
    );
    assert!(entries[2].default.is_none());
}

#[test]
fn later_uses_see_the_mangled_name() {
    let body = statements("var x = 1\nx += 2\nprintln x");
    let NodeKind::Assignment { name, op, .. } = &body[1].kind else {
        panic!("expected an assignment");
    };
    assert_eq!(name, "_1$_x");
    assert_eq!(*op, TokenName::AddAssign);
    assert_eq!(identifier(printed(&body[2])), "_1$_x");
}

#[test]
fn defaults_see_the_outer_binding() {
    let body = statements("var f = with (x) do return x * 2 end");
    let NodeKind::Variable(entries) = &body[0].kind else {
        panic!("expected a var");
    };
    // The lambda parameter is minted before `f` itself.
    assert_eq!(entries[0].name, "_2$_f");
    let Some(NodeKind::Lambda(lambda)) = entries[0].default.as_ref().map(|d| &d.kind) else {
        panic!("expected a lambda default");
    };
    assert_eq!(lambda.parameters[0].name, "_1$_x");
}

#[test]
fn duplicate_declaration_in_one_scope_is_an_error() {
    let (output, queue) = parse_source("var x = 1\nvar x = 2");
    assert!(output.had_error);
    assert_eq!(queue.errors()[0].kind, ErrorKind::Syntax);
    assert_eq!(queue.errors()[0].token.text, "x");
    assert_eq!(output.program.statements().len(), 1);
}

#[test]
fn function_parameters_shadow_and_are_dropped() {
    let body = statements("var x = 1\nfn f(x, y: integer = 3)\n  return x\nend\nprintln x");
    let NodeKind::Function(function) = &body[1].kind else {
        panic!("expected a function");
    };
    assert_eq!(function.name, "f");
    assert_eq!(function.parameters[0].name, "_2$_x");
    assert!(function.parameters[1].default.is_some());
    let NodeKind::Return { value, .. } = &function.body[0].kind else {
        panic!("expected a return");
    };
    assert_eq!(identifier(value.as_deref().unwrap()), "_2$_x");
    assert_eq!(identifier(printed(&body[2])), "_1$_x");
}

#[test]
fn for_iterators_are_forgotten_after_the_loop() {
    let body = statements("for v, i in [1, 2, 3] do\n  println v\nend\nprintln v");
    let NodeKind::ForLoop {
        value_iterator,
        index_iterator,
        body: loop_body,
        ..
    } = &body[0].kind
    else {
        panic!("expected a for loop");
    };
    assert_eq!(value_iterator, "_1$_v");
    assert_eq!(index_iterator.as_deref(), Some("_2$_i"));
    assert_eq!(identifier(printed(&loop_body[0])), "_1$_v");
    assert_eq!(identifier(printed(&body[1])), "v");

    // The same names can be bound again by the next loop.
    statements("for v in a do end\nfor v in b do end");
}

#[test]
fn if_elsif_else_chain() {
    let node = single("if a\n  println 1\nelsif b\n  println 2\nelsif c\nelse\n  println 3\nend");
    let NodeKind::If(statement) = node.kind else {
        panic!("expected an if");
    };
    assert_eq!(statement.branch.body.len(), 1);
    assert_eq!(statement.elsif.len(), 2);
    assert!(statement.elsif[1].body.is_empty());
    assert_eq!(statement.else_body.len(), 1);
}

#[test]
fn elsif_after_else_is_rejected() {
    let (output, _) = parse_source("if a\nelse\nelsif b\nend");
    assert!(output.had_error);
}

#[test]
fn case_alias_is_scoped_to_the_case() {
    let body = statements("case 5 as n\n  when n > 1\n    println n\n  else\n    println 0\nend\nprintln n");
    let NodeKind::Case(case) = &body[0].kind else {
        panic!("expected a case");
    };
    assert_eq!(case.alias.as_deref(), Some("_1$_n"));
    assert_eq!(case.whens.len(), 1);
    assert_eq!(identifier(printed(&case.whens[0].body[0])), "_1$_n");
    assert_eq!(case.else_body.len(), 1);
    assert_eq!(identifier(printed(&body[1])), "n");
}

#[test]
fn try_catch_finally_binds_type_and_message() {
    let node = single("try\n  throw \"bad\"\ncatch (t, m)\n  println m\nfinally\n  println 1\nend");
    let NodeKind::Try(statement) = node.kind else {
        panic!("expected a try");
    };
    assert_eq!(statement.body.len(), 1);
    assert_eq!(statement.error_type.as_deref(), Some("_1$_t"));
    assert_eq!(statement.error_message.as_deref(), Some("_2$_m"));
    assert_eq!(identifier(printed(&statement.catch_body[0])), "_2$_m");
    assert_eq!(statement.finally_body.len(), 1);

    let NodeKind::Try(statement) = single("try\ncatch (e)\nend").kind else {
        panic!("expected a try");
    };
    assert_eq!(statement.error_type, None);
    assert!(statement.error_message.is_some());
}

#[test]
fn pack_assignment_stops_at_the_left_arity() {
    let body = statements("var (a, b)\na, b =< 1, 2");
    let NodeKind::PackAssignment { left, right } = &body[1].kind else {
        panic!("expected a pack assignment");
    };
    let names: Vec<&str> = left.iter().map(identifier).collect();
    assert_eq!(names, ["_1$_a", "_2$_b"]);
    assert_eq!(right.len(), 2);

    let NodeKind::PackAssignment { right, .. } = single("x, y, z =< pair()").kind else {
        panic!("expected a pack assignment");
    };
    assert_eq!(right.len(), 1);
}

#[test]
fn index_and_member_assignments() {
    assert!(matches!(single("xs[0] = 5").kind, NodeKind::IndexAssignment { .. }));
    assert!(matches!(single("xs[1:2] = [9]").kind, NodeKind::IndexAssignment { .. }));

    let NodeKind::MemberAssignment { object, member, .. } = single("@name = 1").kind else {
        panic!("expected a member assignment");
    };
    assert_eq!(member, "name");
    assert_eq!(object.kind, NodeKind::SelfRef(String::new()));

    let (output, queue) = parse_source("f() = 1");
    assert!(output.had_error);
    assert!(queue.errors()[0].message.contains("function call"));
}

#[test]
fn statements_take_values_only_from_their_own_line() {
    let node = single("fn f()\n  return\nend");
    let NodeKind::Function(function) = node.kind else {
        panic!("expected a function");
    };
    assert!(matches!(
        function.body[0].kind,
        NodeKind::Return {
            value: None,
            condition: None
        }
    ));

    let body = statements("println\nx");
    assert_eq!(printed(&body[0]).kind, NodeKind::Literal(Value::string("")));
    assert_eq!(body.len(), 2);
}

#[test]
fn guards_attach_to_exits_and_loops() {
    let NodeKind::Return { value, condition } = single("return 1 when x").kind else {
        panic!("expected a return");
    };
    assert!(value.is_some() && condition.is_some());

    let NodeKind::Break { condition } = single("break when done").kind else {
        panic!("expected a break");
    };
    assert!(condition.is_some());

    let NodeKind::Do { condition, body } = single("do\n  println 1\nend when ready").kind else {
        panic!("expected a do block");
    };
    assert_eq!(body.len(), 1);
    assert!(condition.is_some());
}

#[test]
fn print_variants() {
    let NodeKind::Print { newline, stderr, .. } = single("eprintln \"x\"").kind else {
        panic!("expected a print");
    };
    assert!(newline && stderr);

    assert!(matches!(single("printxy \"*\", 1, 2").kind, NodeKind::PrintXy { .. }));
    assert!(matches!(single("printxy(\"*\", 1, 2)").kind, NodeKind::PrintXy { .. }));

    let (output, queue) = parse_source("printxy \"*\", 1");
    assert!(output.had_error);
    assert!(queue.errors()[0].message.contains("got 2"));
}

#[test]
fn event_handlers_take_three_callback_forms() {
    let body = statements(
        "on \"a\" with (x) do println x end\nonce \"b\" (handler)\non \"c\" do\n  println 1\nend",
    );
    let NodeKind::On { callback, .. } = &body[0].kind else {
        panic!("expected on");
    };
    let NodeKind::Lambda(lambda) = &callback.kind else {
        panic!("expected a lambda callback");
    };
    assert_eq!(lambda.parameters.len(), 1);

    let NodeKind::Once { callback, .. } = &body[1].kind else {
        panic!("expected once");
    };
    assert_eq!(identifier(callback), "handler");

    let NodeKind::On { callback, .. } = &body[2].kind else {
        panic!("expected on");
    };
    assert!(matches!(&callback.kind, NodeKind::Lambda(l) if l.parameters.is_empty() && l.body.len() == 1));

    assert!(matches!(single("off \"a\"").kind, NodeKind::Off { callback: None, .. }));
    let NodeKind::Emit { arguments, .. } = single("emit \"a\" (1, 2)").kind else {
        panic!("expected emit");
    };
    assert_eq!(arguments.len(), 2);
}

#[test]
fn loops() {
    let NodeKind::RepeatLoop { alias, body, .. } = single("repeat 3 as i do\n  println i\nend").kind else {
        panic!("expected repeat");
    };
    assert_eq!(alias.as_deref(), Some("_1$_i"));
    assert_eq!(identifier(printed(&body[0])), "_1$_i");

    assert!(matches!(single("while x < 3 do\n  x += 1\nend").kind, NodeKind::WhileLoop { .. }));
}

#[test]
fn struct_declaration() {
    let node = single(
        "struct Dog < Animal : Speaker, Walker\n  fn speak()\n    println \"woof\"\n  end\n  static private fn make() return 1 end\n  fn +(other)\n    return other\n  end\nend",
    );
    let NodeKind::Struct(decl) = node.kind else {
        panic!("expected a struct");
    };
    assert_eq!(decl.name, "Dog");
    assert_eq!(decl.base.as_deref(), Some("Animal"));
    assert_eq!(decl.interfaces, ["Speaker", "Walker"]);
    assert_eq!(decl.methods.len(), 3);

    let NodeKind::Function(make) = &decl.methods[1].kind else {
        panic!("expected a method");
    };
    assert_eq!(make.flags, MethodFlags::STATIC | MethodFlags::PRIVATE);

    let NodeKind::Function(plus) = &decl.methods[2].kind else {
        panic!("expected an operator method");
    };
    assert!(plus.is_operator);
    assert_eq!(plus.name, "+");
}

#[test]
fn structs_hold_only_methods() {
    let (output, _) = parse_source("struct A\n  var x = 1\nend");
    assert!(output.had_error);
}

#[test]
fn operator_overloads_need_a_struct() {
    let (output, queue) = parse_source("fn +(other)\nend");
    assert!(output.had_error);
    assert!(queue.errors()[0].message.contains("outside a struct"));

    let (output, _) = parse_source("struct A\n  fn &&(other)\n  end\nend");
    assert!(output.had_error);
}

#[test]
fn interface_methods_are_abstract() {
    let node = single("interface Shape\n  fn area()\n  fn name(): string\nend");
    let NodeKind::Interface { name, methods } = node.kind else {
        panic!("expected an interface");
    };
    assert_eq!(name, "Shape");
    assert_eq!(methods.len(), 2);
    let NodeKind::Function(area) = &methods[0].kind else {
        panic!("expected a method");
    };
    assert!(area.flags.contains(MethodFlags::ABSTRACT));
    assert!(area.body.is_empty());
}

#[test]
fn module_statements() {
    let NodeKind::Import { name } = single("import math").kind else {
        panic!("expected import");
    };
    assert_eq!(name.kind, NodeKind::Literal(Value::string("math")));

    assert!(matches!(single("include \"lib.kiwi\"").kind, NodeKind::Include { .. }));
    assert!(matches!(single("export \"x\"").kind, NodeKind::Export { .. }));
    assert!(matches!(single("eval \"1 + 1\"").kind, NodeKind::Eval { .. }));
    assert!(matches!(single("const LIMIT = 10").kind, NodeKind::ConstAssignment { .. }));
    assert_eq!(single("pass").kind, NodeKind::NoOp);
}

#[test]
fn comments_are_invisible() {
    let body = statements("# leading\nprintln 1 # trailing\n/# block\ncomment #/\nprintln 2");
    assert_eq!(body.len(), 2);
}
