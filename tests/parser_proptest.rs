//! Property-based tests for the TINY lexer and parser
//!
//! Programs are generated from the grammar together with the outline the
//! parser must produce for them, so every generated case checks the exact
//! tree shape and not only that parsing succeeds.

use proptest::prelude::*;
use tinytree::parser::lexer::Lexer;
use tinytree::parser::token::{Keyword, TokenKind};
use tinytree::parser::{parse, NodeId, NodeLabel, SyntaxTree};

/// Expression in the shape the parser must build
#[derive(Debug, Clone)]
enum Expr {
    Id(String),
    Const(u32),
    Op(char, Box<Expr>, Box<Expr>),
}

/// A generated expression: its source text and its expected tree
#[derive(Debug, Clone)]
struct GenExpr {
    source: String,
    tree: Expr,
}

#[derive(Debug, Clone)]
enum Stmt {
    If(GenExpr, Vec<Stmt>, Option<Vec<Stmt>>),
    Repeat(Vec<Stmt>, GenExpr),
    Assign(String, GenExpr),
    Read(String),
    Write(GenExpr),
}

/// Fold `first (op operand)*` into a left-leaning tree.
fn left_assoc(first: GenExpr, rest: Vec<(char, GenExpr)>) -> GenExpr {
    rest.into_iter().fold(first, |acc, (op, rhs)| GenExpr {
        source: format!("{} {} {}", acc.source, op, rhs.source),
        tree: Expr::Op(op, Box::new(acc.tree), Box::new(rhs.tree)),
    })
}

fn identifier() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,4}".prop_filter("keywords are not identifiers", |s| {
        Keyword::lookup(s).is_none()
    })
}

/// exp -> simple-exp [('<'|'=') simple-exp], over the given factors
fn exp_from(factor: BoxedStrategy<GenExpr>) -> BoxedStrategy<GenExpr> {
    let term = (
        factor.clone(),
        prop::collection::vec((prop_oneof![Just('*'), Just('/')], factor), 0..3),
    )
        .prop_map(|(first, rest)| left_assoc(first, rest))
        .boxed();

    let simple = (
        term.clone(),
        prop::collection::vec((prop_oneof![Just('+'), Just('-')], term), 0..3),
    )
        .prop_map(|(first, rest)| left_assoc(first, rest))
        .boxed();

    (
        simple.clone(),
        prop::option::of((prop_oneof![Just('<'), Just('=')], simple)),
    )
        .prop_map(|(left, comparison)| match comparison {
            Some((op, right)) => left_assoc(left, vec![(op, right)]),
            None => left,
        })
        .boxed()
}

fn expression() -> BoxedStrategy<GenExpr> {
    let leaf = prop_oneof![
        identifier().prop_map(|name| GenExpr {
            source: name.clone(),
            tree: Expr::Id(name),
        }),
        (0u32..1000).prop_map(|n| GenExpr {
            source: n.to_string(),
            tree: Expr::Const(n),
        }),
    ];

    let factor = leaf
        .prop_recursive(3, 24, 4, |inner| {
            // Parentheses group without adding a node
            exp_from(inner).prop_map(|inner| GenExpr {
                source: format!("({})", inner.source),
                tree: inner.tree,
            })
        })
        .boxed();

    exp_from(factor)
}

fn statement() -> impl Strategy<Value = Stmt> {
    let leaf = prop_oneof![
        (identifier(), expression()).prop_map(|(name, exp)| Stmt::Assign(name, exp)),
        identifier().prop_map(Stmt::Read),
        expression().prop_map(Stmt::Write),
    ];

    leaf.prop_recursive(3, 16, 3, |inner| {
        let sequence = prop::collection::vec(inner, 1..3);
        prop_oneof![
            (
                expression(),
                sequence.clone(),
                prop::option::of(sequence.clone())
            )
                .prop_map(|(test, then, otherwise)| Stmt::If(test, then, otherwise)),
            (sequence, expression()).prop_map(|(body, until)| Stmt::Repeat(body, until)),
        ]
    })
}

fn program() -> impl Strategy<Value = Vec<Stmt>> {
    prop::collection::vec(statement(), 1..4)
}

fn render_sequence(stmts: &[Stmt]) -> String {
    stmts.iter().map(render_statement).collect::<Vec<_>>().join(";\n")
}

fn render_statement(stmt: &Stmt) -> String {
    match stmt {
        Stmt::If(test, then, None) => {
            format!("if {} then\n{}\nend", test.source, render_sequence(then))
        }
        Stmt::If(test, then, Some(otherwise)) => format!(
            "if {} then\n{}\nelse\n{}\nend",
            test.source,
            render_sequence(then),
            render_sequence(otherwise)
        ),
        Stmt::Repeat(body, until) => {
            format!("repeat\n{}\nuntil {}", render_sequence(body), until.source)
        }
        Stmt::Assign(name, exp) => format!("{name} := {}", exp.source),
        Stmt::Read(name) => format!("read {name}"),
        Stmt::Write(exp) => format!("write {}", exp.source),
    }
}

fn expected_expr(out: &mut String, expr: &Expr, depth: usize) {
    let indent = "  ".repeat(depth);
    match expr {
        Expr::Id(name) => out.push_str(&format!("{indent}id ({name})\n")),
        Expr::Const(n) => out.push_str(&format!("{indent}const ({n})\n")),
        Expr::Op(op, left, right) => {
            out.push_str(&format!("{indent}op ({op})\n"));
            expected_expr(out, left, depth + 1);
            expected_expr(out, right, depth + 1);
        }
    }
}

fn expected_sequence(out: &mut String, stmts: &[Stmt], depth: usize) {
    for stmt in stmts {
        let indent = "  ".repeat(depth);
        match stmt {
            Stmt::If(test, then, otherwise) => {
                out.push_str(&format!("{indent}if\n"));
                expected_expr(out, &test.tree, depth + 1);
                expected_sequence(out, then, depth + 1);
                if let Some(otherwise) = otherwise {
                    expected_sequence(out, otherwise, depth + 1);
                }
            }
            Stmt::Repeat(body, until) => {
                out.push_str(&format!("{indent}repeat\n"));
                expected_sequence(out, body, depth + 1);
                expected_expr(out, &until.tree, depth + 1);
            }
            Stmt::Assign(name, exp) => {
                out.push_str(&format!("{indent}assign ({name})\n"));
                expected_expr(out, &exp.tree, depth + 1);
            }
            Stmt::Read(name) => out.push_str(&format!("{indent}read ({name})\n")),
            Stmt::Write(exp) => {
                out.push_str(&format!("{indent}write\n"));
                expected_expr(out, &exp.tree, depth + 1);
            }
        }
    }
}

/// Fully parenthesized prefix form of an expected expression
fn grouped(expr: &Expr) -> String {
    match expr {
        Expr::Id(name) => name.clone(),
        Expr::Const(n) => n.to_string(),
        Expr::Op(op, left, right) => format!("({op} {} {})", grouped(left), grouped(right)),
    }
}

/// Fully parenthesized prefix form of a parsed expression subtree
fn grouped_tree(tree: &SyntaxTree, id: NodeId) -> String {
    let node = tree.node(id);
    let value = node.value().unwrap_or_default();
    match node.label() {
        NodeLabel::Op => {
            let operands: Vec<String> = node.children().map(|c| grouped_tree(tree, c)).collect();
            format!("({value} {})", operands.join(" "))
        }
        _ => value.to_string(),
    }
}

fn check_well_formed(tree: &SyntaxTree) -> Result<(), TestCaseError> {
    for id in tree.iter() {
        let node = tree.node(id);
        prop_assert!(!node.is_nil(), "NIL node {} is reachable", id);
        prop_assert!(tree.slot_of(id).is_ok(), "node {} has a stale parent", id);
        for child in node.children() {
            prop_assert_eq!(tree.node(child).parent(), Some(id));
        }
        if let Some(next) = node.next() {
            prop_assert_eq!(tree.node(next).parent(), Some(id));
        }
    }
    Ok(())
}

/// Whitespace or a `{ ... }` comment between two tokens
fn separator() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just(" ".to_string()),
            Just("\t".to_string()),
            Just("\r\n".to_string()),
            Just("\n".to_string()),
            "[^}]{0,12}".prop_map(|text| format!("{{{text}}}")),
        ],
        1..4,
    )
    .prop_map(|parts| parts.concat())
}

const FACTORIAL_TOKENS: &[&str] = &[
    "read", "x", ";", "if", "0", "<", "x", "then", "fact", ":=", "1", ";", "repeat", "fact", ":=",
    "fact", "*", "x", ";", "x", ":=", "x", "-", "1", "until", "x", "=", "0", ";", "write", "fact",
    "end",
];

fn lex_all(source: &str) -> Vec<(TokenKind, String)> {
    Lexer::new(source)
        .tokenize()
        .unwrap()
        .into_iter()
        .map(|t| (t.kind(), t.into_lexeme()))
        .collect()
}

proptest! {
    #[test]
    fn test_programs_parse_to_expected_tree(stmts in program()) {
        let source = render_sequence(&stmts);
        let tree = parse(&source).unwrap();

        check_well_formed(&tree)?;

        let mut expected = String::new();
        expected_sequence(&mut expected, &stmts, 0);
        prop_assert_eq!(tree.outline(), expected);
    }

    #[test]
    fn test_binary_operators_group_left(exp in expression()) {
        let tree = parse(&format!("x := {}", exp.source)).unwrap();
        check_well_formed(&tree)?;

        let value = tree.node(tree.root()).child(0).unwrap();
        prop_assert!(tree.node(value).is_expression());
        prop_assert_eq!(grouped_tree(&tree, value), grouped(&exp.tree));
    }

    #[test]
    fn test_separators_do_not_change_tokens(
        gaps in prop::collection::vec(separator(), FACTORIAL_TOKENS.len() + 1)
    ) {
        let mut source = String::new();
        for (gap, token) in gaps.iter().zip(FACTORIAL_TOKENS) {
            source.push_str(gap);
            source.push_str(token);
        }
        source.push_str(&gaps[FACTORIAL_TOKENS.len()]);

        let plain = FACTORIAL_TOKENS.join(" ");
        prop_assert_eq!(lex_all(&source), lex_all(&plain));

        // End of input is reported once the input runs out, and again after
        let mut lexer = Lexer::new(&source);
        for _ in FACTORIAL_TOKENS {
            prop_assert!(!lexer.next_token().unwrap().is_eof());
        }
        prop_assert!(lexer.next_token().unwrap().is_eof());
        prop_assert!(lexer.next_token().unwrap().is_eof());

        prop_assert_eq!(parse(&source).unwrap().outline(), parse(&plain).unwrap().outline());
    }
}
