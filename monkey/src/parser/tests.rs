//! Parser tests for Monkey syntax

use crate::ast::{Expression, Identifier, InfixOp, PrefixOp, Program, Statement};
use crate::lexer::Lexer;
use crate::parser::{Parser, parse};
use pretty_assertions::assert_eq;

/// Parse and expect no errors
fn parse_ok(source: &str) -> Program {
    let (program, errors) = parse(source);
    assert!(
        errors.is_empty(),
        "unexpected parse errors for {source:?}: {errors:?}"
    );
    program
}

/// Parse and return the error messages
fn parse_errors(source: &str) -> Vec<String> {
    let (_, errors) = parse(source);
    errors.into_iter().map(|e| e.message).collect()
}

/// Parse a single expression statement
fn parse_expr(source: &str) -> Expression {
    let program = parse_ok(source);
    assert_eq!(program.statements.len(), 1, "source: {source}");
    match program.statements.into_iter().next() {
        Some(Statement::Expression(expr)) => expr,
        other => panic!("Expected expression statement, got {other:?}"),
    }
}

fn ident(name: &str) -> Expression {
    Expression::Identifier(Identifier::new(name))
}

// ============================================
// Statements
// ============================================

#[test]
fn test_parse_let_statements() {
    let program = parse_ok("let x = 5; let y = true; let foobar = y;");
    let expected = vec![
        ("x", Expression::Integer(5)),
        ("y", Expression::Boolean(true)),
        ("foobar", ident("y")),
    ];
    assert_eq!(program.statements.len(), expected.len());

    for (statement, (name, value)) in program.statements.iter().zip(expected) {
        assert_eq!(statement.token_literal(), "let");
        assert_eq!(
            statement,
            &Statement::Let {
                name: Identifier::new(name),
                value,
            }
        );
    }
}

#[test]
fn test_parse_return_statements() {
    let program = parse_ok("return 5; return 10; return foobar;");
    assert_eq!(program.statements.len(), 3);
    for statement in &program.statements {
        assert!(matches!(statement, Statement::Return { .. }));
        assert_eq!(statement.token_literal(), "return");
    }
}

#[test]
fn test_return_with_unparsable_value_is_kept() {
    let (program, errors) = parse("return ; let a = 2;");
    let messages: Vec<_> = errors.iter().map(|e| e.to_string()).collect();
    assert_eq!(messages, vec!["No prefix parse function for ; found"]);
    assert_eq!(program.statements[0], Statement::Return { value: None });
    assert_eq!(program.to_string(), "return;\nlet a = 2;");
}

#[test]
fn test_semicolons_are_optional() {
    let program = parse_ok("let x = 1\nx\nreturn x");
    assert_eq!(program.statements.len(), 3);
}

#[test]
fn test_parse_empty_program() {
    let program = parse_ok("");
    assert!(program.statements.is_empty());
}

// ============================================
// Literals
// ============================================

#[test]
fn test_parse_identifier() {
    let expr = parse_expr("foobar;");
    assert_eq!(expr, ident("foobar"));
    assert_eq!(expr.token_literal(), "foobar");
}

#[test]
fn test_parse_integer_literal() {
    assert_eq!(parse_expr("5;"), Expression::Integer(5));
    assert_eq!(
        parse_expr("9223372036854775807"),
        Expression::Integer(i64::MAX)
    );
}

#[test]
fn test_parse_boolean_literals() {
    assert_eq!(parse_expr("true;"), Expression::Boolean(true));
    assert_eq!(parse_expr("false;"), Expression::Boolean(false));
}

#[test]
fn test_parse_string_literal() {
    assert_eq!(
        parse_expr(r#""hello world";"#),
        Expression::String("hello world".to_string())
    );
}

#[test]
fn test_parse_array_literal() {
    let expr = parse_expr("[1, 2 * 2, 3 + 3]");
    let Expression::Array(elements) = &expr else {
        panic!("Expected array literal, got {expr:?}");
    };
    assert_eq!(elements.len(), 3);
    assert_eq!(elements[0], Expression::Integer(1));
    assert_eq!(elements[1].to_string(), "(2 * 2)");
    assert_eq!(elements[2].to_string(), "(3 + 3)");

    assert_eq!(parse_expr("[]"), Expression::Array(vec![]));
}

#[test]
fn test_parse_hash_literal_string_keys() {
    let expr = parse_expr(r#"{"one": 1, "two": 2, "three": 3}"#);
    let Expression::Hash(pairs) = expr else {
        panic!("Expected hash literal");
    };
    let rendered: Vec<_> = pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect();
    assert_eq!(rendered, vec!["one=1", "two=2", "three=3"]);
}

#[test]
fn test_parse_empty_hash_literal() {
    assert_eq!(parse_expr("{}"), Expression::Hash(vec![]));
}

#[test]
fn test_parse_hash_literal_with_expressions() {
    let expr = parse_expr(r#"{"one": 0 + 1, "two": 10 - 8, "three": 15 / 5}"#);
    assert_eq!(expr.to_string(), "{ one: (0 + 1), two: (10 - 8), three: (15 / 5) }");
}

#[test]
fn test_parse_hash_literal_mixed_keys() {
    let expr = parse_expr("{1: true, true: 2, x: y}");
    assert_eq!(expr.to_string(), "{ 1: true, true: 2, x: y }");
}

// ============================================
// Operators
// ============================================

#[test]
fn test_parse_prefix_expressions() {
    let cases = [
        ("!5;", PrefixOp::Not, Expression::Integer(5)),
        ("-15;", PrefixOp::Neg, Expression::Integer(15)),
        ("!true;", PrefixOp::Not, Expression::Boolean(true)),
        ("-a", PrefixOp::Neg, ident("a")),
    ];
    for (source, operator, right) in cases {
        assert_eq!(
            parse_expr(source),
            Expression::Prefix {
                operator,
                right: Box::new(right),
            },
            "source: {source}"
        );
    }
}

#[test]
fn test_parse_infix_expressions() {
    let cases = [
        ("5 + 5;", InfixOp::Add),
        ("5 - 5;", InfixOp::Sub),
        ("5 * 5;", InfixOp::Mul),
        ("5 / 5;", InfixOp::Div),
        ("5 > 5;", InfixOp::Gt),
        ("5 < 5;", InfixOp::Lt),
        ("5 == 5;", InfixOp::Eq),
        ("5 != 5;", InfixOp::NotEq),
    ];
    for (source, operator) in cases {
        assert_eq!(
            parse_expr(source),
            Expression::Infix {
                operator,
                left: Box::new(Expression::Integer(5)),
                right: Box::new(Expression::Integer(5)),
            },
            "source: {source}"
        );
    }
}

#[test]
fn test_operator_precedence() {
    let cases = [
        ("-a * b", "((-a) * b)"),
        ("!-a", "(!(-a))"),
        ("a + b + c", "((a + b) + c)"),
        ("a + b - c", "((a + b) - c)"),
        ("a * b * c", "((a * b) * c)"),
        ("a * b / c", "((a * b) / c)"),
        ("a + b / c", "(a + (b / c))"),
        ("a + b * c", "(a + (b * c))"),
        ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
        ("3 + 4; -5 * 5", "(3 + 4)\n((-5) * 5)"),
        ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
        ("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4))"),
        (
            "3 + 4 * 5 == 3 * 1 + 4 * 5",
            "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))",
        ),
        ("true", "true"),
        ("3 > 5 == false", "((3 > 5) == false)"),
        ("3 < 5 == true", "((3 < 5) == true)"),
        ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4)"),
        ("(5 + 5) * 2", "((5 + 5) * 2)"),
        ("2 / (5 + 5)", "(2 / (5 + 5))"),
        ("-(5 + 5)", "(-(5 + 5))"),
        ("!(true == true)", "(!(true == true))"),
        ("a + add(b * c) + d", "((a + add((b * c))) + d)"),
        (
            "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))",
            "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)))",
        ),
        ("add(a + b + c * d / f + g)", "add((((a + b) + ((c * d) / f)) + g))"),
        ("a * [1, 2, 3, 4][b * c] * d", "((a * ([1, 2, 3, 4][(b * c)])) * d)"),
        (
            "add(a * b[2], b[1], 2 * [1, 2][1])",
            "add((a * (b[2])), (b[1]), (2 * ([1, 2][1])))",
        ),
    ];
    for (source, expected) in cases {
        assert_eq!(parse_ok(source).to_string(), expected, "source: {source}");
    }
}

// ============================================
// Compound forms
// ============================================

#[test]
fn test_parse_if_expression() {
    let expr = parse_expr("if (x < y) { x }");
    let Expression::If {
        condition,
        consequence,
        alternative,
    } = &expr
    else {
        panic!("Expected if expression, got {expr:?}");
    };
    assert_eq!(condition.to_string(), "(x < y)");
    assert_eq!(consequence.statements.len(), 1);
    assert!(alternative.is_none());
}

#[test]
fn test_parse_if_else_expression() {
    let expr = parse_expr("if (x < y) { x } else { y }");
    assert_eq!(expr.to_string(), "if (x < y) then x else y");
    let Expression::If { alternative, .. } = expr else {
        panic!("Expected if expression");
    };
    assert_eq!(alternative.map(|b| b.statements.len()), Some(1));
}

#[test]
fn test_parse_function_literal() {
    let expr = parse_expr("fn(x, y) { x + y; }");
    let Expression::Function(func) = &expr else {
        panic!("Expected function literal, got {expr:?}");
    };
    assert_eq!(
        func.parameters,
        vec![Identifier::new("x"), Identifier::new("y")]
    );
    assert_eq!(func.body.statements.len(), 1);
    assert_eq!(func.body.to_string(), "(x + y)");
}

#[test]
fn test_parse_function_parameters() {
    let cases: [(&str, &[&str]); 3] = [
        ("fn() {};", &[]),
        ("fn(x) {};", &["x"]),
        ("fn(x, y, z) {};", &["x", "y", "z"]),
    ];
    for (source, expected) in cases {
        let Expression::Function(func) = parse_expr(source) else {
            panic!("Expected function literal for {source}");
        };
        let names: Vec<_> = func.parameters.iter().map(|p| p.value.as_str()).collect();
        assert_eq!(names, expected);
    }
}

#[test]
fn test_parse_call_expression() {
    let expr = parse_expr("add(1, 2 * 3, 4 + 5);");
    let Expression::Call {
        function,
        arguments,
    } = &expr
    else {
        panic!("Expected call expression, got {expr:?}");
    };
    assert_eq!(**function, ident("add"));
    let rendered: Vec<_> = arguments.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, vec!["1", "(2 * 3)", "(4 + 5)"]);
}

#[test]
fn test_parse_call_on_function_literal() {
    let expr = parse_expr("fn(x) { x; }(5)");
    assert_eq!(expr.to_string(), "fn(x) { x }(5)");
}

#[test]
fn test_parse_index_expression() {
    let expr = parse_expr("myArray[1 + 1]");
    assert_eq!(
        expr,
        Expression::Index {
            left: Box::new(ident("myArray")),
            index: Box::new(Expression::Infix {
                operator: InfixOp::Add,
                left: Box::new(Expression::Integer(1)),
                right: Box::new(Expression::Integer(1)),
            }),
        }
    );
}

#[test]
fn test_program_rendering_snapshot() {
    let program = parse_ok("let add = fn(x, y) { x + y; }; add(1, 2 * 3);");
    insta::assert_snapshot!(program.to_string(), @r"
    let add = fn(x, y) { (x + y) };
    add(1, (2 * 3))
    ");
}

#[test]
fn test_program_renders_statements_on_separate_lines() {
    assert_eq!(parse_ok("let a = 1; a").to_string(), "let a = 1;\na");
}

#[test]
fn test_ast_serializes_to_json() {
    let program = parse_ok("let x = -1;");
    let json = serde_json::to_value(&program).expect("serialize");
    assert_eq!(
        json,
        serde_json::json!({
            "statements": [{
                "Let": {
                    "name": { "value": "x" },
                    "value": { "Prefix": { "operator": "Neg", "right": { "Integer": 1 } } }
                }
            }]
        })
    );
}

// ============================================
// Errors and recovery
// ============================================

#[test]
fn test_let_missing_assign() {
    assert_eq!(
        parse_errors("let x 5;"),
        vec!["Expected next token to be `=`, got `INT` instead"]
    );
}

#[test]
fn test_let_missing_identifier() {
    assert_eq!(
        parse_errors("let = 10;"),
        vec![
            "Expected next token to be `IDENT`, got `=` instead",
            "No prefix parse function for = found",
        ]
    );
}

#[test]
fn test_let_integer_name() {
    assert_eq!(
        parse_errors("let 838383;"),
        vec!["Expected next token to be `IDENT`, got `INT` instead"]
    );
}

#[test]
fn test_integer_overflow() {
    assert_eq!(
        parse_errors("92233720368547758070"),
        vec!["Could not parse 92233720368547758070 as integer"]
    );
}

#[test]
fn test_no_prefix_parse_function() {
    assert_eq!(
        parse_errors(")"),
        vec!["No prefix parse function for ) found"]
    );
    assert_eq!(
        parse_errors("@"),
        vec!["No prefix parse function for ILLEGAL found"]
    );
}

#[test]
fn test_parser_recovers_at_next_statement() {
    let (program, errors) = parse("let x = ; let y = 2;");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "No prefix parse function for ; found");
    assert_eq!(program.to_string(), "let y = 2;");
}

#[test]
fn test_if_requires_parentheses() {
    let errors = parse_errors("if x { 1 }");
    assert_eq!(errors[0], "Expected next token to be `(`, got `IDENT` instead");
}

#[test]
fn test_hash_requires_colon() {
    let errors = parse_errors(r#"{"a" 1}"#);
    assert_eq!(errors[0], "Expected next token to be `:`, got `INT` instead");
}

#[test]
fn test_unclosed_call_reports_eof() {
    let errors = parse_errors("add(1, 2");
    assert_eq!(errors, vec!["Expected next token to be `)`, got `EOF` instead"]);
}

#[test]
fn test_error_span_points_at_offending_token() {
    let (_, errors) = parse("let x 5;");
    assert_eq!(errors[0].span, crate::ast::Span::new(6, 7));
}

#[test]
fn test_parser_struct_exposes_errors() {
    let mut parser = Parser::new(Lexer::new("let = 1; let a = 2;"));
    let program = parser.parse_program();
    assert_eq!(parser.errors().len(), 2);
    assert_eq!(program.statements.len(), 2);
    assert_eq!(program.to_string(), "1\nlet a = 2;");
}
