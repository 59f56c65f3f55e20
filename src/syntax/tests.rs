//! Unit tests for the syntax module.
//!
//! This module contains tests for phrase validation including:
//! - Class tag strings before and after reduction
//! - Every recognised statement shape
//! - Index expressions and member access
//! - Invalid phrases and their diagnostics

use std::rc::Rc;

use crate::{errors::diagnostics::Diagnostics, lexer::lexer::tokenize};

use super::{
    classes::{ClassString, ClassTag},
    validator::{is_expression, recognize, validate, Shape, Validator},
};

fn check(source: &str) -> (bool, Diagnostics) {
    let mut diagnostics = Diagnostics::new();
    let phrases = tokenize(Rc::new("test".to_string()), [source], &mut diagnostics);
    let valid = validate(&phrases[0], &mut diagnostics);
    (valid, diagnostics)
}

fn is_valid(source: &str) -> bool {
    check(source).0
}

fn reduced(source: &str) -> (String, String) {
    let mut diagnostics = Diagnostics::new();
    let phrases = tokenize(Rc::new("test".to_string()), [source], &mut diagnostics);
    let mut validator = Validator::new(&mut diagnostics);
    let mut class_string = validator.classes(&phrases[0]);
    let raw = class_string.to_string();
    validator.reduce(&phrases[0], &mut class_string);
    (raw, class_string.to_string())
}

fn shape(source: &str) -> Option<Shape> {
    let mut diagnostics = Diagnostics::new();
    let phrases = tokenize(Rc::new("test".to_string()), [source], &mut diagnostics);
    let mut validator = Validator::new(&mut diagnostics);
    let mut class_string = validator.classes(&phrases[0]);
    validator.reduce(&phrases[0], &mut class_string);
    recognize(class_string.tags())
}

#[test]
fn test_class_string_display() {
    let class_string = ClassString(vec![ClassTag::Var, ClassTag::Id, ClassTag::Ass, ClassTag::Num]);
    assert_eq!(class_string.to_string(), "VAR-ID-ASS-NUM-");
    assert_eq!(ClassString::default().to_string(), "");
}

#[test]
fn test_operators_are_masked() {
    let (raw, _) = reduced("a b + c - d <- e >> ~");
    assert_eq!(raw, "ID-ID-OP-ID-OP-ID-OP-ID-OP-OP-");
}

#[test]
fn test_raised_sigils_share_tags() {
    let (raw, _) = reduced("$$ x @@ f");
    assert_eq!(raw, "VAR-ID-FNC-ID-");
}

#[test]
fn test_variable_declaration_with_assignment() {
    let (raw, reduced) = reduced("$ x = 5");
    assert_eq!(raw, "VAR-ID-ASS-NUM-");
    assert_eq!(reduced, "VAR-ID-ASS-NUM-");
    assert_eq!(shape("$ x = 5"), Some(Shape::DeclarationAssignment));
    assert!(is_valid("$ x = 5"));
}

#[test]
fn test_member_access_collapses() {
    let (raw, reduced) = reduced("$ x = a.b.c");
    assert_eq!(raw, "VAR-ID-ASS-ID-DOT-ID-DOT-ID-");
    assert_eq!(reduced, "VAR-ID-ASS-ID-");
}

#[test]
fn test_index_collapses() {
    let (_, reduced) = reduced("$ x = a[i 1 +].b");
    assert_eq!(reduced, "VAR-ID-ASS-ID-");
    assert!(is_valid("$ x = a[i 1 +].b"));
}

#[test]
fn test_nested_index_collapses() {
    let (_, reduced) = reduced("x = a[b[0]]");
    assert_eq!(reduced, "ID-ASS-ID-");
    assert!(is_valid("x = a[b[0]]"));
}

#[test]
fn test_invalid_index_fails_phrase() {
    let (valid, diagnostics) = check("$ x = a[+ 1]");

    assert!(!valid);
    assert_eq!(diagnostics.error_count(), 1);
    assert_eq!(diagnostics.entries()[0].get_error_name(), "InvalidIndex");
}

#[test]
fn test_every_invalid_index_is_reported() {
    let (valid, diagnostics) = check("$ x = a[+ 1] b[$ y]");

    assert!(!valid);
    assert_eq!(diagnostics.error_count(), 2);
}

#[test]
fn test_unbalanced_index_is_invalid_syntax() {
    let (valid, diagnostics) = check("x = a[1");

    assert!(!valid);
    assert_eq!(diagnostics.entries()[0].get_error_name(), "InvalidSyntax");
}

#[test]
fn test_empty_statement() {
    assert_eq!(shape("()"), Some(Shape::Empty));
    assert_eq!(recognize(&[]), Some(Shape::Empty));
}

#[test]
fn test_label_declaration() {
    assert_eq!(shape("\\ loop"), Some(Shape::Label));
    assert_eq!(shape("\\ loop x = 5"), Some(Shape::LabelledStatement));
    assert_eq!(shape("\\ loop \\ inner"), Some(Shape::LabelledStatement));
    assert!(!is_valid("\\ loop = 5"));
}

#[test]
fn test_with_block() {
    assert_eq!(shape("{ screen }"), Some(Shape::With));
    assert_eq!(shape("{ screen.buffer.front }"), Some(Shape::With));
    assert!(!is_valid("{ screen"));
    assert!(!is_valid("{ 5 }"));
}

#[test]
fn test_jump() {
    assert_eq!(shape("loop"), Some(Shape::Jump));
    assert_eq!(shape("state.next"), Some(Shape::Jump));
}

#[test]
fn test_variable_declarations() {
    assert_eq!(shape("$ x"), Some(Shape::Declaration));
    assert_eq!(shape("$$ x : y"), Some(Shape::DeclarationAssignment));
    assert_eq!(shape("$ s = 'text'"), Some(Shape::DeclarationAssignment));
    assert_eq!(shape("$ x ="), Some(Shape::DeclarationAssignment));
    assert_eq!(shape("$$ x :"), Some(Shape::DeclarationAssignment));
    assert!(!is_valid("$ x = + 1"));
    assert!(!is_valid("$ 5"));
}

#[test]
fn test_function_declarations() {
    assert_eq!(shape("@ main"), Some(Shape::FunctionDeclaration));
    assert_eq!(shape("() @ tick"), Some(Shape::FunctionDeclaration));
    assert_eq!(shape("[] @ printf"), Some(Shape::FunctionDeclaration));
    assert_eq!(shape("[] $ format @ printf"), Some(Shape::FunctionDeclaration));
    assert_eq!(shape("$ a $ b @@ add"), Some(Shape::FunctionDeclaration));
    assert!(!is_valid("$ a 5 @ add"));
    assert!(!is_valid("$ a () @ add"));
}

#[test]
fn test_function_parameter_class_string() {
    let (raw, _) = reduced("$ a $ b @ add");
    assert_eq!(raw, "VAR-ID-VAR-ID-FNC-ID-");
}

#[test]
fn test_address_assignment() {
    assert_eq!(shape("_ FF00 = 1"), Some(Shape::AddressAssignment));
    assert_eq!(shape("_ 10 : value"), Some(Shape::AddressAssignment));
    assert_eq!(shape("_ FF00 ="), Some(Shape::AddressAssignment));
    assert!(!is_valid("_ FF00 = - 1"));
}

#[test]
fn test_reassignment() {
    assert_eq!(shape("x = y 1 +"), Some(Shape::Reassignment));
    assert_eq!(shape("point.x : origin.x"), Some(Shape::Reassignment));
    assert_eq!(shape("x = _ 1F"), Some(Shape::Reassignment));
}

#[test]
fn test_shorthand_reassignment() {
    assert_eq!(shape("x ="), Some(Shape::Reassignment));
    assert_eq!(shape("x :"), Some(Shape::Reassignment));
    assert_eq!(shape("point.x :"), Some(Shape::Reassignment));
    assert!(is_valid("x ="));
    assert!(!is_valid("x = ~"));
}

#[test]
fn test_comparisons() {
    assert_eq!(shape("x ? y"), Some(Shape::Comparison));
    assert_eq!(shape("x y ?<"), Some(Shape::Comparison));
    assert_eq!(shape("a.b ?: c[0]"), Some(Shape::Comparison));
    assert!(!is_valid("x ? + y"));
    assert!(!is_valid("+ x ? y"));
    assert!(!is_valid("x ? y < z"));
}

#[test]
fn test_comparison_sides_may_be_empty() {
    assert_eq!(shape("x ?"), Some(Shape::Comparison));
    assert_eq!(shape("? y"), Some(Shape::Comparison));
    assert_eq!(shape("?>"), Some(Shape::Comparison));
    assert!(is_valid("?: y 1 +"));
}

#[test]
fn test_operator_leading_comparison_reports_source() {
    let (valid, diagnostics) = check("x ? + y");

    assert!(!valid);
    assert_eq!(diagnostics.error_count(), 1);
    let error = &diagnostics.entries()[0];
    assert_eq!(error.get_error_name(), "InvalidSyntax");
    assert!(error.to_string().contains("x ? + y"));
    assert_eq!(error.get_tip().to_string(), "No statement has the shape `ID-EQ-OP-ID-`");
    assert_eq!(error.get_position().line, 1);
}

#[test]
fn test_function_call() {
    assert_eq!(shape("a b add"), Some(Shape::FunctionCall));
    assert_eq!(shape("'hello' console.print"), Some(Shape::FunctionCall));
    assert_eq!(shape("() reset"), Some(Shape::FunctionCall));
}

#[test]
fn test_operator_expression() {
    assert_eq!(shape("n 1 +"), Some(Shape::OperatorExpression));
    assert_eq!(shape("flags ~"), Some(Shape::OperatorExpression));
    assert!(!is_valid("+ n"));
}

#[test]
fn test_count_is_warned_and_skipped() {
    let (valid, diagnostics) = check("items !");

    assert!(valid);
    assert_eq!(diagnostics.warning_count(), 1);
    assert!(!diagnostics.has_errors());
    assert_eq!(diagnostics.entries()[0].get_error_name(), "UnknownSymbol");
}

#[test]
fn test_negation_group_has_no_shape() {
    assert!(!is_valid("$ x = (y)"));
}

#[test]
fn test_is_expression() {
    use ClassTag::*;

    assert!(is_expression(&[]));
    assert!(is_expression(&[Id, Num, Op]));
    assert!(is_expression(&[Adr, Hex, Str, Nul]));
    assert!(is_expression(&[Hex]));
    assert!(!is_expression(&[Op, Id]));
    assert!(!is_expression(&[Adr, Id]));
    assert!(!is_expression(&[Id, Var]));
    assert!(!is_expression(&[Bin]));
}
