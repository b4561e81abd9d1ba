//! Delimiter resolution through the public `resolve` API.

use pretty_assertions::assert_eq;
use string_calculator::{resolve, DelimiterDeclaration};

fn delimiters_of(input: &str) -> Vec<String> {
    resolve(input).delimiters.iter().map(str::to_string).collect()
}

#[test]
fn test_plain_input_keeps_defaults_and_remainder() {
    let resolution = resolve("1,2");
    assert_eq!(resolution.declaration, DelimiterDeclaration::None);
    assert_eq!(resolution.remainder, "1,2");
    assert_eq!(resolution.offset, 0);
    assert_eq!(delimiters_of("1,2"), vec![",", "\n"]);
    assert_eq!(resolution.delimiters.len(), 2);
    assert!(!resolution.delimiters.is_empty());
}

#[test]
fn test_single_declaration_augments_defaults() {
    let resolution = resolve("//;\n1;2");
    assert_eq!(resolution.declaration, DelimiterDeclaration::Single(";".into()));
    assert_eq!(resolution.remainder, "1;2");
    assert_eq!(resolution.offset, 4);
    assert_eq!(delimiters_of("//;\n1;2"), vec![",", "\n", ";"]);
}

#[test]
fn test_bracket_declaration_augments_defaults() {
    let resolution = resolve("//[***][*][%]\n1***2*3%4");
    assert_eq!(
        resolution.declaration,
        DelimiterDeclaration::Bracketed(vec!["***".into(), "*".into(), "%".into()])
    );
    assert_eq!(resolution.remainder, "1***2*3%4");
    assert_eq!(
        delimiters_of("//[***][*][%]\n1***2*3%4"),
        vec![",", "\n", "***", "*", "%"]
    );
}

#[test]
fn test_duplicate_declarations_collapse() {
    assert_eq!(delimiters_of("//[,][;][;]\n1"), vec![",", "\n", ";"]);
    assert_eq!(resolve("//[,][;][;]\n1").delimiters.len(), 3);
}

#[test]
fn test_unterminated_marker_falls_back() {
    let resolution = resolve("//;1;2");
    assert_eq!(resolution.declaration, DelimiterDeclaration::Unterminated);
    assert_eq!(resolution.remainder, "//;1;2");
    assert_eq!(resolution.offset, 0);
    assert_eq!(delimiters_of("//;1;2"), vec![",", "\n"]);
}

#[test]
fn test_only_first_line_is_a_declaration() {
    let resolution = resolve("//;\n1;2\n3");
    assert_eq!(resolution.remainder, "1;2\n3");
}

#[test]
fn test_empty_declaration() {
    let resolution = resolve("//\n1");
    assert_eq!(resolution.declaration, DelimiterDeclaration::Single(String::new()));
    assert_eq!(resolution.remainder, "1");
    assert_eq!(delimiters_of("//\n1"), vec![",", "\n"]);
}
