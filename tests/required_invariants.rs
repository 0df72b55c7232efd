//! Required Property Invariant Tests
//!
//! - A missing keyword compiles to "absent" and always passes
//! - Malformed clauses report exactly one error, in a fixed precedence
//! - Validation states only ever shrink
//! - A satisfied state stays satisfied

use std::fs::File;
use std::path::PathBuf;

use serde_json::json;
use streamschema::schema::{compile, CompileError, CompileOutcome, NodeKind, SchemaLoader};
use streamschema::stream::{
    validate, JsonTokenizer, MatchScope, StreamOptions, StreamValidator, Token, TokenKind,
    TokenSource, ValidationState,
};

// =============================================================================
// Helper Functions
// =============================================================================

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(path)
}

fn parse(name: &str) -> CompileOutcome {
    SchemaLoader::compile_file(&fixture(&format!("parse/{name}"))).unwrap()
}

/// Folds every token of a fixture document into `state`, reading to the end.
fn fold_document(state: ValidationState, name: &str) -> ValidationState {
    let file = File::open(fixture(&format!("required/{name}"))).unwrap();
    let mut tokens = JsonTokenizer::new(file);
    let mut state = state;
    while tokens.next_token().unwrap().is_some() {
        state = validate(state, tokens.current().unwrap());
    }
    state
}

fn point() -> ValidationState {
    ValidationState::new(["latitude", "longitude"])
}

// =============================================================================
// Compile Tests
// =============================================================================

#[test]
fn test_no_required_field_is_absent() {
    let outcome = parse("empty.json");
    assert!(outcome.is_absent());
    assert!(outcome.error().is_none());
    assert!(outcome.constraint().is_none());
}

#[test]
fn test_required_not_an_array() {
    let outcome = parse("not-array.json");
    assert_eq!(
        outcome.error(),
        Some(&CompileError::NotAnArray {
            found: NodeKind::String
        })
    );
    assert_eq!(
        outcome.error().unwrap().to_string(),
        "\"required\" field contains string instead of array"
    );
}

#[test]
fn test_required_with_non_strings() {
    let outcome = parse("not-strings.json");
    assert_eq!(
        outcome.error(),
        Some(&CompileError::NonStringElements {
            kinds: vec![NodeKind::Number, NodeKind::Boolean]
        })
    );
}

#[test]
fn test_required_with_duplicates() {
    let outcome = parse("not-unique.json");
    let err = outcome.error().unwrap();
    assert_eq!(
        err,
        &CompileError::DuplicateNames {
            names: vec!["latitude".to_string()]
        }
    );
    assert!(err.to_string().contains("latitude"));
}

#[test]
fn test_required_order_preserved() {
    let outcome = compile(&json!({ "required": ["longitude", "latitude"] }));
    assert_eq!(
        outcome.constraint().unwrap().names(),
        ["longitude", "latitude"]
    );
}

#[test]
fn test_compiled_schema_validates_fixtures() {
    let outcome = parse("schema.json");
    let seed = ValidationState::seed(&outcome).unwrap();

    assert!(fold_document(seed.clone(), "invalid.json").has_errors());
    assert!(!fold_document(seed, "valid.json").has_errors());
}

#[test]
fn test_compile_is_deterministic() {
    let schema = json!({ "required": ["c", "a", "b", "a", "c"] });
    let first = compile(&schema);
    for _ in 0..100 {
        assert_eq!(compile(&schema), first);
    }
    assert_eq!(
        first.error(),
        Some(&CompileError::DuplicateNames {
            names: vec!["c".to_string(), "a".to_string()]
        })
    );
}

// =============================================================================
// Streaming Tests
// =============================================================================

#[test]
fn test_no_required_properties_no_errors() {
    let state = ValidationState::seed(&parse("empty.json")).unwrap();
    assert!(!fold_document(state.clone(), "invalid.json").has_errors());
    assert!(!state.has_errors());
}

#[test]
fn test_invalid_required_object_properties() {
    let state = fold_document(point(), "invalid.json");
    assert!(state.has_errors());
    assert_eq!(state.not_found_yet(), ["longitude"]);
}

#[test]
fn test_valid_required_object_properties() {
    assert!(!fold_document(point(), "valid.json").has_errors());
}

#[test]
fn test_terminal_state_is_idempotent() {
    let state = fold_document(point(), "valid.json");
    let again = [
        Token::field_name("latitude"),
        Token::new(TokenKind::EndObject, 0),
        Token::field_name("anything"),
    ]
    .iter()
    .fold(state.clone(), validate);
    assert!(again.shares_snapshot(&state));
    assert!(!again.has_errors());
}

#[test]
fn test_empty_constraint_needs_no_tokens() {
    let outcome = StreamValidator::default()
        .run(
            ValidationState::new(Vec::<String>::new()),
            JsonTokenizer::new(File::open(fixture("required/valid.json")).unwrap()),
        )
        .unwrap();
    assert!(!outcome.has_errors());
    assert_eq!(outcome.tokens, 0);
}

#[test]
fn test_prior_snapshots_unchanged() {
    let seed = point();
    let after_one = validate(seed.clone(), &Token::field_name("longitude"));
    let after_two = validate(after_one.clone(), &Token::field_name("latitude"));

    assert_eq!(seed.not_found_yet(), ["latitude", "longitude"]);
    assert_eq!(after_one.not_found_yet(), ["latitude"]);
    assert!(after_two.is_terminal());
}

#[test]
fn test_nested_keys_satisfy_by_default() {
    assert!(!fold_document(point(), "nested.json").has_errors());
}

#[test]
fn test_top_level_scope_rejects_nested_keys() {
    let options = StreamOptions {
        match_scope: MatchScope::TopLevel,
        ..StreamOptions::default()
    };
    let file = File::open(fixture("required/nested.json")).unwrap();
    let outcome = StreamValidator::new(options)
        .run(point(), JsonTokenizer::new(file))
        .unwrap();
    assert!(outcome.has_errors());
    assert_eq!(outcome.state.not_found_yet(), ["latitude", "longitude"]);
}

#[test]
fn test_top_level_scope_accepts_root_keys() {
    let options = StreamOptions {
        match_scope: MatchScope::TopLevel,
        ..StreamOptions::default()
    };
    let file = File::open(fixture("required/valid.json")).unwrap();
    let outcome = StreamValidator::new(options)
        .run(point(), JsonTokenizer::new(file))
        .unwrap();
    assert!(!outcome.has_errors());
}

#[test]
fn test_check_end_to_end() {
    let schema = SchemaLoader::load_file(&fixture("parse/schema.json")).unwrap();
    let document = File::open(fixture("required/valid.json")).unwrap();
    let outcome = streamschema::check(&schema, document, StreamOptions::default()).unwrap();
    assert!(!outcome.has_errors());
}
