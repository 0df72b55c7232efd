//! Property tests for the validation fold

use proptest::prelude::*;
use streamschema::stream::{validate, Token, TokenKind, ValidationState};

const NAMES: [&str; 6] = ["id", "name", "latitude", "longitude", "tags", ""];

fn name() -> impl Strategy<Value = String> {
    prop::sample::select(NAMES.to_vec()).prop_map(String::from)
}

fn text_token(kind: TokenKind) -> impl Strategy<Value = Token> {
    (name(), 0usize..4).prop_map(move |(n, depth)| Token::with_text(kind, n, depth))
}

fn token() -> impl Strategy<Value = Token> {
    prop_oneof![
        4 => text_token(TokenKind::FieldName),
        2 => text_token(TokenKind::String),
        1 => Just(Token::new(TokenKind::StartObject, 0)),
        1 => Just(Token::new(TokenKind::EndObject, 0)),
        1 => Just(Token::new(TokenKind::Null, 1)),
        1 => Just(Token::new(TokenKind::FieldName, 1)),
    ]
}

fn token_stream() -> impl Strategy<Value = Vec<Token>> {
    prop::collection::vec(token(), 0..64)
}

fn required() -> impl Strategy<Value = Vec<String>> {
    prop::sample::subsequence(NAMES.to_vec(), 0..=NAMES.len())
        .prop_map(|names| names.into_iter().map(String::from).collect())
}

proptest! {
    #[test]
    fn not_found_set_never_grows(names in required(), tokens in token_stream()) {
        let mut state = ValidationState::new(names);
        for token in &tokens {
            let before = state.remaining();
            state = validate(state, token);
            prop_assert!(state.remaining() <= before);
            prop_assert!(before - state.remaining() <= 1);
        }
    }

    #[test]
    fn errors_never_reappear(names in required(), tokens in token_stream()) {
        let mut state = ValidationState::new(names);
        let mut satisfied = !state.has_errors();
        for token in &tokens {
            state = validate(state, token);
            if satisfied {
                prop_assert!(!state.has_errors());
            }
            satisfied = !state.has_errors();
        }
    }

    #[test]
    fn remaining_names_keep_schema_order(names in required(), tokens in token_stream()) {
        let seed = ValidationState::new(names.clone());
        let state = tokens.iter().fold(seed, validate);
        let expected: Vec<&String> = names
            .iter()
            .filter(|n| state.not_found_yet().contains(*n))
            .collect();
        let actual: Vec<&String> = state.not_found_yet().iter().collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn every_listed_key_satisfies(names in required()) {
        let state = names
            .iter()
            .rev()
            .map(|n| Token::field_name(n.as_str()))
            .fold(ValidationState::new(names.clone()), |s, t| validate(s, &t));
        prop_assert!(state.is_terminal());
    }
}
