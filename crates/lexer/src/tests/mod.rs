// Test module for lexer
//
// Tests are organized by category: raw token recognition, literals and the
// indentation layout pass.

mod number_tests;
mod string_tests;
mod token_tests;
