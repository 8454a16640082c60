// src/tokenize.rs

//! Quoting-aware splitting of a literal command line into a program name and
//! its arguments.
//!
//! This is a small finite-state machine over the characters of the line:
//!
//! | state          | whitespace         | `"`                | `'`                | printable       |
//! |----------------|--------------------|--------------------|--------------------|-----------------|
//! | `Start`        | -> `InSpace`       | -> `InDoubleQuote` | -> `InSingleQuote` | push, `InWord`  |
//! | `InSpace`      | stay               | -> `InDoubleQuote` | -> `InSingleQuote` | push, `InWord`  |
//! | `InWord`       | close, `InSpace`   | push               | push               | push            |
//! | `InDoubleQuote`| push               | close, `Start`     | push               | push            |
//! | `InSingleQuote`| push               | push               | close, `Start`     | push            |
//!
//! Any non-printable character is an error in every state. There are no
//! escape sequences. A quoted region still open at end of input is closed
//! implicitly: its content (if any) becomes the last token.

use std::fmt;

use thiserror::Error;
use unicode_properties::{GeneralCategoryGroup, UnicodeGeneralCategory};

/// Why a line could not be tokenized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenizeErrorKind {
    NonPrintable(char),
    Empty,
}

impl fmt::Display for TokenizeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenizeErrorKind::NonPrintable(c) => {
                write!(f, "non-printable character {:?}", c)
            }
            TokenizeErrorKind::Empty => f.write_str("nothing to execute"),
        }
    }
}

/// Tokenizer failure.
///
/// `position` is a character (not byte) offset into `input`, which is the
/// line after trimming leading and trailing whitespace.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("parsing error at {position} in {input:?}: {kind}")]
pub struct TokenizeError {
    pub position: usize,
    pub input: String,
    pub kind: TokenizeErrorKind,
}

/// A command line split into the program token and its argument tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokens {
    pub program: String,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    InSpace,
    InWord,
    InDoubleQuote,
    InSingleQuote,
}

/// Split `line` into a program name and arguments.
pub fn tokenize(line: &str) -> Result<Tokens, TokenizeError> {
    let input = line.trim();
    let mut tokens: Vec<String> = Vec::new();
    let mut word = String::new();
    let mut state = State::Start;

    for (position, c) in input.chars().enumerate() {
        let whitespace = c.is_whitespace();
        let printable = is_printable(c);

        state = match state {
            State::Start | State::InSpace => match c {
                _ if whitespace => State::InSpace,
                '"' => State::InDoubleQuote,
                '\'' => State::InSingleQuote,
                _ if printable => {
                    word.push(c);
                    State::InWord
                }
                _ => return Err(non_printable(input, position, c)),
            },
            State::InWord => match c {
                _ if whitespace => {
                    tokens.push(std::mem::take(&mut word));
                    State::InSpace
                }
                _ if printable => {
                    word.push(c);
                    State::InWord
                }
                _ => return Err(non_printable(input, position, c)),
            },
            State::InDoubleQuote => match c {
                '"' => {
                    tokens.push(std::mem::take(&mut word));
                    State::Start
                }
                _ if printable => {
                    word.push(c);
                    State::InDoubleQuote
                }
                _ => return Err(non_printable(input, position, c)),
            },
            State::InSingleQuote => match c {
                '\'' => {
                    tokens.push(std::mem::take(&mut word));
                    State::Start
                }
                _ if printable => {
                    word.push(c);
                    State::InSingleQuote
                }
                _ => return Err(non_printable(input, position, c)),
            },
        };
    }

    if !word.is_empty() {
        tokens.push(word);
    }

    let mut tokens = tokens.into_iter();
    match tokens.next() {
        Some(program) => Ok(Tokens {
            program,
            args: tokens.collect(),
        }),
        None => Err(TokenizeError {
            position: 0,
            input: input.to_string(),
            kind: TokenizeErrorKind::Empty,
        }),
    }
}

/// Letters, marks, numbers, punctuation and symbols, plus the ASCII space.
///
/// Everything else is non-printable: control, format (`U+200B`, `U+FEFF`),
/// private-use and unassigned code points, and separators other than the
/// space. Tabs and other whitespace still split words outside quotes because
/// whitespace is matched before this check.
fn is_printable(c: char) -> bool {
    c == ' '
        || matches!(
            c.general_category_group(),
            GeneralCategoryGroup::Letter
                | GeneralCategoryGroup::Mark
                | GeneralCategoryGroup::Number
                | GeneralCategoryGroup::Punctuation
                | GeneralCategoryGroup::Symbol
        )
}

fn non_printable(input: &str, position: usize, c: char) -> TokenizeError {
    TokenizeError {
        position,
        input: input.to_string(),
        kind: TokenizeErrorKind::NonPrintable(c),
    }
}
