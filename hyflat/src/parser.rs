//! Parser for nested literals such as `[12, 3, [4, "x", true, nil]]`, using chumsky.
//!
//! Role
//! - Turn human-readable nested sequences into a [`Value`](crate::scalar::Value).
//! - Accepts everything the pretty-printer in [`pretty`](crate::pretty) produces for a `Value`.
//!
//! Two stages:
//! 1) Tokenisation from input string to a spanned `Token` stream (chumsky).
//! 2) Tree assembly from the token stream with an explicit stack of open sequences. Nesting is
//!    therefore bounded by [`FlattenConfig::max_depth`], never by the call stack.
//!
//! The accepted syntax:
//! - Sequences: `[` elements separated by `,` `]`; a trailing comma is allowed, `[]` is empty.
//! - Integers: `12`, `-3` (64-bit). Floats: `1.5`, `-2e3`, `1E-7`, `inf`, `-inf`, `nan`.
//! - Strings: double quoted, with `\"`, `\\`, `\n`, `\t`, `\r` escapes.
//! - Keywords: `true`, `false`, `nil` (also `null`).
//! - Comments run from `;` to the end of the line.
//!
//! A bare scalar at the top level parses to a leaf.
use std::str::FromStr;

use chumsky::prelude::*;
use log::debug;
use smallvec::SmallVec;

use crate::{
    config::FlattenConfig,
    error::{Error, ParserError, Result},
    node::Node,
    scalar::{Scalar, Value},
};

pub type Spanned<T> = (T, SimpleSpan);

#[derive(Clone, Debug, PartialEq)]
enum Token {
    // Delimiters & punctuation
    LBracket,
    RBracket,
    Comma,

    // Numbers, strings and the keywords true, false and nil
    Lit(Scalar),
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::Comma => write!(f, ","),
            Token::Lit(scalar) => write!(f, "{scalar}"),
        }
    }
}

// ---------------- Lexer ----------------

fn lexer<'a>() -> impl Parser<'a, &'a str, Vec<Spanned<Token>>, extra::Err<Rich<'a, char>>> {
    let exponent = one_of("eE")
        .then(one_of("+-").or_not())
        .then(text::digits(10));
    let number = just('-')
        .or_not()
        .then(text::int(10))
        .then(just('.').then(text::digits(10)).or_not())
        .then(exponent.or_not())
        .to_slice()
        .try_map(|s: &str, span| -> std::result::Result<Scalar, Rich<char>> {
            if s.contains(['.', 'e', 'E']) {
                s.parse::<f64>()
                    .map(Scalar::Float)
                    .map_err(|e| Rich::custom(span, format!("invalid float literal '{s}': {e}")))
            } else {
                s.parse::<i64>().map(Scalar::Int).map_err(|e| {
                    Rich::custom(span, format!("invalid integer literal '{s}': {e}"))
                })
            }
        })
        .labelled("number");

    let neg_inf = just("-inf").to(Scalar::Float(f64::NEG_INFINITY));

    let escape = just('\\')
        .ignore_then(choice((
            just('\\'),
            just('"'),
            just('n').to('\n'),
            just('t').to('\t'),
            just('r').to('\r'),
        )))
        .labelled("escape sequence");
    let string = none_of("\\\"")
        .or(escape)
        .repeated()
        .collect::<String>()
        .delimited_by(just('"'), just('"'))
        .map(Scalar::Str)
        .labelled("string");

    // Keywords; anything else alphabetic is rejected with a hint.
    let word = any()
        .filter(|c: &char| c.is_ascii_alphabetic() || *c == '_')
        .then(
            any()
                .filter(|c: &char| c.is_ascii_alphanumeric() || *c == '_')
                .repeated(),
        )
        .to_slice()
        .try_map(|s: &str, span| -> std::result::Result<Scalar, Rich<char>> {
            match s {
                "true" => Ok(Scalar::Bool(true)),
                "false" => Ok(Scalar::Bool(false)),
                "nil" | "null" => Ok(Scalar::Null),
                "inf" => Ok(Scalar::Float(f64::INFINITY)),
                "nan" => Ok(Scalar::Float(f64::NAN)),
                _ => Err(Rich::custom(
                    span,
                    format!(
                        "unrecognized identifier '{s}': expected true, false, nil, null, inf or nan"
                    ),
                )),
            }
        });

    let punct = choice((
        just('[').to(Token::LBracket),
        just(']').to(Token::RBracket),
        just(',').to(Token::Comma),
    ));

    let literal = choice((string, neg_inf, number, word)).map(Token::Lit);
    let token = literal.or(punct);

    // Comments are single-line starting with ';'
    let comment = just(';')
        .then(any().and_is(just('\n').not()).repeated())
        .padded()
        .to(());

    token
        .map_with(|tok, e| (tok, e.span()))
        .padded_by(comment.clone().repeated())
        .padded()
        .recover_with(skip_then_retry_until(any().ignored(), end()))
        .repeated()
        .collect()
        .padded_by(comment.repeated())
        .padded()
        .then_ignore(end())
}

// ---------------- Tree assembly ----------------

/// A sequence whose closing bracket has not been seen yet.
struct OpenSeq {
    items: Vec<Value>,
    opened_at: SimpleSpan,
    /// `true` right after `[` or `,`: an element (or `]`) is expected next.
    expects_element: bool,
}

fn error_at(message: impl Into<String>, span: SimpleSpan) -> Error {
    Error::ParserErrors {
        errors: vec![ParserError::new(message, span.start..span.end)],
    }
}

fn assemble(tokens: Vec<Spanned<Token>>, src_len: usize, config: &FlattenConfig) -> Result<Value> {
    let mut open: SmallVec<OpenSeq, 16> = SmallVec::new();
    let mut root: Option<Value> = None;

    for (token, span) in tokens {
        if root.is_some() {
            return Err(error_at(
                format!("unexpected '{token}' after the end of the literal"),
                span,
            ));
        }

        match token {
            Token::LBracket => {
                if let Some(top) = open.last()
                    && !top.expects_element
                {
                    return Err(error_at("expected ',' or ']' before '['", span));
                }
                config.check_depth(open.len() + 1)?;
                open.push(OpenSeq {
                    items: Vec::new(),
                    opened_at: span,
                    expects_element: true,
                });
            }
            Token::RBracket => {
                let Some(finished) = open.pop() else {
                    return Err(error_at("unmatched ']'", span));
                };
                let value = Node::Seq(finished.items);
                match open.last_mut() {
                    Some(parent) => {
                        parent.items.push(value);
                        parent.expects_element = false;
                    }
                    None => root = Some(value),
                }
            }
            Token::Comma => match open.last_mut() {
                Some(top) if !top.expects_element => top.expects_element = true,
                Some(_) => return Err(error_at("expected an element before ','", span)),
                None => return Err(error_at("',' outside of a sequence", span)),
            },
            Token::Lit(scalar) => match open.last_mut() {
                Some(top) if top.expects_element => {
                    top.items.push(Node::Leaf(scalar));
                    top.expects_element = false;
                }
                Some(_) => {
                    return Err(error_at(
                        format!("expected ',' or ']' before '{scalar}'"),
                        span,
                    ));
                }
                None => root = Some(Node::Leaf(scalar)),
            },
        }
    }

    if let Some(unclosed) = open.last() {
        return Err(error_at("unclosed '[' opened here", unclosed.opened_at));
    }

    root.ok_or_else(|| {
        let end = SimpleSpan::from(src_len..src_len);
        error_at("expected a value, found end of input", end)
    })
}

// ---------------- Public API ----------------

/// Parse a nested literal with the default [`FlattenConfig`].
///
/// Returns every lexing diagnostic found, or the first structural one, as
/// [`Error::ParserErrors`].
///
/// Example
/// ```
/// use hyflat::parser::parse;
/// use hyflat::scalar::Scalar;
///
/// let value = parse("[12, [3, \"x\"], nil]").unwrap();
/// assert_eq!(
///     value.flatten(),
///     [Scalar::Int(12), Scalar::Int(3), Scalar::Str("x".into()), Scalar::Null]
/// );
/// ```
pub fn parse(src: &str) -> Result<Value> {
    parse_with(src, &FlattenConfig::default())
}

/// Parse a nested literal, rejecting nesting deeper than `config.max_depth`.
pub fn parse_with(src: &str, config: &FlattenConfig) -> Result<Value> {
    let (tokens, lex_errs) = lexer().parse(src).into_output_errors();
    let errors: Vec<ParserError> = lex_errs
        .into_iter()
        .map(|e| {
            let span = *e.span();
            ParserError::new(format!("lexing error: {e}"), span.start..span.end)
        })
        .collect();

    if !errors.is_empty() {
        debug!("rejected literal with {} lexing error(s)", errors.len());
        return Err(Error::ParserErrors { errors });
    }
    let Some(tokens) = tokens else {
        return Err(error_at("no tokens produced", SimpleSpan::from(0..src.len())));
    };

    debug!("lexed {} token(s)", tokens.len());
    assemble(tokens, src.len(), config)
}

impl FromStr for Node<Scalar> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}
