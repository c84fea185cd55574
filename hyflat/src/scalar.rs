use std::fmt::{self, Write};

use serde::{Deserialize, Serialize};
use strum::{EnumIs, EnumTryAs};

use crate::node::Node;

/// Dynamically typed leaf value, as found in literals such as `[1, "a", [true, nil]]`.
///
/// Mixed leaf types are allowed within one tree; anything that is not a sequence is a leaf.
#[derive(Debug, Clone, PartialEq, EnumIs, EnumTryAs, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

/// A nested sequence of dynamically typed leaves.
pub type Value = Node<Scalar>;

/// Write `s` as a double-quoted literal, escaping what the lexer unescapes.
pub(crate) fn write_quoted<W: Write>(out: &mut W, s: &str) -> fmt::Result {
    out.write_char('"')?;
    for c in s.chars() {
        match c {
            '"' => out.write_str("\\\"")?,
            '\\' => out.write_str("\\\\")?,
            '\n' => out.write_str("\\n")?,
            '\t' => out.write_str("\\t")?,
            '\r' => out.write_str("\\r")?,
            c => out.write_char(c)?,
        }
    }
    out.write_char('"')
}

/// Floats always carry a fraction or an exponent so they read back as floats.
pub(crate) fn write_float<W: Write>(out: &mut W, v: f64) -> fmt::Result {
    if v.is_nan() {
        out.write_str("nan")
    } else if v.is_infinite() {
        out.write_str(if v > 0.0 { "inf" } else { "-inf" })
    } else {
        write!(out, "{v:?}")
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => f.write_str("nil"),
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Int(i) => write!(f, "{i}"),
            Scalar::Float(v) => write_float(f, *v),
            Scalar::Str(s) => write_quoted(f, s),
        }
    }
}

macro_rules! impl_from_for_scalar {
    ($variant:ident: $($t:ty),*) => {
        $(
            impl From<$t> for Scalar {
                #[inline]
                fn from(value: $t) -> Self {
                    Scalar::$variant(value.into())
                }
            }

            impl From<$t> for Node<Scalar> {
                #[inline]
                fn from(value: $t) -> Self {
                    Node::Leaf(Scalar::from(value))
                }
            }
        )*
    };
}

impl_from_for_scalar!(Bool: bool);
impl_from_for_scalar!(Int: i8, i16, i32, i64, u8, u16, u32);
impl_from_for_scalar!(Float: f32, f64);
impl_from_for_scalar!(Str: &str, String);

impl From<()> for Scalar {
    fn from(_: ()) -> Self {
        Scalar::Null
    }
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(value: Option<T>) -> Self {
        value.map_or(Scalar::Null, Into::into)
    }
}

impl From<Scalar> for Node<Scalar> {
    fn from(value: Scalar) -> Self {
        Node::Leaf(value)
    }
}
