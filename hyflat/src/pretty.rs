//! RcDoc-based pretty-printer with termcolor annotations for [`Node`].
//!
//! Role
//! - Convert a nested sequence into an annotated document suitable for width-aware rendering:
//!   `[1, [2, 3]]` on one line when it fits, one element per line (indented by two) otherwise.
//! - Provide colored output for terminals (TTY-aware) and plain strings for logs/tests.
//!
//! The document is assembled bottom-up with an explicit stack. Rendering and dropping an
//! `RcDoc` recurse along its nesting, so trees deeper than [`MAX_LAYOUT_DEPTH`] skip the document
//! altogether: they are written on a single line straight from the walker's event stream.
//! Only [`PrettyNode::pretty_doc`] always builds the document.
//!
//! For [`Value`](crate::scalar::Value) trees the output is valid input for the
//! [`parser`](crate::parser).
//!
//! Performance
//! - Building the doc is O(n) in tree size; rendering respects line widths with
//!   linear-time layout in the size of the resulting document.
use std::{
    io::{self, Write},
    mem, slice,
};

use pretty::{FmtWrite, Render, RcDoc, RenderAnnotated};
use smallvec::SmallVec;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::{
    node::Node,
    scalar::Scalar,
    walker::{WalkEvent, events},
};

/// Deepest tree laid out through a document; deeper trees are written on one line.
pub const MAX_LAYOUT_DEPTH: usize = 256;

/// Styles used to annotate parts of the pretty-printed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Punct, // commas
    /// Brackets are colored by nesting depth so matching pairs share a color.
    Bracket(u8),
    Keyword, // true, false, nil
    Number,
    Str,
}

impl Style {
    fn to_color_spec(self) -> ColorSpec {
        let mut s = ColorSpec::new();
        match self {
            Style::Punct => {
                s.set_dimmed(true);
            }
            Style::Bracket(depth) => {
                // Rotate through a palette for nested brackets.
                let fg = match depth % 6 {
                    0 => Color::Blue,
                    1 => Color::Green,
                    2 => Color::White,
                    3 => Color::Yellow,
                    4 => Color::Red,
                    5 => Color::Magenta,
                    _ => unreachable!(),
                };
                s.set_fg(Some(fg)).set_dimmed(true);
            }
            Style::Keyword => {
                s.set_fg(Some(Color::Cyan)).set_bold(true);
            }
            Style::Number => {
                s.set_fg(Some(Color::Yellow));
            }
            Style::Str => {
                s.set_fg(Some(Color::Green));
            }
        }
        s
    }
}

fn styled(style: Style, s: impl Into<String>) -> RcDoc<'static, Style> {
    RcDoc::as_string(s.into()).annotate(style)
}

#[inline]
fn bracket(s: &'static str, depth: usize) -> RcDoc<'static, Style> {
    RcDoc::text(s).annotate(Style::Bracket((depth % 256) as u8))
}

/// Leaves that know how to render themselves inside a [`Node`] document.
pub trait PrettyLeaf {
    fn leaf_doc(&self) -> RcDoc<'static, Style>;
}

impl PrettyLeaf for Scalar {
    fn leaf_doc(&self) -> RcDoc<'static, Style> {
        let style = match self {
            Scalar::Null | Scalar::Bool(_) => Style::Keyword,
            Scalar::Int(_) | Scalar::Float(_) => Style::Number,
            Scalar::Str(_) => Style::Str,
        };
        styled(style, self.to_string())
    }
}

macro_rules! impl_pretty_leaf_via_scalar {
    ($($t:ty),*) => {
        $(
            impl PrettyLeaf for $t {
                #[inline]
                fn leaf_doc(&self) -> RcDoc<'static, Style> {
                    Scalar::from(self.clone()).leaf_doc()
                }
            }
        )*
    };
}

impl_pretty_leaf_via_scalar!(bool, i8, i16, i32, i64, u8, u16, u32, f32, f64, String);

impl PrettyLeaf for &str {
    fn leaf_doc(&self) -> RcDoc<'static, Style> {
        Scalar::from(*self).leaf_doc()
    }
}

impl PrettyLeaf for char {
    fn leaf_doc(&self) -> RcDoc<'static, Style> {
        Scalar::from(self.to_string()).leaf_doc()
    }
}

macro_rules! impl_pretty_leaf_via_display {
    ($($t:ty),*) => {
        $(
            impl PrettyLeaf for $t {
                #[inline]
                fn leaf_doc(&self) -> RcDoc<'static, Style> {
                    styled(Style::Number, self.to_string())
                }
            }
        )*
    };
}

// Out of `Scalar::Int` range, rendered verbatim.
impl_pretty_leaf_via_display!(u64, usize, isize, i128, u128);

/// Close a sequence whose children docs are `children`, found at `depth`.
fn seq_doc(children: Vec<RcDoc<'static, Style>>, depth: usize) -> RcDoc<'static, Style> {
    if children.is_empty() {
        return bracket("[", depth).append(bracket("]", depth));
    }
    let separator = styled(Style::Punct, ",").append(RcDoc::line());
    bracket("[", depth)
        .append(
            RcDoc::line_()
                .append(RcDoc::intersperse(children, separator))
                .nest(2),
        )
        .append(RcDoc::line_())
        .append(bracket("]", depth))
        .group()
}

fn to_doc<T: PrettyLeaf>(node: &Node<T>) -> RcDoc<'static, Style> {
    let items = match node {
        Node::Leaf(value) => return value.leaf_doc(),
        Node::Seq(items) => items,
    };

    // Post-order: a sequence's doc is built once all of its children's docs are ready.
    let mut current = (items.iter(), Vec::with_capacity(items.len()));
    let mut parents: SmallVec<(slice::Iter<'_, Node<T>>, Vec<RcDoc<'static, Style>>), 16> =
        SmallVec::new();

    loop {
        match current.0.next() {
            Some(Node::Leaf(value)) => current.1.push(value.leaf_doc()),
            Some(Node::Seq(children)) => {
                let inner = (children.iter(), Vec::with_capacity(children.len()));
                parents.push(mem::replace(&mut current, inner));
            }
            None => {
                let depth = parents.len();
                match parents.pop() {
                    Some(parent) => {
                        let (_, finished) = mem::replace(&mut current, parent);
                        current.1.push(seq_doc(finished, depth));
                    }
                    None => return seq_doc(current.1, depth),
                }
            }
        }
    }
}

/// Write `node` on a single line, one event at a time.
///
/// Produces the same text as the document layout does when everything fits on one line.
fn render_flat<T, W>(node: &Node<T>, out: &mut W) -> Result<(), <W as Render>::Error>
where
    T: PrettyLeaf,
    W: for<'b> RenderAnnotated<'b, Style>,
{
    // `true` until the first element of the innermost open sequence is written.
    let mut first = true;
    for event in events(node) {
        let doc = match event {
            WalkEvent::Exit { depth } => {
                first = false;
                bracket("]", depth)
            }
            WalkEvent::Enter { depth, .. } => {
                let doc = separator_before(first).append(bracket("[", depth));
                first = true;
                doc
            }
            WalkEvent::Leaf { value, .. } => {
                let doc = separator_before(first).append(value.leaf_doc());
                first = false;
                doc
            }
        };
        doc.render_raw(80, out)?;
    }
    Ok(())
}

fn separator_before(first: bool) -> RcDoc<'static, Style> {
    if first {
        RcDoc::nil()
    } else {
        styled(Style::Punct, ",").append(RcDoc::text(" "))
    }
}

#[inline]
fn needs_flat_rendering<T>(node: &Node<T>) -> bool {
    node.depth() > MAX_LAYOUT_DEPTH
}

// A writer that maps Style annotations to termcolor ColorSpec on a WriteColor sink.
struct ColorWriter<'w, W: WriteColor + Write> {
    out: &'w mut W,
}

impl<'a, 'w, W: WriteColor + Write> RenderAnnotated<'a, Style> for ColorWriter<'w, W> {
    fn push_annotation(&mut self, ann: &'a Style) -> io::Result<()> {
        self.out.set_color(&ann.to_color_spec())
    }
    fn pop_annotation(&mut self) -> io::Result<()> {
        self.out.reset()
    }
}

impl<'w, W: WriteColor + Write> pretty::Render for ColorWriter<'w, W> {
    type Error = io::Error;
    fn write_str(&mut self, s: &str) -> io::Result<usize> {
        self.out.write_all(s.as_bytes())?;
        Ok(s.len())
    }
    fn write_str_all(&mut self, s: &str) -> io::Result<()> {
        self.out.write_all(s.as_bytes())
    }
    fn fail_doc(&self) -> Self::Error {
        io::Error::other("render failed")
    }
}

/// Render a document to a `termcolor::WriteColor` with width-aware layout.
fn render_to<W: WriteColor + Write>(
    doc: &RcDoc<'_, Style>,
    width: usize,
    out: &mut W,
) -> io::Result<()> {
    let mut cw = ColorWriter { out };
    doc.render_raw(width, &mut cw)
}

/// Convenience: retrieve the width of the terminal, or 80 if it cannot be determined.
fn terminal_width() -> usize {
    term_size::dimensions().map(|(w, _)| w).unwrap_or(80)
}

/// Pretty-printing conveniences for any [`Node`] whose leaves implement [`PrettyLeaf`].
pub trait PrettyNode {
    /// Build an RcDoc representation of this tree with style annotations.
    /// Useful for composing or rendering manually. Rendering or dropping the document recurses
    /// along its nesting; the other methods avoid it for trees deeper than
    /// [`MAX_LAYOUT_DEPTH`].
    fn pretty_doc(&self) -> RcDoc<'static, Style>;

    /// Render this tree with colors to any termcolor writer at the given width.
    fn pretty_render_to<W: WriteColor + Write>(&self, width: usize, out: &mut W) -> io::Result<()>;

    /// Print this tree to stdout with colors (TTY-aware), at auto-detected width (or 80 if not a TTY).
    fn pretty_print(&self) -> io::Result<()>;

    /// Format this tree into a plain string (no colors) at the given width.
    fn pretty_string(&self, width: usize) -> String;
}

impl<T: PrettyLeaf> PrettyNode for Node<T> {
    #[inline]
    fn pretty_doc(&self) -> RcDoc<'static, Style> {
        to_doc(self)
    }

    #[inline]
    fn pretty_render_to<W: WriteColor + Write>(&self, width: usize, out: &mut W) -> io::Result<()> {
        if needs_flat_rendering(self) {
            return render_flat(self, &mut ColorWriter { out });
        }
        render_to(&self.pretty_doc(), width, out)
    }

    fn pretty_print(&self) -> io::Result<()> {
        let stdout = StandardStream::stdout(ColorChoice::Auto);
        let mut stdout = stdout.lock();
        self.pretty_render_to(terminal_width(), &mut stdout)
    }

    fn pretty_string(&self, width: usize) -> String {
        let mut buf = String::new();
        // Writing into a `String` cannot fail.
        if needs_flat_rendering(self) {
            let _ = render_flat(self, &mut FmtWrite::new(&mut buf));
        } else {
            let _ = self.pretty_doc().render_fmt(width, &mut buf);
        }
        buf
    }
}

impl<T: PrettyLeaf> std::fmt::Display for Node<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut w = FmtWrite::new(f);
        if needs_flat_rendering(self) {
            return render_flat(self, &mut w);
        }
        self.pretty_doc().render_raw(80, &mut w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fits_on_one_line() {
        let tree = Node::seq([Node::leaf(1), Node::seq([Node::leaf(2), Node::empty()])]);
        assert_eq!(tree.to_string(), "[1, [2, []]]");
    }

    #[test]
    fn breaks_when_too_wide() {
        let tree = Node::from_leaves(["alpha", "beta"]);
        assert_eq!(
            tree.pretty_string(8),
            "[\n  \"alpha\",\n  \"beta\"\n]"
        );
    }

    #[test]
    fn flat_rendering_matches_one_line_layout() {
        let tree = Node::seq([
            Node::empty(),
            Node::leaf(Scalar::from("a, b")),
            Node::seq([Node::leaf(Scalar::Null), Node::seq([Node::empty()])]),
            Node::leaf(Scalar::from(-3)),
        ]);
        let mut flat = String::new();
        render_flat(&tree, &mut FmtWrite::new(&mut flat)).unwrap();
        assert_eq!(flat, tree.to_string());
        assert_eq!(flat, r#"[[], "a, b", [nil, [[]]], -3]"#);

        let mut leaf = String::new();
        render_flat(&Node::leaf(7), &mut FmtWrite::new(&mut leaf)).unwrap();
        assert_eq!(leaf, "7");
    }

    #[test]
    fn deep_trees_render_on_one_line() {
        let depth = MAX_LAYOUT_DEPTH * 8;
        let mut tree = Node::leaf(1);
        for _ in 0..depth {
            tree = Node::seq([tree, Node::leaf(2)]);
        }
        let expected = format!("{}1{}", "[".repeat(depth), ", 2]".repeat(depth));
        assert_eq!(tree.to_string(), expected);
        assert_eq!(tree.pretty_string(10), expected);

        let mut out = termcolor::Buffer::no_color();
        tree.pretty_render_to(10, &mut out).unwrap();
        assert_eq!(String::from_utf8(out.into_inner()).unwrap(), expected);
    }

    #[test]
    fn colored_render_keeps_text() {
        let tree = Node::seq([Node::leaf(Scalar::Null), Node::leaf(Scalar::from(1.5))]);
        let mut out = termcolor::Buffer::no_color();
        tree.pretty_render_to(80, &mut out).unwrap();
        assert_eq!(String::from_utf8(out.into_inner()).unwrap(), "[nil, 1.5]");
    }
}
