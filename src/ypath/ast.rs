//! The YPath abstract syntax tree.

use super::error::Span;
use crate::value::Value;

/// A single node of a parsed YPath expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Option<Span>,
}

/// The closed set of expression kinds. `Chain` never contains a `Chain` among
/// its children, and `Multi` never contains a `Multi`: both are flattened at
/// construction time.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// `^` — the document root.
    Root,
    /// `.` — the current node.
    This,
    /// `..` — the parent of the current node.
    Parent,
    /// `*` — every immediate child (or the node itself, if scalar).
    EveryChild,
    /// `**` — every node in the subtree rooted at the current node,
    /// inclusive.
    EveryChildRecursive,
    /// Every scalar node in the subtree rooted at the current node. Reached
    /// only via the literal suffix `**$`.
    EveryLeaf,
    /// `%` — assert the current node is a sequence or mapping.
    AssertCollection,
    /// `$` — assert the current node is a scalar.
    AssertScalar,
    /// `[]` — assert the current node is a sequence.
    AssertSequence,
    /// `{}` — assert the current node is a mapping.
    AssertMapping,
    /// A bare ASCII-alphanumeric mapping key, e.g. `foo`.
    SimpleMapKey(String),
    /// A mapping key given as a flow-YAML literal, e.g. `"a b"`, `'x'`, `{a:
    /// 1}`, `[1, 2]`, compared structurally against mapping keys.
    MapKey(Value),
    /// A signed sequence index, e.g. `0`, `-1`.
    SeqIndex(i64),
    /// A half-open sequence slice, e.g. `1:3`, `2:`.
    SeqSlice { start: u64, end: SliceEnd },
    /// `*name` — the node anchored as `name`.
    Alias(String),
    /// A left-to-right pipeline: evaluate the first element against the
    /// start node, then the second against each result of the first, and so
    /// on.
    Chain(Vec<Expr>),
    /// A union: evaluate every element against the same start node and merge
    /// the results, deduplicated and in first-seen order.
    Multi(Vec<Expr>),
}

/// The end bound of a [`ExprKind::SeqSlice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceEnd {
    /// No upper bound; the slice runs to the end of the sequence.
    Open,
    /// An explicit, exclusive upper bound.
    Index(u64),
}

impl Expr {
    pub(crate) fn leaf(kind: ExprKind, span: Span) -> Self {
        Expr {
            kind,
            span: Some(span),
        }
    }

    pub(crate) fn is_terminating_filter(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::EveryChildRecursive
                | ExprKind::EveryLeaf
                | ExprKind::AssertCollection
                | ExprKind::AssertScalar
                | ExprKind::AssertSequence
                | ExprKind::AssertMapping
        )
    }

    /// The last element of this expression if it is a `Chain`, or the
    /// expression itself otherwise. Used to check the "terminating filters
    /// may only be last" invariant before appending to a chain.
    pub(crate) fn last_in_chain(&self) -> &Expr {
        match &self.kind {
            ExprKind::Chain(children) => children.last().expect("Chain is never empty"),
            _ => self,
        }
    }

    /// Builds `Chain(lhs, rhs)`, flattening either operand if it is already a
    /// chain. Does not check the terminating-filter invariant; callers that
    /// need the check (the parser) do it before calling this.
    pub(crate) fn chain(lhs: Expr, rhs: Expr) -> Self {
        let span = Span::join_opt(lhs.span, rhs.span);
        let mut children = Vec::new();
        push_flat_chain(&mut children, lhs);
        push_flat_chain(&mut children, rhs);
        Expr {
            kind: ExprKind::Chain(children),
            span,
        }
    }

    /// Builds `Multi(lhs, rhs)`, flattening either operand if it is already a
    /// union.
    pub(crate) fn multi(lhs: Expr, rhs: Expr) -> Self {
        let span = Span::join_opt(lhs.span, rhs.span);
        let mut children = Vec::new();
        push_flat_multi(&mut children, lhs);
        push_flat_multi(&mut children, rhs);
        Expr {
            kind: ExprKind::Multi(children),
            span,
        }
    }
}

fn push_flat_chain(into: &mut Vec<Expr>, e: Expr) {
    match e.kind {
        ExprKind::Chain(children) => into.extend(children),
        _ => into.push(e),
    }
}

fn push_flat_multi(into: &mut Vec<Expr>, e: Expr) {
    match e.kind {
        ExprKind::Multi(children) => into.extend(children),
        _ => into.push(e),
    }
}
