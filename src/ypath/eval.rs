//! The tree-walk evaluator: runs a parsed [`Expr`] against a document.

use super::ast::{Expr, ExprKind, SliceEnd};
use super::error::PathError;
use crate::node_ref::NodeRef;
use std::collections::HashSet;

/// An insertion-ordered, node-identity-deduplicated collection of query
/// results. Two results referring to the same underlying node are collapsed
/// into one, keeping the position of the first occurrence.
#[derive(Debug, Default)]
pub struct ResultSet<'doc> {
    seen: HashSet<usize>,
    nodes: Vec<NodeRef<'doc>>,
}

impl<'doc> ResultSet<'doc> {
    fn new() -> Self {
        ResultSet {
            seen: HashSet::new(),
            nodes: Vec::new(),
        }
    }

    fn insert(&mut self, node: NodeRef<'doc>) {
        if self.seen.insert(node.identity()) {
            self.nodes.push(node);
        }
    }

    fn extend(&mut self, other: ResultSet<'doc>) {
        for node in other.nodes {
            self.insert(node);
        }
    }

    /// Iterates over the result nodes in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &NodeRef<'doc>> {
        self.nodes.iter()
    }

    /// Consumes the set, returning its nodes in first-seen order.
    pub fn into_vec(self) -> Vec<NodeRef<'doc>> {
        self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<'doc> IntoIterator for ResultSet<'doc> {
    type Item = NodeRef<'doc>;
    type IntoIter = std::vec::IntoIter<NodeRef<'doc>>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

/// Evaluates `expr` against `start`, returning the resulting node set.
///
/// A `Chain`'s elements are applied left to right: each element runs against
/// every node produced by the previous one, and the results are merged
/// (deduplicated, insertion-ordered) before feeding the next element. A
/// `Multi`'s elements all run against `start` independently; their results
/// are merged the same way. This also naturally handles `**`/`**$` appearing
/// mid-chain: the whole subtree they expand to is piped through the
/// remainder of the chain, one node at a time.
///
/// On a collaborator error partway through evaluation, the accumulated
/// partial results are discarded and only the error is returned. Callers
/// that want the partial results instead should use [`evaluate_lenient`].
pub fn evaluate<'doc>(expr: &Expr, start: NodeRef<'doc>) -> Result<ResultSet<'doc>, PathError> {
    let mut out = ResultSet::new();
    eval_into(expr, start, &mut out)?;
    Ok(out)
}

/// Like [`evaluate`], but on a collaborator error returns whatever results
/// had already been accumulated before the failure, paired with the error,
/// instead of discarding them. This is the "lenient mode" callers must opt
/// into explicitly; the default for [`evaluate`] is to discard.
pub fn evaluate_lenient<'doc>(
    expr: &Expr,
    start: NodeRef<'doc>,
) -> (ResultSet<'doc>, Option<PathError>) {
    let mut out = ResultSet::new();
    match eval_into(expr, start, &mut out) {
        Ok(()) => (out, None),
        Err(e) => (out, Some(e)),
    }
}

fn eval_into<'doc>(
    expr: &Expr,
    node: NodeRef<'doc>,
    out: &mut ResultSet<'doc>,
) -> Result<(), PathError> {
    match &expr.kind {
        ExprKind::Chain(children) => eval_chain(children, node, out),
        ExprKind::Multi(children) => {
            for child in children {
                eval_into(child, node, out)?;
            }
            Ok(())
        }
        _ => eval_leaf(expr, node, out),
    }
}

/// Applies a chain's elements left to right, feeding each element's combined
/// output into the next. Results already produced by earlier elements (or by
/// earlier nodes within the current element) are appended to `out` even if a
/// later step errors, so lenient callers see the accumulated prefix.
fn eval_chain<'doc>(
    children: &[Expr],
    start: NodeRef<'doc>,
    out: &mut ResultSet<'doc>,
) -> Result<(), PathError> {
    let mut current = vec![start];
    for child in children {
        let mut next = ResultSet::new();
        for node in &current {
            if let Err(e) = eval_into(child, *node, &mut next) {
                for n in next.into_vec() {
                    out.insert(n);
                }
                return Err(e);
            }
        }
        current = next.into_vec();
    }
    for node in current {
        out.insert(node);
    }
    Ok(())
}

fn eval_leaf<'doc>(
    expr: &Expr,
    node: NodeRef<'doc>,
    out: &mut ResultSet<'doc>,
) -> Result<(), PathError> {
    match &expr.kind {
        ExprKind::Root => {
            out.insert(
                node.document()
                    .root()
                    .expect("a reachable node implies a non-empty document"),
            );
        }
        ExprKind::This => out.insert(node),
        ExprKind::Parent => {
            if let Some(parent) = node.parent() {
                out.insert(parent);
            }
        }
        ExprKind::Alias(name) => {
            if let Some(n) = node.document().lookup_anchor(name) {
                out.insert(n);
            }
        }
        ExprKind::SimpleMapKey(key) => {
            if node.is_mapping() {
                if let Some(v) = node.map_get(key) {
                    out.insert(v);
                }
            }
        }
        ExprKind::MapKey(key) => {
            if node.is_mapping() {
                if let Some(v) = node.mapping_lookup_by_key(key) {
                    out.insert(v);
                }
            }
        }
        ExprKind::SeqIndex(i) => {
            if node.is_sequence() {
                let len = node.seq_len().unwrap_or(0) as i64;
                let idx = if *i < 0 { i + len } else { *i };
                if idx >= 0 && idx < len {
                    if let Some(v) = node.seq_get(idx as i32) {
                        out.insert(v);
                    }
                }
            }
        }
        ExprKind::SeqSlice { start, end } => {
            if node.is_sequence() {
                let len = node.seq_len().unwrap_or(0) as u64;
                let end_idx = match end {
                    SliceEnd::Open => len,
                    SliceEnd::Index(e) => (*e).min(len),
                };
                let mut i = *start;
                while i < end_idx {
                    if let Some(v) = node.seq_get(i as i32) {
                        out.insert(v);
                    }
                    i += 1;
                }
            }
        }
        ExprKind::AssertScalar => {
            if node.is_scalar() {
                out.insert(node);
            }
        }
        ExprKind::AssertSequence => {
            if node.is_sequence() {
                out.insert(node);
            }
        }
        ExprKind::AssertMapping => {
            if node.is_mapping() {
                out.insert(node);
            }
        }
        ExprKind::AssertCollection => {
            if node.is_sequence() || node.is_mapping() {
                out.insert(node);
            }
        }
        ExprKind::EveryChild => {
            if node.is_scalar() {
                out.insert(node);
            } else if node.is_sequence() {
                for child in node.seq_iter() {
                    out.insert(child);
                }
            } else if node.is_mapping() {
                for (_, v) in node.map_iter() {
                    out.insert(v);
                }
            }
        }
        ExprKind::EveryChildRecursive => collect_subtree(node, out),
        ExprKind::EveryLeaf => collect_leaves(node, out),
        ExprKind::Chain(_) | ExprKind::Multi(_) => {
            unreachable!("Chain/Multi are handled by eval_into")
        }
    }
    Ok(())
}

fn collect_subtree<'doc>(node: NodeRef<'doc>, out: &mut ResultSet<'doc>) {
    out.insert(node);
    if node.is_sequence() {
        for child in node.seq_iter() {
            collect_subtree(child, out);
        }
    } else if node.is_mapping() {
        for (_, v) in node.map_iter() {
            collect_subtree(v, out);
        }
    }
}

fn collect_leaves<'doc>(node: NodeRef<'doc>, out: &mut ResultSet<'doc>) {
    if node.is_scalar() {
        out.insert(node);
        return;
    }
    if node.is_sequence() {
        for child in node.seq_iter() {
            collect_leaves(child, out);
        }
    } else if node.is_mapping() {
        for (_, v) in node.map_iter() {
            collect_leaves(v, out);
        }
    }
}
