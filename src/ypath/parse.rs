//! The shunting-yard parser: turns a token stream into an [`Expr`] tree.

use super::ast::{Expr, ExprKind, SliceEnd};
use super::error::{PathError, Span};
use super::token::{Token, TokenKind, Tokenizer};

#[derive(Debug, Clone, Copy)]
enum Op {
    Slash,
    Sibling,
    Comma,
}

impl Op {
    fn precedence(self) -> u8 {
        match self {
            Op::Slash => 10,
            Op::Comma => 15,
            Op::Sibling => 20,
        }
    }
}

/// Parses a YPath expression into an [`Expr`] tree.
///
/// Uses a two-stack shunting-yard algorithm over the precedence table
/// `{slash: 10, comma: 15, sibling: 20}`, matching the left-to-right,
/// tightest-binds-first reading of a path expression. The filter suffixes
/// (`$`, `%`, `[]`, `{}`) are true postfix operators: they never wait on the
/// operator stack and instead reduce the moment they're read, against
/// whatever operand is currently on top — never an operand some later,
/// lower-precedence operator hasn't combined yet.
pub fn parse(text: &str) -> Result<Expr, PathError> {
    let mut operands: Vec<Expr> = Vec::new();
    let mut operators: Vec<(Op, Span)> = Vec::new();

    for tok in Tokenizer::new(text) {
        let Token { kind, span } = tok?;
        match kind {
            TokenKind::StreamStart => {}
            TokenKind::StreamEnd => {
                drain(&mut operands, &mut operators)?;
                break;
            }
            TokenKind::Root => operands.push(Expr::leaf(ExprKind::Root, span)),
            TokenKind::This => operands.push(Expr::leaf(ExprKind::This, span)),
            TokenKind::Parent => operands.push(Expr::leaf(ExprKind::Parent, span)),
            TokenKind::EveryChild => operands.push(Expr::leaf(ExprKind::EveryChild, span)),
            TokenKind::EveryChildRecursive => {
                operands.push(Expr::leaf(ExprKind::EveryChildRecursive, span))
            }
            TokenKind::Alias(name) => operands.push(Expr::leaf(ExprKind::Alias(name), span)),
            TokenKind::SimpleMapKey(name) => {
                operands.push(Expr::leaf(ExprKind::SimpleMapKey(name), span))
            }
            TokenKind::MapKey(value) => operands.push(Expr::leaf(ExprKind::MapKey(value), span)),
            TokenKind::SeqIndex(i) => operands.push(Expr::leaf(ExprKind::SeqIndex(i), span)),
            TokenKind::SeqSlice(start, end) => {
                let end = end.map(SliceEnd::Index).unwrap_or(SliceEnd::Open);
                operands.push(Expr::leaf(ExprKind::SeqSlice { start, end }, span));
            }
            TokenKind::Slash => push_operator(&mut operands, &mut operators, Op::Slash, span)?,
            TokenKind::Sibling => push_operator(&mut operands, &mut operators, Op::Sibling, span)?,
            TokenKind::Comma => push_operator(&mut operands, &mut operators, Op::Comma, span)?,
            TokenKind::ScalarFilter => {
                apply_filter(&mut operands, ExprKind::AssertScalar, span, "$")?
            }
            TokenKind::CollectionFilter => {
                apply_filter(&mut operands, ExprKind::AssertCollection, span, "%")?
            }
            TokenKind::SeqFilter => {
                apply_filter(&mut operands, ExprKind::AssertSequence, span, "[]")?
            }
            TokenKind::MapFilter => {
                apply_filter(&mut operands, ExprKind::AssertMapping, span, "{}")?
            }
        }
    }

    match operands.len() {
        1 => Ok(operands.pop().expect("just checked len == 1")),
        0 => Err(PathError::parse(Span::new(0, text.len()), "empty expression")),
        _ => Err(PathError::parse(
            Span::new(0, text.len()),
            "expression does not reduce to a single result",
        )),
    }
}

fn push_operator(
    operands: &mut Vec<Expr>,
    operators: &mut Vec<(Op, Span)>,
    op: Op,
    span: Span,
) -> Result<(), PathError> {
    while let Some(&(top, _)) = operators.last() {
        if top.precedence() > op.precedence() {
            let (top_op, top_span) = operators.pop().expect("just peeked");
            evaluate_op(operands, top_op, top_span)?;
        } else {
            break;
        }
    }
    operators.push((op, span));
    Ok(())
}

fn drain(operands: &mut Vec<Expr>, operators: &mut Vec<(Op, Span)>) -> Result<(), PathError> {
    while let Some((op, span)) = operators.pop() {
        evaluate_op(operands, op, span)?;
    }
    Ok(())
}

fn missing_operand(span: Span, op_name: &str) -> PathError {
    PathError::parse(span, format!("'{}' is missing an operand", op_name))
}

fn evaluate_op(operands: &mut Vec<Expr>, op: Op, span: Span) -> Result<(), PathError> {
    match op {
        Op::Slash => {
            let rhs = operands.pop().ok_or_else(|| missing_operand(span, "/"))?;
            let lhs = operands.pop();
            let result = match lhs {
                Some(lhs) => build_chain(lhs, rhs, span)?,
                None => {
                    let rhs_start = rhs.span.map(|s| s.start).unwrap_or(span.start);
                    if span.start < rhs_start {
                        // Leading slash: there was nothing before it, so it marks the root.
                        build_chain(Expr::leaf(ExprKind::Root, span), rhs, span)?
                    } else {
                        // Trailing slash: asserts the preceding node is a collection.
                        build_chain(rhs, Expr::leaf(ExprKind::AssertCollection, span), span)?
                    }
                }
            };
            operands.push(result);
        }
        Op::Sibling => {
            let operand = operands.pop().ok_or_else(|| missing_operand(span, ":"))?;
            if !matches!(
                operand.kind,
                ExprKind::SimpleMapKey(_) | ExprKind::MapKey(_)
            ) {
                return Err(PathError::parse(
                    operand.span.unwrap_or(span),
                    "sibling operator ':' requires a map key operand",
                ));
            }
            let parent = Expr::leaf(ExprKind::Parent, span);
            operands.push(build_chain(parent, operand, span)?);
        }
        Op::Comma => {
            let rhs = operands.pop().ok_or_else(|| missing_operand(span, ","))?;
            let lhs = operands.pop().ok_or_else(|| missing_operand(span, ","))?;
            operands.push(Expr::multi(lhs, rhs));
        }
    }
    Ok(())
}

/// Applies a postfix filter (`$`, `%`, `[]`, `{}`) to the operand currently
/// on top of the stack, reducing immediately rather than waiting in the
/// operator stack. This is what makes `/**$` produce `EveryLeaf` (the
/// special case below sees the bare `EveryChildRecursive` operand, not a
/// `Chain` some lower-precedence `Slash` got to first) and what makes
/// `a$/x` a parse error (the filter closes off `a` into a terminating
/// chain before `/` ever gets a chance to combine it with `x`).
fn apply_filter(
    operands: &mut Vec<Expr>,
    filter_kind: ExprKind,
    span: Span,
    op_name: &str,
) -> Result<(), PathError> {
    let operand = operands
        .pop()
        .ok_or_else(|| missing_operand(span, op_name))?;
    if matches!(filter_kind, ExprKind::AssertScalar)
        && matches!(operand.kind, ExprKind::EveryChildRecursive)
    {
        let joined = Span::join_opt(operand.span, Some(span)).unwrap_or(span);
        operands.push(Expr::leaf(ExprKind::EveryLeaf, joined));
        return Ok(());
    }
    operands.push(build_chain(operand, Expr::leaf(filter_kind, span), span)?);
    Ok(())
}

/// Appends `rhs` after `lhs`, rejecting the combination if `lhs` already ends
/// in a terminating filter (`**`, `**$`, `$`, `%`, `[]`, `{}`).
fn build_chain(lhs: Expr, rhs: Expr, span: Span) -> Result<Expr, PathError> {
    if lhs.last_in_chain().is_terminating_filter() {
        return Err(PathError::parse(
            rhs.span.unwrap_or(span),
            "a terminating filter must be the last element of a path",
        ));
    }
    Ok(Expr::chain(lhs, rhs))
}
