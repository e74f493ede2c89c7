//! Error types for parsing, evaluation and proof rendering.

use crate::rule::Rule;
use thiserror::Error;

/// Malformed formula or sequent text.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseError {
	#[error("unexpected character {found:?} at offset {offset}")]
	UnexpectedCharacter { found: String, offset: usize },

	#[error("unbalanced parenthesis at offset {offset}")]
	UnbalancedParenthesis { offset: usize },

	#[error("operator without operand at offset {offset}")]
	MissingOperand { offset: usize },

	/// Two terms next to each other with nothing joining them, e.g. `p q`.
	#[error("missing operator between terms")]
	MissingOperator,

	#[error("empty expression")]
	Empty,

	#[error("sequent has no turnstile (`|-` or `⊢`)")]
	MissingTurnstile,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EvalError {
	#[error("no value associated with '{name}'")]
	UnboundAtom { name: String },
}

/// Errors raised by the prover driver or while rendering a proof tree.
///
/// Failing to find a proof is not an error; see [`crate::SequentProver::has_proof`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ProofError {
	#[error("no conclusion has been set")]
	MissingConclusion,

	/// The numbering has no entry for a node of the tree being rendered, usually because it
	/// was built from a different tree.
	#[error("{node} has no line number")]
	Unnumbered { node: String },

	/// A step cites a fact or sub-proof that has no earlier visible line.
	/// This is always a bug in whatever built the tree.
	#[error("line {line} ({rule}) cites {citation}, which has no earlier visible line")]
	MalformedJustification {
		line: usize,
		rule: Rule,
		citation: String,
	},
}

pub type ProofResult<T> = Result<T, ProofError>;
