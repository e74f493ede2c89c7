//! Formula and sequent parser.
//!
//! Atoms are single lowercase letters. Connectives are `^`, `V`, `->` and prefix `~`, and
//! `_|_` is absurdity; the Unicode symbols `∧ ∨ → ¬ ⊥ ⊢` are accepted too. Binary
//! connectives have no precedence and group to the right, so `p ^ q V r` is `p ^ (q V r)`.

use crate::error::ParseError;
use crate::formula::{to_ascii, Formula};
use crate::prover::Sequent;
use plex::lexer;
use std::str::FromStr;
use tracing::trace;

#[derive(Debug, Clone, PartialEq)]
enum Token {
	Whitespace,
	Atom(String),
	Absurdity,
	And,
	Or,
	Implies,
	Not,
	LeftParenthesis,
	RightParenthesis,
	Unexpected(String),
}

lexer! {
	fn next_token(text: 'a) -> Token;

	r#"[ \t\r\n]+"# => Token::Whitespace,
	r#"[a-z]"# => Token::Atom(text.to_owned()),
	r#"_\|_"# => Token::Absurdity,
	r#"\^"# => Token::And,
	r#"V"# => Token::Or,
	r#"->"# => Token::Implies,
	r#"~"# => Token::Not,
	r#"\("# => Token::LeftParenthesis,
	r#"\)"# => Token::RightParenthesis,
	r#"."# => Token::Unexpected(text.to_owned()),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Operator {
	And,
	Or,
	Implies,
	Not,
	Open,
}

/// Parses a single formula. Error offsets are byte offsets into the ASCII-normalized text.
pub fn parse(text: &str) -> Result<Formula, ParseError> {
	let normalized = to_ascii(text);
	// operator stack, each with the offset it was read at
	let mut operators: Vec<(Operator, usize)> = Vec::new();
	let mut terms: Vec<Formula> = Vec::new();
	let mut remaining = normalized.as_str();
	while let Some((token, new_remaining)) = next_token(remaining) {
		let offset = normalized.len() - remaining.len();
		match token {
			Token::Whitespace => {}
			Token::Atom(name) => terms.push(apply_prefix(&mut operators, Formula::Atom(name))),
			Token::Absurdity => terms.push(apply_prefix(&mut operators, Formula::Absurdity)),
			Token::And => operators.push((Operator::And, offset)),
			Token::Or => operators.push((Operator::Or, offset)),
			Token::Implies => operators.push((Operator::Implies, offset)),
			Token::Not => operators.push((Operator::Not, offset)),
			Token::LeftParenthesis => operators.push((Operator::Open, offset)),
			Token::RightParenthesis => reduce(&mut operators, &mut terms, offset, true)?,
			Token::Unexpected(found) => {
				return Err(ParseError::UnexpectedCharacter { found, offset })
			}
		}
		remaining = new_remaining;
	}
	if let Some(found) = remaining.chars().next() {
		return Err(ParseError::UnexpectedCharacter {
			found: found.to_string(),
			offset: normalized.len() - remaining.len(),
		});
	}

	reduce(&mut operators, &mut terms, normalized.len(), false)?;
	if let Some((_, offset)) = operators.pop() {
		// only an unmatched `(` can survive the final reduction
		return Err(ParseError::UnbalancedParenthesis { offset });
	}
	let result = match terms.len() {
		0 => Err(ParseError::Empty),
		1 => terms.pop().ok_or(ParseError::Empty),
		_ => Err(ParseError::MissingOperator),
	};
	trace!(?result, text, "parsed formula");
	result
}

/// Pops binary operators back to the nearest `(`, combining terms right to left.
/// When closing a parenthesis the `(` itself is consumed and pending `~` are applied.
fn reduce(
	operators: &mut Vec<(Operator, usize)>,
	terms: &mut Vec<Formula>,
	offset: usize,
	closing: bool,
) -> Result<(), ParseError> {
	while let Some(&(operator, at)) = operators.last() {
		if operator == Operator::Open {
			break;
		}
		operators.pop();
		let right = terms.pop().ok_or(ParseError::MissingOperand { offset: at })?;
		let left = terms.pop().ok_or(ParseError::MissingOperand { offset: at })?;
		terms.push(match operator {
			Operator::And => left.and(right),
			Operator::Or => left.or(right),
			Operator::Implies => left.implies(right),
			// a `~` is applied as soon as its operand is complete, so one left here has none
			Operator::Not | Operator::Open => return Err(ParseError::MissingOperand { offset: at }),
		});
	}
	if !closing {
		return Ok(());
	}
	match operators.pop() {
		Some((Operator::Open, _)) => {}
		_ => return Err(ParseError::UnbalancedParenthesis { offset }),
	}
	let term = terms.pop().ok_or(ParseError::MissingOperand { offset })?;
	terms.push(apply_prefix(operators, term));
	Ok(())
}

fn apply_prefix(operators: &mut Vec<(Operator, usize)>, mut term: Formula) -> Formula {
	while let Some((Operator::Not, _)) = operators.last() {
		operators.pop();
		term = term.not();
	}
	term
}

/// Parses `premise, premise, ... |- conclusion`. The premise list may be empty.
pub fn parse_sequent(text: &str) -> Result<Sequent, ParseError> {
	let normalized = to_ascii(text);
	let split = normalized.find("|-").ok_or(ParseError::MissingTurnstile)?;
	let (left, right) = (&normalized[..split], &normalized[split + 2..]);
	let premises = left
		.split(',')
		.map(str::trim)
		.filter(|premise| !premise.is_empty())
		.map(parse)
		.collect::<Result<Vec<_>, _>>()?;
	let conclusion = parse(right)?;
	Ok(Sequent::new(premises, conclusion))
}

impl FromStr for Formula {
	type Err = ParseError;

	fn from_str(text: &str) -> Result<Self, Self::Err> {
		parse(text)
	}
}

impl FromStr for Sequent {
	type Err = ParseError;

	fn from_str(text: &str) -> Result<Self, Self::Err> {
		parse_sequent(text)
	}
}
