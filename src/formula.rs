use crate::error::EvalError;
use std::collections::{BTreeSet, HashMap};

/// Truth assignment for atoms, keyed by atom name.
pub type Valuation = HashMap<String, bool>;

/// Propositional formula.
///
/// Equality is structural and order-sensitive: `p ^ q` and `q ^ p` are different formulas.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Formula {
	Atom(String),
	And(Box<Formula>, Box<Formula>),
	Or(Box<Formula>, Box<Formula>),
	Implies(Box<Formula>, Box<Formula>),
	Not(Box<Formula>),
	Absurdity,
}

/// Symbol set used when printing formulas and proofs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notation {
	Ascii,
	Unicode,
}

impl Notation {
	pub fn and(self) -> &'static str {
		match self {
			Notation::Ascii => "^",
			Notation::Unicode => "∧",
		}
	}

	pub fn or(self) -> &'static str {
		match self {
			Notation::Ascii => "V",
			Notation::Unicode => "∨",
		}
	}

	pub fn implies(self) -> &'static str {
		match self {
			Notation::Ascii => "->",
			Notation::Unicode => "→",
		}
	}

	pub fn not(self) -> &'static str {
		match self {
			Notation::Ascii => "~",
			Notation::Unicode => "¬",
		}
	}

	pub fn absurdity(self) -> &'static str {
		match self {
			Notation::Ascii => "_|_",
			Notation::Unicode => "⊥",
		}
	}

	pub fn turnstile(self) -> &'static str {
		match self {
			Notation::Ascii => "|-",
			Notation::Unicode => "⊢",
		}
	}
}

// (ascii, unicode)
const SYMBOLS: [(&str, &str); 6] = [
	("^", "∧"),
	("V", "∨"),
	("->", "→"),
	("~", "¬"),
	("_|_", "⊥"),
	("|-", "⊢"),
];

/// Replaces Unicode logic symbols with their ASCII spelling. ASCII text is unaffected.
pub fn to_ascii(text: &str) -> String {
	SYMBOLS
		.iter()
		.fold(text.to_string(), |acc, (ascii, uni)| acc.replace(uni, ascii))
}

/// Replaces ASCII logic symbols with their Unicode spelling.
pub fn to_unicode(text: &str) -> String {
	SYMBOLS
		.iter()
		.fold(text.to_string(), |acc, (ascii, uni)| acc.replace(ascii, uni))
}

impl Formula {
	pub fn atom(name: impl Into<String>) -> Formula {
		Formula::Atom(name.into())
	}

	pub fn absurdity() -> Formula {
		Formula::Absurdity
	}

	pub fn and(self, right: Formula) -> Formula {
		Formula::And(Box::new(self), Box::new(right))
	}

	pub fn or(self, right: Formula) -> Formula {
		Formula::Or(Box::new(self), Box::new(right))
	}

	pub fn implies(self, right: Formula) -> Formula {
		Formula::Implies(Box::new(self), Box::new(right))
	}

	#[allow(clippy::should_implement_trait)]
	pub fn not(self) -> Formula {
		Formula::Not(Box::new(self))
	}

	pub fn is_atom(&self) -> bool {
		matches!(self, Formula::Atom(_))
	}

	pub fn evaluate(&self, valuation: &Valuation) -> Result<bool, EvalError> {
		Ok(match self {
			Formula::Atom(name) => match valuation.get(name) {
				Some(value) => *value,
				None => return Err(EvalError::UnboundAtom { name: name.clone() }),
			},
			Formula::And(a, b) => a.evaluate(valuation)? && b.evaluate(valuation)?,
			Formula::Or(a, b) => a.evaluate(valuation)? || b.evaluate(valuation)?,
			Formula::Implies(a, b) => !a.evaluate(valuation)? || b.evaluate(valuation)?,
			Formula::Not(a) => !a.evaluate(valuation)?,
			Formula::Absurdity => false,
		})
	}

	/// Every atom name occurring in the formula, sorted.
	pub fn atoms(&self) -> BTreeSet<String> {
		let mut result = BTreeSet::new();
		self.collect_atoms(&mut result);
		result
	}

	fn collect_atoms(&self, into: &mut BTreeSet<String>) {
		match self {
			Formula::Atom(name) => {
				into.insert(name.clone());
			}
			Formula::And(a, b) | Formula::Or(a, b) | Formula::Implies(a, b) => {
				a.collect_atoms(into);
				b.collect_atoms(into);
			}
			Formula::Not(a) => a.collect_atoms(into),
			Formula::Absurdity => {}
		}
	}

	/// ASCII rendering with bound atoms replaced by `T`/`F`.
	pub fn render(&self, substitution: Option<&Valuation>) -> String {
		self.render_with(Notation::Ascii, substitution)
	}

	pub fn render_with(&self, notation: Notation, substitution: Option<&Valuation>) -> String {
		match self {
			Formula::Atom(name) => match substitution.and_then(|vars| vars.get(name)) {
				Some(true) => "T".to_string(),
				Some(false) => "F".to_string(),
				None => name.clone(),
			},
			Formula::And(a, b) => self.render_binary(notation.and(), a, b, notation, substitution),
			Formula::Or(a, b) => self.render_binary(notation.or(), a, b, notation, substitution),
			Formula::Implies(a, b) => {
				self.render_binary(notation.implies(), a, b, notation, substitution)
			}
			Formula::Not(a) => notation.not().to_string() + &a.render_with(notation, substitution),
			Formula::Absurdity => notation.absurdity().to_string(),
		}
	}

	fn render_binary(
		&self,
		symbol: &str,
		a: &Formula,
		b: &Formula,
		notation: Notation,
		substitution: Option<&Valuation>,
	) -> String {
		format!(
			"({} {} {})",
			a.render_with(notation, substitution),
			symbol,
			b.render_with(notation, substitution)
		)
	}
}

impl std::fmt::Display for Formula {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "{}", self.render(None))
	}
}
