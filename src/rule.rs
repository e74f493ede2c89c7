use crate::formula::{Formula, Notation};

/// Handle of a scope (sub-proof) inside a proof tree. The root scope is always 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(pub u32);

impl ScopeId {
	pub const ROOT: ScopeId = ScopeId(0);
}

/// Inference rules of the natural-deduction system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rule {
	Premise,
	Assume,
	AndIntro,
	AndElim1,
	AndElim2,
	OrIntro1,
	OrIntro2,
	OrElim,
	ImpliesIntro,
	ImpliesElim,
	NotElim,
	NotIntro,
	AbsurdityElim,
	ProofByContradiction,
}

impl Rule {
	pub fn name(self, notation: Notation) -> &'static str {
		match (self, notation) {
			(Rule::Premise, _) => "premise",
			(Rule::Assume, _) => "assume",
			(Rule::ProofByContradiction, _) => "pbc",
			(Rule::AndIntro, Notation::Ascii) => "^i",
			(Rule::AndIntro, Notation::Unicode) => "∧i",
			(Rule::AndElim1, Notation::Ascii) => "^e1",
			(Rule::AndElim1, Notation::Unicode) => "∧e1",
			(Rule::AndElim2, Notation::Ascii) => "^e2",
			(Rule::AndElim2, Notation::Unicode) => "∧e2",
			(Rule::OrIntro1, Notation::Ascii) => "Vi1",
			(Rule::OrIntro1, Notation::Unicode) => "∨i1",
			(Rule::OrIntro2, Notation::Ascii) => "Vi2",
			(Rule::OrIntro2, Notation::Unicode) => "∨i2",
			(Rule::OrElim, Notation::Ascii) => "Ve",
			(Rule::OrElim, Notation::Unicode) => "∨e",
			(Rule::ImpliesIntro, Notation::Ascii) => "->i",
			(Rule::ImpliesIntro, Notation::Unicode) => "→i",
			(Rule::ImpliesElim, Notation::Ascii) => "->e",
			(Rule::ImpliesElim, Notation::Unicode) => "→e",
			(Rule::NotElim, Notation::Ascii) => "~e",
			(Rule::NotElim, Notation::Unicode) => "¬e",
			(Rule::NotIntro, Notation::Ascii) => "~i",
			(Rule::NotIntro, Notation::Unicode) => "¬i",
			(Rule::AbsurdityElim, Notation::Ascii) => "_|_e",
			(Rule::AbsurdityElim, Notation::Unicode) => "⊥e",
		}
	}

	/// Number of facts plus sub-proofs a justification for this rule cites.
	pub fn arg_count(self) -> usize {
		match self {
			Rule::Premise | Rule::Assume => 0,
			Rule::AndElim1
			| Rule::AndElim2
			| Rule::OrIntro1
			| Rule::OrIntro2
			| Rule::ImpliesIntro
			| Rule::NotIntro
			| Rule::AbsurdityElim
			| Rule::ProofByContradiction => 1,
			Rule::AndIntro | Rule::ImpliesElim | Rule::NotElim => 2,
			Rule::OrElim => 3,
		}
	}
}

impl std::fmt::Display for Rule {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "{}", self.name(Notation::Ascii))
	}
}

/// Why a proof step holds: the rule and the earlier facts and sub-proofs it cites.
///
/// Facts are cited by formula and resolved to line numbers when the proof is rendered.
/// Sub-proofs are cited by scope handle. Only `OrElim` cites both kinds; its facts are
/// listed before its sub-proofs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Justification {
	pub rule: Rule,
	pub facts: Vec<Formula>,
	pub subproofs: Vec<ScopeId>,
}

impl Justification {
	fn new(rule: Rule, facts: Vec<Formula>, subproofs: Vec<ScopeId>) -> Justification {
		debug_assert_eq!(
			facts.len() + subproofs.len(),
			rule.arg_count(),
			"wrong citation count for {}",
			rule
		);
		Justification {
			rule,
			facts,
			subproofs,
		}
	}

	pub fn premise() -> Justification {
		Justification::new(Rule::Premise, Vec::new(), Vec::new())
	}

	pub fn assume() -> Justification {
		Justification::new(Rule::Assume, Vec::new(), Vec::new())
	}

	pub fn from_facts(rule: Rule, facts: Vec<Formula>) -> Justification {
		Justification::new(rule, facts, Vec::new())
	}

	pub fn from_subproofs(rule: Rule, subproofs: Vec<ScopeId>) -> Justification {
		Justification::new(rule, Vec::new(), subproofs)
	}

	pub fn or_elim(disjunction: Formula, left: ScopeId, right: ScopeId) -> Justification {
		Justification::new(Rule::OrElim, vec![disjunction], vec![left, right])
	}
}
