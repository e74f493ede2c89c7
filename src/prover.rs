//! Natural-deduction proof search.
//!
//! The search works on a stack of open scopes. The bottom of the stack is the main proof,
//! and every assumption (a case of an or-elimination, the antecedent of an implication, a
//! refuted formula) pushes a fresh scope. A fact is *known* while it is a step of some open
//! scope. A scope whose branch fails is popped and dropped, taking its steps with it; one
//! whose branch succeeds is folded into the scope below it.

use crate::config::ProverConfig;
use crate::error::{ProofError, ProofResult};
use crate::formula::{Formula, Notation, Valuation};
use crate::proof_tree::{ProofNode, ProofTree, RenderStyle};
use crate::rule::{Justification, Rule, ScopeId};
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, info, trace};

/// Sequents with more distinct atoms than this are not checked by truth table.
pub const MAX_TRUTH_TABLE_ATOMS: usize = 20;

/// Premises together with the conclusion to be derived from them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sequent {
	pub premises: Vec<Formula>,
	pub conclusion: Formula,
}

impl Sequent {
	pub fn new(premises: Vec<Formula>, conclusion: Formula) -> Sequent {
		Sequent {
			premises,
			conclusion,
		}
	}

	pub fn render(&self, notation: Notation) -> String {
		let premises: Vec<String> = self
			.premises
			.iter()
			.map(|premise| premise.render_with(notation, None))
			.collect();
		let conclusion = self.conclusion.render_with(notation, None);
		if premises.is_empty() {
			format!("{} {}", notation.turnstile(), conclusion)
		} else {
			format!("{} {} {}", premises.join(", "), notation.turnstile(), conclusion)
		}
	}

	/// Truth-table check: the conclusion holds under every valuation satisfying all premises.
	/// Independent of the proof search, which is not complete. `None` when the sequent has
	/// more than [`MAX_TRUTH_TABLE_ATOMS`] atoms.
	pub fn is_valid(&self) -> Option<bool> {
		let mut atoms = self.conclusion.atoms();
		for premise in &self.premises {
			atoms.extend(premise.atoms());
		}
		if atoms.len() > MAX_TRUTH_TABLE_ATOMS {
			return None;
		}
		let atoms: Vec<String> = atoms.into_iter().collect();
		let rows = 1u64.checked_shl(atoms.len() as u32)?;
		let valid = (0..rows).all(|mask| {
			let valuation: Valuation = atoms
				.iter()
				.enumerate()
				.map(|(i, atom)| (atom.clone(), mask & (1u64 << i) != 0))
				.collect();
			let premises_hold = self
				.premises
				.iter()
				.all(|premise| premise.evaluate(&valuation) == Ok(true));
			!premises_hold || self.conclusion.evaluate(&valuation) == Ok(true)
		});
		Some(valid)
	}
}

impl std::fmt::Display for Sequent {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "{}", self.render(Notation::Ascii))
	}
}

/// Outcome of a proof search: the tree that was built and whether it reaches the conclusion.
/// A failed search still yields a structurally valid, partial tree.
#[derive(Clone, Debug)]
pub struct Derivation {
	pub tree: ProofTree,
	pub proved: bool,
	/// Goals expanded during the search.
	pub steps: usize,
	/// The search ran out of [`ProverConfig::max_steps`] before finishing.
	pub exhausted: bool,
}

impl Derivation {
	pub fn render(&self, style: &RenderStyle) -> ProofResult<String> {
		self.tree.render(&self.tree.numbering_map(), 2, style)
	}
}

/// Searches for natural-deduction proofs of a sequent.
#[derive(Clone, Debug, Default)]
pub struct SequentProver {
	premises: Vec<Formula>,
	conclusion: Option<Formula>,
	config: ProverConfig,
}

impl SequentProver {
	pub fn new() -> SequentProver {
		SequentProver::default()
	}

	pub fn from_sequent(sequent: Sequent) -> SequentProver {
		let mut prover = SequentProver::new();
		prover.set(sequent.conclusion, sequent.premises);
		prover
	}

	pub fn with_config(mut self, config: ProverConfig) -> SequentProver {
		self.config = config;
		self
	}

	pub fn config(&self) -> &ProverConfig {
		&self.config
	}

	pub fn set_premises<I: IntoIterator<Item = Formula>>(&mut self, premises: I) {
		self.premises = premises.into_iter().collect();
	}

	pub fn set_conclusion(&mut self, conclusion: Formula) {
		self.conclusion = Some(conclusion);
	}

	pub fn set<I: IntoIterator<Item = Formula>>(&mut self, conclusion: Formula, premises: I) {
		self.set_conclusion(conclusion);
		self.set_premises(premises);
	}

	pub fn sequent(&self) -> ProofResult<Sequent> {
		let conclusion = self
			.conclusion
			.clone()
			.ok_or(ProofError::MissingConclusion)?;
		Ok(Sequent::new(self.premises.clone(), conclusion))
	}

	/// Seeds a fresh tree with the premises and tries each premise in turn as the starting
	/// point, then the conclusion on its own.
	pub fn search(&self) -> ProofResult<Derivation> {
		let sequent = self.sequent()?;
		let mut search = Search::new(&self.config);
		for premise in &sequent.premises {
			search.main.add_step(premise.clone(), Justification::premise());
		}

		let proved = sequent
			.premises
			.iter()
			.any(|premise| search.prove(Some(premise), &sequent.conclusion))
			|| search.prove(None, &sequent.conclusion);
		info!(
			sequent = %sequent,
			proved,
			steps = search.steps,
			exhausted = search.exhausted,
			"proof search finished"
		);

		Ok(Derivation {
			tree: search.main,
			proved,
			steps: search.steps,
			exhausted: search.exhausted,
		})
	}

	/// Whether a proof of the conclusion was found. Not finding one is `Ok(false)`.
	pub fn has_proof(&self) -> ProofResult<bool> {
		Ok(self.search()?.proved)
	}

	/// Searches and renders the resulting tree, partial if no proof was found:
	///
	/// ```text
	/// p, (p → q) ⊢ q
	/// {
	///   1. p                                  premise
	///   2. (p → q)                            premise
	///   3. q                                  →e 2 1
	/// }
	/// ```
	pub fn get_proof(&self) -> ProofResult<String> {
		self.render(&self.search()?)
	}

	/// Renders a derivation of this prover's sequent, header included.
	pub fn render(&self, derivation: &Derivation) -> ProofResult<String> {
		let sequent = self.sequent()?;
		let style = &self.config.style;
		let mode = style.mode;

		let mut result = mode.text(&sequent.render(style.notation));
		result += mode.newline();
		result += &mode.text("{");
		result += mode.newline();
		result += &derivation.render(style)?;
		result += &mode.text("}");
		Ok(result)
	}
}

// A goal together with the facts known when it was attempted. The outcome of `prove` is
// determined by this triple, except where a limit or a cycle cut the search short.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct Goal {
	from: Option<Formula>,
	to: Formula,
	known: BTreeSet<Formula>,
}

struct Search<'c> {
	config: &'c ProverConfig,
	main: ProofTree,
	open: Vec<ProofTree>,
	last_scope: u32,
	// goals on the current recursion path
	active: HashSet<Goal>,
	// goals that failed without being cut short
	failed: HashSet<Goal>,
	depth: usize,
	steps: usize,
	// bumped whenever a branch is abandoned for a limit or a cycle
	cuts: usize,
	exhausted: bool,
}

impl<'c> Search<'c> {
	fn new(config: &'c ProverConfig) -> Search<'c> {
		Search {
			config,
			main: ProofTree::new(),
			open: Vec::new(),
			last_scope: ScopeId::ROOT.0,
			active: HashSet::new(),
			failed: HashSet::new(),
			depth: 0,
			steps: 0,
			cuts: 0,
			exhausted: false,
		}
	}

	fn current(&mut self) -> &mut ProofTree {
		match self.open.last_mut() {
			Some(scope) => scope,
			None => &mut self.main,
		}
	}

	fn current_ref(&self) -> &ProofTree {
		self.open.last().unwrap_or(&self.main)
	}

	fn scopes(&self) -> impl Iterator<Item = &ProofTree> + '_ {
		std::iter::once(&self.main).chain(self.open.iter())
	}

	fn is_known(&self, formula: &Formula) -> bool {
		self.scopes().any(|scope| scope.holds(formula))
	}

	/// Distinct known facts, outermost scope first.
	fn known_facts(&self) -> Vec<Formula> {
		let mut seen = HashSet::new();
		let mut result = Vec::new();
		for step in self.scopes().flat_map(|scope| scope.steps()) {
			if seen.insert(&step.formula) {
				result.push(step.formula.clone());
			}
		}
		result
	}

	/// Adds a step to the current scope unless the formula is already known.
	fn derive(&mut self, formula: Formula, justification: Justification) {
		if self.is_known(&formula) {
			return;
		}
		trace!(formula = %formula, rule = %justification.rule, "derive");
		self.current()
			.add_proof(ProofTree::new_leaf(formula, justification));
	}

	/// Makes a known fact a step of the current scope, copying it from an enclosing scope.
	fn cite(&mut self, formula: &Formula) {
		if self.current_ref().holds(formula) {
			return;
		}
		let scope = self.current_ref().id();
		let copy = self
			.scopes()
			.find_map(|tree| tree.find_step(formula))
			.map(|step| step.create_similar(scope));
		if let Some(step) = copy {
			trace!(formula = %formula, scope = scope.0, "cite");
			self.current().add_proof(ProofNode::Leaf(step));
		}
	}

	/// Runs `body` inside a new scope that starts with `assumption`. Returns the scope if
	/// `body` succeeded; otherwise it is dropped.
	fn with_scope<F>(&mut self, assumption: Formula, body: F) -> Option<ProofTree>
	where
		F: FnOnce(&mut Self) -> bool,
	{
		self.last_scope += 1;
		let id = ScopeId(self.last_scope);
		debug!(scope = id.0, assumption = %assumption, "open scope");
		let mut scope = ProofTree::new_scope(id);
		scope.add_step(assumption, Justification::assume());
		self.open.push(scope);
		let proved = body(self);
		let scope = self.open.pop();
		debug!(scope = id.0, proved, "close scope");
		if proved {
			scope
		} else {
			None
		}
	}

	fn fold(&mut self, scope: ProofTree) -> ScopeId {
		let id = scope.id();
		self.current().add_proof(ProofNode::Scope(scope));
		id
	}

	/// Tries to reach `to` starting from the known fact `from`, or from nothing.
	fn prove(&mut self, from: Option<&Formula>, to: &Formula) -> bool {
		if self.is_known(to) {
			self.cite(to);
			return true;
		}
		if from == Some(to) {
			return true;
		}
		if self.depth >= self.config.max_depth {
			trace!(depth = self.depth, to = %to, "depth limit reached");
			self.cuts += 1;
			return false;
		}
		if self.steps >= self.config.max_steps {
			if !self.exhausted {
				debug!(steps = self.steps, "step budget exhausted");
				self.exhausted = true;
			}
			self.cuts += 1;
			return false;
		}
		self.steps += 1;

		let goal = Goal {
			from: from.cloned(),
			to: to.clone(),
			known: self.known_facts().into_iter().collect(),
		};
		if self.failed.contains(&goal) {
			trace!(to = %to, "goal already failed");
			return false;
		}
		if !self.active.insert(goal.clone()) {
			trace!(to = %to, "goal already in progress");
			self.cuts += 1;
			return false;
		}

		let cuts = self.cuts;
		self.depth += 1;
		let proved = self.decompose(from, to) || self.compose(from, to) || self.last_resort(from, to);
		self.depth -= 1;
		self.active.remove(&goal);
		if !proved && self.cuts == cuts {
			self.failed.insert(goal);
		}
		proved
	}

	/// Elimination rules applied to `from`.
	fn decompose(&mut self, from: Option<&Formula>, to: &Formula) -> bool {
		let from = match from {
			Some(from) => from,
			None => return false,
		};
		match from {
			Formula::And(l, r) => {
				let (l, r) = (&**l, &**r);
				self.derive(
					l.clone(),
					Justification::from_facts(Rule::AndElim1, vec![from.clone()]),
				);
				self.derive(
					r.clone(),
					Justification::from_facts(Rule::AndElim2, vec![from.clone()]),
				);
				self.prove(Some(l), to) || self.prove(Some(r), to)
			}
			Formula::Or(l, r) => {
				let (l, r) = (&**l, &**r);
				let left = match self.with_scope(l.clone(), |search| search.prove(Some(l), to)) {
					Some(scope) => scope,
					None => return false,
				};
				let right = match self.with_scope(r.clone(), |search| search.prove(Some(r), to)) {
					Some(scope) => scope,
					None => return false,
				};
				let left = self.fold(left);
				let right = self.fold(right);
				self.derive(to.clone(), Justification::or_elim(from.clone(), left, right));
				true
			}
			Formula::Implies(l, r) => {
				let (l, r) = (&**l, &**r);
				if !self.prove(None, l) {
					return false;
				}
				self.derive(
					r.clone(),
					Justification::from_facts(Rule::ImpliesElim, vec![from.clone(), l.clone()]),
				);
				self.prove(Some(r), to)
			}
			Formula::Not(inner) => {
				if !self.is_known(inner) {
					return false;
				}
				self.derive(
					Formula::Absurdity,
					Justification::from_facts(Rule::NotElim, vec![(**inner).clone(), from.clone()]),
				);
				self.prove(Some(&Formula::Absurdity), to)
			}
			Formula::Absurdity => {
				self.derive(
					to.clone(),
					Justification::from_facts(Rule::AbsurdityElim, vec![Formula::Absurdity]),
				);
				true
			}
			Formula::Atom(_) => false,
		}
	}

	/// Introduction rules building `to`.
	fn compose(&mut self, from: Option<&Formula>, to: &Formula) -> bool {
		match to {
			Formula::And(l, r) => {
				let (l, r) = (&**l, &**r);
				if self.prove(from, l) && self.prove(from, r) {
					self.derive(
						to.clone(),
						Justification::from_facts(Rule::AndIntro, vec![l.clone(), r.clone()]),
					);
					return true;
				}
				false
			}
			Formula::Or(l, r) => {
				let (l, r) = (&**l, &**r);
				if self.prove(from, l) {
					self.derive(
						to.clone(),
						Justification::from_facts(Rule::OrIntro1, vec![l.clone()]),
					);
					return true;
				}
				if self.prove(from, r) {
					self.derive(
						to.clone(),
						Justification::from_facts(Rule::OrIntro2, vec![r.clone()]),
					);
					return true;
				}
				false
			}
			Formula::Implies(l, r) => {
				let (l, r) = (&**l, &**r);
				match self.with_scope(l.clone(), |search| search.prove(Some(l), r)) {
					Some(scope) => {
						let id = self.fold(scope);
						self.derive(
							to.clone(),
							Justification::from_subproofs(Rule::ImpliesIntro, vec![id]),
						);
						true
					}
					None => false,
				}
			}
			Formula::Not(inner) => {
				let inner = &**inner;
				let refuted = self.with_scope(inner.clone(), |search| {
					search.prove(Some(inner), &Formula::Absurdity)
				});
				match refuted {
					Some(scope) => {
						let id = self.fold(scope);
						self.derive(
							to.clone(),
							Justification::from_subproofs(Rule::NotIntro, vec![id]),
						);
						true
					}
					None => false,
				}
			}
			Formula::Atom(_) | Formula::Absurdity => false,
		}
	}

	/// Forward chaining over the known facts when `from` is a literal, then proof by
	/// contradiction for an atomic goal.
	fn last_resort(&mut self, from: Option<&Formula>, to: &Formula) -> bool {
		if let Some(Formula::Atom(_)) | Some(Formula::Not(_)) = from {
			for fact in self.known_facts() {
				match &fact {
					Formula::Implies(a, b) if !self.is_known(b) => {
						if self.prove(None, a) {
							self.derive(
								(**b).clone(),
								Justification::from_facts(
									Rule::ImpliesElim,
									vec![fact.clone(), (**a).clone()],
								),
							);
							if self.prove(Some(&**b), to) {
								return true;
							}
						}
					}
					Formula::Not(a) if self.is_known(a) => {
						self.derive(
							Formula::Absurdity,
							Justification::from_facts(
								Rule::NotElim,
								vec![(**a).clone(), fact.clone()],
							),
						);
						if self.prove(Some(&Formula::Absurdity), to) {
							return true;
						}
					}
					_ => {}
				}
			}
		}

		if !to.is_atom() {
			return false;
		}
		let negated = to.clone().not();
		let refuted = self.with_scope(negated.clone(), |search| {
			search.prove(Some(&negated), &Formula::Absurdity)
		});
		match refuted {
			Some(scope) => {
				let id = self.fold(scope);
				self.derive(
					to.clone(),
					Justification::from_subproofs(Rule::ProofByContradiction, vec![id]),
				);
				true
			}
			None => false,
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::proof_tree::RenderMode;
	use proptest::prelude::*;
	use std::time::{Duration, Instant};

	fn p() -> Formula {
		Formula::atom("p")
	}

	fn q() -> Formula {
		Formula::atom("q")
	}

	fn r() -> Formula {
		Formula::atom("r")
	}

	fn prover(conclusion: Formula, premises: Vec<Formula>) -> SequentProver {
		let mut prover = SequentProver::new();
		prover.set(conclusion, premises);
		prover
	}

	fn provable(conclusion: Formula, premises: Vec<Formula>) -> bool {
		prover(conclusion, premises).has_proof().unwrap()
	}

	// every number cited after the rule name is lower than the line's own number
	fn assert_citations_precede(text: &str) {
		for line in text.lines() {
			let tokens: Vec<&str> = line.split_whitespace().collect();
			let number = match tokens.first().and_then(|t| t.strip_suffix('.')) {
				Some(number) => number.parse::<usize>().unwrap(),
				None => continue,
			};
			if tokens.last() == Some(&"{") {
				continue;
			}
			let cited = tokens
				.iter()
				.rev()
				.map_while(|t| t.parse::<usize>().ok());
			for n in cited {
				assert!(n < number, "line {:?} cites {}", line, n);
			}
		}
	}

	#[test]
	fn test_and_intro() {
		assert!(provable(p().and(q()), vec![p(), q()]));
	}

	#[test]
	fn test_and_elim() {
		assert!(provable(p(), vec![p().and(q())]));
		assert!(provable(q(), vec![p().and(q())]));
	}

	#[test]
	fn test_or_intro() {
		assert!(provable(p().or(q()), vec![p()]));
		assert!(provable(p().or(q()), vec![q()]));
	}

	#[test]
	fn test_or_elim_needs_r() {
		let goal = p().and(r()).or(q().and(r()));
		assert!(!provable(goal.clone(), vec![p().or(q())]));
		assert!(provable(goal.clone(), vec![p().or(q()), r()]));

		let text = prover(goal, vec![p().or(q()), r()])
			.with_config(ProverConfig::default().with_notation(Notation::Ascii))
			.get_proof()
			.unwrap();
		assert!(text.contains(" Ve 1 "));
		assert_citations_precede(&text);
	}

	#[test]
	fn test_implies_elim() {
		assert!(provable(q(), vec![p(), p().implies(q())]));
		assert!(provable(q(), vec![p().implies(q()), p()]));
	}

	#[test]
	fn test_implies_intro() {
		assert!(provable(p().implies(q()), vec![p().and(q())]));
	}

	#[test]
	fn test_not_intro_and_elim() {
		assert!(provable(p().not(), vec![p().implies(p().not())]));
		assert!(provable(q(), vec![p(), p().not()]));
	}

	#[test]
	fn test_ex_falso() {
		assert!(provable(q(), vec![p().and(p().not())]));
		assert!(provable(r().or(q()), vec![Formula::absurdity()]));
	}

	#[test]
	fn test_proof_by_contradiction() {
		assert!(provable(p(), vec![p().not().implies(p())]));
	}

	#[test]
	fn test_theorems_without_premises() {
		assert!(provable(p().implies(p()), vec![]));
		assert!(provable(p().and(q()).implies(q().and(p())), vec![]));
	}

	#[test]
	fn test_unprovable() {
		assert!(!provable(q(), vec![p()]));
		assert!(!provable(p().and(q()), vec![p().or(q())]));
		assert!(!provable(p(), vec![]));
	}

	#[test]
	fn test_missing_conclusion() {
		let mut prover = SequentProver::new();
		prover.set_premises(vec![p()]);
		assert_eq!(prover.has_proof(), Err(ProofError::MissingConclusion));
		assert_eq!(prover.get_proof(), Err(ProofError::MissingConclusion));
	}

	#[test]
	fn test_duplicate_premises() {
		assert!(provable(p().and(q()), vec![p(), p(), q()]));
		let derivation = prover(p(), vec![p(), p()]).search().unwrap();
		assert_eq!(derivation.tree.children().len(), 1);
	}

	#[test]
	fn test_cite_is_idempotent() {
		let config = ProverConfig::default();
		let mut search = Search::new(&config);
		search.main.add_step(p(), Justification::premise());
		let assumed = search.with_scope(q(), |search| {
			search.cite(&p());
			search.cite(&p());
			assert!(search.prove(Some(&q()), &p()));
			search.current_ref().children().len() == 2
		});
		let scope = assumed.unwrap();
		assert_eq!(scope.last_step().map(|s| s.scope), Some(scope.id()));
		assert_eq!(scope.last_step().map(|s| s.rule()), Some(Rule::Premise));
	}

	#[test]
	fn test_depth_limit() {
		let deep = prover(p().implies(q().implies(p())), vec![])
			.with_config(ProverConfig::default().with_max_depth(1));
		assert_eq!(deep.has_proof(), Ok(false));
		// known facts need no search at all
		let known = prover(p(), vec![p()]).with_config(ProverConfig::default().with_max_depth(0));
		assert_eq!(known.has_proof(), Ok(true));
	}

	#[test]
	fn test_get_proof_modus_ponens() {
		let text = prover(q(), vec![p(), p().implies(q())]).get_proof().unwrap();
		let lines: Vec<&str> = text.lines().collect();
		assert_eq!(lines[0], "p, (p → q) ⊢ q");
		assert_eq!(lines[1], "{");
		assert!(lines[2].starts_with("  1. p "));
		assert!(lines[2].ends_with("premise"));
		assert!(lines[3].starts_with("  2. (p → q) "));
		assert!(lines[4].starts_with("  3. q "));
		assert!(lines[4].ends_with(" →e 2 1"));
		assert_eq!(lines.last(), Some(&"}"));
	}

	#[test]
	fn test_get_proof_pbc_layout() {
		let config = ProverConfig::default().with_notation(Notation::Ascii);
		let text = prover(p(), vec![p().not().implies(p())])
			.with_config(config)
			.get_proof()
			.unwrap();
		assert!(text.starts_with("(~p -> p) |- p\n{\n"));
		assert!(text.contains("     }\n"));
		let conclusion = text.lines().rev().nth(1).unwrap();
		assert!(conclusion.trim_start().contains(". p "));
		assert!(conclusion.contains(" pbc "));
		assert_citations_precede(&text);
	}

	#[test]
	fn test_get_proof_html() {
		let config = ProverConfig::default().with_mode(RenderMode::Html);
		let html = prover(q(), vec![p(), p().implies(q())])
			.with_config(config)
			.get_proof()
			.unwrap();
		assert!(!html.contains('\n'));
		assert!(html.starts_with("p,&nbsp;(p&nbsp;→&nbsp;q)&nbsp;⊢&nbsp;q<br/>{<br/>"));
		assert!(html.ends_with("}"));
		assert!(html.contains("<span style='color:#BB44BB'>→e</span>"));
	}

	#[test]
	fn test_partial_proof_still_renders() {
		let prover = prover(q(), vec![p()]);
		let derivation = prover.search().unwrap();
		assert!(!derivation.proved);
		let text = prover.get_proof().unwrap();
		assert!(text.contains("1. p"));
		assert!(!text.contains(". q "));
	}

	#[test]
	fn test_sequent_validity() {
		assert_eq!(Sequent::new(vec![p(), p().implies(q())], q()).is_valid(), Some(true));
		assert_eq!(Sequent::new(vec![p().or(q())], p()).is_valid(), Some(false));
		assert_eq!(Sequent::new(vec![], p().or(p().not())).is_valid(), Some(true));
		assert_eq!(
			Sequent::new(vec![], p().implies(p())).to_string(),
			"|- (p -> p)"
		);
	}

	#[test]
	fn test_validity_of_wide_sequents_is_unknown() {
		let atoms: Vec<Formula> = (0..64).map(|i| Formula::atom(format!("x{}", i))).collect();
		let conclusion = atoms[0].clone();
		assert_eq!(Sequent::new(atoms.clone(), conclusion.clone()).is_valid(), None);
		let narrow = atoms[..MAX_TRUTH_TABLE_ATOMS + 1].to_vec();
		assert_eq!(Sequent::new(narrow, conclusion.clone()).is_valid(), None);
		let few = atoms[..4].to_vec();
		assert_eq!(Sequent::new(few, conclusion).is_valid(), Some(true));
	}

	#[test]
	fn test_step_budget() {
		let config = ProverConfig::default().with_max_steps(1);
		let derivation = prover(p(), vec![p().not().implies(p())])
			.with_config(config)
			.search()
			.unwrap();
		assert!(!derivation.proved);
		assert!(derivation.exhausted);
		assert_eq!(derivation.steps, 1);

		let derivation = prover(p(), vec![p().not().implies(p())]).search().unwrap();
		assert!(derivation.proved);
		assert!(!derivation.exhausted);
	}

	#[test]
	fn test_hard_invalid_sequent_finishes() {
		let sequent: Sequent = "((~q ^ (p V s)) -> (s ^ (p V p))) -> (~(p ^ p) -> ~(s ^ p)), \
			((((s -> p) -> (p V p)) -> ~~q) -> s) |- p V (p V ~r)"
			.parse()
			.unwrap();
		assert_eq!(sequent.is_valid(), Some(false));

		let started = Instant::now();
		let prover = SequentProver::from_sequent(sequent);
		let derivation = prover.search().unwrap();
		assert!(!derivation.proved);
		assert!(derivation.steps <= prover.config().max_steps);
		assert!(started.elapsed() < Duration::from_secs(60));
		assert!(derivation.render(&prover.config().style).is_ok());
	}

	fn arb_formula() -> impl Strategy<Value = Formula> {
		let leaf = prop_oneof![
			Just(p()),
			Just(q()),
			Just(r()),
		];
		leaf.prop_recursive(2, 6, 2, |inner| {
			prop_oneof![
				(inner.clone(), inner.clone()).prop_map(|(a, b)| a.and(b)),
				(inner.clone(), inner.clone()).prop_map(|(a, b)| a.or(b)),
				(inner.clone(), inner.clone()).prop_map(|(a, b)| a.implies(b)),
				inner.prop_map(Formula::not),
			]
		})
	}

	proptest! {
		#![proptest_config(ProptestConfig::with_cases(32))]

		/// Every proof found is semantically valid and cites only earlier lines.
		#[test]
		fn proofs_are_sound(
			premises in proptest::collection::vec(arb_formula(), 1..3),
			conclusion in arb_formula(),
		) {
			let config = ProverConfig::default()
				.with_max_depth(6)
				.with_notation(Notation::Ascii);
			let prover = SequentProver::from_sequent(Sequent::new(premises.clone(), conclusion.clone()))
				.with_config(config);
			let derivation = prover.search().unwrap();
			if derivation.proved {
				prop_assert_eq!(Sequent::new(premises, conclusion).is_valid(), Some(true));
			}
			let text = derivation.render(&prover.config().style);
			prop_assert!(text.is_ok(), "{:?}", text);
			assert_citations_precede(&text.unwrap());
		}
	}

	proptest! {
		#![proptest_config(ProptestConfig::with_cases(16))]

		/// The default configuration stays within its step budget and remains sound.
		#[test]
		fn default_search_is_bounded(
			premises in proptest::collection::vec(arb_formula(), 2..4),
			conclusion in arb_formula(),
		) {
			let prover = SequentProver::from_sequent(Sequent::new(premises.clone(), conclusion.clone()))
				.with_config(ProverConfig::default().with_notation(Notation::Ascii));
			let derivation = prover.search().unwrap();
			prop_assert!(derivation.steps <= prover.config().max_steps);
			if derivation.proved {
				prop_assert_eq!(Sequent::new(premises, conclusion).is_valid(), Some(true));
			}
			let text = derivation.render(&prover.config().style);
			prop_assert!(text.is_ok(), "{:?}", text);
			assert_citations_precede(&text.unwrap());
		}
	}
}
