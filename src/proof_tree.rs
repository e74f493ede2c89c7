use crate::error::{ProofError, ProofResult};
use crate::formula::{Formula, Notation};
use crate::rule::{Justification, Rule, ScopeId};
use std::collections::HashMap;

/// Column at which rule names start in rendered proofs.
pub const COLUMN_SPACING: usize = 40;

const NUMBER_COLOR: &str = "#4499FF";
const RULE_COLOR: &str = "#BB44BB";

/// A single justified line of a proof.
#[derive(Clone, Debug, PartialEq)]
pub struct Step {
	pub formula: Formula,
	pub justification: Justification,
	pub scope: ScopeId,
}

impl Step {
	/// Copy of this step re-cited under another scope.
	pub fn create_similar(&self, scope: ScopeId) -> Step {
		Step {
			formula: self.formula.clone(),
			justification: self.justification.clone(),
			scope,
		}
	}

	pub fn rule(&self) -> Rule {
		self.justification.rule
	}
}

#[derive(Clone, Debug)]
pub enum ProofNode {
	Leaf(Step),
	Scope(ProofTree),
}

/// A scope of a natural-deduction proof: an ordered list of steps and nested sub-proofs.
///
/// The root scope has id [`ScopeId::ROOT`]; sub-proofs carry their own ids so that
/// justifications can cite them.
#[derive(Clone, Debug)]
pub struct ProofTree {
	id: ScopeId,
	children: Vec<ProofNode>,
}

/// Borrowed view of a node, as produced by [`ProofTree::linearize`].
#[derive(Clone, Copy, Debug)]
pub enum NodeRef<'a> {
	Scope(&'a ProofTree),
	Leaf(&'a Step),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKey {
	Leaf(Formula, ScopeId),
	Scope(ScopeId),
}

impl<'a> NodeRef<'a> {
	pub fn key(&self) -> NodeKey {
		match self {
			NodeRef::Scope(tree) => NodeKey::Scope(tree.id),
			NodeRef::Leaf(step) => NodeKey::Leaf(step.formula.clone(), step.scope),
		}
	}
}

/// Line numbers assigned to the nodes of a tree.
#[derive(Clone, Debug, Default)]
pub struct Numbering {
	numbers: HashMap<NodeKey, usize>,
}

impl Numbering {
	pub fn get(&self, key: &NodeKey) -> Option<usize> {
		self.numbers.get(key).copied()
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
	Text,
	Html,
}

impl RenderMode {
	pub fn text(self, text: &str) -> String {
		match self {
			RenderMode::Text => text.to_string(),
			RenderMode::Html => text
				.replace('&', "&amp;")
				.replace('<', "&lt;")
				.replace('>', "&gt;")
				.replace(' ', "&nbsp;"),
		}
	}

	fn number(self, n: usize) -> String {
		match self {
			RenderMode::Text => n.to_string(),
			RenderMode::Html => format!("<span style='color:{}'>{}</span>", NUMBER_COLOR, n),
		}
	}

	fn rule(self, name: &str) -> String {
		match self {
			RenderMode::Text => name.to_string(),
			RenderMode::Html => {
				format!("<span style='color:{}'>{}</span>", RULE_COLOR, self.text(name))
			}
		}
	}

	pub fn newline(self) -> &'static str {
		match self {
			RenderMode::Text => "\n",
			RenderMode::Html => "<br/>",
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderStyle {
	pub mode: RenderMode,
	pub notation: Notation,
	pub column: usize,
}

impl Default for RenderStyle {
	fn default() -> Self {
		RenderStyle {
			mode: RenderMode::Text,
			notation: Notation::Unicode,
			column: COLUMN_SPACING,
		}
	}
}

impl Default for ProofTree {
	fn default() -> Self {
		ProofTree::new_scope(ScopeId::ROOT)
	}
}

impl ProofTree {
	pub fn new() -> ProofTree {
		ProofTree::default()
	}

	pub fn new_scope(id: ScopeId) -> ProofTree {
		ProofTree {
			id,
			children: Vec::new(),
		}
	}

	/// Leaf in the root scope; [`ProofTree::add_proof`] re-stamps it with the receiving scope.
	pub fn new_leaf(formula: Formula, justification: Justification) -> ProofNode {
		ProofNode::Leaf(Step {
			formula,
			justification,
			scope: ScopeId::ROOT,
		})
	}

	pub fn id(&self) -> ScopeId {
		self.id
	}

	pub fn children(&self) -> &[ProofNode] {
		&self.children
	}

	/// Steps proved directly in this scope, excluding nested sub-proofs.
	pub fn steps(&self) -> impl Iterator<Item = &Step> + '_ {
		self.children.iter().filter_map(|child| match child {
			ProofNode::Leaf(step) => Some(step),
			ProofNode::Scope(_) => None,
		})
	}

	pub fn last_step(&self) -> Option<&Step> {
		self.steps().last()
	}

	/// Appends a step unless an equal formula is already anywhere in the tree.
	/// Returns whether the step was appended.
	pub fn add_step(&mut self, formula: Formula, justification: Justification) -> bool {
		if self.contains(&formula) {
			return false;
		}
		self.add_proof(ProofTree::new_leaf(formula, justification));
		true
	}

	pub fn add_proof(&mut self, node: ProofNode) {
		let node = match node {
			ProofNode::Leaf(mut step) => {
				step.scope = self.id;
				ProofNode::Leaf(step)
			}
			scope => scope,
		};
		self.children.push(node);
	}

	/// Whether any leaf in this tree, at any depth, has the given formula.
	pub fn contains(&self, formula: &Formula) -> bool {
		self.children.iter().any(|child| match child {
			ProofNode::Leaf(step) => step.formula == *formula,
			ProofNode::Scope(tree) => tree.contains(formula),
		})
	}

	/// Whether the formula was proved directly in this scope.
	pub fn holds(&self, formula: &Formula) -> bool {
		self.find_step(formula).is_some()
	}

	/// Step of this scope, excluding nested sub-proofs, that proves the formula.
	pub fn find_step(&self, formula: &Formula) -> Option<&Step> {
		self.steps().find(|step| step.formula == *formula)
	}

	/// First leaf in linearization order with the formula, at any depth. Its justification
	/// may cite lines of a sub-proof that is closed at other points of the tree.
	pub fn find_leaf(&self, formula: &Formula) -> Option<&Step> {
		self.linearize().into_iter().find_map(|node| match node {
			NodeRef::Leaf(step) if step.formula == *formula => Some(step),
			_ => None,
		})
	}

	/// Pre-order flattening: a scope comes before its children, so the root is position 0.
	pub fn linearize(&self) -> Vec<NodeRef<'_>> {
		let mut result = Vec::new();
		self.linearize_recurse(&mut result);
		result
	}

	fn linearize_recurse<'a>(&'a self, result: &mut Vec<NodeRef<'a>>) {
		result.push(NodeRef::Scope(self));
		for child in &self.children {
			match child {
				ProofNode::Leaf(step) => result.push(NodeRef::Leaf(step)),
				ProofNode::Scope(tree) => tree.linearize_recurse(result),
			}
		}
	}

	/// Numbers every node in linearization order. A node whose key was already numbered
	/// reuses that number instead of taking a new one.
	pub fn numbering_map(&self) -> Numbering {
		let mut numbers = HashMap::new();
		let mut next = 0;
		for node in self.linearize() {
			numbers.entry(node.key()).or_insert_with(|| {
				next += 1;
				next - 1
			});
		}
		Numbering { numbers }
	}

	/// Renders the children of this scope, one numbered line per step.
	pub fn render(
		&self,
		numbering: &Numbering,
		indent: usize,
		style: &RenderStyle,
	) -> ProofResult<String> {
		let mut out = String::new();
		let mut visible = Vec::new();
		self.render_recurse(&mut out, numbering, indent, style, &mut visible)?;
		Ok(out)
	}

	// `visible` holds the facts that later lines may cite: earlier lines of this scope and
	// of every enclosing scope. A closed sub-proof's lines are dropped when it ends.
	fn render_recurse<'a>(
		&'a self,
		out: &mut String,
		numbering: &Numbering,
		indent: usize,
		style: &RenderStyle,
		visible: &mut Vec<(&'a Formula, usize)>,
	) -> ProofResult<()> {
		let mode = style.mode;
		for child in &self.children {
			match child {
				ProofNode::Leaf(step) => {
					let line = number_of(numbering, step)?;
					out.push_str(&render_step(step, line, numbering, indent, style, visible)?);
					out.push_str(mode.newline());
					visible.push((&step.formula, line));
				}
				ProofNode::Scope(tree) => {
					let line = numbering.get(&NodeKey::Scope(tree.id)).ok_or_else(|| {
						ProofError::Unnumbered {
							node: format!("sub-proof {}", tree.id.0),
						}
					})?;
					out.push_str(&mode.text(&" ".repeat(indent)));
					out.push_str(&mode.number(line));
					out.push_str(&mode.text(". {"));
					out.push_str(mode.newline());
					let depth = visible.len();
					tree.render_recurse(out, numbering, indent + 5, style, visible)?;
					visible.truncate(depth);
					out.push_str(&mode.text(&" ".repeat(indent + 3)));
					out.push_str(&mode.text("}"));
					out.push_str(mode.newline());
				}
			}
		}
		Ok(())
	}
}

fn number_of(numbering: &Numbering, step: &Step) -> ProofResult<usize> {
	numbering
		.get(&NodeKey::Leaf(step.formula.clone(), step.scope))
		.ok_or_else(|| ProofError::Unnumbered {
			node: format!("step {}", step.formula),
		})
}

fn render_step(
	step: &Step,
	line: usize,
	numbering: &Numbering,
	indent: usize,
	style: &RenderStyle,
	visible: &[(&Formula, usize)],
) -> ProofResult<String> {
	let mode = style.mode;
	let rule = step.rule();
	let malformed = |citation: String| ProofError::MalformedJustification {
		line,
		rule,
		citation,
	};

	let mut cited = Vec::new();
	for fact in &step.justification.facts {
		let n = visible
			.iter()
			.rev()
			.find(|(formula, _)| *formula == fact)
			.map(|(_, n)| *n)
			.filter(|n| *n < line)
			.ok_or_else(|| malformed(fact.to_string()))?;
		cited.push(n);
	}
	for scope in &step.justification.subproofs {
		let n = numbering
			.get(&NodeKey::Scope(*scope))
			.filter(|n| *n < line)
			.ok_or_else(|| malformed(format!("sub-proof {}", scope.0)))?;
		cited.push(n);
	}

	let formula = step.formula.render_with(style.notation, None);
	let left = format!("{}{}. {}", " ".repeat(indent), line, formula);
	let padding = style.column.saturating_sub(left.chars().count()).max(1);

	let mut result = mode.text(&" ".repeat(indent));
	result += &mode.number(line);
	result += &mode.text(". ");
	result += &mode.text(&formula);
	result += &mode.text(&" ".repeat(padding));
	result += &mode.rule(rule.name(style.notation));
	for n in cited {
		result += &mode.text(" ");
		result += &mode.number(n);
	}
	Ok(result)
}
