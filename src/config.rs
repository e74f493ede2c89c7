//! Prover configuration.

use crate::formula::Notation;
use crate::proof_tree::{RenderMode, RenderStyle, COLUMN_SPACING};

/// Configuration for the sequent prover.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProverConfig {
	/// Maximum nesting of recursive `prove` calls before a branch is abandoned.
	pub max_depth: usize,
	/// Total number of goals one search may expand. Once spent, every open goal fails.
	pub max_steps: usize,
	/// How `get_proof` renders the tree.
	pub style: RenderStyle,
}

impl Default for ProverConfig {
	fn default() -> Self {
		ProverConfig {
			max_depth: 48,
			max_steps: 20_000,
			style: RenderStyle {
				mode: RenderMode::Text,
				notation: Notation::Unicode,
				column: COLUMN_SPACING,
			},
		}
	}
}

impl ProverConfig {
	pub fn with_max_depth(mut self, max_depth: usize) -> Self {
		self.max_depth = max_depth;
		self
	}

	pub fn with_max_steps(mut self, max_steps: usize) -> Self {
		self.max_steps = max_steps;
		self
	}

	pub fn with_mode(mut self, mode: RenderMode) -> Self {
		self.style.mode = mode;
		self
	}

	pub fn with_notation(mut self, notation: Notation) -> Self {
		self.style.notation = notation;
		self
	}
}
