//! Natural-deduction prover for propositional logic.
//!
//! ```
//! use mynatded::{Sequent, SequentProver};
//!
//! let sequent: Sequent = "p, p -> q |- q".parse().unwrap();
//! let prover = SequentProver::from_sequent(sequent);
//! assert_eq!(prover.has_proof(), Ok(true));
//! ```

pub mod config;
pub mod error;
pub mod formula;
pub mod parser;
pub mod proof_tree;
pub mod prover;
pub mod rule;

pub use config::ProverConfig;
pub use error::{EvalError, ParseError, ProofError};
pub use formula::{Formula, Notation};
pub use parser::{parse, parse_sequent};
pub use proof_tree::{ProofTree, RenderMode, RenderStyle};
pub use prover::{Derivation, Sequent, SequentProver};
pub use rule::{Justification, Rule, ScopeId};
