use clap::Parser;
use mynatded::{Notation, ProverConfig, RenderMode, Sequent, SequentProver};
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Search for a natural-deduction proof of a propositional sequent.
#[derive(Parser, Debug)]
#[command(name = "mynatded", version)]
struct Cli {
	/// Sequent to prove, e.g. "p, p -> q |- q"
	sequent: String,

	/// Render the proof as HTML
	#[arg(long)]
	html: bool,

	/// Use ASCII connectives instead of Unicode
	#[arg(long)]
	ascii: bool,

	/// Abandon search branches nested deeper than this
	#[arg(long, value_name = "N")]
	max_depth: Option<usize>,

	/// Give up after expanding this many goals
	#[arg(long, value_name = "N")]
	max_steps: Option<usize>,

	/// Only report whether a proof was found
	#[arg(long)]
	check: bool,
}

impl Cli {
	fn config(&self) -> ProverConfig {
		let mut config = ProverConfig::default();
		if let Some(max_depth) = self.max_depth {
			config = config.with_max_depth(max_depth);
		}
		if let Some(max_steps) = self.max_steps {
			config = config.with_max_steps(max_steps);
		}
		if self.html {
			config = config.with_mode(RenderMode::Html);
		}
		if self.ascii {
			config = config.with_notation(Notation::Ascii);
		}
		config
	}
}

fn disp(sequent: Sequent, cli: &Cli) -> Result<bool, String> {
	let prover = SequentProver::from_sequent(sequent.clone()).with_config(cli.config());
	let derivation = prover.search().map_err(|e| e.to_string())?;
	if cli.check {
		println!("{}", if derivation.proved { "provable" } else { "not provable" });
	} else {
		println!("{}", prover.render(&derivation).map_err(|e| e.to_string())?);
	}
	if derivation.exhausted {
		eprintln!("search stopped after {} steps", derivation.steps);
	}
	if !derivation.proved {
		match sequent.is_valid() {
			Some(true) => eprintln!("no proof found; the sequent is valid by truth table"),
			Some(false) => eprintln!("no proof found; the sequent is not valid by truth table"),
			None => eprintln!("no proof found; too many atoms for a truth table"),
		}
	}
	Ok(derivation.proved)
}

fn main() -> ExitCode {
	tracing_subscriber::registry()
		.with(fmt::layer().with_writer(std::io::stderr).without_time())
		.with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
		.init();

	let cli = Cli::parse();
	let sequent: Sequent = match cli.sequent.parse() {
		Ok(sequent) => sequent,
		Err(e) => {
			eprintln!("{}: {}", cli.sequent, e);
			return ExitCode::FAILURE;
		}
	};
	match disp(sequent, &cli) {
		Ok(true) => ExitCode::SUCCESS,
		Ok(false) => ExitCode::FAILURE,
		Err(e) => {
			eprintln!("{}", e);
			ExitCode::FAILURE
		}
	}
}
