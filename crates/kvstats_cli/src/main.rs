#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use tracing::Level;

mod cmd;

#[derive(Parser)]
#[command(name = "kvstats", about = "Binary keyed value tree and Steam achievement inspection tools")]
struct Cli {
	/// Log debug diagnostics to stderr.
	#[arg(long, global = true)]
	verbose: bool,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Print a decoded tree.
	Dump(cmd::dump::Args),
	/// Look up one node and show every coercion of it.
	Get(cmd::get::Args),
	/// Resolve achievement completion for an app.
	Check(cmd::check::Args),
}

fn main() {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	if let Err(err) = run(cli.command) {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run(command: Commands) -> kvstats::kv::Result<()> {
	match command {
		Commands::Dump(args) => cmd::dump::run(args),
		Commands::Get(args) => cmd::get::run(args),
		Commands::Check(args) => cmd::check::run(args),
	}
}

fn init_tracing(verbose: bool) {
	let level = if verbose { Level::DEBUG } else { Level::WARN };
	tracing_subscriber::fmt().with_writer(std::io::stderr).with_max_level(level).with_target(false).init();
}
