#![allow(missing_docs)]

use clap::{Parser, Subcommand};

mod cmd;

#[derive(Parser)]
#[command(name = "rbxdoc", about = "Roblox model/place file inspection tools")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	Info(cmd::info::Args),
	Tree(cmd::tree::Args),
	Props(cmd::props::Args),
	Meta(cmd::meta::Args),
	Strings(cmd::strings::Args),
	Attrs(cmd::attrs::Args),
}

fn main() {
	tracing_subscriber::fmt().with_writer(std::io::stderr).init();

	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> rbxdoc::rbx::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Info(args) => cmd::info::run(args),
		Commands::Tree(args) => cmd::tree::run(args),
		Commands::Props(args) => cmd::props::run(args),
		Commands::Meta(args) => cmd::meta::run(args),
		Commands::Strings(args) => cmd::strings::run(args),
		Commands::Attrs(args) => cmd::attrs::run(args),
	}
}
