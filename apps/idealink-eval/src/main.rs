// crates.io
use clap::Parser;
// self
use idealink_eval::Args;

fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = Args::parse();

	idealink_eval::run(args)
}
