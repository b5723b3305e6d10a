use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = idealink_api::Args::parse();

	idealink_api::run(args).await
}
