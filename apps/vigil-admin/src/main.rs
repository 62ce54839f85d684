use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = vigil_admin::Args::parse();

	vigil_admin::run(args).await
}
