use clap::crate_version;
use tokio::runtime;

mod args;
mod config;
mod error;
mod schema;
mod server;
mod telemetry;

const THREAD_NAME: &str = "graphql-http-server";

fn main() -> anyhow::Result<()> {
    let args = args::parse();
    let config = args.config()?;

    let runtime = runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name(THREAD_NAME)
        .build()?;

    runtime.block_on(async move {
        telemetry::init(&args)?;

        let crate_version = crate_version!();
        tracing::info!("GraphQL HTTP server {crate_version}");

        let listen_address = args.listen_address.unwrap_or(config.network.listen_address);

        server::serve(listen_address, config, schema::star_wars()).await?;

        Ok::<(), anyhow::Error>(())
    })?;

    Ok(())
}
