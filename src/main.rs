use anyhow::Result;
use clap::Parser;
use keygate::{
    env_file,
    prompt::ConsolePrompt,
    resolve::Resolver,
    runtime::Runtime,
    store::KeyStore,
    verify::{Verifier, DEFAULT_ENDPOINT},
};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "keygate")]
#[command(about = "Resolve, verify and persist an API key", long_about = None)]
struct Args {
    #[arg(long, help = "Dotenv file loaded into the environment", default_value = ".env")]
    env_file: PathBuf,

    #[arg(long, help = "File the verified key is persisted to", default_value = "api.key")]
    key_file: PathBuf,

    #[arg(long, help = "Verification endpoint URL", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    #[arg(long, help = "Verification request timeout in seconds", default_value = "10")]
    timeout_secs: u64,

    #[arg(short, long, help = "Enable debug logging")]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.debug {
        EnvFilter::from_default_env()
            .add_directive("keygate=debug".parse()?)
            .add_directive("info".parse()?)
    } else {
        EnvFilter::from_default_env()
            .add_directive("keygate=info".parse()?)
            .add_directive("warn".parse()?)
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Starting keygate v{}", env!("CARGO_PKG_VERSION"));

    // One-shot environment bootstrap, before anything reads API_KEY
    env_file::load(&args.env_file);

    let runtime = Runtime::new()?;

    match runtime.block_on(async_main(args)) {
        Ok(key) => {
            println!("API key ready ({} characters).", key.len());
            Ok(())
        }
        Err(e) => {
            error!("Could not resolve a valid API key: {}", e);
            std::process::exit(1);
        }
    }
}

async fn async_main(args: Args) -> Result<String> {
    let store = KeyStore::new(args.key_file);
    let verifier = Verifier::new(args.endpoint, Duration::from_secs(args.timeout_secs))?;
    let resolver = Resolver::new(store, verifier);

    let mut prompt = ConsolePrompt;
    let key = resolver.ensure_key(&mut prompt).await?;
    Ok(key)
}
