use clap::Parser;
use instance_flavor_check::cli::{
    handle_cache_show, handle_check, handle_completions, handle_config_init,
    load_config_with_overrides, CacheCommands, Cli, Commands, ConfigCommands,
};
use instance_flavor_check::logging::init_tracing;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    match run(&cli).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Dispatch the command and return the process exit code.
async fn run(cli: &Cli) -> anyhow::Result<i32> {
    match cli.command.clone().unwrap_or_default() {
        Commands::Check(args) => {
            let config = load_config_with_overrides(cli, args.cache_path.as_deref())?;
            if let Err(e) = init_tracing(&config.logging) {
                eprintln!("Warning: Failed to initialise logging: {}", e);
            }
            handle_check(&args, &config).await
        }
        Commands::Cache(CacheCommands::Show(args)) => {
            let config = load_config_with_overrides(cli, args.cache_path.as_deref())?;
            if let Err(e) = init_tracing(&config.logging) {
                eprintln!("Warning: Failed to initialise logging: {}", e);
            }
            println!("{}", handle_cache_show(&args, &config)?);
            Ok(0)
        }
        Commands::Config(ConfigCommands::Init(args)) => {
            handle_config_init(&args)?;
            Ok(0)
        }
        Commands::Completions(args) => {
            handle_completions(&args);
            Ok(0)
        }
    }
}
