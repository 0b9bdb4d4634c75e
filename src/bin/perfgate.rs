use std::{env, process};

use perfgate::{
    LOG_ENV,
    cli::{CommandLineConfig, execute},
};
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();
    let args: Vec<String> = env::args().collect();
    let arg_refs: Vec<&str> = args.iter().map(|s| s.as_str()).collect();
    let config = match CommandLineConfig::from_args(&arg_refs) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("{err}");
            process::exit(err.exit_code());
        }
    };

    match execute(&config) {
        Ok(run) => {
            print!("{}", run.report);
            process::exit(run.exit_code);
        }
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(err.exit_code());
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
