use clap::Parser;
use log::error;

mod cli;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = cli::Args::parse();

    if !args.input.exists() {
        error!("The specified input does not exist: {:?}", args.input);
        std::process::exit(1);
    }

    if let Err(e) = cli::run(&args) {
        error!("Evaluation failed: {:#}", e);
        std::process::exit(1);
    }
}
