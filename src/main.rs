use clap::Parser;
use log::{debug, LevelFilter};

mod args;
mod scr;

fn main() {
    let args = args::Args::parse();

    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if args.verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
    debug!("args: {:?}", args);

    if let Err(e) = scr::run(&args) {
        eprintln!("Error: {}", scr::error_chain(&e));
        std::process::exit(1);
    }
}
