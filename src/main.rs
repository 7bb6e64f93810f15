// src/main.rs

use tripcheck::{Exit, cli, logging, run};

fn main() {
    match run_main() {
        Ok(Exit::Success) => {}
        Ok(Exit::Rejected) => std::process::exit(2),
        Err(err) => {
            eprintln!("tripcheck error: {err:?}");
            std::process::exit(1);
        }
    }
}

fn run_main() -> anyhow::Result<Exit> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    run(args)
}
