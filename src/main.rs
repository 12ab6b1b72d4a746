use spa_router::{cli::run_cli, logging::init_logging};

fn main() {
    if let Err(err) = init_logging() {
        eprintln!("warning: logging not initialised: {err:#}");
    }
    if let Err(err) = run_cli() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
