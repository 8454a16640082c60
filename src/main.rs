// src/main.rs

use wf::{cli, logging, run};

fn main() {
    let args = cli::parse();

    if args.version {
        println!("{}", cli::version_line());
        return;
    }

    if let Err(err) = logging::init_logging(args.log_level, args.verbose) {
        eprintln!("wf error: {err:?}");
        std::process::exit(1);
    }

    match run(args) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("wf error: {err}");
            std::process::exit(err.exit_code());
        }
    }
}
