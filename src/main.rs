use std::io::{self, Write};
use std::process;

mod cli;
mod tools;
mod utils;


fn main() {
    pretty_env_logger::init();
    let matches = cli::build_cli().get_matches();
    if let Err(err) = cli::run(matches) {
        let _ = writeln!(io::stderr(), "error: {}", err);
        process::exit(1);
    }
    process::exit(0);
}
