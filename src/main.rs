//! Cepstra CLI entry point.

#![allow(clippy::print_stderr)]

fn main() {
    if let Err(e) = cepstra::run() {
        eprintln!("error: {}", cepstra::error::error_chain(&e));
        std::process::exit(1);
    }
}
