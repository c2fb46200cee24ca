mod cli;

use colored::Colorize;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        if e.is_missing_root() {
            eprintln!(
                "{}",
                "Check the configured scan root: dj config scan_root <path>".dimmed()
            );
        }
        std::process::exit(1);
    }
}
