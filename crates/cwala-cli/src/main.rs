mod cli;
mod modes;

fn main() {
    if let Err(err) = cli::run() {
        // Alternate format prints the whole context chain on one line
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}
