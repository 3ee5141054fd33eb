use memetica::cli::Cli;

fn main() {
    Cli::run();
}
