// src/main.rs
fn main() {
    if let Err(e) = ticket_watch::cli::run() {
        eprintln!("Error: {e:?}");
        std::process::exit(1);
    }
}
