fn main() {
    if let Err(e) = store_uptime::cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
