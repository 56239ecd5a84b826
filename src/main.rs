fn main() {
    if let Err(e) = quickreply::cli::main() {
        eprintln!("❌ Error: {e}");
        std::process::exit(1);
    }
}
