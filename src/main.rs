fn main() {
    if let Err(err) = askbox::cli::main() {
        eprintln!("❌ Error: {err}");
        std::process::exit(1);
    }
}
