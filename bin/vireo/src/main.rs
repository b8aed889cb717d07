fn main() {
    if let Err(err) = vireo::cli::run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}
