fn main() {
    if let Err(err) = followgraph::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
