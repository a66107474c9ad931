fn main() {
    if let Err(err) = note_taker::entry() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
