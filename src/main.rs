use bitcheckers::repl;

fn main() {
    println!("BitBoard Checkers - two-player (local) game");
    println!("===========================================\n");
    println!("P1 (red) moves UP; P2 (black) moves DOWN.");
    println!("Single jumps supported; captures are never forced.");
    println!("Bit indices (0..63) are shown to the right of the board.\n");
    repl::show_help();

    if let Err(e) = repl::run() {
        eprintln!("terminal error: {e}");
        std::process::exit(1);
    }
}
