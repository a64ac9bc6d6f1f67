//! Interactive two-player command loop.
//!
//! Owns the [`GameState`] and drives the core through its public surface:
//! validate-and-apply via `make_move`, terminal detection via `winner`, and
//! the save/load codec. All terminal I/O lives here; the core never prints.

use crate::game::{GameState, Move};
use crate::save::{load_game, save_game};
use std::io::{self, BufRead, Write};

pub fn show_help() {
    println!("Commands:");
    println!("  move:  <from> <to>    e.g., 12 21 (also 12-21, 12->21, 12,21)");
    println!("  save <file>           save current game state to file");
    println!("  load <file>           load game state from file");
    println!("  help                  show this help");
    println!("  quit                  exit the game");
}

/// Runs the game loop until a player wins, input ends, or `quit`.
pub fn run() -> io::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut game = GameState::new();

    loop {
        println!("\n{}", game.display_board());
        println!("{}", game.display_counts());

        if let Some(winner) = game.winner() {
            println!("\n*** {winner} wins! ***");
            break;
        }

        print!("Player {}> ", game.current_player().number());
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let lowered = line.to_ascii_lowercase();
        if lowered == "quit" {
            println!("Goodbye!");
            break;
        }
        if lowered == "help" {
            show_help();
            continue;
        }
        if let Some(arg) = command_arg(line, "save") {
            match arg {
                None => println!("Usage: save <filename>"),
                Some(path) => match save_game(&game, path) {
                    Ok(()) => println!("Saved to '{path}'."),
                    Err(e) => println!("Save failed for '{path}': {e}"),
                },
            }
            continue;
        }
        if let Some(arg) = command_arg(line, "load") {
            match arg {
                None => println!("Usage: load <filename>"),
                Some(path) => match load_game(path) {
                    Ok(loaded) => {
                        if !loaded.on_dark_squares() {
                            eprintln!(
                                "Warning: save contained pieces on light squares; continuing anyway."
                            );
                        }
                        game = loaded;
                        println!("Loaded from '{path}'.");
                    }
                    // Refused loads leave the game in progress untouched.
                    Err(e) => println!("Load failed for '{path}': {e}"),
                },
            }
            continue;
        }

        let mv: Move = match line.parse() {
            Ok(mv) => mv,
            Err(e) => {
                println!("Could not parse command ({e}). Try: 12 21   or   save state.json");
                continue;
            }
        };

        if let Err(e) = game.make_move(mv) {
            println!("Illegal move {mv}: {e}");
        }
    }

    Ok(())
}

/// Splits `"save foo.json"` into the command word and its argument.
/// Returns `None` when `line` is not this command at all, `Some(None)` when
/// the argument is missing.
fn command_arg<'a>(line: &'a str, command: &str) -> Option<Option<&'a str>> {
    let mut words = line.splitn(2, char::is_whitespace);
    let first = words.next()?;
    if !first.eq_ignore_ascii_case(command) {
        return None;
    }
    match words.next().map(str::trim) {
        Some(arg) if !arg.is_empty() => Some(Some(arg)),
        _ => Some(None),
    }
}
