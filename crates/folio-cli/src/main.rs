//! folio - document export toolkit
//!
//! Converts editor HTML into the registered document formats.
//!
//! ## Quick Start
//!
//! ```bash
//! # List the available formats
//! folio formats
//!
//! # Export a page as rich text
//! folio export --input notes.html --format efgh --title "Notes"
//!
//! # Export two panels side by side
//! folio export -i left.html --secondary right.html -f html
//! ```

mod commands;
mod progress;

fn main() {
    if let Err(err) = commands::run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
