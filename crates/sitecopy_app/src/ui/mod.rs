pub mod render;

use std::io::{self, Write};

/// Prints one rendered frame. Rendering itself is pure; this is the only
/// place the terminal is touched.
pub fn print(lines: &[String]) {
    let mut out = io::stdout().lock();
    for line in lines {
        let _ = writeln!(out, "{line}");
    }
    let _ = writeln!(out);
}
