use std::io::{self, Write};

use base64::Engine;

/// Copy text to the system clipboard via the OSC 52 escape sequence.
/// Supported by most modern terminals; unsupported ones ignore it silently.
pub fn osc52_copy(out: &mut impl Write, text: &str) -> io::Result<()> {
    out.write_all(osc52_sequence(text).as_bytes())?;
    out.flush()
}

fn osc52_sequence(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x07")
}
