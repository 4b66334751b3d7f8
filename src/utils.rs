use std::io::{self, BufRead, IsTerminal};

use rand::Rng;
use uuid::Uuid;

use crate::types::TicketId;

/// Prefix shared by every ticket id.
pub const TICKET_ID_PREFIX: &str = "tkt";

/// Generate a random hex hash of the specified length
pub fn generate_hash(length: usize) -> String {
    // Each byte produces 2 hex characters, so we need ceil(length / 2) bytes
    let num_bytes = length.div_ceil(2);
    let mut buf = vec![0u8; num_bytes];
    rand::rng().fill(&mut buf[..]);
    let hex: String = buf.iter().map(|b| format!("{b:02x}")).collect();
    hex[..length].to_string()
}

/// Generate a ticket id such as `tkt-3fa9c1`. Callers check for collisions.
pub fn generate_ticket_id() -> TicketId {
    TicketId::new_unchecked(format!("{TICKET_ID_PREFIX}-{}", generate_hash(6)))
}

/// Generate a UUID v4 for a comment
pub fn generate_comment_id() -> String {
    Uuid::new_v4().to_string()
}

/// Take the first `max_chars` characters of a string, respecting
/// multi-byte boundaries.
pub fn take_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Truncate a string to a maximum length, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        format!("{}...", take_chars(s, max_len - 3))
    }
}

/// Read all input from stdin (for piped input)
pub fn read_stdin() -> io::Result<String> {
    let stdin = io::stdin();
    let mut lines = Vec::new();
    for line in stdin.lock().lines() {
        lines.push(line?);
    }
    Ok(lines.join("\n").trim().to_string())
}

/// Check if stdin is a TTY (interactive)
pub fn is_stdin_tty() -> bool {
    io::stdin().is_terminal()
}
