use std::path::PathBuf;

/// Returns the root helpdesk data directory path.
///
/// Resolution order:
/// 1. `HELPDESK_ROOT` environment variable (if set)
/// 2. Current working directory + `.helpdesk`
pub fn helpdesk_root() -> PathBuf {
    if let Ok(root) = std::env::var("HELPDESK_ROOT") {
        PathBuf::from(root)
    } else {
        PathBuf::from(".helpdesk")
    }
}
