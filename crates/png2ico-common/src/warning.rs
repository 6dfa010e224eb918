//! Conversion warnings with colored terminal output.
//!
//! Warnings are deduplicated so that packing many images with the same
//! lossy property reports it once.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// ANSI color codes for terminal output
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about a lossy or surprising conversion (prints once per unique message).
///
/// # Example
/// ```
/// use png2ico_common::warning::warn_once;
///
/// warn_once("ICO", "300x300 does not fit a directory byte; stored as 0");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = warning_key(component, message);
    let should_print = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_print {
        eprintln!("{YELLOW}[png2ico {component}] ⚠ {message}{RESET}");
    }
}

/// Whether `message` has already been reported for `component`.
#[must_use]
pub fn has_warned(component: &str, message: &str) -> bool {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .is_some_and(|set| set.contains(&warning_key(component, message)))
}

fn warning_key(component: &str, message: &str) -> String {
    format!("[{component}] {message}")
}

/// Forget every recorded warning so the next occurrence prints again.
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test so that `clear_warnings` never races another test's lookups.
    #[test]
    fn test_warn_once_records_until_cleared() {
        let message = "256x256 stored as 0";
        assert!(!has_warned("test", message));

        warn_once("test", message);
        warn_once("test", message);
        assert!(has_warned("test", message));
        assert!(!has_warned("test-other", message));

        clear_warnings();
        assert!(!has_warned("test", message));
    }
}
