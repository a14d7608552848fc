//! Deduplicated engine warnings.
//!
//! Layout code can hit the same questionable input many times while a
//! document is being styled. Each distinct warning is logged once per
//! session; call [`clear_warnings`] when starting on a new document.

use std::collections::HashSet;
use std::sync::Mutex;

/// Global set of warnings we've already emitted (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Log a warning for `component` once per unique message.
///
/// Returns `true` if the warning was emitted by this call and `false` if the
/// same message had already been reported.
///
/// # Example
/// ```
/// use folio_common::warning::warn_once;
///
/// let first = warn_once("box", "derived width clamped to 0");
/// let again = warn_once("box", "derived width clamped to 0");
/// assert!(first && !again);
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");

    // Poisoning leaves the set intact.
    let mut guard = WARNED
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    let first = guard.get_or_insert_with(HashSet::new).insert(key);

    if first {
        log::warn!(target: "folio", "[{component}] {message}");
    }
    first
}

/// Clear all recorded warnings (call when starting on a new document)
pub fn clear_warnings() {
    let mut guard = WARNED
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
