//! Panic hook that puts the terminal back before the message is printed.

use super::setup::emergency_restore;
use std::panic;

/// Install the hook. Call early in main(), before [`super::TerminalManager::new`].
///
/// ```no_run
/// gcs::terminal::setup_panic_hook();
/// ```
pub fn setup_panic_hook() {
    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        emergency_restore();
        original_hook(panic_info);
    }));
}
