use crate::app::state::App;
use crate::domain::AqiCategory;
use std::io::Write;
use std::time::{Duration, Instant};

/// How long the screen border stays highlighted after an alert.
const FLASH_DURATION: Duration = Duration::from_millis(600);

/// Fires the audible and visual alert side effects for an alert-worthy
/// category. Both are best effort; a failed bell write is ignored.
pub fn maybe_alert(app: &mut App, category: AqiCategory) {
    if !app.config.alerts_enabled || !category.is_alert_worthy() {
        return;
    }

    ring_bell();
    app.alert_flash_until = Some(Instant::now() + FLASH_DURATION);
    app.status_message = category.banner_message().to_string();
}

fn ring_bell() {
    let mut stdout = std::io::stdout();
    let _ = stdout.write_all(b"\x07");
    let _ = stdout.flush();
}
