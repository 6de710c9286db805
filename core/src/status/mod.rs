//! The "expiring soon" status label.

use crate::scanner::classify;
use crate::types::note::notes_noun;
use crate::types::{ExpiryClass, ExpiryDays, NoteFile};
use std::time::SystemTime;

/// Lookahead before the expiry threshold used for the warning.
pub const EXPIRING_SOON_HORIZON_DAYS: u32 = 3;

/// Counts notes inside the warning window that are not already expired.
pub fn count_expiring_soon(
    candidates: &[NoteFile],
    now: SystemTime,
    expiry_days: ExpiryDays,
    horizon_days: u32,
) -> usize {
    candidates
        .iter()
        .filter(|note| {
            classify(note, now, expiry_days, horizon_days) == ExpiryClass::ExpiringSoon
        })
        .count()
}

/// `N notes expiring soon`, or `None` to clear the label.
pub fn label(count: usize) -> Option<String> {
    (count > 0).then(|| format!("{count} {} expiring soon", notes_noun(count)))
}
