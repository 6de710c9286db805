use std::fmt;

/// Age bucket of a note relative to the expiry threshold.
///
/// `Expired` takes precedence: a note past the threshold is never reported as
/// `ExpiringSoon`, even when the warning window overlaps the expired one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpiryClass {
    Expired,
    ExpiringSoon,
    Active,
}

impl fmt::Display for ExpiryClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpiryClass::Expired => write!(f, "expired"),
            ExpiryClass::ExpiringSoon => write!(f, "expiring soon"),
            ExpiryClass::Active => write!(f, "active"),
        }
    }
}
