use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

/// Swappable source of "now".
///
/// The server reads the real system clock by default. Tests inject a fixed
/// instant so DST-boundary and relative-expression behavior is reproducible.
/// A clock belongs to one `TimeServer` instance and is chosen at
/// construction; there is no process-wide global to toggle.
#[derive(Clone)]
pub struct Clock(Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>);

impl Clock {
    /// Clock backed by the real system time, read fresh on every call.
    pub fn system() -> Self {
        Self(Arc::new(Utc::now))
    }

    /// Clock that always returns `instant`, regardless of call count.
    pub fn fixed(instant: DateTime<Utc>) -> Self {
        Self(Arc::new(move || instant))
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.0)()
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::system()
    }
}

impl fmt::Debug for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Clock(..)")
    }
}
