//! Widget support: the snapshot handed to an out-of-process consumer and the
//! refresh schedule derived from it.

mod refresh;
mod snapshot;

pub use refresh::{refresh_schedule, ScheduleEntry, MAX_SCHEDULE_LEN};
pub use snapshot::{load_snapshot, write_snapshot, FastInfo, WidgetSnapshot};
