mod app_settings;
mod hours;
mod session;

pub use app_settings::AppSettings;
pub use hours::{CumulativeHours, ProgressError};
pub use session::{DateError, SessionDate, SessionError, SessionId, SessionRecord};
