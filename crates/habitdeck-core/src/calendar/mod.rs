//! Calendar keys and week/month arithmetic.
//!
//! Every day the engine touches is identified by a [`DayKey`] ("YYYY-MM-DD",
//! local time) and every month by a [`MonthKey`] ("YYYY-MM").

mod clock;
mod keys;
mod week;

pub use clock::{today_local, Clock, FixedClock, SystemClock};
pub use keys::{day_key, DayKey, MonthKey};
pub use week::{is_current_week, shift_month, shift_week, week_dates, week_start};
