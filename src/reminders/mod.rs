//! Scheduled payment reminders.
//!
//! A reminder batch reads every recurring record from a [`RecordRepository`],
//! resolves each record's next business-day due date and reports the ones
//! falling within the next few days, together with a plain-text digest.

mod digest;
mod repository;
mod upcoming;

pub use digest::{format_currency, render_digest};
pub use repository::{InMemoryRepository, RecordRepository};
pub use upcoming::{
    DEFAULT_REMINDER_DAYS, ReminderBatch, ReminderWindow, SkippedRecord, UpcomingPayment,
    collect_upcoming, run_reminder_batch,
};
