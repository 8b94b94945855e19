//! The rent ledger engine: obligation generation, reconciliation, and edits.

pub mod calendar;
pub mod classifier;
pub mod clock;
pub mod directory;
pub mod editor;
pub mod generator;
pub mod reconciler;
pub mod summary;

pub use calendar::{CalendarDay, CalendarMonth};
pub use classifier::classify;
pub use clock::{Clock, FixedClock, SystemClock};
pub use directory::{Directory, ResolvedEntry, UNKNOWN_NAME};
pub use editor::LedgerEditor;
pub use generator::{due_date, generate};
pub use reconciler::{reconcile, stored_for_month};
pub use summary::{outstanding_total, MonthSummary, StatusTotals};
