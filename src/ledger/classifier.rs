use chrono::NaiveDate;

use crate::domain::PaymentStatus;

/// Status of an obligation that has no recorded payment yet.
///
/// Overdue once `today` is strictly past the due date; the due date itself
/// still counts as pending. Stored records keep whatever status the user set.
pub fn classify(due_date: NaiveDate, today: NaiveDate) -> PaymentStatus {
    if today > due_date {
        PaymentStatus::Unpaid
    } else {
        PaymentStatus::Pending
    }
}
