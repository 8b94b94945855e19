//! Buckets a reconciled month by calendar day for display.

use chrono::{Datelike, NaiveDate};

use crate::domain::{MonthKey, PaymentEntry};

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub is_today: bool,
    pub entries: Vec<PaymentEntry>,
}

/// Monday-first month grid.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarMonth {
    pub month: MonthKey,
    /// Empty cells before the 1st in the first week row.
    pub leading_blanks: u32,
    pub days: Vec<CalendarDay>,
    /// Entries filed under this month but dated in another one.
    pub outside_month: Vec<PaymentEntry>,
}

impl CalendarMonth {
    pub fn project(month: MonthKey, entries: &[PaymentEntry], today: NaiveDate) -> Self {
        let mut days: Vec<CalendarDay> = (1..=month.days_in_month())
            .map(|day| {
                let date = month.day_clamped(day);
                CalendarDay {
                    date,
                    is_today: date == today,
                    entries: Vec::new(),
                }
            })
            .collect();

        let mut outside_month = Vec::new();
        for entry in entries {
            if month.contains(entry.payment_date) {
                let index = entry.payment_date.day0() as usize;
                days[index].entries.push(entry.clone());
            } else {
                outside_month.push(entry.clone());
            }
        }

        Self {
            month,
            leading_blanks: month.first_day().weekday().num_days_from_monday(),
            days,
            outside_month,
        }
    }

    pub fn day(&self, day: u32) -> Option<&CalendarDay> {
        let index = usize::try_from(day.checked_sub(1)?).ok()?;
        self.days.get(index)
    }

    /// Rows of seven cells; `None` pads the first and last week.
    pub fn weeks(&self) -> Vec<Vec<Option<&CalendarDay>>> {
        let mut cells: Vec<Option<&CalendarDay>> = Vec::new();
        cells.extend((0..self.leading_blanks).map(|_| None));
        cells.extend(self.days.iter().map(Some));
        while cells.len() % 7 != 0 {
            cells.push(None);
        }
        cells.chunks(7).map(|week| week.to_vec()).collect()
    }

    pub fn entry_count(&self) -> usize {
        self.days.iter().map(|day| day.entries.len()).sum::<usize>() + self.outside_month.len()
    }
}
