use std::fmt::Write as _;

use colored::{ColoredString, Colorize};

use crate::domain::{Contract, PaymentEntry, PaymentStatus};
use crate::ledger::{CalendarMonth, Directory, MonthSummary, StatusTotals};

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
}

pub fn message(kind: MessageKind, text: impl AsRef<str>) -> String {
    let (label, icon) = match kind {
        MessageKind::Info => ("INFO", "[i]"),
        MessageKind::Success => ("SUCCESS", "[+]"),
        MessageKind::Warning => ("WARNING", "[!]"),
        MessageKind::Error => ("ERROR", "[x]"),
    };
    let line = format!("{label}: {icon} {}", text.as_ref());
    match kind {
        MessageKind::Info => line.normal().to_string(),
        MessageKind::Success => line.green().to_string(),
        MessageKind::Warning => line.yellow().to_string(),
        MessageKind::Error => line.red().bold().to_string(),
    }
}

fn status_badge(status: PaymentStatus) -> ColoredString {
    let label = format!("{:<7}", status.to_string().to_uppercase());
    match status {
        PaymentStatus::Paid => label.green(),
        PaymentStatus::Unpaid => label.red(),
        PaymentStatus::Pending => label.yellow(),
    }
}

fn money(amount: f64, currency: &str) -> String {
    format!("{amount:.2} {currency}")
}

fn entry_line(entry: &PaymentEntry, directory: &Directory, currency: &str) -> String {
    let (tenant, property) = match directory.resolve(entry) {
        Some(resolved) => (resolved.tenant_short, resolved.property),
        None => (String::from("?"), String::from("?")),
    };
    let origin = if entry.generated { "expected" } else { "recorded" };
    let method = entry
        .method
        .map(|method| method.to_string())
        .unwrap_or_else(|| "-".into());
    format!(
        "{} {} {:<12} {:<20} {:>16}  {:<8} {:<13} {}",
        entry.payment_date.format("%d %a"),
        status_badge(entry.status),
        tenant,
        property,
        money(entry.amount, currency),
        origin,
        method,
        entry.id.to_string().dimmed()
    )
}

/// Month grid followed by one line per entry.
pub fn render_month(calendar: &CalendarMonth, directory: &Directory, currency: &str) -> String {
    let mut out = String::new();
    let title = calendar.month.first_day().format("%B %Y").to_string();
    let _ = writeln!(out, "{} ({})", title.bold(), calendar.month);
    let _ = writeln!(out, " Mo  Tu  We  Th  Fr  Sa  Su");
    for week in calendar.weeks() {
        let mut row = String::new();
        for cell in week {
            let text = match cell {
                None => String::from("    "),
                Some(day) => {
                    let marker = if day.entries.is_empty() { ' ' } else { '*' };
                    let number = format!("{:>3}{marker}", day.date.format("%-d"));
                    if day.is_today {
                        number.reversed().to_string()
                    } else {
                        number
                    }
                }
            };
            row.push_str(&text);
        }
        let _ = writeln!(out, "{}", row.trim_end());
    }
    let _ = writeln!(out);

    if calendar.entry_count() == 0 {
        let _ = writeln!(out, "No rent due or recorded this month.");
        return out;
    }
    for day in &calendar.days {
        for entry in &day.entries {
            let _ = writeln!(out, "{}", entry_line(entry, directory, currency));
        }
    }
    if !calendar.outside_month.is_empty() {
        let _ = writeln!(out, "Filed under {} but dated elsewhere:", calendar.month);
        for entry in &calendar.outside_month {
            let _ = writeln!(out, "{}", entry_line(entry, directory, currency));
        }
    }
    out
}

fn totals_line(label: &str, totals: StatusTotals, currency: &str) -> String {
    format!(
        "{label:<10} {:>16}  ({} entr{})",
        money(totals.amount, currency),
        totals.count,
        if totals.count == 1 { "y" } else { "ies" }
    )
}

pub fn render_summary(summary: &MonthSummary, outstanding: f64, currency: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", format!("Summary for {}", summary.month).bold());
    let _ = writeln!(out, "{}", totals_line("Collected", summary.collected, currency));
    let _ = writeln!(out, "{}", totals_line("Unpaid", summary.unpaid, currency));
    let _ = writeln!(out, "{}", totals_line("Pending", summary.pending, currency));
    let _ = writeln!(out, "Active contracts: {}", summary.active_contracts);
    let _ = writeln!(
        out,
        "Recorded arrears (all months): {}",
        money(outstanding, currency)
    );
    out
}

pub fn render_contracts(directory: &Directory, contracts: &[Contract], currency: &str) -> String {
    let mut out = String::new();
    if contracts.is_empty() {
        let _ = writeln!(out, "{}", message(MessageKind::Info, "No contracts found."));
        return out;
    }
    for contract in contracts {
        let _ = writeln!(
            out,
            "{}  {:<40} {:>16}  from {}  [{:?}]",
            contract.id,
            directory.contract_label(contract),
            money(contract.monthly_rent, currency),
            contract.start_date,
            contract.status
        );
    }
    out
}
