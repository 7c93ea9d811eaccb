//! Plain-text rendering of a reminder batch.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::RecordKind;

use super::{ReminderBatch, UpcomingPayment};

/// Formats an amount as pounds sterling with thousands separators.
///
/// Amounts are rounded half away from zero to whole pence.
///
/// # Example
///
/// ```
/// use cashflow_engine::reminders::format_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_currency(Decimal::new(123456, 2)), "£1,234.56");
/// assert_eq!(format_currency(Decimal::new(-5, 1)), "-£0.50");
/// ```
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };

    let text = format!("{:.2}", rounded.abs());
    let (whole, pence) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{}£{}.{}", sign, grouped, pence)
}

fn format_date(date: NaiveDate) -> String {
    date.format("%a %-d %b %Y").to_string()
}

fn describe_days(days_until: i64) -> String {
    match days_until {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        days => format!("in {} days", days),
    }
}

fn kind_label(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Income => "income",
        RecordKind::Expense => "expense",
        RecordKind::Debt => "debt",
    }
}

fn render_payment(lines: &mut Vec<String>, payment: &UpcomingPayment) {
    let mut line = format!(
        "- {}: {} {} due {} ({})",
        payment.name,
        format_currency(payment.amount),
        kind_label(payment.kind),
        format_date(payment.due_date),
        describe_days(payment.days_until),
    );
    if payment.base_date != payment.due_date {
        line.push_str(&format!(", moved from {}", format_date(payment.base_date)));
    }
    lines.push(line);

    if let Some(balance) = payment.remaining_balance {
        let mut line = format!("  Remaining balance {}", format_currency(balance));
        if let Some(months) = payment.months_remaining {
            line.push_str(&format!(
                ", about {} month{} at {}/month",
                months,
                if months == 1 { "" } else { "s" },
                format_currency(payment.monthly_equivalent),
            ));
        }
        lines.push(line);
    }
}

/// Renders the batch as a plain-text digest suitable for an email body.
///
/// Every line, including the last, ends with a newline.
pub fn render_digest(batch: &ReminderBatch) -> String {
    let mut lines = Vec::new();

    if batch.upcoming.is_empty() {
        lines.push(format!(
            "No payments due in the next {} days from {}.",
            batch.window.days_ahead,
            format_date(batch.today)
        ));
    } else {
        lines.push(format!("Upcoming payments from {}:", format_date(batch.today)));
        lines.push(String::new());
        for payment in &batch.upcoming {
            render_payment(&mut lines, payment);
        }
    }

    if !batch.skipped.is_empty() {
        lines.push(String::new());
        lines.push("Could not schedule:".to_string());
        for skipped in &batch.skipped {
            lines.push(format!("- {}: {}", skipped.name, skipped.reason));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
