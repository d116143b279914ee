use owo_colors::OwoColorize;
use std::collections::BTreeMap;
use std::io::IsTerminal;

use crate::history::HistoryRecord;
use crate::rent::{AllocationResult, CostBreakdown, Period};

const MONTHS: [&str; 12] = [
    "januari", "februari", "mars", "april", "maj", "juni", "juli", "augusti", "september",
    "oktober", "november", "december",
];

/// Rent is due on this day of the month before the period it pays for
const DUE_DAY: u32 = 27;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Swedish month name, e.g. "februari"
pub fn month_name(month: u32) -> &'static str {
    MONTHS
        .get((month as usize).wrapping_sub(1))
        .copied()
        .unwrap_or("?")
}

/// Abbreviated month name, e.g. "jan"
pub fn short_month_name(month: u32) -> &'static str {
    let name = month_name(month);
    name.get(..3).unwrap_or(name)
}

/// Format an amount in whole kronor: "24530 kr", "-1000 kr"
pub fn format_amount(amount: i64) -> String {
    format!("{} kr", amount)
}

fn cost_lines(costs: &CostBreakdown) -> Vec<(&'static str, i64)> {
    let mut lines = vec![
        ("Kallhyra", costs.kallhyra),
        ("El", costs.el),
        ("Bredband", costs.bredband),
    ];
    if let Some(amount) = costs.drift_rakning {
        lines.push(("Kvartalsfaktura drift", amount));
    }
    if let Some(amount) = costs.vattenavgift {
        lines.push(("Vattenavgift", amount));
    }
    if let Some(amount) = costs.va {
        lines.push(("VA", amount));
    }
    if let Some(amount) = costs.larm {
        lines.push(("Larm", amount));
    }
    lines.push(("Drift total", costs.drift_total));
    if costs.saldo_innan != 0 {
        lines.push(("Saldo innan", -costs.saldo_innan));
    }
    if costs.extra_in != 0 {
        lines.push(("Extra in", -costs.extra_in));
    }
    lines
}

/// Format the full breakdown: cost lines, the total, then one line per roommate
///
/// Roommate lines show days stayed, any room adjustment, and the share.
/// Negative shares (money owed to the roommate) are highlighted.
pub fn format_breakdown(result: &AllocationResult, use_colors: bool) -> String {
    let label_width = 22;
    let amount_width = 10;
    let mut out = Vec::new();

    let title = format!("Hyra {}", result.period);
    out.push(if use_colors {
        title.bold().to_string()
    } else {
        title
    });

    for (label, amount) in cost_lines(&result.costs) {
        let amount = format!("{:>width$}", format_amount(amount), width = amount_width);
        out.push(format!("  {:<label_width$}{}", label, amount));
    }

    let total = format!("{:>width$}", format_amount(result.total_cost), width = amount_width);
    let total_line = format!("  {:<label_width$}{}", "Total", total);
    out.push(if use_colors {
        total_line.bold().to_string()
    } else {
        total_line
    });

    out.push(String::new());

    for detail in &result.details {
        let adjustment = if detail.room_adjustment != 0 {
            format!(" ({:+})", detail.room_adjustment)
        } else {
            String::new()
        };
        let label = format!("{} {}d{}", detail.name, detail.days, adjustment);
        let share = format!("{:>width$}", format_amount(detail.share), width = amount_width);

        let line = if use_colors {
            let share = if detail.share < 0 {
                share.red().to_string()
            } else if detail.days == 0 {
                share.dimmed().to_string()
            } else {
                share.green().to_string()
            };
            format!("  {:<label_width$}{}", label, share)
        } else {
            format!("  {:<label_width$}{}", label, share)
        };
        out.push(line);
    }

    out.join("\n")
}

/// Format shares as tab-separated values for scripting
/// Columns: name, days, room_adjustment, share (no headers, no colors)
pub fn format_tsv(result: &AllocationResult) -> String {
    result
        .details
        .iter()
        .map(|detail| {
            format!(
                "{}\t{}\t{}\t{}",
                detail.name, detail.days, detail.room_adjustment, detail.share
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Join names the Swedish way: "A", "A och B", "A, B och C"
fn join_names(names: &[&str]) -> String {
    match names {
        [] => String::new(),
        [only] => only.to_string(),
        [rest @ .., last] => format!("{} och {}", rest.join(", "), last),
    }
}

/// Household chat message announcing next month's rent.
///
/// Costs for one month are paid ahead for the month after, so a January
/// calculation announces February's rent, due on the 27th of January.
/// Roommates paying the same amount are grouped, highest amount first.
pub fn friendly_message(result: &AllocationResult) -> String {
    let paid_for = result.period.next();
    let header = format!(
        "*Hyran för {} {}* ska betalas innan {} {}",
        month_name(paid_for.month),
        paid_for.year,
        DUE_DAY,
        short_month_name(result.period.month)
    );

    let mut groups: BTreeMap<i64, Vec<&str>> = BTreeMap::new();
    for detail in result.billed() {
        groups.entry(detail.share).or_default().push(detail.name.as_str());
    }

    let body = if groups.len() == 1 {
        let amount = groups.keys().next().copied().unwrap_or(0);
        format!("*{}* för alla", format_amount(amount))
    } else {
        groups
            .iter()
            .rev()
            .map(|(amount, names)| {
                format!("*{}* för {}", format_amount(*amount), join_names(names))
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!("{}\n{}", header, body)
}

/// One line per recorded period: "2024-11  27143 kr  4 roommates"
pub fn format_history(records: &[HistoryRecord], use_colors: bool) -> String {
    if records.is_empty() {
        return "No rent history recorded.".to_string();
    }

    records
        .iter()
        .map(|record| {
            let period = record.period.to_string();
            let total = format!("{:>10}", format_amount(record.result.total_cost));
            let billed = record.result.billed().count();
            let roommates = if billed == 1 {
                "1 roommate".to_string()
            } else {
                format!("{} roommates", billed)
            };
            if use_colors {
                format!("{}  {}  {}", period.cyan(), total.bold(), roommates.dimmed())
            } else {
                format!("{}  {}  {}", period, total, roommates)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Short header for a single recorded month
pub fn format_record_header(period: Period, record: &HistoryRecord) -> String {
    format!(
        "{} (recorded {})",
        period,
        record.recorded_at.format("%Y-%m-%d %H:%M")
    )
}
