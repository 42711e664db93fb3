//! Text and CSV rendering of projection results
//!
//! Money is shown in millions (`$1.6M`), rates as percent (`14.1%`) and
//! multiples with an `x` suffix.

use crate::projection::{EntryExitMetrics, ProjectionResult, ProjectionSeries};
use crate::sensitivity::SensitivityRow;
use crate::assumptions::MILLION;
use std::io::{self, Write};

pub fn format_millions(value: f64) -> String {
    format!("${:.1}M", value / MILLION)
}

/// `value` is already a percentage
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

pub fn format_multiple(value: f64) -> String {
    format!("{:.1}x", value)
}

fn both(
    entry: &EntryExitMetrics,
    exit: &EntryExitMetrics,
    f: impl Fn(&EntryExitMetrics) -> String,
) -> (String, String) {
    (f(entry), f(exit))
}

fn metric_line<W: Write>(out: &mut W, name: &str, entry: &str, exit: &str) -> io::Result<()> {
    writeln!(out, "{:<20} {:>12} {:>12}", name, entry, exit)
}

/// Entry vs exit table in three sections: Financials, Valuation, Return
pub fn render_metrics<W: Write>(out: &mut W, result: &ProjectionResult) -> io::Result<()> {
    let entry = &result.entry;
    let exit = &result.exit;
    let returns = &result.returns;

    let financials = [
        ("Revenue", both(entry, exit, |m| format_millions(m.revenue))),
        ("EBITDA", both(entry, exit, |m| format_millions(m.ebitda))),
        ("EBITDA Margin", both(entry, exit, |m| format_percent(m.ebitda_margin * 100.0))),
    ];
    let valuation = [
        ("EV", both(entry, exit, |m| format_millions(m.enterprise_value))),
        ("EV/Revenue", both(entry, exit, |m| format_multiple(m.ev_to_revenue))),
        ("EV/EBITDA", both(entry, exit, |m| format_multiple(m.ev_to_ebitda))),
        ("Net Debt", both(entry, exit, |m| format_millions(m.net_debt))),
        ("Equity", both(entry, exit, |m| format_millions(m.equity))),
        ("Transaction Fees", both(entry, exit, |m| format_millions(m.transaction_fees))),
    ];
    // Return metrics span the whole holding period
    let over_period = |value: String| ("-".to_string(), value);
    let returns_section = [
        ("Return Multiple", over_period(format_multiple(returns.return_multiple))),
        ("IRR", over_period(format_percent(returns.irr))),
        ("Revenue CAGR", over_period(format_percent(returns.revenue_cagr))),
        ("EBITDA CAGR", over_period(format_percent(returns.ebitda_cagr))),
        ("Revenue Growth", over_period(format_millions(returns.revenue_growth_abs))),
        ("EBITDA Growth", over_period(format_millions(returns.ebitda_growth_abs))),
    ];

    for (title, rows) in [
        ("Financials", &financials[..]),
        ("Valuation", &valuation[..]),
        ("Return", &returns_section[..]),
    ] {
        writeln!(out, "### {}", title)?;
        metric_line(out, "Metric", "Entry", "Exit")?;
        writeln!(out, "{}", "-".repeat(46))?;
        for (name, (entry_value, exit_value)) in rows {
            metric_line(out, name, entry_value, exit_value)?;
        }
        writeln!(out)?;
    }

    Ok(())
}

/// Year-by-year revenue, EBITDA and margin
pub fn render_series<W: Write>(out: &mut W, series: &ProjectionSeries) -> io::Result<()> {
    writeln!(out, "{:>4} {:>12} {:>12} {:>8}", "Year", "Revenue", "EBITDA", "Margin")?;
    writeln!(out, "{}", "-".repeat(39))?;
    for point in series.iter() {
        writeln!(
            out,
            "{:>4} {:>12} {:>12} {:>8}",
            point.year(),
            format_millions(point.revenue()),
            format_millions(point.ebitda()),
            format_percent(point.ebitda_margin() * 100.0),
        )?;
    }
    Ok(())
}

/// Scenario table; undefined IRR is shown as `n/a`
pub fn render_sensitivity<W: Write>(out: &mut W, rows: &[SensitivityRow]) -> io::Result<()> {
    writeln!(
        out,
        "{:>14} {:>13} {:>13} {:>15} {:>8}",
        "Revenue Growth", "EBITDA Margin", "Exit Multiple", "Return Multiple", "IRR"
    )?;
    writeln!(out, "{}", "-".repeat(67))?;
    for row in rows {
        let irr = row.irr.map(format_percent).unwrap_or_else(|| "n/a".to_string());
        writeln!(
            out,
            "{:>14} {:>13} {:>13} {:>15} {:>8}",
            format_percent(row.revenue_growth * 100.0),
            format_percent(row.ebitda_margin * 100.0),
            format_multiple(row.exit_multiple),
            format!("{:.2}x", row.return_multiple),
            irr,
        )?;
    }
    Ok(())
}

/// One CSV row per projected year (margin as a fraction)
pub fn write_series_csv<W: Write>(writer: W, series: &ProjectionSeries) -> Result<(), csv::Error> {
    let mut csv = csv::Writer::from_writer(writer);
    for point in series.iter() {
        csv.serialize(point)?;
    }
    csv.flush()?;
    Ok(())
}

/// One CSV row per scenario; an undefined IRR is an empty field
pub fn write_sensitivity_csv<W: Write>(writer: W, rows: &[SensitivityRow]) -> Result<(), csv::Error> {
    let mut csv = csv::Writer::from_writer(writer);
    for row in rows {
        csv.serialize(row)?;
    }
    csv.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::project;
    use crate::sensitivity::{sensitivity, SensitivityInputs};
    use crate::Assumptions;

    fn render<F: FnOnce(&mut Vec<u8>) -> io::Result<()>>(f: F) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_formatting() {
        assert_eq!(format_millions(1_610_510.0), "$1.6M");
        assert_eq!(format_millions(-260_000.0), "$-0.3M");
        assert_eq!(format_percent(14.0845), "14.1%");
        assert_eq!(format_multiple(1.932612), "1.9x");
    }

    #[test]
    fn test_render_metrics_sections() {
        let result = project(&Assumptions::default_deal()).unwrap();
        let text = render(|out| render_metrics(out, &result));

        assert!(text.contains("### Financials"));
        assert!(text.contains("### Valuation"));
        assert!(text.contains("### Return"));
        // 10M revenue at 20% margin and 10x
        assert!(text.contains("$20.0M"));
        assert!(text.contains("20.0%"));
        assert!(text.contains("EV/EBITDA"));
        assert!(text.contains("12.0x"));
    }

    #[test]
    fn test_render_series_has_a_line_per_year() {
        let result = project(&Assumptions::default_deal()).unwrap();
        let text = render(|out| render_series(out, &result.series));
        // header + rule + 6 years
        assert_eq!(text.lines().count(), 8);
        assert!(text.lines().nth(2).unwrap().contains("$10.0M"));
    }

    #[test]
    fn test_render_sensitivity_marks_undefined_irr() {
        let inputs = SensitivityInputs {
            base_revenue: 1_000_000.0,
            base_margin: 0.20,
            base_growth: 0.10,
            base_exit_multiple: 12.0,
            net_debt_exit: 3_000_000.0,
            transaction_fees_exit: 0.02,
            entry_equity: 2_000_000.0,
            years: 5,
        };
        let rows = sensitivity(&inputs).unwrap();
        let text = render(|out| render_sensitivity(out, &rows));

        assert_eq!(text.lines().count(), 5);
        assert!(text.lines().nth(2).unwrap().ends_with("n/a"));
    }

    #[test]
    fn test_series_csv() {
        let result = project(&Assumptions::default_deal()).unwrap();
        let mut buf = Vec::new();
        write_series_csv(&mut buf, &result.series).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("year,revenue,ebitda,ebitda_margin"));
        assert_eq!(lines.next(), Some("0,10000000.0,2000000.0,0.2"));
        assert_eq!(text.lines().count(), 7);
    }

    #[test]
    fn test_sensitivity_csv_leaves_undefined_irr_empty() {
        let rows = vec![SensitivityRow {
            revenue_growth: 0.05,
            ebitda_margin: 0.18,
            exit_multiple: 11.0,
            return_multiple: -0.25,
            irr: None,
        }];
        let mut buf = Vec::new();
        write_sensitivity_csv(&mut buf, &rows).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("revenue_growth,ebitda_margin,exit_multiple,return_multiple,irr"));
        assert_eq!(lines.next(), Some("0.05,0.18,11.0,-0.25,"));
    }
}
