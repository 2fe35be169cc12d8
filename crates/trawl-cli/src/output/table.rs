use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::fmt::Write;
use trawl_core::aggregate::sum_values;
use trawl_core::model::{AgencySpend, ExpiringContract, SupplierSpend};
use trawl_core::stats::DatasetStats;
use trawl_core::CategoryInsights;

/// Categories named in the summary heading before "and N more".
const HEADING_CATEGORIES: usize = 6;
/// Suppliers named on the "top winners" line.
const WINNERS_SHOWN: usize = 3;

/// Compact dollar amount: $1.2B, $3.4M, $5.6K, $950.
pub fn format_money(value: Decimal) -> String {
    let v = value.to_f64().unwrap_or(0.0);
    if v >= 1_000_000_000.0 {
        format!("${:.1}B", v / 1_000_000_000.0)
    } else if v >= 1_000_000.0 {
        format!("${:.1}M", v / 1_000_000.0)
    } else if v >= 1_000.0 {
        format!("${:.1}K", v / 1_000.0)
    } else {
        format!("${v:.0}")
    }
}

fn format_optional_money(value: Option<Decimal>) -> String {
    value.map(format_money).unwrap_or_else(|| "-".into())
}

pub fn format_categories(categories: &[String]) -> String {
    if categories.is_empty() {
        return "No categories matched.".into();
    }
    let mut out = String::new();
    for category in categories {
        let _ = writeln!(out, "  {category}");
    }
    let count = categories.len();
    let _ = write!(out, "\n{count} categor{} matched", plural_y(count));
    out
}

fn spend_table(header: &str, rows: &[(&str, Decimal, usize)]) -> String {
    if rows.is_empty() {
        return "  (no contracts)".into();
    }
    let name_width = rows
        .iter()
        .map(|r| r.0.chars().count())
        .chain([header.len()])
        .max()
        .unwrap_or(10);

    let mut out = String::new();
    let _ = writeln!(out, "  {:<name_width$}  {:>10}  {:>9}", header, "Spend", "Contracts");
    for (name, total, count) in rows {
        let _ = writeln!(
            out,
            "  {:<name_width$}  {:>10}  {:>9}",
            name,
            format_money(*total),
            count
        );
    }
    out.truncate(out.trim_end().len());
    out
}

pub fn format_agencies(ranked: &[AgencySpend]) -> String {
    let rows: Vec<_> = ranked
        .iter()
        .map(|a| (a.agency.as_str(), a.total_value, a.contract_count))
        .collect();
    spend_table("Agency", &rows)
}

pub fn format_suppliers(ranked: &[SupplierSpend]) -> String {
    let rows: Vec<_> = ranked
        .iter()
        .map(|s| (s.supplier.as_str(), s.total_value, s.contract_count))
        .collect();
    spend_table("Supplier", &rows)
}

pub fn format_expiring(contracts: &[ExpiringContract], months: u32) -> String {
    if contracts.is_empty() {
        return format!("No contracts expire in the next {months} month(s).");
    }
    let mut out = String::new();
    for c in contracts {
        let _ = writeln!(
            out,
            "  {}  {:<12} {:>10}  {} / {}",
            c.end_date,
            c.id,
            format_optional_money(c.value),
            c.agency,
            c.supplier
        );
        if !c.description.is_empty() {
            let _ = writeln!(out, "    {}", c.description);
        }
    }
    let total = sum_values(contracts.iter().filter_map(|c| c.value));
    let _ = write!(
        out,
        "\n{} contract(s) worth {} expire in the next {months} month(s)",
        contracts.len(),
        format_money(total)
    );
    out
}

/// The historical-spend section shown alongside open tenders.
pub fn format_insights(insights: &CategoryInsights, months: u32) -> String {
    if !insights.has_matches() {
        return "Historical spend insights\n\n\
                Could not map these capabilities to any dataset category yet. \
                Add more detail about your services or industries."
            .into();
    }

    let summary = &insights.summary;
    let mut shown: Vec<&str> = insights
        .categories
        .iter()
        .take(HEADING_CATEGORIES)
        .map(String::as_str)
        .collect();
    let more = insights.categories.len().saturating_sub(HEADING_CATEGORIES);
    let more_text = format!("and {more} more");
    if more > 0 {
        shown.push(&more_text);
    }

    let mut out = String::new();
    let _ = writeln!(out, "Historical spend across: {}\n", shown.join(", "));
    let _ = writeln!(
        out,
        "  Total: {} over {} contract(s)\n",
        format_money(summary.total_spend),
        summary.contract_count
    );
    let _ = writeln!(out, "{}\n", format_agencies(&summary.top_agencies));

    if !summary.top_suppliers.is_empty() {
        let winners: Vec<String> = summary
            .top_suppliers
            .iter()
            .take(WINNERS_SHOWN)
            .map(|s| format!("{} ({})", s.supplier, format_money(s.total_value)))
            .collect();
        let _ = writeln!(out, "Top winners: {}\n", winners.join(" · "));
    }

    let _ = write!(
        out,
        "{} contract(s) worth {} expire in the next {months} month(s).",
        summary.expiring_count,
        format_money(summary.expiring_value)
    );
    if !summary.expiring_sample.is_empty() {
        let _ = write!(out, "\n\n{}", format_expiring_sample(&summary.expiring_sample));
    }
    out
}

fn format_expiring_sample(sample: &[ExpiringContract]) -> String {
    sample
        .iter()
        .map(|c| {
            format!(
                "  {}  {} ({}, {})",
                c.end_date,
                c.agency,
                c.supplier,
                format_optional_money(c.value)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_stats(stats: &DatasetStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Dataset summary");
    let _ = writeln!(out, "  Total rows:          {}", stats.rows);
    if let (Some(first), Some(last)) = (stats.first_published, stats.last_published) {
        let _ = writeln!(out, "  Published:           {first} to {last}");
    }
    let _ = writeln!(out, "  Total value:         {}", format_money(stats.total_value));
    let _ = writeln!(
        out,
        "  Mean contract:       {}",
        format_optional_money(stats.mean_value)
    );
    let _ = writeln!(
        out,
        "  Median contract:     {}",
        format_optional_money(stats.median_value)
    );
    let _ = writeln!(out, "  Unique agencies:     {}", stats.unique_agencies);
    let _ = writeln!(out, "  Unique categories:   {}", stats.unique_categories);
    let _ = writeln!(out, "  Unique suppliers:    {}", stats.unique_suppliers);
    let _ = writeln!(
        out,
        "  Expiring <6 months:  {} contract(s) ({})",
        stats.expiring_count,
        format_money(stats.expiring_value)
    );
    let _ = writeln!(out, "\nTop agencies by spend:");
    let _ = write!(out, "{}", format_agencies(&stats.top_agencies));
    out
}

fn plural_y(n: usize) -> &'static str {
    if n == 1 {
        "y"
    } else {
        "ies"
    }
}
