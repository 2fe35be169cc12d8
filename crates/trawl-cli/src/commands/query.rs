use trawl_core::error::TrawlError;

use super::Context;
use crate::output;

pub fn categories(
    ctx: &Context,
    keywords: &[String],
    output_format: &str,
) -> Result<(), TrawlError> {
    let dataset = ctx.dataset()?;
    let categories = dataset.match_categories(keywords);

    match output_format {
        "json" => output::json::print(&categories)?,
        _ => println!("{}", output::table::format_categories(&categories)),
    }
    Ok(())
}

pub fn agencies(
    ctx: &Context,
    keywords: &[String],
    top: Option<usize>,
    output_format: &str,
) -> Result<(), TrawlError> {
    let dataset = ctx.dataset()?;
    let categories = dataset.match_categories(keywords);
    let top_n = top.unwrap_or(ctx.config.insights.agency_top_n);
    let ranked = dataset.spend_by_agency(&categories, top_n);

    match output_format {
        "json" => output::json::print(&ranked)?,
        _ => println!("{}", output::table::format_agencies(&ranked)),
    }
    Ok(())
}

pub fn suppliers(
    ctx: &Context,
    keywords: &[String],
    agency: Option<&str>,
    top: Option<usize>,
    output_format: &str,
) -> Result<(), TrawlError> {
    let dataset = ctx.dataset()?;
    let categories = dataset.match_categories(keywords);
    let top_n = top.unwrap_or(ctx.config.insights.supplier_top_n);
    let ranked = dataset.top_suppliers(&categories, agency, top_n);

    match output_format {
        "json" => output::json::print(&ranked)?,
        _ => println!("{}", output::table::format_suppliers(&ranked)),
    }
    Ok(())
}

pub fn expiring(
    ctx: &Context,
    keywords: &[String],
    months: Option<u32>,
    output_format: &str,
) -> Result<(), TrawlError> {
    let dataset = ctx.dataset()?;
    let categories = dataset.match_categories(keywords);
    let months = months.unwrap_or(ctx.config.insights.expiry_months);
    let contracts = dataset.expiring_contracts(&categories, months);

    match output_format {
        "json" => output::json::print(&contracts)?,
        _ => println!("{}", output::table::format_expiring(&contracts, months)),
    }
    Ok(())
}
