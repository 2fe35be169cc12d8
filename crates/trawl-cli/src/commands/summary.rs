use chrono::Local;
use std::path::PathBuf;
use trawl_core::error::TrawlError;
use trawl_core::model::CapabilityProfile;

use super::Context;
use crate::output;

pub fn run(
    ctx: &Context,
    keywords: Vec<String>,
    profile_file: Option<PathBuf>,
    output_format: &str,
) -> Result<(), TrawlError> {
    // A saved profile replaces the keyword list entirely
    let profile = match profile_file {
        Some(path) => CapabilityProfile::from_json_file(&path)?,
        None => CapabilityProfile {
            summary: keywords.join(", "),
            keywords,
            ..CapabilityProfile::default()
        },
    };

    let dataset = ctx.dataset()?;
    let insights = trawl_core::insights_for_profile(
        dataset,
        &profile,
        &ctx.config.insights,
        Local::now().date_naive(),
    );

    match output_format {
        "json" => output::json::print(&insights)?,
        _ => println!(
            "{}",
            output::table::format_insights(&insights, ctx.config.insights.expiry_months)
        ),
    }
    Ok(())
}
