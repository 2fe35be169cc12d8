use chrono::Local;
use trawl_core::error::TrawlError;

use super::Context;
use crate::output;

pub fn run(ctx: &Context, output_format: &str) -> Result<(), TrawlError> {
    let dataset = ctx.dataset()?;
    let stats = dataset.stats(Local::now().date_naive());

    match output_format {
        "json" => output::json::print(&stats)?,
        _ => println!("{}", output::table::format_stats(&stats)),
    }
    Ok(())
}
