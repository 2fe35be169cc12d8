use serde::Serialize;
use trawl_core::error::TrawlError;

pub fn print<T: Serialize + ?Sized>(value: &T) -> Result<(), TrawlError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
