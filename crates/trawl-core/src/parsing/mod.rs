pub mod dates;
pub mod values;

pub use dates::parse_date;
pub use values::parse_currency;
