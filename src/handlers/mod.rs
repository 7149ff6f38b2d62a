// handlers/mod.rs - resource handlers grouped by entity
//
// Every protected handler follows one shape: the `Validated` extractor checks
// and coerces its parameters, one `Store` call runs, and `respond` turns the
// result into 200 / 204 / 500.

pub mod flavor;
pub mod ingredient;
pub mod params;
pub mod preparation;
pub mod public;
pub mod vendor;
