//! Custom request extractors.

mod checked_query;
mod validated_json;

pub use checked_query::CheckedQuery;
pub use validated_json::ValidatedJson;
