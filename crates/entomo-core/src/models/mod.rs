//! Domain types shared by the query builder, the vocabulary miner and the
//! image matcher.

mod category;
mod criteria;
mod entity;
mod response;

pub use category::{Category, Sex};
pub use criteria::{format_number, Criteria};
pub use entity::{AttributeKey, Attributes, EntityRecord, NewEntity};
pub use response::SearchResponse;
