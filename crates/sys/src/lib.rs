mod ids;
mod query;
mod record;

pub use ids::{NameLookup, SystemNames};
pub use query::{QueryError, QueryOptions, query_status};
pub use record::{AttrFlags, DeviceId, FieldMask, FileType, StatusRecord, Timestamp};
