//! Domain types for airlinks.
//!
//! - [`Link`]: One display-ready item of a list
//! - [`List`]: A remote list and the record identifiers of its links
//! - [`ListRef`]: How a caller addresses a list (record ID or URL)
//! - [`Settings`]: Connection settings supplied by the host
//! - [`Record`], [`RecordResponse`], [`ListRecordsResponse`]: Raw remote record shapes

mod link;
mod list;
mod list_ref;
mod record;
mod settings;

pub use link::*;
pub use list::*;
pub use list_ref::*;
pub use record::*;
pub use settings::*;
