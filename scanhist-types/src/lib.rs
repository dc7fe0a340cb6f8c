pub mod page;
pub mod record;

pub use page::{Cursor, Page};
pub use record::ScanRecord;
