pub mod controller;
pub mod error;
pub mod notify;
pub mod source;
pub mod state;
pub mod view;

pub use controller::{Completion, LoadTicket, PagedListController};
pub use error::{FALLBACK_ERROR_MESSAGE, FetchError};
pub use notify::{LogNotifier, Notifier};
pub use source::PageSource;
pub use state::{PageState, Phase, Transition};
pub use view::{DEFAULT_PLACEHOLDERS, EMPTY_DETAIL, EMPTY_TITLE, ListView};

pub use scanhist_types::{Cursor, Page, ScanRecord};
