use std::sync::Arc;

use async_trait::async_trait;
use scanhist_types::{Cursor, Page};

use crate::error::FetchError;

/// Anything that can hand out one page of a cursor-paginated collection.
///
/// `cursor == None` asks for the first page.
#[async_trait]
pub trait PageSource: Send + Sync {
    type Item: Send;

    async fn fetch_page(&self, cursor: Option<&Cursor>) -> Result<Page<Self::Item>, FetchError>;
}

#[async_trait]
impl<S: PageSource + ?Sized> PageSource for Arc<S> {
    type Item = S::Item;

    async fn fetch_page(&self, cursor: Option<&Cursor>) -> Result<Page<Self::Item>, FetchError> {
        (**self).fetch_page(cursor).await
    }
}
