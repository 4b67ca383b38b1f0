//! Page traversal

use super::types::{unwrap_page, Page};
use crate::client::Client;
use crate::error::{Error, Result};
use futures::stream::{self, Stream};
use serde::de::DeserializeOwned;
use serde_json::Value;

enum Cursor<T> {
    Start(Page<T>),
    Follow(String),
    Done,
}

impl Client {
    /// Fetch the page after `page`.
    ///
    /// Fails with [`Error::NoMorePages`] without any request when `page` is
    /// the last one. `page` itself is left untouched, so a failed call can be
    /// retried with the same value.
    pub async fn next_page<T: DeserializeOwned>(&self, page: &Page<T>) -> Result<Page<T>> {
        match page.next.as_deref() {
            Some(link) => self.fetch_page(link).await,
            None => Err(Error::NoMorePages),
        }
    }

    /// Fetch the page before `page`; the mirror image of [`Client::next_page`]
    pub async fn previous_page<T: DeserializeOwned>(&self, page: &Page<T>) -> Result<Page<T>> {
        match page.previous.as_deref() {
            Some(link) => self.fetch_page(link).await,
            None => Err(Error::NoMorePages),
        }
    }

    /// Stream `first` followed by every later page.
    ///
    /// Nothing is fetched ahead: each page is requested when the stream is
    /// polled for it. The stream ends after the last page or the first error.
    pub fn pages<'a, T>(&'a self, first: Page<T>) -> impl Stream<Item = Result<Page<T>>> + 'a
    where
        T: DeserializeOwned + 'a,
    {
        stream::try_unfold(Cursor::Start(first), move |cursor| async move {
            let page = match cursor {
                Cursor::Start(page) => page,
                Cursor::Follow(link) => self.fetch_page(&link).await?,
                Cursor::Done => return Ok(None),
            };
            let following = page.next.clone().map_or(Cursor::Done, Cursor::Follow);
            Ok(Some((page, following)))
        })
    }

    async fn fetch_page<T: DeserializeOwned>(&self, link: &str) -> Result<Page<T>> {
        let url = self.http().resolve(link)?;
        let body: Value = self.http().get_json(url).await?;
        unwrap_page(body)
    }
}
