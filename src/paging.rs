//! Lumen Photos - Paged Gallery Access
//!
//! One-page fetches over the remote listing plus the accumulating
//! feed used to walk a whole gallery.

use std::sync::Arc;

use crate::error::{ClientError, ClientResult};
use crate::gallery::GalleryMedia;
use crate::remote::photos::{PhotosService, ServerOrder};
use crate::thumbs::MediaUrlFactory;

/// One page of items plus the cursor for the next page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPage<T> {
    pub items: Vec<T>,
    pub next_cursor: String,
}

/// Client-side paging intent, translated to server order keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PagingOrder {
    /// Newest first
    #[default]
    Desc,
    /// Oldest first
    Asc,
}

impl PagingOrder {
    fn to_server(self) -> ServerOrder {
        match self {
            PagingOrder::Desc => ServerOrder::Newest,
            PagingOrder::Asc => ServerOrder::Oldest,
        }
    }
}

/// Paged repository over the remote gallery listing.
///
/// Stateless with respect to pages: each [`get_page`](Self::get_page)
/// call stands alone, cursor bookkeeping lives in [`GalleryFeed`].
pub struct GalleryMediaRepository {
    photos: Arc<dyn PhotosService>,
    urls: MediaUrlFactory,
}

impl GalleryMediaRepository {
    pub fn new(photos: Arc<dyn PhotosService>, urls: MediaUrlFactory) -> Self {
        Self { photos, urls }
    }

    /// Fetch one page of gallery media.
    ///
    /// The cursor is the decimal string of the cumulative offset; `None`
    /// means the start of the listing. Records that fail to map are
    /// dropped and the page continues with the rest.
    ///
    /// The next cursor always advances by the requested `limit`, not by
    /// the actual yield, so it can overshoot near the end of the
    /// collection.
    pub async fn get_page(
        &self,
        limit: usize,
        cursor: Option<&str>,
        order: PagingOrder,
    ) -> ClientResult<DataPage<GalleryMedia>> {
        let offset: usize = match cursor {
            None => 0,
            Some(c) => c
                .parse()
                .map_err(|_| ClientError::InvalidCursor(c.to_string()))?,
        };

        let records = self
            .photos
            .photos(limit, offset, order.to_server())
            .await?;

        let items = records
            .iter()
            .filter_map(|record| match GalleryMedia::from_record(record, &self.urls) {
                Ok(media) => Some(media),
                Err(e) => {
                    log::warn!("get_page: dropping record '{}': {}", record.name, e);
                    None
                }
            })
            .collect();

        Ok(DataPage {
            items,
            next_cursor: (offset + limit).to_string(),
        })
    }
}

/// Accumulates successive pages of one gallery listing.
///
/// Not safe for overlapping [`load_next`](Self::load_next) calls; it
/// takes `&mut self` so the borrow checker enforces that.
pub struct GalleryFeed {
    repository: GalleryMediaRepository,
    order: PagingOrder,
    page_limit: usize,
    items: Vec<GalleryMedia>,
    next_cursor: Option<String>,
    exhausted: bool,
}

impl GalleryFeed {
    pub fn new(repository: GalleryMediaRepository, order: PagingOrder, page_limit: usize) -> Self {
        Self {
            repository,
            order,
            page_limit,
            items: Vec::new(),
            next_cursor: None,
            exhausted: false,
        }
    }

    /// Load the next page and append its items.
    ///
    /// Returns the number of newly loaded items. An empty page marks
    /// the feed as exhausted; further calls are no-ops.
    pub async fn load_next(&mut self) -> ClientResult<usize> {
        if self.exhausted {
            return Ok(0);
        }

        let page = self
            .repository
            .get_page(self.page_limit, self.next_cursor.as_deref(), self.order)
            .await?;

        let loaded = page.items.len();
        if loaded == 0 {
            self.exhausted = true;
        } else {
            self.items.extend(page.items);
            self.next_cursor = Some(page.next_cursor);
        }

        Ok(loaded)
    }

    pub fn items(&self) -> &[GalleryMedia] {
        &self.items
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::photos::PhotoRecord;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    /// Records every call and replays canned pages.
    struct FakePhotosService {
        calls: Mutex<Vec<(usize, usize, ServerOrder)>>,
        pages: Mutex<Vec<Vec<PhotoRecord>>>,
    }

    impl FakePhotosService {
        fn returning(pages: Vec<Vec<PhotoRecord>>) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                pages: Mutex::new(pages),
            })
        }

        fn calls(&self) -> Vec<(usize, usize, ServerOrder)> {
            self.calls.lock().clone()
        }
    }

    #[async_trait]
    impl PhotosService for FakePhotosService {
        async fn photos(
            &self,
            count: usize,
            offset: usize,
            order: ServerOrder,
        ) -> ClientResult<Vec<PhotoRecord>> {
            self.calls.lock().push((count, offset, order));
            let mut pages = self.pages.lock();
            if pages.is_empty() {
                Ok(Vec::new())
            } else {
                Ok(pages.remove(0))
            }
        }
    }

    fn record(hash: &str) -> PhotoRecord {
        PhotoRecord {
            media_type: "image".into(),
            hash: hash.into(),
            width: 1600,
            height: 1200,
            taken_at: "2023-06-01T17:00:00Z".into(),
            name: format!("photo-{}", hash),
        }
    }

    fn repository(photos: Arc<FakePhotosService>) -> GalleryMediaRepository {
        let urls = MediaUrlFactory::new("https://photos.example.com", "pt", "dt");
        GalleryMediaRepository::new(photos, urls)
    }

    #[tokio::test]
    async fn first_page_fetches_offset_zero() {
        let photos = FakePhotosService::returning(vec![vec![record("a"), record("b")]]);
        let repo = repository(photos.clone());

        let page = repo.get_page(20, None, PagingOrder::Desc).await.unwrap();

        assert_eq!(photos.calls(), vec![(20, 0, ServerOrder::Newest)]);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.next_cursor, "20");
    }

    #[tokio::test]
    async fn cursor_advances_by_requested_limit_even_on_short_page() {
        // Only 3 records come back for a limit of 20; the next cursor
        // still reads "40" after the second page. Documented overshoot
        // behavior near the end of the collection.
        let photos = FakePhotosService::returning(vec![vec![record("a")], vec![record("b")]]);
        let repo = repository(photos.clone());

        let first = repo.get_page(20, None, PagingOrder::Desc).await.unwrap();
        assert_eq!(first.next_cursor, "20");

        let second = repo
            .get_page(20, Some(&first.next_cursor), PagingOrder::Desc)
            .await
            .unwrap();
        assert_eq!(second.next_cursor, "40");
        assert_eq!(photos.calls(), vec![(20, 0, ServerOrder::Newest), (20, 20, ServerOrder::Newest)]);
    }

    #[tokio::test]
    async fn ascending_order_translates_to_oldest() {
        let photos = FakePhotosService::returning(vec![Vec::new()]);
        let repo = repository(photos.clone());

        repo.get_page(10, None, PagingOrder::Asc).await.unwrap();

        assert_eq!(photos.calls(), vec![(10, 0, ServerOrder::Oldest)]);
    }

    #[tokio::test]
    async fn unmappable_records_are_dropped_not_fatal() {
        let mut broken = record("broken");
        broken.media_type = "hologram".into();
        let photos =
            FakePhotosService::returning(vec![vec![record("a"), broken, record("b")]]);
        let repo = repository(photos);

        let page = repo.get_page(3, None, PagingOrder::Desc).await.unwrap();

        let hashes: Vec<&str> = page.items.iter().map(|m| m.hash.as_str()).collect();
        assert_eq!(hashes, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn non_numeric_cursor_is_an_error() {
        let photos = FakePhotosService::returning(Vec::new());
        let repo = repository(photos.clone());

        let err = repo
            .get_page(10, Some("not-a-number"), PagingOrder::Desc)
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::InvalidCursor(_)));
        assert!(photos.calls().is_empty());
    }

    #[tokio::test]
    async fn feed_accumulates_until_an_empty_page() {
        let photos = FakePhotosService::returning(vec![
            vec![record("a"), record("b")],
            vec![record("c")],
            Vec::new(),
        ]);
        let mut feed = GalleryFeed::new(repository(photos.clone()), PagingOrder::Desc, 2);

        assert_eq!(feed.load_next().await.unwrap(), 2);
        assert_eq!(feed.load_next().await.unwrap(), 1);
        assert!(!feed.is_exhausted());

        assert_eq!(feed.load_next().await.unwrap(), 0);
        assert!(feed.is_exhausted());
        assert_eq!(feed.items().len(), 3);

        // Exhausted feeds stop calling the service.
        assert_eq!(feed.load_next().await.unwrap(), 0);
        assert_eq!(photos.calls().len(), 3);
    }
}
