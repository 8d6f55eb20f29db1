//! Chunked retrieval past the store's per-request row cap.
//!
//! The store silently truncates any window beyond [`CHUNK_SIZE`] rows, so
//! exhaustive reads walk the table in fixed windows ordered by creation
//! time descending and concatenate the chunks. A full window means more may
//! exist; a short or empty window means exhaustion. There is no explicit
//! "no more data" signal, so exhaustion itself can never be an error.
//!
//! Known limit: a record inserted or deleted ahead of the cursor during a
//! long scan can be skipped or double-counted. Callers accept this; the
//! ordering key itself (creation time) never changes after insert.

use lostflight_core::disc::DiscRecord;
use lostflight_core::search::CHUNK_SIZE;

use crate::adapter::{ReadRequest, SourceAdapter};
use crate::error::StoreError;

/// Walks the source adapter window by window.
pub struct ChunkedFetcher;

impl ChunkedFetcher {
    /// Fetch every active record, regardless of how many chunks it takes.
    ///
    /// Any chunk failure aborts the whole fetch; nothing accumulated before
    /// the failure is returned.
    pub async fn fetch_all(adapter: &SourceAdapter) -> Result<Vec<DiscRecord>, StoreError> {
        Self::fetch_up_to(adapter, i64::MAX).await
    }

    /// Fetch at most `max_rows` records, chunking as needed.
    ///
    /// Used by the paged multi-term search path, which works over an
    /// oversized but still bounded candidate window.
    pub async fn fetch_up_to(
        adapter: &SourceAdapter,
        max_rows: i64,
    ) -> Result<Vec<DiscRecord>, StoreError> {
        let mut collected: Vec<DiscRecord> = Vec::new();
        let mut offset: i64 = 0;
        let mut chunks: u32 = 0;

        loop {
            let remaining = max_rows - offset;
            if remaining <= 0 {
                break;
            }
            let window = CHUNK_SIZE.min(remaining);

            let page = adapter
                .fetch(&ReadRequest {
                    offset,
                    limit: window,
                    ..ReadRequest::default()
                })
                .await?;
            chunks += 1;

            let returned = page.records.len() as i64;
            collected.extend(page.records);

            // A short window signals exhaustion; a full one means the next
            // window may still hold rows.
            if returned < window {
                break;
            }
            offset += returned;
        }

        tracing::debug!(rows = collected.len(), chunks, "chunked fetch complete");
        Ok(collected)
    }
}
