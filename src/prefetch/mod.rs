//! Background image prefetching over a worker thread.
//!
//! Zooming onto a panel requests its high-resolution image off the render
//! thread. Responses carry the [`RequestToken`] they were issued with;
//! the engine compares tokens against the current zoom generation and
//! drops stale arrivals, so a superseded zoom can never swap its texture
//! in late.

use std::sync::mpsc;
use std::thread::JoinHandle;

use crate::error::WallError;
use crate::panel::PanelId;

/// Identity of one prefetch request.
///
/// `generation` increments with every zoom the engine issues; a response
/// is applied only if both fields still match the live request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken {
    /// Panel the image belongs to.
    pub panel: PanelId,
    /// Zoom generation the request was issued under.
    pub generation: u64,
}

/// Raw bytes of a fetched image, with the URL they came from.
#[derive(Debug)]
pub struct FetchedImage {
    /// Source URL.
    pub url: String,
    /// Undecoded image bytes.
    pub bytes: Vec<u8>,
}

/// Blocking image source run on the worker thread.
pub trait ImageFetcher: Send + 'static {
    /// Fetch the bytes behind `url`.
    fn fetch(&mut self, url: &str) -> Result<Vec<u8>, WallError>;
}

enum PrefetchRequest {
    Fetch { token: RequestToken, url: String },
    Shutdown,
}

/// A completed (or failed) prefetch, tagged with its request token.
#[derive(Debug)]
pub struct PrefetchResponse {
    /// Token of the originating request.
    pub token: RequestToken,
    /// The fetched image, or why it failed.
    pub result: Result<FetchedImage, WallError>,
}

/// Channel pair plus the worker thread behind it.
///
/// Dropping the bridge shuts the worker down and joins it.
pub struct PrefetchBridge {
    sender: mpsc::Sender<PrefetchRequest>,
    receiver: mpsc::Receiver<PrefetchResponse>,
    worker: Option<JoinHandle<()>>,
}

impl PrefetchBridge {
    /// Spawn the worker thread around `fetcher`.
    pub fn spawn<F: ImageFetcher>(mut fetcher: F) -> Result<Self, WallError> {
        let (request_tx, request_rx) = mpsc::channel::<PrefetchRequest>();
        let (response_tx, response_rx) = mpsc::channel();

        let worker = std::thread::Builder::new()
            .name("prefetch".to_owned())
            .spawn(move || {
                while let Ok(request) = request_rx.recv() {
                    match request {
                        PrefetchRequest::Fetch { token, url } => {
                            let result =
                                fetcher.fetch(&url).map(|bytes| {
                                    FetchedImage { url, bytes }
                                });
                            if response_tx
                                .send(PrefetchResponse { token, result })
                                .is_err()
                            {
                                break;
                            }
                        }
                        PrefetchRequest::Shutdown => break,
                    }
                }
            })
            .map_err(WallError::ThreadSpawn)?;

        Ok(Self {
            sender: request_tx,
            receiver: response_rx,
            worker: Some(worker),
        })
    }

    /// Queue a fetch. A dead worker is logged, not fatal; the zoom just
    /// keeps its thumbnail.
    pub fn request(&self, token: RequestToken, url: String) {
        log::debug!("prefetch request: {url}");
        if self
            .sender
            .send(PrefetchRequest::Fetch { token, url })
            .is_err()
        {
            log::warn!("prefetch worker is gone; request dropped");
        }
    }

    /// Take one completed response, if any arrived.
    #[must_use]
    pub fn try_recv(&self) -> Option<PrefetchResponse> {
        self.receiver.try_recv().ok()
    }
}

impl Drop for PrefetchBridge {
    fn drop(&mut self) {
        let _ = self.sender.send(PrefetchRequest::Shutdown);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

/// HTTP-backed fetcher for native hosts.
#[cfg(feature = "http")]
#[derive(Debug, Default)]
pub struct HttpFetcher;

#[cfg(feature = "http")]
impl ImageFetcher for HttpFetcher {
    fn fetch(&mut self, url: &str) -> Result<Vec<u8>, WallError> {
        let mut response = ureq::get(url)
            .call()
            .map_err(|e| WallError::Fetch(e.to_string()))?;
        response
            .body_mut()
            .read_to_vec()
            .map_err(|e| WallError::Fetch(e.to_string()))
    }
}
