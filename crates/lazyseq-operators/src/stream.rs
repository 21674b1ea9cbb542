//! `Stream` variants of the buffered operators (feature `async`).
//!
//! These wrap exactly the same cores as the iterator variants. The only
//! difference is the pull: `poll_next` on the upstream may return `Pending`,
//! which is the single suspension point of every operator here.
//!
//! Upstreams must be `Unpin`; pin `!Unpin` streams with `Box::pin` first.

use std::cell::RefCell;
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::ready;
use futures::stream::{Stream, StreamExt};
use lazyseq_core::config::BufferConfig;

use crate::drop_end::TailCore;
use crate::tee::waker::WakerSet;
use crate::tee::TeeShared;
use crate::traits::OpError;
use crate::window::WindowCore;

/// Sliding windows over a stream.
pub struct WindowStream<S: Stream> {
    source: S,
    core: WindowCore<S::Item>,
}

impl<S> WindowStream<S>
where
    S: Stream + Unpin,
    S::Item: Clone,
{
    pub fn new(source: S, size: usize, interval: usize) -> Result<Self, OpError> {
        Self::with_config(source, size, interval, BufferConfig::default())
    }

    pub fn with_config(
        source: S,
        size: usize,
        interval: usize,
        cfg: BufferConfig,
    ) -> Result<Self, OpError> {
        Ok(Self {
            source,
            core: WindowCore::new(size, interval, cfg)?,
        })
    }
}

// Nothing is pin-projected; the buffered items live in a heap `Vec`.
impl<S: Stream + Unpin> Unpin for WindowStream<S> {}

impl<S> Stream for WindowStream<S>
where
    S: Stream + Unpin,
    S::Item: Clone,
{
    type Item = Vec<S::Item>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        while !this.core.is_done() {
            let item = ready!(this.source.poll_next_unpin(cx));
            if let Some(window) = this.core.offer(item.into()) {
                return Poll::Ready(Some(window));
            }
        }
        Poll::Ready(None)
    }
}

/// A stream minus its last `n` elements.
pub struct TailDropStream<S: Stream> {
    source: S,
    core: TailCore<S::Item>,
}

impl<S: Stream + Unpin> TailDropStream<S> {
    pub fn new(source: S, n: usize) -> Self {
        Self::with_config(source, n, BufferConfig::default())
    }

    pub fn with_config(source: S, n: usize, cfg: BufferConfig) -> Self {
        Self {
            source,
            core: TailCore::new(n, cfg),
        }
    }
}

impl<S: Stream + Unpin> Unpin for TailDropStream<S> {}

impl<S: Stream + Unpin> Stream for TailDropStream<S> {
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<S::Item>> {
        let this = self.get_mut();
        while !this.core.is_done() {
            let item = ready!(this.source.poll_next_unpin(cx));
            if let Some(v) = this.core.offer(item.into()) {
                return Poll::Ready(Some(v));
            }
        }
        Poll::Ready(None)
    }
}

/// Split a stream into `n` consumers with the default buffer configuration.
pub fn tee_stream<S>(source: S, n: usize) -> Vec<TeeStream<S>>
where
    S: Stream + Unpin,
    S::Item: Clone,
{
    tee_stream_with_config(source, n, BufferConfig::default())
}

pub fn tee_stream_with_config<S>(source: S, n: usize, cfg: BufferConfig) -> Vec<TeeStream<S>>
where
    S: Stream + Unpin,
    S::Item: Clone,
{
    if n == 0 {
        return Vec::new();
    }
    let shared = Rc::new(RefCell::new(TeeShared::new(source, n, cfg)));
    let wakers = Arc::new(WakerSet::new(n));
    (0..n)
        .map(|index| TeeStream {
            shared: Rc::clone(&shared),
            wakers: Arc::clone(&wakers),
            index,
        })
        .collect()
}

/// One consumer of a tee'd stream. Not `Send`: all consumers of a group must
/// be polled from the same thread.
pub struct TeeStream<S: Stream> {
    shared: Rc<RefCell<TeeShared<S, S::Item>>>,
    wakers: Arc<WakerSet>,
    index: usize,
}

impl<S: Stream> TeeStream<S> {
    pub fn position(&self) -> usize {
        self.shared.borrow().position(self.index)
    }

    pub fn retained(&self) -> usize {
        self.shared.borrow().retained()
    }

    pub fn peak_retained(&self) -> usize {
        self.shared.borrow().peak_retained()
    }

    pub fn live_consumers(&self) -> usize {
        self.shared.borrow().live_consumers()
    }
}

impl<S> Stream for TeeStream<S>
where
    S: Stream + Unpin,
    S::Item: Clone,
{
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<S::Item>> {
        let this = self.get_mut();
        let mut shared = this.shared.borrow_mut();
        if let Some(v) = shared.take_retained(this.index) {
            return Poll::Ready(Some(v));
        }
        if shared.is_finished() {
            return Poll::Ready(None);
        }

        this.wakers.register(this.index, cx.waker());
        let fan_out = futures::task::waker(Arc::clone(&this.wakers));
        let mut fan_cx = Context::from_waker(&fan_out);
        let item = ready!(shared.source.poll_next_unpin(&mut fan_cx));

        this.wakers.unregister(this.index);
        let out = shared.accept(this.index, item.into());
        drop(shared);
        // siblings parked on this pull can now read it from the window
        this.wakers.wake_all();
        Poll::Ready(out)
    }
}

impl<S: Stream> Drop for TeeStream<S> {
    fn drop(&mut self) {
        self.wakers.unregister(self.index);
        if let Ok(mut shared) = self.shared.try_borrow_mut() {
            shared.detach(self.index);
        }
    }
}

/// Buffered operators on any `Unpin` stream.
pub trait BufferedStreamExt: Stream + Unpin + Sized {
    fn windows(self, size: usize, interval: usize) -> Result<WindowStream<Self>, OpError>
    where
        Self::Item: Clone,
    {
        WindowStream::new(self, size, interval)
    }

    fn drop_end(self, n: usize) -> TailDropStream<Self> {
        TailDropStream::new(self, n)
    }

    fn tee(self, n: usize) -> Vec<TeeStream<Self>>
    where
        Self::Item: Clone,
    {
        tee_stream(self, n)
    }
}

impl<S: Stream + Unpin> BufferedStreamExt for S {}
