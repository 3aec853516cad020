// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Worker pool for blocking cache operations.
//!
//! This module implements the command pattern used to keep network calls,
//! disk writes, process spawns and database queries off the caller's thread.
//! A fixed number of worker threads share one task channel; each
//! [`CacheTask`] carries the sending half of a one-shot reply channel and the
//! caller holds the receiving half as a [`Pending`] handle.
//!
//! Tasks run to completion once a worker picks them up; there is no
//! cancellation and no timeout. A remote call that hangs holds its worker
//! until it returns.

mod handlers;

use std::{
    future::Future,
    path::PathBuf,
    pin::Pin,
    sync::{
        Arc, Mutex,
        mpsc::{self, Receiver, Sender},
    },
    task::{Context, Poll},
    thread,
};

use futures::channel::oneshot;
use tracing::{debug, warn};

use crate::{
    db::TrackStore,
    download::Downloader,
    error::CacheError,
    model::{DownloadOutcome, DownloadRequest, TrackMeta, TrackRecord},
    player::PlaybackSink,
    probe::DurationProber,
    sync::CatalogSync,
};

type Reply<T> = oneshot::Sender<Result<T, CacheError>>;

pub(crate) enum CacheTask {
    Refresh(Reply<Option<usize>>),
    Search(Vec<String>, Reply<Vec<TrackRecord>>),
    CatalogSize(Reply<usize>),
    PlayById(String, TrackMeta, Reply<TrackRecord>),
    Download(DownloadRequest, Reply<DownloadOutcome>),
    Probe(PathBuf, Reply<Option<u64>>),
}

/// Shared resources required by task handlers.
pub(crate) struct TaskContext {
    pub(crate) store: TrackStore,
    pub(crate) sync: CatalogSync,
    pub(crate) downloader: Downloader,
    pub(crate) prober: DurationProber,
    pub(crate) sink: Arc<dyn PlaybackSink>,
}

/// A fixed set of worker threads fed from one task channel.
///
/// Dropping the pool closes the channel; each worker exits once it has
/// finished its current task.
pub(crate) struct WorkerPool {
    task_tx: Sender<CacheTask>,
    size: usize,
}

impl WorkerPool {
    /// Spawns `size` workers sharing `ctx`.
    ///
    /// # Errors
    ///
    /// Returns an error if a worker thread cannot be spawned.
    pub(crate) fn spawn(size: usize, ctx: TaskContext) -> Result<Self, CacheError> {
        let (task_tx, task_rx) = mpsc::channel();
        let task_rx = Arc::new(Mutex::new(task_rx));
        let ctx = Arc::new(ctx);

        for index in 0..size {
            let task_rx = Arc::clone(&task_rx);
            let ctx = Arc::clone(&ctx);

            thread::Builder::new()
                .name(format!("trackcache-worker-{index}"))
                .spawn(move || run_worker(index, &task_rx, &ctx))?;
        }

        debug!(size, "worker pool started");

        Ok(Self { task_tx, size })
    }

    pub(crate) fn size(&self) -> usize {
        self.size
    }

    /// Queues a task built around a fresh reply channel and returns the
    /// caller's end of that channel.
    pub(crate) fn submit<T>(&self, task: impl FnOnce(Reply<T>) -> CacheTask) -> Pending<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        // If every worker has gone, the task is dropped along with its reply
        // sender and the caller sees `WorkerGone`.
        if self.task_tx.send(task(reply_tx)).is_err() {
            warn!("task submitted after worker pool stopped");
        }

        Pending { reply_rx }
    }
}

fn run_worker(index: usize, task_rx: &Mutex<Receiver<CacheTask>>, ctx: &TaskContext) {
    loop {
        // The lock is only held while waiting for the next task, never while
        // running one.
        let task = match task_rx.lock() {
            Ok(rx) => rx.recv(),
            Err(_) => break,
        };

        match task {
            Ok(task) => handlers::handle_task(task, ctx),
            Err(_) => break,
        }
    }

    debug!(worker = index, "worker stopped");
}

/// The caller's handle on a task running in the worker pool.
///
/// The handle can be awaited from any executor, polled without blocking with
/// [`try_take`](Self::try_take), or waited on with [`wait`](Self::wait).
#[must_use = "the task runs regardless, but its result is lost if the handle is dropped"]
pub struct Pending<T> {
    reply_rx: oneshot::Receiver<Result<T, CacheError>>,
}

impl<T> Pending<T> {
    /// Returns the result if the task has finished, without blocking.
    ///
    /// Once a result has been taken, the handle reports
    /// [`CacheError::WorkerGone`].
    pub fn try_take(&mut self) -> Result<Option<T>, CacheError> {
        match self.reply_rx.try_recv() {
            Ok(Some(result)) => result.map(Some),
            Ok(None) => Ok(None),
            Err(oneshot::Canceled) => Err(CacheError::WorkerGone),
        }
    }

    /// Blocks the current thread until the task has finished.
    pub fn wait(self) -> Result<T, CacheError> {
        futures::executor::block_on(self)
    }
}

impl<T> Future for Pending<T> {
    type Output = Result<T, CacheError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.reply_rx)
            .poll(cx)
            .map(|reply| reply.unwrap_or(Err(CacheError::WorkerGone)))
    }
}
