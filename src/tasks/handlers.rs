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

use tracing::debug;

use crate::{
    error::CacheError,
    model::{TrackMeta, TrackRecord},
    tasks::{CacheTask, Reply, TaskContext},
};

/// Runs a single task and sends its result back to the caller.
///
/// A caller that dropped its handle no longer wants the result, so a failed
/// reply is ignored.
pub(super) fn handle_task(task: CacheTask, ctx: &TaskContext) {
    match task {
        CacheTask::Refresh(reply) => {
            let _ = reply.send(ctx.sync.refresh().map_err(CacheError::from));
        }
        CacheTask::Search(terms, reply) => {
            let _ = reply.send(ctx.store.search(&terms).map_err(CacheError::from));
        }
        CacheTask::CatalogSize(reply) => {
            let _ = reply.send(ctx.store.count().map_err(CacheError::from));
        }
        CacheTask::PlayById(key, meta, reply) => play_by_id(ctx, key, meta, reply),
        CacheTask::Download(request, reply) => {
            let _ = reply.send(ctx.downloader.download(&request));
        }
        CacheTask::Probe(path, reply) => {
            let _ = reply.send(Ok(ctx.prober.probe(&path)));
        }
    }
}

fn play_by_id(ctx: &TaskContext, key: String, meta: TrackMeta, reply: Reply<TrackRecord>) {
    let result = match ctx.store.find_by_id(&key) {
        Ok(Some(track)) => ctx
            .sink
            .enqueue(track.clone(), meta)
            .map(|()| track)
            .map_err(|e| CacheError::Playback(format!("{e:#}"))),
        Ok(None) => Err(CacheError::Extraction { key }),
        Err(e) => Err(e.into()),
    };

    if let Ok(track) = &result {
        debug!(remote_id = %track.remote_id, "track handed to playback");
    }

    let _ = reply.send(result);
}
