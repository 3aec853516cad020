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

//! Hand-off of resolved tracks to the host's playback layer.
//!
//! The cache does not play anything. Once a track is known it is handed to a
//! [`PlaybackSink`], which typically appends it to a playlist that downloads
//! the audio on demand.

use std::sync::mpsc::Sender;

use anyhow::Result;

use crate::model::{TrackMeta, TrackRecord};

/// Downstream consumer of tracks selected for playback.
///
/// `enqueue` may be called from a pool worker thread.
pub trait PlaybackSink: Send + Sync {
    fn enqueue(&self, track: TrackRecord, meta: TrackMeta) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackRequest {
    pub track: TrackRecord,
    pub meta: TrackMeta,
}

/// A sink that forwards each track over a channel to the host's event loop.
///
/// This struct acts as a proxy; it does not touch the playlist itself but
/// sends a [`PlaybackRequest`] to whichever thread owns it.
pub struct ChannelSink {
    request_tx: Sender<PlaybackRequest>,
}

impl ChannelSink {
    pub fn new(request_tx: Sender<PlaybackRequest>) -> Self {
        Self { request_tx }
    }
}

impl PlaybackSink for ChannelSink {
    fn enqueue(&self, track: TrackRecord, meta: TrackMeta) -> Result<()> {
        self.request_tx.send(PlaybackRequest { track, meta })?;

        Ok(())
    }
}
