//! Client → server remote calls
//!
//! Reliable, one-way. The client queues calls in `RpcOutbox`; a transport
//! moves them into the server's `RpcInbox`, which drops repeats of the same
//! (sender, sequence) pair so each call is handled at most once.
//!
//! Dedup state is a fixed-size window per sender: the newest sequence seen
//! plus a bitmask of the 64 before it. Sequences compare in serial order so
//! the outbox counter may wrap.

use std::collections::HashMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::components::{ConnectionId, LocalConnection, NetId};
use crate::logger;

/// Calls a client may invoke on the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServerRpc {
    /// Fire the pawn's built-in hit-scan on the server
    Fire { pawn: NetId },
}

/// Wire unit: one call plus delivery metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcEnvelope {
    pub sender: ConnectionId,
    pub sequence: u32,
    pub rpc: ServerRpc,
}

impl RpcEnvelope {
    pub fn encode(&self) -> Result<String, ron::Error> {
        ron::to_string(self)
    }

    pub fn decode(text: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(text)
    }
}

/// Outgoing reliable calls (client side)
#[derive(Resource, Debug, Default)]
pub struct RpcOutbox {
    next_sequence: u32,
    pending: Vec<RpcEnvelope>,
}

impl RpcOutbox {
    /// Queue a call; returns its sequence number
    pub fn send_reliable(&mut self, sender: ConnectionId, rpc: ServerRpc) -> u32 {
        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.wrapping_add(1);
        self.pending.push(RpcEnvelope { sender, sequence, rpc });
        sequence
    }

    pub fn drain(&mut self) -> Vec<RpcEnvelope> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending(&self) -> &[RpcEnvelope] {
        &self.pending
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Sequences older than this behind the newest are rejected as stale
pub const SEQUENCE_WINDOW: u32 = 64;

/// Replay filter for one sender's sequence stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SequenceWindow {
    newest: Option<u32>,
    /// Bit `i` set: `newest - i` was accepted
    mask: u64,
}

impl SequenceWindow {
    /// Record `sequence`; false if it was already seen or is too old to tell
    pub fn accept(&mut self, sequence: u32) -> bool {
        let Some(newest) = self.newest else {
            self.newest = Some(sequence);
            self.mask = 1;
            return true;
        };

        let ahead = sequence.wrapping_sub(newest);
        if ahead != 0 && ahead < 1 << 31 {
            self.mask = if ahead >= SEQUENCE_WINDOW { 1 } else { (self.mask << ahead) | 1 };
            self.newest = Some(sequence);
            return true;
        }

        let behind = newest.wrapping_sub(sequence);
        if behind >= SEQUENCE_WINDOW {
            return false;
        }
        let bit = 1u64 << behind;
        if self.mask & bit != 0 {
            return false;
        }
        self.mask |= bit;
        true
    }

    pub fn newest(&self) -> Option<u32> {
        self.newest
    }
}

/// Incoming calls (server side), deduplicated per sender
#[derive(Resource, Debug, Default)]
pub struct RpcInbox {
    received: Vec<RpcEnvelope>,
    windows: HashMap<ConnectionId, SequenceWindow>,
    duplicate_count: usize,
}

impl RpcInbox {
    /// Accept an envelope; returns false (and drops it) if already seen
    pub fn deliver(&mut self, envelope: RpcEnvelope) -> bool {
        let window = self.windows.entry(envelope.sender).or_default();
        if !window.accept(envelope.sequence) {
            logger::log(&format!(
                "duplicate rpc ignored: sender {:?} seq {}",
                envelope.sender, envelope.sequence
            ));
            self.duplicate_count += 1;
            return false;
        }
        self.received.push(envelope);
        true
    }

    /// Drop a sender's replay state, e.g. when its connection closes
    pub fn forget(&mut self, sender: ConnectionId) {
        self.windows.remove(&sender);
    }

    /// Number of senders with replay state
    pub fn tracked_senders(&self) -> usize {
        self.windows.len()
    }

    pub fn drain(&mut self) -> Vec<RpcEnvelope> {
        std::mem::take(&mut self.received)
    }

    pub fn duplicate_count(&self) -> usize {
        self.duplicate_count
    }
}

/// In-process transport: move the client's queued calls to the server
///
/// Envelopes travel as RON text. The sender is stamped from the client's
/// `LocalConnection`, never taken from the payload. Returns how many calls
/// the server accepted.
pub fn pump_loopback(client: &mut World, server: &mut World) -> usize {
    let Some(connection) = client.get_resource::<LocalConnection>().map(|c| c.0) else {
        return 0;
    };
    let Some(mut outbox) = client.get_resource_mut::<RpcOutbox>() else {
        return 0;
    };
    let outgoing = outbox.drain();

    let wire: Vec<String> = outgoing
        .iter()
        .filter_map(|envelope| match envelope.encode() {
            Ok(text) => Some(text),
            Err(err) => {
                logger::log_error(&format!("rpc encode failed: {err}"));
                None
            }
        })
        .collect();

    let Some(mut inbox) = server.get_resource_mut::<RpcInbox>() else {
        return 0;
    };

    let mut accepted = 0;
    for text in wire {
        match RpcEnvelope::decode(&text) {
            Ok(mut envelope) => {
                envelope.sender = connection;
                if inbox.deliver(envelope) {
                    accepted += 1;
                }
            }
            Err(err) => logger::log_warning(&format!("rpc decode failed: {err}")),
        }
    }
    accepted
}
