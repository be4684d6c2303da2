use fairground_core::{Fill, NewsEvent, NewsMarker, RoundResult, TradeMarker};
use fairground_engine::EngineSnapshot;
use serde::Serialize;

/// Messages broadcast by the round controller to its subscribers
///
/// This is the complete read-only surface a renderer needs: state
/// snapshots per tick, markers as they happen, transient notices and the
/// terminal result. Serializable so out-of-process renderers can consume
/// the stream as JSON.
#[derive(Debug, Clone, Serialize)]
pub enum RoundMessage {
    /// Engine state after a tick (also published while paused, with the
    /// frozen remaining time)
    Snapshot(EngineSnapshot),

    /// An order was settled
    Trade { marker: TradeMarker, fill: Fill },

    /// A scheduled news event fired
    News { marker: NewsMarker, event: NewsEvent },

    /// Transient user-facing notice (e.g. position limit reached)
    Notice(String),

    /// The round expired; no further messages follow
    Finished(RoundResult),
}
