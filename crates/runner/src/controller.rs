//! Round controller - the single writer for one engine instance
//!
//! One task owns the engine and serializes everything that mutates it: a
//! periodic tick on the mode's cadence, orders from the command mailbox
//! and manual termination. Subscribers observe the round through the
//! broadcast stream only.

use std::sync::Arc;

use fairground_core::{PlayMode, Price, RoundResult, ScoreEntry, Shares, Side};
use fairground_engine::{Engine, EngineConfig, TickOutcome};
use fairground_ports::{Clock, ScoreStore};
use log::info;
use tokio::sync::{broadcast, mpsc};
use tokio::time::MissedTickBehavior;
use uuid::Uuid;

use crate::error::RoundError;
use crate::leaderboard::record_score;
use crate::messages::RoundMessage;

/// Capacity of the broadcast stream to renderers
const MESSAGE_CAPACITY: usize = 1000;

/// Capacity of the order/command mailbox
const COMMAND_CAPACITY: usize = 100;

/// Round configuration chosen by the player at start
#[derive(Debug, Clone)]
pub struct RoundConfig {
    /// Trader display name (non-empty)
    pub player_name: String,
    /// Play mode fixing duration, cadence, pauses and scoring
    pub mode: PlayMode,
    /// Quoted spread fills pay through
    pub spread: Price,
    /// Rng seed for reproducible rounds; None draws from entropy
    pub seed: Option<u64>,
}

impl RoundConfig {
    /// Validate and build a round configuration
    ///
    /// A blank trader name refuses to start the round.
    pub fn new(player_name: impl Into<String>, mode: PlayMode) -> Result<Self, RoundError> {
        let player_name = player_name.into();
        if player_name.trim().is_empty() {
            return Err(RoundError::MissingName);
        }
        Ok(Self {
            player_name,
            mode,
            spread: 0.10,
            seed: None,
        })
    }

    /// Fix the rng seed for a reproducible round
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Commands accepted by a running round
#[derive(Debug, Clone, Copy)]
enum RoundCommand {
    Order { side: Side, qty: Shares },
    EndRound,
}

/// Cloneable handle for submitting orders and ending the round early
#[derive(Debug, Clone)]
pub struct RoundHandle {
    cmd_tx: mpsc::Sender<RoundCommand>,
}

impl RoundHandle {
    /// Submit an order; silently dropped if the round is already gone
    pub async fn order(&self, side: Side, qty: Shares) {
        let _ = self.cmd_tx.send(RoundCommand::Order { side, qty }).await;
    }

    /// Submit a buy
    pub async fn buy(&self, qty: Shares) {
        self.order(Side::Buy, qty).await;
    }

    /// Submit a sell
    pub async fn sell(&self, qty: Shares) {
        self.order(Side::Sell, qty).await;
    }

    /// End the round early; the next tick observes expiry
    pub async fn end_round(&self) {
        let _ = self.cmd_tx.send(RoundCommand::EndRound).await;
    }
}

/// Drives one round from start to the terminal result
pub struct RoundController<C: Clock> {
    config: RoundConfig,
    clock: Arc<C>,
    store: Arc<dyn ScoreStore>,
    msg_tx: broadcast::Sender<RoundMessage>,
    cmd_tx: mpsc::Sender<RoundCommand>,
    cmd_rx: mpsc::Receiver<RoundCommand>,
}

impl<C: Clock> RoundController<C> {
    /// Build a controller for one round
    pub fn new(config: RoundConfig, clock: Arc<C>, store: Arc<dyn ScoreStore>) -> Self {
        let (msg_tx, _) = broadcast::channel(MESSAGE_CAPACITY);
        let (cmd_tx, cmd_rx) = mpsc::channel(COMMAND_CAPACITY);

        Self {
            config,
            clock,
            store,
            msg_tx,
            cmd_tx,
            cmd_rx,
        }
    }

    /// Subscribe to the round's broadcast stream
    pub fn subscribe(&self) -> broadcast::Receiver<RoundMessage> {
        self.msg_tx.subscribe()
    }

    /// Handle for submitting orders and ending the round
    pub fn handle(&self) -> RoundHandle {
        RoundHandle {
            cmd_tx: self.cmd_tx.clone(),
        }
    }

    /// Run the round to expiry and return the terminal result
    ///
    /// Consumes the controller: ticks and commands are handled on this
    /// task only, so engine mutations never interleave.
    pub async fn run(mut self) -> RoundResult {
        let engine_config = EngineConfig {
            mode: self.config.mode,
            spread: self.config.spread,
            seed: self.config.seed,
            ..Default::default()
        };
        let mut engine = Engine::new(engine_config, self.clock.now());

        let period = std::time::Duration::from_millis(self.config.mode.tick_period_ms());
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let now = self.clock.now();
                    match engine.apply_tick(now) {
                        TickOutcome::Advanced { news } => {
                            if let Some(fired) = news {
                                let _ = self.msg_tx.send(RoundMessage::News {
                                    marker: fired.marker,
                                    event: fired.event,
                                });
                            }
                            let _ = self.msg_tx.send(RoundMessage::Snapshot(engine.snapshot(now)));
                        }
                        TickOutcome::Paused => {
                            // Keep the frozen countdown visible while paused
                            let _ = self.msg_tx.send(RoundMessage::Snapshot(engine.snapshot(now)));
                        }
                        TickOutcome::Expired => break,
                    }
                }
                Some(cmd) = self.cmd_rx.recv() => {
                    let now = self.clock.now();
                    match cmd {
                        RoundCommand::Order { side, qty } => {
                            match engine.apply_order(now, side, qty) {
                                Ok(fill) => {
                                    if let Some(marker) = engine.trade_markers().last() {
                                        let _ = self.msg_tx.send(RoundMessage::Trade {
                                            marker: *marker,
                                            fill,
                                        });
                                    }
                                }
                                Err(e) => {
                                    let _ = self.msg_tx.send(RoundMessage::Notice(e.to_string()));
                                }
                            }
                        }
                        RoundCommand::EndRound => engine.end_round(now),
                    }
                }
            }
        }

        let result = RoundResult {
            round_id: Uuid::new_v4(),
            player_name: self.config.player_name.clone(),
            final_total: engine.final_total(),
            final_pnl: engine.final_pnl(),
            mode: self.config.mode,
            finished_at: self.clock.now(),
        };

        info!(
            "Round finished: {} total {:.2} pnl {:+.2}",
            result.player_name, result.final_total, result.final_pnl
        );

        if self.config.mode.scoring_enabled() {
            record_score(self.store.as_ref(), ScoreEntry::from(&result));
        }

        let _ = self.msg_tx.send(RoundMessage::Finished(result.clone()));
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_name_refuses_to_start() {
        assert_eq!(
            RoundConfig::new("", PlayMode::Unassisted).unwrap_err(),
            RoundError::MissingName
        );
        assert_eq!(
            RoundConfig::new("   ", PlayMode::Assisted).unwrap_err(),
            RoundError::MissingName
        );
        assert!(RoundConfig::new("kay", PlayMode::Unassisted).is_ok());
    }

    #[test]
    fn test_config_defaults() {
        let config = RoundConfig::new("kay", PlayMode::Unassisted).unwrap();
        assert_eq!(config.spread, 0.10);
        assert_eq!(config.seed, None);

        let seeded = config.with_seed(7);
        assert_eq!(seeded.seed, Some(7));
    }
}
