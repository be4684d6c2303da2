mod history;
mod ledger;
mod liquidity;
mod market;
mod news;
mod round;
mod side;

pub use history::{HISTORY_CAP, HistorySample, NewsMarker, PriceHistory, TradeMarker};
pub use ledger::{Fill, Ledger};
pub use liquidity::{BASE_DEPTH, DEPTH_FLOOR, LiquidityState};
pub use market::{MarketState, Regime};
pub use news::{NewsEvent, news_catalog};
pub use round::{PlayMode, RoundResult, ScoreEntry};
pub use side::Side;
