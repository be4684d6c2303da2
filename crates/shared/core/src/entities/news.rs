use serde::Serialize;

/// A macro news catalog entry
///
/// Firing one applies `fair := max(1, fair * (1 + fair_value_pct))`.
/// Entries with a zero pct still fire and are still recorded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NewsEvent {
    /// Headline shown to the player
    pub headline: &'static str,
    /// One-line rationale for the fair-value move
    pub rationale: &'static str,
    /// Discrete fair-value shock, as a fraction
    pub fair_value_pct: f64,
}

/// The immutable macro news catalog
///
/// One entry is selected uniformly at random per scheduled firing.
pub fn news_catalog() -> &'static [NewsEvent] {
    &CATALOG
}

const CATALOG: [NewsEvent; 11] = [
    NewsEvent {
        headline: "BoE cuts rates 50bps",
        rationale: "Cheaper borrowing supports equities",
        fair_value_pct: 0.10,
    },
    NewsEvent {
        headline: "BoE hikes rates 50bps",
        rationale: "Higher rates weigh on valuations",
        fair_value_pct: -0.10,
    },
    NewsEvent {
        headline: "Fed signals strong dovish turn",
        rationale: "Lower expected path of rates",
        fair_value_pct: 0.08,
    },
    NewsEvent {
        headline: "Fed turns firmly hawkish",
        rationale: "Higher-for-longer rates priced in",
        fair_value_pct: -0.08,
    },
    NewsEvent {
        headline: "Inflation cools below forecast",
        rationale: "Less pressure for hikes",
        fair_value_pct: 0.05,
    },
    NewsEvent {
        headline: "Inflation jumps above forecast",
        rationale: "Hike risks rise",
        fair_value_pct: -0.05,
    },
    NewsEvent {
        headline: "Geopolitical tensions escalate",
        rationale: "Risk-off tone hits indices",
        fair_value_pct: -0.06,
    },
    NewsEvent {
        headline: "Geopolitical de-escalation",
        rationale: "Risk-on tone improves",
        fair_value_pct: 0.04,
    },
    NewsEvent {
        headline: "Mixed data; outlook unchanged",
        rationale: "Little impact on fair value",
        fair_value_pct: 0.00,
    },
    NewsEvent {
        headline: "Energy strength buoys index",
        rationale: "Modest index uplift",
        fair_value_pct: 0.02,
    },
    NewsEvent {
        headline: "Consumer weakens broadly",
        rationale: "Modest index drag",
        fair_value_pct: -0.02,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_includes_a_neutral_entry() {
        assert!(news_catalog().iter().any(|e| e.fair_value_pct == 0.0));
    }

    #[test]
    fn test_catalog_shocks_are_bounded() {
        for event in news_catalog() {
            assert!(event.fair_value_pct.abs() <= 0.10);
            assert!(!event.headline.is_empty());
            assert!(!event.rationale.is_empty());
        }
    }
}
