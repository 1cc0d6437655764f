//! Campaign Reach Forecast Demo
//!
//! Builds two traffic segments, evaluates a few targeting expressions and
//! prints the forecast JSON.
//!
//! ```bash
//! cargo run --example reach_forecast
//! ```

use alice_reach::wire::catalogs_from_json;
use alice_reach::{ReachForecaster, Targeting};

const SEGMENTS: &str = r#"[
    {
        "total_events_count": 1200000,
        "base": {"data": "ffffffffffffffff", "percentiles": {"25": 0.4, "50": 0.9, "75": 1.6}},
        "vectors": [
            {"key": "device:type", "value": "mobile",  "data": "f0f0f0f0ff00ff00", "percentiles": {"25": 0.3, "50": 0.7, "75": 1.2}},
            {"key": "device:type", "value": "desktop", "data": "0f0f0f0f00ff00ff", "percentiles": {"25": 0.6, "50": 1.1, "75": 2.0}},
            {"key": "user:country", "value": "us",     "data": "ffff0000ffff0000", "percentiles": {"25": 0.8, "50": 1.4, "75": 2.5}},
            {"key": "user:country", "value": "de",     "data": "0000ff000000ff00", "percentiles": {"25": 0.5, "50": 0.9, "75": 1.5}}
        ]
    },
    {
        "total_events_count": 300000,
        "base": {"data": "ffffffff", "percentiles": {"25": 0.2, "50": 0.5, "75": 0.9}},
        "vectors": [
            {"key": "device:type", "value": "mobile", "data": "ffffff00", "percentiles": {"25": 0.2, "50": 0.4, "75": 0.8}},
            {"key": "user:country", "value": "us",    "data": "f0f0f0f0", "percentiles": {"25": 0.3, "50": 0.6, "75": 1.0}}
        ]
    }
]"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== ALICE-Reach Forecast Demo ===\n");

    let forecaster = ReachForecaster::new(catalogs_from_json(SEGMENTS)?);
    println!("Segments: {}", forecaster.segments().len());

    let campaigns = [
        ("all traffic", Targeting::new()),
        (
            "mobile",
            Targeting::new().require("device:type", ["mobile"]),
        ),
        (
            "mobile in us",
            Targeting::new()
                .require("device:type", ["mobile"])
                .require("user:country", ["us"]),
        ),
        (
            "everything but de",
            Targeting::new().exclude("user:country", ["de"]),
        ),
        (
            "tv only",
            Targeting::new().require("device:type", ["tv"]),
        ),
    ];

    println!("\n--- Forecasts ---\n");
    for (name, targeting) in &campaigns {
        let report = forecaster.forecast(targeting)?;
        println!(
            "  {:<20} {}  (segments merged: {}, dropped: {})",
            name,
            serde_json::to_string(&report)?,
            report.merged_segments,
            report.dropped_segments
        );
    }

    Ok(())
}
