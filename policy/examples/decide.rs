//! Decide one turn from a JSON battle snapshot
//!
//! ```text
//! cargo run -p counterplay-policy --example decide -- view.json [config.json]
//! RUST_LOG=counterplay_policy=debug cargo run -p counterplay-policy --example decide -- view.json
//! ```

use std::env;
use std::fs;

use anyhow::{Context, Result};
use counterplay_battle::BattleView;
use counterplay_policy::{MoveKits, Policy, PolicyConfig, ThreatTable};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let mut args = env::args().skip(1);
    let view_path = args
        .next()
        .context("usage: decide <view.json> [config.json]")?;

    let config = match args.next() {
        Some(path) => {
            let json = fs::read_to_string(&path).with_context(|| format!("reading {}", path))?;
            PolicyConfig::from_json(&json).with_context(|| format!("loading config {}", path))?
        }
        None => PolicyConfig::default(),
    };

    let json = fs::read_to_string(&view_path).with_context(|| format!("reading {}", view_path))?;
    let view: BattleView = serde_json::from_str(&json).context("parsing battle view")?;

    let mut policy = Policy::new(config, ThreatTable::builtin()?, MoveKits::default());
    policy.start_battle(&view.battle_id);

    let decision = policy.decide(&view)?;
    tracing::info!(state = %decision.state, "Decided");
    println!("{}", decision.action.to_choice());

    policy.end_battle(&view.battle_id);
    Ok(())
}
