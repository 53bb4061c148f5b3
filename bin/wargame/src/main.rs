//! Wargame Binary
//!
//! Runs a build-and-score search over a scenario file with the local
//! capability bundle (playbook moves, market model, balanced scorecard).
//! Pass --expand N to print the first N unscored levels instead.

use bdr_agents::Capabilities;
use bdr_dto::SearchRequest;
use bdr_engine::Engine;
use bdr_search::SearchConfig;
use bdr_state::GameState;
use clap::Parser;

#[derive(Parser)]
#[command(name = "wargame", about = "Business wargame search")]
struct Args {
    /// Scenario file holding a SearchRequest as JSON
    scenario: std::path::PathBuf,
    /// Expand only the first N levels and print the unscored tree
    #[arg(long)]
    expand: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    bdr_core::log();
    bdr_core::kys();
    let args = Args::parse();
    let text = std::fs::read_to_string(&args.scenario)?;
    let request: SearchRequest = serde_json::from_str(&text)?;
    let engine = Engine::new(Capabilities::local());
    match args.expand {
        Some(depth) => {
            let initial: GameState = serde_json::from_value(request.initial_state)?;
            let config = SearchConfig::new(request.business_goal).for_players(initial.n());
            let tree = engine.expand_tree(initial, config, depth).await?;
            println!("{}", serde_json::to_string_pretty(&tree)?);
        }
        None => {
            let response = engine.run_request(request).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }
    Ok(())
}
