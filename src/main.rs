use log::{error, warn};
use pow_chain::{Blockchain, ChainConfig, ChainError, MineOutcome};

fn main() -> Result<(), ChainError> {
    let config = ChainConfig::from_env()?;
    env_logger::init();

    println!(
        "⛓️ Mining {} blocks at difficulty {}",
        config.demo_blocks, config.difficulty
    );

    let mut chain = Blockchain::with_config(&config)?;
    println!("{}", chain.report(chain.last_block()));

    for i in 0..config.demo_blocks {
        chain.add_to_pool(i.to_string());
        match chain.mine() {
            Ok(Some(MineOutcome::Accepted(block))) => println!("{}", chain.report(&block)),
            Ok(Some(MineOutcome::Rejected { block, reason })) => {
                warn!("block {:?} dropped: {reason}", block.data)
            }
            Ok(None) => {}
            Err(e) => error!("{e}"),
        }
    }

    let reports: Vec<_> = chain.blocks().iter().map(|b| chain.report(b)).collect();
    match serde_json::to_string_pretty(&reports) {
        Ok(json) => println!("{json}"),
        Err(e) => error!("could not render chain: {e}"),
    }
    println!("length={} valid={}", chain.len(), chain.is_valid_chain());
    Ok(())
}
