use anyhow::Result;
use xiangqi_engine::config::EngineConfig;
use xiangqi_engine::ucci::UcciHandler;

fn main() -> Result<()> {
    env_logger::init();

    let config = EngineConfig::from_env()?;
    log::info!("starting engine, difficulty {}", config.difficulty);

    let mut ucci = UcciHandler::with_config(config);
    ucci.run()
}
