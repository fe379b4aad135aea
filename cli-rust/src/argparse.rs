use std::{
    fs,
    io::{self, BufReader},
};

use derive_more::{AsRef, Deref};
use liquid_staking::PoolConfig;

/// Pool config loaded from `--config`
#[derive(AsRef, Clone, Copy, Debug, Deref)]
pub struct ConfigWrapper(PoolConfig);

pub fn parse_pool_config_from_path(path: &str) -> Result<ConfigWrapper, io::Error> {
    if path.is_empty() {
        return Ok(ConfigWrapper(PoolConfig::default()));
    }
    let file = fs::File::open(path)?;
    let config: PoolConfig = serde_json::from_reader(BufReader::new(file))?;
    config
        .validate()
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
    Ok(ConfigWrapper(config))
}
