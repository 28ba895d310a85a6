use embergate_api_types::GatewayIntentBits;
use thiserror::Error;

/// Validated configuration the session depends on directly. File/env
/// parsing and secret storage are the host's problem; this is just the
/// boundary the session consumes.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub token: String,
    pub large_threshold: u64,
    pub shard_num: u64,
    pub shard_total: u64,
    pub max_reconnect_attempts: u32,
    pub intents: GatewayIntentBits,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("large_threshold must be between 50 and 250, got {0}")]
    LargeThreshold(u64),

    #[error("shard_num ({shard_num}) must be less than shard_total ({shard_total})")]
    ShardRange { shard_num: u64, shard_total: u64 },
}

impl GatewayConfig {
    pub fn new(
        token: String,
        large_threshold: u64,
        shard_num: u64,
        shard_total: u64,
        max_reconnect_attempts: u32,
        intents: GatewayIntentBits,
    ) -> Result<Self, ConfigError> {
        if !(50..=250).contains(&large_threshold) {
            return Err(ConfigError::LargeThreshold(large_threshold));
        }

        if shard_num >= shard_total {
            return Err(ConfigError::ShardRange {
                shard_num,
                shard_total,
            });
        }

        Ok(Self {
            token,
            large_threshold,
            shard_num,
            shard_total,
            max_reconnect_attempts,
            intents,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_large_threshold_out_of_range() {
        let err =
            GatewayConfig::new("t".into(), 10, 0, 1, 5, GatewayIntentBits::empty()).unwrap_err();
        assert_eq!(err, ConfigError::LargeThreshold(10));

        let err =
            GatewayConfig::new("t".into(), 300, 0, 1, 5, GatewayIntentBits::empty()).unwrap_err();
        assert_eq!(err, ConfigError::LargeThreshold(300));
    }

    #[test]
    fn rejects_shard_num_at_or_above_total() {
        let err =
            GatewayConfig::new("t".into(), 100, 2, 2, 5, GatewayIntentBits::empty()).unwrap_err();
        assert_eq!(
            err,
            ConfigError::ShardRange {
                shard_num: 2,
                shard_total: 2
            }
        );
    }

    #[test]
    fn accepts_valid_config() {
        assert!(GatewayConfig::new("t".into(), 100, 0, 1, 5, GatewayIntentBits::empty()).is_ok());
    }
}
