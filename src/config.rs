use crate::domain::network::NetworkPolicy;
use crate::error::{CardError, Result};

pub const DEFAULT_MAX_GENERATION_ATTEMPTS: u32 = 5;

/// Tunables for [`crate::application::workflow::CardWorkflow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// How many candidate numbers `apply` tries before giving up.
    pub max_generation_attempts: u32,
    pub network_policy: NetworkPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_generation_attempts: DEFAULT_MAX_GENERATION_ATTEMPTS,
            network_policy: NetworkPolicy::Strict,
        }
    }
}

impl EngineConfig {
    pub fn new(max_generation_attempts: u32, lenient_networks: bool) -> Result<Self> {
        if max_generation_attempts == 0 {
            return Err(CardError::Validation(
                "max generation attempts must be at least 1".to_string(),
            ));
        }
        let network_policy = if lenient_networks {
            NetworkPolicy::FallbackToVisa
        } else {
            NetworkPolicy::Strict
        };
        Ok(Self {
            max_generation_attempts,
            network_policy,
        })
    }
}
