use std::error::Error;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::bot::Bot;
use crate::bots::{HumanBot, RandomBot, SearchBot};

/// Returns a normalized label for a bot spec (the head token before any ':').
pub fn label_for_spec(spec: &str) -> String {
    spec.split(':')
        .next()
        .unwrap_or(spec)
        .trim()
        .to_ascii_lowercase()
}

/// Create a bot instance from a CLI-style spec.
/// Supported specs:
/// - human[:name]
/// - random[:seed]
/// - search[:seed]
pub fn create_bot_from_spec(
    spec: &str,
    index: usize,
    seed: u64,
) -> Result<Box<dyn Bot>, Box<dyn Error>> {
    let spec_lower = spec.to_ascii_lowercase();
    let per_bot_seed = |custom: Option<u64>| {
        custom.unwrap_or(seed ^ ((index as u64 + 1) * 0x9E37_79B9))
    };
    if spec_lower.starts_with("human") {
        let name = spec
            .split_once(':')
            .map(|(_, name)| name.trim().to_string());
        let name = name.unwrap_or_else(|| format!("Human {index}"));
        Ok(Box::new(HumanBot::new(name)))
    } else if spec_lower.starts_with("random") {
        let custom = spec
            .split_once(':')
            .and_then(|(_, value)| value.parse::<u64>().ok());
        Ok(Box::new(RandomBot::new(StdRng::seed_from_u64(
            per_bot_seed(custom),
        ))))
    } else if spec_lower.starts_with("search") {
        let custom = spec
            .split_once(':')
            .and_then(|(_, value)| value.parse::<u64>().ok());
        Ok(Box::new(SearchBot::with_seed(per_bot_seed(custom))))
    } else {
        Err(format!("unrecognized bot spec: {spec}").into())
    }
}
