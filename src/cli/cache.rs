//! Cache command handlers

use crate::cache::FlavorCache;
use crate::cli::{output, CacheShowArgs};
use crate::config::FlavorCheckConfig;

/// Handle `instance-flavor-check cache show`
///
/// Reads like the check does on exhaustion, so a missing or garbled entry is
/// initialised to BYOS.
pub fn handle_cache_show(args: &CacheShowArgs, config: &FlavorCheckConfig) -> anyhow::Result<String> {
    let cache = FlavorCache::new(&config.paths.cache);
    let flavor = cache.read()?;
    Ok(output::format_cached(flavor, cache.path(), args.json)?)
}
