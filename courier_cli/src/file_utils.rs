use std::path::Path;

const DEPOT_ENV_VAR: &str = "COURIER_DEPOT_ADDRESS";
const REGION_ENV_VAR: &str = "COURIER_REGION";

/// One address per line, blank lines ignored.
pub fn parse_addresses(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

pub fn read_addresses(path: &Path) -> Result<Vec<String>, std::io::Error> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_addresses(&content))
}

pub fn depot_address(depot: Option<String>) -> Option<String> {
    depot
        .or_else(|| std::env::var(DEPOT_ENV_VAR).ok())
        .filter(|depot| !depot.trim().is_empty())
}

pub fn region(region: Option<String>) -> Option<String> {
    region.or_else(|| std::env::var(REGION_ENV_VAR).ok())
}
