/// Cleans up user-typed addresses before they are sent to a geocoder.
///
/// Free-text delivery lists often omit the city. When a region suffix is
/// configured it is appended to every address that doesn't already mention
/// the region's first component.
#[derive(Debug, Clone, Default)]
pub struct AddressNormalizer {
    region: Option<String>,
}

impl AddressNormalizer {
    pub fn new(region: Option<String>) -> Self {
        Self {
            region: region.filter(|region| !region.trim().is_empty()),
        }
    }

    pub fn normalize(&self, address: &str) -> String {
        let mut normalized = address
            .trim()
            .trim_end_matches([',', ' '])
            .to_owned();

        if let Some(region) = &self.region {
            let key = region
                .split(',')
                .next()
                .unwrap_or(region)
                .trim()
                .to_lowercase();

            if !normalized.to_lowercase().contains(&key) {
                normalized.push_str(", ");
                normalized.push_str(region.trim());
            }
        }

        normalized
    }
}
