use courier_geocoding::{
    address_normalizer::AddressNormalizer, geocoder::Geocoder, public::public_geocoder,
};
use tracing::info;

use crate::file_utils;

pub async fn run(address: &str, region: Option<String>) -> anyhow::Result<()> {
    let normalizer = AddressNormalizer::new(file_utils::region(region));
    let query = normalizer.normalize(address);

    match public_geocoder().geocode(&query).await? {
        Some(point) => {
            println!("{}, {}", point.lat, point.lon);
            if let Some(display_name) = point.display_name {
                println!("{display_name}");
            }
        }
        None => info!("No match for {query:?}"),
    }

    Ok(())
}
