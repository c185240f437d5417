use std::{fs::File, io::BufWriter, path::PathBuf, time::Duration};

use anyhow::bail;
use clap::Args;
use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use courier_geocoding::{address_normalizer::AddressNormalizer, public::public_geocoder};
use courier_matrix_providers::{
    travel_matrix_client::TravelMatrixClient, travel_matrix_provider::TravelMatrixProvider,
};
use courier_optimizer::{
    planner::{route_plan::RoutePlan, route_planner::RoutePlanner},
    problem::routing_config::RoutingConfig,
};
use indicatif::ProgressBar;
use jiff::SignedDuration;
use tracing::{info, warn};

use crate::{file_utils, parsers};

const CROW_FLIES_SPEED_KMH: f64 = 40.0;

#[derive(Args)]
pub struct OptimizeArgs {
    /// Number of trucks available
    #[arg(short, long)]
    trucks: usize,

    /// File with one delivery address per line
    #[arg(short, long)]
    file: PathBuf,

    /// Depot address, defaults to COURIER_DEPOT_ADDRESS
    #[arg(long)]
    depot: Option<String>,

    /// Region appended to addresses that don't mention it, defaults to COURIER_REGION
    #[arg(long)]
    region: Option<String>,

    #[arg(long, value_parser = parsers::parse_duration, default_value = "10s")]
    timeout: SignedDuration,

    /// Trucks drive back to the depot after their last stop
    #[arg(long)]
    closed_routes: bool,

    /// Don't cap the number of stops per truck
    #[arg(long)]
    no_capacity: bool,

    /// Fixed number of stops per truck
    #[arg(long, conflicts_with = "no_capacity")]
    capacity: Option<usize>,

    /// Don't penalize the longest route
    #[arg(long)]
    no_span: bool,

    /// Use straight-line distances instead of the road network
    #[arg(long)]
    crow_flies: bool,

    /// Also write the plan as JSON
    #[arg(long)]
    json_out: Option<PathBuf>,
}

impl OptimizeArgs {
    fn routing_config(&self) -> RoutingConfig {
        RoutingConfig {
            vehicle_count: self.trucks,
            open_route: !self.closed_routes,
            balance_capacity: !self.no_capacity,
            balance_span: !self.no_span,
            time_budget: self.timeout,
            capacity_override: self.capacity,
            ..RoutingConfig::default()
        }
    }

    fn provider(&self) -> TravelMatrixProvider {
        if self.crow_flies {
            TravelMatrixProvider::AsTheCrowFlies {
                speed_kmh: CROW_FLIES_SPEED_KMH,
            }
        } else {
            TravelMatrixProvider::default()
        }
    }
}

pub async fn run(args: OptimizeArgs) -> anyhow::Result<()> {
    if args.trucks == 0 {
        bail!("The number of trucks must be a positive integer");
    }

    let Some(depot) = file_utils::depot_address(args.depot.clone()) else {
        bail!("No depot address, pass --depot or set COURIER_DEPOT_ADDRESS");
    };

    let addresses = file_utils::read_addresses(&args.file)?;
    if addresses.is_empty() {
        bail!("{:?} contains no addresses", args.file);
    }

    let config = args.routing_config();
    let planner = RoutePlanner::new(
        public_geocoder(),
        TravelMatrixClient::default(),
        args.provider(),
    )
    .with_normalizer(AddressNormalizer::new(file_utils::region(args.region.clone())));

    let spinner = ProgressBar::new_spinner();
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner.set_message(format!(
        "Planning {} addresses for {} trucks",
        addresses.len(),
        args.trucks
    ));

    let plan = planner.plan(&depot, &addresses, &config).await;
    spinner.finish_and_clear();
    let plan = plan?;

    println!("{}", plan_table(&plan));

    if !plan.feasible {
        warn!("No assignment satisfies every constraint, showing the best one found");
    }

    if !plan.unresolved.is_empty() {
        println!("Could not locate {} addresses:", plan.unresolved.len());
        for address in &plan.unresolved {
            println!("  - {address}");
        }
    }

    if let Some(path) = &args.json_out {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, &plan)?;
        info!("Plan written to {path:?}");
    }

    Ok(())
}

fn plan_table(plan: &RoutePlan) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Truck", "Stops", "Route"]);

    for (index, route) in plan.routes_from_depot().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(route.len() - 1),
            Cell::new(route.join(" ➜ ")),
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: OptimizeArgs,
    }

    #[test]
    fn test_default_config() {
        let cli = TestCli::parse_from(["courier", "-t", "3", "-f", "stops.txt"]);
        let config = cli.args.routing_config();

        assert_eq!(config.vehicle_count, 3);
        assert!(config.open_route);
        assert!(config.balance_capacity);
        assert!(config.balance_span);
        assert_eq!(config.time_budget, SignedDuration::from_secs(10));
        assert_eq!(config.capacity_override, None);
    }

    #[test]
    fn test_flags_config() {
        let cli = TestCli::parse_from([
            "courier",
            "--trucks",
            "2",
            "--file",
            "stops.txt",
            "--closed-routes",
            "--no-span",
            "--capacity",
            "5",
            "--timeout",
            "2m",
        ]);
        let config = cli.args.routing_config();

        assert!(!config.open_route);
        assert!(!config.balance_span);
        assert_eq!(config.capacity_override, Some(5));
        assert_eq!(config.time_budget, SignedDuration::from_secs(120));
    }

    #[test]
    fn test_capacity_conflicts_with_no_capacity() {
        let result = TestCli::try_parse_from([
            "courier",
            "-t",
            "2",
            "-f",
            "stops.txt",
            "--no-capacity",
            "--capacity",
            "3",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn test_plan_table() {
        let plan = RoutePlan {
            depot: "Depot".to_owned(),
            routes: vec![vec!["A".to_owned(), "B".to_owned()], vec![]],
            unresolved: vec![],
            total_cost: 10,
            feasible: true,
        };

        let rendered = plan_table(&plan).to_string();

        assert!(rendered.contains("Depot ➜ A ➜ B"));
        assert!(rendered.contains("Truck"));
    }
}
