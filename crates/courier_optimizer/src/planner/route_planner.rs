use std::sync::Arc;

use courier_geocoding::{address_normalizer::AddressNormalizer, geocoder::Geocoder};
use courier_matrix_providers::{
    travel_matrix_client::TravelMatrixClient, travel_matrix_provider::TravelMatrixProvider,
};
use tracing::{debug, info, instrument, warn};

use crate::{
    error::PlanError,
    planner::route_plan::{ResolvedStops, RoutePlan},
    problem::{
        cost_matrix::CostMatrix, location::Location, routing_config::RoutingConfig,
        vehicle_routing_problem::VehicleRoutingProblem,
    },
    solver::{result_extractor::extract_routes, solver::Solver, solver_params::SolverParams},
};

/// End-to-end planning: geocode the addresses, fetch the travel matrix,
/// solve and map the routes back to the addresses.
pub struct RoutePlanner<G> {
    geocoder: G,
    normalizer: AddressNormalizer,
    matrix_client: TravelMatrixClient,
    provider: TravelMatrixProvider,
}

impl<G> RoutePlanner<G>
where
    G: Geocoder,
{
    pub fn new(
        geocoder: G,
        matrix_client: TravelMatrixClient,
        provider: TravelMatrixProvider,
    ) -> Self {
        Self {
            geocoder,
            normalizer: AddressNormalizer::default(),
            matrix_client,
            provider,
        }
    }

    pub fn with_normalizer(mut self, normalizer: AddressNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Geocodes one address. The location keeps the address as typed.
    pub async fn locate(&self, address: &str) -> Result<Option<Location>, PlanError> {
        let query = self.normalizer.normalize(address);
        let point = self.geocoder.geocode(&query).await?;

        Ok(point.map(|point| Location::new(address.trim(), point.lat, point.lon)))
    }

    /// Geocodes the depot and every non-blank address, in order. Stops that
    /// cannot be resolved are reported, not fatal.
    #[instrument(skip_all, level = "debug")]
    pub async fn resolve(
        &self,
        depot: &str,
        addresses: &[String],
    ) -> Result<ResolvedStops, PlanError> {
        let depot_location = match self.locate(depot).await {
            Ok(Some(location)) => location,
            Ok(None) => return Err(PlanError::DepotUnresolved(depot.to_owned())),
            Err(err) => {
                warn!(depot, error = %err, "Depot geocoding failed");
                return Err(PlanError::DepotUnresolved(depot.to_owned()));
            }
        };

        let mut locations = vec![depot_location];
        let mut unresolved = Vec::new();

        for address in addresses.iter().map(|address| address.trim()) {
            if address.is_empty() {
                continue;
            }

            match self.locate(address).await {
                Ok(Some(location)) => {
                    debug!(address, lat = location.lat(), lon = location.lon(), "Resolved");
                    locations.push(location);
                }
                Ok(None) => {
                    warn!(address, "Address could not be resolved");
                    unresolved.push(address.to_owned());
                }
                Err(err) => {
                    warn!(address, error = %err, "Address geocoding failed");
                    unresolved.push(address.to_owned());
                }
            }
        }

        if locations.len() == 1 {
            return Err(PlanError::NoResolvedStops(unresolved.len()));
        }

        Ok(ResolvedStops {
            locations,
            unresolved,
        })
    }

    pub async fn plan(
        &self,
        depot: &str,
        addresses: &[String],
        config: &RoutingConfig,
    ) -> Result<RoutePlan, PlanError> {
        self.plan_with_params(depot, addresses, config, SolverParams::from_config(config))
            .await
    }

    #[instrument(skip_all, level = "debug")]
    pub async fn plan_with_params(
        &self,
        depot: &str,
        addresses: &[String],
        config: &RoutingConfig,
        params: SolverParams,
    ) -> Result<RoutePlan, PlanError> {
        let ResolvedStops {
            locations,
            unresolved,
        } = self.resolve(depot, addresses).await?;

        let matrices = self
            .matrix_client
            .fetch_matrix(&locations, &self.provider)
            .await?;
        let matrix = CostMatrix::from_travel_matrices(&matrices, locations.len())?;
        let problem = Arc::new(VehicleRoutingProblem::from_config(matrix, config)?);

        info!(
            stops = problem.stop_count(),
            vehicles = problem.vehicles().len(),
            unresolved = unresolved.len(),
            "Solving routing problem"
        );

        let solution = {
            let problem = Arc::clone(&problem);
            tokio::task::spawn_blocking(move || Solver::from_shared(problem, params).solve())
                .await??
        };

        let routes = extract_routes(&problem, &solution, &locations);
        let depot = locations
            .first()
            .map(|location| location.label().to_owned())
            .unwrap_or_default();

        Ok(RoutePlan {
            depot,
            routes,
            unresolved,
            total_cost: solution.total_cost,
            feasible: solution.feasible,
        })
    }
}
