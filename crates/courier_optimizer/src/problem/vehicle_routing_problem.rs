use crate::{
    error::OptimizerError,
    problem::{
        cost_matrix::{Cost, CostMatrix},
        location::NodeIdx,
        open_route::with_sink,
        routing_config::RoutingConfig,
        vehicle::{Vehicle, VehicleBuilder, VehicleIdx},
    },
};

/// A solvable routing instance: the cost matrix (with the sink node appended
/// for open routes), the fleet and the optional capacity and span dimensions.
#[derive(Debug, Clone)]
pub struct VehicleRoutingProblem {
    matrix: CostMatrix,
    vehicles: Vec<Vehicle>,
    depot: NodeIdx,
    sink: Option<NodeIdx>,
    /// Stops are every node that no vehicle starts or ends at.
    is_stop: Vec<bool>,
    stop_count: usize,
    span_cost_coefficient: Cost,
}

impl VehicleRoutingProblem {
    pub fn from_config(
        matrix: CostMatrix,
        config: &RoutingConfig,
    ) -> Result<VehicleRoutingProblem, OptimizerError> {
        let mut builder = VehicleRoutingProblemBuilder::default();
        builder
            .set_matrix(matrix)
            .set_vehicle_count(config.vehicle_count)
            .set_open_route(config.open_route)
            .set_balance_capacity(config.balance_capacity)
            .set_span_cost_coefficient(if config.balance_span {
                config.span_cost_coefficient
            } else {
                0
            });

        if let Some(capacity) = config.capacity_override {
            builder.set_capacity_override(capacity);
        }

        builder.build()
    }

    pub fn matrix(&self) -> &CostMatrix {
        &self.matrix
    }

    #[inline]
    pub fn travel_cost(&self, from: NodeIdx, to: NodeIdx) -> Cost {
        self.matrix.cost(from, to)
    }

    pub fn is_symmetric(&self) -> bool {
        self.matrix.is_symmetric()
    }

    pub fn num_nodes(&self) -> usize {
        self.matrix.num_nodes()
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn vehicle(&self, vehicle_id: VehicleIdx) -> &Vehicle {
        &self.vehicles[vehicle_id]
    }

    pub fn depot(&self) -> NodeIdx {
        self.depot
    }

    /// The zero-cost end node added for open routes.
    pub fn sink(&self) -> Option<NodeIdx> {
        self.sink
    }

    #[inline]
    pub fn is_stop(&self, node: NodeIdx) -> bool {
        self.is_stop.get(node.get()).copied().unwrap_or(false)
    }

    pub fn stops(&self) -> impl Iterator<Item = NodeIdx> + '_ {
        self.is_stop
            .iter()
            .enumerate()
            .filter(|&(_, &is_stop)| is_stop)
            .map(|(node, _)| NodeIdx::new(node))
    }

    pub fn stop_count(&self) -> usize {
        self.stop_count
    }

    /// Every stop weighs one unit of capacity. Depot and sink weigh nothing.
    #[inline]
    pub fn demand(&self, node: NodeIdx) -> usize {
        usize::from(self.is_stop(node))
    }

    pub fn has_capacity(&self) -> bool {
        self.vehicles
            .iter()
            .any(|vehicle| vehicle.capacity().is_some())
    }

    /// Weight of the longest route span in the objective, 0 when spans are
    /// not balanced.
    pub fn span_cost_coefficient(&self) -> Cost {
        self.span_cost_coefficient
    }
}

#[derive(Default)]
pub struct VehicleRoutingProblemBuilder {
    matrix: Option<CostMatrix>,
    vehicle_count: Option<usize>,
    vehicles: Option<Vec<Vehicle>>,
    open_route: bool,
    balance_capacity: bool,
    capacity_override: Option<usize>,
    span_cost_coefficient: Cost,
}

impl VehicleRoutingProblemBuilder {
    pub fn set_matrix(&mut self, matrix: CostMatrix) -> &mut VehicleRoutingProblemBuilder {
        self.matrix = Some(matrix);
        self
    }

    /// Creates `vehicle_count` identical vehicles starting at the depot.
    pub fn set_vehicle_count(&mut self, vehicle_count: usize) -> &mut VehicleRoutingProblemBuilder {
        self.vehicle_count = Some(vehicle_count);
        self
    }

    /// Uses an explicit fleet instead of `vehicle_count` identical vehicles.
    pub fn set_vehicles(&mut self, vehicles: Vec<Vehicle>) -> &mut VehicleRoutingProblemBuilder {
        self.vehicles = Some(vehicles);
        self
    }

    pub fn set_open_route(&mut self, open_route: bool) -> &mut VehicleRoutingProblemBuilder {
        self.open_route = open_route;
        self
    }

    pub fn set_balance_capacity(
        &mut self,
        balance_capacity: bool,
    ) -> &mut VehicleRoutingProblemBuilder {
        self.balance_capacity = balance_capacity;
        self
    }

    pub fn set_capacity_override(&mut self, capacity: usize) -> &mut VehicleRoutingProblemBuilder {
        self.capacity_override = Some(capacity);
        self
    }

    pub fn set_span_cost_coefficient(
        &mut self,
        span_cost_coefficient: Cost,
    ) -> &mut VehicleRoutingProblemBuilder {
        self.span_cost_coefficient = span_cost_coefficient;
        self
    }

    pub fn build(self) -> Result<VehicleRoutingProblem, OptimizerError> {
        let matrix = self.matrix.ok_or_else(|| {
            OptimizerError::InfeasibleConfiguration("a cost matrix is required".to_owned())
        })?;

        if matrix.is_empty() {
            return Err(OptimizerError::InfeasibleConfiguration(
                "the cost matrix has no depot node".to_owned(),
            ));
        }

        if self.capacity_override == Some(0) {
            return Err(OptimizerError::InfeasibleConfiguration(
                "capacity override must be at least 1".to_owned(),
            ));
        }

        if self.span_cost_coefficient < 0 {
            return Err(OptimizerError::InfeasibleConfiguration(
                "span cost coefficient cannot be negative".to_owned(),
            ));
        }

        let depot = NodeIdx::new(0);
        let (matrix, sink) = if self.open_route {
            let (matrix, sink) = with_sink(&matrix);
            (matrix, Some(sink))
        } else {
            (matrix, None)
        };

        let mut vehicles = match self.vehicles {
            Some(vehicles) => vehicles,
            None => (0..self.vehicle_count.unwrap_or(0))
                .map(|_| VehicleBuilder::default().build())
                .collect(),
        };

        if vehicles.is_empty() {
            return Err(OptimizerError::InfeasibleConfiguration(
                "vehicle count must be greater than zero".to_owned(),
            ));
        }

        if let Some(sink) = sink {
            for vehicle in &mut vehicles {
                vehicle.set_end(sink);
            }
        }

        let num_nodes = matrix.num_nodes();
        for vehicle in &vehicles {
            if vehicle.start().get() >= num_nodes || vehicle.end().get() >= num_nodes {
                return Err(OptimizerError::InfeasibleConfiguration(format!(
                    "vehicle start {} or end {} is outside the {} node(s) of the matrix",
                    vehicle.start(),
                    vehicle.end(),
                    num_nodes
                )));
            }
        }

        let mut is_stop = vec![true; num_nodes];
        is_stop[depot.get()] = false;
        if let Some(sink) = sink {
            is_stop[sink.get()] = false;
        }
        for vehicle in &vehicles {
            is_stop[vehicle.start().get()] = false;
            is_stop[vehicle.end().get()] = false;
        }
        let stop_count = is_stop.iter().filter(|&&is_stop| is_stop).count();

        let capacity = match self.capacity_override {
            Some(capacity) => Some(capacity),
            None if self.balance_capacity => Some(stop_count.div_ceil(vehicles.len())),
            None => None,
        };

        if capacity.is_some() {
            for vehicle in &mut vehicles {
                vehicle.set_capacity(capacity);
            }
        }

        Ok(VehicleRoutingProblem {
            matrix,
            vehicles,
            depot,
            sink,
            is_stop,
            stop_count,
            span_cost_coefficient: self.span_cost_coefficient,
        })
    }
}
