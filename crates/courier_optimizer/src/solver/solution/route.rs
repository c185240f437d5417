use crate::problem::{
    cost_matrix::Cost,
    location::NodeIdx,
    vehicle::{Vehicle, VehicleIdx},
    vehicle_routing_problem::VehicleRoutingProblem,
};

/// Ordered stops visited by one vehicle. The vehicle's start and end nodes
/// are implicit and never stored in `nodes`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkingSolutionRoute {
    pub(super) vehicle_id: VehicleIdx,
    pub(super) nodes: Vec<NodeIdx>,

    /// Transit cost from the vehicle start, through every stop, to the
    /// vehicle end. This is also the route span.
    cost: Cost,

    /// Sum of the demands of the stops
    load: usize,
}

impl WorkingSolutionRoute {
    pub fn empty(problem: &VehicleRoutingProblem, vehicle_id: VehicleIdx) -> Self {
        let mut route = WorkingSolutionRoute {
            vehicle_id,
            nodes: Vec::new(),
            cost: 0,
            load: 0,
        };

        route.update_data(problem);

        route
    }

    pub fn vehicle_id(&self) -> VehicleIdx {
        self.vehicle_id
    }

    pub fn vehicle<'a>(&self, problem: &'a VehicleRoutingProblem) -> &'a Vehicle {
        problem.vehicle(self.vehicle_id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[NodeIdx] {
        &self.nodes
    }

    pub fn node(&self, position: usize) -> NodeIdx {
        self.nodes[position]
    }

    pub fn contains(&self, node: NodeIdx) -> bool {
        self.nodes.contains(&node)
    }

    pub fn cost(&self) -> Cost {
        self.cost
    }

    pub fn load(&self) -> usize {
        self.load
    }

    /// Node visited right before `position`, the vehicle start for the first stop.
    pub fn previous_node(&self, problem: &VehicleRoutingProblem, position: usize) -> NodeIdx {
        if position == 0 {
            self.vehicle(problem).start()
        } else {
            self.nodes[position - 1]
        }
    }

    /// Node visited right after `position`, the vehicle end for the last stop.
    pub fn next_node(&self, problem: &VehicleRoutingProblem, position: usize) -> NodeIdx {
        self.node_or_end(problem, position + 1)
    }

    /// Node currently at `position`, or the vehicle end when `position == len`.
    pub fn node_or_end(&self, problem: &VehicleRoutingProblem, position: usize) -> NodeIdx {
        match self.nodes.get(position) {
            Some(&node) => node,
            None => self.vehicle(problem).end(),
        }
    }

    /// Every arc travelled by the vehicle, from its start to its end.
    pub fn arcs<'a>(
        &'a self,
        problem: &VehicleRoutingProblem,
    ) -> impl Iterator<Item = (NodeIdx, NodeIdx)> + use<'a> {
        let vehicle = self.vehicle(problem);
        let (start, end) = (vehicle.start(), vehicle.end());

        let froms = std::iter::once(start).chain(self.nodes.iter().copied());
        let tos = self.nodes.iter().copied().chain(std::iter::once(end));

        froms.zip(tos)
    }

    /// Whether adding `demand` keeps the route within its vehicle capacity.
    pub fn can_take(&self, problem: &VehicleRoutingProblem, demand: usize) -> bool {
        match self.vehicle(problem).capacity() {
            Some(capacity) => self.load + demand <= capacity,
            None => true,
        }
    }

    /// Whether the load still fits after trading `removed` demand for `added`.
    pub fn can_exchange(&self, problem: &VehicleRoutingProblem, removed: usize, added: usize) -> bool {
        match self.vehicle(problem).capacity() {
            Some(capacity) => self.load.saturating_sub(removed) + added <= capacity,
            None => true,
        }
    }

    pub fn capacity_excess(&self, problem: &VehicleRoutingProblem) -> usize {
        match self.vehicle(problem).capacity() {
            Some(capacity) => self.load.saturating_sub(capacity),
            None => 0,
        }
    }

    pub fn push(&mut self, problem: &VehicleRoutingProblem, node: NodeIdx) {
        self.nodes.push(node);
        self.update_data(problem);
    }

    pub fn insert(&mut self, problem: &VehicleRoutingProblem, position: usize, node: NodeIdx) {
        self.nodes.insert(position, node);
        self.update_data(problem);
    }

    pub fn remove(&mut self, problem: &VehicleRoutingProblem, position: usize) -> NodeIdx {
        let node = self.nodes.remove(position);
        self.update_data(problem);
        node
    }

    /// Puts `node` at `position` and returns the stop it replaced.
    pub fn replace(
        &mut self,
        problem: &VehicleRoutingProblem,
        position: usize,
        node: NodeIdx,
    ) -> NodeIdx {
        let replaced = std::mem::replace(&mut self.nodes[position], node);
        self.update_data(problem);
        replaced
    }

    /// Reverses the stops between `from` and `to`, both inclusive.
    pub fn reverse(&mut self, problem: &VehicleRoutingProblem, from: usize, to: usize) {
        self.nodes[from..=to].reverse();
        self.update_data(problem);
    }

    fn update_data(&mut self, problem: &VehicleRoutingProblem) {
        self.cost = self
            .arcs(problem)
            .map(|(from, to)| problem.travel_cost(from, to))
            .sum();
        self.load = self.nodes.iter().map(|&node| problem.demand(node)).sum();
    }
}

#[cfg(test)]
mod tests {
    use crate::{problem::location::NodeIdx, test_utils};

    #[test]
    fn test_route_cost_closed() {
        let problem = test_utils::create_line_problem(5, 1, false);
        let route = test_utils::create_route(&problem, 0, &[2, 4, 1]);

        // 0 -> 2 -> 4 -> 1 -> 0 on a line with 10 per unit
        assert_eq!(route.cost(), 20 + 20 + 30 + 10);
        assert_eq!(route.load(), 3);
    }

    #[test]
    fn test_route_cost_open_ignores_return() {
        let problem = test_utils::create_line_problem(5, 1, true);
        let route = test_utils::create_route(&problem, 0, &[1, 2, 4]);

        assert_eq!(route.cost(), 40);
        assert_eq!(
            route.arcs(&problem).last(),
            Some((NodeIdx::new(4), NodeIdx::new(5)))
        );
    }

    #[test]
    fn test_neighbours() {
        let problem = test_utils::create_line_problem(5, 1, false);
        let route = test_utils::create_route(&problem, 0, &[3, 1]);

        assert_eq!(route.previous_node(&problem, 0), NodeIdx::new(0));
        assert_eq!(route.previous_node(&problem, 1), NodeIdx::new(3));
        assert_eq!(route.next_node(&problem, 0), NodeIdx::new(1));
        assert_eq!(route.next_node(&problem, 1), NodeIdx::new(0));
        assert_eq!(route.node_or_end(&problem, 2), NodeIdx::new(0));
    }

    #[test]
    fn test_mutations_keep_cost_in_sync() {
        let problem = test_utils::create_line_problem(6, 1, false);
        let mut route = test_utils::create_route(&problem, 0, &[1, 2, 3]);

        route.reverse(&problem, 0, 2);
        assert_eq!(route.nodes(), &[NodeIdx::new(3), NodeIdx::new(2), NodeIdx::new(1)]);
        assert_eq!(route.cost(), 60);

        let removed = route.remove(&problem, 1);
        assert_eq!(removed, NodeIdx::new(2));
        assert_eq!(route.cost(), 60);

        route.insert(&problem, 0, NodeIdx::new(5));
        assert_eq!(route.cost(), 50 + 20 + 20 + 10);
        assert_eq!(route.load(), 3);

        let replaced = route.replace(&problem, 1, NodeIdx::new(4));
        assert_eq!(replaced, NodeIdx::new(3));
        assert_eq!(route.cost(), 50 + 10 + 30 + 10);
        assert_eq!(route.load(), 3);
    }

    #[test]
    fn test_empty_route() {
        let problem = test_utils::create_line_problem(3, 1, true);
        let route = test_utils::create_route(&problem, 0, &[]);

        assert_eq!(route.cost(), 0);
        assert_eq!(route.arcs(&problem).count(), 1);
    }
}
