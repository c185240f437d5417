use crate::{
    problem::{location::Location, vehicle_routing_problem::VehicleRoutingProblem},
    solver::solution::routing_solution::RoutingSolution,
};

/// Maps every route back to the labels of its stops, in visiting order.
///
/// The depot, the open-route sink and any node without a location are
/// dropped. Vehicles without stops get an empty list.
pub fn extract_routes(
    problem: &VehicleRoutingProblem,
    solution: &RoutingSolution,
    locations: &[Location],
) -> Vec<Vec<String>> {
    solution
        .routes
        .iter()
        .map(|route| {
            route
                .iter()
                .filter(|&&node| problem.is_stop(node))
                .filter_map(|&node| locations.get(node.get()))
                .map(|location| location.label().to_owned())
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        problem::location::NodeIdx,
        solver::{score::Score, solution::routing_solution::RoutingSolution},
        test_utils,
    };

    fn solution_with_routes(routes: Vec<Vec<usize>>) -> RoutingSolution {
        RoutingSolution {
            routes: routes
                .into_iter()
                .map(|route| route.into_iter().map(NodeIdx::new).collect())
                .collect(),
            total_cost: 0,
            max_span: 0,
            objective: 0,
            feasible: true,
            score: Score::ZERO,
        }
    }

    #[test]
    fn test_extract_drops_depot_and_sink() {
        let problem = test_utils::create_line_problem(4, 3, true);
        let locations = test_utils::labelled_locations(4);
        let solution = solution_with_routes(vec![vec![0, 2, 1, 4], vec![3], vec![]]);

        let routes = extract_routes(&problem, &solution, &locations);

        assert_eq!(
            routes,
            vec![
                vec!["Stop 2".to_owned(), "Stop 1".to_owned()],
                vec!["Stop 3".to_owned()],
                vec![],
            ]
        );
    }

    #[test]
    fn test_extract_keeps_duplicate_labels() {
        let problem = test_utils::create_line_problem(3, 1, false);
        let locations = vec![
            Location::new("Depot", 0.0, 0.0),
            Location::new("Same street", 1.0, 0.0),
            Location::new("Same street", 1.0, 0.0),
        ];
        let solution = solution_with_routes(vec![vec![2, 1]]);

        let routes = extract_routes(&problem, &solution, &locations);

        assert_eq!(routes, vec![vec!["Same street"; 2]]);
    }
}
