use courier_geocoding::public::PublicGeocoder;
use courier_optimizer::planner::route_planner::RoutePlanner;

pub struct AppState {
    pub planner: RoutePlanner<PublicGeocoder>,
    /// Every route starts here.
    pub depot: String,
}
