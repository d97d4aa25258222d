pub mod answer;
pub mod dashboard_route;
pub mod debug_route;
pub mod health_route;
pub mod test_route;
