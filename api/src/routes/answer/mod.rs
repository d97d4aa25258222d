pub mod answer_response;
pub mod answer_route;
