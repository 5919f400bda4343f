pub mod api_client;
pub mod single_flight;
