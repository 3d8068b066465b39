pub mod migrate;
pub mod routes;
pub mod token;
