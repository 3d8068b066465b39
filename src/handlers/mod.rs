// handlers/mod.rs
//
// resource      generic list/get/create/update/delete, one instance per entity
// current_user  GET /api/currentUser
// system_info   GET /api/systemInfo
// service       public / and /health

pub mod current_user;
pub mod resource;
pub mod service;
pub mod system_info;

pub use service::{route_table, RouteInfo};
