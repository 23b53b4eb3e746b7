//! One typed function per backend operation, grouped by resource.
//!
//! Every function returns `ResourceResult`; nothing here panics or logs beyond
//! what [`ApiClient::call`](crate::ApiClient::call) already does.

pub mod auth;
pub mod charging_ports;
pub mod dashboard;
pub mod payments;
pub mod reports;
pub mod rides;
pub mod settings;
pub mod vehicles;
