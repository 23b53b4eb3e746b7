pub mod endpoints;
pub mod net;

// Re-exports for convenience
pub use endpoints::auth::ServerStatus;
pub use endpoints::vehicles::{BulkVehicleUpdate, ExportFormat, ExportedVehicles};
pub use net::{default_http_client, ApiClient, Envelope, RequestDescriptor};
