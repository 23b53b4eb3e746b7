pub mod events;
pub mod reducer;
pub mod state;
pub mod store;

pub use events::{LoadId, ViewEvent};
pub use reducer::reduce;
pub use state::{Field, PageStatus, ViewState};
pub use store::ViewStore;
