pub mod aggregator;
mod api;
pub mod commands;
pub mod context;
pub mod domain;
pub mod pages;
pub mod persistence;
pub mod ports;
pub mod refresh;
pub mod view;

pub use aggregator::{fan_in, LoadMode, ResourceSpec};
pub use commands::{Commands, Notice, NoticeLevel};
pub use context::{Cancelled, PageContext};
pub use domain::ConsoleSettings;
pub use pages::{Page, PageKind, PaymentScope};
pub use persistence::FilePersistence;
pub use ports::*;
pub use refresh::ChargingRefresh;
pub use view::*;
