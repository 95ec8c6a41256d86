pub mod config;
pub mod coordinator;
pub mod inventory;
pub mod model;
pub mod output;
pub mod probe;
pub mod score;
pub mod session;

pub use config::Config;
pub use coordinator::ProbeCoordinator;
pub use model::{ProbeOutcome, SecurityScanResult, TargetDescriptor};
pub use probe::Probe;
pub use session::ScanSession;
