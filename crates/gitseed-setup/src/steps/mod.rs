//! Built-in setup steps.

pub mod commit;
pub mod init;
pub mod preflight;
pub mod stage;

pub use commit::CommitStep;
pub use init::InitStep;
pub use preflight::PreflightStep;
pub use stage::StageStep;
