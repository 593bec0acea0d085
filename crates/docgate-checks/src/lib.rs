//! Build, link and performance checks for a static documentation site.
//!
//! Each check is independent: the build verifier and performance gate drive
//! the site's external build command, the link checker reads the source tree.

pub mod error;
pub mod links;
pub mod perf;
pub mod process;
pub mod size;
pub mod verify;

pub use error::CheckError;
pub use links::{LinkChecker, LinkFinding, LinkReport};
pub use perf::{PerfConfig, PerfGate, PerfReport, ThresholdViolation, Thresholds};
pub use process::{BuildCommand, BuildRun};
pub use size::{dir_size, human_size};
pub use verify::{BuildVerifier, VerifyConfig, VerifyResult};
