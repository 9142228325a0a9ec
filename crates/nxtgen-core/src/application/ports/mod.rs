//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `nxtgen-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `CommandRunner`: Child processes
//!   - `ScaffoldObserver`: Progress reporting
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{CommandRunner, Filesystem, ScaffoldObserver, SilentObserver};

#[cfg(test)]
pub use output::MockCommandRunner;
