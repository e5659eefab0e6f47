//! Discrete-event simulation of classic CPU scheduling policies.
//!
//! ```
//! use schedsim::scheduler::{run, Policy, Process};
//!
//! let processes = [
//!     Process::new(1, 0, 5),
//!     Process::new(2, 1, 3),
//!     Process::new(3, 2, 8),
//! ];
//! let schedule = run(Policy::Fcfs, &processes).unwrap();
//! assert_eq!(schedule.process(2).unwrap().waiting_time(), 4);
//! ```

pub mod config;
pub mod error;
pub mod input;
pub mod report;
pub mod scheduler;
pub mod view;

pub use error::{Result, SchedError};
pub use scheduler::{run, Policy, Process, Schedule};
