//! Generic parallel execution framework
//!
//! The parallel module handles **system resources** and **execution strategy**
//! only. It knows nothing about directories or formatters:
//!
//! - **Resource Discovery**: detects available CPU cores using `num_cpus::get()`
//! - **Execution Strategy**: sequential vs parallel execution with worker management
//! - **Ordering**: results are returned in submission order, whatever the completion order
//! - **Fail Fast**: the first failing work item stops further work and is reported
//!
//! ```text
//! ┌─────────────────┐    ┌──────────────────┐    ┌─────────────────┐
//! │   Client        │    │   Parallel       │    │   System        │
//! │   (Dispatch)    │───▶│   Module         │───▶│   Resources     │
//! │                 │    │                  │    │                 │
//! │ • Work units    │    │ • CPU cores      │    │ • Hardware      │
//! │ • Domain logic  │    │ • Thread mgmt    │    │ • OS limits     │
//! └─────────────────┘    └──────────────────┘    └─────────────────┘
//! ```
//!
//! # Example Usage
//!
//! ```rust
//! use cppfmt::parallel::ExecutionStrategy;
//!
//! let workers = ExecutionStrategy::calculate_optimal_workers(0);
//! let strategy = ExecutionStrategy::auto(3, 2, workers);
//!
//! let doubled = strategy
//!     .execute(vec![1, 2, 3], |x, _worker_id| Ok(x * 2), None::<fn(usize, usize, usize)>)
//!     .unwrap();
//! assert_eq!(doubled, vec![2, 4, 6]);
//! ```

pub mod core;

// Re-export main types for easier access
pub use self::core::{ExecutionStrategy, ParallelExecutor, SequentialExecutor};
