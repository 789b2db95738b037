//! Application glue.
//!
//! - **queue**: bounded event FIFO between the input and render tasks
//! - **scheduler**: cooperative input/render loop with escape timeouts

pub mod queue;
pub mod scheduler;

pub use queue::EventQueue;
pub use scheduler::{Flow, Input, InputSource, Scheduler, Surface};
