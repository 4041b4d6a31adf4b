//! Email delivery: retrying single sends and concurrent batches.

mod batch;
mod outcome;
mod retry;
mod sender;

pub use batch::BatchDispatcher;
pub use outcome::DeliveryOutcome;
pub use retry::RetryPolicy;
pub use sender::DeliveryClient;
