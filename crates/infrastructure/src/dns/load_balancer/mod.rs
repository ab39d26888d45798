pub mod pool;
pub mod retry;

pub use pool::ResolverPool;
pub use retry::{AttemptBudget, AttemptOutcome, RetryController, StatusPolicy};
