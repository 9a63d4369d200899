use std::future::Future;
use std::time::Duration;

/// Suspension between two iterations of the same virtual user.
pub trait IterationPause: Send + Sync + 'static {
    fn pause(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Yields the virtual user's task back to the runtime for `duration`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPause;

impl IterationPause for TokioPause {
    fn pause(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}
