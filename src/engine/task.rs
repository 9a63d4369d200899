use std::future::Future;

/// One unit of work a virtual user repeats until the run ends.
///
/// `vu` is the virtual user's id, assigned by the engine and stable for the
/// lifetime of that user. Implementations report nothing back; whatever they
/// want known about an iteration they log themselves.
pub trait VirtualUserTask: Send + Sync + 'static {
    fn run_iteration(&self, vu: u64) -> impl Future<Output = ()> + Send;
}
