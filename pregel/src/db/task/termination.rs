use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Cooperative cancellation, polled once before every superstep
pub trait TerminationFlag: Send + Sync {
    fn running(&self) -> bool;
}

impl<F: Fn() -> bool + Send + Sync> TerminationFlag for F {
    fn running(&self) -> bool {
        self()
    }
}

/// Never stops a run
#[derive(Clone, Copy, Debug, Default)]
pub struct RunToCompletion;

impl TerminationFlag for RunToCompletion {
    fn running(&self) -> bool {
        true
    }
}

/// A flag that can be tripped from any thread holding a clone
#[derive(Clone, Debug, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

impl TerminationFlag for StopFlag {
    fn running(&self) -> bool {
        !self.is_stopped()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn stop_flag_is_shared_between_clones() {
        let flag = StopFlag::new();
        let handle = flag.clone();
        assert!(flag.running());
        std::thread::spawn(move || handle.stop()).join().unwrap();
        assert!(!flag.running());
    }

    #[test]
    fn closures_are_flags() {
        let polls = AtomicUsize::new(0);
        let flag = || polls.fetch_add(1, Ordering::Relaxed) < 2;
        assert!(flag.running());
        assert!(flag.running());
        assert!(!flag.running());
        assert!(RunToCompletion.running());
    }
}
