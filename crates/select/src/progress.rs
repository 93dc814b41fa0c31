//! Progress reporting for long pool assembly.

/// Receives `(done, total)` updates while a pool is being assembled.
///
/// Any `FnMut(usize, usize)` closure is a `Progress`.
pub trait Progress {
    /// Called after each unit of work.
    fn update(&mut self, done: usize, total: usize);
}

/// Discards all progress updates.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Progress for Silent {
    fn update(&mut self, _done: usize, _total: usize) {}
}

impl<F: FnMut(usize, usize)> Progress for F {
    fn update(&mut self, done: usize, total: usize) {
        self(done, total)
    }
}
