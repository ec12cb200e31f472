use std::time::Duration;

pub type Task = Box<dyn FnOnce()>;

/// Runs a task right before the next repaint.
pub trait FrameScheduler {
    fn request_frame(&self, task: Task);
}

/// Runs a task once after a delay on the same event loop.
pub trait Scheduler {
    fn schedule(&self, delay: Duration, task: Task);
}
