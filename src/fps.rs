//! Once-per-second frame counter.
//!
//! The render loop signals every finished frame through a small bounded
//! channel; a task on the demo's tokio runtime drains it and reports the count
//! once per second. A full channel makes the render thread wait rather than
//! lose a frame.

use std::time::Duration;

use tokio::{
    runtime::Handle,
    sync::mpsc,
    task::JoinHandle,
    time::{self, Instant},
};

const CHANNEL_CAPACITY: usize = 4;
const REPORT_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug)]
pub struct FpsCounter {
    frames: mpsc::Sender<()>,
    task: JoinHandle<()>,
}

impl FpsCounter {
    /// Starts a counter that logs `fps: <n>` every second.
    pub fn start(handle: &Handle) -> Self {
        Self::start_with(handle, |frames| log::info!("fps: {frames}"))
    }

    pub fn start_with<F>(handle: &Handle, mut report: F) -> Self
    where
        F: FnMut(u32) + Send + 'static,
    {
        let (frames, mut rx) = mpsc::channel::<()>(CHANNEL_CAPACITY);
        let task = handle.spawn(async move {
            // the first report comes one full period after start
            let mut second = time::interval_at(Instant::now() + REPORT_PERIOD, REPORT_PERIOD);
            let mut count = 0;
            loop {
                tokio::select! {
                    _ = second.tick() => {
                        report(count);
                        count = 0;
                    }
                    frame = rx.recv() => match frame {
                        Some(()) => count += 1,
                        None => break,
                    },
                }
            }
        });
        Self { frames, task }
    }

    /// Signals one finished frame. Blocks while the channel is full, so it must
    /// not be called from inside the runtime; async code uses
    /// [`frame_async`](Self::frame_async).
    pub fn frame(&self) {
        if self.frames.blocking_send(()).is_err() {
            log::warn!("fps counter stopped, frame not counted");
        }
    }

    pub async fn frame_async(&self) {
        if self.frames.send(()).await.is_err() {
            log::warn!("fps counter stopped, frame not counted");
        }
    }
}

impl Drop for FpsCounter {
    fn drop(&mut self) {
        self.task.abort();
    }
}
