//! Two timed loops joined by a completion barrier.
//!
//! Each loop runs a fixed number of iterations with a fixed pause between
//! them. The loops share nothing and are never cancelled; the caller only
//! waits for all of them to finish before reporting completion.

use std::time::Duration;

use anyhow::Context as _;
use tokio::sync::mpsc;

/// A loop that runs `iterations` times, sleeping `period` after each one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimedLoop {
    pub name: &'static str,
    pub iterations: u32,
    pub period: Duration,
}

pub const LOGIC_LOOP: TimedLoop = TimedLoop {
    name: "Logic",
    iterations: 5,
    period: Duration::from_secs(1),
};

/// Printed once before the loops start.
pub const BANNER: &str = "Hello Gopen!";

pub const RENDER_LOOP: TimedLoop = TimedLoop {
    name: "Render",
    iterations: 5,
    period: Duration::from_millis(500),
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoopEvent {
    Iteration { name: &'static str, index: u32 },
    Finished,
}

impl std::fmt::Display for LoopEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoopEvent::Iteration { name, index } => write!(f, "{name} Loop Iteration: {index}"),
            LoopEvent::Finished => f.write_str("Test Loop Finished"),
        }
    }
}

/// Spawns every loop and waits for all of them. Returns the number of
/// iterations each loop completed, in the order given.
///
/// `Finished` is sent only after the barrier, so it is always the last event.
pub async fn run(
    loops: &[TimedLoop],
    events: mpsc::UnboundedSender<LoopEvent>,
) -> anyhow::Result<Vec<u32>> {
    let handles: Vec<_> = loops
        .iter()
        .copied()
        .map(|timed| tokio::spawn(timed_loop(timed, events.clone())))
        .collect();

    let mut completed = Vec::with_capacity(handles.len());
    for (result, timed) in futures::future::join_all(handles).await.into_iter().zip(loops) {
        completed.push(result.with_context(|| format!("{} loop did not finish", timed.name))?);
    }

    // A closed receiver only means nobody is listening any more.
    let _ = events.send(LoopEvent::Finished);
    Ok(completed)
}

async fn timed_loop(timed: TimedLoop, events: mpsc::UnboundedSender<LoopEvent>) -> u32 {
    let mut done = 0;
    for index in 0..timed.iterations {
        let _ = events.send(LoopEvent::Iteration {
            name: timed.name,
            index,
        });
        tokio::time::sleep(timed.period).await;
        done += 1;
    }
    done
}

#[cfg(test)]
mod tests {
    use tokio::time::Instant;

    use super::*;

    #[test]
    fn banner_text() {
        assert_eq!(BANNER, "Hello Gopen!");
    }

    async fn collect(loops: &[TimedLoop]) -> (anyhow::Result<Vec<u32>>, Vec<LoopEvent>) {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let result = run(loops, tx).await;
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        (result, events)
    }

    #[tokio::test(start_paused = true)]
    async fn finished_only_after_both_loops_complete() {
        let (result, events) = collect(&[LOGIC_LOOP, RENDER_LOOP]).await;

        assert_eq!(result.unwrap(), vec![5, 5]);
        assert_eq!(events.last(), Some(&LoopEvent::Finished));
        assert_eq!(events.iter().filter(|e| **e == LoopEvent::Finished).count(), 1);
        for name in ["Logic", "Render"] {
            let indices: Vec<u32> = events
                .iter()
                .filter_map(|e| match e {
                    LoopEvent::Iteration { name: n, index } if *n == name => Some(*index),
                    _ => None,
                })
                .collect();
            assert_eq!(indices, vec![0, 1, 2, 3, 4], "{name}");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn barrier_waits_for_the_slowest_loop() {
        let start = Instant::now();
        let (result, _) = collect(&[LOGIC_LOOP, RENDER_LOOP]).await;

        assert!(result.is_ok());
        // 5 x 1s for the logic loop; the render loop is done after 2.5s
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(5), "{elapsed:?}");
        assert!(elapsed < Duration::from_millis(5100), "{elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn loops_interleave_by_their_own_period() {
        let (_, events) = collect(&[LOGIC_LOOP, RENDER_LOOP]).await;

        let render_done = events
            .iter()
            .position(|e| {
                *e == LoopEvent::Iteration {
                    name: "Render",
                    index: 4,
                }
            })
            .unwrap();
        let logic_last = events
            .iter()
            .position(|e| {
                *e == LoopEvent::Iteration {
                    name: "Logic",
                    index: 4,
                }
            })
            .unwrap();
        assert!(render_done < logic_last);
    }

    #[tokio::test(start_paused = true)]
    async fn no_loops_finish_immediately() {
        let (result, events) = collect(&[]).await;
        assert_eq!(result.unwrap(), Vec::<u32>::new());
        assert_eq!(events, vec![LoopEvent::Finished]);
    }

    #[test]
    fn events_print_like_the_demo() {
        let event = LoopEvent::Iteration {
            name: "Logic",
            index: 3,
        };
        assert_eq!(event.to_string(), "Logic Loop Iteration: 3");
        assert_eq!(LoopEvent::Finished.to_string(), "Test Loop Finished");
    }
}
