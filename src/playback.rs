//! Automatic slice advancement.
//!
//! While playing, the controller owns a [`Ticker`]: a tokio task that
//! pushes a [`PlaybackTick`] into the session's tick channel at a fixed
//! cadence. The ticker is aborted when playback stops or when the
//! controller is dropped, so a disposed session never produces another
//! tick. Ticks already queued when playback stops carry the old run's
//! generation and are refused by [`PlaybackController::accepts`]. Without
//! a tick channel (headless use, tests) ticks are driven by
//! calling `ViewerSession::tick` directly.

use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

pub const PLAYBACK_INTERVAL: Duration = Duration::from_millis(100);

/// One playback step, tagged with the run that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackTick {
    generation: u64,
}

impl PlaybackTick {
    pub fn new(generation: u64) -> Self {
        Self { generation }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

pub type TickSink = UnboundedSender<PlaybackTick>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
}

/// Recurring tick task, aborted on drop.
#[derive(Debug)]
pub struct Ticker {
    handle: JoinHandle<()>,
}

impl Ticker {
    fn spawn(interval: Duration, generation: u64, sink: TickSink) -> Option<Self> {
        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(err) => {
                log::warn!("Playback ticker unavailable outside a tokio runtime: {err}");
                return None;
            }
        };

        let handle = runtime.spawn(async move {
            let mut ticks = tokio::time::interval_at(Instant::now() + interval, interval);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticks.tick().await;
                if sink.send(PlaybackTick::new(generation)).is_err() {
                    break;
                }
            }
        });
        log::debug!("Playback ticker started ({} ms)", interval.as_millis());
        Some(Self { handle })
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
        log::debug!("Playback ticker stopped");
    }
}

#[derive(Debug)]
pub struct PlaybackController {
    state: PlaybackState,
    interval: Duration,
    sink: Option<TickSink>,
    ticker: Option<Ticker>,
    generation: u64,
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new(PLAYBACK_INTERVAL)
    }
}

impl PlaybackController {
    pub fn new(interval: Duration) -> Self {
        Self {
            state: PlaybackState::Stopped,
            interval,
            sink: None,
            ticker: None,
            generation: 0,
        }
    }

    /// Routes ticks into `sink` whenever playback runs.
    pub fn with_sink(mut self, sink: TickSink) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn has_ticker(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Ticks count only while playing and only for the current run. Ticks
    /// queued before a pause never leak into the next run.
    pub fn accepts(&self, tick: PlaybackTick) -> bool {
        self.is_playing() && tick.generation() == self.generation
    }

    pub fn play(&mut self) {
        if self.is_playing() {
            return;
        }
        self.state = PlaybackState::Playing;
        self.generation = self.generation.wrapping_add(1);
        if let Some(sink) = &self.sink {
            self.ticker = Ticker::spawn(self.interval, self.generation, sink.clone());
        }
    }

    pub fn pause(&mut self) {
        self.state = PlaybackState::Stopped;
        self.ticker = None;
    }

    pub fn toggle(&mut self) {
        match self.state {
            PlaybackState::Stopped => self.play(),
            PlaybackState::Playing => self.pause(),
        }
    }
}
