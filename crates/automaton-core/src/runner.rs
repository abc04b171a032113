//! Fixed-interval tick loop.
//!
//! [`run`] drives an [`Automaton`] the way an interactive front end would:
//! once per tick it calls [`Automaton::step`] (a no-op while paused), hands
//! the result to a [`TickCallback`], then sleeps for the tick interval.
//! The loop ends when:
//!
//! - the [`StopHandle`] is triggered (the quit intent)
//! - `max_ticks` ticks have run
//! - `max_real_time_seconds` of wall-clock time have elapsed
//! - every cell is dead and `stop_on_extinction` is set
//!
//! Ticks are counted whether or not the automaton is paused.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::config::SimulationConfig;
use crate::controller::{Automaton, GenerationSummary};

/// Why the tick loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The stop handle was triggered.
    Stopped,
    /// Reached the configured `max_ticks` limit.
    MaxTicksReached,
    /// Reached the configured `max_real_time_seconds` limit.
    MaxRealTimeReached,
    /// Every cell died and `stop_on_extinction` was set.
    Extinction,
}

/// Cloneable quit signal shared between the tick loop and whoever may end
/// it (a Ctrl-C handler, a callback, a test).
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    stopped: Arc<AtomicBool>,
}

impl StopHandle {
    /// Create a handle that has not been triggered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the loop to end before its next tick.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Release);
    }

    /// Whether a stop has been requested.
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }
}

/// Limits and pacing for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunBounds {
    /// Real-time milliseconds between ticks (0 = no sleep).
    pub tick_interval_ms: u64,
    /// Maximum ticks (0 = unlimited).
    pub max_ticks: u64,
    /// Maximum wall-clock seconds (0 = unlimited).
    pub max_real_time_seconds: u64,
    /// End the run once a generation leaves no live cells.
    pub stop_on_extinction: bool,
}

impl From<&SimulationConfig> for RunBounds {
    fn from(config: &SimulationConfig) -> Self {
        Self {
            tick_interval_ms: config.tick_interval_ms,
            max_ticks: config.max_ticks,
            max_real_time_seconds: config.max_real_time_seconds,
            stop_on_extinction: config.stop_on_extinction,
        }
    }
}

impl RunBounds {
    const fn tick_limit_reached(&self, tick: u64) -> bool {
        self.max_ticks > 0 && tick >= self.max_ticks
    }

    fn time_limit_reached(&self, started_at: DateTime<Utc>) -> bool {
        self.max_real_time_seconds > 0 && elapsed_seconds(started_at) >= self.max_real_time_seconds
    }
}

fn elapsed_seconds(started_at: DateTime<Utc>) -> u64 {
    let elapsed = Utc::now().signed_duration_since(started_at).num_seconds();
    // `num_seconds` can be negative if the clock steps back; treat as 0.
    u64::try_from(elapsed.max(0)).unwrap_or(u64::MAX)
}

/// Result of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationResult {
    /// The reason the loop ended.
    pub end_reason: EndReason,
    /// The last generation advanced, if any.
    pub final_summary: Option<GenerationSummary>,
    /// Ticks executed, paused ticks included.
    pub total_ticks: u64,
}

/// Callback invoked after every tick.
///
/// `summary` is `None` for ticks on which the automaton was paused.
pub trait TickCallback: Send {
    /// Called after each tick.
    fn on_tick(&mut self, tick: u64, summary: Option<&GenerationSummary>, automaton: &Automaton);
}

/// A no-op tick callback.
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    fn on_tick(
        &mut self,
        _tick: u64,
        _summary: Option<&GenerationSummary>,
        _automaton: &Automaton,
    ) {
    }
}

/// Run the tick loop until a termination condition is met.
pub async fn run(
    automaton: &mut Automaton,
    bounds: &RunBounds,
    stop: &StopHandle,
    callback: &mut dyn TickCallback,
) -> SimulationResult {
    let started_at = Utc::now();
    let mut final_summary: Option<GenerationSummary> = None;
    let mut total_ticks: u64 = 0;

    info!(
        max_ticks = bounds.max_ticks,
        max_real_time_seconds = bounds.max_real_time_seconds,
        tick_interval_ms = bounds.tick_interval_ms,
        paused = automaton.is_paused(),
        mode = %automaton.mode(),
        "Simulation starting"
    );

    let end_reason = loop {
        // --- Check stop request (before tick) ---
        if stop.is_stopped() {
            info!("Stop requested");
            break EndReason::Stopped;
        }

        // --- Check time limit (before tick) ---
        if bounds.time_limit_reached(started_at) {
            info!(
                max_seconds = bounds.max_real_time_seconds,
                elapsed = elapsed_seconds(started_at),
                "Real-time limit reached"
            );
            break EndReason::MaxRealTimeReached;
        }

        // --- Execute tick ---
        let summary = automaton.step();
        total_ticks = total_ticks.saturating_add(1);

        callback.on_tick(total_ticks, summary.as_ref(), automaton);

        if let Some(summary) = summary {
            final_summary = Some(summary);

            // --- Check extinction ---
            if bounds.stop_on_extinction && summary.population == 0 {
                info!(generation = summary.generation, "All cells dead -- extinction");
                break EndReason::Extinction;
            }
        }

        // --- Check tick limit (after tick) ---
        if bounds.tick_limit_reached(total_ticks) {
            info!(tick = total_ticks, max_ticks = bounds.max_ticks, "Tick limit reached");
            break EndReason::MaxTicksReached;
        }

        // --- Sleep for tick interval ---
        if bounds.tick_interval_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(bounds.tick_interval_ms)).await;
        }
    };

    SimulationResult {
        end_reason,
        final_summary,
        total_ticks,
    }
}

/// Log the end of a run.
pub fn log_simulation_end(result: &SimulationResult) {
    info!(
        reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        final_generation = result.final_summary.as_ref().map(|s| s.generation),
        final_population = result.final_summary.as_ref().map(|s| s.population),
        "Simulation ended"
    );

    if let Some(ref summary) = result.final_summary {
        info!(
            generation = summary.generation,
            mode = %summary.mode,
            population = summary.population,
            neutral = summary.counts.neutral,
            happy = summary.counts.happy,
            angry = summary.counts.angry,
            "Final generation summary"
        );
    } else {
        warn!("Simulation ended with no generations advanced");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use automaton_types::Mode;

    use super::*;
    use crate::controller::AutomatonOptions;
    use crate::sources::PresetLibrary;

    fn automaton() -> Automaton {
        let presets = PresetLibrary::from_json(
            r#"{"Blinker": [[1, 1, 1]], "Dot": [[1]], "Plus": [[0,1,0],[1,1,1],[0,1,0]]}"#,
        )
        .unwrap();
        Automaton::new(
            9,
            9,
            AutomatonOptions {
                presets,
                seed: Some(3),
                ..AutomatonOptions::default()
            },
        )
        .unwrap()
    }

    fn bounds(max_ticks: u64) -> RunBounds {
        RunBounds {
            max_ticks,
            ..RunBounds::default()
        }
    }

    /// Records every tick it sees.
    #[derive(Default)]
    struct Recorder {
        ticks: Vec<u64>,
        advanced: usize,
    }

    impl TickCallback for Recorder {
        fn on_tick(&mut self, tick: u64, summary: Option<&GenerationSummary>, _automaton: &Automaton) {
            self.ticks.push(tick);
            if summary.is_some() {
                self.advanced = self.advanced.saturating_add(1);
            }
        }
    }

    /// Triggers the stop handle after a fixed number of ticks.
    struct StopAfter {
        after: u64,
        stop: StopHandle,
    }

    impl TickCallback for StopAfter {
        fn on_tick(&mut self, tick: u64, _summary: Option<&GenerationSummary>, _automaton: &Automaton) {
            if tick >= self.after {
                self.stop.stop();
            }
        }
    }

    #[tokio::test]
    async fn bounded_by_max_ticks() {
        let mut a = automaton();
        a.load_preset("Blinker");
        a.resume();

        let result = run(&mut a, &bounds(5), &StopHandle::new(), &mut NoOpCallback).await;

        assert_eq!(result.end_reason, EndReason::MaxTicksReached);
        assert_eq!(result.total_ticks, 5);
        assert_eq!(a.generation(), 5);
        assert_eq!(result.final_summary.map(|s| s.generation), Some(5));
    }

    #[tokio::test]
    async fn stop_before_first_tick() {
        let mut a = automaton();
        let stop = StopHandle::new();
        stop.stop();

        let result = run(&mut a, &bounds(0), &stop, &mut NoOpCallback).await;

        assert_eq!(result.end_reason, EndReason::Stopped);
        assert_eq!(result.total_ticks, 0);
        assert!(result.final_summary.is_none());
    }

    #[tokio::test]
    async fn callback_can_stop_the_loop() {
        let mut a = automaton();
        a.resume();
        let stop = StopHandle::new();
        let mut cb = StopAfter {
            after: 3,
            stop: stop.clone(),
        };

        let result = run(&mut a, &bounds(0), &stop, &mut cb).await;

        assert_eq!(result.end_reason, EndReason::Stopped);
        assert_eq!(result.total_ticks, 3);
        assert!(stop.is_stopped());
    }

    #[tokio::test]
    async fn paused_ticks_count_but_do_not_advance() {
        let mut a = automaton();
        let before = a.grid().clone();
        let mut recorder = Recorder::default();

        let result = run(&mut a, &bounds(4), &StopHandle::new(), &mut recorder).await;

        assert_eq!(result.total_ticks, 4);
        assert!(result.final_summary.is_none());
        assert_eq!(recorder.ticks, vec![1, 2, 3, 4]);
        assert_eq!(recorder.advanced, 0);
        assert_eq!(a.grid(), &before);
    }

    #[tokio::test]
    async fn extinction_stops_when_enabled() {
        let mut a = automaton();
        a.load_preset("Dot");
        a.resume();
        let bounds = RunBounds {
            max_ticks: 10,
            stop_on_extinction: true,
            ..RunBounds::default()
        };

        let result = run(&mut a, &bounds, &StopHandle::new(), &mut NoOpCallback).await;

        assert_eq!(result.end_reason, EndReason::Extinction);
        assert_eq!(result.total_ticks, 1);
        assert_eq!(result.final_summary.map(|s| s.population), Some(0));
    }

    #[tokio::test]
    async fn extinction_ignored_when_disabled() {
        let mut a = automaton();
        a.load_preset("Plus");
        a.set_mode(Mode::Emotional);
        a.resume();

        let result = run(&mut a, &bounds(6), &StopHandle::new(), &mut NoOpCallback).await;

        assert_eq!(result.end_reason, EndReason::MaxTicksReached);
        assert_eq!(a.grid().population(), 0);
    }

    #[tokio::test]
    async fn bounded_by_real_time() {
        let mut a = automaton();
        a.resume();
        let bounds = RunBounds {
            tick_interval_ms: 50,
            max_real_time_seconds: 1,
            ..RunBounds::default()
        };

        let result = run(&mut a, &bounds, &StopHandle::new(), &mut NoOpCallback).await;

        assert_eq!(result.end_reason, EndReason::MaxRealTimeReached);
        assert!(result.total_ticks >= 1);
    }

    #[test]
    fn bounds_from_config() {
        let config = SimulationConfig {
            max_ticks: 12,
            stop_on_extinction: true,
            ..SimulationConfig::default()
        };
        let bounds = RunBounds::from(&config);
        assert_eq!(bounds.tick_interval_ms, 200);
        assert_eq!(bounds.max_ticks, 12);
        assert!(bounds.stop_on_extinction);
        assert!(bounds.tick_limit_reached(12));
        assert!(!bounds.tick_limit_reached(11));
    }
}
