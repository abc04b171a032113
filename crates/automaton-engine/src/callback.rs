//! Tick callback that logs generation summaries.

use automaton_core::runner::TickCallback;
use automaton_core::{Automaton, GenerationSummary};
use tracing::{debug, info};

/// Logs a [`GenerationSummary`] every `every` generations.
pub struct SummaryLogger {
    every: u64,
    logged: u64,
}

impl SummaryLogger {
    /// Create a logger. `every == 0` disables summaries.
    pub const fn new(every: u64) -> Self {
        Self { every, logged: 0 }
    }

    /// Number of summaries logged so far.
    pub const fn logged(&self) -> u64 {
        self.logged
    }
}

impl TickCallback for SummaryLogger {
    fn on_tick(&mut self, tick: u64, summary: Option<&GenerationSummary>, automaton: &Automaton) {
        let Some(summary) = summary else {
            debug!(tick, "Paused");
            return;
        };
        if summary.generation.checked_rem(self.every) != Some(0) {
            return;
        }

        self.logged = self.logged.saturating_add(1);
        info!(
            tick,
            generation = summary.generation,
            mode = %summary.mode,
            rules = %automaton.rules(),
            population = summary.population,
            neutral = summary.counts.neutral,
            happy = summary.counts.happy,
            angry = summary.counts.angry,
            changed = summary.changed,
            detonations = summary.detonations,
            "Generation summary"
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use automaton_core::AutomatonOptions;

    use super::*;

    fn running() -> Automaton {
        let mut a = Automaton::new(
            10,
            10,
            AutomatonOptions {
                seed: Some(5),
                ..AutomatonOptions::default()
            },
        )
        .unwrap();
        a.resume();
        a
    }

    #[test]
    fn logs_on_multiples_only() {
        let mut a = running();
        let mut logger = SummaryLogger::new(3);
        for tick in 1..=10 {
            let summary = a.step();
            logger.on_tick(tick, summary.as_ref(), &a);
        }
        // Generations 3, 6 and 9.
        assert_eq!(logger.logged(), 3);
    }

    #[test]
    fn zero_disables_and_paused_ticks_are_skipped() {
        let mut a = running();
        let mut off = SummaryLogger::new(0);
        let summary = a.step();
        off.on_tick(1, summary.as_ref(), &a);
        assert_eq!(off.logged(), 0);

        let mut every = SummaryLogger::new(1);
        a.pause();
        every.on_tick(2, a.step().as_ref(), &a);
        assert_eq!(every.logged(), 0);
    }
}
