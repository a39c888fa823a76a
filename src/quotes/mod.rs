//! Time-of-day quote rotation.
//!
//! A [`QuoteBank`] holds the fixed candidates per phase. A [`QuoteRotator`]
//! draws from it at random while remembering, per phase, the quote it
//! handed out last so the next draw for that phase can skip it.

mod bank;

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

use crate::error::SnapshotError;
use crate::types::TimePhase;

// ---------------------------------------------------------------------------
// Quote bank
// ---------------------------------------------------------------------------

/// Immutable phase → quotes mapping. Every list is non-empty.
#[derive(Debug, Clone)]
pub struct QuoteBank {
    quotes: HashMap<TimePhase, Vec<String>>,
}

impl QuoteBank {
    /// The compiled-in bank covering all six phases.
    pub fn builtin() -> Self {
        let quotes = TimePhase::ALL
            .iter()
            .map(|&phase| {
                let list = bank::for_phase(phase).iter().map(|q| q.to_string()).collect();
                (phase, list)
            })
            .collect();
        Self { quotes }
    }

    /// Build a bank from explicit entries. Phases may be omitted; lists may not be empty.
    pub fn from_entries<I>(entries: I) -> Result<Self, SnapshotError>
    where
        I: IntoIterator<Item = (TimePhase, Vec<String>)>,
    {
        let mut quotes = HashMap::new();
        for (phase, list) in entries {
            if list.is_empty() {
                return Err(SnapshotError::Configuration(format!(
                    "quote list for phase {phase} is empty"
                )));
            }
            quotes.insert(phase, list);
        }
        Ok(Self { quotes })
    }

    /// Candidates for a phase, or `MissingPhase` if the bank has none.
    pub fn candidates(&self, phase: TimePhase) -> Result<&[String], SnapshotError> {
        self.quotes
            .get(&phase)
            .map(Vec::as_slice)
            .ok_or(SnapshotError::MissingPhase(phase))
    }

    pub fn contains(&self, phase: TimePhase) -> bool {
        self.quotes.contains_key(&phase)
    }
}

// ---------------------------------------------------------------------------
// Last-quote memory
// ---------------------------------------------------------------------------

/// Per-phase record of the most recent selection.
///
/// Starts empty and lives as long as its owner; entries are overwritten,
/// never removed.
#[derive(Debug, Default)]
pub struct LastQuoteMemory {
    last: Mutex<HashMap<TimePhase, String>>,
}

impl LastQuoteMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// The quote last handed out for `phase`, if any.
    pub fn get(&self, phase: TimePhase) -> Option<String> {
        self.lock().get(&phase).cloned()
    }

    /// Phases that have seen at least one selection.
    pub fn phases(&self) -> Vec<TimePhase> {
        self.lock().keys().copied().collect()
    }

    // A panic while holding the lock cannot leave the map half-written,
    // so a poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, HashMap<TimePhase, String>> {
        self.last.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ---------------------------------------------------------------------------
// Rotator
// ---------------------------------------------------------------------------

/// Random quote selection without back-to-back repeats per phase.
///
/// The lookup, draw and memory update for one call happen under a single
/// lock, so concurrent requests for the same phase are serialised.
pub struct QuoteRotator {
    bank: QuoteBank,
    memory: Arc<LastQuoteMemory>,
}

impl QuoteRotator {
    pub fn new(bank: QuoteBank, memory: Arc<LastQuoteMemory>) -> Self {
        Self { bank, memory }
    }

    /// Rotator over the built-in bank with fresh memory.
    pub fn builtin() -> Self {
        Self::new(QuoteBank::builtin(), Arc::new(LastQuoteMemory::new()))
    }

    pub fn bank(&self) -> &QuoteBank {
        &self.bank
    }

    pub fn memory(&self) -> &Arc<LastQuoteMemory> {
        &self.memory
    }

    /// Pick a quote for `phase` using the thread-local RNG.
    pub fn select(&self, phase: TimePhase) -> Result<String, SnapshotError> {
        self.select_with(phase, &mut rand::thread_rng())
    }

    /// Pick a quote for `phase` using the supplied RNG.
    pub fn select_with<R: Rng + ?Sized>(
        &self,
        phase: TimePhase,
        rng: &mut R,
    ) -> Result<String, SnapshotError> {
        let candidates = self.bank.candidates(phase)?;

        let mut last = self.memory.lock();
        let previous = last.get(&phase);

        let mut pool: Vec<&String> = match previous {
            Some(prev) if candidates.len() > 1 => {
                candidates.iter().filter(|q| *q != prev).collect()
            }
            _ => candidates.iter().collect(),
        };
        // Every candidate equals the previous pick; nothing to avoid.
        if pool.is_empty() {
            pool = candidates.iter().collect();
        }

        let chosen = pool
            .choose(rng)
            .map(|q| (*q).clone())
            .ok_or(SnapshotError::MissingPhase(phase))?;

        debug!(
            %phase,
            pool = pool.len(),
            candidates = candidates.len(),
            "Quote selected"
        );

        last.insert(phase, chosen.clone());
        Ok(chosen)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn single(phase: TimePhase, quotes: &[&str]) -> QuoteRotator {
        let bank = QuoteBank::from_entries([(
            phase,
            quotes.iter().map(|q| q.to_string()).collect(),
        )])
        .unwrap();
        QuoteRotator::new(bank, Arc::new(LastQuoteMemory::new()))
    }

    #[test]
    fn test_builtin_bank_has_eight_per_phase() {
        let bank = QuoteBank::builtin();
        for &phase in TimePhase::ALL {
            assert_eq!(bank.candidates(phase).unwrap().len(), 8, "{phase}");
        }
    }

    #[test]
    fn test_builtin_quotes_are_distinct_within_phase() {
        let bank = QuoteBank::builtin();
        for &phase in TimePhase::ALL {
            let list = bank.candidates(phase).unwrap();
            let unique: std::collections::HashSet<_> = list.iter().collect();
            assert_eq!(unique.len(), list.len(), "{phase}");
        }
    }

    #[test]
    fn test_no_back_to_back_repeat_over_1000_draws() {
        let rotator = QuoteRotator::builtin();
        for &phase in TimePhase::ALL {
            let mut prev = rotator.select(phase).unwrap();
            for _ in 0..1000 {
                let next = rotator.select(phase).unwrap();
                assert_ne!(next, prev, "repeat in {phase}");
                prev = next;
            }
        }
    }

    #[test]
    fn test_two_quotes_alternate() {
        let rotator = single(TimePhase::Midday, &["a", "b"]);
        let mut rng = StdRng::seed_from_u64(7);
        let first = rotator.select_with(TimePhase::Midday, &mut rng).unwrap();
        for i in 1..50 {
            let q = rotator.select_with(TimePhase::Midday, &mut rng).unwrap();
            let expect_first = i % 2 == 0;
            assert_eq!(q == first, expect_first);
        }
    }

    #[test]
    fn test_single_quote_always_returned() {
        let rotator = single(TimePhase::Night, &["only one"]);
        for _ in 0..20 {
            assert_eq!(rotator.select(TimePhase::Night).unwrap(), "only one");
        }
    }

    #[test]
    fn test_identical_candidates_do_not_starve() {
        let rotator = single(TimePhase::Dawn, &["same", "same"]);
        assert_eq!(rotator.select(TimePhase::Dawn).unwrap(), "same");
        assert_eq!(rotator.select(TimePhase::Dawn).unwrap(), "same");
    }

    #[test]
    fn test_missing_phase_fails_fast() {
        let rotator = single(TimePhase::Dawn, &["a", "b"]);
        let err = rotator.select(TimePhase::Evening).unwrap_err();
        assert!(matches!(err, SnapshotError::MissingPhase(TimePhase::Evening)));
        // Failed lookups leave no trace in memory.
        assert!(rotator.memory().phases().is_empty());
    }

    #[test]
    fn test_empty_list_rejected() {
        let result = QuoteBank::from_entries([(TimePhase::Morning, Vec::new())]);
        assert!(matches!(result, Err(SnapshotError::Configuration(_))));
    }

    #[test]
    fn test_memory_records_last_selection_per_phase() {
        let rotator = QuoteRotator::builtin();
        assert!(rotator.memory().get(TimePhase::Morning).is_none());

        let q = rotator.select(TimePhase::Morning).unwrap();
        assert_eq!(rotator.memory().get(TimePhase::Morning), Some(q));
        assert!(rotator.memory().get(TimePhase::Night).is_none());
        assert_eq!(rotator.memory().phases(), vec![TimePhase::Morning]);
    }

    #[test]
    fn test_selection_is_from_bank() {
        let rotator = QuoteRotator::builtin();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let q = rotator.select_with(TimePhase::Afternoon, &mut rng).unwrap();
            assert!(rotator.bank().candidates(TimePhase::Afternoon).unwrap().contains(&q));
        }
    }

    #[test]
    fn test_shared_memory_across_threads() {
        let rotator = Arc::new(QuoteRotator::builtin());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let rotator = Arc::clone(&rotator);
                std::thread::spawn(move || {
                    let phase = TimePhase::ALL[i % TimePhase::ALL.len()];
                    for _ in 0..200 {
                        rotator.select(phase).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let phases = rotator.memory().phases();
        assert_eq!(phases.len(), TimePhase::ALL.len());
        for phase in phases {
            assert!(rotator.bank().contains(phase));
        }
    }
}
