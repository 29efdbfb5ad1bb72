//! Roster state and the spin/pick protocol.
//!
//! The engine owns three lists: the roster (immutable between imports), the
//! pool of names still eligible, and the picked history. It alternates
//! between `Idle` and `Spinning`; while spinning, timer ticks sample a
//! uniformly random name from the pool for display, and `stop` commits the
//! displayed name as the pick.
//!
//! Ordering invariant: both `stop` and `reset` leave the `Spinning` state
//! *before* touching the pool, so a timer expiry that races a commit lands
//! on the `tick` no-op instead of mutating post-commit state.

use rand::seq::SliceRandom;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpinState {
    Idle,
    Spinning,
}

/// Result of a start request
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StartOutcome {
    /// The spin began; ticks will now sample names
    Started,
    /// Nothing left to pick; state unchanged
    PoolEmpty,
}

pub struct PickerEngine {
    roster: Vec<String>,
    pool: Vec<String>,
    picked: Vec<String>,
    state: SpinState,
    displayed: Option<String>,
}

impl PickerEngine {
    pub fn new(roster: Vec<String>) -> Self {
        let pool = roster.clone();
        Self {
            roster,
            pool,
            picked: Vec::new(),
            state: SpinState::Idle,
            displayed: None,
        }
    }

    pub fn roster(&self) -> &[String] {
        &self.roster
    }

    pub fn pool(&self) -> &[String] {
        &self.pool
    }

    pub fn picked(&self) -> &[String] {
        &self.picked
    }

    /// The name most recently shown by a spin tick, kept after the pick so
    /// the display can keep showing the winner.
    pub fn displayed(&self) -> Option<&str> {
        self.displayed.as_deref()
    }

    pub fn is_spinning(&self) -> bool {
        self.state == SpinState::Spinning
    }

    /// Begin spinning. Starting with an empty pool is a reported no-op,
    /// not an error.
    pub fn start(&mut self) -> StartOutcome {
        if self.pool.is_empty() {
            return StartOutcome::PoolEmpty;
        }
        self.state = SpinState::Spinning;
        StartOutcome::Started
    }

    /// One timer expiry: sample a uniformly random name from the pool and
    /// record it as displayed. A tick that lands while idle (a stale expiry
    /// after `stop` or `reset`) is a no-op.
    pub fn tick(&mut self) -> Option<&str> {
        if self.state != SpinState::Spinning {
            return None;
        }
        let name = self.pool.choose(&mut rand::thread_rng())?.clone();
        self.displayed = Some(name);
        self.displayed.as_deref()
    }

    /// Stop spinning and commit the displayed name as the pick: remove one
    /// occurrence from the pool, append it to the picked history, return it.
    /// Returns `None` when called while idle.
    pub fn stop(&mut self) -> Option<String> {
        if self.state != SpinState::Spinning {
            return None;
        }
        // Leave Spinning first so no further tick can touch the pool.
        self.state = SpinState::Idle;

        if self.pool.is_empty() {
            return None;
        }

        // The displayed name is always drawn from the live pool, so the
        // fallback resample should be unreachable; kept as defensive code.
        let pick = match self
            .displayed
            .clone()
            .filter(|name| self.pool.contains(name))
        {
            Some(name) => name,
            None => self.pool.choose(&mut rand::thread_rng())?.clone(),
        };

        if let Some(idx) = self.pool.iter().position(|name| *name == pick) {
            self.pool.remove(idx);
        }
        self.picked.push(pick.clone());
        self.displayed = Some(pick.clone());
        Some(pick)
    }

    /// Return to the initial state: pool re-copied from the roster, picked
    /// history cleared, display cleared. Idempotent.
    pub fn reset(&mut self) {
        self.state = SpinState::Idle;
        self.pool = self.roster.clone();
        self.picked.clear();
        self.displayed = None;
    }

    /// Replace the roster and reset. The caller is responsible for rejecting
    /// empty rosters before calling this.
    pub fn replace_roster(&mut self, roster: Vec<String>) {
        self.roster = roster;
        self.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn sorted(list: &[String]) -> Vec<String> {
        let mut out = list.to_vec();
        out.sort();
        out
    }

    /// multiset(pool) + multiset(picked) == multiset(roster)
    fn assert_partition_invariant(engine: &PickerEngine) {
        let mut union = engine.pool().to_vec();
        union.extend_from_slice(engine.picked());
        assert_eq!(sorted(&union), sorted(engine.roster()));
    }

    fn spin_once(engine: &mut PickerEngine) -> String {
        assert_eq!(engine.start(), StartOutcome::Started);
        assert!(engine.tick().is_some());
        engine.stop().expect("stop after start should commit a pick")
    }

    #[test]
    fn test_start_stop_moves_exactly_one_name() {
        let mut engine = PickerEngine::new(names(&["A", "B", "C"]));
        let pick = spin_once(&mut engine);

        assert_eq!(engine.pool().len(), 2);
        assert_eq!(engine.picked().to_vec(), vec![pick.clone()]);
        assert!(["A", "B", "C"].contains(&pick.as_str()));
        assert!(!engine.pool().contains(&pick));
        assert_partition_invariant(&engine);
    }

    #[test]
    fn test_invariant_holds_at_every_idle_state() {
        let mut engine = PickerEngine::new(names(&["A", "B", "C", "D"]));
        assert_partition_invariant(&engine);

        for _ in 0..4 {
            spin_once(&mut engine);
            assert_partition_invariant(&engine);
        }
    }

    #[test]
    fn test_duplicate_names_remove_single_occurrence() {
        let mut engine = PickerEngine::new(names(&["A", "A", "B"]));
        spin_once(&mut engine);

        assert_eq!(engine.pool().len(), 2);
        assert_partition_invariant(&engine);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut engine = PickerEngine::new(names(&["A", "B", "C"]));
        spin_once(&mut engine);

        engine.reset();
        let pool_once = engine.pool().to_vec();
        engine.reset();

        assert_eq!(engine.pool(), pool_once);
        assert_eq!(engine.pool(), engine.roster());
        assert!(engine.picked().is_empty());
        assert!(engine.displayed().is_none());
        assert!(!engine.is_spinning());
    }

    #[test]
    fn test_start_with_empty_pool_is_a_noop() {
        let mut engine = PickerEngine::new(Vec::new());
        assert_eq!(engine.start(), StartOutcome::PoolEmpty);
        assert!(!engine.is_spinning());
        assert!(engine.tick().is_none());
        assert!(engine.stop().is_none());
    }

    #[test]
    fn test_drain_pool_then_report_empty() {
        let mut engine = PickerEngine::new(names(&["A", "B", "C"]));

        for _ in 0..3 {
            spin_once(&mut engine);
        }

        assert!(engine.pool().is_empty());
        assert_eq!(sorted(engine.picked()), names(&["A", "B", "C"]));

        // A fourth start reports pool-empty and changes nothing.
        assert_eq!(engine.start(), StartOutcome::PoolEmpty);
        assert!(engine.pool().is_empty());
        assert_eq!(engine.picked().len(), 3);
    }

    #[test]
    fn test_reset_restores_after_drain() {
        let mut engine = PickerEngine::new(names(&["A", "B", "C"]));
        for _ in 0..3 {
            spin_once(&mut engine);
        }

        engine.reset();
        assert_eq!(engine.pool(), names(&["A", "B", "C"]));
        assert!(engine.picked().is_empty());
    }

    #[test]
    fn test_stale_tick_after_stop_is_a_noop() {
        let mut engine = PickerEngine::new(names(&["A", "B"]));
        spin_once(&mut engine);

        let pool_before = engine.pool().to_vec();
        let displayed_before = engine.displayed().map(str::to_string);

        // A timer expiry that raced the stop must not touch anything.
        assert!(engine.tick().is_none());
        assert_eq!(engine.pool(), pool_before);
        assert_eq!(engine.displayed().map(str::to_string), displayed_before);
    }

    #[test]
    fn test_stale_tick_after_reset_is_a_noop() {
        let mut engine = PickerEngine::new(names(&["A", "B"]));
        assert_eq!(engine.start(), StartOutcome::Started);
        engine.tick();

        engine.reset();
        assert!(engine.tick().is_none());
        assert!(engine.displayed().is_none());
        assert_eq!(engine.pool(), engine.roster());
    }

    #[test]
    fn test_tick_samples_from_pool() {
        let mut engine = PickerEngine::new(names(&["A", "B", "C"]));
        assert_eq!(engine.start(), StartOutcome::Started);

        for _ in 0..20 {
            let shown = engine.tick().expect("tick while spinning").to_string();
            assert!(engine.pool().contains(&shown));
        }
    }

    #[test]
    fn test_stop_commits_the_displayed_name() {
        // Single-name pool makes the committed name deterministic.
        let mut engine = PickerEngine::new(names(&["only"]));
        assert_eq!(engine.start(), StartOutcome::Started);
        assert_eq!(engine.tick(), Some("only"));

        assert_eq!(engine.stop(), Some("only".to_string()));
        assert_eq!(engine.displayed(), Some("only"));
        assert!(engine.pool().is_empty());
        assert_eq!(engine.picked(), names(&["only"]));
    }

    #[test]
    fn test_replace_roster_behaves_as_reset() {
        let mut engine = PickerEngine::new(names(&["A", "B"]));
        spin_once(&mut engine);

        engine.replace_roster(names(&["X", "Y", "Z"]));
        assert_eq!(engine.roster(), names(&["X", "Y", "Z"]));
        assert_eq!(engine.pool(), names(&["X", "Y", "Z"]));
        assert!(engine.picked().is_empty());
        assert!(engine.displayed().is_none());
        assert!(!engine.is_spinning());
    }
}
