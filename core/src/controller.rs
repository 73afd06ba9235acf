use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::*;

/// Identifies one arming of the hide timer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerTicket(u64);

/// Schedules delayed callbacks for the controller.
///
/// When the delay elapses the host hands `ticket` back through [`GameController::hide_timer_fired`].
/// Dropping the returned handle must cancel the timer.
pub trait Clock {
    type Handle;

    fn after(&mut self, delay: Duration, ticket: TimerTicket) -> Self::Handle;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// How long a mismatched pair stays face-up.
    pub hide_delay: Duration,
}

impl ControllerConfig {
    pub const DEFAULT_HIDE_DELAY: Duration = Duration::from_millis(1000);
    pub const MIN_HIDE_DELAY: Duration = Duration::from_millis(100);
    pub const MAX_HIDE_DELAY: Duration = Duration::from_millis(5000);

    pub fn new(hide_delay: Duration) -> Self {
        Self {
            hide_delay: hide_delay.clamp(Self::MIN_HIDE_DELAY, Self::MAX_HIDE_DELAY),
        }
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_HIDE_DELAY)
    }
}

struct PendingHide<H> {
    ticket: TimerTicket,
    _handle: H,
}

/// Gates clicks, owns the hide timer and persists new records.
pub struct GameController<S, C: Clock, R> {
    state: GameState,
    store: S,
    clock: C,
    shuffler: R,
    config: ControllerConfig,
    pending_hide: Option<PendingHide<C::Handle>>,
    next_ticket: u64,
}

impl<S: ScoreStore, C: Clock, R: Shuffler> GameController<S, C, R> {
    pub fn new(store: S, clock: C, mut shuffler: R, config: ControllerConfig) -> Self {
        let best_score = store.load();
        log::debug!("best score on start: {:?}", best_score);
        let board = Board::deal(&mut shuffler);

        Self {
            state: GameState::new(board, best_score),
            store,
            clock,
            shuffler,
            config,
            pending_hide: None,
            next_ticket: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> ControllerConfig {
        self.config
    }

    pub fn is_hide_pending(&self) -> bool {
        self.pending_hide.is_some()
    }

    /// Clicks on revealed cards, on a locked board or after a win are ignored.
    pub fn click(&mut self, index: CardIndex) -> Result<Outcome> {
        let index = self.state.board().validate_index(index)?;

        if !self.state.can_reveal(index) {
            log::trace!("click on card {} ignored", index);
            return Ok(Outcome::NoChange);
        }

        let outcome = self.dispatch(Action::RevealCard(index))?;
        match outcome {
            Outcome::Mismatched => self.arm_hide_timer(),
            Outcome::Won { new_record: true } => {
                let moves = self.state.moves();
                log::info!("new best score: {}", moves);
                self.store.save(moves);
            }
            _ => {}
        }

        Ok(outcome)
    }

    pub fn hide_timer_fired(&mut self, ticket: TimerTicket) -> Result<Outcome> {
        match self.pending_hide.take() {
            Some(pending) if pending.ticket == ticket => self.dispatch(Action::HideMismatched),
            pending => {
                log::debug!("stale hide timer {:?} ignored", ticket);
                self.pending_hide = pending;
                Ok(Outcome::NoChange)
            }
        }
    }

    pub fn play_again(&mut self) -> Result<Outcome> {
        if let Some(pending) = self.pending_hide.take() {
            log::debug!("hide timer {:?} cancelled", pending.ticket);
        }

        let board = Board::deal(&mut self.shuffler);
        self.dispatch(Action::StartOrReset(board))
    }

    fn dispatch(&mut self, action: Action) -> Result<Outcome> {
        let (next, outcome) = self.state.transition(action)?;
        log::debug!("transition: {:?}", outcome);
        self.state = next;
        Ok(outcome)
    }

    fn arm_hide_timer(&mut self) {
        let ticket = TimerTicket(self.next_ticket);
        self.next_ticket = self.next_ticket.wrapping_add(1);

        if let Some(previous) = self.pending_hide.take() {
            log::warn!("hide timer {:?} replaced before firing", previous.ticket);
        }

        log::debug!("hide timer {:?} armed for {:?}", ticket, self.config.hide_delay);
        let handle = self.clock.after(self.config.hide_delay, ticket);
        self.pending_hide = Some(PendingHide {
            ticket,
            _handle: handle,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::{Cell, RefCell};

    struct FakeTimer {
        deadline: Duration,
        ticket: TimerTicket,
        cancelled: Rc<Cell<bool>>,
    }

    #[derive(Default)]
    struct FakeClockState {
        now: Duration,
        timers: Vec<FakeTimer>,
    }

    /// Manually advanced clock, shared between the test and the controller.
    #[derive(Clone, Default)]
    struct FakeClock {
        inner: Rc<RefCell<FakeClockState>>,
    }

    struct FakeHandle {
        cancelled: Rc<Cell<bool>>,
    }

    impl Drop for FakeHandle {
        fn drop(&mut self) {
            self.cancelled.set(true);
        }
    }

    impl FakeClock {
        fn advance(&self, by: Duration) -> Vec<TimerTicket> {
            let mut state = self.inner.borrow_mut();
            state.now += by;
            let now = state.now;
            let mut fired = Vec::new();
            state.timers.retain(|timer| {
                if timer.cancelled.get() {
                    false
                } else if timer.deadline <= now {
                    fired.push(timer.ticket);
                    false
                } else {
                    true
                }
            });
            fired
        }

        fn pending(&self) -> usize {
            self.inner
                .borrow()
                .timers
                .iter()
                .filter(|timer| !timer.cancelled.get())
                .count()
        }
    }

    impl Clock for FakeClock {
        type Handle = FakeHandle;

        fn after(&mut self, delay: Duration, ticket: TimerTicket) -> FakeHandle {
            let cancelled = Rc::new(Cell::new(false));
            let mut state = self.inner.borrow_mut();
            let deadline = state.now + delay;
            state.timers.push(FakeTimer {
                deadline,
                ticket,
                cancelled: cancelled.clone(),
            });
            FakeHandle { cancelled }
        }
    }

    /// Deals the catalog unshuffled, so card `i` pairs with card `i + 6`.
    struct CatalogOrder;

    impl Shuffler for CatalogOrder {
        fn shuffle(&mut self, cards: &[CardIdentity]) -> Vec<CardIdentity> {
            cards.to_vec()
        }
    }

    type TestController = GameController<BestScoreStore<MemoryStore>, FakeClock, CatalogOrder>;

    fn controller_with(store: MemoryStore) -> (TestController, FakeClock) {
        let clock = FakeClock::default();
        let controller = GameController::new(
            BestScoreStore::new(store),
            clock.clone(),
            CatalogOrder,
            ControllerConfig::default(),
        );
        (controller, clock)
    }

    fn controller() -> (TestController, FakeClock) {
        controller_with(MemoryStore::new())
    }

    fn fire_due(controller: &mut TestController, clock: &FakeClock, by: Duration) -> Vec<Outcome> {
        clock
            .advance(by)
            .into_iter()
            .map(|ticket| controller.hide_timer_fired(ticket).unwrap())
            .collect()
    }

    fn win_without_mistakes(controller: &mut TestController) -> Outcome {
        let mut last = Outcome::NoChange;
        for index in 0..PAIR_COUNT as CardIndex {
            controller.click(index).unwrap();
            last = controller.click(index + PAIR_COUNT as CardIndex).unwrap();
        }
        last
    }

    #[test]
    fn new_controller_loads_best_score() {
        let (controller, _) = controller_with(MemoryStore::with_entry(BEST_SCORE_KEY, "9"));

        assert_eq!(controller.state().best_score(), Some(9));
        assert_eq!(controller.state().moves(), 0);
        assert_eq!(controller.state().board(), &Board::standard());
    }

    #[test]
    fn malformed_stored_score_starts_without_record() {
        let (controller, _) = controller_with(MemoryStore::with_entry(BEST_SCORE_KEY, "lots"));
        assert_eq!(controller.state().best_score(), None);
    }

    #[test]
    fn mismatch_locks_input_until_timer_fires() {
        let (mut controller, clock) = controller();

        assert_eq!(controller.click(0).unwrap(), Outcome::Peeked);
        assert_eq!(controller.click(1).unwrap(), Outcome::Mismatched);
        assert!(controller.snapshot().locked);
        assert!(controller.is_hide_pending());
        assert_eq!(clock.pending(), 1);

        assert_eq!(controller.click(2).unwrap(), Outcome::NoChange);
        assert_eq!(controller.state().moves(), 2);
        assert!(!controller.state().is_revealed(2));

        assert!(fire_due(&mut controller, &clock, Duration::from_millis(999)).is_empty());
        assert_eq!(
            fire_due(&mut controller, &clock, Duration::from_millis(1)),
            [Outcome::Hidden]
        );
        assert!(!controller.is_hide_pending());
        assert_eq!(controller.state().revealed(), &[false; CARD_COUNT]);
        assert_eq!(controller.click(2).unwrap(), Outcome::Peeked);
    }

    #[test]
    fn match_does_not_arm_timer() {
        let (mut controller, clock) = controller();

        controller.click(3).unwrap();
        assert_eq!(controller.click(9).unwrap(), Outcome::Matched);

        assert!(!controller.is_hide_pending());
        assert_eq!(clock.pending(), 0);
        assert!(controller.state().peeked().is_empty());
    }

    #[test]
    fn clicking_revealed_card_is_ignored() {
        let (mut controller, _) = controller();

        controller.click(4).unwrap();
        assert_eq!(controller.click(4).unwrap(), Outcome::NoChange);
        assert_eq!(controller.state().moves(), 1);
    }

    #[test]
    fn out_of_range_click_is_an_error() {
        let (mut controller, _) = controller();
        assert_eq!(controller.click(12), Err(GameError::InvalidIndex));
        assert_eq!(controller.state().moves(), 0);
    }

    #[test]
    fn winning_saves_first_record() {
        let (mut controller, _) = controller();

        assert_eq!(win_without_mistakes(&mut controller), Outcome::Won { new_record: true });
        assert!(controller.state().won());
        assert_eq!(controller.state().best_score(), Some(12));
        assert_eq!(controller.store().backend().get(BEST_SCORE_KEY), Some("12"));
    }

    #[test]
    fn clicks_after_win_are_ignored() {
        let (mut controller, _) = controller();
        win_without_mistakes(&mut controller);

        for index in 0..CARD_COUNT as CardIndex {
            assert_eq!(controller.click(index).unwrap(), Outcome::NoChange);
        }
        assert_eq!(controller.state().moves(), 12);
    }

    #[test]
    fn worse_game_keeps_stored_record() {
        let (mut controller, clock) = controller();
        win_without_mistakes(&mut controller);

        assert_eq!(controller.play_again().unwrap(), Outcome::Reset);
        controller.click(0).unwrap();
        controller.click(1).unwrap();
        fire_due(&mut controller, &clock, ControllerConfig::DEFAULT_HIDE_DELAY);

        assert_eq!(win_without_mistakes(&mut controller), Outcome::Won { new_record: false });
        assert_eq!(controller.state().moves(), 14);
        assert_eq!(controller.state().best_score(), Some(12));
        assert_eq!(controller.store().backend().get(BEST_SCORE_KEY), Some("12"));
    }

    #[test]
    fn better_game_overwrites_stored_record() {
        let (mut controller, _) = controller_with(MemoryStore::with_entry(BEST_SCORE_KEY, "30"));

        assert_eq!(win_without_mistakes(&mut controller), Outcome::Won { new_record: true });
        assert_eq!(controller.store().backend().get(BEST_SCORE_KEY), Some("12"));
    }

    #[test]
    fn play_again_cancels_pending_hide() {
        let (mut controller, clock) = controller();
        controller.click(0).unwrap();
        controller.click(1).unwrap();

        assert_eq!(controller.play_again().unwrap(), Outcome::Reset);

        assert!(!controller.is_hide_pending());
        assert_eq!(clock.pending(), 0);
        assert!(fire_due(&mut controller, &clock, Duration::from_secs(5)).is_empty());
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.moves, 0);
        assert!(!snapshot.locked);
        assert!(snapshot.revealed.iter().all(|&revealed| !revealed));
    }

    #[test]
    fn stale_ticket_is_ignored() {
        let (mut controller, _) = controller();
        controller.click(0).unwrap();
        controller.click(1).unwrap();
        controller.play_again().unwrap();
        controller.click(2).unwrap();
        controller.click(3).unwrap();

        assert_eq!(
            controller.hide_timer_fired(TimerTicket(0)).unwrap(),
            Outcome::NoChange
        );
        assert!(controller.state().is_locked());
        assert_eq!(
            controller.hide_timer_fired(TimerTicket(1)).unwrap(),
            Outcome::Hidden
        );
    }

    #[test]
    fn dropping_controller_cancels_pending_hide() {
        let (mut controller, clock) = controller();
        controller.click(0).unwrap();
        controller.click(1).unwrap();
        assert_eq!(clock.pending(), 1);

        drop(controller);

        assert_eq!(clock.pending(), 0);
        assert!(clock.advance(Duration::from_secs(5)).is_empty());
    }

    #[test]
    fn hide_delay_is_clamped() {
        assert_eq!(
            ControllerConfig::new(Duration::ZERO).hide_delay,
            ControllerConfig::MIN_HIDE_DELAY
        );
        assert_eq!(
            ControllerConfig::new(Duration::from_secs(60)).hide_delay,
            ControllerConfig::MAX_HIDE_DELAY
        );
        assert_eq!(
            ControllerConfig::new(Duration::from_millis(700)).hide_delay,
            Duration::from_millis(700)
        );
    }

    #[test]
    fn configured_delay_is_passed_to_clock() {
        let clock = FakeClock::default();
        let mut controller = GameController::new(
            BestScoreStore::new(MemoryStore::new()),
            clock.clone(),
            CatalogOrder,
            ControllerConfig::new(Duration::from_millis(700)),
        );
        controller.click(0).unwrap();
        controller.click(1).unwrap();

        assert!(clock.advance(Duration::from_millis(699)).is_empty());
        assert_eq!(clock.advance(Duration::from_millis(1)).len(), 1);
    }

    #[test]
    fn random_shuffler_deals_valid_boards_on_reset() {
        let mut controller = GameController::new(
            BestScoreStore::new(MemoryStore::new()),
            FakeClock::default(),
            RandomShuffler::new(99),
            ControllerConfig::default(),
        );
        for _ in 0..10 {
            controller.play_again().unwrap();
            let mut cards = controller.state().board().cards().to_vec();
            cards.sort();
            let mut catalog = CATALOG.to_vec();
            catalog.sort();
            assert_eq!(cards, catalog);
        }
    }
}
