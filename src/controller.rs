//! Highlight state of the number grid.
//!
//! The controller owns the highlighted numbers and the transient error
//! banner. Every change is published as a [`GridSnapshot`] on a watch
//! channel, so views subscribe instead of polling the controller.

use std::time::{Duration, Instant};

use rand::Rng;
use rand::seq::SliceRandom;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::config::Settings;
use crate::error::HighlightError;
use crate::models::{CellNumber, ErrorBanner, Flash, GridSnapshot, HighlightSet};

pub struct HighlightController {
    highlighted: HighlightSet,
    banner: Option<ErrorBanner>,
    flash: Option<Flash>,
    banner_ttl: Duration,
    flash_duration: Duration,
    publisher: watch::Sender<GridSnapshot>,
}

impl HighlightController {
    pub fn new(banner_ttl: Duration, flash_duration: Duration) -> Self {
        let (publisher, _) = watch::channel(GridSnapshot::default());
        Self {
            highlighted: HighlightSet::new(),
            banner: None,
            flash: None,
            banner_ttl,
            flash_duration,
            publisher,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.banner_ttl(), settings.flash_duration())
    }

    /// Receives a fresh snapshot after every state change.
    pub fn subscribe(&self) -> watch::Receiver<GridSnapshot> {
        self.publisher.subscribe()
    }

    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            highlighted: self.highlighted.clone(),
            banner: self.banner.as_ref().map(|b| b.message.clone()),
            flashing: self.flash.map(|f| f.cell),
        }
    }

    pub fn highlighted(&self) -> &HighlightSet {
        &self.highlighted
    }

    pub fn is_highlighted(&self, number: CellNumber) -> bool {
        self.highlighted.contains(number)
    }

    pub fn count(&self) -> usize {
        self.highlighted.len()
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_ref().map(|b| b.message.as_str())
    }

    pub fn flashing(&self) -> Option<CellNumber> {
        self.flash.map(|f| f.cell)
    }

    /// Flips `number` and returns whether it is highlighted afterwards.
    pub fn toggle(&mut self, number: CellNumber) -> bool {
        let on = self.highlighted.toggle(number);
        debug!(number = number.get(), highlighted = on, "toggled cell");
        self.publish();
        on
    }

    /// Highlights the number typed by the user.
    ///
    /// A number that is already highlighted is rejected rather than
    /// silently accepted. On failure the banner shows the error and the
    /// set is left untouched.
    pub fn add_by_input(&mut self, raw: &str) -> Result<CellNumber, HighlightError> {
        let parsed = raw.parse::<CellNumber>().and_then(|number| {
            if self.highlighted.contains(number) {
                Err(HighlightError::AlreadyHighlighted(number))
            } else {
                Ok(number)
            }
        });

        match parsed {
            Ok(number) => {
                self.highlighted.insert(number);
                self.banner = None;
                debug!(number = number.get(), "highlighted entered number");
                self.publish();
                Ok(number)
            }
            Err(err) => {
                self.raise(err);
                Err(err)
            }
        }
    }

    pub fn random_highlight(&mut self) -> Result<CellNumber, HighlightError> {
        self.random_highlight_with(&mut rand::thread_rng())
    }

    /// Highlights a number picked uniformly among those not yet highlighted.
    pub fn random_highlight_with<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<CellNumber, HighlightError> {
        let free: Vec<CellNumber> = self.highlighted.free().collect();
        let Some(&number) = free.choose(rng) else {
            let err = HighlightError::AllHighlighted;
            self.raise(err);
            return Err(err);
        };

        self.highlighted.insert(number);
        self.flash = Some(Flash {
            cell: number,
            started_at: Instant::now(),
        });
        debug!(number = number.get(), free = free.len() - 1, "highlighted random number");
        self.publish();
        Ok(number)
    }

    pub fn clear_all(&mut self) {
        let cleared = self.highlighted.len();
        self.highlighted.clear();
        self.flash = None;
        debug!(cleared, "cleared all highlights");
        self.publish();
    }

    /// Drops the banner, e.g. because the user started typing again.
    pub fn dismiss_banner(&mut self) -> bool {
        if self.banner.take().is_some() {
            self.publish();
            true
        } else {
            false
        }
    }

    /// Expires the banner and the flash once their time is up.
    /// Returns whether anything changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        if self
            .banner
            .as_ref()
            .is_some_and(|b| b.is_expired(now, self.banner_ttl))
        {
            self.banner = None;
            changed = true;
        }
        if self
            .flash
            .is_some_and(|f| f.is_over(now, self.flash_duration))
        {
            self.flash = None;
            changed = true;
        }
        if changed {
            self.publish();
        }
        changed
    }

    fn raise(&mut self, err: HighlightError) {
        warn!(error = %err, "rejected highlight request");
        self.banner = Some(ErrorBanner::new(err.to_string(), Instant::now()));
        self.publish();
    }

    fn publish(&self) {
        self.publisher.send_replace(self.snapshot());
    }
}

impl Default for HighlightController {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn n(value: u8) -> CellNumber {
        CellNumber::new(value).unwrap()
    }

    #[test]
    fn toggle_twice_restores_state() {
        let mut controller = HighlightController::default();
        controller.toggle(n(3));
        for number in CellNumber::all() {
            let before = controller.highlighted().clone();
            controller.toggle(number);
            controller.toggle(number);
            assert_eq!(controller.highlighted(), &before);
        }
    }

    #[test]
    fn toggle_reports_new_membership() {
        let mut controller = HighlightController::default();
        assert!(controller.toggle(n(10)));
        assert!(controller.is_highlighted(n(10)));
        assert!(!controller.toggle(n(10)));
        assert_eq!(controller.count(), 0);
    }

    #[test]
    fn rejected_input_raises_banner_and_keeps_set() {
        let mut controller = HighlightController::default();
        controller.toggle(n(5));

        assert_eq!(controller.add_by_input("abc"), Err(HighlightError::InvalidNumber));
        assert_eq!(controller.banner(), Some("Please enter a valid number."));
        assert_eq!(controller.add_by_input("101"), Err(HighlightError::OutOfRange));
        assert_eq!(
            controller.banner(),
            Some("Please enter a number between 1 and 100.")
        );
        assert_eq!(controller.count(), 1);
    }

    #[test]
    fn duplicate_input_is_rejected() {
        let mut controller = HighlightController::default();
        assert_eq!(controller.add_by_input("57"), Ok(n(57)));
        assert_eq!(
            controller.add_by_input(" 57"),
            Err(HighlightError::AlreadyHighlighted(n(57)))
        );
        assert_eq!(controller.count(), 1);
        assert_eq!(controller.banner(), Some("57 is already highlighted."));
    }

    #[test]
    fn accepted_input_clears_stale_banner() {
        let mut controller = HighlightController::default();
        let _ = controller.add_by_input("");
        assert!(controller.banner().is_some());
        controller.add_by_input("9").unwrap();
        assert_eq!(controller.banner(), None);
    }

    #[test]
    fn banner_expires_after_ttl() {
        let ttl = Duration::from_secs(3);
        let mut controller = HighlightController::new(ttl, Duration::from_millis(200));
        let _ = controller.add_by_input("zero");
        let raised = Instant::now();

        assert!(!controller.tick(raised));
        assert!(controller.banner().is_some());
        assert!(controller.tick(raised + ttl));
        assert_eq!(controller.banner(), None);
        assert!(!controller.tick(raised + ttl * 2));
    }

    #[test]
    fn dismiss_banner_only_reports_real_changes() {
        let mut controller = HighlightController::default();
        assert!(!controller.dismiss_banner());
        let _ = controller.add_by_input("0");
        assert!(controller.dismiss_banner());
        assert_eq!(controller.banner(), None);
    }

    #[test]
    fn random_highlight_fills_grid_then_fails() {
        let mut controller = HighlightController::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            controller.random_highlight_with(&mut rng).unwrap();
        }
        assert!(controller.highlighted().is_full());
        assert_eq!(
            controller.random_highlight_with(&mut rng),
            Err(HighlightError::AllHighlighted)
        );
        assert_eq!(controller.count(), 100);
        assert_eq!(controller.banner(), Some("All numbers are already highlighted."));
    }

    #[test]
    fn random_highlight_picks_the_last_free_number() {
        let mut controller = HighlightController::default();
        for number in CellNumber::all().filter(|x| x.get() != 64) {
            controller.toggle(number);
        }
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(controller.random_highlight_with(&mut rng), Ok(n(64)));
    }

    #[test]
    fn random_highlight_flashes_until_tick() {
        let mut controller = HighlightController::default();
        let picked = controller.random_highlight().unwrap();
        assert_eq!(controller.flashing(), Some(picked));
        assert!(controller.tick(Instant::now() + Duration::from_secs(1)));
        assert_eq!(controller.flashing(), None);
        assert!(controller.is_highlighted(picked));
    }

    #[test]
    fn clear_all_empties_set() {
        let mut controller = HighlightController::default();
        controller.add_by_input("1").unwrap();
        controller.toggle(n(2));
        controller.random_highlight().unwrap();
        controller.clear_all();
        assert_eq!(controller.count(), 0);
        assert_eq!(controller.flashing(), None);
    }

    #[test]
    fn subscribers_see_every_change() {
        let mut controller = HighlightController::default();
        let mut rx = controller.subscribe();
        assert!(!rx.has_changed().unwrap());

        controller.toggle(n(12));
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().highlighted.contains(n(12)));

        let _ = controller.add_by_input("nope");
        assert!(rx.has_changed().unwrap());
        assert_eq!(
            rx.borrow_and_update().banner.as_deref(),
            Some("Please enter a valid number.")
        );

        controller.clear_all();
        let snapshot = rx.borrow_and_update().clone();
        assert_eq!(snapshot.count(), 0);
        assert_eq!(snapshot, controller.snapshot());
    }
}
