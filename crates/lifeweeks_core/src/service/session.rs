//! Birth-anchor session lifecycle.
//!
//! # Responsibility
//! - Carry the active birth anchor as explicit session state instead of
//!   ambient globals.
//! - Implement onboarding, "return home" suspension, and re-entry.
//!
//! # Invariants
//! - Suspending never erases the persisted birth date; it only clears
//!   the in-session anchor until re-entry.
//! - The anchor is immutable for as long as it is active; replacing it
//!   means every cached grid is stale and must be rebuilt.

use crate::model::date::CalendarDate;
use crate::model::memory::BirthAnchor;
use crate::repo::year_repo::{StoreResult, YearDataStore};
use log::info;

/// Explicit session state threaded through core calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LifeSession {
    birth: Option<BirthAnchor>,
}

impl LifeSession {
    /// Resumes a session from the persisted birth date, if any.
    pub fn resume<S: YearDataStore>(store: &S) -> StoreResult<Self> {
        let birth = store.load_birth()?;
        info!(
            "event=session_resume module=session status=ok has_birth={}",
            birth.is_some()
        );
        Ok(Self { birth })
    }

    /// Completes onboarding: persists the birth date and activates it.
    pub fn complete_onboarding<S: YearDataStore>(
        &mut self,
        store: &S,
        birth_date: CalendarDate,
    ) -> StoreResult<()> {
        let anchor = BirthAnchor::new(birth_date);
        store.save_birth(anchor)?;
        self.birth = Some(anchor);
        info!("event=onboarding_complete module=session status=ok birth_year={}", anchor.year());
        Ok(())
    }

    /// "Return home": suspends the anchor for this session only.
    pub fn suspend(&mut self) {
        self.birth = None;
    }

    /// Active birth anchor, `None` while onboarding or suspended.
    pub fn birth(&self) -> Option<BirthAnchor> {
        self.birth
    }
}
