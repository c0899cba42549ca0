//! Instrumented element types for dynarr lifecycle tests.
//!
//! [`Tracked`] records every construction, clone, assignment and drop in a
//! thread-local [`Ledger`]. A [`FailPoint`] can be armed so that the Nth
//! clone, assignment or default construction panics, which is how tests
//! exercise the unwind paths of the container.
//!
//! The test harness runs each `#[test]` on its own thread, so counters never
//! leak between tests. Property tests that reuse a thread must call
//! [`Ledger::reset`] at the start of each case.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::cell::Cell;
use std::fmt;

thread_local! {
    static COUNTS: Cell<Counts> = const { Cell::new(Counts::ZERO) };
    static FUSES: Cell<Fuses> = const { Cell::new(Fuses::DISARMED) };
}

/// Lifecycle event totals for the current thread.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Counts {
    /// Values created by [`Tracked::new`].
    pub created: usize,
    /// Values created by `Default::default`.
    pub defaults: usize,
    /// Values created by `Clone::clone`.
    pub clones: usize,
    /// Calls to `Clone::clone_from`.
    pub assigns: usize,
    /// Values dropped.
    pub drops: usize,
}

impl Counts {
    const ZERO: Counts = Counts {
        created: 0,
        defaults: 0,
        clones: 0,
        assigns: 0,
        drops: 0,
    };

    /// Values constructed and not yet dropped.
    pub fn live(&self) -> isize {
        (self.created + self.defaults + self.clones) as isize - self.drops as isize
    }
}

/// Access to the thread-local lifecycle counters.
pub struct Ledger;

impl Ledger {
    /// Zero every counter and disarm every fail point.
    pub fn reset() {
        COUNTS.with(|c| c.set(Counts::ZERO));
        FailPoint::disarm();
    }

    /// Current totals.
    pub fn counts() -> Counts {
        COUNTS.with(Cell::get)
    }

    /// Shorthand for `Ledger::counts().live()`.
    pub fn live() -> isize {
        Self::counts().live()
    }

    fn bump(f: impl FnOnce(&mut Counts)) {
        COUNTS.with(|c| {
            let mut counts = c.get();
            f(&mut counts);
            c.set(counts);
        });
    }
}

#[derive(Clone, Copy)]
struct Fuses {
    clone: Option<usize>,
    assign: Option<usize>,
    default: Option<usize>,
}

impl Fuses {
    const DISARMED: Fuses = Fuses {
        clone: None,
        assign: None,
        default: None,
    };
}

/// Which operation a [`FailPoint`] fires on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailOn {
    Clone,
    Assign,
    Default,
}

/// Panic injection for [`Tracked`].
pub struct FailPoint;

impl FailPoint {
    /// Let `successes` operations of kind `on` succeed, then panic on the
    /// next one. The fuse disarms itself after firing.
    pub fn arm(on: FailOn, successes: usize) {
        FUSES.with(|f| {
            let mut fuses = f.get();
            match on {
                FailOn::Clone => fuses.clone = Some(successes),
                FailOn::Assign => fuses.assign = Some(successes),
                FailOn::Default => fuses.default = Some(successes),
            }
            f.set(fuses);
        });
    }

    /// Disarm every fuse.
    pub fn disarm() {
        FUSES.with(|f| f.set(Fuses::DISARMED));
    }

    fn check(on: FailOn) {
        let fire = FUSES.with(|f| {
            let mut fuses = f.get();
            let slot = match on {
                FailOn::Clone => &mut fuses.clone,
                FailOn::Assign => &mut fuses.assign,
                FailOn::Default => &mut fuses.default,
            };
            let fire = match *slot {
                Some(0) => {
                    *slot = None;
                    true
                }
                Some(n) => {
                    *slot = Some(n - 1);
                    false
                }
                None => false,
            };
            f.set(fuses);
            fire
        });
        if fire {
            panic!("injected {on:?} failure");
        }
    }
}

/// An element that reports its lifecycle to the [`Ledger`].
///
/// Equality and `Debug` look only at the payload.
pub struct Tracked {
    value: i64,
}

impl Tracked {
    pub fn new(value: i64) -> Self {
        Ledger::bump(|c| c.created += 1);
        Self { value }
    }

    pub fn value(&self) -> i64 {
        self.value
    }
}

impl Default for Tracked {
    fn default() -> Self {
        FailPoint::check(FailOn::Default);
        Ledger::bump(|c| c.defaults += 1);
        Self { value: 0 }
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        FailPoint::check(FailOn::Clone);
        Ledger::bump(|c| c.clones += 1);
        Self { value: self.value }
    }

    fn clone_from(&mut self, source: &Self) {
        FailPoint::check(FailOn::Assign);
        Ledger::bump(|c| c.assigns += 1);
        self.value = source.value;
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        Ledger::bump(|c| c.drops += 1);
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Tracked {}

impl fmt::Debug for Tracked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tracked({})", self.value)
    }
}

/// Collect the payloads of a slice of [`Tracked`] values.
pub fn values(items: &[Tracked]) -> Vec<i64> {
    items.iter().map(Tracked::value).collect()
}
