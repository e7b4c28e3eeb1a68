//! Global rollups over per-project progress.

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::Serialize;

use crate::aggregate::ProjectProgress;

/// Global aggregate for one local day: what is left, how long it should
/// take, and what it pays.
///
/// Forms a commutative monoid under `+` with the zero rollup as identity:
/// summing any partition of the projects in any order yields the same
/// totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Rollup {
    pub remaining_tasks: u64,
    pub planned_minutes: u64,
    pub planned_cents: u64,
    pub earned_cents_today: u64,
}

impl From<&ProjectProgress> for Rollup {
    fn from(p: &ProjectProgress) -> Self {
        Self {
            remaining_tasks: p.remaining_today,
            planned_minutes: p.planned_minutes,
            planned_cents: p.planned_cents,
            earned_cents_today: p.earned_cents_today,
        }
    }
}

impl Add for Rollup {
    type Output = Rollup;

    fn add(self, rhs: Rollup) -> Rollup {
        Rollup {
            remaining_tasks: self.remaining_tasks + rhs.remaining_tasks,
            planned_minutes: self.planned_minutes + rhs.planned_minutes,
            planned_cents: self.planned_cents + rhs.planned_cents,
            earned_cents_today: self.earned_cents_today + rhs.earned_cents_today,
        }
    }
}

impl AddAssign for Rollup {
    fn add_assign(&mut self, rhs: Rollup) {
        *self = *self + rhs;
    }
}

impl Sum for Rollup {
    fn sum<I: Iterator<Item = Rollup>>(iter: I) -> Rollup {
        iter.fold(Rollup::default(), Add::add)
    }
}

/// Elementwise sum across all entries. Empty input is valid and yields the
/// zero rollup.
pub fn rollup(per_project: &[ProjectProgress]) -> Rollup {
    per_project.iter().map(Rollup::from).sum()
}
