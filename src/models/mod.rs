//! Roster domain models.
//!
//! Provides the input types of a roster optimization run: the problem
//! description, its objective weights and scored rules, search tuning,
//! and the weekend/holiday calendar.
//!
//! # Domain Mappings
//!
//! | u-roster | Hospital | Retail | Contact centre |
//! |----------|----------|--------|----------------|
//! | Employee | Nurse | Clerk | Agent |
//! | Shift | Day/Night/Off | Open/Close/Off | Early/Late/Off |
//! | Premium day | Weekend/Holiday | Sunday | Weekend |
//! | Staff requirement | Ward minimum | Store minimum | Forecast headcount |

mod calendar;
mod problem;

pub use calendar::WorkCalendar;
pub use problem::{
    AnnealingParams, EmployeeId, GeneticParams, ObjectiveWeights, ProblemConfig,
    RosterConstraints, ShiftId,
};
