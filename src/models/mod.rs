//! Holiday allocation domain models.
//!
//! Provides the closed label sets and the data types every scorer and
//! allocator reads: places, rotations, the run ledger and the final
//! schedule.
//!
//! # Lifecycle
//!
//! | Type | Created | Mutated |
//! |------|---------|---------|
//! | `RotationTable` | configuration | never |
//! | `Ledger` | run start (optional history) | insert-only during a run |
//! | `Schedule` | end of a run | never |

mod labels;
mod ledger;
mod place;
mod rotation;
mod schedule;

pub use labels::{Couple, Family, Holiday};
pub use ledger::Ledger;
pub use place::{Place, PlaceKey};
pub use rotation::{Rotation, RotationTable};
pub use schedule::Schedule;
