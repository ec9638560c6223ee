//! Combat state owned by the controller: unit identities, positions and rosters.

mod common;
mod roster;
mod unit;

pub use common::{Position, ResourceMeter, Team, UnitId, WorldPos};
pub use roster::Roster;
pub use unit::{AttackProfile, Unit};
