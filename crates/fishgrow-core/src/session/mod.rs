//! Round state machine and the rules it drives.
//!
//! - **State**: Menu / NameEntry / Game / Win / Lose / Rankings
//! - **Progression**: food eaten and the fish level it unlocks
//! - **Scoring**: points per eaten enemy tier
//! - **Encounter**: the edibility rule between fish and enemy
//! - **Events**: notifications observed by the presentation layer

mod encounter;
mod events;
mod game;
mod progression;
mod scoring;
mod state;

pub use encounter::*;
pub use events::*;
pub use game::*;
pub use progression::*;
pub use scoring::*;
pub use state::*;
