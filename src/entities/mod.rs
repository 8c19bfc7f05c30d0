// Entity Models
// Streamers are immutable records; the roster keeps them in data-file order.

pub mod roster;
pub mod streamer;

pub use roster::{Roster, SITE_LOCALES};
pub use streamer::{Agency, Anniversaries, Region, Social, Status, Streamer};
