pub mod wipe;

pub use wipe::{parse_mention, WipeCommand};
