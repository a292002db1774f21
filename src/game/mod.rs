pub mod pack;

pub use pack::{open_pack_for_player, PackOpeningResult};
