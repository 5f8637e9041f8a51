#[macro_use]
extern crate failure;

mod cipher;
mod data;
mod search;

pub use self::cipher::Schedule;
pub use self::data::{CIPHERTEXT, KEY_PREFIX, MARKER};
pub use self::search::{Bounds, Search, SearchPoint};
