pub mod release_server;
mod test_utils;

pub use test_utils::*;
