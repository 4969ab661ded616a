pub mod report;
pub mod util;

pub use report::*;
pub use util::*;
