mod report;
mod status;

pub use report::*;
pub use status::*;
