mod day_record;
mod project;
mod tag;

pub use day_record::*;
pub use project::*;
pub use tag::*;
