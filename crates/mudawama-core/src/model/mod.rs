mod activity;
mod project;
mod snapshot;


pub use activity::*;
pub use project::*;
pub use snapshot::*;
