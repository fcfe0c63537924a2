pub mod members;
pub mod twfy;

pub use members::*;
pub use twfy::*;
