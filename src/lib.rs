pub mod builder;
pub mod cli;
pub mod fetch;
pub mod pipeline;
pub mod store;
pub mod ui;

pub use cli::{Cli, Commands};
pub use store::Store;
pub use ui::{ConsoleUi, Phase, SilentUi, Ui};
