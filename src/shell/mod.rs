//! Shell core
//!
//! - [`SessionHandler`]: connection/transaction state machine
//! - [`ParameterStore`]: named values bound into statements
//! - [`Shell`]: the coordinator the run loop talks to
//!
//! # Errors
//!
//! Every operation returns [`ShellResult`]. Errors propagate unchanged to
//! the run loop, which decides how to display them and whether to go on.

mod capabilities;
mod coordinator;
mod errors;
mod history;
mod params;
mod state;

pub use capabilities::{Connectable, StatementExecuter, TransactionHandler, VariableHolder};
pub use coordinator::Shell;
pub use errors::{ShellError, ShellResult};
pub use history::{Historian, MemoryHistorian};
pub use params::{parse_name, ParameterStore};
pub use state::{SessionHandler, SessionState};
