//! Process-wide state shared by the server and the actor system.

mod state;

pub use state::{is_shutdown, register_server, register_temp_output, setup_shutdown_handler};
