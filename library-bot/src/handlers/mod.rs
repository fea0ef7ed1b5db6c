//! Handler implementations: interaction logging, `/start`, and library questions.

mod interaction_log_handler;
mod query_handler;
mod start_handler;

pub use interaction_log_handler::InteractionLogHandler;
pub use query_handler::{LibraryQueryHandler, MSG_REQUEST_FAILED};
pub use start_handler::{welcome_message, StartHandler};
