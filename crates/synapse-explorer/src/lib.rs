//! The search-and-graph exploration controller and the event loop that
//! runs it.

pub mod controller;
pub mod debounce;
pub mod nav;
pub mod session;

pub use controller::{Effect, QueryController, Request, Ticket};
pub use debounce::{SpellCheckDebouncer, SpellState};
pub use nav::{MemoryNavigation, UrlStateSync};
pub use session::{Command, Session, Update};
