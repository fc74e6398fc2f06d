//! Dialog graph: which assistant owns the conversation, and what happens
//! after each assistant invocation.

mod assistant;
mod diagram;
pub mod nodes;
mod observer;
mod router;
mod runner;

pub use assistant::{Assistant, AssistantSet};
pub use diagram::render_mermaid;
pub use observer::{NoopObserver, TurnEvent, TurnObserver};
pub use router::{route, Route, RouteError};
pub use runner::{TurnOutcome, TurnRunner};
