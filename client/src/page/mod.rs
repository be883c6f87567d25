//! The request chat panel: DOM contract, rendering, and the page controller.
//!
//! DESIGN
//! ======
//! One `ChatPage` is built per page load and owns everything the panel
//! needs: the request identifier, the element handles (`ChatDom`), and the
//! connection handle (`Emitter`). Every DOM or network event becomes one
//! method call on it.

pub mod controller;
pub mod dom;
pub mod render;
pub mod request_id;

pub use controller::ChatPage;
pub use dom::{ChatDom, Emitter};
pub use request_id::RequestId;
