// ABOUTME: Hook module — parsing host events, classifying them, and shaping the host response.
// ABOUTME: Everything here is pure; file and stdout I/O live in the app runner.

pub mod classifier;
pub mod event;
pub mod policy;
pub mod response;
pub mod target;

pub use classifier::*;
pub use event::*;
pub use policy::*;
pub use response::*;
pub use target::*;
