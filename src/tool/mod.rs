// ABOUTME: Tool module - named capabilities an agent turn may invoke.
// ABOUTME: Defines the Tool trait, the shared Registry, and scoped views over it.

mod filter;
mod registry;
mod result;
mod traits;

pub use filter::*;
pub use registry::*;
pub use result::*;
pub use traits::*;
