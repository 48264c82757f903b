//! Command implementations.

mod outline;
mod scan;

pub use outline::execute as outline;
pub use scan::execute as scan;
