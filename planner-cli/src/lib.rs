pub mod defaults;
pub mod logging;
pub mod report;
pub mod session;
pub mod utils;
