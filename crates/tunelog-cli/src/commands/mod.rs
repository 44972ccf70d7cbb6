//! Command implementations.

pub mod analyze;
pub mod configure;
pub mod inspect;
pub mod recap;
pub mod show;

pub use self::analyze::execute_analyze;
pub use self::configure::execute_config;
pub use self::inspect::execute_inspect;
pub use self::recap::execute_recap;
pub use self::show::execute_show;
