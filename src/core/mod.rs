pub mod backing;
pub mod session;
pub mod store;
pub mod subset;
