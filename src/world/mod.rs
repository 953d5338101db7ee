//! World state: house layout, capability traits and the in-process store

pub mod access;
pub mod layout;
pub mod state;

pub use access::WorldAccess;
pub use layout::HouseLayout;
pub use state::HomeWorld;
