pub mod capacity;
pub mod consumption;
pub mod exchange;
pub mod macros;
pub mod production;
pub mod reconcile;
pub mod supplemental;

pub mod util;
