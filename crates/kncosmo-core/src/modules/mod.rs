pub mod naming;
pub mod sed;
pub mod serialization;
