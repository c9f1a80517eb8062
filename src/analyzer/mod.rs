pub mod ca;
pub mod statuts;
