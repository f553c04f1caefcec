pub mod control;
pub mod data;
pub mod network;
