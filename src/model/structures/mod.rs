pub mod contest;
pub mod parameters;
pub mod participant;
pub mod settings;
