pub mod consultation;
pub mod doctor;

pub use consultation::*;
pub use doctor::*;
