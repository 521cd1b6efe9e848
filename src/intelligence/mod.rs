//! Symptom screening and doctor matching.

pub mod emergency;
pub mod matching;
pub mod specialties;

pub use emergency::*;
pub use matching::*;
pub use specialties::*;
