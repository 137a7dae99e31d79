//! Domain models for the MyHeart clinic.

mod appointment;
mod doctor;
mod invoice;
mod lab_test;
mod medical_record;
mod notification;
mod patient;
mod pharmacy;
mod prescription;
mod record;

pub use appointment::*;
pub use doctor::*;
pub use invoice::*;
pub use lab_test::*;
pub use medical_record::*;
pub use notification::*;
pub use patient::*;
pub use pharmacy::*;
pub use prescription::*;
pub use record::*;
