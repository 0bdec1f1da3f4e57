#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod bmi;
mod energy;
mod error;
mod meal;
mod profile;
mod progress;
mod service;
mod summary;
mod weight;
mod workout;

pub use bmi::*;
pub use energy::*;
pub use error::*;
pub use meal::*;
pub use profile::*;
pub use progress::*;
pub use service::*;
pub use summary::*;
pub use weight::*;
pub use workout::*;

/// Round to the nearest integer, with halves rounded towards positive infinity.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn round(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}
