mod category;
pub use category::*;

mod user;
pub use user::*;

mod exercise;
pub use exercise::*;

mod workout;
pub use workout::*;

mod workout_exercise;
pub use workout_exercise::*;

use crate::api::error::ValidationError;

pub trait ValidateModel {
    fn validate(&self) -> Result<(), ValidationError>;
}
