use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::error::{Nothing, ServerError};

macro_rules! response_error {
    ($name:ident {
        $(
            #[code($variant_code:expr)]
            #[error($($message_tt:tt)*)]
            $variant:ident
            $({ $($var_struct_body_tt:tt)* })?
        ,)*
    }) => {

        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
        pub enum $name {
            $(
                #[error($($message_tt)*)]
                $variant $({
                    $($var_struct_body_tt)*
                })?,
            )*
        }

        impl From<$name> for ServerError<$name> {
            fn from(inner: $name) -> Self {
                let code = match &inner {
                    $( $name::$variant { .. } => $variant_code, )*
                };
                Self::Inner { code, inner }
            }
        }
    };
}

response_error!(ExerciseError {
    #[code(StatusCode::NOT_FOUND)]
    #[error("Exercise {id} not found")]
    NotFound { id: i64 },
    #[code(StatusCode::BAD_REQUEST)]
    #[error("Exercise with the name \"{name}\" already exists")]
    NameTaken { name: String },
});

response_error!(WorkoutError {
    #[code(StatusCode::NOT_FOUND)]
    #[error("Workout {id} not found")]
    NotFound { id: i64 },
    #[code(StatusCode::BAD_REQUEST)]
    #[error("User {user_id} does not exist")]
    UnknownUser { user_id: i64 },
});

response_error!(WorkoutExerciseError {
    #[code(StatusCode::NOT_FOUND)]
    #[error("Workout exercise {id} not found")]
    NotFound { id: i64 },
    #[code(StatusCode::BAD_REQUEST)]
    #[error("Workout {workout_id} does not exist")]
    UnknownWorkout { workout_id: i64 },
    #[code(StatusCode::BAD_REQUEST)]
    #[error("Exercise {exercise_id} does not exist")]
    UnknownExercise { exercise_id: i64 },
});

response_error!(RouteError {
    #[code(StatusCode::NOT_FOUND)]
    #[error("Not found")]
    NotFound,
});

response_error!(UserError {
    #[code(StatusCode::NOT_FOUND)]
    #[error("User {id} not found")]
    NotFound { id: i64 },
});

// Alias used to allow future expansion of the errors without having to go back
// and update all routes that use it
pub type FetchError = Nothing;

pub type ReportError = Nothing;
