use std::error::Error;

use super::Context;
use crate::error::BlasError;

pub trait Backend: Sized {
    type Context: Context<Backend = Self>;
    type Error: Error + From<String> + Into<BlasError> + Send + Sync + 'static;
}
