use std::alloc;
use std::error::Error;

use crate::util::error::ReserveError;

pub(crate) trait ResultExtension<T, E: Error> {
    /// A method similar to [`Result::unwrap`], except that it applies only to types which implement
    /// [`Error`] and panics with the message of the error itself.
    ///
    /// # Panics
    /// Panics if the [`Result`] is an [`Err`].
    fn throw(self) -> T;
}

impl<T, E: Error> ResultExtension<T, E> for Result<T, E> {
    fn throw(self) -> T {
        match self {
            Ok(val) => val,
            Err(error) => panic!("{}", error),
        }
    }
}

pub(crate) trait ReserveResultExtension<T> {
    /// Resolves a [`ReserveError`] the way infallible collection methods should: capacity
    /// overflows panic, while allocation failures are forwarded to [`alloc::handle_alloc_error`]
    /// to avoid allocating during the panic.
    ///
    /// # Panics
    /// Panics if the [`Result`] is an [`Err`] containing a capacity overflow.
    fn or_handle_alloc(self) -> T;
}

impl<T> ReserveResultExtension<T> for Result<T, ReserveError> {
    fn or_handle_alloc(self) -> T {
        match self {
            Ok(val) => val,
            Err(ReserveError::AllocFailed(error)) => alloc::handle_alloc_error(error.layout),
            Err(ReserveError::CapacityOverflow(error)) => Err::<T, _>(error).throw(),
        }
    }
}
