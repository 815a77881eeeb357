// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

/// Builds an [`Error`](crate::Error) from anything that converts into a
/// diagnostic.
#[macro_export]
macro_rules! error {
	($diagnostic:expr) => {
		$crate::error::Error::from($diagnostic)
	};
}

/// Returns early with an [`Error`](crate::Error).
#[macro_export]
macro_rules! return_error {
	($diagnostic:expr) => {
		return Err($crate::error!($diagnostic))
	};
}

/// Wraps an [`Error`](crate::Error) into `Err`.
#[macro_export]
macro_rules! err {
	($diagnostic:expr) => {
		Err($crate::error!($diagnostic))
	};
}

/// Internal error diagnostic capturing the source location
#[macro_export]
macro_rules! internal_error {
	($reason:expr) => {
		$crate::error::diagnostic::internal::internal_with_context(
			$reason,
			file!(),
			line!(),
			column!(),
			{
				fn f() {}
				fn type_name_of<T>(_: T) -> &'static str {
					std::any::type_name::<T>()
				}
				let name = type_name_of(f);
				&name[..name.len() - 3]
			},
			module_path!(),
		)
	};
	($fmt:expr, $($arg:tt)*) => {
		$crate::internal_error!(format!($fmt, $($arg)*))
	};
}

/// Returns early with an internal error. Debug builds assert first, a well
/// formed statement tree never reaches this.
#[macro_export]
macro_rules! return_internal_error {
	($reason:expr) => {{
		debug_assert!(false, "{}", $reason);
		return Err($crate::error!($crate::internal_error!($reason)));
	}};
	($fmt:expr, $($arg:tt)*) => {{
		debug_assert!(false, $fmt, $($arg)*);
		return Err($crate::error!($crate::internal_error!($fmt, $($arg)*)));
	}};
}
