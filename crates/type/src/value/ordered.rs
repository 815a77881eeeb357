// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	cmp::Ordering,
	fmt,
	fmt::{Display, Formatter},
	hash::{Hash, Hasher},
	ops::Deref,
};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderedFloatError;

impl Display for OrderedFloatError {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str("NaN is not a valid value")
	}
}

impl std::error::Error for OrderedFloatError {}

macro_rules! ordered_float {
	($name:ident, $float:ty) => {
		/// Totally ordered, hashable float. NaN is rejected on
		/// construction and -0.0 is normalized to 0.0.
		#[repr(transparent)]
		#[derive(Debug, Copy, Clone, Default, Serialize, Deserialize)]
		pub struct $name($float);

		impl $name {
			pub fn value(&self) -> $float {
				self.0
			}

			pub fn zero() -> Self {
				Self(0.0)
			}
		}

		impl Deref for $name {
			type Target = $float;

			fn deref(&self) -> &Self::Target {
				&self.0
			}
		}

		impl Display for $name {
			fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
				Display::fmt(&self.0, f)
			}
		}

		impl PartialEq for $name {
			fn eq(&self, other: &Self) -> bool {
				self.0.to_bits() == other.0.to_bits()
			}
		}

		impl Eq for $name {}

		impl PartialOrd for $name {
			fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
				Some(self.cmp(other))
			}
		}

		impl Ord for $name {
			fn cmp(&self, other: &Self) -> Ordering {
				self.0.total_cmp(&other.0)
			}
		}

		impl Hash for $name {
			fn hash<H: Hasher>(&self, state: &mut H) {
				self.0.to_bits().hash(state);
			}
		}

		impl From<$name> for $float {
			fn from(v: $name) -> Self {
				v.0
			}
		}

		impl TryFrom<$float> for $name {
			type Error = OrderedFloatError;

			fn try_from(f: $float) -> Result<Self, Self::Error> {
				if f.is_nan() {
					return Err(OrderedFloatError);
				}
				let normalized = if f == 0.0 {
					0.0
				} else {
					f
				};
				Ok(Self(normalized))
			}
		}
	};
}

ordered_float!(OrderedF32, f32);
ordered_float!(OrderedF64, f64);

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::*;

	#[test]
	fn test_sorting() {
		let mut values = vec![
			OrderedF64::try_from(10.0).unwrap(),
			OrderedF64::try_from(-2.0).unwrap(),
			OrderedF64::try_from(5.0).unwrap(),
		];
		values.sort();
		let sorted: Vec<f64> = values.into_iter().map(|v| v.value()).collect();
		assert_eq!(sorted, vec![-2.0, 5.0, 10.0]);
	}

	#[test]
	fn test_normalizes_zero() {
		let pos_zero = OrderedF32::try_from(0.0).unwrap();
		let neg_zero = OrderedF32::try_from(-0.0).unwrap();
		assert_eq!(pos_zero, neg_zero);

		let mut set = HashSet::new();
		set.insert(pos_zero);
		assert!(set.contains(&neg_zero));
	}

	#[test]
	fn test_nan_fails() {
		assert!(OrderedF32::try_from(f32::NAN).is_err());
		assert!(OrderedF64::try_from(f64::NAN).is_err());
	}
}
