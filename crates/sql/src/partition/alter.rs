// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::cmp::Ordering;

use strata_catalog::def::{ClassDef, PartitionBound, PartitionInfo, PartitionKind};
use strata_type::{Error, error, fragment::Fragment, value::Value};
use tracing::{debug, instrument};

use crate::{
	ast::{PartitionAlter, PartitionDefinition, PartitionValues},
	error::CheckError,
	partition::{Bound, PartitionValidator, SeenValues, check_range_order, range_bound},
};

impl<'a> PartitionValidator<'a> {
	/// Validates a partition maintenance operation on `class`. For
	/// [`PartitionAlter::Apply`] only the preconditions are checked, the new
	/// PARTITION BY clause goes through [`PartitionValidator::validate_spec`].
	#[instrument(name = "sql::partition::alter", level = "trace", skip_all, fields(class = %class.name))]
	pub fn validate_alter(&self, class: &ClassDef, alter: &mut PartitionAlter, fragment: &Fragment) -> Vec<Error> {
		let mut errors = vec![];

		if let PartitionAlter::Apply(_) = alter {
			if class.partition.is_some() {
				errors.push(error!(CheckError::AlreadyPartitioned {
					class: class.name.clone(),
					fragment: fragment.clone(),
				}));
			}
			self.check_triggers(class, fragment, &mut errors);
			return errors;
		}

		let Some(info) = &class.partition else {
			errors.push(error!(CheckError::NotPartitioned {
				class: class.name.clone(),
				fragment: fragment.clone(),
			}));
			return errors;
		};
		if !matches!(alter, PartitionAlter::Analyze(_)) {
			self.check_triggers(class, fragment, &mut errors);
		}

		let hash = info.kind == PartitionKind::Hash;
		match alter {
			PartitionAlter::Apply(_) => {}
			PartitionAlter::Add(definitions) => {
				if hash {
					errors.push(unsupported("ADD PARTITION", info.kind, fragment));
				} else {
					self.add(info, definitions, &mut errors);
				}
			}
			PartitionAlter::AddHash(count) => {
				if !hash {
					errors.push(unsupported("ADD PARTITION PARTITIONS", info.kind, fragment));
				} else {
					let max = self.config.max_hash_partitions;
					let total = info.partitions.len() as i64 + *count;
					if *count < 1 || total > max as i64 {
						errors.push(error!(CheckError::HashSize {
							size: total,
							max,
							fragment: fragment.clone(),
						}));
					}
				}
			}
			PartitionAlter::Drop(names) => {
				if hash {
					errors.push(unsupported("DROP PARTITION", info.kind, fragment));
				} else if let Some(indices) = find_partitions(info, names, fragment, &mut errors)
					&& indices.len() == info.partitions.len()
				{
					errors.push(error!(CheckError::DropAllPartitions {
						class: class.name.clone(),
						fragment: fragment.clone(),
					}));
				}
			}
			PartitionAlter::Reorganize {
				partitions,
				into,
			} => {
				if hash {
					errors.push(unsupported("REORGANIZE PARTITION", info.kind, fragment));
				} else if let Some(indices) = find_partitions(info, partitions, fragment, &mut errors) {
					self.reorganize(info, &indices, into, fragment, &mut errors);
				}
			}
			PartitionAlter::Analyze(names) => {
				find_partitions(info, names, fragment, &mut errors);
			}
			PartitionAlter::Coalesce(count) => {
				if !hash {
					errors.push(unsupported("COALESCE PARTITION", info.kind, fragment));
				} else {
					let buckets = info.partitions.len();
					if *count < 1 || *count >= buckets as i64 {
						errors.push(error!(CheckError::CoalesceCount {
							count: *count,
							buckets,
							fragment: fragment.clone(),
						}));
					}
				}
			}
			PartitionAlter::Remove => {}
		}
		errors
	}

	fn check_triggers(&self, class: &ClassDef, fragment: &Fragment, errors: &mut Vec<Error>) {
		match self.catalog.has_active_triggers(class.id) {
			Ok(false) => {}
			Ok(true) => errors.push(error!(CheckError::ActiveTriggers {
				class: class.name.clone(),
				fragment: fragment.clone(),
			})),
			Err(err) => errors.push(err),
		}
	}

	fn add(&self, info: &PartitionInfo, definitions: &mut [PartitionDefinition], errors: &mut Vec<Error>) {
		let existing: Vec<&str> = info.partitions.iter().map(|p| p.name.as_str()).collect();
		let mut seen = SeenValues::from_bounds(info.partitions.iter().map(|p| (p.name.as_str(), &p.bound)));
		self.validate_definitions(info.kind, definitions, &info.key_domain, &mut seen, &existing, errors);
		if info.kind == PartitionKind::Range {
			let last = info.partitions.last().and_then(|p| stored_range_bound(&p.bound));
			check_range_order(last, definitions, errors);
		}
	}

	/// Replaces the partitions at `indices` by `into`. The new partitions
	/// must hold exactly the values the old ones held.
	fn reorganize(
		&self,
		info: &PartitionInfo,
		indices: &[usize],
		into: &mut [PartitionDefinition],
		fragment: &Fragment,
		errors: &mut Vec<Error>,
	) {
		let remaining: Vec<&str> = info
			.partitions
			.iter()
			.enumerate()
			.filter(|(i, _)| !indices.contains(i))
			.map(|(_, p)| p.name.as_str())
			.collect();
		let mut seen = SeenValues::from_bounds(
			info.partitions.iter().enumerate().filter(|(i, _)| !indices.contains(i)).map(|(_, p)| (p.name.as_str(), &p.bound)),
		);
		let before = errors.len();
		self.validate_definitions(info.kind, into, &info.key_domain, &mut seen, &remaining, errors);

		match info.kind {
			PartitionKind::Range => {
				if indices.windows(2).any(|w| w[1] != w[0] + 1) {
					errors.push(error!(CheckError::ReorganizeNotAdjacent {
						fragment: fragment.clone(),
					}));
					return;
				}
				check_range_order(None, into, errors);
				if errors.len() > before {
					return;
				}
				reorganize_range(info, indices, into, errors);
			}
			PartitionKind::List => {
				if errors.len() > before {
					return;
				}
				reorganize_list(info, indices, into, fragment, errors);
			}
			PartitionKind::Hash => {}
		}
	}
}

fn reorganize_range(info: &PartitionInfo, indices: &[usize], into: &[PartitionDefinition], errors: &mut Vec<Error>) {
	let (Some(&first), Some(&last)) = (indices.first(), indices.last()) else {
		return;
	};
	let (Some(new_first), Some(new_last)) = (into.first(), into.last()) else {
		return;
	};

	// the new ranges start above the partition before the group
	if first > 0
		&& let (Some(previous), Some(bound)) =
			(stored_range_bound(&info.partitions[first - 1].bound), range_bound(new_first))
		&& previous.compare(&bound) != Some(Ordering::Less)
	{
		errors.push(error!(CheckError::ReorganizeOverlap {
			partition: new_first.name.clone(),
			fragment: new_first.fragment(),
		}));
	}

	let (Some(old_max), Some(new_max)) = (stored_range_bound(&info.partitions[last].bound), range_bound(new_last))
	else {
		return;
	};
	match new_max.compare(&old_max) {
		Some(Ordering::Equal) => {}
		Some(Ordering::Less) => errors.push(error!(CheckError::DataLoss {
			detail: format!("values from {} below {}", new_max, old_max),
			fragment: new_last.fragment(),
		})),
		Some(Ordering::Greater) if last + 1 == info.partitions.len() => {
			debug!(from = %old_max, to = %new_max, "reorganize widens the last range");
		}
		_ => errors.push(error!(CheckError::ReorganizeOverlap {
			partition: new_last.name.clone(),
			fragment: new_last.fragment(),
		})),
	}
}

fn reorganize_list(
	info: &PartitionInfo,
	indices: &[usize],
	into: &[PartitionDefinition],
	fragment: &Fragment,
	errors: &mut Vec<Error>,
) {
	let mut kept = SeenValues::new();
	for definition in into {
		if let PartitionValues::In(values) = &definition.values {
			for value in values.iter().filter_map(|expr| expr.as_literal()) {
				kept.insert(Bound::from_value(value), &definition.name);
			}
		}
	}

	let mut lost: Vec<String> = vec![];
	for &index in indices {
		let PartitionBound::List(values) = &info.partitions[index].bound else {
			continue;
		};
		for value in values {
			if kept.insert(Bound::from_value(value), "").is_none() {
				lost.push(value.to_string());
			}
		}
	}
	if !lost.is_empty() {
		errors.push(error!(CheckError::DataLoss {
			detail: format!("values {}", lost.join(", ")),
			fragment: fragment.clone(),
		}));
	}
}

/// Positions of the named partitions, `None` when a name is unknown or
/// repeated
fn find_partitions(
	info: &PartitionInfo,
	names: &[String],
	fragment: &Fragment,
	errors: &mut Vec<Error>,
) -> Option<Vec<usize>> {
	let mut indices: Vec<usize> = Vec::with_capacity(names.len());
	let mut complete = true;
	for name in names {
		match info.partitions.iter().position(|p| p.name.eq_ignore_ascii_case(name)) {
			None => {
				errors.push(error!(CheckError::PartitionNotFound {
					name: name.clone(),
					fragment: fragment.clone(),
				}));
				complete = false;
			}
			Some(index) if indices.contains(&index) => {
				errors.push(error!(CheckError::DuplicateName {
					name: name.clone(),
					fragment: fragment.clone(),
				}));
				complete = false;
			}
			Some(index) => indices.push(index),
		}
	}
	indices.sort_unstable();
	complete.then_some(indices)
}

fn stored_range_bound(bound: &PartitionBound) -> Option<Bound> {
	match bound {
		PartitionBound::Range {
			max: Some(Value::Null),
		} => Some(Bound::Null),
		PartitionBound::Range {
			max: Some(max),
		} => Some(Bound::Value(max.clone())),
		PartitionBound::Range {
			max: None,
		} => Some(Bound::MaxValue),
		_ => None,
	}
}

fn unsupported(operation: &'static str, kind: PartitionKind, fragment: &Fragment) -> Error {
	error!(CheckError::PartitionOperation {
		operation,
		kind: kind.to_string(),
		fragment: fragment.clone(),
	})
}
