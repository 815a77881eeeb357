// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use strata_type::{
	error::{Diagnostic, IntoDiagnostic},
	fragment::Fragment,
	value::Domain,
};

/// User facing errors of the semantic checker
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CheckError {
	// query
	#[error("INTO clause names {actual} variables but the select list has {expected} columns")]
	IntoArity {
		expected: usize,
		actual: usize,
		fragment: Fragment,
	},

	#[error("column `{name}` not found")]
	ColumnNotFound {
		name: String,
		fragment: Fragment,
	},

	#[error("column `{name}` is ambiguous")]
	AmbiguousColumn {
		name: String,
		fragment: Fragment,
	},

	#[error("`{name}` does not name a source of the FROM clause")]
	UnknownQualifier {
		name: String,
		fragment: Fragment,
	},

	#[error("{expr} is neither grouped nor aggregated")]
	NotGrouped {
		expr: String,
		fragment: Fragment,
	},

	#[error("aggregate functions are not allowed in {clause}")]
	AggregateNotAllowed {
		clause: &'static str,
		fragment: Fragment,
	},

	#[error("aggregate functions cannot be nested")]
	NestedAggregate {
		fragment: Fragment,
	},

	#[error("operator {operator} cannot be applied to {domain}")]
	OperandType {
		operator: String,
		domain: Domain,
		fragment: Fragment,
	},

	#[error("{left} and {right} cannot be compared")]
	Incomparable {
		left: Domain,
		right: Domain,
		fragment: Fragment,
	},

	#[error("subquery used as a value must return one column, it returns {count}")]
	SubqueryArity {
		count: usize,
		fragment: Fragment,
	},

	// set operations
	#[error("{op} operands have different column counts: {left} and {right}")]
	UnionArity {
		op: String,
		left: usize,
		right: usize,
		fragment: Fragment,
	},

	#[error("column {position} of the {op} operands is incompatible: {left} and {right}")]
	UnionIncompatible {
		op: String,
		position: usize,
		left: Domain,
		right: Domain,
		fragment: Fragment,
	},

	// order by
	#[error("ORDER BY position {position} is out of range, the select list has {count} columns")]
	OrderByRange {
		position: i64,
		count: usize,
		fragment: Fragment,
	},

	#[error("ORDER BY expression {expr} must appear in the select list")]
	OrderByNotSelected {
		expr: String,
		fragment: Fragment,
	},

	#[error("column {position} is sorted both ascending and descending")]
	OrderByConflict {
		position: usize,
		fragment: Fragment,
	},

	// dml
	#[error("DELETE accepts a single target, found {count}")]
	DeleteMultipleTargets {
		count: usize,
		fragment: Fragment,
	},

	#[error("cannot {operation} through a derived table")]
	DerivedTarget {
		operation: &'static str,
		fragment: Fragment,
	},

	#[error("column `{column}` is assigned more than once")]
	DuplicateAssignment {
		column: String,
		fragment: Fragment,
	},

	#[error("{expected} columns are assigned but {actual} values are given")]
	ValueCount {
		expected: usize,
		actual: usize,
		fragment: Fragment,
	},

	#[error("column `{column}` is listed more than once")]
	DuplicateColumn {
		column: String,
		fragment: Fragment,
	},

	#[error("value of type {from} cannot be assigned to `{column}` of type {to}")]
	AssignmentIncompatible {
		column: String,
		from: Domain,
		to: Domain,
		fragment: Fragment,
	},

	#[error("`{column}` does not accept NULL")]
	NullIntoNotNull {
		column: String,
		fragment: Fragment,
	},

	// class ddl
	#[error("attribute `{name}` is defined more than once")]
	DuplicateAttribute {
		name: String,
		fragment: Fragment,
	},

	#[error("invalid {domain}: {reason}")]
	InvalidPrecision {
		domain: Domain,
		reason: String,
		fragment: Fragment,
	},

	#[error("`{name}` is a view and cannot be a superclass")]
	SuperclassIsView {
		name: String,
		fragment: Fragment,
	},

	#[error("`{class}` already inherits from `{superclass}`")]
	AlreadySuperclass {
		class: String,
		superclass: String,
		fragment: Fragment,
	},

	#[error("`{superclass}` is not a superclass of `{class}`")]
	NotSuperclass {
		class: String,
		superclass: String,
		fragment: Fragment,
	},

	#[error("AUTO_INCREMENT requires an integer or NUMERIC(p,0) attribute, `{attribute}` is {domain}")]
	AutoIncrementType {
		attribute: String,
		domain: Domain,
		fragment: Fragment,
	},

	#[error("query specification returns {actual} columns but the view has {expected} attributes")]
	ViewArity {
		expected: usize,
		actual: usize,
		fragment: Fragment,
	},

	#[error("query column of type {from} is incompatible with view attribute `{attribute}` of type {to}")]
	ViewIncompatible {
		attribute: String,
		from: Domain,
		to: Domain,
		fragment: Fragment,
	},

	#[error("`{attribute}` is inherited from `{owner}` and cannot be changed in `{class}`")]
	AttributeNotOwned {
		attribute: String,
		class: String,
		owner: String,
		fragment: Fragment,
	},

	#[error("`{attribute}` is the partition key of `{class}`")]
	PartitionKeyAttribute {
		attribute: String,
		class: String,
		fragment: Fragment,
	},

	#[error("`{name}` is a {actual}, not a {expected}")]
	KindMismatch {
		name: String,
		expected: &'static str,
		actual: &'static str,
		fragment: Fragment,
	},

	#[error("`{name}` appears more than once")]
	DuplicateName {
		name: String,
		fragment: Fragment,
	},

	#[error("`{name}` holds a partition and cannot be dropped directly")]
	PartitionChild {
		name: String,
		fragment: Fragment,
	},

	#[error("view has {count} query specifications, {position} is out of range")]
	QuerySpecRange {
		position: usize,
		count: usize,
		fragment: Fragment,
	},

	#[error("cannot drop the only query specification of `{view}`")]
	LastQuerySpec {
		view: String,
		fragment: Fragment,
	},

	// index ddl
	#[error("cannot create an index on view `{name}`")]
	IndexOnView {
		name: String,
		fragment: Fragment,
	},

	#[error("column `{column}` of type {domain} cannot be indexed")]
	IndexColumnType {
		column: String,
		domain: Domain,
		fragment: Fragment,
	},

	#[error("prefix length is only allowed on string and bit columns, `{column}` is {domain}")]
	PrefixLength {
		column: String,
		domain: Domain,
		fragment: Fragment,
	},

	#[error("index filter must not contain {reason}")]
	IndexFilter {
		reason: &'static str,
		fragment: Fragment,
	},

	#[error("index filter references `{column}` outside of `{class}`")]
	IndexFilterForeign {
		column: String,
		class: String,
		fragment: Fragment,
	},

	// serial ddl
	#[error("serial increment cannot be zero")]
	SerialIncrementZero {
		fragment: Fragment,
	},

	#[error("serial minimum {min} must be less than maximum {max}")]
	SerialBounds {
		min: String,
		max: String,
		fragment: Fragment,
	},

	#[error("serial start {start} is outside of [{min}, {max}]")]
	SerialStart {
		start: String,
		min: String,
		max: String,
		fragment: Fragment,
	},

	#[error("serial increment {increment} exceeds the range {min} .. {max}")]
	SerialIncrementRange {
		increment: String,
		min: String,
		max: String,
		fragment: Fragment,
	},

	#[error("serial cache size {cached} is invalid for a range of {values} values")]
	SerialCache {
		cached: i64,
		values: String,
		fragment: Fragment,
	},

	#[error("serial value {value} exceeds {digits} digits")]
	SerialDigits {
		value: String,
		digits: u32,
		fragment: Fragment,
	},

	#[error("serial `{name}` belongs to AUTO_INCREMENT attribute `{class}.{attribute}`")]
	SerialAutoIncrement {
		name: String,
		class: String,
		attribute: String,
		fragment: Fragment,
	},

	// grant
	#[error("privilege {privilege} is listed more than once")]
	DuplicatePrivilege {
		privilege: String,
		fragment: Fragment,
	},

	// trigger
	#[error("only UPDATE triggers may watch an attribute")]
	TriggerAttribute {
		fragment: Fragment,
	},

	// partitioning
	#[error("partition key references no column")]
	PartitionNoColumn {
		fragment: Fragment,
	},

	#[error("only one partition column is allowed, found {columns}")]
	PartitionMultipleColumns {
		columns: String,
		fragment: Fragment,
	},

	#[error("partition key `{column}` of type {domain} is not allowed")]
	PartitionKeyType {
		column: String,
		domain: Domain,
		fragment: Fragment,
	},

	#[error("duplicate partition value {value} in `{partition}`")]
	PartitionDuplicateValue {
		value: String,
		partition: String,
		fragment: Fragment,
	},

	#[error("partition value {value} does not match the partition key type {domain}")]
	PartitionValueType {
		value: String,
		domain: Domain,
		fragment: Fragment,
	},

	#[error("partition value {value} is not a constant")]
	PartitionValueNotConstant {
		value: String,
		fragment: Fragment,
	},

	#[error("{kind} partitioning does not accept {definition}")]
	PartitionDefinitionKind {
		kind: String,
		definition: &'static str,
		fragment: Fragment,
	},

	#[error("{count} partitions exceed the maximum of {max}")]
	PartitionCount {
		count: usize,
		max: usize,
		fragment: Fragment,
	},

	#[error("range of partition `{partition}` must be greater than the previous partition")]
	PartitionRangeOrder {
		partition: String,
		fragment: Fragment,
	},

	#[error("partition `{name}` is defined more than once")]
	PartitionDuplicateName {
		name: String,
		fragment: Fragment,
	},

	#[error("hash partition count {size} must be between 1 and {max}")]
	HashSize {
		size: i64,
		max: usize,
		fragment: Fragment,
	},

	#[error("{nodes} nodes exceed the {buckets} hash partitions")]
	NodeCount {
		nodes: usize,
		buckets: usize,
		fragment: Fragment,
	},

	#[error("class `{class}` is not partitioned")]
	NotPartitioned {
		class: String,
		fragment: Fragment,
	},

	#[error("class `{class}` is already partitioned")]
	AlreadyPartitioned {
		class: String,
		fragment: Fragment,
	},

	#[error("{operation} is not supported for {kind} partitioning")]
	PartitionOperation {
		operation: &'static str,
		kind: String,
		fragment: Fragment,
	},

	#[error("partition `{name}` does not exist")]
	PartitionNotFound {
		name: String,
		fragment: Fragment,
	},

	#[error("cannot drop every partition of `{class}`")]
	DropAllPartitions {
		class: String,
		fragment: Fragment,
	},

	#[error("cannot coalesce {count} of {buckets} hash partitions")]
	CoalesceCount {
		count: i64,
		buckets: usize,
		fragment: Fragment,
	},

	#[error("class `{class}` has active triggers")]
	ActiveTriggers {
		class: String,
		fragment: Fragment,
	},

	#[error("data loss not allowed: reorganized partitions no longer hold {detail}")]
	DataLoss {
		detail: String,
		fragment: Fragment,
	},

	#[error("reorganized range of `{partition}` overlaps the partitions that remain")]
	ReorganizeOverlap {
		partition: String,
		fragment: Fragment,
	},

	#[error("reorganized partitions must be adjacent")]
	ReorganizeNotAdjacent {
		fragment: Fragment,
	},
}

impl IntoDiagnostic for CheckError {
	fn into_diagnostic(self) -> Diagnostic {
		let message = self.to_string();
		let (code, fragment, label, help, notes): (&str, Fragment, Option<String>, Option<String>, Vec<String>) =
			match self {
				CheckError::IntoArity {
					expected,
					fragment,
					..
				} => (
					"QUERY_001",
					fragment,
					Some("INTO arity mismatch".to_string()),
					Some(format!("name exactly {} variables", expected)),
					vec![],
				),
				CheckError::ColumnNotFound {
					name,
					fragment,
				} => (
					"QUERY_002",
					fragment,
					Some("unknown column".to_string()),
					Some(format!("check that `{}` is an attribute of a FROM source", name)),
					vec![],
				),
				CheckError::AmbiguousColumn {
					fragment,
					..
				} => (
					"QUERY_003",
					fragment,
					Some("ambiguous column".to_string()),
					Some("qualify the column with its class name or alias".to_string()),
					vec![],
				),
				CheckError::UnknownQualifier {
					fragment,
					..
				} => ("QUERY_004", fragment, Some("unknown qualifier".to_string()), None, vec![]),
				CheckError::NotGrouped {
					fragment,
					..
				} => (
					"GROUP_001",
					fragment,
					Some("not in GROUP BY".to_string()),
					Some("add the expression to GROUP BY or wrap it in an aggregate function".to_string()),
					vec![],
				),
				CheckError::AggregateNotAllowed {
					fragment,
					..
				} => (
					"AGGREGATE_001",
					fragment,
					Some("aggregate not allowed here".to_string()),
					Some("move the condition into HAVING or a subquery".to_string()),
					vec![],
				),
				CheckError::NestedAggregate {
					fragment,
				} => ("AGGREGATE_002", fragment, Some("nested aggregate".to_string()), None, vec![]),
				CheckError::OperandType {
					fragment,
					..
				} => ("EXPR_001", fragment, Some("invalid operand type".to_string()), None, vec![]),
				CheckError::Incomparable {
					fragment,
					..
				} => (
					"EXPR_002",
					fragment,
					Some("incomparable operands".to_string()),
					Some("cast one side to the type of the other".to_string()),
					vec![],
				),
				CheckError::SubqueryArity {
					fragment,
					..
				} => ("EXPR_003", fragment, Some("subquery returns several columns".to_string()), None, vec![]),
				CheckError::UnionArity {
					left,
					right,
					fragment,
					..
				} => (
					"UNION_001",
					fragment,
					Some(format!("{} columns against {}", left, right)),
					Some("both operands must select the same number of columns".to_string()),
					vec![],
				),
				CheckError::UnionIncompatible {
					fragment,
					..
				} => (
					"UNION_002",
					fragment,
					Some("incompatible column".to_string()),
					Some("cast the columns to a common type".to_string()),
					vec![],
				),
				CheckError::OrderByRange {
					count,
					fragment,
					..
				} => (
					"ORDER_001",
					fragment,
					Some("position out of range".to_string()),
					Some(format!("use a position between 1 and {}", count)),
					vec![],
				),
				CheckError::OrderByNotSelected {
					fragment,
					..
				} => (
					"ORDER_002",
					fragment,
					Some("sort key not selected".to_string()),
					None,
					vec!["DISTINCT queries and set operations sort by selected columns only".to_string()],
				),
				CheckError::OrderByConflict {
					fragment,
					..
				} => ("ORDER_003", fragment, Some("conflicting sort direction".to_string()), None, vec![]),
				CheckError::DeleteMultipleTargets {
					fragment,
					..
				} => ("DML_001", fragment, Some("too many targets".to_string()), None, vec![]),
				CheckError::DerivedTarget {
					fragment,
					..
				} => ("DML_002", fragment, Some("derived table target".to_string()), None, vec![]),
				CheckError::DuplicateAssignment {
					fragment,
					..
				} => ("DML_003", fragment, Some("assigned twice".to_string()), None, vec![]),
				CheckError::ValueCount {
					fragment,
					..
				} => ("DML_004", fragment, Some("value count mismatch".to_string()), None, vec![]),
				CheckError::DuplicateColumn {
					fragment,
					..
				} => ("DML_005", fragment, Some("duplicate column".to_string()), None, vec![]),
				CheckError::AssignmentIncompatible {
					fragment,
					..
				} => (
					"DML_006",
					fragment,
					Some("incompatible value".to_string()),
					Some("cast the value to the column type".to_string()),
					vec![],
				),
				CheckError::NullIntoNotNull {
					fragment,
					..
				} => ("DML_007", fragment, Some("NULL into NOT NULL column".to_string()), None, vec![]),
				CheckError::DuplicateAttribute {
					fragment,
					..
				} => ("DDL_001", fragment, Some("duplicate attribute".to_string()), None, vec![]),
				CheckError::InvalidPrecision {
					fragment,
					..
				} => ("DDL_002", fragment, Some("invalid precision".to_string()), None, vec![]),
				CheckError::SuperclassIsView {
					fragment,
					..
				} => ("DDL_003", fragment, Some("view as superclass".to_string()), None, vec![]),
				CheckError::AlreadySuperclass {
					fragment,
					..
				} => ("DDL_004", fragment, Some("already a superclass".to_string()), None, vec![]),
				CheckError::NotSuperclass {
					fragment,
					..
				} => ("DDL_005", fragment, Some("not a superclass".to_string()), None, vec![]),
				CheckError::AutoIncrementType {
					fragment,
					..
				} => ("DDL_006", fragment, Some("invalid AUTO_INCREMENT type".to_string()), None, vec![]),
				CheckError::ViewArity {
					expected,
					fragment,
					..
				} => (
					"DDL_007",
					fragment,
					Some("column count mismatch".to_string()),
					Some(format!("select exactly {} columns", expected)),
					vec![],
				),
				CheckError::ViewIncompatible {
					fragment,
					..
				} => ("DDL_008", fragment, Some("incompatible view column".to_string()), None, vec![]),
				CheckError::AttributeNotOwned {
					owner,
					fragment,
					..
				} => (
					"DDL_009",
					fragment,
					Some("inherited attribute".to_string()),
					Some(format!("alter `{}` instead", owner)),
					vec![],
				),
				CheckError::PartitionKeyAttribute {
					fragment,
					..
				} => (
					"DDL_010",
					fragment,
					Some("partition key".to_string()),
					Some("remove the partitioning first".to_string()),
					vec![],
				),
				CheckError::KindMismatch {
					fragment,
					..
				} => ("DDL_011", fragment, Some("wrong object kind".to_string()), None, vec![]),
				CheckError::DuplicateName {
					fragment,
					..
				} => ("DDL_012", fragment, Some("duplicate name".to_string()), None, vec![]),
				CheckError::PartitionChild {
					fragment,
					..
				} => (
					"DDL_013",
					fragment,
					Some("partition class".to_string()),
					Some("use ALTER ... DROP PARTITION".to_string()),
					vec![],
				),
				CheckError::QuerySpecRange {
					fragment,
					..
				} => ("DDL_014", fragment, Some("no such query specification".to_string()), None, vec![]),
				CheckError::LastQuerySpec {
					fragment,
					..
				} => ("DDL_015", fragment, Some("last query specification".to_string()), None, vec![]),
				CheckError::IndexOnView {
					fragment,
					..
				} => ("INDEX_001", fragment, Some("index on view".to_string()), None, vec![]),
				CheckError::IndexColumnType {
					fragment,
					..
				} => ("INDEX_002", fragment, Some("column cannot be indexed".to_string()), None, vec![]),
				CheckError::PrefixLength {
					fragment,
					..
				} => ("INDEX_003", fragment, Some("prefix length not allowed".to_string()), None, vec![]),
				CheckError::IndexFilter {
					fragment,
					..
				} => ("INDEX_004", fragment, Some("invalid index filter".to_string()), None, vec![]),
				CheckError::IndexFilterForeign {
					fragment,
					..
				} => ("INDEX_005", fragment, Some("foreign column in index filter".to_string()), None, vec![]),
				CheckError::SerialIncrementZero {
					fragment,
				} => ("SEQUENCE_001", fragment, Some("zero increment".to_string()), None, vec![]),
				CheckError::SerialBounds {
					fragment,
					..
				} => ("SEQUENCE_002", fragment, Some("empty range".to_string()), None, vec![]),
				CheckError::SerialStart {
					fragment,
					..
				} => ("SEQUENCE_003", fragment, Some("start out of range".to_string()), None, vec![]),
				CheckError::SerialIncrementRange {
					fragment,
					..
				} => ("SEQUENCE_004", fragment, Some("increment too large".to_string()), None, vec![]),
				CheckError::SerialCache {
					fragment,
					..
				} => (
					"SEQUENCE_005",
					fragment,
					Some("invalid cache size".to_string()),
					None,
					vec!["the cache size cannot exceed the number of values the serial can produce".to_string()],
				),
				CheckError::SerialDigits {
					fragment,
					..
				} => ("SEQUENCE_006", fragment, Some("too many digits".to_string()), None, vec![]),
				CheckError::SerialAutoIncrement {
					class,
					fragment,
					..
				} => (
					"SEQUENCE_007",
					fragment,
					Some("AUTO_INCREMENT serial".to_string()),
					Some(format!("alter the attribute of `{}` instead", class)),
					vec![],
				),
				CheckError::DuplicatePrivilege {
					fragment,
					..
				} => ("GRANT_001", fragment, Some("duplicate privilege".to_string()), None, vec![]),
				CheckError::TriggerAttribute {
					fragment,
				} => ("TRIGGER_001", fragment, Some("attribute on non-UPDATE trigger".to_string()), None, vec![]),
				CheckError::PartitionNoColumn {
					fragment,
				} => (
					"PARTITION_001",
					fragment,
					Some("no partition column".to_string()),
					Some("partition by a column or an expression over one column".to_string()),
					vec![],
				),
				CheckError::PartitionMultipleColumns {
					fragment,
					..
				} => (
					"PARTITION_002",
					fragment,
					Some("only one partition column".to_string()),
					Some("partition by a column or an expression over one column".to_string()),
					vec![],
				),
				CheckError::PartitionKeyType {
					fragment,
					..
				} => (
					"PARTITION_003",
					fragment,
					Some("invalid partition key type".to_string()),
					None,
					vec!["partition keys must be integer, temporal or character string values".to_string()],
				),
				CheckError::PartitionDuplicateValue {
					fragment,
					..
				} => ("PARTITION_004", fragment, Some("duplicate partition value".to_string()), None, vec![]),
				CheckError::PartitionValueType {
					fragment,
					..
				} => ("PARTITION_005", fragment, Some("partition value type".to_string()), None, vec![]),
				CheckError::PartitionValueNotConstant {
					fragment,
					..
				} => ("PARTITION_006", fragment, Some("not a constant".to_string()), None, vec![]),
				CheckError::PartitionDefinitionKind {
					fragment,
					..
				} => ("PARTITION_007", fragment, Some("invalid partition definition".to_string()), None, vec![]),
				CheckError::PartitionCount {
					fragment,
					..
				} => ("PARTITION_008", fragment, Some("too many partitions".to_string()), None, vec![]),
				CheckError::PartitionRangeOrder {
					fragment,
					..
				} => (
					"PARTITION_009",
					fragment,
					Some("range not increasing".to_string()),
					Some("list range partitions in increasing order with MAXVALUE last".to_string()),
					vec![],
				),
				CheckError::PartitionDuplicateName {
					fragment,
					..
				} => ("PARTITION_010", fragment, Some("duplicate partition name".to_string()), None, vec![]),
				CheckError::HashSize {
					fragment,
					..
				} => ("PARTITION_011", fragment, Some("invalid hash size".to_string()), None, vec![]),
				CheckError::NodeCount {
					fragment,
					..
				} => ("PARTITION_012", fragment, Some("too many nodes".to_string()), None, vec![]),
				CheckError::NotPartitioned {
					fragment,
					..
				} => ("PARTITION_013", fragment, Some("not partitioned".to_string()), None, vec![]),
				CheckError::AlreadyPartitioned {
					fragment,
					..
				} => (
					"PARTITION_014",
					fragment,
					Some("already partitioned".to_string()),
					Some("use REORGANIZE PARTITION or REMOVE PARTITIONING first".to_string()),
					vec![],
				),
				CheckError::PartitionOperation {
					fragment,
					..
				} => ("PARTITION_015", fragment, Some("unsupported operation".to_string()), None, vec![]),
				CheckError::PartitionNotFound {
					fragment,
					..
				} => ("PARTITION_016", fragment, Some("unknown partition".to_string()), None, vec![]),
				CheckError::DropAllPartitions {
					fragment,
					..
				} => (
					"PARTITION_017",
					fragment,
					Some("every partition dropped".to_string()),
					Some("use REMOVE PARTITIONING instead".to_string()),
					vec![],
				),
				CheckError::CoalesceCount {
					fragment,
					..
				} => ("PARTITION_018", fragment, Some("invalid coalesce count".to_string()), None, vec![]),
				CheckError::ActiveTriggers {
					fragment,
					..
				} => (
					"PARTITION_019",
					fragment,
					Some("active triggers".to_string()),
					Some("deactivate the triggers of the class first".to_string()),
					vec![],
				),
				CheckError::DataLoss {
					fragment,
					..
				} => ("PARTITION_020", fragment, Some("data loss not allowed".to_string()), None, vec![]),
				CheckError::ReorganizeOverlap {
					fragment,
					..
				} => ("PARTITION_021", fragment, Some("overlapping range".to_string()), None, vec![]),
				CheckError::ReorganizeNotAdjacent {
					fragment,
				} => ("PARTITION_022", fragment, Some("partitions not adjacent".to_string()), None, vec![]),
			};

		Diagnostic {
			code: code.to_string(),
			statement: None,
			message,
			column: None,
			fragment,
			label,
			help,
			notes,
			cause: None,
		}
	}
}
