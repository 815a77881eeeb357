// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use strata_catalog::{MaterializedCatalog, test_utils};
use strata_sql::{
	CheckState, Checked, CheckerConfig, Rejected,
	ast::{
		AttributeDefinition, BinaryOp, CreateClass, Expr, ExprKind, FromItem, Insert, InsertSource,
		PartitionDefinition, PartitionSpec, Query, Select, SelectItem, SortKey, Statement,
	},
	check,
	compat::is_assignable,
};
use strata_type::{CastValidity, Domain, Type, check_cast};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
	let _ = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).with_test_writer().try_init();
}

fn catalog() -> MaterializedCatalog {
	init_tracing();
	let catalog = MaterializedCatalog::new();
	test_utils::create_class(
		&catalog,
		"t",
		&[("a", Domain::integer()), ("b", Domain::varchar(10)), ("c", Domain::double())],
	);
	test_utils::create_class(&catalog, "left_prices", &[("price", Domain::numeric(5, 2))]);
	test_utils::create_class(&catalog, "right_prices", &[("price", Domain::numeric(8, 3))]);
	catalog
}

fn run(statement: Statement) -> Result<Checked, Rejected> {
	check(&catalog(), &CheckerConfig::default(), statement)
}

fn select_ab() -> Select {
	Select::new(vec![SelectItem::new(Expr::column("a")), SelectItem::new(Expr::column("b"))])
		.from(FromItem::class("t"))
}

fn resolved_select(checked: &Checked) -> &Select {
	match &checked.statement {
		Statement::Query(Query::Select(select)) => select,
		_ => unreachable!(),
	}
}

#[test]
fn test_cast_matrix() {
	assert_eq!(check_cast(Type::Numeric, Type::Set), CastValidity::Invalid);
	assert_eq!(check_cast(Type::Varchar, Type::Multiset), CastValidity::Unsupported);
	assert_eq!(check_cast(Type::Integer, Type::Double), CastValidity::Valid);
}

#[test]
fn test_cast_expression() {
	let checked = run(Statement::Query(Query::select(Select::new(vec![SelectItem::new(Expr::cast(
		Expr::literal(1),
		Domain::double(),
	))]))))
	.unwrap();
	assert_eq!(resolved_select(&checked).list[0].expr.domain, Some(Domain::double()));

	let rejected = run(Statement::Query(Query::select(Select::new(vec![SelectItem::new(Expr::cast(
		Expr::literal(1.5),
		Domain::collection(Type::Set, vec![Domain::integer()]),
	))]))))
	.unwrap_err();
	assert_eq!(rejected.codes(), vec!["CAST_001"]);
}

mod union {
	use super::*;

	fn prices(class: &str) -> Query {
		Query::select(Select::new(vec![SelectItem::new(Expr::column("price"))]).from(FromItem::class(class)))
	}

	#[test]
	fn test_numeric_columns_meet_at_common_domain() {
		for (left, right) in [("left_prices", "right_prices"), ("right_prices", "left_prices")] {
			let checked = run(Statement::Query(Query::union(prices(left), prices(right)))).unwrap();
			let Statement::Query(query) = &checked.statement else {
				unreachable!()
			};
			assert_eq!(query.column_domains(), vec![Domain::numeric(8, 3)]);
			assert_eq!(checked.state, CheckState::CastInserted);
		}
	}

	#[test]
	fn test_arity_mismatch() {
		let rejected = run(Statement::Query(Query::union(Query::select(select_ab()), prices("left_prices")))).unwrap_err();
		assert_eq!(rejected.codes(), vec!["UNION_001"]);
	}

	#[test]
	fn test_same_domains_need_no_cast() {
		let checked = run(Statement::Query(Query::union(Query::select(select_ab()), Query::select(select_ab())))).unwrap();
		assert_eq!(checked.state, CheckState::TypeChecked);
	}
}

mod order_by {
	use super::*;

	#[test]
	fn test_position() {
		let checked = run(Statement::Query(Query::select(select_ab().order_by(vec![SortKey::asc(Expr::literal(2))]))))
			.unwrap();
		assert_eq!(resolved_select(&checked).order_by[0].position, Some(2));
	}

	#[test]
	fn test_position_out_of_range() {
		let rejected = run(Statement::Query(Query::select(select_ab().order_by(vec![SortKey::asc(Expr::literal(3))]))))
			.unwrap_err();
		assert_eq!(rejected.codes(), vec!["ORDER_001"]);
	}

	#[test]
	fn test_selected_name_becomes_position() {
		let checked = run(Statement::Query(Query::select(select_ab().order_by(vec![SortKey::desc(Expr::column("b"))]))))
			.unwrap();
		let select = resolved_select(&checked);
		assert_eq!(select.order_by[0].position, Some(2));
		assert!(matches!(select.order_by[0].expr.kind, ExprKind::Literal(_)));
	}

	#[test]
	fn test_unselected_column_is_appended_hidden() {
		let checked = run(Statement::Query(Query::select(select_ab().order_by(vec![SortKey::asc(Expr::column("c"))]))))
			.unwrap();
		let select = resolved_select(&checked);
		assert_eq!(select.list.len(), 3);
		assert!(select.list[2].hidden);
		assert_eq!(select.visible_len(), 2);
		assert_eq!(select.order_by[0].position, Some(3));
	}
}

mod partition {
	use super::*;

	fn partitioned(spec: PartitionSpec) -> Statement {
		Statement::CreateClass(
			CreateClass::class(
				"p",
				vec![AttributeDefinition::new("a", Domain::integer()), AttributeDefinition::new("b", Domain::integer())],
			)
			.partition(spec),
		)
	}

	fn values(values: &[i32]) -> Vec<Expr> {
		values.iter().map(|v| Expr::literal(*v)).collect()
	}

	#[test]
	fn test_list_duplicate_value() {
		let rejected = run(partitioned(PartitionSpec::list(Expr::column("a"), vec![
			PartitionDefinition::values_in("p1", values(&[1, 2, 3])),
			PartitionDefinition::values_in("p2", values(&[3, 4])),
		])))
		.unwrap_err();
		assert_eq!(rejected.codes(), vec!["PARTITION_004"]);
	}

	#[test]
	fn test_key_over_two_columns() {
		let key = Expr::binary(BinaryOp::Add, Expr::column("a"), Expr::column("b"));
		let rejected = run(partitioned(PartitionSpec::hash(key, 4))).unwrap_err();
		assert!(rejected.has("PARTITION_002"));
		let diagnostic = rejected.diagnostics.iter().find(|d| d.code == "PARTITION_002").unwrap();
		assert_eq!(diagnostic.label.as_deref(), Some("only one partition column"));
	}

	#[test]
	fn test_constant_key() {
		let rejected = run(partitioned(PartitionSpec::hash(Expr::literal(3), 4))).unwrap_err();
		assert!(rejected.has("PARTITION_001"));
	}

	#[test]
	fn test_range() {
		assert!(
			run(partitioned(PartitionSpec::range(Expr::column("a"), vec![
				PartitionDefinition::less_than("low", Expr::literal(10)),
				PartitionDefinition::less_than("high", Expr::max_value()),
			])))
			.is_ok()
		);
	}
}

mod assignability {
	use super::*;

	#[test]
	fn test_collection_elements_must_be_subset() {
		let catalog = catalog();
		let narrow = Domain::collection(Type::Set, vec![Domain::integer()]);
		let wide = Domain::collection(Type::Set, vec![Domain::integer(), Domain::varchar(10)]);
		assert!(is_assignable(&catalog, &wide, &narrow).unwrap());
		assert!(!is_assignable(&catalog, &narrow, &wide).unwrap());
	}

	#[test]
	fn test_duplicate_insert_column() {
		let rejected = run(Statement::Insert(Insert::values("t", &["a", "a"], vec![vec![
			Expr::literal(1),
			Expr::literal(2),
		]])))
		.unwrap_err();
		assert_eq!(rejected.codes(), vec!["DML_005"]);
	}

	#[test]
	fn test_insert_coerces_literals() {
		let checked =
			run(Statement::Insert(Insert::values("left_prices", &["price"], vec![vec![Expr::literal(3)]]))).unwrap();
		let Statement::Insert(insert) = &checked.statement else {
			unreachable!()
		};
		let InsertSource::Values(rows) = &insert.source else {
			unreachable!()
		};
		assert_eq!(rows[0][0].domain, Some(Domain::numeric(5, 2)));
	}
}

#[test]
fn test_unknown_class() {
	let rejected = run(Statement::Query(Query::select(
		Select::new(vec![SelectItem::new(Expr::column("a"))]).from(FromItem::class("ghost")),
	)))
	.unwrap_err();
	assert!(rejected.has("CATALOG_002"));
	assert_eq!(rejected.statement.kind(), "SELECT");
}
