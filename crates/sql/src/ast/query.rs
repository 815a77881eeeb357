// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use strata_type::{fragment::Fragment, value::Domain};

use crate::{
	ast::{Expr, ExprKind},
	scope::SpecId,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Query {
	Select(Box<Select>),
	Compound(Box<Compound>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Select {
	pub distinct: bool,
	pub list: Vec<SelectItem>,
	pub from: Vec<FromItem>,
	pub filter: Option<Expr>,
	pub group_by: Vec<Expr>,
	pub having: Option<Expr>,
	pub order_by: Vec<SortKey>,
	/// Host variable names of a SELECT ... INTO
	pub into: Vec<String>,
	pub fragment: Fragment,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectItem {
	pub expr: Expr,
	pub alias: Option<String>,
	/// Appended for an ORDER BY key, not part of the result
	pub hidden: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FromItem {
	pub source: FromSource,
	pub alias: Option<String>,
	/// Handle into the checker's spec table, set during name resolution
	pub spec: Option<SpecId>,
	pub fragment: Fragment,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FromSource {
	Class(String),
	Derived(Query),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOperator {
	Union,
	Difference,
	Intersection,
}

impl Display for SetOperator {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(match self {
			SetOperator::Union => "UNION",
			SetOperator::Difference => "DIFFERENCE",
			SetOperator::Intersection => "INTERSECTION",
		})
	}
}

/// UNION, DIFFERENCE or INTERSECTION of two queries
#[derive(Debug, Clone, PartialEq)]
pub struct Compound {
	pub op: SetOperator,
	pub all: bool,
	pub left: Query,
	pub right: Query,
	pub order_by: Vec<SortKey>,
	pub into: Vec<String>,
	/// Result domains per column, filled in by the checker
	pub columns: Vec<Domain>,
	pub fragment: Fragment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
	#[default]
	Asc,
	Desc,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SortKey {
	pub expr: Expr,
	pub direction: SortDirection,
	/// 1-based select list position once resolved
	pub position: Option<usize>,
}

impl SortKey {
	pub fn asc(expr: Expr) -> Self {
		Self {
			expr,
			direction: SortDirection::Asc,
			position: None,
		}
	}

	pub fn desc(expr: Expr) -> Self {
		Self {
			expr,
			direction: SortDirection::Desc,
			position: None,
		}
	}
}

impl SelectItem {
	pub fn new(expr: Expr) -> Self {
		Self {
			expr,
			alias: None,
			hidden: false,
		}
	}

	pub fn aliased(expr: Expr, alias: impl Into<String>) -> Self {
		Self {
			expr,
			alias: Some(alias.into()),
			hidden: false,
		}
	}

	/// Result column name: the alias, the attribute name of a plain column,
	/// or the printed expression
	pub fn name(&self) -> String {
		if let Some(alias) = &self.alias {
			return alias.clone();
		}
		match &self.expr.kind {
			ExprKind::Column(column) => column.name.clone(),
			ExprKind::Cast {
				operand,
				..
			} => match &operand.kind {
				ExprKind::Column(column) => column.name.clone(),
				_ => self.expr.to_string(),
			},
			_ => self.expr.to_string(),
		}
	}
}

impl FromItem {
	pub fn class(name: impl Into<String>) -> Self {
		Self {
			source: FromSource::Class(name.into()),
			alias: None,
			spec: None,
			fragment: Fragment::None,
		}
	}

	pub fn derived(query: Query, alias: impl Into<String>) -> Self {
		Self {
			source: FromSource::Derived(query),
			alias: Some(alias.into()),
			spec: None,
			fragment: Fragment::None,
		}
	}

	pub fn alias(mut self, alias: impl Into<String>) -> Self {
		self.alias = Some(alias.into());
		self
	}

	/// Name the item is referenced by in the statement
	pub fn exposed_name(&self) -> Option<&str> {
		match (&self.alias, &self.source) {
			(Some(alias), _) => Some(alias),
			(None, FromSource::Class(name)) => Some(name),
			(None, FromSource::Derived(_)) => None,
		}
	}

	pub fn is_derived(&self) -> bool {
		matches!(self.source, FromSource::Derived(_))
	}
}

impl Select {
	pub fn new(list: Vec<SelectItem>) -> Self {
		Self {
			distinct: false,
			list,
			from: vec![],
			filter: None,
			group_by: vec![],
			having: None,
			order_by: vec![],
			into: vec![],
			fragment: Fragment::None,
		}
	}

	pub fn from(mut self, item: FromItem) -> Self {
		self.from.push(item);
		self
	}

	pub fn filter(mut self, filter: Expr) -> Self {
		self.filter = Some(filter);
		self
	}

	pub fn group_by(mut self, exprs: Vec<Expr>) -> Self {
		self.group_by = exprs;
		self
	}

	pub fn having(mut self, having: Expr) -> Self {
		self.having = Some(having);
		self
	}

	pub fn order_by(mut self, keys: Vec<SortKey>) -> Self {
		self.order_by = keys;
		self
	}

	pub fn distinct(mut self) -> Self {
		self.distinct = true;
		self
	}

	pub fn into_vars(mut self, vars: &[&str]) -> Self {
		self.into = vars.iter().map(|v| v.to_string()).collect();
		self
	}

	/// Select list without hidden ORDER BY columns
	pub fn visible(&self) -> impl Iterator<Item = &SelectItem> {
		self.list.iter().filter(|item| !item.hidden)
	}

	pub fn visible_len(&self) -> usize {
		self.visible().count()
	}

	pub fn is_aggregate(&self) -> bool {
		!self.group_by.is_empty()
			|| self.list.iter().any(|item| item.expr.contains_aggregate())
			|| self.having.as_ref().is_some_and(|h| h.contains_aggregate())
	}
}

impl Compound {
	pub fn new(op: SetOperator, left: Query, right: Query) -> Self {
		Self {
			op,
			all: false,
			left,
			right,
			order_by: vec![],
			into: vec![],
			columns: vec![],
			fragment: Fragment::None,
		}
	}
}

impl Query {
	pub fn select(select: Select) -> Self {
		Query::Select(Box::new(select))
	}

	pub fn union(left: Query, right: Query) -> Self {
		Query::Compound(Box::new(Compound::new(SetOperator::Union, left, right)))
	}

	pub fn compound(op: SetOperator, left: Query, right: Query) -> Self {
		Query::Compound(Box::new(Compound::new(op, left, right)))
	}

	/// Leftmost SELECT, whose list names the columns of the query
	pub fn leftmost(&self) -> &Select {
		match self {
			Query::Select(select) => select,
			Query::Compound(compound) => compound.left.leftmost(),
		}
	}

	pub fn leftmost_mut(&mut self) -> &mut Select {
		match self {
			Query::Select(select) => select,
			Query::Compound(compound) => compound.left.leftmost_mut(),
		}
	}

	pub fn column_count(&self) -> usize {
		self.leftmost().visible_len()
	}

	/// Result column names in order
	pub fn column_names(&self) -> Vec<String> {
		self.leftmost().visible().map(SelectItem::name).collect()
	}

	/// Resolved result domains in order
	pub fn column_domains(&self) -> Vec<Domain> {
		match self {
			Query::Select(select) => select.visible().map(|item| item.expr.resolved_domain()).collect(),
			Query::Compound(compound) if !compound.columns.is_empty() => compound.columns.clone(),
			Query::Compound(compound) => compound.left.column_domains(),
		}
	}

	pub fn order_by(&self) -> &[SortKey] {
		match self {
			Query::Select(select) => &select.order_by,
			Query::Compound(compound) => &compound.order_by,
		}
	}

	pub fn into_vars(&self) -> &[String] {
		match self {
			Query::Select(select) => &select.into,
			Query::Compound(compound) => &compound.into,
		}
	}

	pub fn is_compound(&self) -> bool {
		matches!(self, Query::Compound(_))
	}
}

#[cfg(test)]
mod tests {
	use strata_type::value::Type;

	use super::*;

	fn select(columns: &[&str]) -> Query {
		Query::select(
			Select::new(columns.iter().map(|c| SelectItem::new(Expr::column(*c))).collect())
				.from(FromItem::class("t")),
		)
	}

	#[test]
	fn test_leftmost_names_columns() {
		let query = Query::union(
			Query::union(select(&["a", "b"]), select(&["c", "d"])),
			select(&["e", "f"]),
		);
		assert_eq!(query.column_names(), vec!["a", "b"]);
		assert_eq!(query.column_count(), 2);
	}

	#[test]
	fn test_hidden_columns_are_not_visible() {
		let mut select = Select::new(vec![SelectItem::new(Expr::column("a"))]);
		select.list.push(SelectItem {
			expr: Expr::column("b"),
			alias: None,
			hidden: true,
		});
		assert_eq!(select.visible_len(), 1);
	}

	#[test]
	fn test_item_name() {
		assert_eq!(SelectItem::aliased(Expr::column("a"), "x").name(), "x");
		assert_eq!(SelectItem::new(Expr::cast(Expr::column("a"), Domain::integer())).name(), "a");
		assert_eq!(SelectItem::new(Expr::literal(1)).name(), "1");
	}

	#[test]
	fn test_compound_domains_prefer_resolved_columns() {
		let mut query = Query::union(select(&["a"]), select(&["b"]));
		if let Query::Compound(compound) = &mut query {
			compound.columns = vec![Domain::new(Type::Double)];
		}
		assert_eq!(query.column_domains(), vec![Domain::new(Type::Double)]);
	}
}
