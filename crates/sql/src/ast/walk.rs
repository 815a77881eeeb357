// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::ast::{Expr, ExprKind};

/// Descent control returned by a walk callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walk {
	/// Visit the node's children next
	Continue,
	/// Skip the node's children, continue with its siblings
	SkipChildren,
	/// End the walk
	Stop,
}

impl Expr {
	/// Pre-order walk over the expression tree. Subquery bodies are not
	/// entered. Returns [`Walk::Stop`] when the callback stopped the walk.
	pub fn walk<'a, F>(&'a self, visit: &mut F) -> Walk
	where
		F: FnMut(&'a Expr) -> Walk,
	{
		let mut stack = vec![self];
		while let Some(node) = stack.pop() {
			match visit(node) {
				Walk::Stop => return Walk::Stop,
				Walk::SkipChildren => continue,
				Walk::Continue => {
					// reversed so children are visited left to right
					stack.extend(node.children().into_iter().rev());
				}
			}
		}
		Walk::Continue
	}

	/// First aggregate outside nested subqueries
	pub fn find_aggregate(&self) -> Option<&Expr> {
		let mut found = None;
		self.walk(&mut |node| {
			if node.is_aggregate() {
				found = Some(node);
				Walk::Stop
			} else {
				Walk::Continue
			}
		});
		found
	}

	pub fn contains_aggregate(&self) -> bool {
		self.find_aggregate().is_some()
	}

	pub fn contains_subquery(&self) -> bool {
		let mut found = false;
		self.walk(&mut |node| {
			if matches!(node.kind, ExprKind::Subquery(_)) {
				found = true;
				Walk::Stop
			} else {
				Walk::Continue
			}
		});
		found
	}

	/// Distinct column names referenced outside subqueries, lower-cased, in
	/// order of first appearance
	pub fn column_names(&self) -> Vec<String> {
		let mut names: Vec<String> = vec![];
		self.walk(&mut |node| {
			if let ExprKind::Column(column) = &node.kind {
				let name = column.name.to_ascii_lowercase();
				if !names.contains(&name) {
					names.push(name);
				}
			}
			Walk::Continue
		});
		names
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ast::{AggregateFunction, BinaryOp, Query, Select, SelectItem};

	#[test]
	fn test_pre_order_left_to_right() {
		let expr = Expr::binary(
			BinaryOp::Add,
			Expr::binary(BinaryOp::Mul, Expr::column("a"), Expr::column("b")),
			Expr::column("c"),
		);
		let mut seen = vec![];
		expr.walk(&mut |node| {
			if let ExprKind::Column(c) = &node.kind {
				seen.push(c.name.clone());
			}
			Walk::Continue
		});
		assert_eq!(seen, vec!["a", "b", "c"]);
	}

	#[test]
	fn test_skip_children() {
		let expr = Expr::binary(
			BinaryOp::Add,
			Expr::aggregate(AggregateFunction::Sum, Expr::column("a")),
			Expr::column("b"),
		);
		let mut seen = vec![];
		expr.walk(&mut |node| {
			if node.is_aggregate() {
				return Walk::SkipChildren;
			}
			if let ExprKind::Column(c) = &node.kind {
				seen.push(c.name.clone());
			}
			Walk::Continue
		});
		assert_eq!(seen, vec!["b"]);
	}

	#[test]
	fn test_stop() {
		let expr = Expr::binary(BinaryOp::Add, Expr::column("a"), Expr::column("b"));
		let mut count = 0;
		let result = expr.walk(&mut |node| {
			if node.as_column().is_some() {
				count += 1;
				return Walk::Stop;
			}
			Walk::Continue
		});
		assert_eq!(result, Walk::Stop);
		assert_eq!(count, 1);
	}

	#[test]
	fn test_subquery_is_opaque() {
		let inner = Query::select(Select::new(vec![SelectItem::new(Expr::aggregate(
			AggregateFunction::Max,
			Expr::column("x"),
		))]));
		let expr = Expr::binary(BinaryOp::Eq, Expr::column("a"), Expr::subquery(inner));
		assert!(!expr.contains_aggregate());
		assert!(expr.contains_subquery());
		assert_eq!(expr.column_names(), vec!["a"]);
	}

	#[test]
	fn test_column_names_distinct() {
		let expr = Expr::binary(
			BinaryOp::Add,
			Expr::binary(BinaryOp::Mul, Expr::column("A"), Expr::column("b")),
			Expr::column("a"),
		);
		assert_eq!(expr.column_names(), vec!["a", "b"]);
	}
}
