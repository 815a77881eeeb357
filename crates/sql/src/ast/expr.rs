// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use strata_type::{
	fragment::Fragment,
	value::{Domain, Type, Value},
};

use crate::{ast::Query, scope::SpecId};

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
	pub kind: ExprKind,
	/// Resolved domain, filled in by the checker
	pub domain: Option<Domain>,
	pub fragment: Fragment,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
	Literal(Value),
	/// `?` placeholder, bound at execution time
	HostVariable(u32),
	/// The DEFAULT keyword of an INSERT or UPDATE
	Default,
	/// MAXVALUE of a range partition, also the open upper bound of a
	/// synthesized range scan
	MaxValue,
	Column(ColumnRef),
	/// `*` or `t.*`
	Star(Option<String>),
	Unary {
		op: UnaryOp,
		operand: Box<Expr>,
	},
	Binary {
		op: BinaryOp,
		left: Box<Expr>,
		right: Box<Expr>,
	},
	Between {
		operand: Box<Expr>,
		low: Box<Expr>,
		high: Box<Expr>,
		negated: bool,
	},
	IsNull {
		operand: Box<Expr>,
		negated: bool,
	},
	Cast {
		operand: Box<Expr>,
		target: Domain,
	},
	Aggregate {
		function: AggregateFunction,
		distinct: bool,
		/// `None` for COUNT(*)
		argument: Option<Box<Expr>>,
	},
	Collection {
		kind: CollectionKind,
		items: Vec<Expr>,
	},
	Subquery(Box<Query>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRef {
	pub qualifier: Option<String>,
	pub name: String,
	pub binding: Option<Binding>,
}

/// What a name resolved to. The spec handle indexes the checker's
/// [`SpecTable`](crate::scope::SpecTable).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
	Attribute {
		spec: SpecId,
		attribute: String,
	},
	/// The object itself, e.g. `t` in `SELECT t FROM t`
	Object {
		spec: SpecId,
	},
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
	Neg,
	Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
	Add,
	Sub,
	Mul,
	Div,
	Mod,
	Concat,
	Eq,
	Ne,
	Lt,
	Le,
	Gt,
	Ge,
	And,
	Or,
}

impl BinaryOp {
	pub fn is_arithmetic(&self) -> bool {
		matches!(self, BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod)
	}

	pub fn is_comparison(&self) -> bool {
		matches!(self, BinaryOp::Eq | BinaryOp::Ne | BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge)
	}

	pub fn is_logical(&self) -> bool {
		matches!(self, BinaryOp::And | BinaryOp::Or)
	}
}

impl Display for BinaryOp {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let symbol = match self {
			BinaryOp::Add => "+",
			BinaryOp::Sub => "-",
			BinaryOp::Mul => "*",
			BinaryOp::Div => "/",
			BinaryOp::Mod => "%",
			BinaryOp::Concat => "||",
			BinaryOp::Eq => "=",
			BinaryOp::Ne => "<>",
			BinaryOp::Lt => "<",
			BinaryOp::Le => "<=",
			BinaryOp::Gt => ">",
			BinaryOp::Ge => ">=",
			BinaryOp::And => "AND",
			BinaryOp::Or => "OR",
		};
		f.write_str(symbol)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateFunction {
	Count,
	Sum,
	Avg,
	Min,
	Max,
}

impl Display for AggregateFunction {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(match self {
			AggregateFunction::Count => "COUNT",
			AggregateFunction::Sum => "SUM",
			AggregateFunction::Avg => "AVG",
			AggregateFunction::Min => "MIN",
			AggregateFunction::Max => "MAX",
		})
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
	Set,
	Multiset,
	Sequence,
}

impl CollectionKind {
	pub fn ty(&self) -> Type {
		match self {
			CollectionKind::Set => Type::Set,
			CollectionKind::Multiset => Type::Multiset,
			CollectionKind::Sequence => Type::Sequence,
		}
	}
}

impl Expr {
	pub fn new(kind: ExprKind) -> Self {
		Self {
			kind,
			domain: None,
			fragment: Fragment::None,
		}
	}

	pub fn literal(value: impl Into<Value>) -> Self {
		Self::new(ExprKind::Literal(value.into()))
	}

	pub fn null() -> Self {
		Self::new(ExprKind::Literal(Value::Null))
	}

	pub fn column(name: impl Into<String>) -> Self {
		Self::new(ExprKind::Column(ColumnRef {
			qualifier: None,
			name: name.into(),
			binding: None,
		}))
	}

	pub fn qualified(qualifier: impl Into<String>, name: impl Into<String>) -> Self {
		Self::new(ExprKind::Column(ColumnRef {
			qualifier: Some(qualifier.into()),
			name: name.into(),
			binding: None,
		}))
	}

	pub fn host_variable(index: u32) -> Self {
		Self::new(ExprKind::HostVariable(index))
	}

	pub fn star() -> Self {
		Self::new(ExprKind::Star(None))
	}

	pub fn max_value() -> Self {
		Self::new(ExprKind::MaxValue)
	}

	pub fn unary(op: UnaryOp, operand: Expr) -> Self {
		Self::new(ExprKind::Unary {
			op,
			operand: Box::new(operand),
		})
	}

	pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
		Self::new(ExprKind::Binary {
			op,
			left: Box::new(left),
			right: Box::new(right),
		})
	}

	pub fn between(operand: Expr, low: Expr, high: Expr) -> Self {
		Self::new(ExprKind::Between {
			operand: Box::new(operand),
			low: Box::new(low),
			high: Box::new(high),
			negated: false,
		})
	}

	pub fn is_null(operand: Expr) -> Self {
		Self::new(ExprKind::IsNull {
			operand: Box::new(operand),
			negated: false,
		})
	}

	pub fn cast(operand: Expr, target: Domain) -> Self {
		Self::new(ExprKind::Cast {
			operand: Box::new(operand),
			target,
		})
	}

	pub fn aggregate(function: AggregateFunction, argument: Expr) -> Self {
		Self::new(ExprKind::Aggregate {
			function,
			distinct: false,
			argument: Some(Box::new(argument)),
		})
	}

	pub fn count_star() -> Self {
		Self::new(ExprKind::Aggregate {
			function: AggregateFunction::Count,
			distinct: false,
			argument: None,
		})
	}

	pub fn collection(kind: CollectionKind, items: Vec<Expr>) -> Self {
		Self::new(ExprKind::Collection {
			kind,
			items,
		})
	}

	pub fn subquery(query: Query) -> Self {
		Self::new(ExprKind::Subquery(Box::new(query)))
	}

	pub fn with_fragment(mut self, fragment: Fragment) -> Self {
		self.fragment = fragment;
		self
	}

	/// Fragment for diagnostics, the printed expression when the parser
	/// recorded none
	pub fn fragment(&self) -> Fragment {
		if self.fragment.is_none() {
			Fragment::internal(self.to_string())
		} else {
			self.fragment.clone()
		}
	}

	/// Resolved domain, MAYBE before the checker visited the node
	pub fn resolved_domain(&self) -> Domain {
		self.domain.clone().unwrap_or_else(|| Domain::new(Type::Maybe))
	}

	pub fn as_literal(&self) -> Option<&Value> {
		match &self.kind {
			ExprKind::Literal(value) => Some(value),
			_ => None,
		}
	}

	pub fn as_column(&self) -> Option<&ColumnRef> {
		match &self.kind {
			ExprKind::Column(column) => Some(column),
			_ => None,
		}
	}

	pub fn is_aggregate(&self) -> bool {
		matches!(self.kind, ExprKind::Aggregate { .. })
	}

	/// Expression children in evaluation order. Subqueries are opaque.
	pub fn children(&self) -> Vec<&Expr> {
		match &self.kind {
			ExprKind::Literal(_)
			| ExprKind::HostVariable(_)
			| ExprKind::Default
			| ExprKind::MaxValue
			| ExprKind::Column(_)
			| ExprKind::Star(_)
			| ExprKind::Subquery(_) => vec![],
			ExprKind::Unary {
				operand,
				..
			}
			| ExprKind::IsNull {
				operand,
				..
			}
			| ExprKind::Cast {
				operand,
				..
			} => vec![operand],
			ExprKind::Binary {
				left,
				right,
				..
			} => vec![left, right],
			ExprKind::Between {
				operand,
				low,
				high,
				..
			} => vec![operand, low, high],
			ExprKind::Aggregate {
				argument,
				..
			} => argument.iter().map(|a| a.as_ref()).collect(),
			ExprKind::Collection {
				items,
				..
			} => items.iter().collect(),
		}
	}

	pub fn children_mut(&mut self) -> Vec<&mut Expr> {
		match &mut self.kind {
			ExprKind::Literal(_)
			| ExprKind::HostVariable(_)
			| ExprKind::Default
			| ExprKind::MaxValue
			| ExprKind::Column(_)
			| ExprKind::Star(_)
			| ExprKind::Subquery(_) => vec![],
			ExprKind::Unary {
				operand,
				..
			}
			| ExprKind::IsNull {
				operand,
				..
			}
			| ExprKind::Cast {
				operand,
				..
			} => vec![operand],
			ExprKind::Binary {
				left,
				right,
				..
			} => vec![left, right],
			ExprKind::Between {
				operand,
				low,
				high,
				..
			} => vec![operand, low, high],
			ExprKind::Aggregate {
				argument,
				..
			} => argument.iter_mut().map(|a| a.as_mut()).collect(),
			ExprKind::Collection {
				items,
				..
			} => items.iter_mut().collect(),
		}
	}

	/// Structural equality ignoring resolved domains and fragments. Columns
	/// bound to the same attribute are equal however they were qualified.
	pub fn equivalent(&self, other: &Expr) -> bool {
		match (&self.kind, &other.kind) {
			(ExprKind::Column(a), ExprKind::Column(b)) => match (&a.binding, &b.binding) {
				(Some(x), Some(y)) => match (x, y) {
					(
						Binding::Attribute {
							spec: s1,
							attribute: a1,
						},
						Binding::Attribute {
							spec: s2,
							attribute: a2,
						},
					) => s1 == s2 && a1.eq_ignore_ascii_case(a2),
					(
						Binding::Object {
							spec: s1,
						},
						Binding::Object {
							spec: s2,
						},
					) => s1 == s2,
					_ => false,
				},
				_ => {
					a.name.eq_ignore_ascii_case(&b.name)
						&& match (&a.qualifier, &b.qualifier) {
							(Some(q1), Some(q2)) => q1.eq_ignore_ascii_case(q2),
							_ => true,
						}
				}
			},
			(ExprKind::Literal(a), ExprKind::Literal(b)) => a == b,
			(ExprKind::HostVariable(a), ExprKind::HostVariable(b)) => a == b,
			(ExprKind::Subquery(a), ExprKind::Subquery(b)) => a == b,
			(ExprKind::Star(a), ExprKind::Star(b)) => a == b,
			(
				ExprKind::Unary {
					op: o1,
					..
				},
				ExprKind::Unary {
					op: o2,
					..
				},
			) if o1 == o2 => self.children_equivalent(other),
			(
				ExprKind::Binary {
					op: o1,
					..
				},
				ExprKind::Binary {
					op: o2,
					..
				},
			) if o1 == o2 => self.children_equivalent(other),
			(
				ExprKind::Between {
					negated: n1,
					..
				},
				ExprKind::Between {
					negated: n2,
					..
				},
			)
			| (
				ExprKind::IsNull {
					negated: n1,
					..
				},
				ExprKind::IsNull {
					negated: n2,
					..
				},
			) if n1 == n2 => self.children_equivalent(other),
			(
				ExprKind::Cast {
					target: t1,
					..
				},
				ExprKind::Cast {
					target: t2,
					..
				},
			) if t1 == t2 => self.children_equivalent(other),
			(
				ExprKind::Aggregate {
					function: f1,
					distinct: d1,
					..
				},
				ExprKind::Aggregate {
					function: f2,
					distinct: d2,
					..
				},
			) if f1 == f2 && d1 == d2 => self.children_equivalent(other),
			(
				ExprKind::Collection {
					kind: k1,
					..
				},
				ExprKind::Collection {
					kind: k2,
					..
				},
			) if k1 == k2 => self.children_equivalent(other),
			(ExprKind::Default, ExprKind::Default) | (ExprKind::MaxValue, ExprKind::MaxValue) => true,
			_ => false,
		}
	}

	fn children_equivalent(&self, other: &Expr) -> bool {
		let (a, b) = (self.children(), other.children());
		a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.equivalent(y))
	}
}

impl From<Value> for Expr {
	fn from(value: Value) -> Self {
		Expr::literal(value)
	}
}

impl Display for Expr {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match &self.kind {
			ExprKind::Literal(value) => write!(f, "{}", value),
			ExprKind::HostVariable(_) => f.write_str("?"),
			ExprKind::Default => f.write_str("DEFAULT"),
			ExprKind::MaxValue => f.write_str("MAXVALUE"),
			ExprKind::Column(column) => match &column.qualifier {
				Some(qualifier) => write!(f, "{}.{}", qualifier, column.name),
				None => f.write_str(&column.name),
			},
			ExprKind::Star(Some(qualifier)) => write!(f, "{}.*", qualifier),
			ExprKind::Star(None) => f.write_str("*"),
			ExprKind::Unary {
				op: UnaryOp::Neg,
				operand,
			} => write!(f, "-{}", operand),
			ExprKind::Unary {
				op: UnaryOp::Not,
				operand,
			} => write!(f, "NOT {}", operand),
			ExprKind::Binary {
				op,
				left,
				right,
			} => write!(f, "{} {} {}", left, op, right),
			ExprKind::Between {
				operand,
				low,
				high,
				negated,
			} => {
				let not = if *negated { "NOT " } else { "" };
				write!(f, "{} {}BETWEEN {} AND {}", operand, not, low, high)
			}
			ExprKind::IsNull {
				operand,
				negated,
			} => {
				let not = if *negated { "NOT " } else { "" };
				write!(f, "{} IS {}NULL", operand, not)
			}
			ExprKind::Cast {
				operand,
				target,
			} => write!(f, "CAST({} AS {})", operand, target),
			ExprKind::Aggregate {
				function,
				distinct,
				argument,
			} => {
				let distinct = if *distinct { "DISTINCT " } else { "" };
				match argument {
					Some(argument) => write!(f, "{}({}{})", function, distinct, argument),
					None => write!(f, "{}(*)", function),
				}
			}
			ExprKind::Collection {
				kind,
				items,
			} => {
				let items: Vec<String> = items.iter().map(|i| i.to_string()).collect();
				match kind {
					CollectionKind::Set => write!(f, "{{{}}}", items.join(", ")),
					CollectionKind::Multiset => write!(f, "MULTISET{{{}}}", items.join(", ")),
					CollectionKind::Sequence => write!(f, "SEQUENCE{{{}}}", items.join(", ")),
				}
			}
			ExprKind::Subquery(_) => f.write_str("(subquery)"),
		}
	}
}
