// Expression Evaluation
//
// Scalar expressions evaluated against one tuple and the schema it was
// produced under. Constant-only expressions evaluate without a tuple,
// which is how constant row sources fold their literals.

use std::fmt;

use crate::catalog::schema::Schema;
use crate::query::executor::result::{DataValue, QueryError, QueryResult};
use crate::query::executor::tuple::Tuple;

/// Binary operators usable inside expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    // Comparison
    Equals,
    NotEquals,
    LessThan,
    GreaterThan,
    LessEquals,
    GreaterEquals,
    // Logical
    And,
    Or,
    // Arithmetic
    Plus,
    Minus,
    Multiply,
    Divide,
}

impl BinaryOperator {
    fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Equals => "=",
            BinaryOperator::NotEquals => "<>",
            BinaryOperator::LessThan => "<",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::LessEquals => "<=",
            BinaryOperator::GreaterEquals => ">=",
            BinaryOperator::And => "AND",
            BinaryOperator::Or => "OR",
            BinaryOperator::Plus => "+",
            BinaryOperator::Minus => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A scalar expression over one input tuple.
///
/// Column references resolve by position against the schema of the input
/// tuple, which is always the producing child operator's output schema.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// A constant value
    Literal(DataValue),
    /// A column of the input tuple, by schema position
    Column(usize),
    /// A binary operation over two sub-expressions
    BinaryOp {
        left: Box<Expression>,
        op: BinaryOperator,
        right: Box<Expression>,
    },
}

impl Expression {
    /// Shorthand for an integer literal
    pub fn integer(i: i64) -> Self {
        Expression::Literal(DataValue::Integer(i))
    }

    /// Shorthand for a text literal
    pub fn text(s: &str) -> Self {
        Expression::Literal(DataValue::Text(s.to_string()))
    }

    /// Shorthand for a column reference
    pub fn column(index: usize) -> Self {
        Expression::Column(index)
    }

    /// Shorthand for a comparison/arithmetic node
    pub fn binary(left: Expression, op: BinaryOperator, right: Expression) -> Self {
        Expression::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Evaluate this expression against `tuple`, typed under `schema`.
    ///
    /// `tuple` may be None for constant-only expressions; a column
    /// reference without an input tuple is an execution error.
    pub fn evaluate(&self, tuple: Option<&Tuple>, schema: &Schema) -> QueryResult<DataValue> {
        match self {
            Expression::Literal(value) => Ok(value.clone()),
            Expression::Column(index) => {
                let tuple = tuple.ok_or_else(|| {
                    QueryError::ExecutionError(format!(
                        "Column reference col{} requires an input tuple",
                        index
                    ))
                })?;
                if *index >= tuple.values().len() {
                    return Err(QueryError::ColumnNotFound(format!(
                        "col{} (schema {} has {} columns)",
                        index,
                        schema,
                        schema.column_count()
                    )));
                }
                Ok(tuple.value(*index).clone())
            }
            Expression::BinaryOp { left, op, right } => {
                let left_val = left.evaluate(tuple, schema)?;
                let right_val = right.evaluate(tuple, schema)?;

                // NULL propagation: any NULL operand yields NULL
                if left_val.is_null() || right_val.is_null() {
                    return Ok(DataValue::Null);
                }

                match op {
                    BinaryOperator::Equals => Ok(DataValue::Boolean(left_val == right_val)),
                    BinaryOperator::NotEquals => Ok(DataValue::Boolean(left_val != right_val)),
                    BinaryOperator::LessThan => {
                        compare_to_bool(&left_val, &right_val, |ord| ord.is_lt())
                    }
                    BinaryOperator::GreaterThan => {
                        compare_to_bool(&left_val, &right_val, |ord| ord.is_gt())
                    }
                    BinaryOperator::LessEquals => {
                        compare_to_bool(&left_val, &right_val, |ord| ord.is_le())
                    }
                    BinaryOperator::GreaterEquals => {
                        compare_to_bool(&left_val, &right_val, |ord| ord.is_ge())
                    }
                    BinaryOperator::And => logical(&left_val, &right_val, |l, r| l && r),
                    BinaryOperator::Or => logical(&left_val, &right_val, |l, r| l || r),
                    BinaryOperator::Plus => arithmetic(
                        &left_val,
                        &right_val,
                        i64::checked_add,
                        |l, r| l + r,
                        "+",
                    ),
                    BinaryOperator::Minus => arithmetic(
                        &left_val,
                        &right_val,
                        i64::checked_sub,
                        |l, r| l - r,
                        "-",
                    ),
                    BinaryOperator::Multiply => arithmetic(
                        &left_val,
                        &right_val,
                        i64::checked_mul,
                        |l, r| l * r,
                        "*",
                    ),
                    BinaryOperator::Divide => divide(&left_val, &right_val),
                }
            }
        }
    }
}

fn compare_to_bool(
    left: &DataValue,
    right: &DataValue,
    accept: impl Fn(std::cmp::Ordering) -> bool,
) -> QueryResult<DataValue> {
    // NULL operands were already propagated, so compare never sees one
    let ord = left.compare(right)?;
    Ok(DataValue::Boolean(accept(ord)))
}

fn logical(
    left: &DataValue,
    right: &DataValue,
    combine: impl Fn(bool, bool) -> bool,
) -> QueryResult<DataValue> {
    match (left.as_bool(), right.as_bool()) {
        (Some(l), Some(r)) => Ok(DataValue::Boolean(combine(l, r))),
        _ => Err(QueryError::TypeError(
            "Logical operators require boolean operands".to_string(),
        )),
    }
}

fn arithmetic(
    left: &DataValue,
    right: &DataValue,
    int_op: impl Fn(i64, i64) -> Option<i64>,
    float_op: impl Fn(f64, f64) -> f64,
    symbol: &str,
) -> QueryResult<DataValue> {
    match (left, right) {
        (DataValue::Integer(l), DataValue::Integer(r)) => Ok(DataValue::Integer(
            int_op(*l, *r).ok_or(QueryError::NumericOverflow)?,
        )),
        (DataValue::Float(l), DataValue::Float(r)) => Ok(DataValue::Float(float_op(*l, *r))),
        (DataValue::Integer(l), DataValue::Float(r)) => Ok(DataValue::Float(float_op(*l as f64, *r))),
        (DataValue::Float(l), DataValue::Integer(r)) => Ok(DataValue::Float(float_op(*l, *r as f64))),
        _ => Err(QueryError::TypeError(format!(
            "Unsupported types for {} operator",
            symbol
        ))),
    }
}

fn divide(left: &DataValue, right: &DataValue) -> QueryResult<DataValue> {
    match (left, right) {
        (DataValue::Integer(_), DataValue::Integer(0)) => Err(QueryError::DivisionByZero),
        (DataValue::Integer(l), DataValue::Integer(r)) => Ok(DataValue::Integer(
            l.checked_div(*r).ok_or(QueryError::NumericOverflow)?,
        )),
        (DataValue::Float(l), DataValue::Float(r)) => Ok(DataValue::Float(l / r)),
        (DataValue::Integer(l), DataValue::Float(r)) => Ok(DataValue::Float(*l as f64 / r)),
        (DataValue::Float(l), DataValue::Integer(r)) => Ok(DataValue::Float(l / *r as f64)),
        _ => Err(QueryError::TypeError(
            "Unsupported types for / operator".to_string(),
        )),
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(value) => write!(f, "{}", value),
            Expression::Column(index) => write!(f, "col{}", index),
            Expression::BinaryOp { left, op, right } => {
                write!(f, "({} {} {})", left, op, right)
            }
        }
    }
}
