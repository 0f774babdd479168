//! Comparison operators.
//!
//! [`Operator`] is the flat set named on the wire (`-beginning`,
//! `-greaterThan`, ...). Each value type accepts a subset, captured by a
//! narrowed enum per type. Converting an [`Operator`] into a narrowed enum is
//! the type gate: it fails for operators foreign to that value type.

use super::value::ValueKind;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Equals,
    Beginning,
    Search,
    GreaterThan,
    LessThan,
    Before,
    After,
}

impl Operator {
    pub const ALL: [Operator; 7] = [
        Operator::Equals,
        Operator::Beginning,
        Operator::Search,
        Operator::GreaterThan,
        Operator::LessThan,
        Operator::Before,
        Operator::After,
    ];

    /// Name used as a query parameter suffix.
    pub const fn name(self) -> &'static str {
        match self {
            Operator::Equals => "equals",
            Operator::Beginning => "beginning",
            Operator::Search => "search",
            Operator::GreaterThan => "greaterThan",
            Operator::LessThan => "lessThan",
            Operator::Before => "before",
            Operator::After => "after",
        }
    }

    pub fn from_name(name: &str) -> Option<Operator> {
        Operator::ALL.into_iter().find(|op| op.name() == name)
    }

    /// Whether an attribute of `kind` accepts this operator.
    pub fn applies_to(self, kind: ValueKind) -> bool {
        match kind {
            ValueKind::String => StringOperator::try_from(self).is_ok(),
            ValueKind::Integer | ValueKind::Id => IntegerOperator::try_from(self).is_ok(),
            ValueKind::DateTime => DateTimeOperator::try_from(self).is_ok(),
            ValueKind::Boolean => BooleanOperator::try_from(self).is_ok(),
            ValueKind::Enum(_) => EnumOperator::try_from(self).is_ok(),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Declares a narrowed operator enum with conversions to and from [`Operator`].
macro_rules! narrowed_operator {
    ($(#[$meta:meta])* $name:ident { $($variant:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl TryFrom<Operator> for $name {
            type Error = Operator;

            fn try_from(op: Operator) -> std::result::Result<Self, Operator> {
                match op {
                    $(Operator::$variant => Ok($name::$variant),)+
                    #[allow(unreachable_patterns)]
                    other => Err(other),
                }
            }
        }

        impl From<$name> for Operator {
            fn from(op: $name) -> Operator {
                match op {
                    $($name::$variant => Operator::$variant),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&Operator::from(*self), f)
            }
        }
    };
}

narrowed_operator!(
    /// Operators over strings. `Search` is a case-insensitive substring match.
    StringOperator { Equals, Beginning, Search }
);

narrowed_operator!(
    /// Operators over integers and ids.
    IntegerOperator { Equals, GreaterThan, LessThan }
);

narrowed_operator!(
    DateTimeOperator { Equals, Before, After }
);

narrowed_operator!(BooleanOperator { Equals });

narrowed_operator!(EnumOperator { Equals });
