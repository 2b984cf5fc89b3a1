//! The four binary operations a calculator key can select

use serde::{Deserialize, Serialize};

use crate::core::{CalcError, CalcResult};

/// Binary operation selected by an operator key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (*)
    Multiply,
    /// Division (/)
    Divide,
}

impl Operation {
    /// All operations, in keypad order (top to bottom)
    pub const ALL: [Self; 4] = [Self::Divide, Self::Multiply, Self::Subtract, Self::Add];

    /// Returns the operator symbol for display
    #[must_use]
    pub const fn symbol(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    /// Maps an operator character back to its operation
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            _ => None,
        }
    }

    /// Applies the operation to `(left, right)`
    ///
    /// Only a division by exactly zero fails. Overflow is left to IEEE 754
    /// and surfaces as `inf`.
    pub fn apply(self, left: f64, right: f64) -> CalcResult<f64> {
        match self {
            Self::Add => Ok(left + right),
            Self::Subtract => Ok(left - right),
            Self::Multiply => Ok(left * right),
            Self::Divide => {
                if right == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                Ok(left / right)
            }
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // --- Operation enum tests ---

    #[test]
    fn test_operation_symbols() {
        assert_eq!(Operation::Add.symbol(), '+');
        assert_eq!(Operation::Subtract.symbol(), '-');
        assert_eq!(Operation::Multiply.symbol(), '*');
        assert_eq!(Operation::Divide.symbol(), '/');
    }

    #[test]
    fn test_operation_from_symbol() {
        for op in Operation::ALL {
            assert_eq!(Operation::from_symbol(op.symbol()), Some(op));
        }
        assert_eq!(Operation::from_symbol('^'), None);
        assert_eq!(Operation::from_symbol('%'), None);
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Multiply.to_string(), "*");
    }

    #[test]
    fn test_operation_serde_lowercase() {
        let json = serde_json::to_string(&Operation::Divide).unwrap();
        assert_eq!(json, "\"divide\"");
        let back: Operation = serde_json::from_str("\"add\"").unwrap();
        assert_eq!(back, Operation::Add);
    }

    // --- apply tests ---

    #[test]
    fn test_add() {
        assert_eq!(Operation::Add.apply(2.0, 3.0), Ok(5.0));
        assert_eq!(Operation::Add.apply(-2.0, 5.0), Ok(3.0));
    }

    #[test]
    fn test_subtract() {
        assert_eq!(Operation::Subtract.apply(5.0, 3.0), Ok(2.0));
        assert_eq!(Operation::Subtract.apply(3.0, 5.0), Ok(-2.0));
    }

    #[test]
    fn test_multiply() {
        assert_eq!(Operation::Multiply.apply(-2.0, 3.0), Ok(-6.0));
        assert_eq!(Operation::Multiply.apply(5.0, 0.0), Ok(0.0));
    }

    #[test]
    fn test_divide() {
        assert_eq!(Operation::Divide.apply(6.0, 2.0), Ok(3.0));
        assert_eq!(Operation::Divide.apply(0.0, 5.0), Ok(0.0));
    }

    #[test]
    fn test_divide_by_zero() {
        assert_eq!(
            Operation::Divide.apply(10.0, 0.0),
            Err(CalcError::DivisionByZero)
        );
        assert_eq!(
            Operation::Divide.apply(10.0, -0.0),
            Err(CalcError::DivisionByZero)
        );
    }

    #[test]
    fn test_multiply_overflow_is_infinite() {
        let result = Operation::Multiply.apply(1e308, 10.0).unwrap();
        assert!(result.is_infinite());
    }

    proptest! {
        #[test]
        fn prop_add_commutative(a in -1e10f64..1e10f64, b in -1e10f64..1e10f64) {
            prop_assert_eq!(Operation::Add.apply(a, b), Operation::Add.apply(b, a));
        }

        #[test]
        fn prop_multiply_identity(a in -1e10f64..1e10f64) {
            prop_assert_eq!(Operation::Multiply.apply(a, 1.0), Ok(a));
        }

        #[test]
        fn prop_divide_by_self(a in -1e10f64..1e10f64) {
            prop_assume!(a != 0.0);
            let result = Operation::Divide.apply(a, a).unwrap();
            prop_assert!((result - 1.0).abs() < 1e-12);
        }
    }
}
