//! Random arithmetic problems
//!
//! Every equation has a non-negative integer answer. Division is built from
//! its quotient so it always divides exactly.

use std::fmt;

use rand::Rng;

/// Arithmetic operation kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
    ];

    /// Symbol shown between the operands
    pub fn symbol(&self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Subtract => "-",
            Operation::Multiply => "×",
            Operation::Divide => "÷",
        }
    }
}

/// A generated problem (immutable once created)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equation {
    pub op: Operation,
    /// Left operand as displayed (the dividend for division)
    pub lhs: i32,
    /// Right operand as displayed (the divisor for division)
    pub rhs: i32,
    pub answer: i32,
    pub text: String,
}

impl Equation {
    fn new(op: Operation, lhs: i32, rhs: i32, answer: i32) -> Self {
        Self {
            op,
            lhs,
            rhs,
            answer,
            text: format!("{} {} {}", lhs, op.symbol(), rhs),
        }
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Generate a random equation. Operation kind and operands are uniform.
pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Equation {
    let op = Operation::ALL[rng.random_range(0..Operation::ALL.len())];

    match op {
        Operation::Add => {
            let a = rng.random_range(0..=50);
            let b = rng.random_range(0..=50);
            Equation::new(op, a, b, a + b)
        }
        Operation::Subtract => {
            let mut a = rng.random_range(0..=50);
            let mut b = rng.random_range(0..=50);
            // Keep the result non-negative
            if a < b {
                std::mem::swap(&mut a, &mut b);
            }
            Equation::new(op, a, b, a - b)
        }
        Operation::Multiply => {
            let a = rng.random_range(1..=12);
            let b = rng.random_range(1..=12);
            Equation::new(op, a, b, a * b)
        }
        Operation::Divide => {
            let divisor = rng.random_range(1..=12);
            let quotient = rng.random_range(1..=12);
            Equation::new(op, divisor * quotient, divisor, quotient)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn sample(seed: u64, n: usize) -> Vec<Equation> {
        let mut rng = Pcg32::seed_from_u64(seed);
        (0..n).map(|_| generate(&mut rng)).collect()
    }

    #[test]
    fn test_text_format() {
        assert_eq!(Equation::new(Operation::Divide, 84, 7, 12).text, "84 ÷ 7");
        assert_eq!(Equation::new(Operation::Multiply, 3, 4, 12).to_string(), "3 × 4");
        assert_eq!(Equation::new(Operation::Subtract, 9, 2, 7).text, "9 - 2");
    }

    #[test]
    fn test_all_operations_appear() {
        let eqs = sample(7, 400);
        for op in Operation::ALL {
            assert!(eqs.iter().any(|e| e.op == op), "{:?} never generated", op);
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        assert_eq!(sample(42, 50), sample(42, 50));
    }

    #[test]
    fn test_operand_bounds_reached() {
        // Inclusive bounds: both ends of each range show up in a large sample
        let eqs = sample(2024, 20_000);
        let adds: Vec<_> = eqs.iter().filter(|e| e.op == Operation::Add).collect();
        assert!(adds.iter().any(|e| e.lhs == 0));
        assert!(adds.iter().any(|e| e.lhs == 50));
        let muls: Vec<_> = eqs.iter().filter(|e| e.op == Operation::Multiply).collect();
        assert!(muls.iter().any(|e| e.rhs == 1));
        assert!(muls.iter().any(|e| e.rhs == 12));
    }

    proptest! {
        #[test]
        fn prop_answers_match_operands(seed in any::<u64>()) {
            for eq in sample(seed, 64) {
                match eq.op {
                    Operation::Add => {
                        prop_assert!((0..=50).contains(&eq.lhs) && (0..=50).contains(&eq.rhs));
                        prop_assert_eq!(eq.answer, eq.lhs + eq.rhs);
                    }
                    Operation::Subtract => {
                        prop_assert!(eq.lhs >= eq.rhs);
                        prop_assert!(eq.answer >= 0);
                        prop_assert_eq!(eq.answer, eq.lhs - eq.rhs);
                    }
                    Operation::Multiply => {
                        prop_assert!((1..=12).contains(&eq.lhs) && (1..=12).contains(&eq.rhs));
                        prop_assert_eq!(eq.answer, eq.lhs * eq.rhs);
                    }
                    Operation::Divide => {
                        prop_assert!((1..=12).contains(&eq.rhs));
                        prop_assert!((1..=12).contains(&eq.answer));
                        prop_assert_eq!(eq.lhs, eq.rhs * eq.answer);
                    }
                }
            }
        }
    }
}
