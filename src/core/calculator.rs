//! Single-accumulator scientific calculator.
//!
//! There is no expression parsing: an operator press records the displayed
//! value and waits for the second operand, and a second operator press
//! resolves the pending one first. `1 + 2 * 3 =` therefore evaluates strictly
//! left to right and shows `9`.

use thiserror::Error;

use crate::core::format::{format_number, parse_operand};
use crate::domain::model::{AngleMode, Effect};

pub const ERROR_TOKEN: &str = "Error";
pub const DIV_BY_ZERO_TOKEN: &str = "Error: Div by 0";

/// Arithmetic failures never escape the engine; they become a display state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArithmeticError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("{function} is undefined for this input")]
    Domain { function: &'static str },
    #[error("operand is not a number")]
    InvalidOperand,
    #[error("result is too large")]
    Overflow,
}

impl ArithmeticError {
    pub fn display_token(&self) -> &'static str {
        match self {
            ArithmeticError::DivisionByZero => DIV_BY_ZERO_TOKEN,
            _ => ERROR_TOKEN,
        }
    }
}

type Calc<T> = std::result::Result<T, ArithmeticError>;

fn finite(value: f64, function: &'static str) -> Calc<f64> {
    if value.is_nan() {
        Err(ArithmeticError::Domain { function })
    } else if value.is_infinite() {
        Err(ArithmeticError::Overflow)
    } else {
        Ok(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Modulo,
}

impl BinaryOperator {
    pub const fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Power => "^",
            BinaryOperator::Modulo => "%",
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '+' => Some(BinaryOperator::Add),
            '-' => Some(BinaryOperator::Subtract),
            '*' => Some(BinaryOperator::Multiply),
            '/' => Some(BinaryOperator::Divide),
            '^' => Some(BinaryOperator::Power),
            '%' => Some(BinaryOperator::Modulo),
            _ => None,
        }
    }

    pub fn apply(self, lhs: f64, rhs: f64) -> Calc<f64> {
        let result = match self {
            BinaryOperator::Add => lhs + rhs,
            BinaryOperator::Subtract => lhs - rhs,
            BinaryOperator::Multiply => lhs * rhs,
            BinaryOperator::Divide => {
                if rhs == 0.0 {
                    return Err(ArithmeticError::DivisionByZero);
                }
                lhs / rhs
            }
            BinaryOperator::Power => lhs.powf(rhs),
            BinaryOperator::Modulo => {
                if rhs == 0.0 {
                    return Err(ArithmeticError::Domain { function: "mod" });
                }
                // floored: the remainder takes the sign of the divisor
                let rem = lhs % rhs;
                if rem != 0.0 && (rem < 0.0) != (rhs < 0.0) {
                    rem + rhs
                } else {
                    rem
                }
            }
        };
        finite(result, self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryFunction {
    Sin,
    Cos,
    Tan,
    Log10,
    Ln,
    Sqrt,
    Cbrt,
    Square,
    Cube,
    Reciprocal,
    Factorial,
    Abs,
    Pow10,
    Pow2,
}

impl UnaryFunction {
    pub const ALL: [UnaryFunction; 14] = [
        UnaryFunction::Sin,
        UnaryFunction::Cos,
        UnaryFunction::Tan,
        UnaryFunction::Log10,
        UnaryFunction::Ln,
        UnaryFunction::Sqrt,
        UnaryFunction::Cbrt,
        UnaryFunction::Square,
        UnaryFunction::Cube,
        UnaryFunction::Reciprocal,
        UnaryFunction::Factorial,
        UnaryFunction::Abs,
        UnaryFunction::Pow10,
        UnaryFunction::Pow2,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            UnaryFunction::Sin => "sin",
            UnaryFunction::Cos => "cos",
            UnaryFunction::Tan => "tan",
            UnaryFunction::Log10 => "log",
            UnaryFunction::Ln => "ln",
            UnaryFunction::Sqrt => "sqrt",
            UnaryFunction::Cbrt => "cbrt",
            UnaryFunction::Square => "sq",
            UnaryFunction::Cube => "cube",
            UnaryFunction::Reciprocal => "inv",
            UnaryFunction::Factorial => "fact",
            UnaryFunction::Abs => "abs",
            UnaryFunction::Pow10 => "10x",
            UnaryFunction::Pow2 => "2x",
        }
    }

    pub fn apply(self, value: f64, mode: AngleMode) -> Calc<f64> {
        let angle = || match mode {
            AngleMode::Degrees => value.to_radians(),
            AngleMode::Radians => value,
        };
        let result = match self {
            UnaryFunction::Sin => angle().sin(),
            UnaryFunction::Cos => angle().cos(),
            UnaryFunction::Tan => angle().tan(),
            UnaryFunction::Log10 | UnaryFunction::Ln if value <= 0.0 => {
                return Err(ArithmeticError::Domain {
                    function: self.name(),
                })
            }
            UnaryFunction::Log10 => value.log10(),
            UnaryFunction::Ln => value.ln(),
            UnaryFunction::Sqrt if value < 0.0 => {
                return Err(ArithmeticError::Domain { function: "sqrt" })
            }
            UnaryFunction::Sqrt => value.sqrt(),
            UnaryFunction::Cbrt => value.cbrt(),
            UnaryFunction::Square => value.powi(2),
            UnaryFunction::Cube => value.powi(3),
            UnaryFunction::Reciprocal if value == 0.0 => {
                return Err(ArithmeticError::Domain { function: "inv" })
            }
            UnaryFunction::Reciprocal => 1.0 / value,
            UnaryFunction::Factorial => factorial(value)?,
            UnaryFunction::Abs => value.abs(),
            UnaryFunction::Pow10 => 10f64.powf(value),
            UnaryFunction::Pow2 => 2f64.powf(value),
        };
        finite(result, self.name())
    }
}

/// Largest n whose factorial fits in an f64.
const MAX_FACTORIAL: f64 = 170.0;

fn factorial(value: f64) -> Calc<f64> {
    if value < 0.0 || value.fract() != 0.0 {
        return Err(ArithmeticError::Domain { function: "fact" });
    }
    if value > MAX_FACTORIAL {
        return Err(ArithmeticError::Overflow);
    }
    Ok((2..=value as u32).fold(1.0, |acc, n| acc * f64::from(n)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    Pi,
    E,
}

impl Constant {
    pub fn value(self) -> f64 {
        match self {
            Constant::Pi => std::f64::consts::PI,
            Constant::E => std::f64::consts::E,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct PendingOperation {
    operand: String,
    operator: BinaryOperator,
}

/// Calculator state owned by whoever hosts the keypad.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorEngine {
    current: String,
    pending: Option<PendingOperation>,
    awaiting_new_entry: bool,
    angle_mode: AngleMode,
    memory: f64,
    history: String,
}

impl Default for CalculatorEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorEngine {
    pub fn new() -> Self {
        Self::with_angle_mode(AngleMode::default())
    }

    pub fn with_angle_mode(angle_mode: AngleMode) -> Self {
        Self {
            current: "0".to_string(),
            pending: None,
            awaiting_new_entry: true,
            angle_mode,
            memory: 0.0,
            history: String::new(),
        }
    }

    pub fn display(&self) -> &str {
        &self.current
    }

    /// Annotation shown above the display, e.g. `12 +`.
    pub fn history(&self) -> &str {
        &self.history
    }

    pub fn pending_operator(&self) -> Option<BinaryOperator> {
        self.pending.as_ref().map(|p| p.operator)
    }

    pub fn pending_operand(&self) -> Option<&str> {
        self.pending.as_ref().map(|p| p.operand.as_str())
    }

    pub fn awaiting_new_entry(&self) -> bool {
        self.awaiting_new_entry
    }

    pub fn angle_mode(&self) -> AngleMode {
        self.angle_mode
    }

    pub fn memory(&self) -> f64 {
        self.memory
    }

    pub fn is_error(&self) -> bool {
        self.current.starts_with(ERROR_TOKEN)
    }

    pub fn press_digit(&mut self, digit: char) -> Effect {
        if !digit.is_ascii_digit() {
            return Effect::Ignored;
        }
        if self.awaiting_new_entry || self.current == "0" {
            self.current = digit.to_string();
            self.awaiting_new_entry = false;
        } else {
            self.current.push(digit);
        }
        Effect::Applied
    }

    pub fn press_decimal_point(&mut self) -> Effect {
        if self.current.contains('.') {
            return Effect::Ignored;
        }
        if self.awaiting_new_entry {
            self.current = "0.".to_string();
            self.awaiting_new_entry = false;
        } else {
            self.current.push('.');
        }
        Effect::Applied
    }

    /// Ignored while the display is not a number (error token, lone `-`),
    /// so a pending operand is always numeric.
    pub fn press_operator(&mut self, operator: BinaryOperator) -> Effect {
        if parse_operand(&self.current).is_none() {
            return Effect::Ignored;
        }
        if self.pending.is_some() && !self.awaiting_new_entry {
            let _ = self.equals();
            if self.is_error() {
                // the chained evaluation failed; it stays on screen
                return Effect::Applied;
            }
        }

        tracing::debug!("operator {} after {}", operator.symbol(), self.current);
        self.history = format!("{} {}", self.current, operator.symbol());
        self.pending = Some(PendingOperation {
            operand: self.current.clone(),
            operator,
        });
        self.awaiting_new_entry = true;
        Effect::Applied
    }

    pub fn equals(&mut self) -> Effect {
        let Some(pending) = self.pending.as_ref() else {
            return Effect::Ignored;
        };

        let outcome = match (parse_operand(&pending.operand), parse_operand(&self.current)) {
            (Some(lhs), Some(rhs)) => pending.operator.apply(lhs, rhs),
            _ => Err(ArithmeticError::InvalidOperand),
        };

        match outcome {
            Ok(result) => {
                self.current = format_number(result);
                self.pending = None;
                self.history.clear();
                tracing::debug!("equals -> {}", self.current);
            }
            // the pending operation stays recorded, like a stuck display
            Err(e) => self.enter_error(e),
        }
        self.awaiting_new_entry = true;
        Effect::Applied
    }

    pub fn apply_unary_function(&mut self, function: UnaryFunction) {
        let outcome = parse_operand(&self.current)
            .ok_or(ArithmeticError::InvalidOperand)
            .and_then(|value| function.apply(value, self.angle_mode));

        match outcome {
            Ok(result) => {
                self.current = format_number(result);
                tracing::debug!("{} -> {}", function.name(), self.current);
            }
            Err(e) => self.enter_error(e),
        }
        self.awaiting_new_entry = true;
    }

    pub fn insert_constant(&mut self, constant: Constant) {
        self.current = format_number(constant.value());
        self.awaiting_new_entry = true;
    }

    pub fn toggle_sign(&mut self) -> Effect {
        match parse_operand(&self.current) {
            Some(value) => {
                self.current = format_number(-value);
                Effect::Applied
            }
            None => Effect::Ignored,
        }
    }

    pub fn backspace(&mut self) -> Effect {
        if self.awaiting_new_entry {
            return Effect::Ignored;
        }
        if self.current.chars().count() > 1 {
            self.current.pop();
        } else {
            self.current = "0".to_string();
            self.awaiting_new_entry = true;
        }
        Effect::Applied
    }

    /// Resets the display only; a pending operation survives.
    pub fn clear_entry(&mut self) {
        self.current = "0".to_string();
        self.awaiting_new_entry = true;
    }

    /// Resets everything except memory and angle mode.
    pub fn all_clear(&mut self) {
        self.current = "0".to_string();
        self.pending = None;
        self.awaiting_new_entry = true;
        self.history.clear();
    }

    pub fn memory_store(&mut self) -> Effect {
        self.update_memory(|_, value| value)
    }

    pub fn memory_add(&mut self) -> Effect {
        self.update_memory(|memory, value| memory + value)
    }

    pub fn memory_subtract(&mut self) -> Effect {
        self.update_memory(|memory, value| memory - value)
    }

    pub fn memory_recall(&mut self) {
        self.current = format_number(self.memory);
        self.awaiting_new_entry = true;
    }

    pub fn memory_clear(&mut self) {
        self.memory = 0.0;
    }

    pub fn set_angle_mode(&mut self, mode: AngleMode) {
        self.angle_mode = mode;
    }

    fn update_memory(&mut self, combine: impl FnOnce(f64, f64) -> f64) -> Effect {
        match parse_operand(&self.current) {
            Some(value) => {
                let updated = combine(self.memory, value);
                if !updated.is_finite() {
                    tracing::warn!("memory overflow, keeping {}", self.memory);
                    return Effect::Ignored;
                }
                self.memory = updated;
                Effect::Applied
            }
            None => Effect::Ignored,
        }
    }

    fn enter_error(&mut self, error: ArithmeticError) {
        tracing::warn!("calculation failed: {}", error);
        self.current = error.display_token().to_string();
    }
}
