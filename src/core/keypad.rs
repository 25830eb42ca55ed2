//! Maps keyboard characters and keypad labels onto calculator actions.

use crate::core::calculator::{BinaryOperator, CalculatorEngine, Constant, UnaryFunction};
use crate::domain::model::{AngleMode, Effect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculatorAction {
    Digit(char),
    DecimalPoint,
    Operator(BinaryOperator),
    Equals,
    Function(UnaryFunction),
    Constant(Constant),
    ToggleSign,
    Backspace,
    ClearEntry,
    AllClear,
    MemoryStore,
    MemoryRecall,
    MemoryAdd,
    MemorySubtract,
    MemoryClear,
    SetAngleMode(AngleMode),
}

impl CalculatorAction {
    /// Single key press: digits, `+ - * / ^ %`, `.`, `=`/Enter, Backspace, Escape.
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            '0'..='9' => Some(CalculatorAction::Digit(key)),
            '.' => Some(CalculatorAction::DecimalPoint),
            '=' | '\r' | '\n' => Some(CalculatorAction::Equals),
            '\u{8}' | '\u{7f}' => Some(CalculatorAction::Backspace),
            '\u{1b}' => Some(CalculatorAction::AllClear),
            other => BinaryOperator::from_symbol(other).map(CalculatorAction::Operator),
        }
    }

    /// Keypad label, e.g. `sin`, `MR`, `1/x`.
    pub fn from_label(label: &str) -> Option<Self> {
        let action = match label {
            "C" | "CE" => CalculatorAction::ClearEntry,
            "AC" | "esc" => CalculatorAction::AllClear,
            "MC" => CalculatorAction::MemoryClear,
            "MR" => CalculatorAction::MemoryRecall,
            "M+" => CalculatorAction::MemoryAdd,
            "M-" => CalculatorAction::MemorySubtract,
            "MS" => CalculatorAction::MemoryStore,
            "+/-" | "neg" => CalculatorAction::ToggleSign,
            "bs" | "backspace" => CalculatorAction::Backspace,
            "enter" => CalculatorAction::Equals,
            "pi" | "π" => CalculatorAction::Constant(Constant::Pi),
            "e" => CalculatorAction::Constant(Constant::E),
            "deg" => CalculatorAction::SetAngleMode(AngleMode::Degrees),
            "rad" => CalculatorAction::SetAngleMode(AngleMode::Radians),
            "mod" => CalculatorAction::Operator(BinaryOperator::Modulo),
            "x2" | "x²" => CalculatorAction::Function(UnaryFunction::Square),
            "x3" | "x³" => CalculatorAction::Function(UnaryFunction::Cube),
            "1/x" => CalculatorAction::Function(UnaryFunction::Reciprocal),
            "n!" => CalculatorAction::Function(UnaryFunction::Factorial),
            "√" => CalculatorAction::Function(UnaryFunction::Sqrt),
            "∛" => CalculatorAction::Function(UnaryFunction::Cbrt),
            "|x|" => CalculatorAction::Function(UnaryFunction::Abs),
            other => {
                return UnaryFunction::ALL
                    .into_iter()
                    .find(|f| f.name() == other)
                    .map(CalculatorAction::Function)
            }
        };
        Some(action)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyInput {
    Action(CalculatorAction),
    Unrecognized(String),
}

/// Splits a line on whitespace. A word is a keypad label if it is one,
/// otherwise a run of single keys (`12+3=`).
pub fn parse_line(line: &str) -> Vec<KeyInput> {
    let mut inputs = Vec::new();
    for word in line.split_whitespace() {
        if let Some(action) = CalculatorAction::from_label(word) {
            inputs.push(KeyInput::Action(action));
            continue;
        }

        let keys: Option<Vec<_>> = word.chars().map(CalculatorAction::from_key).collect();
        match keys {
            Some(actions) => inputs.extend(actions.into_iter().map(KeyInput::Action)),
            None => inputs.push(KeyInput::Unrecognized(word.to_string())),
        }
    }
    inputs
}

impl CalculatorEngine {
    pub fn apply(&mut self, action: CalculatorAction) -> Effect {
        match action {
            CalculatorAction::Digit(d) => self.press_digit(d),
            CalculatorAction::DecimalPoint => self.press_decimal_point(),
            CalculatorAction::Operator(op) => self.press_operator(op),
            CalculatorAction::Equals => self.equals(),
            CalculatorAction::Function(f) => {
                self.apply_unary_function(f);
                Effect::Applied
            }
            CalculatorAction::Constant(c) => {
                self.insert_constant(c);
                Effect::Applied
            }
            CalculatorAction::ToggleSign => self.toggle_sign(),
            CalculatorAction::Backspace => self.backspace(),
            CalculatorAction::ClearEntry => {
                self.clear_entry();
                Effect::Applied
            }
            CalculatorAction::AllClear => {
                self.all_clear();
                Effect::Applied
            }
            CalculatorAction::MemoryStore => self.memory_store(),
            CalculatorAction::MemoryRecall => {
                self.memory_recall();
                Effect::Applied
            }
            CalculatorAction::MemoryAdd => self.memory_add(),
            CalculatorAction::MemorySubtract => self.memory_subtract(),
            CalculatorAction::MemoryClear => {
                self.memory_clear();
                Effect::Applied
            }
            CalculatorAction::SetAngleMode(mode) => {
                self.set_angle_mode(mode);
                Effect::Applied
            }
        }
    }

    /// Feeds a whole line of keys; returns the words that were not understood.
    pub fn apply_line(&mut self, line: &str) -> Vec<String> {
        let mut rejected = Vec::new();
        for input in parse_line(line) {
            match input {
                KeyInput::Action(action) => {
                    let _ = self.apply(action);
                }
                KeyInput::Unrecognized(word) => {
                    tracing::debug!("ignoring unknown key '{}'", word);
                    rejected.push(word);
                }
            }
        }
        rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_key() {
        assert_eq!(CalculatorAction::from_key('7'), Some(CalculatorAction::Digit('7')));
        assert_eq!(
            CalculatorAction::from_key('/'),
            Some(CalculatorAction::Operator(BinaryOperator::Divide))
        );
        assert_eq!(CalculatorAction::from_key('\r'), Some(CalculatorAction::Equals));
        assert_eq!(CalculatorAction::from_key('\u{1b}'), Some(CalculatorAction::AllClear));
        assert_eq!(CalculatorAction::from_key('x'), None);
    }

    #[test]
    fn test_from_label() {
        assert_eq!(
            CalculatorAction::from_label("sin"),
            Some(CalculatorAction::Function(UnaryFunction::Sin))
        );
        assert_eq!(
            CalculatorAction::from_label("2x"),
            Some(CalculatorAction::Function(UnaryFunction::Pow2))
        );
        assert_eq!(CalculatorAction::from_label("M+"), Some(CalculatorAction::MemoryAdd));
        assert_eq!(CalculatorAction::from_label("nope"), None);
    }

    #[test]
    fn test_every_function_has_a_label() {
        for function in UnaryFunction::ALL {
            assert_eq!(
                CalculatorAction::from_label(function.name()),
                Some(CalculatorAction::Function(function))
            );
        }
    }

    #[test]
    fn test_parse_line_mixes_labels_and_keys() {
        let inputs = parse_line("12+ sqrt =  foo");
        assert_eq!(
            inputs,
            vec![
                KeyInput::Action(CalculatorAction::Digit('1')),
                KeyInput::Action(CalculatorAction::Digit('2')),
                KeyInput::Action(CalculatorAction::Operator(BinaryOperator::Add)),
                KeyInput::Action(CalculatorAction::Function(UnaryFunction::Sqrt)),
                KeyInput::Action(CalculatorAction::Equals),
                KeyInput::Unrecognized("foo".to_string()),
            ]
        );
    }

    #[test]
    fn test_apply_line() {
        let mut engine = CalculatorEngine::new();
        let rejected = engine.apply_line("7*8= what");
        assert_eq!(engine.display(), "56");
        assert_eq!(rejected, vec!["what".to_string()]);
    }
}
