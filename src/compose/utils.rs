//! Combinators over [`Function`] values.
//!
//! - [`identity`]: the I combinator
//! - [`constant`]: the K combinator
//! - [`flip`]: the C combinator
//! - [`compose`] / [`pipe`]: chain functions right-to-left / left-to-right

use crate::value::{Function, Value, argument};

/// The function that returns its first argument unchanged.
///
/// `compose(&[identity(), f])` behaves like `f`.
pub fn identity() -> Function {
    Function::unary(Ok).named("identity")
}

/// A unary function that ignores its input and returns `value`.
///
/// # Examples
///
/// ```rust
/// use duckfp::compose::constant;
/// use duckfp::value::Value;
///
/// let always_five = constant(Value::from(5));
/// assert_eq!(always_five.call(&[Value::from("ignored")]).unwrap(), Value::from(5));
/// ```
pub fn constant(value: Value) -> Function {
    Function::unary(move |_| Ok(value.clone())).named("constant")
}

/// Swaps the first two arguments of `function`.
///
/// Further arguments are passed through in place. The result has arity 2.
///
/// # Laws
///
/// - **Double flip identity**: `flip(flip(f))` behaves like `f`
/// - **Flip definition**: `flip(f)(a, b) == f(b, a)`
pub fn flip(function: &Function) -> Function {
    let function = function.clone();
    Function::new(2, move |arguments| {
        let mut swapped = Vec::with_capacity(arguments.len().max(2));
        swapped.push(argument(arguments, 1));
        swapped.push(argument(arguments, 0));
        swapped.extend(arguments.iter().skip(2).cloned());
        function.call(&swapped)
    })
}

/// Composes functions right to left: `compose(&[f, g, h])(x) == f(g(h(x)))`.
///
/// The rightmost function receives every argument and fixes the arity of
/// the result; each other function receives the single previous result.
/// An empty list yields [`identity`].
///
/// # Examples
///
/// ```rust
/// use duckfp::compose::compose;
/// use duckfp::value::{Function, Value};
///
/// let add_one = Function::unary(|x| Ok(Value::from(x.as_number().unwrap_or(0.0) + 1.0)));
/// let double = Function::unary(|x| Ok(Value::from(x.as_number().unwrap_or(0.0) * 2.0)));
///
/// let composed = compose(&[add_one, double]);
/// assert_eq!(composed.call(&[Value::from(5)]).unwrap(), Value::from(11));
/// ```
pub fn compose(functions: &[Function]) -> Function {
    chain(functions.iter().rev().cloned().collect())
}

/// Composes functions left to right: `pipe(&[f, g, h])(x) == h(g(f(x)))`.
///
/// The leftmost function receives every argument and fixes the arity of the
/// result. An empty list yields [`identity`].
pub fn pipe(functions: &[Function]) -> Function {
    chain(functions.to_vec())
}

fn chain(functions: Vec<Function>) -> Function {
    let Some(arity) = functions.first().map(Function::arity) else {
        return identity();
    };
    Function::new(arity, move |arguments| {
        let mut remaining = functions.iter();
        let initial = match remaining.next() {
            Some(function) => function.call(arguments)?,
            None => argument(arguments, 0),
        };
        remaining.try_fold(initial, |result, function| function.call(&[result]))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn number(value: &Value) -> f64 {
        value.as_number().unwrap_or(f64::NAN)
    }

    fn add_one() -> Function {
        Function::unary(|x| Ok(Value::from(number(&x) + 1.0)))
    }

    fn double() -> Function {
        Function::unary(|x| Ok(Value::from(number(&x) * 2.0)))
    }

    fn subtract() -> Function {
        Function::binary(|x, y| Ok(Value::from(number(&x) - number(&y))))
    }

    #[rstest]
    fn identity_returns_its_argument() {
        assert_eq!(identity().call(&[Value::from("same")]).unwrap(), Value::from("same"));
        assert_eq!(identity().call(&[]).unwrap(), Value::Undefined);
    }

    #[rstest]
    fn compose_is_right_to_left_and_pipe_left_to_right() {
        let functions = [add_one(), double()];
        assert_eq!(compose(&functions).call(&[Value::from(5)]).unwrap(), Value::from(11));
        assert_eq!(pipe(&functions).call(&[Value::from(5)]).unwrap(), Value::from(12));
    }

    #[rstest]
    fn innermost_function_sets_the_arity() {
        let composed = compose(&[double(), subtract()]);
        assert_eq!(composed.arity(), 2);
        assert_eq!(
            composed.call(&[Value::from(10), Value::from(4)]).unwrap(),
            Value::from(12)
        );
    }

    #[rstest]
    fn empty_composition_is_identity() {
        assert_eq!(compose(&[]).call(&[Value::from(3)]).unwrap(), Value::from(3));
        assert_eq!(pipe(&[]).arity(), 1);
    }

    #[rstest]
    fn composition_is_associative() {
        let left = compose(&[add_one(), compose(&[double(), add_one()])]);
        let right = compose(&[compose(&[add_one(), double()]), add_one()]);
        for input in [-3, 0, 7] {
            assert_eq!(
                left.call(&[Value::from(input)]).unwrap(),
                right.call(&[Value::from(input)]).unwrap()
            );
        }
    }

    #[rstest]
    fn flip_swaps_and_double_flip_restores() {
        let arguments = [Value::from(10), Value::from(3)];
        assert_eq!(flip(&subtract()).call(&arguments).unwrap(), Value::from(-7));
        assert_eq!(
            flip(&flip(&subtract())).call(&arguments).unwrap(),
            subtract().call(&arguments).unwrap()
        );
    }

    #[rstest]
    fn constant_ignores_input() {
        let always = constant(Value::from("k"));
        assert_eq!(always.arity(), 1);
        assert_eq!(always.call(&[Value::from(1)]).unwrap(), Value::from("k"));
    }
}
