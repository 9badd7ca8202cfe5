//! Arity-aware currying and partial application.
//!
//! Both work from the declared [`Function::arity`]: a curried function keeps
//! collecting arguments until it has at least that many, then calls the
//! original with everything it collected.

use smallvec::SmallVec;

use crate::value::{Function, Value};

type Arguments = SmallVec<[Value; 4]>;

/// Converts `function` into curried form.
///
/// Calling the result with fewer arguments than the arity returns a new
/// curried function whose arity is the number still missing. Calling it
/// with at least that many invokes `function` with every argument
/// collected so far, extras included. A function of arity 0 is invoked on
/// the first call.
///
/// Partial applications are independent values and can be reused.
///
/// # Examples
///
/// ```rust
/// use duckfp::compose::curry;
/// use duckfp::value::{Function, Value};
///
/// let volume = Function::new(3, |arguments| {
///     Ok(Value::from(
///         arguments.iter().filter_map(Value::as_number).product::<f64>(),
///     ))
/// });
///
/// let curried = curry(&volume);
/// let with_width = curried.call(&[Value::from(2)]).unwrap();
/// assert_eq!(with_width.as_function().unwrap().arity(), 2);
///
/// let result = with_width
///     .call(&[Value::from(3)])
///     .and_then(|with_height| with_height.call(&[Value::from(4)]))
///     .unwrap();
/// assert_eq!(result, Value::from(24));
///
/// // All at once works too.
/// let all_at_once = curried.call(&[Value::from(2), Value::from(3), Value::from(4)]).unwrap();
/// assert_eq!(all_at_once, Value::from(24));
/// ```
pub fn curry(function: &Function) -> Function {
    curried(function.clone(), Arguments::new())
}

fn curried(function: Function, applied: Arguments) -> Function {
    let remaining = function.arity().saturating_sub(applied.len());
    Function::new(remaining, move |arguments| {
        let mut collected = applied.clone();
        collected.extend(arguments.iter().cloned());
        if collected.len() >= function.arity() {
            function.call(&collected)
        } else {
            Ok(Value::from(curried(function.clone(), collected)))
        }
    })
}

/// Fixes the leading arguments of `function`.
///
/// The result has the remaining arity and passes `fixed` followed by its own
/// arguments.
///
/// # Examples
///
/// ```rust
/// use duckfp::compose::partial;
/// use duckfp::value::{Function, Value};
///
/// let subtract = Function::binary(|minuend, subtrahend| {
///     Ok(Value::from(
///         minuend.as_number().unwrap_or(0.0) - subtrahend.as_number().unwrap_or(0.0),
///     ))
/// });
///
/// let from_ten = partial(&subtract, &[Value::from(10)]);
/// assert_eq!(from_ten.arity(), 1);
/// assert_eq!(from_ten.call(&[Value::from(3)]).unwrap(), Value::from(7));
/// ```
pub fn partial(function: &Function, fixed: &[Value]) -> Function {
    let function = function.clone();
    let fixed: Arguments = fixed.iter().cloned().collect();
    Function::new(
        function.arity().saturating_sub(fixed.len()),
        move |arguments| {
            let mut collected = fixed.clone();
            collected.extend(arguments.iter().cloned());
            function.call(&collected)
        },
    )
}
