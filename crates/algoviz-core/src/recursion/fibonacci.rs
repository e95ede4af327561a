use super::{admit, Calls, RecursionAction, RecursionTrace};

/// Largest `n` whose Fibonacci number fits in a `u128`.
pub const FIBONACCI_EXACT_MAX: u32 = 186;

const WARN_ABOVE: u32 = 40;

fn descend(calls: &mut Calls, num: u32) -> u128 {
    let id = calls.enter(num);

    if let Some(&known) = calls.computed.get(&num) {
        calls.record_call(
            RecursionAction::Memoized,
            format!("Memoized result: fibonacci({}) = {}", num, known),
            num,
            id,
            Some(known),
        );
        calls.leave();
        return known;
    }

    calls.record_call(
        RecursionAction::Call,
        format!("Computing fibonacci({})", num),
        num,
        id,
        None,
    );

    let result = if num <= 1 {
        let base = u128::from(num);
        calls.computed.insert(num, base);
        calls.record_call(
            RecursionAction::BaseCase,
            format!("Base case: fibonacci({}) = {}", num, num),
            num,
            id,
            Some(base),
        );
        base
    } else {
        calls.record_call(
            RecursionAction::Recursion,
            format!(
                "Recursing: fibonacci({}) = fibonacci({}) + fibonacci({})",
                num,
                num - 1,
                num - 2
            ),
            num,
            id,
            None,
        );
        let first = descend(calls, num - 1);
        let second = descend(calls, num - 2);
        let result = first + second;
        calls.computed.insert(num, result);
        calls.record_call(
            RecursionAction::Return,
            format!("Returning: fibonacci({}) = {} + {} = {}", num, first, second, result),
            num,
            id,
            Some(result),
        );
        result
    };

    calls.leave();
    result
}

/// `fib(n)` by top-down recursion with a memo table.
///
/// A call for an already-resolved `n` records a single `MEMOIZED` step
/// instead of a `CALL` chain, so the trace grows linearly in `n`.
pub fn fibonacci(n: i64) -> RecursionTrace {
    let mut calls = Calls::new();
    calls.record(RecursionAction::Start, format!("Computing fibonacci({})", n));

    let n = match admit(
        &mut calls,
        "Fibonacci",
        n,
        WARN_ABOVE,
        FIBONACCI_EXACT_MAX,
        "Will use memoization.",
    ) {
        Ok(n) => n,
        Err(message) => return calls.rejected(message),
    };

    let result = descend(&mut calls, n);
    let message = format!("Final result: fibonacci({}) = {}", n, result);
    calls.completed(n, result, message)
}
