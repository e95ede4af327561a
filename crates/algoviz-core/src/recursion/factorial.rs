use super::{admit, Calls, RecursionAction, RecursionTrace};

/// Largest `n` whose factorial fits in a `u128`.
pub const FACTORIAL_EXACT_MAX: u32 = 34;

const WARN_ABOVE: u32 = 20;

fn descend(calls: &mut Calls, num: u32) -> u128 {
    let id = calls.enter(num);
    calls.record_call(
        RecursionAction::Call,
        format!("Computing factorial({})", num),
        num,
        id,
        None,
    );

    let result = if num <= 1 {
        calls.computed.insert(num, 1);
        calls.record_call(
            RecursionAction::BaseCase,
            format!("Base case: factorial({}) = 1", num),
            num,
            id,
            Some(1),
        );
        1
    } else {
        calls.record_call(
            RecursionAction::Recursion,
            format!("Recursing: factorial({}) = {} × factorial({})", num, num, num - 1),
            num,
            id,
            None,
        );
        let sub = descend(calls, num - 1);
        let result = u128::from(num) * sub;
        calls.computed.insert(num, result);
        calls.record_call(
            RecursionAction::Return,
            format!("Returning: factorial({}) = {} × {} = {}", num, num, sub, result),
            num,
            id,
            Some(result),
        );
        result
    };

    calls.leave();
    result
}

/// `n!` by plain recursion, one `CALL` per frame.
///
/// Negative `n`, and `n` beyond [`FACTORIAL_EXACT_MAX`], end in an `ERROR`
/// step with `isValid: false`.
pub fn factorial(n: i64) -> RecursionTrace {
    let mut calls = Calls::new();
    calls.record(RecursionAction::Start, format!("Computing factorial({})", n));

    let n = match admit(
        &mut calls,
        "Factorial",
        n,
        WARN_ABOVE,
        FACTORIAL_EXACT_MAX,
        "May cause performance issues.",
    ) {
        Ok(n) => n,
        Err(message) => return calls.rejected(message),
    };

    let result = descend(&mut calls, n);
    let message = format!("Final result: factorial({}) = {}", n, result);
    calls.completed(n, result, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_factorial_trace() {
        let trace = factorial(3);
        assert_eq!(trace.summary.result, Some(6));
        assert!(trace.summary.is_valid);
        assert_eq!(
            trace.tags(),
            vec![
                "START",
                "CALL",
                "RECURSION",
                "CALL",
                "RECURSION",
                "CALL",
                "BASE_CASE",
                "RETURN",
                "RETURN",
                "COMPLETED"
            ]
        );
    }

    #[test]
    fn call_ids_increase_and_frames_nest() {
        let trace = factorial(2);
        let calls: Vec<_> = trace
            .steps
            .iter()
            .filter(|s| s.action == RecursionAction::Call)
            .map(|s| (s.call_id, s.call_stack.clone()))
            .collect();
        assert_eq!(calls, vec![(Some(1), vec![2]), (Some(2), vec![2, 1])]);
        // The RETURN for frame 1 happens after frame 2 has resolved.
        let ret = &trace.steps[trace.steps.len() - 2];
        assert_eq!(ret.call_id, Some(1));
        assert!(ret.is_returning);
        assert_eq!(ret.computed.get(&1), Some(&1));
        assert_eq!(ret.computed.get(&2), Some(&2));
    }

    #[test]
    fn zero_is_a_base_case() {
        let trace = factorial(0);
        assert_eq!(trace.summary.result, Some(1));
        assert_eq!(trace.tags(), vec!["START", "CALL", "BASE_CASE", "COMPLETED"]);
    }

    #[test]
    fn negative_input_is_rejected() {
        let trace = factorial(-4);
        assert_eq!(trace.tags(), vec!["START", "ERROR"]);
        assert!(!trace.summary.is_valid);
        assert_eq!(trace.summary.result, None);
    }

    #[test]
    fn large_input_warns_but_runs() {
        let trace = factorial(21);
        assert_eq!(trace.tags()[1], "WARNING");
        assert_eq!(trace.summary.result, Some(51_090_942_171_709_440_000));
    }

    #[test]
    fn exact_range_boundary() {
        let top = factorial(FACTORIAL_EXACT_MAX as i64);
        let expected = (1..=FACTORIAL_EXACT_MAX as u128).product::<u128>();
        assert_eq!(top.summary.result, Some(expected));

        let past = factorial(FACTORIAL_EXACT_MAX as i64 + 1);
        assert!(!past.summary.is_valid);
        assert_eq!(past.tags().last(), Some(&"ERROR"));
    }

    #[test]
    fn results_beyond_u64_serialize_exactly() {
        let trace = factorial(25);
        let json = serde_json::to_string(&trace.summary).unwrap();
        assert_eq!(
            json,
            r#"{"result":15511210043330985984000000,"isValid":true}"#
        );
    }
}
