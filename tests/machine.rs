use std::cell::RefCell;
use std::rc::Rc;

use intcode::{ Error, Machine, Program, State, Value };
use proptest::prelude::*;

const QUINE: &str = "109,1,204,-1,1001,100,1,100,1008,100,16,101,1006,101,0,99";

const COMPARE_TO_EIGHT: &str = "3,9,8,9,10,9,4,9,99,-1,8";
const COMPARE_TO_EIGHT_IMMEDIATE: &str = "3,3,1108,-1,8,3,4,3,99";

// Outputs 999 below 8, 1000 at 8, 1001 above.
const AROUND_EIGHT: &str = "3,21,1008,21,8,20,1005,20,22,107,8,21,20,1006,20,31,1106,0,36,98,0,0,1002,21,125,20,4,20,1105,1,46,104,999,1105,1,46,1101,1000,1,20,4,20,1105,1,46,98,99";

fn run_with(program: &str, inputs: &[i64]) -> Vec<Value> {
    let mut machine = Machine::with_program(program).unwrap();
    for input in inputs {
        machine.enqueue_input(*input).unwrap();
    }
    assert_eq!(machine.run().unwrap(), State::Halted);
    machine.dequeue_all_output()
}

#[test]
fn position_and_immediate_arithmetic() {
    let mut machine = Machine::with_program("1002,4,3,4,33").unwrap();
    machine.run().unwrap();
    assert_eq!(machine.memory().read(4), Value::from(99));

    let mut machine = Machine::with_program("1101,100,-1,4,0").unwrap();
    machine.run().unwrap();
    assert_eq!(machine.memory().read(4), Value::from(99));
}

#[test]
fn immediate_echo_notifies_once() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut machine = Machine::with_program("3,0,4,0,99").unwrap();
    let sink = seen.clone();
    machine.on_output(move |value| sink.borrow_mut().push(value.clone()));

    machine.enqueue_input(47).unwrap();
    assert_eq!(machine.run().unwrap(), State::Halted);
    assert_eq!(*seen.borrow(), vec![Value::from(47)]);
    assert_eq!(machine.dequeue_all_output(), vec![Value::from(47)]);
}

#[test]
fn quine_outputs_itself() {
    let program: Program = QUINE.parse().unwrap();
    assert_eq!(run_with(QUINE, &[]), program.cells());
}

#[test]
fn big_values_round_trip() {
    let output = run_with("1102,34915192,34915192,7,4,7,99,0", &[]);
    assert_eq!(output, vec![Value::from(1219070632396864i64)]);
    assert_eq!(output[0].to_string().len(), 16);

    let output = run_with("104,1125899906842624,99", &[]);
    assert_eq!(output, vec![Value::from(1125899906842624i64)]);

    let huge: Value = "123456789012345678901234567890".parse().unwrap();
    let output = run_with("1102,123456789012345678901234567890,123456789012345678901234567890,7,4,7,99,0", &[]);
    assert_eq!(output, vec![&huge * &huge]);
}

#[test]
fn comparison_family() {
    for program in [COMPARE_TO_EIGHT, COMPARE_TO_EIGHT_IMMEDIATE] {
        assert_eq!(run_with(program, &[8]), vec![Value::from(1)], "{}", program);
        assert_eq!(run_with(program, &[7]), vec![Value::from(0)], "{}", program);
    }

    for (input, expected) in [(5, 999), (8, 1000), (11, 1001)] {
        assert_eq!(run_with(AROUND_EIGHT, &[input]), vec![Value::from(expected)]);
    }
}

#[test]
fn resuming_completes_the_blocked_instruction_once() {
    // Sums two inputs, reading the second only after the first is output.
    let mut machine = Machine::with_program("3,13,4,13,3,14,1,13,14,15,4,15,99,0,0,0").unwrap();
    machine.enqueue_input(20).unwrap();

    assert_eq!(machine.run().unwrap(), State::Blocked);
    assert_eq!(machine.ip(), 4);
    assert_eq!(machine.dequeue_all_output(), vec![Value::from(20)]);

    machine.enqueue_input(22).unwrap();
    assert_eq!(machine.run().unwrap(), State::Halted);
    assert_eq!(machine.dequeue_all_output(), vec![Value::from(42)]);
    assert_eq!(machine.pending_input(), 0);
}

#[test]
fn draining_twice_returns_nothing_new() {
    let mut machine = Machine::with_program("104,1,104,2,99").unwrap();
    machine.run().unwrap();
    assert_eq!(machine.dequeue_all_output(), vec![Value::from(1), Value::from(2)]);
    assert!(machine.dequeue_all_output().is_empty());
}

#[test]
fn partial_output_survives_a_fault() {
    let seen = Rc::new(RefCell::new(0));
    let mut machine = Machine::with_program("104,7,104,8,77").unwrap();
    let counter = seen.clone();
    machine.on_output(move |_| *counter.borrow_mut() += 1);

    assert!(matches!(machine.run(), Err(Error::UnknownOpcode { ip: 4, .. })));
    assert_eq!(*seen.borrow(), 2);
    assert_eq!(machine.dequeue_all_output(), vec![Value::from(7), Value::from(8)]);
    assert!(matches!(machine.run(), Err(Error::InvalidStateTransition { .. })));
}

proptest! {
    #[test]
    fn add_and_multiply_match_host_arithmetic(a in any::<i64>(), b in any::<i64>()) {
        let program = format!("1101,{a},{b},13,1102,{a},{b},14,4,13,4,14,99,0,0", a = a, b = b);
        let output = run_with(&program, &[]);
        prop_assert_eq!(output, vec![Value::from(a) + Value::from(b), Value::from(a) * Value::from(b)]);
    }

    #[test]
    fn blocking_never_loses_input(inputs in proptest::collection::vec(any::<i64>(), 1..16)) {
        // Echoes input forever.
        let mut machine = Machine::with_program("3,7,4,7,1105,1,0,0").unwrap();
        let mut echoed = Vec::new();
        for input in &inputs {
            prop_assert_eq!(machine.run().unwrap(), State::Blocked);
            machine.enqueue_input(*input).unwrap();
            echoed.extend(machine.dequeue_all_output());
        }
        prop_assert_eq!(machine.run().unwrap(), State::Blocked);
        echoed.extend(machine.dequeue_all_output());
        prop_assert_eq!(echoed, inputs.iter().copied().map(Value::from).collect::<Vec<_>>());
    }
}
