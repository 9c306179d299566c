use super::*;
use crate::draw::{Drawing, PenShape, Shape};
use crate::event::{EngineEvent, EventBus};
use crate::util::{Point, Size};
use std::cell::RefCell;
use std::rc::Rc;

fn drawing() -> Drawing {
    Drawing::new(Size::new(200.0, 200.0))
}

fn dot(x: f64) -> Shape {
    Shape::Pen(PenShape::new(Point::new(x, x)))
}

#[test]
fn apply_then_undo_restores_shape_list() {
    let mut drawing = drawing();
    let mut stack = OperationStack::default();
    let before = drawing.shapes().to_vec();

    for i in 0..4 {
        stack.apply(&mut drawing, Operation::add_shape(dot(i as f64)));
    }
    assert_eq!(drawing.len(), 4);

    for _ in 0..4 {
        assert!(stack.undo(&mut drawing));
    }
    assert_eq!(drawing.shapes(), before.as_slice());
    assert!(!stack.can_undo());
    assert!(stack.can_redo());
}

#[test]
fn redo_replays_forward_effect() {
    let mut drawing = drawing();
    let mut stack = OperationStack::default();
    let shape = dot(3.0);

    stack.apply(&mut drawing, Operation::add_shape(shape.clone()));
    stack.undo(&mut drawing);
    assert!(drawing.is_empty());
    assert!(stack.can_redo());

    assert!(stack.redo(&mut drawing));
    assert_eq!(drawing.shapes(), &[shape]);
    assert!(!stack.can_redo());
    assert!(stack.can_undo());
}

#[test]
fn apply_invalidates_redo_buffer() {
    let mut drawing = drawing();
    let mut stack = OperationStack::default();

    stack.apply(&mut drawing, Operation::add_shape(dot(1.0)));
    stack.undo(&mut drawing);
    let replacement = dot(2.0);
    stack.apply(&mut drawing, Operation::add_shape(replacement.clone()));

    assert!(!stack.can_redo());
    assert!(!stack.redo(&mut drawing));
    assert_eq!(drawing.shapes(), &[replacement]);
}

#[test]
fn empty_history_is_a_silent_no_op() {
    let mut drawing = drawing();
    let mut stack = OperationStack::default();
    let revision = drawing.revision();

    assert!(!stack.undo(&mut drawing));
    assert!(!stack.redo(&mut drawing));
    assert_eq!(drawing.revision(), revision);
}

#[test]
fn remove_shape_reinserts_at_original_index() {
    let mut drawing = drawing();
    let mut stack = OperationStack::default();
    let shapes: Vec<Shape> = (0..3).map(|i| dot(i as f64 * 10.0)).collect();
    for shape in &shapes {
        stack.apply(&mut drawing, Operation::add_shape(shape.clone()));
    }

    let middle = shapes[1].id();
    let operation = Operation::remove_shape(&drawing, middle).unwrap();
    stack.apply(&mut drawing, operation);
    assert_eq!(drawing.len(), 2);
    assert!(drawing.shape(middle).is_none());

    stack.undo(&mut drawing);
    assert_eq!(drawing.shapes(), shapes.as_slice());
}

#[test]
fn remove_of_unknown_shape_is_not_an_operation() {
    let drawing = drawing();
    assert!(Operation::remove_shape(&drawing, uuid::Uuid::new_v4()).is_none());
}

#[test]
fn clear_round_trips() {
    let mut drawing = drawing();
    let mut stack = OperationStack::default();
    stack.apply(&mut drawing, Operation::add_shape(dot(1.0)));
    stack.apply(&mut drawing, Operation::add_shape(dot(2.0)));
    let before = drawing.shapes().to_vec();

    let clear = Operation::clear(&drawing);
    stack.apply(&mut drawing, clear);
    assert!(drawing.is_empty());

    stack.undo(&mut drawing);
    assert_eq!(drawing.shapes(), before.as_slice());
    stack.redo(&mut drawing);
    assert!(drawing.is_empty());
}

#[test]
fn history_changes_are_broadcast() {
    let bus = EventBus::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    bus.subscribe(move |event: &EngineEvent| sink.borrow_mut().push(*event));

    let mut drawing = drawing();
    let mut stack = OperationStack::new(bus);
    stack.apply(&mut drawing, Operation::add_shape(dot(1.0)));
    stack.undo(&mut drawing);
    stack.redo(&mut drawing);
    stack.undo(&mut drawing);
    stack.undo(&mut drawing);

    assert_eq!(
        seen.borrow().as_slice(),
        &[
            EngineEvent::OperationApplied(OperationKind::AddShape),
            EngineEvent::OperationUndone(OperationKind::AddShape),
            EngineEvent::OperationRedone(OperationKind::AddShape),
            EngineEvent::OperationUndone(OperationKind::AddShape),
        ]
    );
}

#[test]
fn duplicate_ids_undo_the_shape_that_was_added() {
    let a = dot(1.0);
    let b = dot(2.0);
    let mut drawing = Drawing::with_shapes(Size::new(200.0, 200.0), vec![a.clone(), b.clone()]);
    let mut stack = OperationStack::default();

    stack.apply(&mut drawing, Operation::add_shape(a.clone()));
    assert_eq!(drawing.shapes(), &[a.clone(), b.clone(), a.clone()]);
    assert!(stack.undo(&mut drawing));
    assert_eq!(drawing.shapes(), &[a.clone(), b.clone()]);
}

#[test]
fn duplicate_ids_remove_the_captured_position() {
    let a = dot(1.0);
    let b = dot(2.0);
    let mut drawing =
        Drawing::with_shapes(Size::new(200.0, 200.0), vec![a.clone(), b.clone(), a.clone()]);
    let mut stack = OperationStack::default();
    let remove_top = Operation::RemoveShape {
        shape: a.clone(),
        index: 2,
    };

    stack.apply(&mut drawing, remove_top);
    assert_eq!(drawing.shapes(), &[a.clone(), b.clone()]);
    assert!(stack.undo(&mut drawing));
    assert_eq!(drawing.shapes(), &[a.clone(), b.clone(), a.clone()]);
}
