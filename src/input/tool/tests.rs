use super::*;
use crate::draw::{Drawing, Raster, color};
use crate::util::Size;
use std::cell::RefCell;
use std::rc::Rc;

struct Fixture {
    drawing: Drawing,
    stack: OperationStack,
    settings: UserSettings,
}

impl Fixture {
    fn new() -> Self {
        Self {
            drawing: Drawing::new(Size::new(320.0, 240.0)),
            stack: OperationStack::default(),
            settings: UserSettings {
                stroke_color: color::RED.with_alpha(0.4),
                stroke_width: 6.0,
                ..UserSettings::default()
            },
        }
    }

    fn ctx(&mut self) -> ToolOperationContext<'_> {
        ToolOperationContext {
            drawing: &mut self.drawing,
            operation_stack: &mut self.stack,
            user_settings: &self.settings,
        }
    }
}

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

#[test]
fn pen_drag_commits_one_shape_with_one_segment() {
    let mut fx = Fixture::new();
    let mut pen = PenTool::pen(false);

    pen.handle_drag_start(&mut fx.ctx(), p(0.0, 0.0));
    pen.handle_drag_continue(&mut fx.ctx(), p(5.0, 5.0), Vector::new(1.0, 1.0));
    pen.handle_drag_end(&mut fx.ctx(), p(5.0, 5.0));

    assert_eq!(fx.drawing.len(), 1);
    let Shape::Pen(shape) = &fx.drawing.shapes()[0] else {
        panic!("expected a pen shape");
    };
    assert_eq!(shape.segments.len(), 1);
    assert_eq!(shape.segments[0].a, p(0.0, 0.0));
    assert_eq!(shape.segments[0].b, p(5.0, 5.0));
    assert!(shape.is_finished);
    assert!(fx.stack.can_undo());
    assert!(!pen.is_drawing());

    assert!(fx.stack.undo(&mut fx.drawing));
    assert!(fx.drawing.is_empty());
    assert!(!fx.stack.can_undo());
}

#[test]
fn drag_start_forces_opaque_stroke_until_commit() {
    let mut fx = Fixture::new();
    let mut pen = PenTool::pen(false);

    pen.handle_drag_start(&mut fx.ctx(), p(1.0, 1.0));
    let Some(Shape::Pen(in_progress)) = pen.shape_in_progress() else {
        panic!("expected a pen shape in progress");
    };
    assert_eq!(in_progress.stroke_color.a, 1.0);
    assert!(!in_progress.is_finished);
    assert!((pen.stroke().alpha() - 0.4).abs() < 1e-9);
    assert_eq!(pen.stroke().drawing_size(), Size::new(320.0, 240.0));

    pen.handle_drag_continue(&mut fx.ctx(), p(9.0, 1.0), Vector::ZERO);
    pen.handle_drag_end(&mut fx.ctx(), p(9.0, 1.0));
    let Shape::Pen(committed) = &fx.drawing.shapes()[0] else {
        panic!("expected a pen shape");
    };
    assert!((committed.stroke_color.a - 0.4).abs() < 1e-9);
}

#[test]
fn repeated_point_adds_no_segment() {
    let mut fx = Fixture::new();
    let mut pen = PenTool::pen(false);

    pen.handle_drag_start(&mut fx.ctx(), p(0.0, 0.0));
    pen.handle_drag_continue(&mut fx.ctx(), p(0.0, 0.0), Vector::ZERO);
    pen.handle_drag_continue(&mut fx.ctx(), p(4.0, 0.0), Vector::ZERO);
    pen.handle_drag_continue(&mut fx.ctx(), p(4.0, 0.0), Vector::ZERO);

    let Some(Shape::Pen(shape)) = pen.shape_in_progress() else {
        panic!("expected a pen shape in progress");
    };
    assert_eq!(shape.segments.len(), 1);
}

#[test]
fn cancel_commits_nothing() {
    let mut fx = Fixture::new();
    let mut pen = PenTool::pen(false);

    pen.handle_drag_start(&mut fx.ctx(), p(0.0, 0.0));
    pen.handle_drag_continue(&mut fx.ctx(), p(20.0, 0.0), Vector::ZERO);
    pen.handle_drag_cancel(&mut fx.ctx(), p(20.0, 0.0));

    assert!(fx.drawing.is_empty());
    assert!(!fx.stack.can_undo());
    assert_eq!(fx.drawing.revision(), 0);
    assert!(pen.shape_in_progress().is_none());
}

#[test]
fn callbacks_without_drag_are_no_ops() {
    let mut fx = Fixture::new();
    for tool in Tool::ALL {
        let mut tools = ToolSet::default();
        let tool = tools.get_mut(tool);
        tool.handle_drag_continue(&mut fx.ctx(), p(3.0, 3.0), Vector::ZERO);
        tool.handle_drag_end(&mut fx.ctx(), p(3.0, 3.0));
        tool.handle_drag_cancel(&mut fx.ctx(), p(3.0, 3.0));
    }
    assert!(fx.drawing.is_empty());
    assert!(!fx.stack.can_undo());
}

#[test]
fn velocity_based_width_widens_fast_segments() {
    let mut fx = Fixture::new();
    let mut pen = PenTool::pen(true);

    pen.handle_drag_start(&mut fx.ctx(), p(0.0, 0.0));
    pen.handle_drag_continue(&mut fx.ctx(), p(10.0, 0.0), Vector::new(60.0, 0.0));
    pen.handle_drag_continue(&mut fx.ctx(), p(40.0, 0.0), Vector::new(360.0, 0.0));

    let Some(Shape::Pen(shape)) = pen.shape_in_progress() else {
        panic!("expected a pen shape in progress");
    };
    assert!(shape.segments[1].width > shape.segments[0].width);
}

#[test]
fn constant_width_ignores_velocity() {
    let mut fx = Fixture::new();
    let mut pen = PenTool::pen(false);

    pen.handle_drag_start(&mut fx.ctx(), p(0.0, 0.0));
    pen.handle_drag_continue(&mut fx.ctx(), p(10.0, 0.0), Vector::new(5000.0, 0.0));

    let Some(Shape::Pen(shape)) = pen.shape_in_progress() else {
        panic!("expected a pen shape in progress");
    };
    assert_eq!(shape.segments[0].width, 6.0);
}

#[test]
fn eraser_marks_shapes_and_renders_incrementally() {
    let mut fx = Fixture::new();
    let mut eraser = PenTool::eraser();
    eraser.set_velocity_based_width(true);
    assert!(!eraser.velocity_based_width());
    assert_eq!(eraser.kind(), Tool::Eraser);
    assert_eq!(eraser.render_mode(), RenderMode::Incremental);
    assert_eq!(PenTool::pen(false).render_mode(), RenderMode::Buffered);

    eraser.handle_drag_start(&mut fx.ctx(), p(0.0, 0.0));
    eraser.handle_drag_continue(&mut fx.ctx(), p(15.0, 0.0), Vector::ZERO);
    eraser.handle_drag_end(&mut fx.ctx(), p(15.0, 0.0));

    let Shape::Pen(shape) = &fx.drawing.shapes()[0] else {
        panic!("expected a pen shape");
    };
    assert!(shape.is_eraser);
}

#[test]
fn lasso_records_end_anchor() {
    let mut fx = Fixture::new();
    fx.settings.fill_color = Some(color::GREEN);
    let mut lasso = LassoTool::new();

    lasso.handle_drag_start(&mut fx.ctx(), p(0.0, 0.0));
    lasso.handle_drag_continue(&mut fx.ctx(), p(30.0, 0.0), Vector::ZERO);
    lasso.handle_drag_continue(&mut fx.ctx(), p(30.0, 30.0), Vector::ZERO);
    lasso.handle_drag_end(&mut fx.ctx(), p(31.0, 31.0));

    let Shape::Lasso(shape) = &fx.drawing.shapes()[0] else {
        panic!("expected a lasso shape");
    };
    assert_eq!(shape.end, Some(p(31.0, 31.0)));
    assert_eq!(shape.fill_color, Some(color::GREEN));
    assert!(shape.pen.is_finished);
    assert!(shape.hit_test(p(20.0, 5.0)));
}

#[test]
fn rect_follows_pointer_and_commits() {
    let mut fx = Fixture::new();
    let mut rect = RectTool::new();
    assert_eq!(rect.render_mode(), RenderMode::Full);

    rect.handle_drag_start(&mut fx.ctx(), p(10.0, 10.0));
    rect.handle_drag_continue(&mut fx.ctx(), p(50.0, 30.0), Vector::ZERO);
    let Some(Shape::Rect(in_progress)) = rect.shape_in_progress() else {
        panic!("expected a rect in progress");
    };
    assert_eq!(in_progress.b, p(50.0, 30.0));

    rect.handle_drag_end(&mut fx.ctx(), p(60.0, 40.0));
    let Shape::Rect(shape) = &fx.drawing.shapes()[0] else {
        panic!("expected a rect shape");
    };
    assert_eq!(shape.rect(), crate::util::Rect::new(10.0, 10.0, 50.0, 30.0));
    assert!(shape.is_finished);
}

fn solid_image() -> MagicWandImage {
    MagicWandImage {
        image: Raster::from_rgba(1, 1, &[0, 0, 255, 255]),
        draw_size: Size::new(64.0, 48.0),
    }
}

#[test]
fn magic_wand_consults_generator_at_start_and_end() {
    let mut fx = Fixture::new();
    let calls = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&calls);
    let mut wand = MagicWandTool::new();
    wand.set_generator(move |points: &[Point]| {
        log.borrow_mut().push(points.len());
        solid_image()
    });

    wand.handle_drag_start(&mut fx.ctx(), p(0.0, 0.0));
    wand.handle_drag_continue(&mut fx.ctx(), p(10.0, 0.0), Vector::ZERO);
    wand.handle_drag_continue(&mut fx.ctx(), p(20.0, 0.0), Vector::ZERO);
    assert_eq!(wand.points().len(), 3);
    wand.handle_drag_end(&mut fx.ctx(), p(20.0, 0.0));

    assert_eq!(calls.borrow().as_slice(), &[1, 3]);
    assert!(wand.points().is_empty());
    let Shape::MagicWand(shape) = &fx.drawing.shapes()[0] else {
        panic!("expected a magic wand shape");
    };
    assert!(shape.image.is_some());
    assert_eq!(shape.draw_size, Size::new(64.0, 48.0));
    assert!(!shape.pen.is_eraser);
}

#[test]
fn magic_wand_without_image_keeps_vector_stroke() {
    let mut fx = Fixture::new();
    let mut wand = MagicWandTool::new();
    wand.set_generator(|_: &[Point]| MagicWandImage::default());

    wand.handle_drag_start(&mut fx.ctx(), p(0.0, 0.0));
    wand.handle_drag_continue(&mut fx.ctx(), p(12.0, 0.0), Vector::ZERO);
    wand.handle_drag_end(&mut fx.ctx(), p(12.0, 0.0));

    let Shape::MagicWand(shape) = &fx.drawing.shapes()[0] else {
        panic!("expected a magic wand shape");
    };
    assert!(shape.image.is_none());
    assert_eq!(shape.pen.segments.len(), 1);
}

#[test]
fn magic_wand_tap_commits_only_generated_images() {
    let mut fx = Fixture::new();
    let mut wand = MagicWandTool::new();

    wand.handle_tap(&mut fx.ctx(), p(7.0, 7.0));
    assert!(fx.drawing.is_empty());

    wand.set_generator(|points: &[Point]| {
        assert_eq!(points, &[Point::new(7.0, 7.0)]);
        solid_image()
    });
    wand.handle_tap(&mut fx.ctx(), p(7.0, 7.0));
    assert_eq!(fx.drawing.len(), 1);
    assert!(matches!(&fx.drawing.shapes()[0], Shape::MagicWand(shape) if shape.image.is_some()));
}

#[test]
fn magic_wand_image_without_size_covers_the_drawing() {
    let mut fx = Fixture::new();
    let mut wand = MagicWandTool::new();
    wand.set_generator(|_: &[Point]| MagicWandImage {
        draw_size: Size::ZERO,
        ..solid_image()
    });

    wand.handle_drag_start(&mut fx.ctx(), p(0.0, 0.0));
    wand.handle_drag_continue(&mut fx.ctx(), p(12.0, 0.0), Vector::ZERO);
    wand.handle_drag_end(&mut fx.ctx(), p(12.0, 0.0));
    wand.handle_tap(&mut fx.ctx(), p(3.0, 3.0));

    for shape in fx.drawing.shapes() {
        let Shape::MagicWand(shape) = shape else {
            panic!("expected a magic wand shape");
        };
        assert_eq!(shape.draw_size, Size::new(320.0, 240.0));
    }
    assert_eq!(fx.drawing.len(), 2);
}

#[test]
fn tool_set_resolves_every_selector() {
    let tools = ToolSet::new(true);
    for tool in Tool::ALL {
        assert_eq!(tools.get(tool).kind(), tool);
    }
    assert!(tools.pen.velocity_based_width());
    assert_eq!(Tool::MagicWand.to_string(), "Magic Wand");
}
