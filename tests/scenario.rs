//! End-to-end editing scenarios over the pure core: session mutations,
//! style controls, drag gestures and the visual tree. Rasterization
//! itself runs through the native backend and is exercised by the CLI,
//! not here.

use memetica::canvas::{NodeBounds, VisualTree, CANVAS_HEIGHT, CANVAS_WIDTH};
use memetica::drag::DragController;
use memetica::editor::{Editor, Event};
use memetica::session::{BaseImage, Position, Session};
use memetica::style::StyleEditor;

use pretty_assertions::assert_eq;

fn base(id: &str, name: &str) -> BaseImage {
    BaseImage {
        id: id.into(),
        name: name.into(),
        url: format!("https://i.imgflip.com/{id}.jpg"),
    }
}

#[test]
fn single_layer_edit_scenario() {
    // select base A -> add layer -> text "TOP" -> move to (50, 20)
    let mut editor = Editor::new(base("1bij", "One Does Not Simply"));
    editor.apply(Event::AddLayer);
    editor.apply(Event::EditText("TOP".into()));
    let id = editor.session().active_id().unwrap();
    editor.apply(Event::MoveLayer(id, Position::new(50.0, 20.0)));

    let tree = VisualTree::build(editor.session());
    assert_eq!(tree.base.key, "https://i.imgflip.com/1bij.jpg");
    assert_eq!(tree.texts.len(), 1);
    assert_eq!(tree.texts[0].text, "TOP");
    assert_eq!(tree.texts[0].position, Position::new(50.0, 20.0));
    assert_eq!((tree.width, tree.height), (CANVAS_WIDTH, CANVAS_HEIGHT));
}

#[test]
fn style_edits_only_touch_the_newest_layer() {
    let mut editor = Editor::new(base("30b1gx", "Drake Hotline Bling"));
    for _ in 0..3 {
        editor.apply(Event::AddLayer);
    }
    editor.apply(Event::EditText("BOTTOM".into()));
    editor.apply(Event::EditFontSize(150.0));
    editor.apply(Event::EditColor("#FFFFFF".into()));

    let layers = editor.session().layers();
    for layer in &layers[..2] {
        assert_eq!(layer.text, "");
        assert_eq!(layer.font_size, 24.0);
    }
    assert_eq!(layers[2].text, "BOTTOM");
    // clamped by the control before reaching the model
    assert_eq!(layers[2].font_size, 100.0);
    assert_eq!(layers[2].color, "#FFFFFF".parse().unwrap());
}

#[test]
fn edits_before_any_layer_never_panic() {
    let mut editor = Editor::new(base("1g8my4", "Two Buttons"));
    let before = editor.session().snapshot();
    editor.apply(Event::EditText("TOP".into()));
    editor.apply(Event::EditFontSize(60.0));
    editor.apply(Event::EditColor("#123456".into()));
    editor.apply(Event::PointerUp);
    assert_eq!(editor.session(), &before);
}

#[test]
fn drag_commits_to_the_layer_grabbed_at_pointer_down() {
    // a layer appended mid-drag must not steal the position update
    let mut session = Session::new(base("30b1gx", "Drake Hotline Bling"));
    let first = session.add_layer();

    let bounds = [NodeBounds {
        layer: first,
        x: 10.0,
        y: 10.0,
        w: 80.0,
        h: 28.0,
    }];
    let mut drag = DragController::new();
    drag.pointer_down(&bounds, 14.0, 12.0);
    assert_eq!(drag.dragged_layer(), Some(first));

    let second = session.add_layer();
    drag.pointer_move(54.0, 22.0);
    let commit = drag.pointer_up(&mut session).unwrap();

    assert_eq!(commit.0, first);
    assert_eq!(session.layer(first).unwrap().position, Position::new(50.0, 20.0));
    assert_eq!(session.layer(second).unwrap().position, Position::new(10.0, 10.0));
}

#[test]
fn drag_picks_the_topmost_layer_under_the_pointer() {
    let mut session = Session::new(base("1bij", "One Does Not Simply"));
    let below = session.add_layer();
    let above = session.add_layer();

    let bounds = [
        NodeBounds {
            layer: below,
            x: 10.0,
            y: 10.0,
            w: 100.0,
            h: 30.0,
        },
        NodeBounds {
            layer: above,
            x: 10.0,
            y: 10.0,
            w: 100.0,
            h: 30.0,
        },
    ];
    let mut drag = DragController::new();
    drag.pointer_down(&bounds, 20.0, 20.0);
    assert_eq!(drag.dragged_layer(), Some(above));
}

#[test]
fn pointer_events_are_noops_before_the_first_render() {
    let mut editor = Editor::new(base("1bij", "One Does Not Simply"));
    editor.apply(Event::AddLayer);
    let before = editor.session().snapshot();

    editor.apply(Event::PointerDown { x: 12.0, y: 12.0 });
    assert!(!editor.drag().is_dragging());
    editor.apply(Event::PointerMove { x: 50.0, y: 50.0 });
    editor.apply(Event::PointerUp);
    assert_eq!(editor.session(), &before);
}

#[test]
fn selecting_another_base_discards_the_session() {
    let mut editor = Editor::new(base("1bij", "One Does Not Simply"));
    editor.apply(Event::AddLayer);
    editor.apply(Event::EditText("TOP".into()));

    editor.apply(Event::SelectBase(base("1g8my4", "Two Buttons")));
    assert!(editor.session().layers().is_empty());
    assert_eq!(editor.session().base_image().id, "1g8my4");
    assert!(!editor.drag().is_dragging());
    assert!(editor.canvas().mounted().is_none());
}

#[test]
fn visual_tree_is_a_pure_function_of_the_session() {
    let mut editor = Editor::new(base("30b1gx", "Drake Hotline Bling"));
    editor.apply(Event::AddLayer);
    editor.apply(Event::EditText("same".into()));
    editor.apply(Event::EditFontSize(42.0));

    let snapshot = editor.session().snapshot();
    assert_eq!(VisualTree::build(&snapshot), VisualTree::build(&snapshot));
    assert_eq!(
        VisualTree::build(editor.session()),
        VisualTree::build(&snapshot)
    );
}

#[test]
fn displayed_style_values_follow_the_active_layer() {
    let mut session = Session::new(base("1g8my4", "Two Buttons"));
    let style = StyleEditor;
    assert_eq!(style.displayed_font_size(&session), 24.0);

    session.add_layer();
    style.set_font_size(&mut session, 64.0);
    style.set_color(&mut session, "#00FF00");
    assert_eq!(style.displayed_font_size(&session), 64.0);
    assert_eq!(style.displayed_color(&session), "#00FF00".parse().unwrap());

    session.add_layer();
    assert_eq!(style.displayed_font_size(&session), 24.0);
}
