use keyboard_avoider::{AvoiderOptions, Curve, Event, KeyboardInfo, Rect, Size};
use keyboard_avoider_adapter::Controller;
use keyboard_avoider_adapter::sim::{SimTree, SimView};

const CONTAINER: u64 = 1;
const INPUT: u64 = 2;

fn main() {
    let mut tree = SimTree::new(800.0);
    tree.insert(
        CONTAINER,
        SimView {
            frame: Rect::new(0.0, 0.0, 400.0, 600.0),
            scroll_container: true,
            scroll_enabled: true,
            content_size: Size {
                width: 400.0,
                height: 1000.0,
            },
            ..Default::default()
        },
    );
    tree.insert(
        INPUT,
        SimView {
            parent: Some(CONTAINER),
            frame: Rect::new(0.0, 520.0, 400.0, 60.0),
            multiline: true,
            caret: Some(Rect::new(0.0, 25.0, 2.0, 5.0)),
            ..Default::default()
        },
    );

    let mut controller = Controller::new(AvoiderOptions::new());

    let keyboard =
        KeyboardInfo::new(Rect::new(0.0, 500.0, 400.0, 300.0)).with_animation(250, Curve::EaseOut);
    controller.dispatch(Event::FocusGained(INPUT), &mut tree, 0);
    controller.dispatch(Event::KeyboardWillShow(keyboard), &mut tree, 0);

    for now_ms in (0..=250).step_by(50) {
        controller.tick(now_ms, &mut tree);
        let container = tree.get(CONTAINER).unwrap();
        println!(
            "t={now_ms:3}ms inset.bottom={:6.1} offset.y={:6.1}",
            container.content_inset.bottom, container.content_offset.y
        );
    }

    controller.dispatch(Event::KeyboardWillHide, &mut tree, 300);
    let container = tree.get(CONTAINER).unwrap();
    println!(
        "after hide inset.bottom={:6.1} (restored)",
        container.content_inset.bottom
    );
}
