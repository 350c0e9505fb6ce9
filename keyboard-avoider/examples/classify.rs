use keyboard_avoider::{Rect, classify};

fn main() {
    let screen_height = 800.0;
    let keyboard = Rect::new(0.0, 500.0, 400.0, 300.0);

    for (label, container) in [
        ("under the keyboard", Rect::new(0.0, 600.0, 400.0, 150.0)),
        ("above the keyboard", Rect::new(0.0, 100.0, 400.0, 200.0)),
        ("partially covered", Rect::new(0.0, 400.0, 400.0, 200.0)),
    ] {
        let class = classify(Some(container), Some(keyboard), screen_height);
        println!("{label}: {class:?}");
    }

    println!(
        "no container: {:?}",
        classify(None, Some(keyboard), screen_height)
    );
}
