use crate::{Overlap, Rect};

/// Classifies how the keyboard relates to a candidate container.
///
/// `container` and `keyboard` are window-coordinate frames. The keyboard is
/// assumed to be docked at the bottom of the screen, so its top edge is
/// `screen_height - keyboard.height`.
///
/// The three-way split gates the adjustment: the bottom-inset increase runs
/// unless the result is `Unknown` or `NotOverlapping`; the fine caret offset
/// runs only on exactly `Overlapping`.
pub fn classify(container: Option<Rect>, keyboard: Option<Rect>, screen_height: f32) -> Overlap {
    let (Some(container), Some(keyboard)) = (container, keyboard) else {
        return Overlap::Unknown;
    };

    let keyboard_top = screen_height - keyboard.height;

    if container.top() > keyboard_top {
        Overlap::Obscured
    } else if container.bottom() < keyboard_top {
        Overlap::NotOverlapping
    } else {
        Overlap::Overlapping
    }
}
