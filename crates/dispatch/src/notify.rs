//! Topmost message-box notification sink.

/// Display cap for the notification body; the clipboard always gets the
/// full text.
pub const DISPLAY_CAP: usize = 2000;

const TRUNCATION_NOTICE: &str =
    "\n\n...(Content truncated. Full text has been copied to the clipboard)";

/// Shorten `text` for message-box display.
pub fn display_text(text: &str) -> String {
    if text.is_empty() {
        return "(empty)".to_string();
    }
    if text.chars().count() <= DISPLAY_CAP {
        return text.to_string();
    }
    let mut shown: String = text.chars().take(DISPLAY_CAP).collect();
    shown.push_str(TRUNCATION_NOTICE);
    shown
}

/// Modal always-on-top message box, used for errors and final results.
#[cfg(windows)]
pub fn message_box_top(title: &str, text: &str) {
    use windows::core::PCWSTR;
    use windows::Win32::UI::WindowsAndMessaging::{
        MessageBoxW, MB_OK, MB_SETFOREGROUND, MB_TOPMOST,
    };

    let text_w = wide(text);
    let title_w = wide(title);
    unsafe {
        let _ = MessageBoxW(
            None,
            PCWSTR(text_w.as_ptr()),
            PCWSTR(title_w.as_ptr()),
            MB_OK | MB_TOPMOST | MB_SETFOREGROUND,
        );
    }
}

#[cfg(windows)]
fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_gets_a_placeholder() {
        assert_eq!(display_text(""), "(empty)");
    }

    #[test]
    fn short_text_passes_through() {
        assert_eq!(display_text("two lines\nof text"), "two lines\nof text");

        let exactly_cap = "x".repeat(DISPLAY_CAP);
        assert_eq!(display_text(&exactly_cap), exactly_cap);
    }

    #[test]
    fn long_text_is_truncated_with_a_notice() {
        let long = "y".repeat(DISPLAY_CAP + 500);
        let shown = display_text(&long);
        assert!(shown.starts_with(&"y".repeat(DISPLAY_CAP)));
        assert!(shown.ends_with(TRUNCATION_NOTICE));
        assert_eq!(shown.chars().count(), DISPLAY_CAP + TRUNCATION_NOTICE.chars().count());
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let long = "界".repeat(DISPLAY_CAP + 1);
        let shown = display_text(&long);
        assert!(shown.starts_with(&"界".repeat(DISPLAY_CAP)));
        assert!(shown.ends_with(TRUNCATION_NOTICE));
    }
}
