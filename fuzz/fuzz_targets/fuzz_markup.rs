#![no_main]

use curtain_widgets::markup::{Content, Emphasis};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if text.len() > 4096 {
        return;
    }

    let content = Content::parse(text);
    let segments = content.segments();

    // At most one plain segment followed by at most one bold segment.
    assert!(segments.len() <= 2);
    if let [first, second] = segments {
        assert_eq!(first.emphasis, Emphasis::Plain);
        assert_eq!(second.emphasis, Emphasis::Bold);
    }
    for segment in segments {
        assert!(!segment.text.is_empty());
        assert!(!segment.text.contains("**"));
    }

    // Dropping the delimiters loses no other text.
    let joined: String = segments.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(joined, text.replace("**", ""));

    let _ = content.to_html();
});
