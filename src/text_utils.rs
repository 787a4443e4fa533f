// src/text_utils.rs
// Utility functions for text formatting

use unicode_segmentation::UnicodeSegmentation;

/// Display width in grapheme clusters.
pub fn grapheme_width(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Center a string within a given width
pub fn pad_centered(text: &str, width: usize) -> String {
    let line_width = grapheme_width(text);
    let pad_left = width.saturating_sub(line_width) / 2;
    let mut content = String::with_capacity(width.max(line_width));
    content.extend(std::iter::repeat_n(' ', pad_left));
    content.push_str(text);
    content
}

/// Wrap text to a given width, breaking at word boundaries
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    textwrap::wrap(text, width.max(1))
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}

/// Text bar of `width` cells filled to `percent`.
pub fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    let mut bar = String::with_capacity(width);
    bar.extend(std::iter::repeat_n('#', filled));
    bar.extend(std::iter::repeat_n('-', width - filled));
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centers_by_graphemes() {
        assert_eq!(pad_centered("ab", 6), "  ab");
        assert_eq!(pad_centered("é!", 4), " é!");
        assert_eq!(pad_centered("toolong", 3), "toolong");
    }

    #[test]
    fn wraps_at_word_boundaries() {
        assert_eq!(wrap_text("stir the sauce gently", 10), vec!["stir the", "sauce", "gently"]);
        assert!(wrap_text("", 10).iter().all(|l| l.is_empty()));
    }

    #[test]
    fn bar_fills_proportionally() {
        assert_eq!(progress_bar(0.0, 6), "------");
        assert_eq!(progress_bar(50.0, 6), "###---");
        assert_eq!(progress_bar(100.0, 6), "######");
        assert_eq!(progress_bar(250.0, 4), "####");
    }
}
