use crate::types::Layout;

const MAX_WIDTH: usize = 80;

/// Draws one layout as a horizontal bar, segments proportional to cut
/// lengths, remnant left blank:
///
/// ```text
/// +--------------------+----------------+---+
/// |X 50                |Y 40            |   |
/// +--------------------+----------------+---+
/// ```
pub fn render_layout(layout: &Layout) -> String {
    if layout.stock_length <= 0.0 {
        return String::new();
    }
    let scale = MAX_WIDTH as f64 / layout.stock_length;

    // Segment boundaries at cumulative cut lengths, snapped to columns
    let mut boundaries = vec![0usize];
    let mut cum = 0.0;
    for c in &layout.cuts {
        cum += c.length;
        boundaries.push(((cum * scale).round() as usize).min(MAX_WIDTH));
    }

    let mut border = vec!['-'; MAX_WIDTH + 1];
    let mut middle = vec![' '; MAX_WIDTH + 1];
    for &b in &boundaries {
        border[b] = '+';
        middle[b] = '|';
    }
    border[MAX_WIDTH] = '+';
    middle[MAX_WIDTH] = '|';

    for (i, c) in layout.cuts.iter().enumerate() {
        let (start, end) = (boundaries[i], boundaries[i + 1]);
        if end <= start + 1 {
            continue;
        }
        let label = format!("{} {}", c.label, c.length);
        for (j, ch) in label.chars().enumerate() {
            let x = start + 1 + j;
            if x >= end {
                break;
            }
            middle[x] = ch;
        }
    }

    let border: String = border.into_iter().collect();
    let middle: String = middle.into_iter().collect();
    format!("{border}\n{middle}\n{border}\n")
}
