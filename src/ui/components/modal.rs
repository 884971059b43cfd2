//! Modal dialog renderer.
//!
//! Draws a bordered box centered over whatever was rendered before it:
//!
//! ```text
//! ┌─ Rent Camping tent ──────────────────┐
//! │ Enter your details to rent this item.│
//! │                                      │
//! │ Name     Kim█                        │
//! │ [x] I understand the rental period…  │
//! │                                      │
//! │ Tab: next  Enter: rent  Esc: cancel  │
//! └──────────────────────────────────────┘
//! ```

use crate::ui::helpers::{char_len, pad, position_cursor, truncate, wrap_text};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ModalLine, ModalView};

const MAX_BOX_WIDTH: usize = 64;
const LABEL_WIDTH: usize = 13;

/// A content line together with its color.
struct Styled {
    text: String,
    style: String,
}

fn layout_lines(modal: &ModalView, theme: &Theme, inner: usize) -> Vec<Styled> {
    let normal = Theme::fg(&theme.colors.text_normal);
    let accent = format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.accent_fg));
    let mut out = Vec::new();

    for line in &modal.lines {
        match line {
            ModalLine::Text(text) => out.extend(wrap_text(text, inner).into_iter().map(|text| Styled {
                text,
                style: normal.clone(),
            })),
            ModalLine::Emphasis(text) => out.extend(wrap_text(text, inner).into_iter().map(|text| Styled {
                text,
                style: accent.clone(),
            })),
            ModalLine::Field { label, value, focused } => {
                let cursor = if *focused { "█" } else { "" };
                let value_width = inner.saturating_sub(LABEL_WIDTH + 1);
                let shown: String = {
                    let chars: Vec<char> = value.chars().collect();
                    chars[chars.len().saturating_sub(value_width)..].iter().collect()
                };
                out.push(Styled {
                    text: format!("{}{shown}{cursor}", pad(label, LABEL_WIDTH)),
                    style: if *focused { accent.clone() } else { normal.clone() },
                });
            }
            ModalLine::Checkbox { label, checked, focused } => {
                let mark = if *checked { "x" } else { " " };
                out.push(Styled {
                    text: truncate(&format!("[{mark}] {label}"), inner),
                    style: if *focused { accent.clone() } else { normal.clone() },
                });
            }
            ModalLine::Blank => out.push(Styled {
                text: String::new(),
                style: normal.clone(),
            }),
        }
    }

    if let Some(error) = &modal.error {
        out.push(Styled {
            text: String::new(),
            style: normal.clone(),
        });
        let error_style = Theme::fg(&theme.colors.flash_error_fg);
        out.extend(wrap_text(error, inner).into_iter().map(|text| Styled {
            text,
            style: error_style.clone(),
        }));
    }

    out.push(Styled {
        text: String::new(),
        style: normal,
    });
    out.push(Styled {
        text: truncate(&modal.hint, inner),
        style: Theme::fg(&theme.colors.text_dim),
    });
    out
}

/// Renders the modal centered in a `rows` x `cols` frame.
pub fn render_modal(modal: &ModalView, theme: &Theme, rows: usize, cols: usize) {
    let width = cols.saturating_sub(4).min(MAX_BOX_WIDTH).max(12);
    let inner = width.saturating_sub(4);
    let lines = layout_lines(modal, theme, inner);

    let height = (lines.len() + 2).min(rows.max(3));
    let top = rows.saturating_sub(height) / 2 + 1;
    let left = cols.saturating_sub(width) / 2 + 1;
    let border = Theme::fg(&theme.colors.modal_border);

    let title = truncate(&format!(" {} ", modal.title), width.saturating_sub(4));
    position_cursor(top, left);
    print!("{border}┌─{}", Theme::bold());
    print!("{title}");
    print!("{}{border}", Theme::reset());
    print!("{}┐", "─".repeat(width.saturating_sub(3 + char_len(&title))));

    for (offset, line) in lines.iter().take(height.saturating_sub(2)).enumerate() {
        position_cursor(top + 1 + offset, left);
        print!("{border}│ {}", Theme::reset());
        print!("{}{}", line.style, line.text);
        print!("{}", " ".repeat(inner.saturating_sub(char_len(&line.text))));
        print!("{}{border} │", Theme::reset());
    }

    position_cursor(top + height.saturating_sub(1), left);
    print!("{border}└{}┘", "─".repeat(width.saturating_sub(2)));
    print!("{}", Theme::reset());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_fit_inside_the_box() {
        let modal = ModalView {
            title: "Return reminder".to_string(),
            lines: vec![
                ModalLine::Emphasis(
                    "Hello Kim Cheolsu, this is the rental desk. Your rented item 'Bluetooth speaker' is overdue."
                        .to_string(),
                ),
                ModalLine::Field {
                    label: "Contact".to_string(),
                    value: "0".repeat(80),
                    focused: true,
                },
            ],
            error: Some("contact must contain digits only".to_string()),
            hint: "c: copy  Esc: close".to_string(),
        };

        let lines = layout_lines(&modal, &Theme::default(), 30);
        assert!(lines.iter().all(|line| char_len(&line.text) <= 30));
        assert_eq!(lines.last().map(|line| line.text.as_str()), Some("c: copy  Esc: close"));
    }
}
