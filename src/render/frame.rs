//! Box-drawn braille frame around one chart.
//!
//! Layout, top to bottom: title rule, blank row, `y_chars` graph rows with the
//! y range printed on the first and last, x-label row, subtitle rule. Graph
//! rows are assembled as bytes in a buffer the renderer keeps between frames.

use std::io::Write;

use crate::{
    core::{
        bounds::y_label_width,
        color::{AnsiCode, colorize},
        config::Config,
        constants::{DECIMAL_PRECISION, LABEL_GUTTER},
    },
    render::braille::{BraillePlot, encode_braille_into_frame},
};

/// Two spaces in front, one space behind
const TITLE_PADDING: usize = 3;

// Box-drawing glyphs
const TL: &str = "┌";
const TR: &str = "┐";
const BL: &str = "└";
const BR: &str = "┘";
const H: &str = "─";
const V: &str = "│";

const V_B: &[u8] = V.as_bytes();

/// Write centred colored text between horizontal rules.
fn push_centered(buf: &mut String, text: &str, width: usize, color: &AnsiCode) {
    let inner = width.saturating_sub(TITLE_PADDING);
    let len = text.chars().count();
    if len == 0 || len > inner {
        buf.push_str(&H.repeat(width));
        return;
    }
    let pad_left = (inner - len) / 2;
    let pad_right = inner - len - pad_left;

    buf.push_str(&H.repeat(pad_left));
    buf.push_str("  ");
    buf.push_str(&colorize(color, text));
    buf.push(' ');
    buf.push_str(&H.repeat(pad_right));
}

/// `│ <blank label field> left …… right │`, or a blank row if they don't fit.
fn push_x_labels(
    buf: &mut String,
    labels: Option<&(String, String)>,
    label_width: usize,
    x_chars: usize,
) {
    buf.push_str(V);
    buf.push_str(&" ".repeat(label_width + LABEL_GUTTER));
    match labels {
        Some((left, right)) if left.chars().count() + right.chars().count() < x_chars => {
            let gap = x_chars - left.chars().count() - right.chars().count();
            buf.push_str(left);
            buf.push_str(&" ".repeat(gap));
            buf.push_str(right);
        }
        _ => buf.push_str(&" ".repeat(x_chars)),
    }
    buf.push_str(V);
    buf.push('\n');
}

#[derive(Debug, Default)]
pub struct Renderer {
    graph_buf: Vec<u8>,
}

impl Renderer {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every graph row into `self.graph_buf`.
    fn fill_graph_rows(&mut self, cfg: &Config, plot: &BraillePlot, label_width: usize) {
        let high_label = format!("{:.*}", DECIMAL_PRECISION, cfg.y_range.1);
        let low_label = format!("{:.*}", DECIMAL_PRECISION, cfg.y_range.0);

        let color_seq = cfg.color.to_string();
        let reset_seq = if cfg.color.is_plain() {
            String::new()
        } else {
            AnsiCode::reset().to_string()
        };
        let braille_bytes = cfg.x_chars * 3;
        let prefix_bytes = V_B.len() + label_width + LABEL_GUTTER + color_seq.len();
        let row_bytes = prefix_bytes + braille_bytes + reset_seq.len() + V_B.len();
        let stride = row_bytes + 1;

        self.graph_buf.clear();
        self.graph_buf.resize(stride * cfg.y_chars, b' ');

        for r in 0..cfg.y_chars {
            let base = r * stride;
            self.graph_buf[base..base + V_B.len()].copy_from_slice(V_B);

            let color_start = base + prefix_bytes - color_seq.len();
            self.graph_buf[color_start..color_start + color_seq.len()]
                .copy_from_slice(color_seq.as_bytes());

            let reset_start = base + prefix_bytes + braille_bytes;
            self.graph_buf[reset_start..reset_start + reset_seq.len()]
                .copy_from_slice(reset_seq.as_bytes());
            let border_start = reset_start + reset_seq.len();
            self.graph_buf[border_start..border_start + V_B.len()].copy_from_slice(V_B);

            self.graph_buf[base + row_bytes] = b'\n';
        }

        // right-aligned y labels on the first and last rows
        let top_off = V_B.len() + label_width - high_label.len();
        self.graph_buf[top_off..top_off + high_label.len()].copy_from_slice(high_label.as_bytes());
        let last_row_base = (cfg.y_chars - 1) * stride;
        let bot_off = last_row_base + V_B.len() + label_width - low_label.len();
        self.graph_buf[bot_off..bot_off + low_label.len()].copy_from_slice(low_label.as_bytes());

        encode_braille_into_frame(
            &mut self.graph_buf,
            prefix_bytes,
            stride,
            plot,
            cfg.x_chars,
            cfg.y_chars,
        );
    }

    /// Write the whole frame to `out`.
    pub fn render<W: Write>(
        &mut self,
        cfg: &Config,
        plot: &BraillePlot,
        out: &mut W,
    ) -> std::io::Result<()> {
        let label_width = y_label_width(cfg.y_range, DECIMAL_PRECISION);
        let inner = cfg.x_chars + label_width + LABEL_GUTTER;
        let blank_row = format!("{V}{}{V}\n", " ".repeat(inner));

        let mut top = String::new();
        top.push_str(TL);
        push_centered(&mut top, &cfg.title, inner, &cfg.color);
        top.push_str(TR);
        top.push('\n');
        top.push_str(&blank_row);

        let mut bot = String::new();
        push_x_labels(&mut bot, cfg.x_labels.as_ref(), label_width, cfg.x_chars);
        bot.push_str(BL);
        match &cfg.subtitle {
            Some(sub) => push_centered(&mut bot, sub, inner, &cfg.color),
            None => bot.push_str(&H.repeat(inner)),
        }
        bot.push_str(BR);
        bot.push('\n');

        self.fill_graph_rows(cfg, plot, label_width);

        out.write_all(top.as_bytes())?;
        out.write_all(&self.graph_buf)?;
        out.write_all(bot.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::braille::GraphStep;

    fn frame(cfg: &Config, plot: &BraillePlot) -> Vec<String> {
        let mut out = Vec::new();
        Renderer::new().render(cfg, plot, &mut out).unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn plain_frame_has_uniform_width() {
        let cfg = Config::builder(30, 7)
            .title("Line Chart for cases")
            .subtitle_opt(Some("x: Index · y: cases".into()))
            .y_range((1.0, 100.0))
            .x_labels("0", "4")
            .color(AnsiCode::Plain)
            .build()
            .unwrap();
        let full = Some(GraphStep { min: 0, max: 27 });
        let plot = BraillePlot {
            steps: vec![full, full],
        };
        let lines = frame(&cfg, &plot);
        // title, blank, 7 graph rows, x labels, subtitle
        assert_eq!(lines.len(), 11);
        let width = lines[0].chars().count();
        assert!(lines.iter().all(|l| l.chars().count() == width));
        assert!(lines[0].contains("Line Chart for cases"));
        assert!(lines[2].starts_with("│100.0 ⣿"));
        assert!(lines[8].starts_with("│  1.0 ⣿"));
        assert!(lines[9].contains(&format!("0{}4", " ".repeat(28))));
    }

    #[test]
    fn colour_wraps_the_plot_area() {
        let cfg = Config::builder(14, 7)
            .y_range((0.0, 1.0))
            .color(AnsiCode::red())
            .build()
            .unwrap();
        let lines = frame(&cfg, &BraillePlot::default());
        assert!(lines[2].contains("\x1b[31m"));
        assert!(lines[2].contains("\x1b[0m│"));
    }
}
