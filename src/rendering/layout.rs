/// Layout primitives for plan surfaces
///
/// Blocks stack vertically inside a fixed-width page. Text metrics assume the
/// 8x8 bitmap font used by the software rasterizer: one glyph cell is
/// `8 * scale` pixels wide and tall.
use crate::Viewport;

/// Glyph cell edge in pixels at scale 1.
pub const GLYPH_PX: u32 = 8;

/// An RGBA color used by layout nodes and paint commands.
pub type Rgba = (u8, u8, u8, u8);

#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoxModel {
    pub margin: u32,
    pub border: u32,
    pub padding: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutBox {
    pub rect: Rect,
    pub box_model: BoxModel,
}

impl LayoutBox {
    pub fn content_width(&self) -> u32 {
        let total = self.box_model.margin + self.box_model.border + self.box_model.padding;
        self.rect.width.saturating_sub(total * 2)
    }
}

/// What a layout node renders as. Meter is the success indicator: a track
/// with a fill whose width is exactly `fraction` of the track width.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Heading,
    Paragraph,
    /// A small filled label pill (section markers, quarter tags).
    Badge { fill: Rgba },
    /// A bulleted row with a tinted background (steps, tips, warnings).
    ListItem { fill: Rgba },
    Meter { fraction: f32, color: Rgba },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode {
    pub lb: LayoutBox,
    pub text: String,
    pub kind: NodeKind,
    pub scale: u32,
}

/// Wrap `text` into lines of at most `chars_per_line` characters, breaking on
/// whitespace. A single overlong word occupies its own line unbroken.
pub fn wrap_text(text: &str, chars_per_line: usize) -> String {
    let limit = chars_per_line.max(1);
    let mut lines = Vec::new();
    let mut cur = String::new();
    for word in text.split_whitespace() {
        if !cur.is_empty() && cur.chars().count() + 1 + word.chars().count() > limit {
            lines.push(std::mem::take(&mut cur));
        }
        if !cur.is_empty() {
            cur.push(' ');
        }
        cur.push_str(word);
    }
    if !cur.is_empty() {
        lines.push(cur);
    }
    lines.join("\n")
}

/// Vertical block-flow builder: pushes nodes top to bottom and tracks the
/// content height. The page width comes from the viewport; the final height
/// is the flowed content height, floored at the viewport height.
pub struct Flow {
    viewport: Viewport,
    y: u32,
    nodes: Vec<LayoutNode>,
}

impl Flow {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            y: GLYPH_PX, // top padding
            nodes: Vec::new(),
        }
    }

    fn inner_width(&self) -> u32 {
        self.viewport.width.saturating_sub(GLYPH_PX * 2)
    }

    fn push_text_block(&mut self, text: &str, kind: NodeKind, scale: u32, padding: u32, margin: u32) {
        let scale = scale.max(1);
        let width = self.inner_width();
        let content_w = width.saturating_sub(padding * 2);
        let glyph = GLYPH_PX * scale;
        let chars_per_line = if content_w >= glyph { (content_w / glyph) as usize } else { 1 };
        let wrapped = wrap_text(text, chars_per_line);
        let line_count = (wrapped.lines().count() as u32).max(1);
        let box_h = line_count * glyph + padding * 2;

        let lb = LayoutBox {
            rect: Rect {
                x: GLYPH_PX as i32,
                y: self.y as i32,
                width,
                height: box_h,
            },
            box_model: BoxModel { margin, border: 0, padding },
        };
        self.nodes.push(LayoutNode { lb, text: wrapped, kind, scale });
        self.y += box_h + margin;
    }

    pub fn heading(&mut self, text: &str, scale: u32) {
        self.push_text_block(text, NodeKind::Heading, scale, GLYPH_PX, GLYPH_PX);
    }

    pub fn paragraph(&mut self, text: &str) {
        self.push_text_block(text, NodeKind::Paragraph, 1, 6, 6);
    }

    pub fn badge(&mut self, text: &str, fill: Rgba) {
        self.push_text_block(text, NodeKind::Badge { fill }, 1, 6, 6);
    }

    pub fn list_item(&mut self, text: &str, fill: Rgba) {
        self.push_text_block(text, NodeKind::ListItem { fill }, 1, 6, 6);
    }

    /// Push the success meter. The fill width is computed at paint time as
    /// `round(fraction * track_width)` so 0 maps to an empty track and 1 to a
    /// full one.
    pub fn meter(&mut self, fraction: f32, color: Rgba) {
        let width = self.inner_width();
        let box_h = GLYPH_PX * 2;
        let lb = LayoutBox {
            rect: Rect {
                x: GLYPH_PX as i32,
                y: self.y as i32,
                width,
                height: box_h,
            },
            box_model: BoxModel { margin: GLYPH_PX, border: 0, padding: 0 },
        };
        self.nodes.push(LayoutNode {
            lb,
            text: String::new(),
            kind: NodeKind::Meter {
                fraction: fraction.clamp(0.0, 1.0),
                color,
            },
            scale: 1,
        });
        self.y += box_h + GLYPH_PX;
    }

    /// Finish the flow, yielding the nodes and the page dimensions.
    pub fn finish(self) -> (Vec<LayoutNode>, u32, u32) {
        let height = (self.y + GLYPH_PX).max(self.viewport.height);
        (self.nodes, self.viewport.width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_text_breaks_on_whitespace() {
        let wrapped = wrap_text("one two three four", 9);
        assert_eq!(wrapped, "one two\nthree\nfour");
    }

    #[test]
    fn wrap_text_keeps_overlong_word_whole() {
        let wrapped = wrap_text("supercalifragilistic ok", 5);
        assert_eq!(wrapped.lines().next(), Some("supercalifragilistic"));
    }

    #[test]
    fn flow_stacks_blocks_vertically() {
        let mut flow = Flow::new(Viewport { width: 320, height: 0 });
        flow.heading("Title", 2);
        flow.paragraph("Body text");
        let (nodes, width, height) = flow.finish();
        assert_eq!(nodes.len(), 2);
        assert_eq!(width, 320);
        assert!(nodes[1].lb.rect.y > nodes[0].lb.rect.y);
        assert!(height > nodes[1].lb.rect.y as u32);
    }

    #[test]
    fn flow_height_floors_at_viewport() {
        let flow = Flow::new(Viewport { width: 320, height: 600 });
        let (_, _, height) = flow.finish();
        assert_eq!(height, 600);
    }

    #[test]
    fn meter_fraction_is_clamped() {
        let mut flow = Flow::new(Viewport { width: 320, height: 0 });
        flow.meter(1.5, (0, 0, 0, 255));
        let (nodes, _, _) = flow.finish();
        match &nodes[0].kind {
            NodeKind::Meter { fraction, .. } => assert_eq!(*fraction, 1.0),
            other => panic!("unexpected node kind: {:?}", other),
        }
    }
}
