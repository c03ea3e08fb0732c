/// Paint command set for the software rasterizer
use crate::rendering::layout::{LayoutNode, NodeKind, Rgba};

const TEXT_COLOR: Rgba = (15, 23, 42, 255);
const METER_TRACK: Rgba = (241, 245, 249, 255);

#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    SolidRect {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        rgba: Rgba,
    },
    Text {
        x: i32,
        y: i32,
        text: String,
        scale: u32,
        rgba: Rgba,
    },
}

/// Lower layout nodes into a flat list of paint commands in z-order:
/// backgrounds first, then text, so glyphs always draw over fills.
pub fn paint_nodes(nodes: &[LayoutNode]) -> Vec<PaintCommand> {
    let mut commands = Vec::new();
    for node in nodes {
        let r = &node.lb.rect;
        let pad = node.lb.box_model.padding as i32;
        match &node.kind {
            NodeKind::Heading | NodeKind::Paragraph => {}
            NodeKind::Badge { fill } | NodeKind::ListItem { fill } => {
                commands.push(PaintCommand::SolidRect {
                    x: r.x,
                    y: r.y,
                    width: r.width,
                    height: r.height,
                    rgba: *fill,
                });
            }
            NodeKind::Meter { fraction, color } => {
                commands.push(PaintCommand::SolidRect {
                    x: r.x,
                    y: r.y,
                    width: r.width,
                    height: r.height,
                    rgba: METER_TRACK,
                });
                let fill_width = meter_fill_width(r.width, *fraction);
                if fill_width > 0 {
                    commands.push(PaintCommand::SolidRect {
                        x: r.x,
                        y: r.y,
                        width: fill_width,
                        height: r.height,
                        rgba: *color,
                    });
                }
                continue;
            }
        }
        if !node.text.is_empty() {
            commands.push(PaintCommand::Text {
                x: r.x + pad,
                y: r.y + pad,
                text: node.text.clone(),
                scale: node.scale,
                rgba: TEXT_COLOR,
            });
        }
    }
    commands
}

/// Filled width of the success meter: exact at the 0 and 1 boundaries,
/// linear in between.
pub fn meter_fill_width(track_width: u32, fraction: f32) -> u32 {
    let f = fraction.clamp(0.0, 1.0);
    (f * track_width as f32).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::layout::{BoxModel, LayoutBox, Rect};

    #[test]
    fn meter_fill_width_exact_at_boundaries() {
        assert_eq!(meter_fill_width(200, 0.0), 0);
        assert_eq!(meter_fill_width(200, 1.0), 200);
    }

    #[test]
    fn meter_fill_width_linear_between() {
        assert_eq!(meter_fill_width(200, 0.5), 100);
        assert_eq!(meter_fill_width(200, 0.25), 50);
        assert_eq!(meter_fill_width(100, 0.73), 73);
    }

    fn node(kind: NodeKind, text: &str) -> LayoutNode {
        LayoutNode {
            lb: LayoutBox {
                rect: Rect { x: 8, y: 8, width: 120, height: 24 },
                box_model: BoxModel { margin: 0, border: 0, padding: 4 },
            },
            text: text.to_string(),
            kind,
            scale: 1,
        }
    }

    #[test]
    fn meter_paints_track_then_fill() {
        let commands = paint_nodes(&[node(
            NodeKind::Meter { fraction: 0.5, color: (16, 185, 129, 255) },
            "",
        )]);
        assert_eq!(commands.len(), 2);
        match (&commands[0], &commands[1]) {
            (
                PaintCommand::SolidRect { width: track, .. },
                PaintCommand::SolidRect { width: fill, rgba, .. },
            ) => {
                assert_eq!(*track, 120);
                assert_eq!(*fill, 60);
                assert_eq!(*rgba, (16, 185, 129, 255));
            }
            other => panic!("unexpected commands: {:?}", other),
        }
    }

    #[test]
    fn empty_meter_paints_track_only() {
        let commands = paint_nodes(&[node(
            NodeKind::Meter { fraction: 0.0, color: (16, 185, 129, 255) },
            "",
        )]);
        assert_eq!(commands.len(), 1);
    }

    #[test]
    fn badge_paints_fill_under_text() {
        let commands = paint_nodes(&[node(NodeKind::Badge { fill: (226, 232, 240, 255) }, "Q1")]);
        assert!(matches!(commands[0], PaintCommand::SolidRect { .. }));
        assert!(matches!(commands[1], PaintCommand::Text { .. }));
    }
}
