//! Render surfaces: the visual regions a capture targets.
//!
//! Two overlapping regions exist per plan: the full-plan region and a compact
//! summary card (title, quoted summary, success meter) used for sharing. A
//! surface is a value (building one from a `Plan` never fails) but it has a
//! mount state: an unmounted or zero-sized surface fails capture
//! preconditions instead of producing an artifact.

use crate::model::Plan;
use crate::rendering::layout::{Flow, LayoutNode, Rgba};
use crate::Viewport;

const BADGE_FILL: Rgba = (226, 232, 240, 255);
const QUARTER_FILL: Rgba = (99, 102, 241, 255);
const STEP_FILL: Rgba = (248, 250, 252, 255);
const TIP_FILL: Rgba = (209, 250, 229, 255);
const WARNING_FILL: Rgba = (254, 243, 199, 255);

const METER_RED: Rgba = (239, 68, 68, 255);
const METER_YELLOW: Rgba = (234, 179, 8, 255);
const METER_GREEN: Rgba = (16, 185, 129, 255);

/// Which region of the plan a surface displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    FullPlan,
    SummaryCard,
}

/// A laid-out visual region displaying part or all of a plan.
#[derive(Debug, Clone)]
pub struct RenderSurface {
    kind: SurfaceKind,
    nodes: Vec<LayoutNode>,
    width: u32,
    height: u32,
    mounted: bool,
}

impl RenderSurface {
    /// Lay out the whole plan: header card, analysis, roadmap quarters,
    /// tips, and warnings. Empty sections are suppressed entirely.
    pub fn full_plan(plan: &Plan, viewport: Viewport) -> Self {
        let mut flow = Flow::new(viewport);
        header_card(&mut flow, plan);
        flow.paragraph(&format!("AI Analysis: {}", plan.reason_for_success_rate));

        if !plan.roadmap.is_empty() {
            flow.badge("12-MONTH STRATEGIC EXECUTION PLAN", BADGE_FILL);
            for quarter in &plan.roadmap {
                flow.badge(&format!("{} {}", quarter.quarter, quarter.months), QUARTER_FILL);
                flow.heading(&quarter.goal, 1);
                for step in &quarter.steps {
                    flow.list_item(
                        &format!("{}. {}: {}", step.step, step.title, step.description),
                        STEP_FILL,
                    );
                }
            }
        }

        if !plan.tips.is_empty() {
            flow.badge("EXPERT TIPS", BADGE_FILL);
            for tip in &plan.tips {
                flow.list_item(&format!("- {}", tip.tip), TIP_FILL);
            }
        }

        if !plan.warnings.is_empty() {
            flow.badge("POTENTIAL OBSTACLES", BADGE_FILL);
            for warning in &plan.warnings {
                flow.list_item(&format!("- {}", warning), WARNING_FILL);
            }
        }

        Self::finish(SurfaceKind::FullPlan, flow)
    }

    /// Lay out the compact card used for sharing: badge, title, quoted
    /// summary, and the success meter only.
    pub fn summary_card(plan: &Plan, viewport: Viewport) -> Self {
        let mut flow = Flow::new(Viewport { width: viewport.width, height: 0 });
        header_card(&mut flow, plan);
        Self::finish(SurfaceKind::SummaryCard, flow)
    }

    fn finish(kind: SurfaceKind, flow: Flow) -> Self {
        let (nodes, width, height) = flow.finish();
        Self { kind, nodes, width, height, mounted: true }
    }

    pub fn kind(&self) -> SurfaceKind {
        self.kind
    }

    pub fn nodes(&self) -> &[LayoutNode] {
        &self.nodes
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the surface is attached and capturable.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Detach the surface. Subsequent captures fail their precondition
    /// check; the layout itself is retained.
    pub fn unmount(&mut self) {
        self.mounted = false;
    }
}

fn header_card(flow: &mut Flow, plan: &Plan) {
    flow.badge("ACTION ROADMAP", BADGE_FILL);
    flow.heading(&plan.title, 2);
    flow.paragraph(&format!("\"{}\"", plan.summary));
    flow.paragraph(&format!("{}% SUCCESS", plan.success_rate));
    flow.meter(plan.success_fraction(), meter_color(plan.success_rate));
}

/// Success meter color thresholds: below 40 red, below 60 yellow, else green.
fn meter_color(success_rate: u8) -> Rgba {
    if success_rate < 40 {
        METER_RED
    } else if success_rate < 60 {
        METER_YELLOW
    } else {
        METER_GREEN
    }
}
