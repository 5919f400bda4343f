//! Circular "donut" chart of skills.
//!
//! Every category receives an equal share of the circle regardless of how
//! many skills it holds; each skill then receives an equal part of its
//! category's share. A segment's outer radius grows linearly with the skill
//! level between the inner radius and the maximum outer radius.

use std::f64::consts::PI;

use serde::Serialize;

use crate::entities::skill::{SkillCategory, MAX_LEVEL};

pub const FULL_CIRCLE: f64 = 360.0;

const ACTIVE_OPACITY: f64 = 1.0;
const DIMMED_OPACITY: f64 = 0.3;
const IDLE_OPACITY: f64 = 0.85;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WheelGeometry {
    pub size: f64,
    pub center_x: f64,
    pub center_y: f64,
    pub inner_radius: f64,
    pub max_outer_radius: f64,
    /// Degrees trimmed from the end of every segment so neighbours don't touch.
    pub gap_degrees: f64,
}

impl Default for WheelGeometry {
    fn default() -> Self {
        WheelGeometry {
            size: 400.0,
            center_x: 200.0,
            center_y: 200.0,
            inner_radius: 60.0,
            max_outer_radius: 180.0,
            gap_degrees: 1.0,
        }
    }
}

impl WheelGeometry {
    /// Levels above 100 are treated as 100.
    pub fn outer_radius(&self, level: u8) -> f64 {
        let level = f64::from(level.min(MAX_LEVEL));
        self.inner_radius + (level / 100.0) * (self.max_outer_radius - self.inner_radius)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// 0° points up and angles grow clockwise.
pub fn polar_to_cartesian(center_x: f64, center_y: f64, radius: f64, angle_degrees: f64) -> Point {
    let radians = (angle_degrees - 90.0) * PI / 180.0;
    Point {
        x: center_x + radius * radians.cos(),
        y: center_y + radius * radians.sin(),
    }
}

/// SVG path for a ring slice between two radii across `[start, end]` degrees.
pub fn describe_arc(
    center_x: f64,
    center_y: f64,
    inner_radius: f64,
    outer_radius: f64,
    start_angle: f64,
    end_angle: f64,
) -> String {
    let outer_start = polar_to_cartesian(center_x, center_y, outer_radius, end_angle);
    let outer_end = polar_to_cartesian(center_x, center_y, outer_radius, start_angle);
    let inner_start = polar_to_cartesian(center_x, center_y, inner_radius, end_angle);
    let inner_end = polar_to_cartesian(center_x, center_y, inner_radius, start_angle);

    let large_arc = if end_angle - start_angle > 180.0 { 1 } else { 0 };

    format!(
        "M {:.2} {:.2} A {:.2} {:.2} 0 {} 0 {:.2} {:.2} L {:.2} {:.2} A {:.2} {:.2} 0 {} 1 {:.2} {:.2} Z",
        outer_start.x, outer_start.y,
        outer_radius, outer_radius, large_arc, outer_end.x, outer_end.y,
        inner_end.x, inner_end.y,
        inner_radius, inner_radius, large_arc, inner_start.x, inner_start.y,
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SegmentKey {
    pub category_index: usize,
    pub skill_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub key: SegmentKey,
    pub category: String,
    pub color: String,
    pub name: String,
    pub level: u8,
    pub justification: String,
    pub start_angle: f64,
    /// End of the allotted span, before the gap is trimmed.
    pub end_angle: f64,
    pub outer_radius: f64,
    pub path: String,
}

impl Segment {
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// End angle actually drawn. Never earlier than the start, so a span
    /// narrower than the gap collapses to nothing instead of wrapping.
    pub fn rendered_end_angle(&self, gap_degrees: f64) -> f64 {
        (self.end_angle - gap_degrees).max(self.start_angle)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillWheel {
    pub geometry: WheelGeometry,
    pub segments: Vec<Segment>,
    pub average: Option<u8>,
}

impl SkillWheel {
    pub fn layout(categories: &[SkillCategory], geometry: WheelGeometry) -> Self {
        let mut segments = Vec::new();

        if !categories.is_empty() {
            let category_angle = FULL_CIRCLE / categories.len() as f64;
            let mut current_angle = 0.0;

            for (category_index, category) in categories.iter().enumerate() {
                // an empty category keeps its share of the circle but draws nothing
                if category.skills.is_empty() {
                    current_angle += category_angle;
                    continue;
                }

                let skill_angle = category_angle / category.skills.len() as f64;

                for (skill_index, skill) in category.skills.iter().enumerate() {
                    let mut segment = Segment {
                        key: SegmentKey { category_index, skill_index },
                        category: category.category.clone(),
                        color: category.color.clone(),
                        name: skill.name.clone(),
                        level: skill.level,
                        justification: skill.justification.clone(),
                        start_angle: current_angle,
                        end_angle: current_angle + skill_angle,
                        outer_radius: geometry.outer_radius(skill.level),
                        path: String::new(),
                    };
                    segment.path = describe_arc(
                        geometry.center_x,
                        geometry.center_y,
                        geometry.inner_radius,
                        segment.outer_radius,
                        segment.start_angle,
                        segment.rendered_end_angle(geometry.gap_degrees),
                    );

                    current_angle = segment.end_angle;
                    segments.push(segment);
                }
            }
        }

        SkillWheel {
            geometry,
            segments,
            average: average_level(categories),
        }
    }

    /// Centre label, e.g. `80%`.
    pub fn average_label(&self) -> String {
        format!("{}%", self.average.unwrap_or(0))
    }

    pub fn segment(&self, key: SegmentKey) -> Option<&Segment> {
        self.segments.iter().find(|s| s.key == key)
    }

    /// First segment whose skill name matches, ignoring case.
    pub fn find(&self, skill_name: &str) -> Option<SegmentKey> {
        self.segments
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(skill_name.trim()))
            .map(|s| s.key)
    }

    pub fn to_svg(&self, state: &WheelState) -> String {
        let g = &self.geometry;
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {size} {size}" width="{size}" height="{size}" role="img" aria-label="Skill wheel">"#,
            size = g.size
        );

        svg.push_str(r#"<g class="segments">"#);
        for segment in &self.segments {
            svg.push_str(&format!(
                r#"<path d="{}" fill="{}" fill-opacity="{}" data-category="{}" data-skill="{}"><title>{}: {}%</title></path>"#,
                segment.path,
                ammonia::clean_text(&segment.color),
                state.opacity(segment.key),
                ammonia::clean_text(&segment.category),
                ammonia::clean_text(&segment.name),
                ammonia::clean_text(&segment.name),
                segment.level,
            ));
        }
        svg.push_str("</g>");

        svg.push_str(&format!(
            r#"<text x="{}" y="{}" text-anchor="middle" dominant-baseline="middle" class="wheel-average">{}</text>"#,
            g.center_x,
            g.center_y,
            self.average_label(),
        ));
        svg.push_str("</svg>");
        svg
    }
}

/// Unweighted mean of every skill level, rounded to the nearest integer.
pub fn average_level(categories: &[SkillCategory]) -> Option<u8> {
    let (sum, count) = categories
        .iter()
        .flat_map(|c| c.skills.iter())
        .fold((0u32, 0u32), |(sum, count), s| (sum + u32::from(s.level), count + 1));

    if count == 0 {
        return None;
    }
    Some((f64::from(sum) / f64::from(count)).round() as u8)
}

/// Hover state of the wheel. Pure view state: nothing here talks to the
/// backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WheelState {
    active: Option<SegmentKey>,
}

/// What the side panel shows for the hovered skill.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveSkill<'a> {
    pub category: &'a str,
    pub color: &'a str,
    pub name: &'a str,
    pub level: u8,
    pub justification: &'a str,
}

impl WheelState {
    pub fn pointer_over(&mut self, key: SegmentKey) {
        self.active = Some(key);
    }

    pub fn pointer_out(&mut self) {
        self.active = None;
    }

    pub fn active(&self) -> Option<SegmentKey> {
        self.active
    }

    pub fn opacity(&self, key: SegmentKey) -> f64 {
        match self.active {
            Some(active) if active == key => ACTIVE_OPACITY,
            Some(_) => DIMMED_OPACITY,
            None => IDLE_OPACITY,
        }
    }

    pub fn details<'a>(&self, wheel: &'a SkillWheel) -> Option<ActiveSkill<'a>> {
        let segment = wheel.segment(self.active?)?;
        Some(ActiveSkill {
            category: &segment.category,
            color: &segment.color,
            name: &segment.name,
            level: segment.level,
            justification: &segment.justification,
        })
    }
}
