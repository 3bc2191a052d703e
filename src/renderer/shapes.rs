//! Teardrop geometry and styling
//!
//! Pure layout math for one drop, independent of the drawing backend. All
//! points are in canvas pixels with y pointing down.

use glam::Vec2;

use crate::sim::WaterDrop;

/// An sRGB color with straight alpha, formatted as a CSS `rgba()` string
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

pub const DROP_OUTLINE: Color = Color::rgba(255, 255, 255, 0.6);
pub const DROP_OUTLINE_WIDTH: f64 = 2.0;
pub const HIGHLIGHT: Color = Color::rgba(255, 255, 255, 0.3);
pub const LABEL_COLOR: Color = Color::rgba(255, 255, 255, 1.0);
pub const LABEL_FONT: &str = "bold 20px 'Courier New', monospace";

/// Soft shadow under a painted shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub color: Color,
    pub blur: f64,
    pub offset_y: f64,
}

pub const DROP_SHADOW: Shadow = Shadow {
    color: Color::rgba(0, 0, 0, 0.3),
    blur: 10.0,
    offset_y: 5.0,
};

pub const LABEL_SHADOW: Shadow = Shadow {
    color: Color::rgba(0, 0, 0, 0.7),
    blur: 4.0,
    offset_y: 0.0,
};

/// Light core to deep blue rim
pub const WATER_STOPS: [(f32, Color); 3] = [
    (0.0, Color::rgba(150, 220, 255, 0.95)),
    (0.5, Color::rgba(100, 200, 255, 0.85)),
    (1.0, Color::rgba(50, 150, 255, 0.75)),
];

/// One cubic Bézier segment, continuing from the previous end point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicTo {
    pub c1: Vec2,
    pub c2: Vec2,
    pub end: Vec2,
}

/// Closed teardrop outline: bottom point, left half up to the top, right half back down
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeardropPath {
    pub start: Vec2,
    pub left: CubicTo,
    pub right: CubicTo,
}

impl TeardropPath {
    /// Sample the outline with `segments` points per half
    pub fn sample(&self, segments: usize) -> Vec<Vec2> {
        let segments = segments.max(1);
        let mut points = Vec::with_capacity(segments * 2 + 1);
        points.push(self.start);

        let mut from = self.start;
        for curve in [self.left, self.right] {
            for i in 1..=segments {
                let t = i as f32 / segments as f32;
                points.push(cubic_point(from, curve.c1, curve.c2, curve.end, t));
            }
            from = curve.end;
        }
        points
    }
}

/// Point on a cubic Bézier at parameter `t`
pub fn cubic_point(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
}

/// Teardrop outline around `center`, pointed end down
pub fn teardrop(center: Vec2, r: f32) -> TeardropPath {
    TeardropPath {
        start: center + Vec2::new(0.0, r),
        left: CubicTo {
            c1: center + Vec2::new(-1.3 * r, 0.3 * r),
            c2: center + Vec2::new(-1.1 * r, -0.5 * r),
            end: center + Vec2::new(0.0, -r),
        },
        right: CubicTo {
            c1: center + Vec2::new(1.1 * r, -0.5 * r),
            c2: center + Vec2::new(1.3 * r, 0.3 * r),
            end: center + Vec2::new(0.0, r),
        },
    }
}

/// Radial fill gradient between two circles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialGradient {
    pub inner: Vec2,
    pub inner_radius: f32,
    pub outer: Vec2,
    pub outer_radius: f32,
}

/// Fill gradient with its focus up and left of center
pub fn water_gradient(center: Vec2, r: f32) -> RadialGradient {
    RadialGradient {
        inner: center + Vec2::new(-0.3 * r, -0.2 * r),
        inner_radius: 0.0,
        outer: center,
        outer_radius: 1.3 * r,
    }
}

/// Gloss highlight circle (center, radius)
pub fn highlight(center: Vec2, r: f32) -> (Vec2, f32) {
    (center + Vec2::new(-0.3 * r, -0.3 * r), 0.3 * r)
}

/// Where the equation text is centered, nudged below the middle
pub fn label_anchor(center: Vec2, r: f32) -> Vec2 {
    center + Vec2::new(0.0, 0.1 * r)
}

/// Everything needed to paint one drop
#[derive(Debug, Clone, PartialEq)]
pub struct DropSprite<'a> {
    pub outline: TeardropPath,
    pub gradient: RadialGradient,
    pub highlight: (Vec2, f32),
    pub label: &'a str,
    pub label_pos: Vec2,
}

impl<'a> DropSprite<'a> {
    pub fn new(drop: &'a WaterDrop) -> Self {
        Self {
            outline: teardrop(drop.pos, drop.radius),
            gradient: water_gradient(drop.pos, drop.radius),
            highlight: highlight(drop.pos, drop.radius),
            label: &drop.text,
            label_pos: label_anchor(drop.pos, drop.radius),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn test_css_color() {
        assert_eq!(WATER_STOPS[0].1.css(), "rgba(150, 220, 255, 0.95)");
        assert_eq!(DROP_OUTLINE.css(), "rgba(255, 255, 255, 0.6)");
        assert_eq!(LABEL_COLOR.css(), "rgba(255, 255, 255, 1)");
    }

    #[test]
    fn test_teardrop_is_closed_and_pointed_down() {
        let c = Vec2::new(100.0, 200.0);
        let path = teardrop(c, 30.0);
        assert_eq!(path.start, Vec2::new(100.0, 230.0));
        assert_eq!(path.left.end, Vec2::new(100.0, 170.0));
        assert_eq!(path.right.end, path.start);
    }

    #[test]
    fn test_teardrop_is_mirror_symmetric() {
        let c = Vec2::new(400.0, 300.0);
        let path = teardrop(c, DROP_RADIUS);
        let pts = path.sample(16);
        let n = pts.len();
        // Point i on the way up mirrors point n-1-i on the way down
        for i in 0..n {
            let a = pts[i];
            let b = pts[n - 1 - i];
            assert!((a.y - b.y).abs() < 1e-3);
            assert!(((a.x - c.x) + (b.x - c.x)).abs() < 1e-3);
        }
    }

    #[test]
    fn test_outline_stays_inside_spawn_margin() {
        // A drop spawned at the margin never pokes past the canvas edge
        let path = teardrop(Vec2::new(SPAWN_MARGIN, 0.0), DROP_RADIUS);
        for p in path.sample(64) {
            assert!(p.x >= 0.0, "outline left the canvas at {:?}", p);
            assert!(p.y <= DROP_RADIUS + 1e-3);
            assert!(p.y >= -DROP_RADIUS - 1e-3);
        }
    }

    #[test]
    fn test_cubic_endpoints() {
        let p0 = Vec2::new(0.0, 0.0);
        let p3 = Vec2::new(10.0, 5.0);
        let p1 = Vec2::new(3.0, 9.0);
        let p2 = Vec2::new(7.0, -4.0);
        assert_eq!(cubic_point(p0, p1, p2, p3, 0.0), p0);
        assert_eq!(cubic_point(p0, p1, p2, p3, 1.0), p3);
    }

    #[test]
    fn test_sprite_layout() {
        let eq = crate::sim::Equation {
            op: crate::sim::Operation::Multiply,
            lhs: 6,
            rhs: 7,
            answer: 42,
            text: "6 × 7".to_string(),
        };
        let drop = WaterDrop::new(Vec2::new(200.0, 100.0), eq);
        let sprite = DropSprite::new(&drop);
        assert_eq!(sprite.label, "6 × 7");
        assert!(sprite.label_pos.abs_diff_eq(Vec2::new(200.0, 103.0), 1e-4));
        assert!(sprite.highlight.0.abs_diff_eq(Vec2::new(191.0, 91.0), 1e-4));
        assert!((sprite.highlight.1 - 9.0).abs() < 1e-4);
        assert!(sprite.gradient.inner.abs_diff_eq(Vec2::new(191.0, 94.0), 1e-4));
        assert!((sprite.gradient.outer_radius - 39.0).abs() < 1e-4);
    }
}
