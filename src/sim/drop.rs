//! Falling equation entity

use glam::Vec2;

use super::equation::Equation;
use crate::consts::*;

/// One falling equation
#[derive(Debug, Clone, PartialEq)]
pub struct WaterDrop {
    /// Center of the drop (canvas pixels, y grows downward)
    pub pos: Vec2,
    pub radius: f32,
    /// Pixels per tick before the speed multiplier
    pub speed: f32,
    pub answer: i32,
    pub text: String,
}

impl WaterDrop {
    pub fn new(pos: Vec2, equation: Equation) -> Self {
        Self {
            pos,
            radius: DROP_RADIUS,
            speed: BASE_FALL_SPEED,
            answer: equation.answer,
            text: equation.text,
        }
    }

    /// Move down by one tick of base movement scaled by `multiplier`
    pub fn advance(&mut self, multiplier: f32) {
        self.pos.y += self.speed * multiplier;
    }

    /// True once the top edge has passed the bottom of the canvas
    pub fn is_off_screen(&self) -> bool {
        self.pos.y - self.radius > CANVAS_HEIGHT
    }
}
