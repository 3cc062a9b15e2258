//! Built-in equation presets offered by the equation picker.

use serde::Serialize;

use crate::error::{Result, SolverError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PresetEquation {
    pub id: u32,
    pub equation: &'static str,
    /// Domain hint shown next to the equation.
    pub note: Option<&'static str>,
}

const fn preset(id: u32, equation: &'static str) -> PresetEquation {
    PresetEquation { id, equation, note: None }
}

const fn noted(id: u32, equation: &'static str, note: &'static str) -> PresetEquation {
    PresetEquation { id, equation, note: Some(note) }
}

pub static PRESET_EQUATIONS: [PresetEquation; 20] = [
    preset(1,  "(0.2x)^3=cos(x)"),
    preset(2,  "x-10sin(x)=0"),
    noted(3,   "2^x=sin(x)", "For x < 10"),
    noted(4,   "2x-2cos(x)=0", "For x > -10"),
    noted(5,   "ln(x+5)=cos(x)", "For x < 5"),
    noted(6,   "√(4x+7)=3cos(x)", "(√) temporarily not recognised"),
    preset(7,  "x*sin(x)-1=0"),
    preset(8,  "8cos(x)-x=6"),
    preset(9,  "sin(x)-0.2x=0"),
    preset(10, "10cos(x)-0.1x=0"),
    preset(11, "21g(x+7)-5sin(x)=0"),
    preset(12, "4cos(x)+0.3x=0"),
    preset(13, "5sin(2x)=√(1-x)"),
    preset(14, "1.2x^4+2x^2-24.1=13x^2+14.2x"),
    preset(15, "2x^2-5=2x"),
    preset(16, "2^x=10-0.5x^2"),
    preset(17, "4x^4-6.2=cos(0.6x)"),
    noted(18,  "3sin(8x)=0.7x-0.9", "On the segment [-1, 1]"),
    preset(19, "1.2-ln(x)=4sin(2x)"),
    preset(20, "ln(x+6.1)=2sin(x-1.4)"),
];

pub fn preset_by_id(id: u32) -> Result<&'static PresetEquation> {
    PRESET_EQUATIONS
        .iter()
        .find(|p| p.id == id)
        .ok_or(SolverError::UnknownPreset(id))
}
