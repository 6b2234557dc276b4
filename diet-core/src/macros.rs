use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

pub const PROTEIN_SHARE: f64 = 0.30;
pub const CARB_SHARE: f64 = 0.40;
pub const FAT_SHARE: f64 = 0.30;

pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
pub const KCAL_PER_G_CARB: f64 = 4.0;
pub const KCAL_PER_G_FAT: f64 = 9.0;

/// Daily macronutrient targets in grams.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroTargets {
    pub protein_g: u32,
    pub carb_g: u32,
    pub fat_g: u32,
}

impl MacroTargets {
    /// Calories the three allocations add up to.
    pub fn kcal(&self) -> u32 {
        (self.protein_g as f64 * KCAL_PER_G_PROTEIN
            + self.carb_g as f64 * KCAL_PER_G_CARB
            + self.fat_g as f64 * KCAL_PER_G_FAT) as u32
    }
}

/// Split a calorie target 30/40/30 into protein, carbohydrate and fat grams.
pub fn allocate(calorie_target: u32) -> Result<MacroTargets> {
    if calorie_target == 0 {
        return Err(EngineError::InvalidTarget(
            "calorie target must be greater than zero".into(),
        ));
    }
    let c = calorie_target as f64;
    Ok(MacroTargets {
        protein_g: (c * PROTEIN_SHARE / KCAL_PER_G_PROTEIN).round() as u32,
        carb_g: (c * CARB_SHARE / KCAL_PER_G_CARB).round() as u32,
        fat_g: (c * FAT_SHARE / KCAL_PER_G_FAT).round() as u32,
    })
}
