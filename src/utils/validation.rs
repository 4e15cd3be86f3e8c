use crate::core::ParamKey;
use crate::utils::{ExplorerError, ExplorerResult};

/// Validates a slider value before it is written to a discussion.
///
/// Ranges match the UI sliders: blur radius is an odd kernel size between
/// 3 and 31, painting detail runs 10-200, color smoothing 0.1-1.0.
pub fn validate_param(key: ParamKey, value: f64) -> ExplorerResult<()> {
    if !value.is_finite() {
        return Err(ExplorerError::invalid_parameter(format!(
            "Value for {:?} must be a finite number", key
        )));
    }

    match key {
        ParamKey::BlurRadius => {
            if value.fract() != 0.0 || !(3.0..=31.0).contains(&value) {
                return Err(ExplorerError::invalid_parameter(format!(
                    "Invalid blur radius: {}. Must be a whole number between 3 and 31", value
                )));
            }
            if (value as u32) % 2 == 0 {
                return Err(ExplorerError::invalid_parameter(format!(
                    "Invalid blur radius: {}. Kernel size must be odd", value
                )));
            }
        }
        ParamKey::PaintingDetail => {
            if value.fract() != 0.0 || !(10.0..=200.0).contains(&value) {
                return Err(ExplorerError::invalid_parameter(format!(
                    "Invalid painting detail: {}. Must be a whole number between 10 and 200", value
                )));
            }
        }
        ParamKey::PaintingColorSmooth => {
            if !(0.1..=1.0).contains(&value) {
                return Err(ExplorerError::invalid_parameter(format!(
                    "Invalid color smoothing: {}. Must be between 0.1 and 1.0", value
                )));
            }
        }
    }

    Ok(())
}
