use std::path::{Path, PathBuf};

use spot_core::SpotError;

/// Extension of simulator model files.
pub const MODEL_EXTENSION: &str = "mph";

/// Beam width parameter, metres.
pub const PARAM_BEAM_WIDTH: &str = "a";
/// Transition temperature parameter, kelvin.
pub const PARAM_TRANSITION_TEMPERATURE: &str = "T_0";
/// Substrate conductivity parameter.
pub const PARAM_SUBSTRATE_CONDUCTIVITY: &str = "k_si";
/// Contrast ratio parameter.
pub const PARAM_RHO: &str = "rho";
/// Laser power parameter, watts.
pub const PARAM_LASER_POWER: &str = "p_laser";

/// Stateful handle on one loaded finite-element model.
///
/// A handle is owned by a single batch and driven sequentially: parameters
/// are set, the study is built and solved, then the field is exported.
pub trait FieldSimulator {
    /// Sets a named scalar model parameter.
    fn set_parameter(&mut self, name: &str, value: f64) -> Result<(), SpotError>;

    /// Rebuilds the geometry and mesh and solves `study`.
    fn build_and_solve(&mut self, study: &str) -> Result<(), SpotError>;

    /// Exports the field behind `plot` as a text table at `path`.
    fn export_field(&mut self, plot: &str, path: &Path) -> Result<(), SpotError>;
}

/// Appends `.mph` unless the path already carries it.
pub fn model_path_with_extension(path: &Path) -> PathBuf {
    match path.extension() {
        Some(ext) if ext == MODEL_EXTENSION => path.to_path_buf(),
        _ => {
            let mut name = path.as_os_str().to_os_string();
            name.push(".");
            name.push(MODEL_EXTENSION);
            PathBuf::from(name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_appended_once() {
        assert_eq!(
            model_path_with_extension(Path::new("models/disc")),
            PathBuf::from("models/disc.mph")
        );
        assert_eq!(
            model_path_with_extension(Path::new("models/disc.mph")),
            PathBuf::from("models/disc.mph")
        );
        assert_eq!(
            model_path_with_extension(Path::new("250000x250000nm_SYMMETRIC_MIN500_NARROW10")),
            PathBuf::from("250000x250000nm_SYMMETRIC_MIN500_NARROW10.mph")
        );
    }
}
