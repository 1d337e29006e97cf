use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use log::{debug, error, info};
use spot_core::{ErrorInfo, SpotError};

use crate::simulator::{model_path_with_extension, FieldSimulator};

/// Prefix of the environment variables carrying model parameters.
pub const PARAM_ENV_PREFIX: &str = "SPOT_PARAM_";

fn environment_error(code: &str, message: impl Into<String>) -> SpotError {
    SpotError::Environment(ErrorInfo::new(code, message.into()))
}

/// Simulator driven through an external executable.
///
/// Every step runs `program [args..] <step> [operands..]` with the model in
/// `SPOT_MODEL`, the core count in `SPOT_CORES` and each parameter set so far
/// in `SPOT_PARAM_<name>`. Steps are `probe`, `solve <study>` and
/// `export <plot> <path>`; a non-zero exit fails the step.
#[derive(Debug, Clone)]
pub struct CommandSimulator {
    program: PathBuf,
    args: Vec<OsString>,
    model: PathBuf,
    cores: usize,
    parameters: BTreeMap<String, f64>,
}

impl CommandSimulator {
    /// Starts the driver and checks that it answers the `probe` step.
    pub fn connect(
        program: impl Into<PathBuf>,
        args: impl IntoIterator<Item = impl Into<OsString>>,
        model: &Path,
        cores: usize,
    ) -> Result<Self, SpotError> {
        let simulator = Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            model: model_path_with_extension(model),
            cores,
            parameters: BTreeMap::new(),
        };
        if let Err(err) = simulator.run("probe", &[]) {
            error!("simulator {} unavailable: {}", simulator.program.display(), err);
            return Err(match err {
                SpotError::Environment(info) => SpotError::Environment(
                    info.with_hint("check the simulator executable and its license"),
                ),
                other => other,
            });
        }
        info!(
            "connected to {} with model {} on {} cores",
            simulator.program.display(),
            simulator.model.display(),
            cores
        );
        Ok(simulator)
    }

    /// Model file handed to the driver.
    pub fn model(&self) -> &Path {
        &self.model
    }

    /// Parameters set so far.
    pub fn parameters(&self) -> &BTreeMap<String, f64> {
        &self.parameters
    }

    fn run(&self, step: &str, operands: &[OsString]) -> Result<Output, SpotError> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .arg(step)
            .args(operands)
            .env("SPOT_MODEL", &self.model)
            .env("SPOT_CORES", self.cores.to_string());
        for (name, value) in &self.parameters {
            command.env(format!("{PARAM_ENV_PREFIX}{name}"), value.to_string());
        }
        debug!("running {} {}", self.program.display(), step);
        let output = command.output().map_err(|err| {
            environment_error("simulator-start", err.to_string())
                .with_context("program", self.program.display().to_string())
                .with_context("step", step)
        })?;
        if !output.status.success() {
            return Err(environment_error(
                &format!("simulator-{step}"),
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            )
            .with_context("program", self.program.display().to_string())
            .with_context("status", output.status.to_string()));
        }
        Ok(output)
    }
}

impl FieldSimulator for CommandSimulator {
    fn set_parameter(&mut self, name: &str, value: f64) -> Result<(), SpotError> {
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(SpotError::Parameter(
                ErrorInfo::new("invalid-parameter-name", "parameter names are [A-Za-z0-9_]+")
                    .with_context("name", name),
            ));
        }
        self.parameters.insert(name.to_string(), value);
        Ok(())
    }

    fn build_and_solve(&mut self, study: &str) -> Result<(), SpotError> {
        self.run("solve", &[OsString::from(study)]).map(|_| ())
    }

    fn export_field(&mut self, plot: &str, path: &Path) -> Result<(), SpotError> {
        self.run("export", &[OsString::from(plot), path.as_os_str().to_os_string()])
            .map(|_| ())
    }
}
