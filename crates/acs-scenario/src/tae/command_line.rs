//! Default runner: the classic wrapper protocol
//!
//! The target algorithm is called as
//!
//! ```text
//! <algo tokens> <instance> <instance-specific> <cutoff> <runlength> <seed> -<param> <value> ...
//! ```
//!
//! with `0` standing in for a missing instance or instance-specific string.
//! It must print a line of the form
//!
//! ```text
//! Result for SMAC: <STATUS>, <runtime>, <runlength>, <quality>, <seed>[, <info>]
//! ```
//!
//! (`ParamILS` is accepted in place of `SMAC`). The last such line wins.

use super::{RunRequest, RunStatus, RunValue, TargetAlgorithmRunner};
use crate::error::TaeError;
use crate::options::RunObjective;
use once_cell::sync::Lazy;
use regex::Regex;
use std::process::Command;

/// Pattern of the wrapper result line; `body` holds the comma-separated fields
pub static RESULT_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*Result\s+(?:for|of)\s+(?:SMAC|ParamILS)\s*:\s*(?P<body>.*)$")
        .expect("result line regex is valid")
});

/// Placeholder for absent positional arguments
const ABSENT: &str = "0";

/// Runs the target algorithm as a child process and parses its result line
#[derive(Debug, Clone)]
pub struct CommandLineRunner {
    command: Vec<String>,
    run_objective: RunObjective,
    par_factor: u32,
    runlength: u64,
}

impl CommandLineRunner {
    /// Create runner for a shell-split command
    #[must_use]
    pub fn new(command: Vec<String>, run_objective: RunObjective, par_factor: u32) -> Self {
        Self {
            command,
            run_objective,
            par_factor,
            runlength: 0,
        }
    }

    /// Runlength passed to the wrapper
    #[must_use]
    pub fn with_runlength(mut self, runlength: u64) -> Self {
        self.runlength = runlength;
        self
    }

    /// Command tokens
    #[inline]
    #[must_use]
    pub fn command(&self) -> &[String] {
        &self.command
    }

    /// Objective used to turn a result line into a cost
    #[inline]
    #[must_use]
    pub fn run_objective(&self) -> RunObjective {
        self.run_objective
    }

    /// Penalty factor for unsuccessful runtime runs
    #[inline]
    #[must_use]
    pub fn par_factor(&self) -> u32 {
        self.par_factor
    }

    /// Full argument vector for a request
    ///
    /// # Errors
    /// Returns `EmptyCommand` if the runner has no command tokens.
    pub fn command_line(&self, request: &RunRequest<'_>) -> Result<Vec<String>, TaeError> {
        if self.command.is_empty() {
            return Err(TaeError::EmptyCommand);
        }

        let mut argv = self.command.clone();
        argv.push(request.instance.unwrap_or(ABSENT).to_string());
        argv.push(request.instance_specific.unwrap_or(ABSENT).to_string());
        argv.push(request.cutoff.to_string());
        argv.push(self.runlength.to_string());
        argv.push(request.seed.to_string());
        for (name, value) in request.configuration.iter() {
            argv.push(format!("-{name}"));
            argv.push(value.to_string());
        }
        Ok(argv)
    }

    /// Interpret wrapper output
    ///
    /// # Errors
    /// - `MissingResult` if no result line is present
    /// - `MalformedResult` if the last result line has unparsable fields
    pub fn parse_output(&self, stdout: &str, cutoff: f64) -> Result<RunValue, TaeError> {
        let body = stdout
            .lines()
            .filter_map(|line| RESULT_LINE.captures(line))
            .last()
            .map(|caps| caps["body"].to_string())
            .ok_or(TaeError::MissingResult)?;

        let mut fields = body.splitn(6, ',').map(str::trim);
        let mut next = || fields.next().ok_or_else(|| TaeError::MalformedResult(body.clone()));

        let status: RunStatus = next()?.parse()?;
        let runtime = parse_number(next()?, &body)?;
        let _runlength = parse_number(next()?, &body)?;
        let quality = parse_number(next()?, &body)?;
        let _seed = next().ok();
        let additional_info = next().unwrap_or_default().to_string();

        let cost = match self.run_objective {
            RunObjective::Runtime if status.is_success() => runtime,
            RunObjective::Runtime => cutoff * f64::from(self.par_factor),
            RunObjective::Quality => quality,
        };

        Ok(RunValue {
            status,
            cost,
            runtime,
            additional_info,
        })
    }
}

fn parse_number(field: &str, body: &str) -> Result<f64, TaeError> {
    field
        .parse()
        .map_err(|_| TaeError::MalformedResult(body.to_string()))
}

impl TargetAlgorithmRunner for CommandLineRunner {
    fn evaluate(&self, request: &RunRequest<'_>) -> Result<RunValue, TaeError> {
        let argv = self.command_line(request)?;
        tracing::debug!("Calling: {}", argv.join(" "));

        let mut cmd = Command::new(&argv[0]);
        cmd.args(&argv[1..]);
        if let Some(dir) = request.exec_dir {
            cmd.current_dir(dir);
        }

        let output = cmd.output().map_err(|source| TaeError::Launch {
            program: argv[0].clone(),
            source,
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let value = self.parse_output(&stdout, request.cutoff)?;
        tracing::debug!(
            "Run finished: status={}, cost={}, runtime={}",
            value.status,
            value.cost,
            value.runtime
        );
        Ok(value)
    }

    fn name(&self) -> &str {
        "command-line"
    }
}
