use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::log::DEFAULT_LOG_FILE;
use crate::payload::{read_first_line, Payload};
use crate::status::{CandidateSet, CREATED};

pub const STARTUP_MARKER: &str = r#"Middleware "modify_request" called"#;

/// Replace `response.status` of the payload on stdin and echo it to stdout.
#[derive(Debug, Args)]
pub struct ModifyStatus {
    /// Status code to choose from. Repeat to pick uniformly among several.
    #[arg(long = "status", value_name = "CODE", default_values_t = [CREATED])]
    pub statuses: Vec<u16>,

    /// Seed the status picker, for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,
}

impl ModifyStatus {
    pub fn run(self) -> Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        match self.seed {
            Some(seed) => self.run_with(stdin.lock(), stdout.lock(), &mut StdRng::seed_from_u64(seed)),
            None => self.run_with(stdin.lock(), stdout.lock(), &mut StdRng::from_entropy()),
        }
    }

    /// Nothing reaches `output` unless the whole transformation succeeds.
    pub fn run_with<I: BufRead, O: Write, R: Rng>(&self, input: I, mut output: O, rng: &mut R) -> Result<()> {
        debug!("{}", STARTUP_MARKER);
        let candidates = CandidateSet::new(self.statuses.clone())?;

        let line = read_first_line(input).context("Failed to read payload")?;
        debug!("{}", line);

        let mut payload = Payload::parse(&line).context("Failed to parse payload")?;
        let previous = payload.response_status().cloned();
        let status = candidates.choose(rng);
        payload.set_response_status(status);
        info!(?previous, status, candidates = ?candidates.codes(), "Replaced response status");

        let out = payload.to_line()?;
        writeln!(output, "{}", out)?;
        output.flush()?;
        Ok(())
    }
}
