//! Session state machine
//!
//! Ready -> Running -> Over -> Running -> ...

use serde::{Deserialize, Serialize};

use crate::error::{Result, RunnerError};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Waiting for the first start
    #[default]
    Ready,
    /// Active gameplay
    Running,
    /// Run ended, waiting for restart
    Over,
}

/// Final numbers of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub final_score: u64,
    pub high_score: u64,
    pub new_high_score: bool,
}

/// Phase, score and best score
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    pub phase: SessionPhase,
    pub score: u64,
    /// Never decreases
    pub high_score: u64,
}

impl Session {
    pub fn new(high_score: u64) -> Self {
        Self {
            high_score,
            ..Default::default()
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    /// Enter `Running` with a zero score. Legal from `Ready` and `Over`.
    pub fn begin(&mut self) -> Result<()> {
        match self.phase {
            SessionPhase::Ready | SessionPhase::Over => {
                self.phase = SessionPhase::Running;
                self.score = 0;
                Ok(())
            }
            SessionPhase::Running => Err(RunnerError::InvalidTransition {
                from: self.phase,
                to: SessionPhase::Running,
            }),
        }
    }

    /// Enter `Over`, folding the score into the high score
    pub fn finish(&mut self) -> Result<RunSummary> {
        if self.phase != SessionPhase::Running {
            return Err(RunnerError::InvalidTransition {
                from: self.phase,
                to: SessionPhase::Over,
            });
        }
        self.phase = SessionPhase::Over;

        let new_high_score = self.score > self.high_score;
        if new_high_score {
            self.high_score = self.score;
        }
        Ok(RunSummary {
            final_score: self.score,
            high_score: self.high_score,
            new_high_score,
        })
    }
}
