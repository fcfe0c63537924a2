//! Progress reporting for the setup pipeline.
//!
//! A small trait seam so the pipeline can report phases, per-step progress
//! and warnings without caring whether anything is listening. The binary
//! uses `ConsoleUi`; tests use `SilentUi`.

/// Pipeline phases shown to the user
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Creating,
    Seeding,
    EnrichingMps,
    Stragglers,
    Addresses,
    Complete,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Creating => write!(f, "Creating database"),
            Phase::Seeding => write!(f, "Seeding constituencies"),
            Phase::EnrichingMps => write!(f, "Enriching MP details"),
            Phase::Stragglers => write!(f, "Filling remaining seats"),
            Phase::Addresses => write!(f, "Loading member addresses"),
            Phase::Complete => write!(f, "Complete"),
        }
    }
}

/// Trait for UI implementations - allows both console and silent/test modes
pub trait Ui {
    fn set_phase(&mut self, phase: Phase);
    fn set_progress(&mut self, current: u64, total: u64, label: impl Into<String>);
    fn log(&mut self, message: impl Into<String>);
}

/// Console UI that prints phases and log lines to stdout
#[derive(Default)]
pub struct ConsoleUi;

impl ConsoleUi {
    pub fn new() -> Self {
        Self
    }
}

impl Ui for ConsoleUi {
    fn set_phase(&mut self, phase: Phase) {
        println!("{}...", phase);
    }

    fn set_progress(&mut self, current: u64, total: u64, label: impl Into<String>) {
        println!("  [{}/{}] {}", current, total, label.into());
    }

    fn log(&mut self, message: impl Into<String>) {
        println!("  {}", message.into());
    }
}

/// Silent UI implementation for testing and non-interactive use
#[derive(Default)]
pub struct SilentUi;

impl SilentUi {
    pub fn new() -> Self {
        Self
    }
}

impl Ui for SilentUi {
    fn set_phase(&mut self, _phase: Phase) {}
    fn set_progress(&mut self, _current: u64, _total: u64, _label: impl Into<String>) {}
    fn log(&mut self, _message: impl Into<String>) {}
}
