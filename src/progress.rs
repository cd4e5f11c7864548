use std::process;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::warn;

/// Exit code for SIGINT: 128 + 2.
const SIGINT_EXIT_CODE: i32 = 130;

/// Animated activity indicator for remote fetches.
///
/// Draws to stderr only, so result lines on stdout stay machine-readable.
/// No-op when disabled via `--quiet`.
pub struct Indicator {
    pb: Option<ProgressBar>,
}

impl Indicator {
    pub fn new(enabled: bool) -> Self {
        if !enabled {
            return Indicator { pb: None };
        }

        let pb = ProgressBar::new_spinner();
        pb.set_draw_target(ProgressDrawTarget::stderr());
        pb.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .expect("spinner template is a valid compile-time constant"),
        );
        pb.enable_steady_tick(Duration::from_millis(100));

        Indicator { pb: Some(pb) }
    }

    /// Show the parameter currently being inspected.
    pub fn set_message(&self, message: impl Into<String>) {
        if let Some(pb) = &self.pb {
            pb.set_message(message.into());
        }
    }

    /// Run `f` with the indicator line cleared, then redraw it.
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        match &self.pb {
            Some(pb) => pb.suspend(f),
            None => f(),
        }
    }

    pub fn finish(&self) {
        if let Some(pb) = &self.pb {
            pb.finish_and_clear();
        }
    }

    /// Install the interrupt handler: clear the indicator line and exit
    /// promptly. No partial results are flushed.
    pub fn install_interrupt_handler(&self) {
        let pb = self.pb.clone();
        let installed = ctrlc::set_handler(move || {
            if let Some(pb) = &pb {
                pb.finish_and_clear();
            }
            process::exit(SIGINT_EXIT_CODE);
        });
        if let Err(err) = installed {
            warn!("could not install interrupt handler: {}", err);
        }
    }
}

impl Drop for Indicator {
    fn drop(&mut self) {
        // Clear the line on early error returns so the message does not
        // interleave with error output.
        if let Some(pb) = &self.pb {
            if !pb.is_finished() {
                pb.finish_and_clear();
            }
        }
    }
}
