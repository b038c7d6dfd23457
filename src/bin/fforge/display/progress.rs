use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

/// Numbered pipeline steps on stderr. A hidden bar swallows every line, so
/// quiet and non-terminal runs print nothing.
pub struct Progress {
    bar: ProgressBar,
    total: usize,
    step: usize,
    started: Instant,
    step_started: Instant,
}

impl Progress {
    pub fn new(interactive: bool, total: usize) -> Self {
        let bar = if interactive {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };
        if let Ok(style) = ProgressStyle::with_template("  {spinner:.cyan} {prefix:.dim} {msg}") {
            bar.set_style(style);
        }

        let now = Instant::now();
        Self {
            bar,
            total,
            step: 0,
            started: now,
            step_started: now,
        }
    }

    pub fn step(&mut self, label: &str) {
        self.step += 1;
        self.step_started = Instant::now();
        self.bar.set_prefix(format!("[{}/{}]", self.step, self.total));
        self.bar.set_message(format!("{label}..."));
        self.bar.enable_steady_tick(Duration::from_millis(80));
    }

    /// Replaces the spinner line with a check mark and one line per detail.
    pub fn done<S: AsRef<str>>(&mut self, label: &str, details: &[S]) {
        self.bar.disable_steady_tick();
        self.bar.set_message("");

        let secs = self.step_started.elapsed().as_secs_f64();
        self.bar.println(format!("  \x1b[32m✓\x1b[0m {label:<44} {secs:>5.1}s"));
        for detail in details {
            self.bar.println(format!("      \x1b[2m·\x1b[0m {}", detail.as_ref()));
        }
    }

    pub fn finish(self, label: &str) {
        self.bar.finish_and_clear();
        if self.bar.is_hidden() {
            return;
        }
        let total = format!("Total: {:.2}s", self.started.elapsed().as_secs_f64());
        eprintln!();
        eprintln!("  \x1b[32m✓\x1b[0m {label:<14} {total:>35}");
        eprintln!();
    }
}
