//! Progress stream consumer rendering a terminal progress bar

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;
use std::sync::mpsc::Receiver;
use std::thread::JoinHandle;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{msg}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} ({{elapsed_precise}})"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// What a consumer observed on the progress stream
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ProgressSummary {
    /// Number of values received before the stream closed
    pub received: usize,
    /// Last value received
    pub last: Option<f32>,
    /// Whether every value was strictly larger than the previous one
    pub strictly_increasing: bool,
}

/// Drains a generator's progress stream into a progress bar
pub struct ProgressDisplay {
    bar: ProgressBar,
}

impl ProgressDisplay {
    /// Create a display for a run of `iterations` brushstrokes
    ///
    /// A hidden display still drains the stream but draws nothing.
    pub fn new(label: &str, iterations: usize, visible: bool) -> Self {
        let bar = if visible {
            ProgressBar::new(iterations as u64)
        } else {
            ProgressBar::hidden()
        };
        bar.set_length(iterations as u64);
        bar.set_style(PROGRESS_STYLE.clone());
        bar.set_message(label.to_string());
        Self { bar }
    }

    /// Consume values until the producer closes the stream
    pub fn consume(&self, progress: &Receiver<f32>) -> ProgressSummary {
        let length = self.bar.length().unwrap_or(0);
        let mut summary = ProgressSummary {
            strictly_increasing: true,
            ..ProgressSummary::default()
        };

        for value in progress {
            if summary.last.is_some_and(|last| value <= last) {
                summary.strictly_increasing = false;
            }
            summary.received += 1;
            summary.last = Some(value);
            self.bar
                .set_position((f64::from(value) * length as f64).round() as u64);
        }

        self.bar.finish();
        summary
    }

    /// Consume the stream on a background thread
    pub fn spawn(self, progress: Receiver<f32>) -> JoinHandle<ProgressSummary> {
        std::thread::spawn(move || self.consume(&progress))
    }
}
