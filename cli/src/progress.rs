use indicatif::{ProgressBar, ProgressStyle};
use tokio::task::JoinHandle;

use malt_core::events::{OpEvent, OpEventRx};

/// Renders the operation's event stream as a spinner. The view is the single
/// owner of the receiving end; nothing else observes progress state.
pub fn spawn_view(mut rx: OpEventRx, enabled: bool) -> JoinHandle<()> {
    tokio::spawn(async move {
        let bar = if enabled {
            let bar = ProgressBar::new_spinner();
            bar.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg}")
                    .unwrap()
                    .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
            );
            bar
        } else {
            ProgressBar::hidden()
        };

        let mut label = "Working...";
        while let Some(ev) = rx.recv().await {
            match ev {
                OpEvent::StepStarted { step } => {
                    label = step_label(&step);
                    bar.set_message(label.to_string());
                }
                OpEvent::Progress { ticks } => {
                    bar.set_message(format!("{label} ({ticks})"));
                    bar.tick();
                }
                // Errors are accumulated and listed after the run; the
                // spinner does not interleave them with progress output.
                OpEvent::Error { .. } => {}
                OpEvent::StepFinished { step, ok } => {
                    let icon = if ok { "✓" } else { "✗" };
                    bar.println(format!("{icon} {}", step_label(&step)));
                }
            }
        }

        bar.finish_and_clear();
    })
}

fn step_label(step: &str) -> &'static str {
    match step {
        "autoremove" => "Uninstalling orphans...",
        "cleanup" => "Purging cache...",
        "doctor" => "Running health check...",
        "upgrade" => "Upgrading packages...",
        "search" => "Searching...",
        "outdated" => "Checking for updates...",
        _ => "Working...",
    }
}
