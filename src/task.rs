//! Task runner
//!
//! Every task runs on its own OS thread so the caller's loop stays
//! responsive. The input device is created inside that thread.

use crate::config::TaskConfig;
use crate::input::{EnigoDevice, InputDevice};
use crate::sequencer::{Sequencer, SequencerConfig};
use anyhow::{Context, Result};
use std::thread::JoinHandle;

/// Handle to a running task
#[derive(Debug)]
pub struct TaskHandle {
    name: String,
    handle: JoinHandle<Result<()>>,
}

impl TaskHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Block until the task finishes and return its outcome
    pub fn join(self) -> Result<()> {
        match self.handle.join() {
            Ok(result) => result,
            Err(_) => anyhow::bail!("Task '{}' panicked", self.name),
        }
    }
}

/// Run a task against the host input device
pub fn spawn_task(task: TaskConfig, config: SequencerConfig) -> Result<TaskHandle> {
    spawn_task_with(task, config, EnigoDevice::new)
}

/// Run a task on a new thread with a device built by `make_device`
pub fn spawn_task_with<D, F>(
    task: TaskConfig,
    config: SequencerConfig,
    make_device: F,
) -> Result<TaskHandle>
where
    D: InputDevice,
    F: FnOnce() -> Result<D> + Send + 'static,
{
    let name = task.name.clone();
    log::info!("Executing task: {}", name);

    let handle = std::thread::Builder::new()
        .name(format!("task-{}", name))
        .spawn(move || {
            let result = make_device().and_then(|device| {
                let mut seq = Sequencer::new(device, config);
                run_task(&mut seq, &task)
            });
            match &result {
                Ok(()) => log::info!("Task completed successfully: {}", task.name),
                Err(e) => log::error!("Task failed: {}: {:#}", task.name, e),
            }
            result
        })
        .with_context(|| format!("Failed to spawn thread for task '{}'", name))?;

    Ok(TaskHandle { name, handle })
}

/// Run every step of `task` in order, stopping at the first failure
pub fn run_task<D: InputDevice>(seq: &mut Sequencer<D>, task: &TaskConfig) -> Result<()> {
    if task.steps.is_empty() {
        log::warn!("Task '{}' has no steps", task.name);
    }

    for (index, step) in task.steps.iter().enumerate() {
        log::info!(
            "[{}] step {}/{}: {}",
            task.name,
            index + 1,
            task.steps.len(),
            step.describe()
        );
        step.run(seq)
            .with_context(|| format!("Step {} ({}) failed", index + 1, step.describe()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::Step;
    use crate::input::MouseButton;
    use crate::input::recording::{Event, RecordingDevice};
    use enigo::Key;
    use std::time::Duration;

    fn task(name: &str, steps: Vec<Step>) -> TaskConfig {
        TaskConfig {
            name: name.to_string(),
            steps,
        }
    }

    fn fast() -> SequencerConfig {
        SequencerConfig {
            delay: Duration::ZERO,
            ..SequencerConfig::default()
        }
    }

    #[test]
    fn test_task_runs_on_its_own_thread() {
        let device = RecordingDevice::new();
        let log = device.log();

        let handle = spawn_task_with(
            task(
                "Name Tracks",
                vec![
                    Step::Click {
                        x: 10,
                        y: 20,
                        button: MouseButton::Left,
                        count: 1,
                    },
                    Step::NameTrack {
                        name: "Pad".to_string(),
                    },
                ],
            ),
            fast(),
            move || Ok(device),
        )
        .unwrap();
        assert_eq!(handle.name(), "Name Tracks");
        handle.join().unwrap();

        let events = log.lock().unwrap().clone();
        assert_eq!(events[0], Event::Move(10, 20));
        assert!(events.contains(&Event::KeyUp(Key::Return)));
    }

    #[test]
    fn test_task_stops_at_first_failure() {
        let device = RecordingDevice::failing_on(Key::Escape);
        let log = device.log();

        let result = spawn_task_with(
            task(
                "Broken",
                vec![
                    Step::PressKey {
                        key: "esc".to_string(),
                    },
                    Step::TypeText {
                        text: "never".to_string(),
                    },
                ],
            ),
            fast(),
            move || Ok(device),
        )
        .unwrap()
        .join();

        let err = result.unwrap_err();
        assert!(format!("{:#}", err).contains("Step 1"));
        assert!(
            !log.lock()
                .unwrap()
                .iter()
                .any(|e| matches!(e, Event::Char(_)))
        );
    }

    #[test]
    fn test_device_creation_failure_is_reported() {
        let result = spawn_task_with(
            task("No Device", vec![Step::ClickTrackNameField]),
            fast(),
            || -> Result<RecordingDevice> { anyhow::bail!("no display") },
        )
        .unwrap()
        .join();

        assert!(format!("{:#}", result.unwrap_err()).contains("no display"));
    }

    #[test]
    fn test_empty_task_succeeds() {
        let mut seq = Sequencer::new(RecordingDevice::new(), fast());
        run_task(&mut seq, &task("Empty", vec![])).unwrap();
        assert!(seq.device().events().is_empty());
    }
}
