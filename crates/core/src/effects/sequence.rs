use serde::{Deserialize, Serialize};

use super::easing::Easing;

/// One timed step. `delay` counts from the end of the previous step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub label: String,
    pub delay: f64,
    pub duration: f64,
    #[serde(default = "linear")]
    pub easing: Easing,
}

fn linear() -> Easing {
    Easing::Linear
}

impl Step {
    pub fn new(label: impl Into<String>, delay: f64, duration: f64) -> Self {
        Self {
            label: label.into(),
            delay: delay.max(0.0),
            duration: duration.max(0.0),
            easing: Easing::Linear,
        }
    }

    pub fn eased(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StepEvent {
    Started { index: usize, label: String },
    Finished { index: usize, label: String },
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Cursor {
    Waiting { index: usize, left: f64 },
    Running { index: usize, left: f64 },
    Done,
}

/// A finite list of steps run strictly one after another by a single
/// clock: step `n + 1` never starts before step `n` has finished.
#[derive(Debug, Clone)]
pub struct Sequence {
    steps: Vec<Step>,
    cursor: Cursor,
}

impl Sequence {
    pub fn new(steps: Vec<Step>) -> Self {
        let cursor = match steps.first() {
            Some(first) => Cursor::Waiting {
                index: 0,
                left: first.delay,
            },
            None => Cursor::Done,
        };
        Self { steps, cursor }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn is_done(&self) -> bool {
        self.cursor == Cursor::Done
    }

    /// Eased progress of the step labelled `label`: `None` until it starts,
    /// then its curve applied to the elapsed fraction, `1.0` once finished.
    pub fn progress(&self, label: &str) -> Option<f64> {
        let position = self.steps.iter().position(|s| s.label == label)?;
        match self.cursor {
            Cursor::Done => Some(1.0),
            Cursor::Running { index, left } if position == index => {
                let step = &self.steps[index];
                let raw = if step.duration > 0.0 {
                    1.0 - left / step.duration
                } else {
                    1.0
                };
                Some(step.easing.apply(raw))
            }
            Cursor::Running { index, .. } | Cursor::Waiting { index, .. } => {
                (position < index).then_some(1.0)
            }
        }
    }

    /// Advance the clock by `dt` seconds and report every transition, in order.
    pub fn tick(&mut self, dt: f64) -> Vec<StepEvent> {
        let mut events = Vec::new();
        let mut budget = dt.max(0.0);

        loop {
            match self.cursor {
                Cursor::Done => break,
                Cursor::Waiting { index, left } => {
                    if budget < left {
                        self.cursor = Cursor::Waiting {
                            index,
                            left: left - budget,
                        };
                        break;
                    }
                    budget -= left;
                    let step = &self.steps[index];
                    events.push(StepEvent::Started {
                        index,
                        label: step.label.clone(),
                    });
                    self.cursor = Cursor::Running {
                        index,
                        left: step.duration,
                    };
                }
                Cursor::Running { index, left } => {
                    if budget < left {
                        self.cursor = Cursor::Running {
                            index,
                            left: left - budget,
                        };
                        break;
                    }
                    budget -= left;
                    events.push(StepEvent::Finished {
                        index,
                        label: self.steps[index].label.clone(),
                    });
                    self.cursor = match self.steps.get(index + 1) {
                        Some(next) => Cursor::Waiting {
                            index: index + 1,
                            left: next.delay,
                        },
                        None => Cursor::Done,
                    };
                }
            }
        }

        events
    }
}
