//! # Scheduled Effects
//!
//! Commands a state transition asks the host to carry out.
//!
//! ## Design
//!
//! Transitions never touch the host widget themselves; they return
//! [`Effect`] values. The host feeds them into an [`EffectQueue`], which
//! holds each effect until the frame after the one it was produced in.
//! Setting the widget selection synchronously would make the widget emit
//! a selection event while the previous one is still being handled.
//!
//! - Effects deferred during frame `f` become ready at `f + 1`
//! - Consecutive selection effects collapse into the most recent one

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Effect {
    /// Move the host widget's selection
    SetSelection { start: usize, stop: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Scheduled {
    ready_at: u64,
    effect: Effect,
}

#[derive(Debug, Clone, Default)]
pub struct EffectQueue {
    frame: u64,
    pending: VecDeque<Scheduled>,
}

impl EffectQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Schedule `effects` for the next frame
    pub fn defer(&mut self, effects: impl IntoIterator<Item = Effect>) {
        let ready_at = self.frame + 1;
        for effect in effects {
            if let (Some(last), Effect::SetSelection { .. }) = (self.pending.back_mut(), effect) {
                if matches!(last.effect, Effect::SetSelection { .. }) {
                    *last = Scheduled { ready_at, effect };
                    continue;
                }
            }
            self.pending.push_back(Scheduled { ready_at, effect });
        }
    }

    /// Move to the next frame and release everything now due
    pub fn advance_frame(&mut self) -> Vec<Effect> {
        self.frame += 1;

        let mut ready = Vec::new();
        while let Some(scheduled) = self.pending.front() {
            if scheduled.ready_at > self.frame {
                break;
            }
            if let Some(scheduled) = self.pending.pop_front() {
                ready.push(scheduled.effect);
            }
        }
        ready
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
