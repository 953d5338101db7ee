//! Per-robot task queue

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::core::types::SimMinutes;

/// Household chores a robot can carry out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskKind {
    Cleaning,
    Tidying,
    Cooking,
    Laundry,
    Charging,
    Patrol,
}

/// A task is a chore with context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub kind: TaskKind,
    pub priority: TaskPriority,
    pub created_at: SimMinutes,
    pub progress: f32,
    pub source: TaskSource,
}

/// Higher value runs first; equal priorities keep arrival order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum TaskPriority {
    Low = 0,
    Normal = 1,
    High = 2,
    Critical = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskSource {
    /// Issued by the user; survives emergencies
    PlayerCommand,
    /// Picked by the robot's own scheduler
    Autonomous,
}

impl Task {
    pub fn new(kind: TaskKind, priority: TaskPriority, now: SimMinutes) -> Self {
        Self {
            kind,
            priority,
            created_at: now,
            progress: 0.0,
            source: TaskSource::Autonomous,
        }
    }

    pub fn from_player(mut self) -> Self {
        self.source = TaskSource::PlayerCommand;
        self
    }

    pub fn is_autonomous(&self) -> bool {
        self.source == TaskSource::Autonomous
    }
}

/// Queue of tasks for a robot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskQueue {
    current: Option<Task>,
    queued: VecDeque<Task>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self {
            current: None,
            queued: VecDeque::new(),
        }
    }

    pub fn current(&self) -> Option<&Task> {
        self.current.as_ref()
    }

    pub fn len(&self) -> usize {
        self.queued.len() + usize::from(self.current.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn push(&mut self, task: Task) {
        let pos = self
            .queued
            .iter()
            .position(|t| task.priority as u8 > t.priority as u8)
            .unwrap_or(self.queued.len());
        self.queued.insert(pos, task);

        if self.current.is_none() {
            self.current = self.queued.pop_front();
        }
    }

    /// Drop every autonomous task, including the one in progress
    ///
    /// Player commands stay queued in the same order. Returns the
    /// number of tasks removed.
    pub fn clear_autonomous(&mut self) -> usize {
        let before = self.len();
        self.queued.retain(|t| !t.is_autonomous());
        if self.current.as_ref().is_some_and(Task::is_autonomous) {
            self.current = self.queued.pop_front();
        }
        before - self.len()
    }
}
