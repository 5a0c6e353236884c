use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::{AppError, AppResult};

/// One closed phase of a goal: the target that was in force and when it was
/// superseded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalPhase {
    pub target: String,
    #[serde(with = "time::serde::rfc3339")]
    pub ended_at: OffsetDateTime,
}

/// A patient goal with its current target and the history of targets it
/// evolved through.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: u64,
    pub title: String,
    pub target: String,
    pub phases: Vec<GoalPhase>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Local goal-evolution tracking. Goals live in the session only; nothing
/// here talks to a collaborator.
#[derive(Debug, Default)]
pub struct GoalTracker {
    goals: Vec<Goal>,
    next_id: u64,
}

impl GoalTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn add_goal(&mut self, title: impl Into<String>, target: impl Into<String>) -> &Goal {
        self.next_id += 1;
        self.goals.push(Goal {
            id: self.next_id,
            title: title.into(),
            target: target.into(),
            phases: Vec::new(),
            created_at: OffsetDateTime::now_utc(),
        });
        // just pushed
        &self.goals[self.goals.len() - 1]
    }

    /// Replaces the goal's target, archiving the previous one as a closed
    /// phase.
    pub fn evolve(&mut self, id: u64, new_target: impl Into<String>) -> AppResult<&Goal> {
        let goal = self
            .goals
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| AppError::invalid_input(format!("no goal with id {id}")))?;
        let previous = std::mem::replace(&mut goal.target, new_target.into());
        goal.phases.push(GoalPhase {
            target: previous,
            ended_at: OffsetDateTime::now_utc(),
        });
        Ok(goal)
    }

    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.goals.len();
        self.goals.retain(|g| g.id != id);
        self.goals.len() != before
    }
}
