//! Session orchestration: the planner wizard, in-session goal tracking,
//! toast notifications and thin view helpers over the remote collaborators.

mod goals;
mod notify;
mod views;
mod wizard;

pub use goals::{Goal, GoalPhase, GoalTracker};
pub use notify::{Notifications, Toast, ToastLevel};
pub use views::{load_reflection_log, load_reminder_queue, toggle_log_status};
pub use wizard::{PatientMetrics, PlannerSession, PlannerStep};
