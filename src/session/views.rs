use uuid::Uuid;

use crate::api::{ClinicalLog, DietApi, Reminder};
use crate::error::AppResult;

/// Reflection log for one patient, newest entry first.
pub async fn load_reflection_log(api: &dyn DietApi, patient_id: Uuid) -> AppResult<Vec<ClinicalLog>> {
    let mut logs = api.list_logs(patient_id).await?;
    sort_newest_first(&mut logs);
    Ok(logs)
}

/// Flips a log between pending and resolved, returning the stored record.
pub async fn toggle_log_status(api: &dyn DietApi, log: &ClinicalLog) -> AppResult<ClinicalLog> {
    api.update_log_status(log.id, log.status.toggled()).await
}

/// Open reminders ordered high > medium > low, oldest first within a band.
pub async fn load_reminder_queue(api: &dyn DietApi) -> AppResult<Vec<Reminder>> {
    let mut reminders = api.list_reminders().await?;
    sort_by_priority(&mut reminders);
    Ok(reminders)
}

fn sort_newest_first(logs: &mut [ClinicalLog]) {
    logs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

fn sort_by_priority(reminders: &mut [Reminder]) {
    reminders.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then_with(|| a.created_at.cmp(&b.created_at))
    });
}
