//! Typed boundary to the remote dietetics API. Abstract contracts only: the
//! backend itself is an external collaborator.

mod advice;
mod auth;
mod client;
mod exchange;
mod history;
mod logs;
mod patients;
mod plans;
mod reminders;

use async_trait::async_trait;
use uuid::Uuid;

pub use advice::AdviceItem;
pub use auth::{AuthResponse, LoginRequest, PublicUser, RegisterRequest};
pub use client::ApiClient;
pub use history::{HistoryEntry, NewHistoryEntry};
pub use logs::{ClinicalLog, LogStatus, NewClinicalLog};
pub use patients::{Patient, PatientDraft};
pub use plans::PlanDocument;
pub use reminders::{Reminder, ReminderPriority};

use crate::error::AppResult;
use crate::exchange::FoodItem;
use crate::plan::WeekPlan;

/// Every remote collaborator the client consumes, behind one seam so the
/// session layer can run against an in-memory fake in tests.
#[async_trait]
pub trait DietApi: Send + Sync {
    // Auth
    async fn register(&self, req: &RegisterRequest) -> AppResult<AuthResponse>;
    async fn login(&self, req: &LoginRequest) -> AppResult<AuthResponse>;
    async fn me(&self) -> AppResult<PublicUser>;
    fn logout(&self);

    // Patients
    async fn list_patients(&self) -> AppResult<Vec<Patient>>;
    async fn get_patient(&self, id: Uuid) -> AppResult<Patient>;
    async fn create_patient(&self, draft: &PatientDraft) -> AppResult<Patient>;
    async fn update_patient(&self, id: Uuid, draft: &PatientDraft) -> AppResult<Patient>;
    async fn delete_patient(&self, id: Uuid) -> AppResult<()>;

    // Plans
    async fn fetch_plan(&self, patient_id: Uuid) -> AppResult<WeekPlan>;
    async fn save_plan(&self, patient_id: Uuid, plan: &WeekPlan) -> AppResult<()>;

    // Exchange list
    async fn fetch_exchange_list(&self, category: Option<&str>) -> AppResult<Vec<FoodItem>>;

    // Clinical logs
    async fn list_logs(&self, patient_id: Uuid) -> AppResult<Vec<ClinicalLog>>;
    async fn create_log(&self, log: &NewClinicalLog) -> AppResult<ClinicalLog>;
    async fn update_log_status(&self, id: Uuid, status: LogStatus) -> AppResult<ClinicalLog>;

    // Reminders
    async fn list_reminders(&self) -> AppResult<Vec<Reminder>>;
    async fn dismiss_reminder(&self, id: Uuid) -> AppResult<()>;

    // History
    async fn record_history(&self, entry: &NewHistoryEntry) -> AppResult<()>;
    async fn list_history(&self) -> AppResult<Vec<HistoryEntry>>;

    // Advice
    async fn fetch_advice(&self, category: Option<&str>) -> AppResult<Vec<AdviceItem>>;
}

#[async_trait]
impl DietApi for ApiClient {
    async fn register(&self, req: &RegisterRequest) -> AppResult<AuthResponse> {
        ApiClient::register(self, req).await
    }
    async fn login(&self, req: &LoginRequest) -> AppResult<AuthResponse> {
        ApiClient::login(self, req).await
    }
    async fn me(&self) -> AppResult<PublicUser> {
        ApiClient::me(self).await
    }
    fn logout(&self) {
        ApiClient::logout(self)
    }

    async fn list_patients(&self) -> AppResult<Vec<Patient>> {
        ApiClient::list_patients(self).await
    }
    async fn get_patient(&self, id: Uuid) -> AppResult<Patient> {
        ApiClient::get_patient(self, id).await
    }
    async fn create_patient(&self, draft: &PatientDraft) -> AppResult<Patient> {
        ApiClient::create_patient(self, draft).await
    }
    async fn update_patient(&self, id: Uuid, draft: &PatientDraft) -> AppResult<Patient> {
        ApiClient::update_patient(self, id, draft).await
    }
    async fn delete_patient(&self, id: Uuid) -> AppResult<()> {
        ApiClient::delete_patient(self, id).await
    }

    async fn fetch_plan(&self, patient_id: Uuid) -> AppResult<WeekPlan> {
        ApiClient::fetch_plan(self, patient_id).await
    }
    async fn save_plan(&self, patient_id: Uuid, plan: &WeekPlan) -> AppResult<()> {
        ApiClient::save_plan(self, patient_id, plan).await
    }

    async fn fetch_exchange_list(&self, category: Option<&str>) -> AppResult<Vec<FoodItem>> {
        ApiClient::fetch_exchange_list(self, category).await
    }

    async fn list_logs(&self, patient_id: Uuid) -> AppResult<Vec<ClinicalLog>> {
        ApiClient::list_logs(self, patient_id).await
    }
    async fn create_log(&self, log: &NewClinicalLog) -> AppResult<ClinicalLog> {
        ApiClient::create_log(self, log).await
    }
    async fn update_log_status(&self, id: Uuid, status: LogStatus) -> AppResult<ClinicalLog> {
        ApiClient::update_log_status(self, id, status).await
    }

    async fn list_reminders(&self) -> AppResult<Vec<Reminder>> {
        ApiClient::list_reminders(self).await
    }
    async fn dismiss_reminder(&self, id: Uuid) -> AppResult<()> {
        ApiClient::dismiss_reminder(self, id).await
    }

    async fn record_history(&self, entry: &NewHistoryEntry) -> AppResult<()> {
        ApiClient::record_history(self, entry).await
    }
    async fn list_history(&self) -> AppResult<Vec<HistoryEntry>> {
        ApiClient::list_history(self).await
    }

    async fn fetch_advice(&self, category: Option<&str>) -> AppResult<Vec<AdviceItem>> {
        ApiClient::fetch_advice(self, category).await
    }
}
