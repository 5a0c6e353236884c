use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::client::ApiClient;
use crate::error::AppResult;
use crate::nutrition::{ActivityLevel, Gender, GoalKind};

/// A patient record as the Patients collaborator returns it: intake fields
/// plus the last-computed metrics the backend augments on create/update.
/// Foreign context to the plan, never owned data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: Uuid,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    /// Centimeters.
    pub height: f64,
    /// Kilograms.
    pub weight: f64,
    pub activity_level: ActivityLevel,
    pub goal: GoalKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical_notes: Option<String>,
    #[serde(default)]
    pub bmi: Option<f64>,
    #[serde(default)]
    pub bmr: Option<f64>,
    #[serde(default)]
    pub tdee: Option<f64>,
}

/// Intake payload for creating or updating a patient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientDraft {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub height: f64,
    pub weight: f64,
    pub activity_level: ActivityLevel,
    pub goal: GoalKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical_notes: Option<String>,
}

impl ApiClient {
    pub async fn list_patients(&self) -> AppResult<Vec<Patient>> {
        self.get_json("/api/v1/patients").await
    }

    pub async fn get_patient(&self, id: Uuid) -> AppResult<Patient> {
        self.get_json(&format!("/api/v1/patients/{id}")).await
    }

    pub async fn create_patient(&self, draft: &PatientDraft) -> AppResult<Patient> {
        self.post_json("/api/v1/patients", draft).await
    }

    pub async fn update_patient(&self, id: Uuid, draft: &PatientDraft) -> AppResult<Patient> {
        self.put_json(&format!("/api/v1/patients/{id}"), draft).await
    }

    pub async fn delete_patient(&self, id: Uuid) -> AppResult<()> {
        self.delete(&format!("/api/v1/patients/{id}")).await
    }
}
