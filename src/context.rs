use std::sync::Arc;

use crate::api::{ApiClient, DietApi};
use crate::config::AppConfig;
use crate::session::Notifications;

/// Root context for an embedding application: configuration, the remote API
/// seam and the notification queue, constructed once and passed down
/// explicitly instead of living in process-wide globals.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub api: Arc<dyn DietApi>,
    pub toasts: Notifications,
}

impl AppContext {
    pub fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let api = Arc::new(ApiClient::new(&config)?) as Arc<dyn DietApi>;
        Ok(Self {
            config,
            api,
            toasts: Notifications::new(),
        })
    }

    pub fn from_parts(config: Arc<AppConfig>, api: Arc<dyn DietApi>) -> Self {
        Self {
            config,
            api,
            toasts: Notifications::new(),
        }
    }

    /// A context wired to an in-memory collaborator with a small seeded
    /// exchange list. No network is touched.
    pub fn fake() -> Self {
        Self::from_parts(
            Arc::new(AppConfig::default()),
            Arc::new(fake::FakeApi::seeded()) as Arc<dyn DietApi>,
        )
    }
}

mod fake {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use time::OffsetDateTime;
    use uuid::Uuid;

    use crate::api::{
        AdviceItem, AuthResponse, ClinicalLog, DietApi, HistoryEntry, LoginRequest, LogStatus,
        NewClinicalLog, NewHistoryEntry, Patient, PatientDraft, PublicUser, RegisterRequest,
        Reminder,
    };
    use crate::error::{AppError, AppResult};
    use crate::exchange::FoodItem;
    use crate::nutrition;
    use crate::plan::WeekPlan;

    #[derive(Default)]
    struct FakeState {
        user: Option<PublicUser>,
        patients: Vec<Patient>,
        plans: HashMap<Uuid, WeekPlan>,
        logs: Vec<ClinicalLog>,
        reminders: Vec<Reminder>,
        history: Vec<HistoryEntry>,
        exchange: Vec<FoodItem>,
        advice: Vec<AdviceItem>,
    }

    /// In-memory stand-in for every collaborator. Mirrors the backend's one
    /// observable augmentation: create/update patient returns the record
    /// with computed bmi/bmr/tdee.
    pub(super) struct FakeApi {
        state: Mutex<FakeState>,
    }

    impl FakeApi {
        pub(super) fn seeded() -> Self {
            let item = |name: &str, group: &str, portion: &str, c: f64, p: f64, f: f64| FoodItem {
                name: name.into(),
                group: group.into(),
                subgroup: None,
                portion: portion.into(),
                carbohydrates: c,
                protein: p,
                fat: f,
                calories: c * 4.0 + p * 4.0 + f * 9.0,
            };
            let state = FakeState {
                exchange: vec![
                    item("White rice", "Starches", "1/3 cup cooked", 15.0, 3.0, 0.0),
                    item("Whole wheat bread", "Starches", "1 slice", 15.0, 3.0, 1.0),
                    item("Apple", "Fruits", "1 small", 15.0, 0.0, 0.0),
                    item("Skim milk", "Milk", "1 cup", 12.0, 8.0, 0.0),
                    item("Broccoli", "Vegetables", "1/2 cup cooked", 5.0, 2.0, 0.0),
                    item("Grilled chicken", "Meat", "1 oz", 0.0, 7.0, 3.0),
                    item("Olive oil", "Fats", "1 tsp", 0.0, 0.0, 5.0),
                ],
                advice: vec![AdviceItem {
                    category: "hydration".into(),
                    tip: "Aim for 500ml of water upon waking.".into(),
                }],
                ..FakeState::default()
            };
            Self {
                state: Mutex::new(state),
            }
        }

        fn augment(draft: &PatientDraft, id: Uuid) -> Patient {
            let bmi = nutrition::bmi(draft.weight, nutrition::cm_to_m(draft.height))
                .map(|r| r.bmi)
                .ok();
            let bmr =
                nutrition::bmr(draft.gender, draft.weight, draft.height, draft.age as f64).ok();
            let tdee = bmr.map(|b| nutrition::tdee(b, draft.activity_level));
            Patient {
                id,
                name: draft.name.clone(),
                age: draft.age,
                gender: draft.gender,
                height: draft.height,
                weight: draft.weight,
                activity_level: draft.activity_level,
                goal: draft.goal,
                medical_notes: draft.medical_notes.clone(),
                bmi,
                bmr,
                tdee,
            }
        }
    }

    #[async_trait]
    impl DietApi for FakeApi {
        async fn register(&self, req: &RegisterRequest) -> AppResult<AuthResponse> {
            let user = PublicUser {
                username: req.username.clone(),
                email: req.email.clone(),
            };
            self.state.lock().expect("fake state").user = Some(user.clone());
            Ok(AuthResponse {
                access_token: "fake-token".into(),
                username: user.username,
                email: user.email,
            })
        }

        async fn login(&self, req: &LoginRequest) -> AppResult<AuthResponse> {
            let user = PublicUser {
                username: req.email.split('@').next().unwrap_or("user").to_string(),
                email: req.email.clone(),
            };
            self.state.lock().expect("fake state").user = Some(user.clone());
            Ok(AuthResponse {
                access_token: "fake-token".into(),
                username: user.username,
                email: user.email,
            })
        }

        async fn me(&self) -> AppResult<PublicUser> {
            self.state
                .lock()
                .expect("fake state")
                .user
                .clone()
                .ok_or_else(|| AppError::remote("Not authenticated"))
        }

        fn logout(&self) {
            self.state.lock().expect("fake state").user = None;
        }

        async fn list_patients(&self) -> AppResult<Vec<Patient>> {
            Ok(self.state.lock().expect("fake state").patients.clone())
        }

        async fn get_patient(&self, id: Uuid) -> AppResult<Patient> {
            self.state
                .lock()
                .expect("fake state")
                .patients
                .iter()
                .find(|p| p.id == id)
                .cloned()
                .ok_or_else(|| AppError::remote("Patient not found"))
        }

        async fn create_patient(&self, draft: &PatientDraft) -> AppResult<Patient> {
            let patient = Self::augment(draft, Uuid::new_v4());
            self.state
                .lock()
                .expect("fake state")
                .patients
                .push(patient.clone());
            Ok(patient)
        }

        async fn update_patient(&self, id: Uuid, draft: &PatientDraft) -> AppResult<Patient> {
            let updated = Self::augment(draft, id);
            let mut state = self.state.lock().expect("fake state");
            let slot = state
                .patients
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or_else(|| AppError::remote("Patient not found"))?;
            *slot = updated.clone();
            Ok(updated)
        }

        async fn delete_patient(&self, id: Uuid) -> AppResult<()> {
            self.state
                .lock()
                .expect("fake state")
                .patients
                .retain(|p| p.id != id);
            Ok(())
        }

        async fn fetch_plan(&self, patient_id: Uuid) -> AppResult<WeekPlan> {
            Ok(self
                .state
                .lock()
                .expect("fake state")
                .plans
                .get(&patient_id)
                .cloned()
                .unwrap_or_default())
        }

        async fn save_plan(&self, patient_id: Uuid, plan: &WeekPlan) -> AppResult<()> {
            self.state
                .lock()
                .expect("fake state")
                .plans
                .insert(patient_id, plan.clone());
            Ok(())
        }

        async fn fetch_exchange_list(&self, category: Option<&str>) -> AppResult<Vec<FoodItem>> {
            let items = self.state.lock().expect("fake state").exchange.clone();
            Ok(match category {
                Some(c) => items.into_iter().filter(|i| i.group == c).collect(),
                None => items,
            })
        }

        async fn list_logs(&self, patient_id: Uuid) -> AppResult<Vec<ClinicalLog>> {
            Ok(self
                .state
                .lock()
                .expect("fake state")
                .logs
                .iter()
                .filter(|l| l.patient_id == patient_id)
                .cloned()
                .collect())
        }

        async fn create_log(&self, log: &NewClinicalLog) -> AppResult<ClinicalLog> {
            let stored = ClinicalLog {
                id: Uuid::new_v4(),
                patient_id: log.patient_id,
                date: log.date.clone(),
                time: log.time.clone(),
                text: log.text.clone(),
                status: log.status,
                kind: log.kind.clone(),
                created_at: OffsetDateTime::now_utc(),
            };
            self.state
                .lock()
                .expect("fake state")
                .logs
                .push(stored.clone());
            Ok(stored)
        }

        async fn update_log_status(&self, id: Uuid, status: LogStatus) -> AppResult<ClinicalLog> {
            let mut state = self.state.lock().expect("fake state");
            let log = state
                .logs
                .iter_mut()
                .find(|l| l.id == id)
                .ok_or_else(|| AppError::remote("Log not found"))?;
            log.status = status;
            Ok(log.clone())
        }

        async fn list_reminders(&self) -> AppResult<Vec<Reminder>> {
            Ok(self.state.lock().expect("fake state").reminders.clone())
        }

        async fn dismiss_reminder(&self, id: Uuid) -> AppResult<()> {
            self.state
                .lock()
                .expect("fake state")
                .reminders
                .retain(|r| r.id != id);
            Ok(())
        }

        async fn record_history(&self, entry: &NewHistoryEntry) -> AppResult<()> {
            let stored = HistoryEntry {
                id: Uuid::new_v4(),
                activity_type: entry.activity_type.clone(),
                input_data: entry.input_data.clone(),
                output_result: entry.output_result.clone(),
                created_at: OffsetDateTime::now_utc(),
            };
            self.state
                .lock()
                .expect("fake state")
                .history
                .push(stored);
            Ok(())
        }

        async fn list_history(&self) -> AppResult<Vec<HistoryEntry>> {
            Ok(self.state.lock().expect("fake state").history.clone())
        }

        async fn fetch_advice(&self, category: Option<&str>) -> AppResult<Vec<AdviceItem>> {
            let advice = self.state.lock().expect("fake state").advice.clone();
            Ok(match category {
                Some(c) => advice.into_iter().filter(|a| a.category == c).collect(),
                None => advice,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{LoginRequest, PatientDraft};
    use crate::nutrition::{ActivityLevel, Gender, GoalKind};
    use crate::plan::{MealSlot, WeekPlan, Weekday};

    fn draft() -> PatientDraft {
        PatientDraft {
            name: "Jamie Doe".into(),
            age: 25,
            gender: Gender::Male,
            height: 175.0,
            weight: 70.0,
            activity_level: ActivityLevel::Sedentary,
            goal: GoalKind::Maintenance,
            medical_notes: None,
        }
    }

    #[tokio::test]
    async fn fake_patient_create_augments_metrics() {
        let ctx = AppContext::fake();
        let patient = ctx.api.create_patient(&draft()).await.unwrap();
        assert_eq!(patient.bmi, Some(22.86));
        assert_eq!(patient.bmr, Some(1673.75));
        assert_eq!(patient.tdee, Some(1673.75 * 1.2));
    }

    #[tokio::test]
    async fn fake_plan_round_trip() {
        let ctx = AppContext::fake();
        let patient = ctx.api.create_patient(&draft()).await.unwrap();

        let foods = ctx.api.fetch_exchange_list(None).await.unwrap();
        let mut plan = WeekPlan::new();
        plan.add_food(Weekday::Monday, MealSlot::Breakfast, foods[0].clone());

        ctx.api.save_plan(patient.id, &plan).await.unwrap();
        let loaded = ctx.api.fetch_plan(patient.id).await.unwrap();
        assert_eq!(loaded, plan);
    }

    #[tokio::test]
    async fn fake_plan_is_empty_week_when_nothing_saved() {
        let ctx = AppContext::fake();
        let plan = ctx.api.fetch_plan(uuid::Uuid::new_v4()).await.unwrap();
        assert_eq!(plan.total_item_count(), 0);
        assert_eq!(plan.week_summary().len(), 7);
    }

    #[tokio::test]
    async fn fake_exchange_category_filter() {
        let ctx = AppContext::fake();
        let starches = ctx
            .api
            .fetch_exchange_list(Some("Starches"))
            .await
            .unwrap();
        assert!(!starches.is_empty());
        assert!(starches.iter().all(|f| f.group == "Starches"));
    }

    #[tokio::test]
    async fn fake_login_and_me() {
        let ctx = AppContext::fake();
        assert!(ctx.api.me().await.is_err());
        ctx.api
            .login(&LoginRequest {
                email: "pat@clinic.test".into(),
                password: "secret".into(),
            })
            .await
            .unwrap();
        let user = ctx.api.me().await.unwrap();
        assert_eq!(user.email, "pat@clinic.test");
    }
}
