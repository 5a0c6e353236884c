use serde_json::json;
use tracing::{debug, warn};

use crate::api::{NewHistoryEntry, Patient};
use crate::context::AppContext;
use crate::error::{AppError, AppResult};
use crate::exchange::FoodItem;
use crate::export::{render_diet_plan, suggested_filename, ExportRequest};
use crate::nutrition::{self, BmiResult};
use crate::plan::{EntryId, MacroSpec, MacroTargets, MealSlot, NutrientTotals, WeekPlan, Weekday};

/// The five planner screens, in fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PlannerStep {
    PatientInfo,
    Calculations,
    MacroSetup,
    MealPlanner,
    WeeklyReview,
}

impl PlannerStep {
    pub const ALL: [PlannerStep; 5] = [
        PlannerStep::PatientInfo,
        PlannerStep::Calculations,
        PlannerStep::MacroSetup,
        PlannerStep::MealPlanner,
        PlannerStep::WeeklyReview,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PlannerStep::PatientInfo => "Patient Information",
            PlannerStep::Calculations => "Calculations",
            PlannerStep::MacroSetup => "Macro Setup",
            PlannerStep::MealPlanner => "Meal Planner",
            PlannerStep::WeeklyReview => "Weekly Review",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    /// Next step, saturating at the last screen.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1).min(Self::ALL.len() - 1)]
    }

    /// Previous step, saturating at the first screen.
    pub fn previous(self) -> Self {
        Self::ALL[self.index().saturating_sub(1)]
    }
}

/// Derived energy metrics for the saved patient snapshot.
#[derive(Debug, Clone, Copy)]
pub struct PatientMetrics {
    pub bmi: BmiResult,
    pub bmr: f64,
    pub tdee: f64,
    pub goal_calories: f64,
}

/// One dietitian's planning session for one patient: snapshot, derived
/// metrics, macro targets and the week being edited. All mutation is
/// synchronous; only collaborator calls are async.
pub struct PlannerSession {
    ctx: AppContext,
    step: PlannerStep,
    current_day: Weekday,
    patient: Option<Patient>,
    metrics: Option<PatientMetrics>,
    targets: Option<MacroTargets>,
    week: WeekPlan,
    dietary_focus: Option<String>,
}

impl PlannerSession {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            step: PlannerStep::PatientInfo,
            current_day: Weekday::Monday,
            patient: None,
            metrics: None,
            targets: None,
            week: WeekPlan::new(),
            dietary_focus: None,
        }
    }

    pub fn step(&self) -> PlannerStep {
        self.step
    }

    pub fn next_step(&mut self) {
        self.step = self.step.next();
    }

    pub fn previous_step(&mut self) {
        self.step = self.step.previous();
    }

    pub fn current_day(&self) -> Weekday {
        self.current_day
    }

    pub fn select_day(&mut self, day: Weekday) {
        self.current_day = day;
    }

    pub fn patient(&self) -> Option<&Patient> {
        self.patient.as_ref()
    }

    pub fn metrics(&self) -> Option<&PatientMetrics> {
        self.metrics.as_ref()
    }

    pub fn week(&self) -> &WeekPlan {
        &self.week
    }

    pub fn set_dietary_focus(&mut self, focus: impl Into<String>) {
        self.dietary_focus = Some(focus.into());
    }

    /// Stored targets, or the fixed default envelope before macros are
    /// confirmed.
    pub fn targets(&self) -> MacroTargets {
        self.targets.unwrap_or_default()
    }

    /// Stores the persisted patient snapshot and moves on to the
    /// calculations screen. Stale metrics from a previous patient are
    /// cleared.
    pub fn patient_saved(&mut self, patient: Patient) {
        debug!(patient = %patient.name, "patient snapshot stored");
        self.patient = Some(patient);
        self.metrics = None;
        self.targets = None;
        self.step = PlannerStep::Calculations;
    }

    /// Derives BMI, BMR, TDEE and goal calories from the stored snapshot.
    /// Explicitly user-triggered; nothing computes these as a side effect of
    /// reaching the screen.
    pub async fn compute_metrics(&mut self) -> AppResult<PatientMetrics> {
        let patient = self.patient.as_ref().ok_or(AppError::MissingPatientContext)?;

        let bmi = nutrition::bmi(patient.weight, nutrition::cm_to_m(patient.height))?;
        let bmr = nutrition::bmr(
            patient.gender,
            patient.weight,
            patient.height,
            patient.age as f64,
        )?;
        let tdee = nutrition::tdee(bmr, patient.activity_level);
        let goal_calories = nutrition::goal_calories(tdee, patient.goal);
        let metrics = PatientMetrics {
            bmi,
            bmr,
            tdee,
            goal_calories,
        };
        self.metrics = Some(metrics);

        self.record_history(
            "metrics_calculation",
            json!({
                "patient_id": patient.id,
                "weight": patient.weight,
                "height": patient.height,
                "age": patient.age,
            }),
            json!({
                "bmi": bmi.bmi,
                "bmr": bmr,
                "tdee": tdee,
                "goal_calories": goal_calories,
            }),
        )
        .await;
        Ok(metrics)
    }

    /// Resolves the chosen macro distribution against the goal calories and
    /// stores it as the week's target envelope. Its own user-triggered step,
    /// after `compute_metrics`.
    pub async fn confirm_macros(&mut self, spec: MacroSpec) -> AppResult<MacroTargets> {
        let metrics = self
            .metrics
            .as_ref()
            .ok_or_else(|| AppError::invalid_input("calculate energy metrics first"))?;

        let targets = spec.into_targets(metrics.goal_calories)?;
        self.targets = Some(targets);

        self.record_history(
            "macro_calculation",
            serde_json::to_value(spec).unwrap_or_default(),
            serde_json::to_value(targets).unwrap_or_default(),
        )
        .await;
        Ok(targets)
    }

    pub fn add_food(&mut self, slot: MealSlot, food: FoodItem) -> EntryId {
        self.week.add_food(self.current_day, slot, food).id
    }

    pub fn remove_food(&mut self, slot: MealSlot, id: EntryId) -> bool {
        self.week.remove_food(self.current_day, slot, id)
    }

    /// Remaining budget for the selected day against the current targets.
    pub fn remaining_today(&self) -> NutrientTotals {
        self.week.remaining(self.current_day, &self.targets())
    }

    /// Replaces the working week with the patient's stored plan.
    pub async fn load_plan(&mut self) -> AppResult<()> {
        let patient = self.patient.as_ref().ok_or(AppError::MissingPatientContext)?;
        self.week = self.ctx.api.fetch_plan(patient.id).await?;
        debug!(items = self.week.total_item_count(), "plan loaded");
        Ok(())
    }

    /// Persists the working week and records the save in the audit trail.
    pub async fn save_plan(&mut self) -> AppResult<()> {
        let patient = self.patient.as_ref().ok_or(AppError::MissingPatientContext)?;
        self.ctx.api.save_plan(patient.id, &self.week).await?;
        self.ctx.toasts.success("Diet plan saved");

        let patient_id = patient.id;
        self.record_history(
            "plan_save",
            json!({ "patient_id": patient_id }),
            json!({ "items": self.week.total_item_count() }),
        )
        .await;
        Ok(())
    }

    /// Renders the current session as a PDF; returns the download filename
    /// and the document bytes.
    pub fn export_pdf(&self, selected_day: Option<Weekday>) -> AppResult<(String, Vec<u8>)> {
        let targets = self.targets();
        let bytes = render_diet_plan(&ExportRequest {
            patient: self.patient.as_ref(),
            targets: &targets,
            week: &self.week,
            dietary_focus: self.dietary_focus.as_deref(),
            selected_day,
        })?;
        let patient = self.patient.as_ref().ok_or(AppError::MissingPatientContext)?;
        Ok((suggested_filename(patient), bytes))
    }

    /// Audit-trail writes are best effort: a failure is logged and the
    /// session continues.
    async fn record_history(
        &self,
        activity_type: &str,
        input_data: serde_json::Value,
        output_result: serde_json::Value,
    ) {
        let entry = NewHistoryEntry {
            activity_type: activity_type.to_string(),
            input_data,
            output_result,
        };
        if let Err(e) = self.ctx.api.record_history(&entry).await {
            warn!(activity = activity_type, error = %e, "history recording failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{DietApi, PatientDraft};
    use crate::nutrition::{ActivityLevel, Gender, GoalKind};

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

    async fn session_with_patient() -> PlannerSession {
        let ctx = AppContext::fake();
        let patient = ctx.api.create_patient(&draft()).await.unwrap();
        let mut session = PlannerSession::new(ctx);
        session.patient_saved(patient);
        session
    }

    #[test]
    fn step_navigation_clamps_at_both_ends() {
        let mut session = PlannerSession::new(AppContext::fake());
        assert_eq!(session.step(), PlannerStep::PatientInfo);

        session.previous_step();
        assert_eq!(session.step(), PlannerStep::PatientInfo);

        for _ in 0..10 {
            session.next_step();
        }
        assert_eq!(session.step(), PlannerStep::WeeklyReview);
    }

    #[tokio::test]
    async fn compute_metrics_requires_a_patient() {
        let mut session = PlannerSession::new(AppContext::fake());
        assert!(matches!(
            session.compute_metrics().await,
            Err(AppError::MissingPatientContext)
        ));
    }

    #[tokio::test]
    async fn metrics_then_macros_pipeline() {
        let mut session = session_with_patient().await;
        assert_eq!(session.step(), PlannerStep::Calculations);

        let metrics = session.compute_metrics().await.unwrap();
        assert_eq!(metrics.bmi.bmi, 22.86);
        assert_eq!(metrics.bmr, 1673.75);
        assert_eq!(metrics.tdee, 1673.75 * 1.2);
        assert_eq!(metrics.goal_calories, metrics.tdee);

        let targets = session
            .confirm_macros(MacroSpec::Percent {
                carbs: 40.0,
                protein: 30.0,
                fat: 30.0,
            })
            .await
            .unwrap();
        assert_eq!(targets.calories, metrics.goal_calories);
        assert!((targets.carbs - metrics.goal_calories * 0.4 / 4.0).abs() < 1e-9);
        assert_eq!(session.targets(), targets);
    }

    #[tokio::test]
    async fn macros_before_metrics_is_rejected() {
        let mut session = session_with_patient().await;
        let result = session
            .confirm_macros(MacroSpec::Grams {
                carbs: 180.0,
                protein: 140.0,
                fat: 60.0,
            })
            .await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn plan_save_and_load_round_trip() {
        let mut session = session_with_patient().await;
        let foods = session.ctx.api.fetch_exchange_list(None).await.unwrap();

        session.select_day(Weekday::Tuesday);
        let id = session.add_food(MealSlot::Lunch, foods[0].clone());
        session.save_plan().await.unwrap();
        assert!(!session.ctx.toasts.is_empty());

        session.remove_food(MealSlot::Lunch, id);
        assert_eq!(session.week().total_item_count(), 0);

        session.load_plan().await.unwrap();
        assert_eq!(session.week().total_item_count(), 1);
    }

    #[tokio::test]
    async fn export_returns_filename_and_pdf_bytes() {
        let mut session = session_with_patient().await;
        let foods = session.ctx.api.fetch_exchange_list(None).await.unwrap();
        session.add_food(MealSlot::Breakfast, foods[2].clone());

        let (filename, bytes) = session.export_pdf(None).unwrap();
        assert_eq!(filename, "Diet_Plan_Jamie_Doe.pdf");
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn calculations_append_to_the_audit_trail() {
        let mut session = session_with_patient().await;
        session.compute_metrics().await.unwrap();

        let history = session.ctx.api.list_history().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].activity_type, "metrics_calculation");
    }
}
