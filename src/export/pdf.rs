use std::io::BufWriter;

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};
use time::OffsetDateTime;
use tracing::debug;

use crate::api::Patient;
use crate::error::{AppError, AppResult};
use crate::nutrition::{KCAL_PER_GRAM_CARBS, KCAL_PER_GRAM_FAT, KCAL_PER_GRAM_PROTEIN};
use crate::plan::{MacroTargets, MealSlot, WeekPlan, Weekday};

// printpdf's Mm wraps f32; all page geometry stays f32 to match.
const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const LEFT: f32 = 14.0;
const TOP_Y: f32 = 280.0;
/// Starting a meal or summary table below this cursor height would crowd the
/// page bottom, so a new page is opened first.
const SECTION_FLOOR: f32 = 77.0;
const ROW_FLOOR: f32 = 20.0;

/// Everything the renderer needs; the patient snapshot is mandatory.
pub struct ExportRequest<'a> {
    pub patient: Option<&'a Patient>,
    pub targets: &'a MacroTargets,
    pub week: &'a WeekPlan,
    /// Optional free-text focus paragraph included below the targets.
    pub dietary_focus: Option<&'a str>,
    /// When set, only this day's meal table is rendered and the weekly
    /// summary is omitted.
    pub selected_day: Option<Weekday>,
}

/// Download name for the rendered document.
pub fn suggested_filename(patient: &Patient) -> String {
    let name: Vec<&str> = patient.name.split_whitespace().collect();
    if name.is_empty() {
        "Diet_Plan.pdf".to_string()
    } else {
        format!("Diet_Plan_{}.pdf", name.join("_"))
    }
}

/// Renders the paginated diet-plan document and returns the PDF bytes.
///
/// Aborts with `MissingPatientContext` when no patient snapshot is provided
/// rather than producing a malformed document.
pub fn render_diet_plan(req: &ExportRequest<'_>) -> AppResult<Vec<u8>> {
    let patient = req.patient.ok_or(AppError::MissingPatientContext)?;

    let (doc, page, layer) = PdfDocument::new(
        format!("Diet Plan - {}", patient.name),
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Layer 1",
    );
    let regular = add_font(&doc, BuiltinFont::Helvetica)?;
    let bold = add_font(&doc, BuiltinFont::HelveticaBold)?;
    let mut pager = Pager {
        doc: &doc,
        layer: doc.get_page(page).get_layer(layer),
        y: TOP_Y,
    };

    patient_block(&mut pager, patient, &regular, &bold);
    targets_table(&mut pager, req.targets, &regular, &bold);

    if let Some(focus) = req.dietary_focus.filter(|f| !f.trim().is_empty()) {
        heading(&mut pager, "Dietary Focus / Approach", &bold);
        for line in wrap_text(focus, 90) {
            pager.text(&line, 10.0, LEFT, &regular);
            pager.advance(5.0);
        }
        pager.advance(8.0);
    }

    let days: Vec<Weekday> = match req.selected_day {
        Some(day) => vec![day],
        None => Weekday::ALL.to_vec(),
    };
    for day in &days {
        day_table(&mut pager, req.week, *day, &regular, &bold);
    }

    if req.selected_day.is_none() {
        weekly_summary_table(&mut pager, req.week, &regular, &bold);
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| AppError::ExportFailure(e.to_string()))?;
    let bytes = buf
        .into_inner()
        .map_err(|e| AppError::ExportFailure(e.to_string()))?;
    debug!(patient = %patient.name, pages = days.len(), size = bytes.len(), "diet plan rendered");
    Ok(bytes)
}

struct Pager<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
}

impl Pager<'_> {
    fn text(&self, s: &str, size: f32, x: f32, font: &IndirectFontRef) {
        self.layer.use_text(s, size, Mm(x), Mm(self.y), font);
    }

    fn advance(&mut self, dy: f32) {
        self.y -= dy;
    }

    /// Opens a new page when the cursor has crossed the given floor.
    fn ensure(&mut self, floor: f32) {
        if self.y < floor {
            let (page, layer) = self
                .doc
                .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = TOP_Y;
        }
    }
}

fn add_font(doc: &PdfDocumentReference, font: BuiltinFont) -> AppResult<IndirectFontRef> {
    doc.add_builtin_font(font)
        .map_err(|e| AppError::ExportFailure(format!("font error: {e}")))
}

fn heading(pager: &mut Pager<'_>, text: &str, bold: &IndirectFontRef) {
    pager.text(text, 14.0, LEFT, bold);
    pager.advance(10.0);
}

fn field(pager: &mut Pager<'_>, label: &str, value: &str, regular: &IndirectFontRef, bold: &IndirectFontRef) {
    pager.text(&format!("{label}:"), 10.0, LEFT, bold);
    pager.text(value, 10.0, LEFT + 40.0, regular);
    pager.advance(6.0);
}

fn patient_block(
    pager: &mut Pager<'_>,
    patient: &Patient,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
) {
    heading(pager, "Patient Information", bold);

    field(pager, "Patient Name", &patient.name, regular, bold);
    field(pager, "Age", &format!("{} years", patient.age), regular, bold);
    field(pager, "Gender", &patient.gender.to_string(), regular, bold);
    field(pager, "Height", &format!("{} cm", patient.height), regular, bold);
    field(pager, "Weight", &format!("{} kg", patient.weight), regular, bold);
    field(pager, "Activity Level", &patient.activity_level.to_string(), regular, bold);
    field(pager, "Goal", &patient.goal.to_string(), regular, bold);
    field(
        pager,
        "Date of Plan",
        &OffsetDateTime::now_utc().date().to_string(),
        regular,
        bold,
    );

    if let Some(notes) = patient.medical_notes.as_deref().filter(|n| !n.is_empty()) {
        pager.text("Notes:", 10.0, LEFT, bold);
        pager.advance(5.0);
        for line in wrap_text(notes, 100) {
            pager.text(&line, 9.0, LEFT, regular);
            pager.advance(4.0);
        }
        pager.advance(4.0);
    }
    pager.advance(8.0);
}

/// Percentage contribution of each macro to total calories, rounded.
fn macro_percentages(targets: &MacroTargets) -> (i64, i64, i64) {
    if targets.calories <= 0.0 {
        return (0, 0, 0);
    }
    let pct = |grams: f64, kcal_per_gram: f64| {
        (grams * kcal_per_gram / targets.calories * 100.0).round() as i64
    };
    (
        pct(targets.carbs, KCAL_PER_GRAM_CARBS),
        pct(targets.protein, KCAL_PER_GRAM_PROTEIN),
        pct(targets.fat, KCAL_PER_GRAM_FAT),
    )
}

fn targets_table(
    pager: &mut Pager<'_>,
    targets: &MacroTargets,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
) {
    heading(pager, "Daily Energy & Macronutrient Targets", bold);

    let (carbs_pct, protein_pct, fat_pct) = macro_percentages(targets);
    let cols = [LEFT, LEFT + 50.0, LEFT + 90.0];
    let header = ["Nutrient", "Grams", "Percentage"];
    for (text, x) in header.iter().zip(cols) {
        pager.text(text, 10.0, x, bold);
    }
    pager.advance(6.0);

    let rows = [
        ("Total Calories", format!("{} kcal", round0(targets.calories)), "100%".to_string()),
        ("Carbohydrates", format!("{}g", round0(targets.carbs)), format!("{carbs_pct}%")),
        ("Protein", format!("{}g", round0(targets.protein)), format!("{protein_pct}%")),
        ("Fat", format!("{}g", round0(targets.fat)), format!("{fat_pct}%")),
    ];
    for (name, grams, pct) in rows {
        pager.text(name, 10.0, cols[0], bold);
        pager.text(&grams, 10.0, cols[1], regular);
        pager.text(&pct, 10.0, cols[2], regular);
        pager.advance(6.0);
    }
    pager.advance(8.0);
}

fn export_slot_label(slot: MealSlot) -> &'static str {
    match slot {
        MealSlot::Breakfast => "Breakfast",
        MealSlot::Snack => "Mid-morning Snack",
        MealSlot::Lunch => "Lunch",
        MealSlot::Dinner => "Dinner",
    }
}

fn day_table(
    pager: &mut Pager<'_>,
    week: &WeekPlan,
    day: Weekday,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
) {
    pager.ensure(SECTION_FLOOR);
    heading(pager, &format!("Daily Meal Plan - {day}"), bold);

    let cols = [LEFT, LEFT + 36.0, LEFT + 106.0, LEFT + 126.0, LEFT + 148.0, LEFT + 170.0];
    let header = ["Meal", "Foods", "Calories", "Carbs (g)", "Protein (g)", "Fat (g)"];
    for (text, x) in header.iter().zip(cols) {
        pager.text(text, 9.0, x, bold);
    }
    pager.advance(5.0);

    for slot in MealSlot::ALL {
        pager.ensure(ROW_FLOOR);
        let entries = week.get_slot(day, slot);
        pager.text(export_slot_label(slot), 9.0, cols[0], bold);

        if entries.is_empty() {
            for x in &cols[1..] {
                pager.text("-", 9.0, *x, regular);
            }
            pager.advance(5.0);
            continue;
        }

        let totals = week.meal_totals(day, slot);
        let names = entries
            .iter()
            .map(|e| e.food.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let name_lines = wrap_text(&names, 40);
        pager.text(&name_lines[0], 9.0, cols[1], regular);
        pager.text(&round0(totals.calories), 9.0, cols[2], regular);
        pager.text(&round0(totals.carbs), 9.0, cols[3], regular);
        pager.text(&round0(totals.protein), 9.0, cols[4], regular);
        pager.text(&round0(totals.fat), 9.0, cols[5], regular);
        pager.advance(5.0);
        for line in &name_lines[1..] {
            pager.ensure(ROW_FLOOR);
            pager.text(line, 9.0, cols[1], regular);
            pager.advance(5.0);
        }
    }

    pager.ensure(ROW_FLOOR);
    let day_totals = week.day_totals(day);
    pager.text("TOTAL", 9.0, cols[0], bold);
    pager.text(&round0(day_totals.calories), 9.0, cols[2], bold);
    pager.text(&round0(day_totals.carbs), 9.0, cols[3], bold);
    pager.text(&round0(day_totals.protein), 9.0, cols[4], bold);
    pager.text(&round0(day_totals.fat), 9.0, cols[5], bold);
    pager.advance(12.0);
}

fn weekly_summary_table(
    pager: &mut Pager<'_>,
    week: &WeekPlan,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
) {
    pager.ensure(SECTION_FLOOR);
    heading(pager, "Weekly Summary", bold);

    let cols = [LEFT, LEFT + 46.0, LEFT + 76.0];
    let header = ["Day", "Items", "Total Calories"];
    for (text, x) in header.iter().zip(cols) {
        pager.text(text, 10.0, x, bold);
    }
    pager.advance(6.0);

    for row in week.week_summary() {
        pager.ensure(ROW_FLOOR);
        pager.text(row.day.label(), 10.0, cols[0], bold);
        pager.text(&row.item_count.to_string(), 10.0, cols[1], regular);
        pager.text(&round0(row.totals.calories), 10.0, cols[2], regular);
        pager.advance(6.0);
    }
}

fn round0(v: f64) -> String {
    format!("{}", v.round() as i64)
}

/// Greedy word wrap; words longer than the limit land on their own line.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.len() + 1 + word.len() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrition::{ActivityLevel, Gender, GoalKind};
    use crate::testutil::food;
    use uuid::Uuid;

    fn patient() -> Patient {
        Patient {
            id: Uuid::new_v4(),
            name: "Jamie Doe".into(),
            age: 25,
            gender: Gender::Female,
            height: 165.0,
            weight: 60.0,
            activity_level: ActivityLevel::LightlyActive,
            goal: GoalKind::WeightLoss,
            medical_notes: Some("Mild lactose intolerance; prefers morning workouts.".into()),
            bmi: Some(22.0),
            bmr: Some(1350.0),
            tdee: Some(1856.0),
        }
    }

    fn sample_week() -> WeekPlan {
        let mut week = WeekPlan::new();
        for day in Weekday::ALL {
            week.add_food(day, MealSlot::Breakfast, food("Oats", "Starches", 27.0, 5.0, 3.0));
            week.add_food(day, MealSlot::Lunch, food("Chicken bowl", "Meat", 45.0, 35.0, 12.0));
            week.add_food(day, MealSlot::Dinner, food("Salmon plate", "Meat", 30.0, 28.0, 15.0));
        }
        week
    }

    #[test]
    fn rendering_without_a_patient_aborts() {
        let week = WeekPlan::new();
        let targets = MacroTargets::default();
        let req = ExportRequest {
            patient: None,
            targets: &targets,
            week: &week,
            dietary_focus: None,
            selected_day: None,
        };
        assert!(matches!(
            render_diet_plan(&req),
            Err(AppError::MissingPatientContext)
        ));
    }

    #[test]
    fn full_week_renders_a_pdf() {
        let patient = patient();
        let week = sample_week();
        let targets = MacroTargets::default();
        let req = ExportRequest {
            patient: Some(&patient),
            targets: &targets,
            week: &week,
            dietary_focus: Some("Weight loss with moderate carb restriction."),
            selected_day: None,
        };
        let bytes = render_diet_plan(&req).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn single_day_export_is_smaller_than_the_full_week() {
        let patient = patient();
        let week = sample_week();
        let targets = MacroTargets::default();

        let full = render_diet_plan(&ExportRequest {
            patient: Some(&patient),
            targets: &targets,
            week: &week,
            dietary_focus: None,
            selected_day: None,
        })
        .unwrap();
        let single = render_diet_plan(&ExportRequest {
            patient: Some(&patient),
            targets: &targets,
            week: &week,
            dietary_focus: None,
            selected_day: Some(Weekday::Monday),
        })
        .unwrap();
        assert!(single.len() < full.len());
    }

    #[test]
    fn filename_replaces_whitespace() {
        let mut p = patient();
        assert_eq!(suggested_filename(&p), "Diet_Plan_Jamie_Doe.pdf");
        p.name = "   ".into();
        assert_eq!(suggested_filename(&p), "Diet_Plan.pdf");
    }

    #[test]
    fn macro_percentages_match_the_target_envelope() {
        // 200*4=800, 150*4=600, 65*9=585 of 2000 kcal.
        let (c, p, f) = macro_percentages(&MacroTargets::default());
        assert_eq!((c, p, f), (40, 30, 29));

        let zero = MacroTargets {
            calories: 0.0,
            carbs: 10.0,
            protein: 10.0,
            fat: 10.0,
        };
        assert_eq!(macro_percentages(&zero), (0, 0, 0));
    }

    #[test]
    fn wrap_text_respects_the_width() {
        let lines = wrap_text("White rice, Grilled chicken, Olive oil, Apple", 20);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.len() <= 20));
        assert_eq!(wrap_text("", 10), vec![String::new()]);
    }
}
