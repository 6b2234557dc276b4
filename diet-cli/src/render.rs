use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};
use diet_core::{
    DailySummary, EnergyTargets, GoalProgress, MacroProgress, MacroTargets, MealGroups, PlanSet,
    Trajectory, UserProfile, WeeklyReport, WeightRange, display_percent,
};

const BAR_WIDTH: usize = 20;

pub fn fmt_kg(x: f64) -> String {
    let v = (x * 10.0).round() / 10.0;
    if (v - v.round()).abs() < 1e-9 {
        format!("{:.0} kg", v)
    } else {
        format!("{:.1} kg", v)
    }
}

pub fn fmt_kcal(x: f64) -> String {
    format!("{:.0} kcal", x.round())
}

/// Text progress bar for a percentage already clamped to [0, 100].
pub fn bar(percent: f64) -> String {
    let filled = ((percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!(
        "[{}{}] {:>5.1}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        percent
    )
}

fn table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
                .collect::<Vec<_>>(),
        );
    table
}

pub fn energy_table(profile: &UserProfile, energy: &EnergyTargets, range: &WeightRange) -> Table {
    let m = &profile.metrics;
    let mut t = table(&["Metric", "Value", "Notes"]);
    t.add_row(vec![
        Cell::new("Body"),
        Cell::new(format!(
            "{}, {} y, {:.0} cm, {}",
            m.sex(),
            m.age_years(),
            m.height_cm(),
            fmt_kg(m.weight_kg())
        )),
        Cell::new(""),
    ]);
    t.add_row(vec![
        Cell::new("BMR"),
        Cell::new(fmt_kcal(energy.bmr)),
        Cell::new("Mifflin-St Jeor"),
    ]);
    t.add_row(vec![
        Cell::new("TDEE"),
        Cell::new(format!("{} kcal", energy.tdee)),
        Cell::new(format!(
            "{}: {} (x{})",
            m.activity_level(),
            m.activity_level().description(),
            m.activity_level().factor()
        )),
    ]);
    t.add_row(vec![
        Cell::new("Healthy weight"),
        Cell::new(format!("{} - {}", fmt_kg(range.min_kg), fmt_kg(range.max_kg))),
        Cell::new("BMI 18.5 - 24.9"),
    ]);
    t.add_row(vec![
        Cell::new("Target weight"),
        Cell::new(fmt_kg(profile.target_weight_kg)),
        Cell::new(""),
    ]);
    t
}

pub fn plans_table(plans: &PlanSet, selected: diet_core::PlanLabel) -> Table {
    let mut t = table(&["Plan", "Speed", "Calories", "Duration", "Notes"]);
    for plan in plans.iter() {
        let mut name = Cell::new(plan.label.to_string());
        if plan.label == selected {
            name = name.add_attribute(Attribute::Bold).fg(Color::Green);
        }
        let notes = match plan.warning {
            Some(w) => Cell::new(w.to_string()).fg(Color::Yellow),
            None => Cell::new(if plan.label == selected { "selected" } else { "" }),
        };
        t.add_row(vec![
            name,
            Cell::new(format!("{} kg/week", plan.speed_kg_per_week)),
            Cell::new(format!("{} kcal", plan.target_calories)),
            Cell::new(format!("~{} weeks", plan.estimated_weeks)),
            notes,
        ]);
    }
    t
}

pub fn trajectory_table(trajectory: &Trajectory) -> Table {
    let mut t = table(&["Point", "Weight"]);
    for (label, kg) in trajectory.labeled() {
        t.add_row(vec![Cell::new(label), Cell::new(fmt_kg(kg))]);
    }
    t
}

pub fn macro_targets_table(macros: &MacroTargets) -> Table {
    let mut t = table(&["Macro", "Target", "Share"]);
    t.add_row(vec![
        Cell::new("Protein"),
        Cell::new(format!("{} g", macros.protein_g)),
        Cell::new("30%"),
    ]);
    t.add_row(vec![
        Cell::new("Carbohydrate"),
        Cell::new(format!("{} g", macros.carb_g)),
        Cell::new("40%"),
    ]);
    t.add_row(vec![
        Cell::new("Fat"),
        Cell::new(format!("{} g", macros.fat_g)),
        Cell::new("30%"),
    ]);
    t
}

fn macro_row(name: &str, m: &MacroProgress) -> Vec<Cell> {
    vec![
        Cell::new(name),
        Cell::new(format!("{:.0} / {} g", m.total_g, m.target_g)),
        Cell::new(bar(m.percent)),
    ]
}

pub fn summary_table(s: &DailySummary) -> Table {
    let mut t = table(&["", "Amount", "Progress"]);
    t.add_row(vec![
        Cell::new("Eaten"),
        Cell::new(fmt_kcal(s.total_calories_in)),
        Cell::new(""),
    ]);
    t.add_row(vec![
        Cell::new("Burnt"),
        Cell::new(fmt_kcal(s.total_calories_burnt)),
        Cell::new(""),
    ]);
    t.add_row(vec![
        Cell::new("Net"),
        Cell::new(format!("{} / {} kcal", s.net_calories.round(), s.calorie_target)),
        Cell::new(bar(s.progress_percent)),
    ]);
    let remaining = Cell::new(fmt_kcal(s.remaining_calories));
    t.add_row(vec![
        Cell::new("Remaining"),
        if s.remaining_calories < 0.0 {
            remaining.fg(Color::Red)
        } else {
            remaining
        },
        Cell::new(""),
    ]);
    t.add_row(macro_row("Protein", &s.protein));
    t.add_row(macro_row("Carbohydrate", &s.carb));
    t.add_row(macro_row("Fat", &s.fat));
    let h = &s.hydration;
    t.add_row(vec![
        Cell::new("Water"),
        Cell::new(format!("{} / {} ml", h.water_ml, h.target_ml)),
        Cell::new(format!("{} of {} glasses", h.drunk_glasses, h.total_glasses)),
    ]);
    t
}

pub fn meals_table(groups: &MealGroups<'_>) -> Table {
    let mut t = table(&["Meal", "Item", "Portion", "Calories"]);
    for (slot, foods) in groups.iter() {
        for food in foods {
            t.add_row(vec![
                Cell::new(slot.to_string()),
                Cell::new(&food.name),
                Cell::new(food.portion.as_deref().unwrap_or("")),
                Cell::new(fmt_kcal(food.calories)),
            ]);
        }
    }
    for ex in &groups.exercises {
        t.add_row(vec![
            Cell::new("Exercise").fg(Color::Green),
            Cell::new(&ex.name),
            Cell::new(format!("{} min", ex.duration_minutes)),
            Cell::new(format!("-{}", fmt_kcal(ex.calories_burnt))),
        ]);
    }
    t
}

pub fn goal_line(g: &GoalProgress) -> String {
    if g.reached {
        format!("target of {} reached", fmt_kg(g.target_kg))
    } else {
        format!(
            "{} to go ({}), {} -> {}",
            fmt_kg(g.remaining_kg),
            g.direction,
            fmt_kg(g.current_kg),
            fmt_kg(g.target_kg)
        )
    }
}

pub fn weekly_table(report: &WeeklyReport, calorie_target: u32) -> Table {
    let mut t = table(&["Day", "Eaten", "Of target"]);
    let last = report.calories.len() - 1;
    for (i, &kcal) in report.calories.iter().enumerate() {
        let day = if i == last {
            "Today".to_string()
        } else {
            format!("-{}", last - i)
        };
        t.add_row(vec![
            Cell::new(day),
            Cell::new(fmt_kcal(kcal)),
            Cell::new(bar(display_percent(kcal, calorie_target as f64))),
        ]);
    }
    t
}
