//! Numbered menu dispatcher.
//!
//! Maps each choice to one tracker service call. Decisions live in core;
//! this module only collects validated input and prints results.

use crate::prompt::{Console, PromptResult};
use diettrack_core::{
    validate_activity_level, validate_age, validate_date, validate_positive_number, DietEntry,
    EntryStore, FeatureSet, MacroTargets, PlannedIntake, ServiceError, TrackerService, WeightGoal,
};
use log::{error, info};
use std::io::{BufRead, Write};

const MENU_LINES: [&str; 8] = [
    "1. Enter diet information for the day",
    "2. Delete a diet entry",
    "3. Display all data",
    "4. Get feedback for staying on track",
    "5. Predict future weight",
    "6. Get a personalized weight loss plan",
    "7. Generate meal plan",
    "8. Exit",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    EnterEntry,
    DeleteEntry,
    DisplayData,
    Feedback,
    PredictWeight,
    WeightLossPlan,
    MealPlan,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() || !input.bytes().all(|byte| byte.is_ascii_digit()) {
            return None;
        }
        match input.parse::<u8>().ok()? {
            1 => Some(Self::EnterEntry),
            2 => Some(Self::DeleteEntry),
            3 => Some(Self::DisplayData),
            4 => Some(Self::Feedback),
            5 => Some(Self::PredictWeight),
            6 => Some(Self::WeightLossPlan),
            7 => Some(Self::MealPlan),
            8 => Some(Self::Exit),
            _ => None,
        }
    }

    fn event_name(self) -> &'static str {
        match self {
            Self::EnterEntry => "enter_entry",
            Self::DeleteEntry => "delete_entry",
            Self::DisplayData => "display_data",
            Self::Feedback => "feedback",
            Self::PredictWeight => "predict_weight",
            Self::WeightLossPlan => "weight_loss_plan",
            Self::MealPlan => "meal_plan",
            Self::Exit => "exit",
        }
    }
}

/// Runs the menu until the user exits or input ends.
pub fn run_menu<S, R, W>(service: &TrackerService<S>, console: &mut Console<R, W>) -> PromptResult<()>
where
    S: EntryStore,
    R: BufRead,
    W: Write,
{
    loop {
        print_menu(console)?;
        let line = console.read_line("Enter your choice (1-8): ")?;
        let Some(choice) = MenuChoice::parse(&line) else {
            console.say("\nInvalid choice. Please enter a number from 1 to 8.")?;
            continue;
        };
        info!("event=menu_choice module=cli status=ok choice={}", choice.event_name());

        match choice {
            MenuChoice::EnterEntry => enter_entry(service, console)?,
            MenuChoice::DeleteEntry => delete_entry(service, console)?,
            MenuChoice::DisplayData => display_data(service, console)?,
            MenuChoice::Feedback => show_feedback(service, console)?,
            MenuChoice::PredictWeight => predict(service, console)?,
            MenuChoice::WeightLossPlan => weight_loss_plan(service, console)?,
            MenuChoice::MealPlan => meal_plan(service, console)?,
            MenuChoice::Exit => {
                console.say("\nExiting...")?;
                return Ok(());
            }
        }
    }
}

fn print_menu<R: BufRead, W: Write>(console: &mut Console<R, W>) -> PromptResult<()> {
    console.say("\nDiet Tracking Menu")?;
    console.say("------------------")?;
    for line in MENU_LINES {
        console.say(line)?;
    }
    Ok(())
}

fn enter_entry<S, R, W>(service: &TrackerService<S>, console: &mut Console<R, W>) -> PromptResult<()>
where
    S: EntryStore,
    R: BufRead,
    W: Write,
{
    let date = console.prompt_until("\nEnter date (mm/dd/yyyy): ", |line| {
        validate_date(line).map(|_| line.to_string())
    })?;
    let activity_level =
        console.prompt_until("Enter your daily activity level (1-5): ", validate_activity_level)?;
    let calories = console.prompt_until("Enter calories consumed: ", validate_positive_number)?;
    let protein = console.prompt_until("Enter protein (g): ", validate_positive_number)?;
    let carbs = console.prompt_until("Enter carbohydrates (g): ", validate_positive_number)?;
    let fat = console.prompt_until("Enter fat (g): ", validate_positive_number)?;
    let weight = console.prompt_until("Enter current weight (kg): ", validate_positive_number)?;
    let age = console.prompt_optional("Enter age (leave blank to skip): ", validate_age)?;

    let entry = DietEntry {
        date,
        activity_level,
        calories,
        protein,
        carbs,
        fat,
        weight,
        age,
    };
    match service.record_entry(&entry) {
        Ok(_) => console.say("\nDiet information recorded successfully."),
        Err(err) => report_failure(console, "enter_entry", &err, ""),
    }
}

fn delete_entry<S, R, W>(service: &TrackerService<S>, console: &mut Console<R, W>) -> PromptResult<()>
where
    S: EntryStore,
    R: BufRead,
    W: Write,
{
    let date = console.read_line("\nEnter the date of the entry to delete (mm/dd/yyyy): ")?;
    match service.delete_entry(&date) {
        Ok(true) => console.say(format_args!("\nDiet entry for {date} deleted.")),
        Ok(false) => console.say(format_args!("\nNo diet entry found for {date}.")),
        Err(err) => report_failure(console, "delete_entry", &err, ""),
    }
}

fn display_data<S, R, W>(service: &TrackerService<S>, console: &mut Console<R, W>) -> PromptResult<()>
where
    S: EntryStore,
    R: BufRead,
    W: Write,
{
    let entries = match service.list_entries() {
        Ok(entries) => entries,
        Err(err) => return report_failure(console, "display_data", &err, ""),
    };
    if entries.is_empty() {
        return console.say("\nNo data to display.");
    }

    console.say("\nDiet Data:")?;
    for entry in &entries {
        console.say(format_args!("\nDate: {}", entry.date))?;
        console.say(format_args!("Calories: {}", entry.calories))?;
        console.say(format_args!("Protein: {} g", entry.protein))?;
        console.say(format_args!("Carbohydrates: {} g", entry.carbs))?;
        console.say(format_args!("Fat: {} g", entry.fat))?;
        console.say(format_args!("Weight: {} kg", entry.weight))?;
        console.say(format_args!("Activity Level: {}", entry.activity_level))?;
        if let Some(age) = entry.age {
            console.say(format_args!("Age: {age}"))?;
        }
        console.say("-".repeat(20))?;
    }
    Ok(())
}

fn show_feedback<S, R, W>(service: &TrackerService<S>, console: &mut Console<R, W>) -> PromptResult<()>
where
    S: EntryStore,
    R: BufRead,
    W: Write,
{
    match service.feedback() {
        Ok(report) => {
            console.say("\nDiet Feedback:")?;
            for line in report.render_lines() {
                console.say(line)?;
            }
            Ok(())
        }
        Err(err) => report_failure(console, "feedback", &err, "No data to provide feedback."),
    }
}

fn predict<S, R, W>(service: &TrackerService<S>, console: &mut Console<R, W>) -> PromptResult<()>
where
    S: EntryStore,
    R: BufRead,
    W: Write,
{
    console.say("\nPredicting weight for a planned day...")?;
    let calories = console.prompt_until("Enter planned calories: ", validate_positive_number)?;
    let protein = console.prompt_until("Enter planned protein (g): ", validate_positive_number)?;
    let carbs = console.prompt_until("Enter planned carbohydrates (g): ", validate_positive_number)?;
    let fat = console.prompt_until("Enter planned fat (g): ", validate_positive_number)?;
    let activity_level = match service.feature_set() {
        FeatureSet::MacrosWithActivity => console
            .prompt_until("Enter planned activity level (1-5): ", validate_activity_level)?,
        FeatureSet::Macros => 1,
    };

    let intake = PlannedIntake {
        calories,
        protein,
        carbs,
        fat,
        activity_level,
    };
    match service.predict_weight(&intake) {
        Ok(weight) => console.say(format_args!("Predicted weight: {weight:.2} kg")),
        Err(err) => report_failure(
            console,
            "predict_weight",
            &err,
            "Not enough data to make predictions.",
        ),
    }
}

fn weight_loss_plan<S, R, W>(
    service: &TrackerService<S>,
    console: &mut Console<R, W>,
) -> PromptResult<()>
where
    S: EntryStore,
    R: BufRead,
    W: Write,
{
    console.say("\nGenerating personalized weight loss plan...")?;
    let target_weight = console.prompt_until("Enter target weight (kg): ", validate_positive_number)?;
    let weeks = console.prompt_until("Enter time frame (weeks): ", parse_weeks)?;

    match service.weight_loss_plan(&WeightGoal {
        target_weight,
        weeks,
    }) {
        Ok(plan) => {
            console.say("\nRecommended Weight Loss Plan:")?;
            for line in plan.render_lines() {
                console.say(line)?;
            }
            Ok(())
        }
        Err(err) => report_failure(
            console,
            "weight_loss_plan",
            &err,
            "Not enough data to recommend a plan.",
        ),
    }
}

fn meal_plan<S, R, W>(service: &TrackerService<S>, console: &mut Console<R, W>) -> PromptResult<()>
where
    S: EntryStore,
    R: BufRead,
    W: Write,
{
    console.say("\nGenerating meal plan...")?;
    let targets = MacroTargets {
        calories: console.prompt_until("Enter target calories: ", validate_positive_number)?,
        protein: console.prompt_until("Enter target protein (g): ", validate_positive_number)?,
        carbs: console.prompt_until("Enter target carbohydrates (g): ", validate_positive_number)?,
        fat: console.prompt_until("Enter target fat (g): ", validate_positive_number)?,
    };

    match service.meal_plan(&targets) {
        Ok(plan) => {
            console.say("\nMeal Plan:")?;
            for (meal, portion) in &plan.meals {
                console.say(format_args!("\n{}:", meal.label()))?;
                console.say(format_args!("calories: {:.2}", portion.calories))?;
                console.say(format_args!("protein: {:.2}", portion.protein))?;
                console.say(format_args!("carbs: {:.2}", portion.carbs))?;
                console.say(format_args!("fat: {:.2}", portion.fat))?;
            }
            Ok(())
        }
        Err(err) => report_failure(console, "meal_plan", &err, ""),
    }
}

fn parse_weeks(input: &str) -> Result<u32, String> {
    match input.trim().parse::<u32>() {
        Ok(weeks) if weeks > 0 => Ok(weeks),
        _ => Err("Invalid input. Please enter a whole number of weeks greater than 0.".to_string()),
    }
}

/// Prints `insufficient_message` for missing-data failures, the error otherwise.
fn report_failure<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    operation: &str,
    err: &ServiceError,
    insufficient_message: &str,
) -> PromptResult<()> {
    if err.is_insufficient_data() && !insufficient_message.is_empty() {
        info!("event={operation} module=cli status=insufficient_data");
        return console.say(format_args!("\n{insufficient_message}"));
    }
    error!("event={operation} module=cli status=error error={err}");
    console.say(format_args!("\nError: {err}"))
}

#[cfg(test)]
mod tests {
    use super::{parse_weeks, run_menu, MenuChoice};
    use crate::prompt::Console;
    use diettrack_core::{EntryStore, FeatureSet, JsonEntryStore, TrackerService};
    use std::io::Cursor;

    fn run_script(
        service: &TrackerService<JsonEntryStore>,
        script: &str,
    ) -> String {
        let mut console = Console::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
        run_menu(service, &mut console).unwrap();
        String::from_utf8(console.into_output()).unwrap()
    }

    fn service_in(dir: &tempfile::TempDir) -> TrackerService<JsonEntryStore> {
        TrackerService::new(
            JsonEntryStore::new(dir.path().join("user_data.json")),
            FeatureSet::MacrosWithActivity,
        )
    }

    #[test]
    fn parse_accepts_only_listed_choices() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::EnterEntry));
        assert_eq!(MenuChoice::parse(" 8 "), Some(MenuChoice::Exit));
        for input in ["0", "9", "", "exit", "-1", "+3", "3.0"] {
            assert_eq!(MenuChoice::parse(input), None, "accepted `{input}`");
        }
    }

    #[test]
    fn invalid_choice_reprompts() {
        let dir = tempfile::tempdir().unwrap();
        let output = run_script(&service_in(&dir), "42\n8\n");
        assert!(output.contains("Invalid choice. Please enter a number from 1 to 8."));
        assert!(output.contains("Exiting..."));
    }

    #[test]
    fn entering_data_retries_invalid_fields_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_in(&dir);
        let script = "1\n02/30/2024\n01/01/2024\n7\n3\n-5\n2000\n100\n250\n70\n80\n\n8\n";

        let output = run_script(&service, script);

        assert!(output.contains("Invalid date format."));
        assert!(output.contains("Please enter a number between 1 and 5."));
        assert!(output.contains("Please enter a number greater than 0."));
        assert!(output.contains("Diet information recorded successfully."));

        let stored = service.store().load().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].date, "01/01/2024");
        assert_eq!(stored[0].calories, 2000.0);
        assert_eq!(stored[0].age, None);
    }

    #[test]
    fn feedback_and_prediction_report_missing_data() {
        let dir = tempfile::tempdir().unwrap();
        let output = run_script(&service_in(&dir), "4\n5\n2000\n100\n250\n70\n3\n3\n8\n");
        assert!(output.contains("No data to provide feedback."));
        assert!(output.contains("Not enough data to make predictions."));
        assert!(output.contains("No data to display."));
    }

    #[test]
    fn feedback_prints_two_decimal_percentages() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_in(&dir);
        let script = "1\n01/01/2024\n3\n2000\n100\n250\n70\n80\n34\n4\n3\n8\n";

        let output = run_script(&service, script);

        assert!(output.contains("Protein intake: 20.00% (Recommended: 10-35%)"));
        assert!(output.contains("Fat intake: 31.50% (Recommended: 20-35%)"));
        assert!(!output.contains("Consider adjusting"));
        assert!(output.contains("Age: 34"));
    }

    #[test]
    fn deleting_unknown_date_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let output = run_script(&service_in(&dir), "2\n02/02/2024\n8\n");
        assert!(output.contains("No diet entry found for 02/02/2024."));
    }

    #[test]
    fn end_of_input_stops_menu() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_in(&dir);
        let mut console = Console::new(Cursor::new(Vec::new()), Vec::new());
        assert!(run_menu(&service, &mut console).is_err());
    }

    #[test]
    fn weeks_must_be_positive_integer() {
        assert_eq!(parse_weeks("12").unwrap(), 12);
        assert!(parse_weeks("0").is_err());
        assert!(parse_weeks("2.5").is_err());
    }
}
