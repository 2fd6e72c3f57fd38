use anyhow::Result;
use serde_json::json;

use vitalboard::models::config::Config;
use vitalboard::models::threshold::select_thresholds;
use vitalboard::models::ActivityState;
use vitalboard::output;
use vitalboard::output::human;

pub fn run(activity: Option<&str>, human_flag: bool) -> Result<()> {
    let config = Config::load()?;
    let label = activity.or(config.dashboard.activity.as_deref());
    let state = ActivityState::from_label(label);
    let table = select_thresholds(label);

    if human_flag {
        println!("{}", human::format_thresholds(&state.to_string(), &table));
    } else {
        let out = output::success(
            "thresholds",
            json!({ "activity_state": state, "thresholds": table }),
        );
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}
