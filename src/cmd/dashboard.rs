use anyhow::Result;
use std::path::PathBuf;

use vitalboard::core::custom;
use vitalboard::core::session::Session;
use vitalboard::core::source;
use vitalboard::models::config::Config;
use vitalboard::output;
use vitalboard::output::human;

pub struct DashboardArgs {
    pub source: Option<PathBuf>,
    pub activity: Option<String>,
    pub custom: Vec<String>,
    pub remove: Vec<String>,
    pub simulate: bool,
    pub human: bool,
}

pub fn run(args: DashboardArgs) -> Result<()> {
    let config = Config::load()?;
    let source_path = args.source.or(config.dashboard.source);
    let src = source::resolve(source_path.as_deref());

    // Validate user input before touching the source
    let custom_metrics = args
        .custom
        .iter()
        .map(|def| custom::parse_definition(def))
        .collect::<Result<Vec<_>, _>>()?;

    let mut session =
        Session::new().with_activity_override(args.activity.or(config.dashboard.activity));
    for metric in custom_metrics {
        session.insert_custom(metric);
    }

    tracing::debug!(source = %src.describe(), "fetching snapshot");
    session.refresh(src.fetch()?);

    for name in &args.remove {
        if !session.remove_metric(name) {
            tracing::debug!(name = %name, "remove: no such metric");
        }
    }
    if args.simulate {
        session.simulate(&mut rand::rng());
    }

    let report = session.report();
    if args.human {
        println!("{}", human::format_dashboard(&report));
    } else {
        let out = output::success("dashboard", serde_json::to_value(&report)?);
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}
