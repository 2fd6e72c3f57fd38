use anyhow::Result;
use rand::rngs::ThreadRng;
use serde_json::{Value, json};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Duration;

use vitalboard::core::refresh::Refresher;
use vitalboard::core::session::Session;
use vitalboard::core::source::{self, MetricSource};
use vitalboard::models::config::{Config, check_refresh_secs};
use vitalboard::output;
use vitalboard::output::human;

enum Flow {
    Continue,
    Quit,
}

struct Watcher {
    session: Session,
    source: Box<dyn MetricSource>,
    simulate: bool,
    human: bool,
    rng: ThreadRng,
}

pub fn run(
    source_path: Option<PathBuf>,
    interval: Option<u64>,
    simulate: bool,
    human_flag: bool,
) -> Result<()> {
    let config = Config::load()?;
    let secs = match interval {
        Some(secs) => check_refresh_secs("interval", secs)?,
        None => check_refresh_secs("refresh_secs", config.dashboard.refresh_secs)?,
    };
    let source_path = source_path.or(config.dashboard.source);

    let watcher = Watcher {
        session: Session::new().with_activity_override(config.dashboard.activity),
        source: source::resolve(source_path.as_deref()),
        simulate,
        human: human_flag,
        rng: rand::rng(),
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(watcher.run(Duration::from_secs(secs)));
    // A blocking stdin read cannot be cancelled; don't wait on it
    runtime.shutdown_background();
    result
}

impl Watcher {
    async fn run(mut self, period: Duration) -> Result<()> {
        tracing::info!(
            source = %self.source.describe(),
            period_secs = period.as_secs(),
            "watch started"
        );

        // The first snapshot must load; later failures keep the previous state
        self.session.refresh_from(&*self.source)?;
        self.emit_dashboard("watch")?;

        let (refresher, mut ticks) = Refresher::spawn(period);
        let mut ticking = true;
        let mut lines = BufReader::new(tokio::io::stdin()).split(b'\n');

        loop {
            tokio::select! {
                tick = ticks.recv(), if ticking => match tick {
                    Some(tick) => {
                        tracing::debug!(seq = tick.seq, "refresh tick");
                        self.refresh("watch")?;
                    }
                    None => {
                        tracing::warn!("refresh timer stopped; continuing with stdin only");
                        ticking = false;
                    }
                },
                line = lines.next_segment() => {
                    let Some(bytes) = line? else { break };
                    match String::from_utf8(bytes) {
                        Ok(line) => {
                            if let Flow::Quit = self.handle_line(line.trim())? {
                                break;
                            }
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "ignoring non-UTF-8 input line");
                            self.emit_error(
                                "watch",
                                "invalid_command",
                                "input is not valid UTF-8",
                            )?;
                        }
                    }
                }
            }
        }

        refresher.cancel();
        tracing::info!("watch stopped");
        Ok(())
    }

    fn refresh(&mut self, command: &str) -> Result<()> {
        match self.session.refresh_from(&*self.source) {
            Ok(()) => {
                if self.simulate {
                    self.session.simulate(&mut self.rng);
                }
                self.emit_dashboard(command)
            }
            Err(e) => {
                tracing::warn!(error = %e, "refresh failed; keeping previous snapshot");
                self.emit_error(command, "refresh_failed", &format!("{:#}", e))
            }
        }
    }

    fn handle_line(&mut self, line: &str) -> Result<Flow> {
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb {
            "" => {}
            "quit" | "exit" => return Ok(Flow::Quit),
            "refresh" => self.refresh("refresh")?,
            "simulate" => {
                self.session.simulate(&mut self.rng);
                self.emit_dashboard("simulate")?;
            }
            "show" => self.emit_dashboard("show")?,
            "add" => self.add(rest)?,
            "remove" => {
                if rest.is_empty() {
                    self.emit_error("remove", "invalid_command", "usage: remove NAME")?;
                } else {
                    let removed = self.session.remove_metric(rest);
                    self.emit(
                        "remove",
                        json!({ "name": rest, "removed": removed }),
                        &format!("Removed: {} ({})", rest, if removed { "yes" } else { "not found" }),
                    )?;
                }
            }
            other => {
                tracing::warn!(command = other, "unknown watch command");
                self.emit_error(
                    other,
                    "invalid_command",
                    "expected add, remove, refresh, simulate, show or quit",
                )?;
            }
        }
        Ok(Flow::Continue)
    }

    /// `add NAME GOOD WARN`; the name may contain spaces.
    fn add(&mut self, args: &str) -> Result<()> {
        let tokens: Vec<&str> = args.split_whitespace().collect();
        if tokens.len() < 3 {
            return self.emit_error("add", "invalid_command", "usage: add NAME GOOD WARN");
        }
        let (name, ranges) = tokens.split_at(tokens.len() - 2);
        let name = name.join(" ");

        match self.session.add_metric(&name, ranges[0], ranges[1]) {
            Ok(metric) => {
                let line = format!("Added: {}", human::format_metric(&metric));
                self.emit("add", json!({ "metric": metric }), &line)
            }
            Err(e) => {
                tracing::warn!(error = %e, "add rejected");
                self.emit_error("add", "invalid_metric", &e.to_string())
            }
        }
    }

    fn emit_dashboard(&self, command: &str) -> Result<()> {
        let report = self.session.report();
        if self.human {
            println!("{}", human::format_dashboard(&report));
            Ok(())
        } else {
            self.emit(command, serde_json::to_value(&report)?, "")
        }
    }

    fn emit(&self, command: &str, data: Value, human_line: &str) -> Result<()> {
        if self.human {
            println!("{}", human_line);
        } else {
            let out = output::success(command, data);
            println!("{}", serde_json::to_string(&out)?);
        }
        Ok(())
    }

    fn emit_error(&self, command: &str, code: &str, message: &str) -> Result<()> {
        if self.human {
            println!("error: {}", message);
        } else {
            let out = output::error(command, code, message);
            println!("{}", serde_json::to_string(&out)?);
        }
        Ok(())
    }
}
