//! Interactive terminal front end for the dashboard.

use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

use crate::dashboard::commands::{parse_console_line, Command, ConsoleInput, CONSOLE_HELP};
use crate::dashboard::filters::Key;
use crate::dashboard::Dashboard;
use crate::utils::error::DashboardResult;
use crate::view::document::DashboardDocument;
use crate::view::terminal::TerminalRenderer;

const PROMPT_HINT: &str = "[r]efresh [a]pply [c]lear [t]hreat <level> [i]p <addr> [l]imit <n> [h]elp [q]uit";

/// Console session over a dashboard and the document it paints
pub struct Console {
    dashboard: Dashboard,
    document: Arc<DashboardDocument>,
    renderer: TerminalRenderer,
    refresh_period: Option<Duration>,
}

impl Console {
    pub fn new(
        dashboard: Dashboard,
        document: Arc<DashboardDocument>,
        renderer: TerminalRenderer,
        refresh_period: Option<Duration>,
    ) -> Self {
        Self {
            dashboard,
            document,
            renderer,
            refresh_period,
        }
    }

    /// Load the dashboard, then process stdin commands until `q` or EOF
    pub async fn run(&self) -> DashboardResult<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut ticker = self.refresh_period.map(|period| {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            ticker
        });

        self.dashboard.on_ready().await;
        self.repaint()?;

        loop {
            let line = tokio::select! {
                line = lines.next_line() => line?,
                _ = next_tick(&mut ticker) => {
                    debug!("Auto-refresh");
                    self.dashboard.dispatch(Command::Refresh).await;
                    self.repaint()?;
                    continue;
                }
            };

            let Some(line) = line else {
                info!("Input closed");
                break;
            };

            match parse_console_line(&line) {
                Ok(None) => {}
                Ok(Some(ConsoleInput::Quit)) => break,
                Ok(Some(input)) => {
                    if !self.handle(input).await {
                        continue;
                    }
                }
                Err(e) => {
                    warn!("{}", e);
                    continue;
                }
            }

            self.repaint()?;
        }

        Ok(())
    }

    /// Apply one input; returns whether the page needs repainting
    async fn handle(&self, input: ConsoleInput) -> bool {
        match input {
            ConsoleInput::Command(command) => {
                self.dashboard.dispatch(command).await;
            }
            ConsoleInput::SelectThreat(level) => self.document.set_threat_filter(&level),
            ConsoleInput::TypeLimit(limit) => self.document.set_limit_filter(&limit),
            ConsoleInput::SubmitIp(ip) => {
                self.document.set_ip_filter(&ip);
                self.dashboard.dispatch(Command::IpFieldKey(Key::Enter)).await;
            }
            ConsoleInput::Help => {
                println!("{}", CONSOLE_HELP);
                return false;
            }
            ConsoleInput::Quit => return false,
        }
        true
    }

    fn repaint(&self) -> DashboardResult<()> {
        let snapshot = self.document.snapshot();
        self.renderer.repaint_stdout(&snapshot, true)?;

        let inputs = &snapshot.inputs;
        println!();
        println!(
            "Filters: threat={:?} ip={:?} limit={:?}",
            inputs.threat_level, inputs.source_ip, inputs.limit
        );
        println!("{}", PROMPT_HINT);
        Ok(())
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
