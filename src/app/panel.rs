use crate::adapters::command::{Command, HELP};
use crate::adapters::terminal::{render_alert, render_section};
use crate::core::greenhouse::Greenhouse;
use crate::domain::model::SectionId;
use crate::utils::error::{GreenhouseError, Result};

#[derive(Debug, PartialEq)]
pub enum PanelOutcome {
    Continue(Vec<String>),
    Quit,
}

/// Command dispatch for the interactive panel. Handlers address sections by
/// [`SectionId`]; after a mutation the section is redrawn and re-evaluated.
pub struct Panel {
    greenhouse: Greenhouse,
}

impl Panel {
    pub fn new(greenhouse: Greenhouse) -> Self {
        Self { greenhouse }
    }

    pub fn greenhouse(&self) -> &Greenhouse {
        &self.greenhouse
    }

    pub fn execute(&mut self, command: Command) -> Result<PanelOutcome> {
        let lines = match command {
            Command::Quit => return Ok(PanelOutcome::Quit),
            Command::Help => vec![HELP.to_string()],
            Command::List => self
                .greenhouse
                .ids()
                .map(|id| self.render(id))
                .collect::<Result<Vec<_>>>()?,
            Command::Show { section } => vec![self.render(self.lookup(&section)?)?],
            Command::Alerts { section } => {
                let id = self.lookup(&section)?;
                let alerts = self.alert_lines(id)?;
                if alerts.is_empty() {
                    vec!["No alerts".to_string()]
                } else {
                    alerts
                }
            }
            Command::Adjust {
                section,
                sensor,
                delta,
            } => {
                let id = self.lookup(&section)?;
                self.greenhouse.update_sensor(id, &sensor, delta)?;
                self.after_mutation(id)?
            }
            Command::Press { section, action } => {
                let id = self.lookup(&section)?;
                self.greenhouse
                    .update_sensor(id, action.sensor().as_str(), action.delta())?;
                self.after_mutation(id)?
            }
            Command::Resolve { section, action } => {
                let id = self.lookup(&section)?;
                match self.greenhouse.resolve_alert(id, &action)? {
                    Some(_) => self.after_mutation(id)?,
                    None => Vec::new(),
                }
            }
        };
        Ok(PanelOutcome::Continue(lines))
    }

    fn lookup(&self, key: &str) -> Result<SectionId> {
        self.greenhouse
            .find(key)
            .ok_or_else(|| GreenhouseError::UnknownSection {
                section: key.to_string(),
            })
    }

    fn render(&self, id: SectionId) -> Result<String> {
        Ok(render_section(self.greenhouse.section(id)?))
    }

    fn alert_lines(&self, id: SectionId) -> Result<Vec<String>> {
        let name = self.greenhouse.section(id)?.name();
        Ok(self
            .greenhouse
            .evaluate_alerts(id)?
            .iter()
            .map(|alert| render_alert(name, alert))
            .collect())
    }

    fn after_mutation(&self, id: SectionId) -> Result<Vec<String>> {
        let mut lines = vec![self.render(id)?];
        lines.extend(self.alert_lines(id)?);
        Ok(lines)
    }
}
