use std::fmt;

#[cfg(feature = "colorized_output")]
use console::style;
use serde::Serialize;

const TITLE: &str = "ACTIS Kd Validation Report";
const RULE: &str = "==========================";

/// Validation check result status
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "lowercase")]
pub enum CheckStatus {
    /// Check passed
    Ok,
    /// Check passed with warnings
    Warning(String),
    /// Check failed
    Failed(String),
}

impl CheckStatus {
    fn symbol(&self) -> &'static str {
        match self {
            CheckStatus::Ok => "✓",
            CheckStatus::Warning(_) => "⚠",
            CheckStatus::Failed(_) => "✗",
        }
    }
}

/// Stage of the pre-flight checks a result belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    /// Input file on its own
    #[default]
    Inputs,
    /// Tables of the data directory
    Data,
    /// Inputs checked against the loaded traces
    References,
}

impl Section {
    fn heading(&self) -> &'static str {
        match self {
            Section::Inputs => "Inputs",
            Section::Data => "Data directory",
            Section::References => "References",
        }
    }
}

/// Individual validation check result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationCheck {
    /// Name of the validation check
    pub name: String,
    /// Result status of the check
    pub status: CheckStatus,
    /// Stage that produced the check
    pub section: Section,
}

impl ValidationCheck {
    fn with_status(name: impl Into<String>, status: CheckStatus) -> Self {
        Self {
            name: name.into(),
            status,
            section: Section::default(),
        }
    }

    pub(crate) fn ok(name: impl Into<String>) -> Self {
        Self::with_status(name, CheckStatus::Ok)
    }

    pub(crate) fn warning(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_status(name, CheckStatus::Warning(message.into()))
    }

    pub(crate) fn failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_status(name, CheckStatus::Failed(message.into()))
    }
}

/// Passed / warned / failed counts of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Tally {
    /// Checks that passed
    pub passed: usize,
    /// Checks that passed with a warning
    pub warnings: usize,
    /// Checks that failed
    pub failed: usize,
}

/// Overall outcome of a validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    /// Every check passed
    Passed,
    /// No failure, at least one warning
    PassedWithWarnings,
    /// At least one check failed; the analysis would abort
    Failed,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Passed => write!(f, "Validation PASSED"),
            Verdict::PassedWithWarnings => write!(f, "Validation PASSED with warnings"),
            Verdict::Failed => write!(f, "Validation FAILED"),
        }
    }
}

/// Complete validation report of one experiment
#[derive(Debug, Serialize)]
pub struct ValidationReport {
    /// Data directory or input file that was validated
    pub target: String,
    /// Check results in the order they ran
    pub checks: Vec<ValidationCheck>,
    #[serde(skip)]
    section: Section,
}

impl ValidationReport {
    /// Create an empty report for `target`
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            checks: Vec::new(),
            section: Section::default(),
        }
    }

    /// Checks added from now on belong to `section`
    pub(crate) fn begin(&mut self, section: Section) {
        self.section = section;
    }

    /// Add a check result under the current section
    pub fn add_check(&mut self, mut check: ValidationCheck) {
        check.section = self.section;
        self.checks.push(check);
    }

    /// Status of the check called `name`
    pub fn status_of(&self, name: &str) -> Option<&CheckStatus> {
        self.checks.iter().find(|c| c.name == name).map(|c| &c.status)
    }

    /// Checks of one section
    pub fn section(&self, section: Section) -> impl Iterator<Item = &ValidationCheck> + '_ {
        self.checks.iter().filter(move |c| c.section == section)
    }

    /// Result counts
    pub fn tally(&self) -> Tally {
        self.checks.iter().fold(Tally::default(), |mut tally, check| {
            match check.status {
                CheckStatus::Ok => tally.passed += 1,
                CheckStatus::Warning(_) => tally.warnings += 1,
                CheckStatus::Failed(_) => tally.failed += 1,
            }
            tally
        })
    }

    /// Overall outcome
    pub fn verdict(&self) -> Verdict {
        let tally = self.tally();
        if tally.failed > 0 {
            Verdict::Failed
        } else if tally.warnings > 0 {
            Verdict::PassedWithWarnings
        } else {
            Verdict::Passed
        }
    }

    /// Check if any validation checks failed
    pub fn has_failures(&self) -> bool {
        self.verdict() == Verdict::Failed
    }

    /// Check if any validation checks produced warnings
    pub fn has_warnings(&self) -> bool {
        self.tally().warnings > 0
    }

    fn sections(&self) -> Vec<Section> {
        let mut sections: Vec<Section> = Vec::new();
        for check in &self.checks {
            if !sections.contains(&check.section) {
                sections.push(check.section);
            }
        }
        sections
    }

    /// Format the report with colors (requires console feature)
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            let mut output = String::new();
            output.push_str(&format!("{}\n", style(TITLE).bold().cyan()));
            output.push_str(&format!("{}\n", style(RULE).cyan()));
            output.push_str(&format!("{}: {}\n", style("Target").bold(), self.target));

            for section in self.sections() {
                output.push_str(&format!("\n{}\n", style(section.heading()).bold().underlined()));
                for check in self.section(section) {
                    let line = match &check.status {
                        CheckStatus::Ok => format!("{} {}", style("✓").green(), check.name),
                        CheckStatus::Warning(msg) => format!(
                            "{} {} - {}",
                            style("⚠").yellow(),
                            style(&check.name).yellow(),
                            msg
                        ),
                        CheckStatus::Failed(msg) => format!(
                            "{} {} - {}",
                            style("✗").red(),
                            style(&check.name).red(),
                            msg
                        ),
                    };
                    output.push_str(&format!("  {}\n", line));
                }
            }

            let tally = self.tally();
            output.push_str(&format!(
                "\n{}: {} passed, {} warnings, {} failed\n",
                style("Summary").bold(),
                style(tally.passed).green(),
                style(tally.warnings).yellow(),
                style(tally.failed).red()
            ));

            let verdict = self.verdict();
            let verdict_line = match verdict {
                Verdict::Passed => style(verdict.to_string()).green().bold(),
                Verdict::PassedWithWarnings => style(verdict.to_string()).yellow().bold(),
                Verdict::Failed => style(verdict.to_string()).red().bold(),
            };
            output.push_str(&format!("{}\n", verdict_line));
            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            format!("{}", self)
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", TITLE)?;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "Target: {}", self.target)?;

        for section in self.sections() {
            writeln!(f)?;
            writeln!(f, "{}", section.heading())?;
            for check in self.section(section) {
                write!(f, "  {} {}", check.status.symbol(), check.name)?;
                match &check.status {
                    CheckStatus::Ok => writeln!(f)?,
                    CheckStatus::Warning(msg) => writeln!(f, " - WARNING: {}", msg)?,
                    CheckStatus::Failed(msg) => writeln!(f, " - FAILED: {}", msg)?,
                }
            }
        }

        let tally = self.tally();
        writeln!(f)?;
        writeln!(
            f,
            "Summary: {} passed, {} warnings, {} failed",
            tally.passed, tally.warnings, tally.failed
        )?;
        writeln!(f, "{}", self.verdict())
    }
}
