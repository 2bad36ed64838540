use clap::{ArgGroup, Parser};

use jmeter_runner::execution::{ExecutionRequest, Properties};

#[derive(Parser, Debug, Clone)]
#[command(name = "jmeter-runner", about = "Run JMeter test plans with validated, collision-free arguments", version)]
#[command(group(ArgGroup::new("output").args(["json", "no_color"]).multiple(false)))]
pub struct Cli {
    /// JMeter test plan (.jmx).
    #[arg(value_name = "TEST_FILE")]
    pub test_file: String,

    /// Launch the JMeter GUI and return without waiting.
    ///
    /// Report options are ignored in this mode.
    #[arg(long)]
    pub gui: bool,

    /// JMeter property, passed as -J<KEY>=<VALUE>. Can be repeated.
    #[arg(short = 'J', long = "property", value_name = "KEY=VALUE", value_parser = parse_property, action = clap::ArgAction::Append)]
    pub properties: Vec<(String, String)>,

    /// Generate the HTML dashboard report after the run.
    #[arg(short = 'r', long)]
    pub report: bool,

    /// Base name of the report directory; a unique suffix is always appended.
    #[arg(short = 'o', long = "report-dir", value_name = "DIR")]
    pub report_dir: Option<String>,

    /// Results log (.jtl) name. Only used together with --report.
    #[arg(short = 'l', long = "log-file", value_name = "FILE")]
    pub log_file: Option<String>,

    /// Print the command that would run, without running it.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,

    /// Disable colored output.
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// JMeter binary (overrides JMETER_BIN).
    #[arg(long = "jmeter-bin", value_name = "PATH")]
    pub jmeter_bin: Option<String>,

    /// Options for a wrapping `java` invocation (overrides JMETER_JAVA_OPTS).
    #[arg(long = "java-opts", value_name = "OPTS", allow_hyphen_values = true)]
    pub java_opts: Option<String>,

    /// Log filter, e.g. `info` or `jmeter_runner=debug` (overrides JMETER_RUNNER_LOG).
    #[arg(long = "log-level", value_name = "FILTER")]
    pub log_level: Option<String>,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn request(&self) -> ExecutionRequest {
        let properties: Properties = self.properties.iter().cloned().collect();
        ExecutionRequest {
            test_file: self.test_file.clone(),
            gui_mode: self.gui,
            properties,
            generate_report: self.report,
            report_output_dir: self.report_dir.clone(),
            log_file: self.log_file.clone(),
        }
    }
}

fn parse_property(raw: &str) -> Result<(String, String), String> {
    let (k, v) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{}`", raw))?;
    if k.trim().is_empty() {
        return Err(format!("empty property name in `{}`", raw));
    }
    Ok((k.trim().to_string(), v.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_with_report() {
        let cli = Cli::try_parse_from([
            "jmeter-runner",
            "plan.jmx",
            "-J",
            "threads=10",
            "--property",
            "rampup=5",
            "--report",
            "-o",
            "out",
        ])
        .unwrap();
        let req = cli.request();
        assert_eq!(req.test_file, "plan.jmx");
        assert!(!req.gui_mode);
        assert!(req.generate_report);
        assert_eq!(req.report_output_dir.as_deref(), Some("out"));
        assert_eq!(req.properties.len(), 2);
        assert_eq!(req.properties["threads"], "10");
    }

    #[test]
    fn test_property_value_may_contain_equals() {
        let cli = Cli::try_parse_from(["jmeter-runner", "p.jmx", "-J", "q=a=b"]).unwrap();
        assert_eq!(cli.properties, vec![("q".to_string(), "a=b".to_string())]);
    }

    #[test]
    fn test_bad_property_rejected() {
        assert!(Cli::try_parse_from(["jmeter-runner", "p.jmx", "-J", "threads"]).is_err());
        assert!(Cli::try_parse_from(["jmeter-runner", "p.jmx", "-J", "=1"]).is_err());
    }

    #[test]
    fn test_java_opts_accepts_hyphen_value() {
        let cli = Cli::try_parse_from(["jmeter-runner", "p.jmx", "--java-opts", "-Xmx2g"]).unwrap();
        assert_eq!(cli.java_opts.as_deref(), Some("-Xmx2g"));
    }

    #[test]
    fn test_json_and_no_color_conflict() {
        assert!(Cli::try_parse_from(["jmeter-runner", "p.jmx", "--json", "--no-color"]).is_err());
    }
}
