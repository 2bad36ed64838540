//! Printers: plain/colored text and JSON.

use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::execution::ExecutionResult;
use crate::invocation::ResolvedInvocation;

pub struct TextPrinter {
    pub color: bool,
}

impl TextPrinter {
    pub fn print_result(&self, result: &ExecutionResult) {
        match result {
            ExecutionResult::Completed { stdout } => {
                self.header("JMeter execution completed successfully:", true);
                print!("{}", stdout);
                if !stdout.is_empty() && !stdout.ends_with('\n') {
                    println!();
                }
            }
            ExecutionResult::Launched { message } => self.header(message, true),
            ExecutionResult::Failed { reason, .. } => self.header(reason, false),
        }
    }

    pub fn print_plan(&self, plan: &ResolvedInvocation) {
        self.header("Command:", true);
        println!("{}", plan.command_line());
        if let Some(log) = &plan.log_file {
            println!("Results log: {}", log);
        }
        if let Some(dir) = &plan.report_output_dir {
            println!("Report directory: {}", dir);
        }
    }

    fn header(&self, text: &str, ok: bool) {
        if !self.color {
            println!("{}", text);
        } else if ok {
            println!("{}", text.green());
        } else {
            println!("{}", text.red());
        }
    }
}

pub struct JsonPrinter;

impl JsonPrinter {
    pub fn print<T: Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}
