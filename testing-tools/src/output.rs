use colored::*;
use std::time::Duration;

use crate::api_client::BrokerResponse;

#[derive(Debug)]
pub struct TestResult {
    pub scenario: String,
    pub passed: bool,
    pub message: Option<String>,
    pub duration: Duration,
}

impl TestResult {
    pub fn pass(scenario: &str, duration: Duration) -> Self {
        Self {
            scenario: scenario.to_string(),
            passed: true,
            message: None,
            duration,
        }
    }

    pub fn fail(scenario: &str, message: impl Into<String>, duration: Duration) -> Self {
        Self {
            scenario: scenario.to_string(),
            passed: false,
            message: Some(message.into()),
            duration,
        }
    }
}

pub fn print_response(label: &str, response: &BrokerResponse) {
    let status = if response.status < 400 {
        response.status.to_string().green()
    } else {
        response.status.to_string().red()
    };

    println!("\n[{}] {} response", label.bright_blue().bold(), status);

    match serde_json::from_str::<serde_json::Value>(&response.body) {
        Ok(json) => {
            if let Ok(pretty) = serde_json::to_string_pretty(&json) {
                println!("   {}", pretty.dimmed());
            }
        }
        Err(_) => println!("   {}", response.body.dimmed()),
    }
}

pub fn print_test_summary(results: &[TestResult]) {
    println!("\n{}", "=== TEST SUMMARY ===".bright_white().bold());

    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = total - passed;

    for result in results {
        let status = if result.passed {
            "PASS".green().bold()
        } else {
            "FAIL".red().bold()
        };

        println!("[{}] {} ({:?})", status, result.scenario, result.duration);

        if let Some(msg) = &result.message {
            println!("      {}", msg.dimmed());
        }
    }

    println!(
        "\n{}: {} passed, {} failed",
        "Results".bold(),
        passed.to_string().green(),
        failed.to_string().red()
    );
}
