use anyhow::Result;
use colored::*;
use serde_json::json;
use std::time::Instant;
use uuid::Uuid;

use crate::api_client::{BrokerClient, BrokerResponse};
use crate::output::{print_response, TestResult};

const ASYNC_PLAN_ID: &str = "fake-async-plan-guid";
const ASYNC_ONLY_PLAN_ID: &str = "fake-async-only-plan-guid";

fn expect_status(step: &str, response: &BrokerResponse, expected: u16) -> Option<String> {
    if response.status == expected {
        println!("{} {} returned {}", "✓".green(), step, expected);
        None
    } else {
        println!("{} {} returned {}", "✗".red(), step, response.status);
        Some(format!(
            "{step}: expected {expected}, got {} with body {}",
            response.status, response.body
        ))
    }
}

pub async fn test_catalog(client: &BrokerClient, verbose: bool) -> Result<TestResult> {
    let start = Instant::now();

    println!("\n{}", "=== TEST: Catalog ===".bright_cyan().bold());

    println!("{} Fetching catalog...", "→".blue());
    let response = client.catalog().await?;
    if verbose {
        print_response("catalog", &response);
    }

    if let Some(message) = expect_status("GET /v2/catalog", &response, 200) {
        return Ok(TestResult::fail("catalog", message, start.elapsed()));
    }

    let has_services = response
        .json()
        .map(|catalog| catalog["services"].is_array())
        .unwrap_or(false);

    if has_services {
        println!("{} Catalog lists services", "✓".green());
        Ok(TestResult::pass("catalog", start.elapsed()))
    } else {
        Ok(TestResult::fail(
            "catalog",
            "Catalog body has no services array",
            start.elapsed(),
        ))
    }
}

pub async fn test_instance_lifecycle(client: &BrokerClient, verbose: bool) -> Result<TestResult> {
    let start = Instant::now();
    let instance_id = Uuid::new_v4().to_string();
    let binding_id = Uuid::new_v4().to_string();

    println!("\n{}", "=== TEST: Instance Lifecycle ===".bright_cyan().bold());

    println!("{} Provisioning {}...", "→".blue(), instance_id);
    let provisioned = client
        .provision(&instance_id, &json!({"plan_id": ASYNC_PLAN_ID}), true)
        .await?;
    if verbose {
        print_response("provision", &provisioned);
    }
    if let Some(message) = expect_status("provision", &provisioned, 202) {
        return Ok(TestResult::fail("instance_lifecycle", message, start.elapsed()));
    }

    println!("{} Polling last operation until it finishes...", "→".blue());
    let first = client.last_operation(&instance_id).await?;
    let second = client.last_operation(&instance_id).await?;
    if verbose {
        print_response("last_operation", &first);
        print_response("last_operation", &second);
    }
    let first_state = first.json()?["state"].clone();
    let second_state = second.json()?["state"].clone();
    if first_state != "in progress" || second_state != "succeeded" {
        return Ok(TestResult::fail(
            "instance_lifecycle",
            format!("Expected in progress then succeeded, got {first_state} then {second_state}"),
            start.elapsed(),
        ));
    }
    println!("{} Operation reported in progress then succeeded", "✓".green());

    println!("{} Binding {}...", "→".blue(), binding_id);
    let bound = client
        .bind(&instance_id, &binding_id, &json!({"plan_id": ASYNC_PLAN_ID}))
        .await?;
    if verbose {
        print_response("bind", &bound);
    }
    if let Some(message) = expect_status("bind", &bound, 201) {
        return Ok(TestResult::fail("instance_lifecycle", message, start.elapsed()));
    }

    let unbound = client.unbind(&instance_id, &binding_id).await?;
    if let Some(message) = expect_status("unbind", &unbound, 200) {
        return Ok(TestResult::fail("instance_lifecycle", message, start.elapsed()));
    }

    println!("{} Deprovisioning {}...", "→".blue(), instance_id);
    let deprovisioned = client.deprovision(&instance_id, true).await?;
    if verbose {
        print_response("deprovision", &deprovisioned);
    }
    if let Some(message) = expect_status("deprovision", &deprovisioned, 202) {
        return Ok(TestResult::fail("instance_lifecycle", message, start.elapsed()));
    }

    Ok(TestResult::pass("instance_lifecycle", start.elapsed()))
}

pub async fn test_async_required(client: &BrokerClient, verbose: bool) -> Result<TestResult> {
    let start = Instant::now();
    let instance_id = Uuid::new_v4().to_string();
    let body = json!({"plan_id": ASYNC_ONLY_PLAN_ID});

    println!("\n{}", "=== TEST: Async Required ===".bright_cyan().bold());

    println!("{} Provisioning without accepts_incomplete...", "→".blue());
    let rejected = client.provision(&instance_id, &body, false).await?;
    if verbose {
        print_response("provision", &rejected);
    }
    if let Some(message) = expect_status("synchronous provision", &rejected, 422) {
        return Ok(TestResult::fail("async_required", message, start.elapsed()));
    }
    if rejected.json()?["error"] != "AsyncRequired" {
        return Ok(TestResult::fail(
            "async_required",
            format!("Expected an AsyncRequired error, got {}", rejected.body),
            start.elapsed(),
        ));
    }

    println!("{} Provisioning with accepts_incomplete=true...", "→".blue());
    let accepted = client.provision(&instance_id, &body, true).await?;
    if verbose {
        print_response("provision", &accepted);
    }
    if let Some(message) = expect_status("asynchronous provision", &accepted, 202) {
        return Ok(TestResult::fail("async_required", message, start.elapsed()));
    }

    Ok(TestResult::pass("async_required", start.elapsed()))
}

pub async fn test_config_round_trip(client: &BrokerClient, verbose: bool) -> Result<TestResult> {
    let start = Instant::now();

    println!("\n{}", "=== TEST: Config Round Trip ===".bright_cyan().bold());

    let before = client.config().await?;
    if verbose {
        print_response("config", &before);
    }

    println!("{} Posting the current configuration back...", "→".blue());
    let merged = client.merge_config(&before.json()?).await?;
    if let Some(message) = expect_status("POST /config", &merged, 200) {
        return Ok(TestResult::fail("config_round_trip", message, start.elapsed()));
    }

    let after = client.config().await?;
    if after.json()? != before.json()? {
        return Ok(TestResult::fail(
            "config_round_trip",
            "Configuration changed after posting it back unchanged",
            start.elapsed(),
        ));
    }
    println!("{} Configuration unchanged", "✓".green());

    println!("{} Changing the provision status and resetting...", "→".blue());
    client
        .merge_config(&json!({"behaviors": {"provision": {"default": {"status": 409, "body": {}}}}}))
        .await?;
    let conflicted = client
        .provision(&Uuid::new_v4().to_string(), &json!({}), false)
        .await?;
    if let Some(message) = expect_status("provision after merge", &conflicted, 409) {
        return Ok(TestResult::fail("config_round_trip", message, start.elapsed()));
    }

    let reset = client.reset_config().await?;
    if reset.json()? != before.json()? {
        return Ok(TestResult::fail(
            "config_round_trip",
            "Reset did not restore the seed configuration",
            start.elapsed(),
        ));
    }
    println!("{} Reset restored the seed", "✓".green());

    Ok(TestResult::pass("config_round_trip", start.elapsed()))
}
