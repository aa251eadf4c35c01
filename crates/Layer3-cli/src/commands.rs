//! CLI subcommands

use anyhow::anyhow;
use serde::Serialize;
use serde_json::Value;
use std::process::ExitCode;
use std::sync::Arc;
use testable_core::{wire_args, Outcome, PluginDescriptor, PluginRegistry, Testable};
use tracing::debug;

/// 출력 형식 (text / json)
#[derive(Debug, Clone, Copy)]
pub struct Output {
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce() -> String) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            println!("{}", text());
        }
        Ok(())
    }
}

// ============================================================================
// Commands
// ============================================================================

pub fn list(registry: &PluginRegistry, output: Output) -> anyhow::Result<ExitCode> {
    let plugins = registry.list();
    output.emit(&plugins, || render_table(&plugins))?;
    Ok(ExitCode::SUCCESS)
}

pub fn find(registry: &PluginRegistry, name: &str, output: Output) -> anyhow::Result<ExitCode> {
    let plugins: Vec<PluginDescriptor> = registry
        .find_by_name(name)
        .iter()
        .filter_map(|plugin| registry.descriptor(&plugin.identity()))
        .collect();
    output.emit(&plugins, || render_table(&plugins))?;

    Ok(if plugins.is_empty() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

pub fn show(registry: &PluginRegistry, plugin: &str, output: Output) -> anyhow::Result<ExitCode> {
    let target = lookup(registry, plugin)?;
    let descriptor = registry
        .descriptor(&target.identity())
        .ok_or_else(|| anyhow!("Plugin {} is no longer registered", target.identity()))?;
    output.emit(&descriptor, || render_descriptor(&descriptor))?;
    Ok(ExitCode::SUCCESS)
}

pub async fn invoke(
    registry: PluginRegistry,
    plugin: String,
    operation: String,
    args: Vec<String>,
    output: Output,
) -> anyhow::Result<ExitCode> {
    let target = lookup(&registry, &plugin)?;
    let raw = wire_args(args.iter().map(|arg| parse_arg(arg)));
    debug!(plugin = target.name(), operation = %operation, "Invoking from CLI");

    // 플러그인 연산은 동기 코드
    let outcome = tokio::task::spawn_blocking(move || target.invoke(&operation, raw)).await?;
    print_outcome(&outcome, output)
}

pub fn field(
    registry: &PluginRegistry,
    plugin: &str,
    field: &str,
    output: Output,
) -> anyhow::Result<ExitCode> {
    let target = lookup(registry, plugin)?;
    let outcome = target.read_field(field);
    print_outcome(&outcome, output)
}

pub fn discover(registry: &PluginRegistry, output: Output) -> anyhow::Result<ExitCode> {
    let report = registry.discover();
    output.emit(&report, || {
        let mut lines = vec![format!(
            "{} registered, {} skipped, {} rejected",
            report.registered.len(),
            report.skipped.len(),
            report.rejected.len()
        )];
        for (plugin, reason) in &report.rejected {
            lines.push(format!("  ✗ {}: {}", plugin, reason));
        }
        lines.join("\n")
    })?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// Helpers
// ============================================================================

/// 저장 키(숫자) 또는 식별자(UUID)로 플러그인 조회
fn lookup(registry: &PluginRegistry, plugin: &str) -> anyhow::Result<Arc<dyn Testable>> {
    if let Ok(key) = plugin.parse::<u32>() {
        return registry
            .get_by_key(key)
            .ok_or_else(|| anyhow!("No plugin with key {}", key));
    }
    Ok(registry.resolve(plugin)?)
}

/// 인자 하나를 JSON으로 해석, 실패하면 문자열
fn parse_arg(arg: &str) -> Value {
    serde_json::from_str(arg).unwrap_or_else(|_| Value::String(arg.to_string()))
}

fn print_outcome(outcome: &Outcome, output: Output) -> anyhow::Result<ExitCode> {
    output.emit(&outcome.report(), || match outcome {
        Outcome::Value(value) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        Outcome::Empty => "(no value)".to_string(),
        Outcome::Failed(err) => format!("error: {}", err),
    })?;

    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn render_table(plugins: &[PluginDescriptor]) -> String {
    if plugins.is_empty() {
        return "No plugins found.".to_string();
    }

    let width = plugins.iter().map(|p| p.name.len()).max().unwrap_or(0);
    plugins
        .iter()
        .map(|p| {
            format!(
                "{:>3}  {}  {:<width$}  {}",
                p.key,
                p.identity,
                p.name,
                p.description,
                width = width
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_descriptor(d: &PluginDescriptor) -> String {
    let mut lines = vec![
        format!("{} (key {}, {})", d.name, d.key, d.source),
        format!("  identity:    {}", d.identity),
        format!("  description: {}", d.description),
        format!("  author:      {}", d.author),
        format!("  registered:  {}", d.registered_at.to_rfc3339()),
        "  operations:".to_string(),
    ];
    lines.extend(d.operations.iter().map(|op| format!("    {}", op)));
    if !d.fields.is_empty() {
        lines.push("  fields:".to_string());
        lines.extend(d.fields.iter().map(|f| format!("    {}", f)));
    }
    lines.join("\n")
}
