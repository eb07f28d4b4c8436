use chrono::Utc;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt::Debug;
use tracing::{
    field::{Field, Visit},
    Event, Level, Subscriber,
};
use tracing_error::ErrorLayer;
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::fmt::{format::Writer, FormatEvent, FormatFields};
use tracing_subscriber::layer::Context;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

/// Span fields kept for JSON output but hidden from the console line
const HIDDEN_CONSOLE_FIELDS: &[&str] = &["correlation_id", "span_type"];

/// Span fields recorded by [`FieldCollectorLayer`] and stored in the span extensions.
#[derive(Debug, Clone, Default)]
pub struct SpanFields {
    pub values: HashMap<String, String>,
    /// Field names in recording order, used for a stable console rendering
    order: Vec<String>,
}

impl SpanFields {
    fn insert(&mut self, name: &str, value: String) {
        if self.values.insert(name.to_string(), value).is_none() {
            self.order.push(name.to_string());
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// `key=value` pairs for the console, without the hidden fields.
    pub fn console_display(&self) -> String {
        self.order
            .iter()
            .filter(|name| !HIDDEN_CONSOLE_FIELDS.contains(&name.as_str()))
            .filter_map(|name| self.values.get(name).map(|value| format!("{}={}", name, value)))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn debug_to_string(value: &dyn Debug) -> String {
    format!("{:?}", value).trim_matches('"').to_string()
}

impl Visit for SpanFields {
    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        self.insert(field.name(), debug_to_string(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field.name(), value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field.name(), value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field.name(), value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field.name(), value.to_string());
    }
}

/// Keeps the fields of every span so the formatters can print them next to each event.
pub struct FieldCollectorLayer;

impl<S> Layer<S> for FieldCollectorLayer
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
{
    fn on_new_span(&self, attrs: &tracing::span::Attributes<'_>, id: &tracing::span::Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else { return };
        let mut fields = SpanFields::default();
        attrs.record(&mut fields);
        span.extensions_mut().insert(fields);
    }

    fn on_record(&self, id: &tracing::span::Id, values: &tracing::span::Record<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else { return };
        let mut extensions = span.extensions_mut();
        let mut fields = extensions.remove::<SpanFields>().unwrap_or_default();
        values.record(&mut fields);
        extensions.insert(fields);
    }
}

/// Event fields split into the message, the job id and everything else.
#[derive(Default)]
struct EventFields {
    message: String,
    job_id: Option<String>,
    rest: Vec<(String, String)>,
}

impl Visit for EventFields {
    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        let value = debug_to_string(value);
        match field.name() {
            "message" => self.message = value,
            "job_id" => self.job_id = Some(value),
            name => self.rest.push((name.to_string(), value)),
        }
    }
}

// Console formatter, one aligned row per event
pub struct PrettyFormatter;

const RESET: &str = "\x1b[0m";
const DIM: &str = "\x1b[90m";
const CYAN: &str = "\x1b[96m";
const GREEN: &str = "\x1b[92m";
const WHITE: &str = "\x1b[97m";

fn level_color(level: &Level) -> &'static str {
    match *level {
        Level::TRACE => "\x1b[90m",
        Level::DEBUG => "\x1b[34m",
        Level::INFO => "\x1b[32m",
        Level::WARN => "\x1b[33m",
        Level::ERROR => "\x1b[31m",
    }
}

impl<S, N> FormatEvent<S, N> for PrettyFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> std::fmt::Result {
        let meta = event.metadata();
        let mut fields = EventFields::default();
        event.record(&mut fields);

        let mut queue = queue_display_name("");
        let mut span_display = String::new();
        if let Some(span) = ctx.lookup_current() {
            if let Some(span_fields) = span.extensions().get::<SpanFields>() {
                queue = queue_column(span_fields);
                if fields.job_id.is_none() {
                    fields.job_id = span_fields.get("job_id").map(str::to_string);
                }
                span_display = span_fields.console_display();
            }
        }

        // Timestamp | Level | Queue | Component | message (job_id, fields) [span fields]
        write!(writer, "{CYAN}{}{RESET} {DIM}|{RESET} ", Utc::now().format("%y-%m-%d %H:%M:%S"))?;
        write!(writer, "{}{:<5}{RESET} {DIM}|{RESET} ", level_color(meta.level()), meta.level())?;
        write!(writer, "{GREEN}{:<26}{RESET} {DIM}|{RESET} ", queue)?;
        write!(writer, "{GREEN}{:<8}{RESET} {DIM}|{RESET} ", component_name(meta.target()))?;
        write!(writer, "{WHITE}{}{RESET}", fields.message)?;

        let mut extras: Vec<String> = Vec::new();
        if let Some(job_id) = &fields.job_id {
            extras.push(format!("job_id={}", job_id));
        }
        extras.extend(fields.rest.iter().map(|(name, value)| format!("{}={}", name, value)));
        if !extras.is_empty() {
            write!(writer, " {DIM}({}){RESET}", extras.join(", "))?;
        }
        if !span_display.is_empty() {
            write!(writer, " {DIM}[{}]{RESET}", span_display)?;
        }
        writeln!(writer)
    }
}

// JSON formatter, one object per line for log aggregation
pub struct JsonEventFormatter;

#[derive(Default)]
struct JsonFields {
    message: Option<String>,
    fields: Map<String, Value>,
}

impl Visit for JsonFields {
    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        let value = debug_to_string(value);
        if field.name() == "message" {
            self.message = Some(value);
        } else {
            self.fields.insert(field.name().to_string(), Value::String(value));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields.insert(field.name().to_string(), Value::String(value.to_string()));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.fields.insert(field.name().to_string(), Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.fields.insert(field.name().to_string(), Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.fields.insert(field.name().to_string(), Value::from(value));
    }
}

impl<S, N> FormatEvent<S, N> for JsonEventFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> std::fmt::Result {
        let meta = event.metadata();
        let mut visitor = JsonFields::default();
        event.record(&mut visitor);

        let mut root = Map::new();
        root.insert(
            "timestamp".to_string(),
            Value::String(Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)),
        );
        root.insert("level".to_string(), Value::String(meta.level().to_string()));
        root.insert("target".to_string(), Value::String(meta.target().to_string()));
        root.insert("component".to_string(), Value::String(component_name(meta.target()).to_string()));
        if let Some(file) = meta.file() {
            root.insert("filename".to_string(), Value::String(file.to_string()));
        }
        if let Some(line) = meta.line() {
            root.insert("line_number".to_string(), Value::from(line));
        }
        if let Some(message) = visitor.message.take() {
            root.insert("message".to_string(), Value::String(message));
        }

        let mut fields = visitor.fields;
        if let Some(span) = ctx.lookup_current() {
            fields.insert("span_name".to_string(), Value::String(span.metadata().name().to_string()));
            if let Some(span_fields) = span.extensions().get::<SpanFields>() {
                for (key, value) in &span_fields.values {
                    fields.entry(key.clone()).or_insert_with(|| Value::String(value.clone()));
                }
            }
        }
        if !fields.is_empty() {
            root.insert("fields".to_string(), Value::Object(fields));
        }

        let line = serde_json::to_string(&Value::Object(root)).map_err(|_| std::fmt::Error)?;
        writeln!(writer, "{}", line)
    }
}

/// Initialize the tracing subscriber with
/// - PrettyFormatter for console readability (when LOG_FORMAT != "json")
/// - JsonEventFormatter for json logging (when LOG_FORMAT = "json")
///
/// This will also install color_eyre to handle the panic in the application
pub fn init_logging() {
    color_eyre::install().expect("Unable to install color_eyre");

    // `RUST_LOG` wins; otherwise only this crate logs at info
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::builder()
            .with_default_directive(Level::WARN.into())
            .parse("translator=info")
            .expect("Invalid filter directive and Logger control")
    });

    let json = std::env::var("LOG_FORMAT").map(|format| format == "json").unwrap_or(false);
    let fmt_layer = fmt::layer().with_target(true).with_thread_ids(false).with_file(true).with_line_number(true);
    let fmt_layer = if json {
        fmt_layer.event_format(JsonEventFormatter).boxed()
    } else {
        fmt_layer.event_format(PrettyFormatter).boxed()
    };

    let subscriber = Registry::default()
        .with(env_filter)
        .with(FieldCollectorLayer)
        .with(fmt_layer)
        .with(ErrorLayer::default());
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set global default subscriber");
}

/// Maps the tracing target to the component column
fn component_name(target: &str) -> &'static str {
    let Some(module) = target.strip_prefix("translator") else {
        return "EXTERNAL";
    };
    match module.trim_start_matches("::").split("::").next() {
        Some("server") => "HTTP",
        Some("worker") => "WORKER",
        Some("core") => "CLIENT",
        Some("setup") => "SETUP",
        _ => "-",
    }
}

/// Worker spans and per-message spans both carry the queue as `queue`.
fn queue_column(span_fields: &SpanFields) -> String {
    queue_display_name(span_fields.get("queue").unwrap_or_default())
}

/// Renders a queue type such as `translation_job_processing` as `TRANSLATION_JOB_PROCESSING`
pub fn queue_display_name(queue_type: &str) -> String {
    if queue_type.is_empty() {
        return "-".to_string();
    }
    queue_type.to_uppercase()
}
