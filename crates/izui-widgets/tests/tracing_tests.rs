#![forbid(unsafe_code)]

//! Tracing instrumentation of the multi-select widget.
//!
//! Spans and events enabled:
//!   cargo test -p izui-widgets --features tracing --test tracing_tests
//!
//! Zero-overhead verification (no feature):
//!   cargo test -p izui-widgets --test tracing_tests -- zero_overhead

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use izui_core::geometry::Rect;
use izui_render::frame::Frame;
use izui_widgets::StatefulWidget;
use izui_widgets::multi_select::{MultiSelect, MultiSelectState, SelectOption};
#[cfg(feature = "tracing")]
use izui_core::event::{Event, KeyCode};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

// ============================================================================
// Test Infrastructure
// ============================================================================

#[derive(Debug, Clone)]
#[allow(dead_code)]
struct CapturedSpan {
    name: String,
    fields: HashMap<String, String>,
}

#[derive(Debug, Clone)]
#[allow(dead_code)]
struct CapturedEvent {
    message: String,
    fields: HashMap<String, String>,
    span: Option<String>,
}

/// A tracing Layer that records span metadata and events.
struct Capture {
    spans: Arc<Mutex<Vec<CapturedSpan>>>,
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct CaptureHandle {
    spans: Arc<Mutex<Vec<CapturedSpan>>>,
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl CaptureHandle {
    fn spans_named(&self, name: &str) -> Vec<CapturedSpan> {
        self.spans
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.name == name)
            .cloned()
            .collect()
    }

    #[allow(dead_code)]
    fn messages(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.message.clone())
            .collect()
    }
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for Capture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        attrs.record(&mut visitor);
        self.spans.lock().unwrap().push(CapturedSpan {
            name: attrs.metadata().name().to_string(),
            fields: visitor.0.into_iter().collect(),
        });
    }

    fn on_event(&self, event: &tracing::Event<'_>, ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let mut fields: HashMap<String, String> = visitor.0.into_iter().collect();
        let message = fields.remove("message").unwrap_or_default();
        let span = ctx
            .current_span()
            .id()
            .and_then(|id| ctx.span(id))
            .map(|s| s.name().to_string());
        self.events.lock().unwrap().push(CapturedEvent {
            message,
            fields,
            span,
        });
    }
}

fn with_capture<F: FnOnce()>(f: F) -> CaptureHandle {
    let spans = Arc::new(Mutex::new(Vec::new()));
    let events = Arc::new(Mutex::new(Vec::new()));
    let layer = Capture {
        spans: spans.clone(),
        events: events.clone(),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    CaptureHandle { spans, events }
}

fn options() -> Vec<SelectOption> {
    vec![
        SelectOption::new("north", "Clinic North"),
        SelectOption::new("south", "Clinic South"),
    ]
}

// ============================================================================
// Tests
// ============================================================================

#[test]
#[cfg(feature = "tracing")]
fn render_span_carries_widget_and_area() {
    let handle = with_capture(|| {
        let options = options();
        let mut state = MultiSelectState::default();
        let mut frame = Frame::new(40, 10);
        MultiSelect::new(&options, &[], |_| {}).render(Rect::new(2, 1, 30, 3), &mut frame, &mut state);
    });

    let spans = handle.spans_named("widget_render");
    assert_eq!(spans.len(), 1, "expected one render span, got {spans:?}");
    let fields = &spans[0].fields;
    assert!(fields.get("widget").is_some_and(|w| w.contains("MultiSelect")));
    assert_eq!(fields.get("x").map(String::as_str), Some("2"));
    assert_eq!(fields.get("y").map(String::as_str), Some("1"));
    assert_eq!(fields.get("w").map(String::as_str), Some("30"));
    assert_eq!(fields.get("h").map(String::as_str), Some("3"));
}

#[test]
#[cfg(feature = "tracing")]
fn state_transitions_are_logged() {
    let handle = with_capture(|| {
        let options = options();
        let mut selected: Vec<String> = Vec::new();
        let mut state = MultiSelectState::default();
        state.focus();
        let area = Rect::new(0, 0, 30, 3);

        let mut frame = Frame::new(40, 10);
        MultiSelect::new(&options, &selected, |_| {}).render(area, &mut frame, &mut state);

        let mut next = None;
        {
            let mut dropdown = MultiSelect::new(&options, &selected, |v| next = Some(v));
            dropdown.handle_event(&mut state, &Event::key(KeyCode::Enter));
            dropdown.handle_event(&mut state, &Event::key(KeyCode::Down));
            dropdown.handle_event(&mut state, &Event::key(KeyCode::Enter));
            dropdown.handle_event(&mut state, &Event::key(KeyCode::Escape));
        }
        selected = next.unwrap_or_default();
        assert_eq!(selected, vec!["north".to_string()]);
    });

    let messages = handle.messages();
    for expected in ["panel opened", "option toggled", "panel closed", "key routed"] {
        assert!(
            messages.iter().any(|m| m.contains(expected)),
            "missing {expected:?} in {messages:?}"
        );
    }
}

#[test]
#[cfg(feature = "tracing")]
fn portal_compose_is_traced() {
    let handle = with_capture(|| {
        let mut frame = Frame::new(10, 4);
        frame.portal();
        frame.compose();
    });
    assert_eq!(handle.spans_named("portal_compose").len(), 1);
}

/// Without the feature no spans are created at all.
#[test]
fn zero_overhead_when_disabled() {
    let handle = with_capture(|| {
        let options = options();
        let mut state = MultiSelectState::default();
        let mut frame = Frame::new(20, 5);
        MultiSelect::new(&options, &[], |_| {}).render(Rect::new(0, 0, 20, 3), &mut frame, &mut state);
    });

    let spans = handle.spans_named("widget_render");

    #[cfg(feature = "tracing")]
    assert!(
        !spans.is_empty(),
        "With tracing feature, widget_render spans should be present"
    );

    #[cfg(not(feature = "tracing"))]
    assert!(
        spans.is_empty(),
        "Without tracing feature, no widget_render spans should exist (got {})",
        spans.len()
    );
}
