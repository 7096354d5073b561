//! Span helpers for generation calls

/// Create a span for one generation cycle
///
/// Declares empty `duration_ms`, `error` and `error.message` fields so that
/// [`record_duration`] and [`record_error`] can fill them later.
///
/// # Example
///
/// ```rust
/// use textfill_observability::generation_span;
///
/// let span = generation_span!("6f0c…", "gpt-3.5-turbo", 5, 1);
/// let _guard = span.enter();
/// // ... send batches ...
/// ```
#[macro_export]
macro_rules! generation_span {
    ($generation_id:expr, $model:expr, $messages:expr, $batches:expr) => {
        tracing::info_span!(
            "generation",
            generation.id = $generation_id,
            model = $model,
            messages = $messages,
            batches = $batches,
            duration_ms = tracing::field::Empty,
            error = tracing::field::Empty,
            error.message = tracing::field::Empty,
        )
    };
}

/// Create a span for a field save hook
///
/// ```rust
/// use textfill_observability::field_span;
///
/// let span = field_span!("description", "gpt_instruction");
/// let _guard = span.enter();
/// ```
#[macro_export]
macro_rules! field_span {
    ($attribute:expr, $instruction_field:expr) => {
        tracing::info_span!(
            "field.pre_save",
            field.attribute = $attribute,
            field.instruction = $instruction_field,
            error = tracing::field::Empty,
            error.message = tracing::field::Empty,
        )
    };
}

/// Record an error on the current span and emit it as a warning.
///
/// Generation failures are recoverable for callers, so they are not logged
/// at error level.
pub fn record_error<E: std::error::Error>(error: &E) {
    let span = tracing::Span::current();
    span.record("error", true);
    span.record("error.message", error.to_string());
    tracing::warn!(error = %error, "Operation failed");
}

/// Record a duration in milliseconds on the current span.
pub fn record_duration(key: &str, duration: std::time::Duration) {
    let span = tracing::Span::current();
    span.record(key, duration.as_millis() as u64);
}
