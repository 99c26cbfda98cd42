use std::borrow::Cow;

/// Renders an optional error context as a ` (context)` suffix.
#[must_use]
pub fn format_context(context: Option<&Cow<'static, str>>) -> Cow<'static, str> {
    context.map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}
