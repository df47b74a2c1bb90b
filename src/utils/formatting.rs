use crate::model::{PredictionAnnotation, SliceStack};

const MAX_VALUE_LEN: usize = 64;

/// Shortens long locators from the left, keeping the file name visible.
pub fn truncate_locator(locator: &str) -> String {
    let count = locator.chars().count();
    if count <= MAX_VALUE_LEN {
        return locator.to_string();
    }

    let tail = locator
        .chars()
        .skip(count - (MAX_VALUE_LEN - 1))
        .collect::<String>();
    format!("…{tail}")
}

pub fn slice_count(count: usize) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("{count} slice{suffix}")
}

pub fn stack_summary(stack: &SliceStack) -> String {
    format!(
        "{} ({})",
        slice_count(stack.total_slices()),
        stack.source().kind()
    )
}

pub fn confidence_text(prediction: Option<&PredictionAnnotation>) -> String {
    prediction
        .map(|prediction| format!("{}%", prediction.confidence_percent()))
        .unwrap_or_else(|| "(none)".to_string())
}
